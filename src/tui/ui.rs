use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use super::app::{App, Speaker};

pub fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Dialog + tasks
            Constraint::Length(3), // Input
            Constraint::Length(1), // Help
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    // Dialog transcript
    let mut lines: Vec<Line> = Vec::new();
    for msg in &app.transcript {
        let (label, style) = match msg.speaker {
            Speaker::User => ("You", Style::default().fg(Color::Cyan)),
            Speaker::Leo => ("Leo", Style::default().fg(Color::Green)),
            Speaker::Error => ("Leo", Style::default().fg(Color::Red)),
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", label),
            style.add_modifier(Modifier::BOLD),
        )));
        for l in &msg.lines {
            lines.push(Line::from(Span::styled(format!("  {}", l), style)));
        }
        lines.push(Line::from(""));
    }
    // Count rows after wrapping, inside the borders, so the newest line stays in view.
    let dialog = Paragraph::new(lines).wrap(Wrap { trim: false });
    let visible = columns[0].height.saturating_sub(2);
    let wrapped = dialog.line_count(columns[0].width.saturating_sub(2));
    let total = u16::try_from(wrapped).unwrap_or(u16::MAX);
    let offset = total.saturating_sub(visible).saturating_sub(app.scroll_back);
    let dialog = dialog
        .block(Block::default().borders(Borders::ALL).title("Leo"))
        .scroll((offset, 0));
    f.render_widget(dialog, columns[0]);

    // Task panel
    let task_rows: Vec<Row> = app
        .executor
        .tasks()
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if t.done {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(format!("[{}][{}]", t.kind.code(), t.status_icon())),
                Cell::from(t.description.clone()),
                Cell::from(t.when()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Length(7),
        Constraint::Min(12),
        Constraint::Min(10),
    ];
    let count = app.executor.tasks().len();
    let table = Table::new(task_rows, widths)
        .header(Row::new(vec!["#", "", "Description", "When"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(format!("Tasks ({})", count)))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, columns[1], &mut app.state);

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Command"));
    f.render_widget(input, rows[1]);

    let help = Paragraph::new("Enter: Send | Esc: Quit | Up/Down: Select task | PgUp/PgDn: Scroll dialog")
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, rows[2]);
}
