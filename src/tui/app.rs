use ratatui::widgets::TableState;
use crate::commands::{Executor, Response};
use crate::ui::{greeting, render, render_error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Leo,
    Error,
}

/// One bubble in the dialog transcript.
pub struct Message {
    pub speaker: Speaker,
    pub lines: Vec<String>,
}

pub struct App {
    pub executor: Executor,
    pub transcript: Vec<Message>,
    pub input_buffer: String,
    pub state: TableState,
    /// Lines scrolled up from the bottom of the transcript.
    pub scroll_back: u16,
    pub should_quit: bool,
}

impl App {
    /// Creates the dialog state. `notices` are startup messages shown after the greeting.
    pub fn new(executor: Executor, notices: Vec<String>) -> App {
        let mut transcript = vec![Message { speaker: Speaker::Leo, lines: greeting() }];
        if !notices.is_empty() {
            transcript.push(Message { speaker: Speaker::Error, lines: notices });
        }
        let mut state = TableState::default();
        if !executor.tasks().is_empty() {
            state.select(Some(0));
        }
        App {
            executor,
            transcript,
            input_buffer: String::new(),
            state,
            scroll_back: 0,
            should_quit: false,
        }
    }

    /// Runs the typed line through the executor and appends both sides to the transcript.
    pub fn submit(&mut self) {
        let line = std::mem::take(&mut self.input_buffer);
        if line.trim().is_empty() {
            return;
        }
        self.transcript.push(Message { speaker: Speaker::User, lines: vec![line.trim().to_string()] });

        match self.executor.handle(&line) {
            Ok(Response::Exit) => {
                self.transcript.push(Message { speaker: Speaker::Leo, lines: render(&Response::Exit) });
                self.should_quit = true;
            }
            Ok(response) => {
                self.transcript.push(Message { speaker: Speaker::Leo, lines: render(&response) });
            }
            Err(e) => {
                self.transcript.push(Message { speaker: Speaker::Error, lines: render_error(&e) });
            }
        }
        self.scroll_back = 0;
        self.clamp_selection();
    }

    /// Selects the next task in the side panel.
    pub fn next(&mut self) {
        let len = self.executor.tasks().len();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task in the side panel.
    pub fn previous(&mut self) {
        let len = self.executor.tasks().len();
        if len == 0 { return; }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn scroll_up(&mut self) {
        self.scroll_back = self.scroll_back.saturating_add(5);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_back = self.scroll_back.saturating_sub(5);
    }

    fn clamp_selection(&mut self) {
        let len = self.executor.tasks().len();
        if len == 0 {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= len {
                self.state.select(Some(len - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }
}
