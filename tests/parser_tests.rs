use chrono::{NaiveDate, NaiveDateTime};
use leo::error::LeoError;
use leo::parser::{parse, Command};

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn parse_err(input: &str) -> String {
    match parse(input) {
        Err(LeoError::Parse(msg)) => msg,
        other => panic!("expected parse error for {:?}, got {:?}", input, other),
    }
}

#[test]
fn test_simple_words() {
    assert_eq!(parse("list").unwrap(), Command::List);
    assert_eq!(parse("  BYE  ").unwrap(), Command::Exit);
    assert_eq!(parse("Undo").unwrap(), Command::Undo);
}

#[test]
fn test_empty_input() {
    assert!(parse_err("   ").contains("cannot be empty"));
}

#[test]
fn test_todo() {
    assert_eq!(
        parse("todo   read   book ").unwrap(),
        Command::AddTodo { description: "read   book".into() }
    );
    assert!(parse_err("todo").contains("description of a todo cannot be empty"));
    assert!(parse_err("todo    ").contains("description of a todo cannot be empty"));
}

#[test]
fn test_deadline() {
    assert_eq!(
        parse("deadline return book /by 2019-12-02 1800").unwrap(),
        Command::AddDeadline { description: "return book".into(), by: dt(2019, 12, 2, 18, 0) }
    );
}

#[test]
fn test_deadline_splits_at_last_by() {
    assert_eq!(
        parse("deadline finish /by report /by 2025-01-01 1200").unwrap(),
        Command::AddDeadline { description: "finish /by report".into(), by: dt(2025, 1, 1, 12, 0) }
    );
}

#[test]
fn test_deadline_errors() {
    assert!(parse_err("deadline").contains("cannot be empty"));
    assert!(parse_err("deadline return book").starts_with("Usage: deadline"));
    assert!(parse_err("deadline /by 2019-12-02").starts_with("Usage: deadline"));
    assert!(parse_err("deadline return book /by").starts_with("Usage: deadline"));
    assert!(parse_err("deadline return book /by someday").contains("Invalid date/time format"));
}

#[test]
fn test_event() {
    assert_eq!(
        parse("event project meeting /from 2019-12-02 1400 /to 2019-12-02 1600").unwrap(),
        Command::AddEvent {
            description: "project meeting".into(),
            from: dt(2019, 12, 2, 14, 0),
            to: dt(2019, 12, 2, 16, 0),
        }
    );
}

#[test]
fn test_event_uses_last_keywords() {
    assert_eq!(
        parse("event trip /from home /to work /from 2025-06-15 /to 16/6/2025 0900").unwrap(),
        Command::AddEvent {
            description: "trip /from home /to work".into(),
            from: dt(2025, 6, 15, 0, 0),
            to: dt(2025, 6, 16, 9, 0),
        }
    );
}

#[test]
fn test_event_errors() {
    assert!(parse_err("event").contains("description of an event cannot be empty"));
    assert!(parse_err("event party /from 2025-06-15").starts_with("Usage: event"));
    assert!(parse_err("event party /to 2025-06-15").starts_with("Usage: event"));
    assert!(parse_err("event party /to 2025-06-16 /from 2025-06-15").starts_with("Usage: event"));
    assert!(parse_err("event /from 2025-06-15 /to 2025-06-16").starts_with("Usage: event"));
    assert!(parse_err("event party /from /to 2025-06-16").starts_with("Usage: event"));
    assert!(parse_err("event party /from 2025-06-15 /to").starts_with("Usage: event"));
}

#[test]
fn test_index_commands() {
    assert_eq!(parse("mark 1").unwrap(), Command::Mark { index: 0 });
    assert_eq!(parse("UNMARK 3").unwrap(), Command::Unmark { index: 2 });
    // Bounds are checked later, against the actual list.
    assert_eq!(parse("delete 42").unwrap(), Command::Delete { index: 41 });
}

#[test]
fn test_index_errors() {
    assert_eq!(parse_err("mark"), "Usage: mark <task number>");
    assert_eq!(parse_err("unmark two"), "Usage: unmark <task number>");
    assert_eq!(parse_err("delete 1.5"), "Usage: delete <task number>");
    assert_eq!(parse_err("delete -1"), "Usage: delete <task number>");
}

#[test]
fn test_task_zero_is_left_to_the_executor() {
    assert!(matches!(parse("mark 0"), Ok(Command::Mark { .. })));
    assert!(matches!(parse("delete 0"), Ok(Command::Delete { .. })));
}

#[test]
fn test_find() {
    assert_eq!(parse("find  book ").unwrap(), Command::Find { keyword: "book".into() });
    assert_eq!(parse_err("find"), "Usage: find <keyword>");
}

#[test]
fn test_unknown_command_lists_words() {
    let msg = parse_err("blah blah");
    assert!(msg.contains("Not a valid command"));
    assert!(msg.contains("todo, deadline, event, list, mark, unmark, delete, find, undo, bye"));
}

#[test]
fn test_pipe_in_description_rejected() {
    assert!(parse_err("todo a | b").contains("'|'"));
}

#[test]
fn test_is_mutating() {
    assert!(parse("todo x").unwrap().is_mutating());
    assert!(parse("delete 1").unwrap().is_mutating());
    assert!(!parse("list").unwrap().is_mutating());
    assert!(!parse("find x").unwrap().is_mutating());
    assert!(!parse("undo").unwrap().is_mutating());
}
