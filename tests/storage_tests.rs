use std::fs;
use chrono::{NaiveDate, NaiveDateTime};
use leo::models::{Task, TaskKind};
use leo::storage::{decode_line, encode_task, Storage};
use leo::task_list::TaskList;
use tempfile::tempdir;

fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
}

fn summary(list: &TaskList) -> Vec<(char, String, bool, TaskKind)> {
    list.iter().map(|t| (t.kind.code(), t.description.clone(), t.done, t.kind.clone())).collect()
}

#[test]
fn test_missing_file_loads_empty() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("nope").join("leo.txt"));
    let report = storage.load().unwrap();
    assert!(report.tasks.is_empty());
    assert!(report.skipped.is_empty());
}

#[test]
fn test_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("data").join("leo.txt");
    let storage = Storage::new(&path);

    let mut list = TaskList::new();
    list.add(Task::todo("read book")).unwrap();
    let mut deadline = Task::deadline("return book", dt(2019, 12, 2, 18, 0));
    deadline.mark_done();
    list.add(deadline).unwrap();
    list.add(Task::event("project meeting", dt(2019, 12, 2, 14, 0), dt(2019, 12, 2, 16, 0))).unwrap();

    storage.save(&list).unwrap();
    assert!(path.exists(), "save should create the parent directory");

    let loaded = storage.load().unwrap();
    assert!(loaded.skipped.is_empty());
    assert_eq!(summary(&loaded.tasks), summary(&list));
}

#[test]
fn test_file_format() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leo.txt");
    let storage = Storage::new(&path);

    let mut list = TaskList::new();
    list.add(Task::todo("read book")).unwrap();
    let mut d = Task::deadline("return book", dt(2019, 12, 2, 18, 0));
    d.mark_done();
    list.add(d).unwrap();
    list.add(Task::event("meeting", dt(2019, 12, 2, 14, 0), dt(2019, 12, 2, 16, 0))).unwrap();
    storage.save(&list).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "T | 0 | read book\n\
         D | 1 | return book | 2019-12-02T18:00\n\
         E | 0 | meeting | 2019-12-02T14:00 | 2019-12-02T16:00\n"
    );
}

#[test]
fn test_save_overwrites() {
    let dir = tempdir().unwrap();
    let storage = Storage::new(dir.path().join("leo.txt"));
    let mut list = TaskList::new();
    list.add(Task::todo("a")).unwrap();
    list.add(Task::todo("b")).unwrap();
    storage.save(&list).unwrap();
    list.remove(0).unwrap();
    storage.save(&list).unwrap();

    let loaded = storage.load().unwrap().tasks;
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.get(0).unwrap().description, "b");
}

#[test]
fn test_tolerant_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leo.txt");
    fs::write(&path, "T | 0 | read book\nT | 1\n").unwrap();

    let report = Storage::new(&path).load().unwrap();
    assert_eq!(report.tasks.len(), 1);
    assert_eq!(report.tasks.get(0).unwrap().description, "read book");
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line_no, 2);
}

#[test]
fn test_non_utf8_line_only_costs_that_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leo.txt");
    let mut bytes = b"\xff\xfe | 0 | x\r\n".to_vec();
    bytes.extend_from_slice(b"T | 1 | read book\r\n");
    fs::write(&path, &bytes).unwrap();

    let report = Storage::new(&path).load().unwrap();
    assert_eq!(report.tasks.len(), 1);
    assert!(report.tasks.get(0).unwrap().done);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line_no, 1);
    assert!(report.skipped[0].reason.contains("UTF-8"));
}

#[test]
fn test_skips_every_kind_of_bad_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leo.txt");
    fs::write(
        &path,
        "\n\
         X | 0 | unknown type\n\
         D | 0 | no time\n\
         E | 0 | one time | 2019-12-02T14:00\n\
         T | 0 | too | many\n\
         T | 7 | bad flag\n\
         D | 0 | bad time | not-a-date\n\
         \x20\x20\n\
         D | 1 | good | 2019-12-02\n",
    )
    .unwrap();

    let report = Storage::new(&path).load().unwrap();
    assert_eq!(report.tasks.len(), 1);
    let t = report.tasks.get(0).unwrap();
    assert!(t.done);
    assert_eq!(t.kind, TaskKind::Deadline { by: dt(2019, 12, 2, 0, 0) });
    let lines: Vec<usize> = report.skipped.iter().map(|s| s.line_no).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_load_keeps_duplicates_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("leo.txt");
    fs::write(&path, "T | 0 | read\nT | 1 | READ\n").unwrap();
    assert_eq!(Storage::new(&path).load().unwrap().tasks.len(), 2);
}

#[test]
fn test_line_codec() {
    let t = decode_line("E|1|trip|2025-06-15T08:00|2025-06-16").unwrap();
    assert!(t.done);
    assert_eq!(encode_task(&t), "E | 1 | trip | 2025-06-15T08:00 | 2025-06-16T00:00");
    assert!(decode_line("T | 0 |  ").is_err());
}

#[test]
fn test_unreadable_path_is_io_error() {
    let dir = tempdir().unwrap();
    // A directory where the file should be.
    let storage = Storage::new(dir.path());
    assert!(matches!(storage.load(), Err(leo::LeoError::Io { .. })));
    assert!(matches!(storage.save(&TaskList::new()), Err(leo::LeoError::Io { .. })));
}
