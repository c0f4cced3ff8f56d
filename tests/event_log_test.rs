//! JSON-lines event log written by a text session

use std::fs;

use dr_mario::config::SessionConfig;
use dr_mario::core::GameState;
use dr_mario::event_log::{EventLog, EventRecord, LogRecord};
use dr_mario::session;
use dr_mario::types::EngineEvent;

fn read_records(path: &std::path::Path) -> Vec<LogRecord> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_session_writes_one_record_per_command() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let config = SessionConfig {
        log_path: Some(path.to_string_lossy().into_owned()),
        ..SessionConfig::default()
    };

    let input = "4\n4\nCONTENTS\n\n\n\n   r\nF R Y\n\n\n\n\nQ\n";
    session::run(input.as_bytes(), Vec::new(), Vec::new(), &config, false).unwrap();

    let records = read_records(&path);
    let commands: Vec<&str> = records.iter().map(|r| r.command.as_str()).collect();
    assert_eq!(commands, ["contents", "spawn R Y", "tick", "tick", "tick", "tick"]);
    assert_eq!(
        records.iter().map(|r| r.seq).collect::<Vec<_>>(),
        [1, 2, 3, 4, 5, 6]
    );

    assert_eq!(
        records[1].events,
        [EventRecord::Spawned {
            left: "red".into(),
            right: "yellow".into()
        }]
    );
    assert!(records[2].events.is_empty());
    assert_eq!(records[4].events, [EventRecord::Landed { row: 3, col: 1 }]);
    assert_eq!(records[5].events, [EventRecord::Frozen { row: 3, col: 1 }]);
    assert!(records.iter().all(|r| r.has_virus && !r.game_over));
}

#[test]
fn test_log_appends_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("append.jsonl");
    let game = GameState::new(2, 2).unwrap();

    let mut log = EventLog::open(&path).unwrap();
    log.record("tick", &[], &game);
    drop(log);

    let mut log = EventLog::open(&path).unwrap();
    log.record("tick", &[EngineEvent::GameOver], &game);
    assert_eq!(log.seq(), 1);

    let records = read_records(&path);
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].events, [EventRecord::GameOver]);
    assert!(!records[1].has_virus);
}

#[test]
fn test_unopenable_log_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let config = SessionConfig {
        log_path: Some(dir.path().join("missing").join("log.jsonl").to_string_lossy().into_owned()),
        ..SessionConfig::default()
    };

    let mut diag = Vec::new();
    let out = session::run("1\n2\nEMPTY\n".as_bytes(), Vec::new(), &mut diag, &config, false).unwrap();
    assert!(!out.is_empty());
    assert!(String::from_utf8(diag).unwrap().contains("event log disabled"));
}
