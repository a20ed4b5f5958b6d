// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use jw_core::test_support::log_entry;
use jw_core::LogLevel;
use jw_storage::{FileLogStore, MemoryLogStore, LOG_CAPACITY};

fn frame(n: usize) -> String {
    serde_json::to_string(&log_entry(n)).unwrap()
}

#[test]
fn frames_are_buffered_persisted_and_broadcast() {
    let store = Arc::new(MemoryLogStore::new());
    let logs = LogService::open(Arc::clone(&store), false);
    let mut live = logs.subscribe();
    let handler = logs.frame_handler();

    handler.handle(&frame(1)).unwrap();
    handler
        .handle(r#"{"level":"SUCCESS","message":"warmup done","account":{"id":3,"email":"a@x.io"}}"#)
        .unwrap();

    assert_eq!(logs.len(), 2);
    assert_eq!(live.try_recv().unwrap().message, "line 1");
    let second = live.try_recv().unwrap();
    assert_eq!(second.level, LogLevel::Success);
    assert_eq!(second.account.map(|a| a.email), Some("a@x.io".to_string()));
    assert!(store.payload().is_some());
}

#[test]
fn bad_frames_are_rejected_without_buffering() {
    let logs = LogService::open(MemoryLogStore::new(), false);
    let handler = logs.frame_handler();

    assert!(handler.handle(r#"{"level":"LOUD","message":"x"}"#).is_err());
    assert!(handler.handle("").is_err());
    assert!(logs.is_empty());
}

#[test]
fn cold_start_hydrates_then_appends() {
    let dir = tempfile::tempdir().unwrap();
    {
        let logs = LogService::open(FileLogStore::in_dir(dir.path()), false);
        for n in 0..LOG_CAPACITY + 5 {
            logs.push(log_entry(n));
        }
    }

    let logs = LogService::open(FileLogStore::in_dir(dir.path()), false);
    assert_eq!(logs.len(), LOG_CAPACITY);
    assert_eq!(logs.entries()[0].message, "line 5");

    logs.push(log_entry(9_999));
    let recent = logs.recent(2);
    assert_eq!(recent[0].message, format!("line {}", LOG_CAPACITY + 4));
    assert_eq!(recent[1].message, "line 9999");
}

#[test]
fn fresh_session_clears_storage() {
    let dir = tempfile::tempdir().unwrap();
    LogService::open(FileLogStore::in_dir(dir.path()), false).push(log_entry(1));

    let logs = LogService::open(FileLogStore::in_dir(dir.path()), true);
    assert!(logs.is_empty());
    assert!(LogService::open(FileLogStore::in_dir(dir.path()), false).is_empty());
}

#[test]
fn stored_order_matches_buffer_under_concurrent_pushes() {
    let store = Arc::new(MemoryLogStore::new());
    let logs = LogService::open(Arc::clone(&store), false);

    let writers: Vec<_> = (0..4)
        .map(|t| {
            let logs = logs.clone();
            std::thread::spawn(move || {
                for n in 0..25 {
                    logs.push(log_entry(t * 100 + n));
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    let stored: Vec<LogEntry> = serde_json::from_slice(&store.payload().unwrap()).unwrap();
    assert_eq!(stored.len(), 100);
    assert_eq!(stored, logs.entries());
}
