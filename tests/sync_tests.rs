// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use flowdesk::commands::sync::{self, parse_event, SyncChange};
use flowdesk::models::{TaskStatus, UserStatus};
use flowdesk::store::{get_entry, get_task, get_user, load_tasks, Change};
use flowdesk::{cli, db, demo};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Write;
use tempfile::NamedTempFile;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    demo::seed(&mut conn).unwrap();
    conn
}

fn run_sync(conn: &mut Connection, feed: &str) -> anyhow::Result<()> {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(feed.as_bytes()).unwrap();
    let path = file.path().to_str().unwrap().to_string();
    let matches = cli::build_cli().get_matches_from(["flowdesk", "sync", "--from", path.as_str()]);
    sync::handle(conn, matches.subcommand_matches("sync").unwrap())
}

#[test]
fn parse_event_resolves_table_and_kind() {
    let c = parse_event(r#"{"table":"tasks","event":"DELETE","old":{"id":"3"}}"#).unwrap();
    assert_eq!(c, SyncChange::Task(Change::Delete("3".into())));

    let c = parse_event(r#"{"table":"profiles","eventType":"DELETE","old":{"id":7}}"#).unwrap();
    assert_eq!(c, SyncChange::User(Change::Delete("7".into())));

    let c = parse_event(
        r#"{"table":"finance_entries","event":"insert","new":{"id":"f20","type":"revenue","amount":"150.25","date":"2023-08-01","category":"Sales"}}"#,
    )
    .unwrap();
    match c {
        SyncChange::Entry(Change::Insert(e)) => {
            assert_eq!(e.amount, Decimal::new(15025, 2));
            assert_eq!(e.notes, None);
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn numeric_ids_are_accepted_on_every_event() {
    let c = parse_event(
        r#"{"table":"profiles","event":"INSERT","new":{"id":42,"name":"Ola Berg","email":"ola@flowdesk.com","role":"Staff","status":"Active"}}"#,
    )
    .unwrap();
    match c {
        SyncChange::User(Change::Insert(u)) => assert_eq!(u.id, "42"),
        other => panic!("unexpected {:?}", other),
    }

    let c = parse_event(
        r#"{"table":"finance_entries","event":"UPDATE","new":{"id":7,"type":"expense","amount":"12","date":"2023-08-02","category":"Tools"}}"#,
    )
    .unwrap();
    match c {
        SyncChange::Entry(Change::Update(e)) => assert_eq!(e.id, "7"),
        other => panic!("unexpected {:?}", other),
    }

    let err = parse_event(r#"{"table":"tasks","event":"INSERT","new":{"title":"No id"}}"#).unwrap_err();
    assert!(err.to_string().contains("no id"));
}

#[test]
fn parse_event_rejects_unknown_table_and_event() {
    let err = parse_event(r#"{"table":"invoices","event":"DELETE","old":{"id":"1"}}"#).unwrap_err();
    assert!(err.to_string().contains("Unknown table"));
    let err = parse_event(r#"{"table":"tasks","event":"TRUNCATE"}"#).unwrap_err();
    assert!(err.to_string().contains("Unknown event"));
    assert!(parse_event(r#"{"table":"tasks","event":"INSERT"}"#).is_err());
}

#[test]
fn sync_merges_feed_into_store() {
    let mut conn = setup();
    let feed = r#"
{"table":"tasks","event":"INSERT","new":{"id":"t9","title":"Quarterly offsite","status":"Todo","priority":"High","createdAt":"2023-11-05T09:00:00Z","tags":["team"]}}
{"table":"tasks","event":"UPDATE","new":{"id":"2","title":"Update Onboarding Documentation","description":"","assignee":"Alex Miller","status":"Done","priority":"Medium","dueDate":"2023-11-20","createdAt":"2023-10-05T00:00:00Z"}}
{"table":"tasks","event":"DELETE","old":{"id":"4"}}
{"table":"profiles","event":"UPDATE","new":{"id":"4","name":"Marcus Aurelius","email":"marcus@flowdesk.com","role":"Staff","status":"Active"}}
{"table":"finance_entries","event":"INSERT","new":{"id":"f15","type":"expense","amount":120,"date":"2023-07-30","category":"Tools"}}
{"table":"finance_entries","event":"INSERT","new":{"id":"f16","type":"expense","amount":"0","date":"2023-07-30","category":"Tools"}}
"#;
    run_sync(&mut conn, feed).unwrap();

    let tasks = load_tasks(&conn).unwrap();
    assert_eq!(tasks.len(), 5);
    assert_eq!(tasks[0].id, "t9");
    assert_eq!(tasks[0].tags, vec!["team"]);
    assert!(get_task(&conn, "4").unwrap().is_none());
    assert_eq!(get_task(&conn, "2").unwrap().unwrap().status, TaskStatus::Done);

    assert_eq!(get_user(&conn, "4").unwrap().unwrap().status, UserStatus::Active);

    assert_eq!(
        get_entry(&conn, "f15").unwrap().unwrap().amount,
        Decimal::new(120, 0)
    );
    assert!(get_entry(&conn, "f16").unwrap().is_none());
}

#[test]
fn bad_line_aborts_without_writing() {
    let mut conn = setup();
    let feed = "{\"table\":\"tasks\",\"event\":\"DELETE\",\"old\":{\"id\":\"1\"}}\nnot json\n";
    let err = run_sync(&mut conn, feed).unwrap_err();
    assert!(format!("{:#}", err).contains(":2"));
    assert!(get_task(&conn, "1").unwrap().is_some());
}
