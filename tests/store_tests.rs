// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use flowdesk::models::TaskStatus;
use flowdesk::store::{apply_change, load_entries, load_tasks, Change, Snapshot};
use flowdesk::{db, demo};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn seed_fills_empty_tables_once() {
    let mut conn = setup();
    demo::seed(&mut conn).unwrap();
    demo::seed(&mut conn).unwrap();
    let snap = Snapshot::load(&conn).unwrap();
    assert_eq!(snap.entries.len(), 14);
    assert_eq!(snap.tasks.len(), 5);
    assert_eq!(snap.users.len(), 5);

    let ids: Vec<&str> = snap.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["5", "3", "2", "1", "4"]);
    assert_eq!(snap.entries[0].id, "f1");
    assert_eq!(snap.entries[13].id, "f14");
}

#[test]
fn apply_change_inserts_at_newest_end() {
    let mut tasks = demo::tasks().unwrap();
    let mut fresh = tasks[4].clone();
    fresh.id = "new".into();
    apply_change(&mut tasks, Change::Insert(fresh));
    assert_eq!(tasks[0].id, "new");
    assert_eq!(tasks.len(), 6);

    let mut entries = demo::entries().unwrap();
    let mut e = entries[0].clone();
    e.id = "f15".into();
    apply_change(&mut entries, Change::Insert(e));
    assert_eq!(entries.last().unwrap().id, "f15");

    let mut users = demo::users().unwrap();
    let mut u = users[0].clone();
    u.id = "u6".into();
    apply_change(&mut users, Change::Insert(u));
    assert_eq!(users[0].id, "1");
    assert_eq!(users.last().unwrap().id, "u6");
}

#[test]
fn apply_change_insert_with_known_id_does_not_duplicate() {
    let mut tasks = demo::tasks().unwrap();
    let mut again = tasks[3].clone();
    again.title = "Renamed".into();
    apply_change(&mut tasks, Change::Insert(again));
    assert_eq!(tasks.len(), 5);
    assert_eq!(tasks.iter().filter(|t| t.title == "Renamed").count(), 1);
    assert_eq!(tasks[0].title, "Renamed");
}

#[test]
fn apply_change_update_and_delete() {
    let mut tasks = demo::tasks().unwrap();
    let mut moved = tasks[2].clone();
    let id = moved.id.clone();
    moved.status = TaskStatus::Done;
    apply_change(&mut tasks, Change::Update(moved));
    assert_eq!(tasks[2].id, id);
    assert_eq!(tasks[2].status, TaskStatus::Done);

    let mut ghost = tasks[0].clone();
    ghost.id = "ghost".into();
    apply_change(&mut tasks, Change::Update(ghost));
    assert_eq!(tasks.len(), 5);
    assert!(tasks.iter().all(|t| t.id != "ghost"));

    apply_change(&mut tasks, Change::Delete(id.clone()));
    assert_eq!(tasks.len(), 4);
    assert!(tasks.iter().all(|t| t.id != id));
    apply_change(&mut tasks, Change::Delete("missing".into()));
    assert_eq!(tasks.len(), 4);
}

#[test]
fn snapshot_save_round_trips() {
    let mut conn = setup();
    demo::seed(&mut conn).unwrap();
    let mut snap = Snapshot::load(&conn).unwrap();
    snap.entries.retain(|e| e.id != "f2");
    snap.entries[0].amount = Decimal::new(4100, 0);
    snap.tasks.remove(0);
    snap.save(&mut conn).unwrap();

    let again = Snapshot::load(&conn).unwrap();
    assert_eq!(again, snap);
    assert_eq!(load_entries(&conn).unwrap().len(), 13);
    assert_eq!(load_tasks(&conn).unwrap()[0].id, "3");
}

#[test]
fn unreadable_collection_falls_back_to_demo_data() {
    let conn = setup();
    conn.execute_batch("DROP TABLE tasks;").unwrap();
    assert!(Snapshot::load(&conn).is_err());

    let snap = Snapshot::load_or_fallback(&conn).unwrap();
    assert_eq!(snap.tasks.len(), 5);
    assert!(snap.entries.is_empty());
    assert!(snap.users.is_empty());
}
