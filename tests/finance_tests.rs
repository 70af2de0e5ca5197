// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use flowdesk::models::{FinanceEntry, FinanceType};
use flowdesk::store::{get_entry, load_entries, upsert_entry};
use flowdesk::{cli, commands::finance, db};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    for (id, kind, amount, date, category) in [
        ("f1", FinanceType::Revenue, 4000, "2023-01-15", "Sales"),
        ("f2", FinanceType::Expense, 2400, "2023-01-20", "Payroll"),
        ("f3", FinanceType::Revenue, 3000, "2023-02-10", "Subscription"),
        ("f4", FinanceType::Expense, 1398, "2023-02-25", "Tools"),
    ] {
        upsert_entry(
            &conn,
            &FinanceEntry {
                id: id.into(),
                r#type: kind,
                amount: Decimal::new(amount, 0),
                date: chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
                category: category.into(),
                notes: None,
            },
        )
        .unwrap();
    }
    conn
}

fn finance_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["flowdesk", "finance"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    matches.subcommand_matches("finance").unwrap().clone()
}

fn run(conn: &Connection, args: &[&str]) -> anyhow::Result<()> {
    finance::handle(conn, &finance_matches(args))
}

#[test]
fn add_records_entry() {
    let conn = setup();
    run(
        &conn,
        &[
            "add", "--type", "revenue", "--amount", "1250.50", "--date", "2023-03-05",
            "--category", " Service ", "--notes", "  ",
        ],
    )
    .unwrap();
    let entries = load_entries(&conn).unwrap();
    assert_eq!(entries.len(), 5);
    let added = entries.last().unwrap();
    assert_eq!(added.r#type, FinanceType::Revenue);
    assert_eq!(added.amount, Decimal::new(125050, 2));
    assert_eq!(added.category, "Service");
    assert_eq!(added.notes, None);
    assert!(!added.id.is_empty());
}

#[test]
fn add_rejects_non_positive_amount() {
    let conn = setup();
    for amount in ["0", "-15"] {
        let err = run(
            &conn,
            &[
                "add", "--type", "expense", "--amount", amount, "--date", "2023-03-05",
                "--category", "Tools",
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("greater than zero"), "{}", err);
    }
    assert_eq!(load_entries(&conn).unwrap().len(), 4);
}

#[test]
fn add_rejects_bad_date_and_type() {
    let conn = setup();
    let err = run(
        &conn,
        &[
            "add", "--type", "expense", "--amount", "10", "--date", "2023-13-45",
            "--category", "Tools",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Invalid date"));

    let err = run(
        &conn,
        &["add", "--type", "refund", "--amount", "10", "--category", "Tools"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown finance type"));
}

#[test]
fn edit_replaces_in_place() {
    let conn = setup();
    run(
        &conn,
        &["edit", "--id", "f2", "--amount", "2600", "--notes", "bonus month"],
    )
    .unwrap();
    let e = get_entry(&conn, "f2").unwrap().unwrap();
    assert_eq!(e.amount, Decimal::new(2600, 0));
    assert_eq!(e.notes.as_deref(), Some("bonus month"));
    assert_eq!(e.r#type, FinanceType::Expense);

    let entries = load_entries(&conn).unwrap();
    assert_eq!(entries.len(), 4);
    // recording order is kept
    assert_eq!(entries[1].id, "f2");
}

#[test]
fn edit_and_rm_of_unknown_id_fail() {
    let conn = setup();
    let err = run(&conn, &["edit", "--id", "nope", "--amount", "1"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
    let err = run(&conn, &["rm", "--id", "nope"]).unwrap_err();
    assert!(err.to_string().contains("not found"));
}

#[test]
fn rm_deletes_entry() {
    let conn = setup();
    run(&conn, &["rm", "--id", " f3 "]).unwrap();
    assert!(get_entry(&conn, "f3").unwrap().is_none());
    assert_eq!(load_entries(&conn).unwrap().len(), 3);
}

#[test]
fn list_sorts_by_date_and_searches() {
    let conn = setup();
    let m = finance_matches(&["list"]);
    let rows = finance::query_rows(&conn, m.subcommand_matches("list").unwrap()).unwrap();
    let ids: Vec<&str> = rows.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, ["f4", "f3", "f2", "f1"]);

    let m = finance_matches(&["list", "--search", "SUB"]);
    let rows = finance::query_rows(&conn, m.subcommand_matches("list").unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "f3");

    let m = finance_matches(&["list", "--search", "139"]);
    let rows = finance::query_rows(&conn, m.subcommand_matches("list").unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "f4");

    let m = finance_matches(&["list", "--type", "revenue", "--limit", "1"]);
    let rows = finance::query_rows(&conn, m.subcommand_matches("list").unwrap()).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "f3");
}
