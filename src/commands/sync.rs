// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FinanceEntry, Task, User};
use crate::store::{apply_change, Change, Snapshot};
use anyhow::{anyhow, bail, Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct RawEvent {
    table: String,
    #[serde(alias = "eventType")]
    event: String,
    #[serde(default)]
    new: Option<Value>,
    #[serde(default)]
    old: Option<Value>,
}

/// A change event resolved to the collection it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncChange {
    Entry(Change<FinanceEntry>),
    Task(Change<Task>),
    User(Change<User>),
}

fn id_of(v: &Value) -> Result<String> {
    match v.get("id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => bail!("change record has no id"),
    }
}

fn change_for<T: DeserializeOwned>(ev: &RawEvent) -> Result<Change<T>> {
    let record = |v: &Option<Value>| -> Result<T> {
        let mut v = v
            .clone()
            .ok_or_else(|| anyhow!("{} event without a new record", ev.event))?;
        let id = id_of(&v)?;
        v["id"] = Value::String(id);
        Ok(serde_json::from_value(v)?)
    };
    match ev.event.to_uppercase().as_str() {
        "INSERT" => Ok(Change::Insert(record(&ev.new)?)),
        "UPDATE" => Ok(Change::Update(record(&ev.new)?)),
        "DELETE" => {
            let old = ev
                .old
                .as_ref()
                .context("DELETE event without an old record")?;
            Ok(Change::Delete(id_of(old)?))
        }
        other => bail!("Unknown event '{}'", other),
    }
}

/// Parse one line of the feed, e.g.
/// `{"table":"tasks","event":"DELETE","old":{"id":"3"}}`.
pub fn parse_event(line: &str) -> Result<SyncChange> {
    let ev: RawEvent = serde_json::from_str(line)?;
    match ev.table.as_str() {
        "finance_entries" | "finance" => Ok(SyncChange::Entry(change_for(&ev)?)),
        "tasks" => Ok(SyncChange::Task(change_for(&ev)?)),
        "users" | "profiles" => Ok(SyncChange::User(change_for(&ev)?)),
        other => bail!("Unknown table '{}'", other),
    }
}

/// Merge one change into the snapshot. Finance records with a non-positive
/// amount are refused, since the ledger only ever holds positive amounts.
pub fn apply(snapshot: &mut Snapshot, change: SyncChange) -> bool {
    match change {
        SyncChange::Entry(Change::Insert(e) | Change::Update(e)) if e.amount <= Decimal::ZERO => {
            warn!(id = %e.id, amount = %e.amount, "skipping finance entry with non-positive amount");
            false
        }
        SyncChange::Entry(c) => {
            apply_change(&mut snapshot.entries, c);
            true
        }
        SyncChange::Task(c) => {
            apply_change(&mut snapshot.tasks, c);
            true
        }
        SyncChange::User(c) => {
            apply_change(&mut snapshot.users, c);
            true
        }
    }
}

pub fn handle(conn: &mut Connection, sub: &clap::ArgMatches) -> Result<()> {
    let path = sub.get_one::<String>("from").context("from missing")?.trim();
    let feed = std::fs::read_to_string(path).with_context(|| format!("Read {}", path))?;

    let mut snapshot = Snapshot::load(conn)?;
    let (mut applied, mut skipped) = (0usize, 0usize);
    for (n, line) in feed.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let change = parse_event(line).with_context(|| format!("{}:{}", path, n + 1))?;
        if apply(&mut snapshot, change) {
            applied += 1;
        } else {
            skipped += 1;
        }
    }
    snapshot.save(conn)?;
    info!(applied, skipped, "sync complete");
    println!("Applied {} change(s) from {} ({} skipped)", applied, path, skipped);
    Ok(())
}
