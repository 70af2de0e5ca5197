// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{FinanceEntry, Task, User};
use crate::utils::{parse_date, parse_decimal};
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};

/// Records addressed by a string id.
pub trait Keyed {
    /// Whether the canonical ordering puts the newest record first.
    const NEWEST_FIRST: bool;

    fn key(&self) -> &str;
}

impl Keyed for FinanceEntry {
    const NEWEST_FIRST: bool = false;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Task {
    const NEWEST_FIRST: bool = true;

    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for User {
    const NEWEST_FIRST: bool = false;

    fn key(&self) -> &str {
        &self.id
    }
}

/// One insert/update/delete notification for a record.
#[derive(Debug, Clone, PartialEq)]
pub enum Change<T> {
    Insert(T),
    Update(T),
    Delete(String),
}

/// Merge a change into an ordered collection. Inserts land at the "newest" end
/// and displace any record already holding the same id; updates replace in
/// place; updates and deletes for unknown ids are ignored.
pub fn apply_change<T: Keyed>(items: &mut Vec<T>, change: Change<T>) {
    match change {
        Change::Insert(item) => {
            items.retain(|i| i.key() != item.key());
            if T::NEWEST_FIRST {
                items.insert(0, item);
            } else {
                items.push(item);
            }
        }
        Change::Update(item) => {
            if let Some(slot) = items.iter_mut().find(|i| i.key() == item.key()) {
                *slot = item;
            }
        }
        Change::Delete(id) => items.retain(|i| i.key() != id),
    }
}

// ---- finance entries ----

const ENTRY_COLS: &str = "id, type, amount, date, category, notes";

type EntryRow = (String, String, String, String, String, Option<String>);

fn entry_row(r: &Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?, r.get(4)?, r.get(5)?))
}

fn entry_from_row(row: EntryRow) -> Result<FinanceEntry> {
    let (id, ty, amount, date, category, notes) = row;
    Ok(FinanceEntry {
        r#type: ty.parse()?,
        amount: parse_decimal(&amount).with_context(|| format!("Finance entry '{}'", id))?,
        date: parse_date(&date).with_context(|| format!("Finance entry '{}'", id))?,
        id,
        category,
        notes,
    })
}

/// All entries in the order they were first recorded.
pub fn load_entries(conn: &Connection) -> Result<Vec<FinanceEntry>> {
    let sql = format!("SELECT {} FROM finance_entries ORDER BY rowid", ENTRY_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], entry_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(entry_from_row(row?)?);
    }
    Ok(out)
}

pub fn get_entry(conn: &Connection, id: &str) -> Result<Option<FinanceEntry>> {
    let sql = format!("SELECT {} FROM finance_entries WHERE id=?1", ENTRY_COLS);
    let raw = conn.query_row(&sql, params![id], entry_row).optional()?;
    raw.map(entry_from_row).transpose()
}

/// Insert, or fully replace the entry with the same id.
pub fn upsert_entry(conn: &Connection, e: &FinanceEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO finance_entries(id, type, amount, date, category, notes)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(id) DO UPDATE SET type=excluded.type, amount=excluded.amount,
             date=excluded.date, category=excluded.category, notes=excluded.notes",
        params![
            e.id,
            e.r#type.as_str(),
            e.amount.to_string(),
            e.date.to_string(),
            e.category,
            e.notes
        ],
    )?;
    debug!(id = %e.id, "upserted finance entry");
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM finance_entries WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Finance entry '{}' not found", id);
    }
    Ok(())
}

// ---- tasks ----

const TASK_COLS: &str =
    "id, title, description, assignee, status, priority, due_date, created_at, tags";

type TaskRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    String,
    String,
);

fn task_row(r: &Row<'_>) -> rusqlite::Result<TaskRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
        r.get(7)?,
        r.get(8)?,
    ))
}

fn task_from_row(row: TaskRow) -> Result<Task> {
    let (id, title, description, assignee, status, priority, due, created, tags) = row;
    let due_date = due
        .filter(|d| !d.is_empty())
        .map(|d| parse_date(&d))
        .transpose()
        .with_context(|| format!("Task '{}'", id))?;
    let created_at = DateTime::parse_from_rfc3339(&created)
        .with_context(|| format!("Invalid created_at '{}' for task '{}'", created, id))?
        .with_timezone(&Utc);
    let tags: Vec<String> = serde_json::from_str(&tags)
        .with_context(|| format!("Invalid tags for task '{}'", id))?;
    Ok(Task {
        status: status.parse()?,
        priority: priority.parse()?,
        id,
        title,
        description,
        assignee,
        due_date,
        created_at,
        tags,
    })
}

/// All tasks, newest first.
pub fn load_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let sql = format!(
        "SELECT {} FROM tasks ORDER BY created_at DESC, rowid DESC",
        TASK_COLS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], task_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(task_from_row(row?)?);
    }
    Ok(out)
}

pub fn get_task(conn: &Connection, id: &str) -> Result<Option<Task>> {
    let sql = format!("SELECT {} FROM tasks WHERE id=?1", TASK_COLS);
    let raw = conn.query_row(&sql, params![id], task_row).optional()?;
    raw.map(task_from_row).transpose()
}

pub fn upsert_task(conn: &Connection, t: &Task) -> Result<()> {
    conn.execute(
        "INSERT INTO tasks(id, title, description, assignee, status, priority, due_date, created_at, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT(id) DO UPDATE SET title=excluded.title, description=excluded.description,
             assignee=excluded.assignee, status=excluded.status, priority=excluded.priority,
             due_date=excluded.due_date, created_at=excluded.created_at, tags=excluded.tags",
        params![
            t.id,
            t.title,
            t.description,
            t.assignee,
            t.status.as_str(),
            t.priority.as_str(),
            t.due_date.map(|d| d.to_string()),
            t.created_at.to_rfc3339(),
            serde_json::to_string(&t.tags)?
        ],
    )?;
    debug!(id = %t.id, "upserted task");
    Ok(())
}

pub fn delete_task(conn: &Connection, id: &str) -> Result<()> {
    let n = conn.execute("DELETE FROM tasks WHERE id=?1", params![id])?;
    if n == 0 {
        bail!("Task '{}' not found", id);
    }
    Ok(())
}

// ---- users ----

const USER_COLS: &str = "id, name, email, role, status, department, last_login";

type UserRow = (
    String,
    String,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
);

fn user_row(r: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
        r.get(6)?,
    ))
}

fn user_from_row(row: UserRow) -> Result<User> {
    let (id, name, email, role, status, department, last_login) = row;
    Ok(User {
        role: role.parse()?,
        status: status.parse()?,
        id,
        name,
        email,
        department,
        last_login,
    })
}

pub fn load_users(conn: &Connection) -> Result<Vec<User>> {
    let sql = format!("SELECT {} FROM users ORDER BY rowid", USER_COLS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], user_row)?;
    let mut out = Vec::new();
    for row in rows {
        out.push(user_from_row(row?)?);
    }
    Ok(out)
}

pub fn get_user(conn: &Connection, id: &str) -> Result<Option<User>> {
    let sql = format!("SELECT {} FROM users WHERE id=?1", USER_COLS);
    let raw = conn.query_row(&sql, params![id], user_row).optional()?;
    raw.map(user_from_row).transpose()
}

pub fn upsert_user(conn: &Connection, u: &User) -> Result<()> {
    conn.execute(
        "INSERT INTO users(id, name, email, role, status, department, last_login)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(id) DO UPDATE SET name=excluded.name, email=excluded.email,
             role=excluded.role, status=excluded.status, department=excluded.department,
             last_login=excluded.last_login",
        params![
            u.id,
            u.name,
            u.email,
            u.role.as_str(),
            u.status.as_str(),
            u.department,
            u.last_login
        ],
    )?;
    debug!(id = %u.id, "upserted user");
    Ok(())
}

// ---- snapshot ----

/// The in-memory collections every derived view is computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub entries: Vec<FinanceEntry>,
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn load(conn: &Connection) -> Result<Self> {
        Ok(Snapshot {
            entries: load_entries(conn)?,
            tasks: load_tasks(conn)?,
            users: load_users(conn)?,
        })
    }

    /// Like [`Snapshot::load`], but a collection that cannot be read is
    /// replaced by its demo data instead of failing the whole view.
    pub fn load_or_fallback(conn: &Connection) -> Result<Self> {
        let entries = match load_entries(conn) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "finance entries unavailable, using demo data");
                crate::demo::entries()?
            }
        };
        let tasks = match load_tasks(conn) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "tasks unavailable, using demo data");
                crate::demo::tasks()?
            }
        };
        let users = match load_users(conn) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "users unavailable, using demo data");
                crate::demo::users()?
            }
        };
        Ok(Snapshot {
            entries,
            tasks,
            users,
        })
    }

    /// Replace every stored collection with this snapshot, atomically.
    pub fn save(&self, conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM finance_entries", [])?;
        for e in &self.entries {
            upsert_entry(&tx, e)?;
        }
        tx.execute("DELETE FROM tasks", [])?;
        // insert oldest first so rowid order agrees with created_at order
        for t in self.tasks.iter().rev() {
            upsert_task(&tx, t)?;
        }
        tx.execute("DELETE FROM users", [])?;
        for u in &self.users {
            upsert_user(&tx, u)?;
        }
        tx.commit()?;
        Ok(())
    }
}
