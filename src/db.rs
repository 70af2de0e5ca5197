// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::Connection;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Flowdesk", "flowdesk"));

/// Set to point the CLI at a specific database file.
pub const DB_ENV: &str = "FLOWDESK_DB";

pub fn db_path() -> Result<PathBuf> {
    if let Some(p) = std::env::var_os(DB_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(p));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("flowdesk.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    open_at(&db_path()?)
}

pub fn open_at(path: &Path) -> Result<Connection> {
    debug!(path = %path.display(), "opening database");
    let mut conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

/// An in-memory store seeded with the demo workspace. Nothing written to it
/// outlives the process.
pub fn open_demo() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("Open in-memory DB")?;
    init_schema(&mut conn)?;
    crate::demo::seed(&mut conn)?;
    debug!("using in-memory demo database");
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS finance_entries(
        id TEXT PRIMARY KEY,
        type TEXT NOT NULL CHECK(type IN ('revenue','expense')),
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        category TEXT NOT NULL,
        notes TEXT
    );
    CREATE INDEX IF NOT EXISTS idx_finance_entries_date ON finance_entries(date);

    CREATE TABLE IF NOT EXISTS tasks(
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        assignee TEXT NOT NULL,
        status TEXT NOT NULL CHECK(status IN ('todo','in_progress','review','done')),
        priority TEXT NOT NULL CHECK(priority IN ('low','medium','high')),
        due_date TEXT,
        created_at TEXT NOT NULL,
        tags TEXT NOT NULL DEFAULT '[]' -- JSON array
    );
    CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at);

    CREATE TABLE IF NOT EXISTS users(
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        role TEXT NOT NULL,
        status TEXT NOT NULL,
        department TEXT,
        last_login TEXT
    );
    "#,
    )?;
    Ok(())
}
