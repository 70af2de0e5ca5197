// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Task, TaskPriority, TaskStatus};
use crate::store::{delete_task, get_task, load_tasks, upsert_task};
use crate::utils::{json_flags, maybe_print_json, new_id, pretty_table};
use crate::validate;
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("status", sub)) => set_status(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn arg<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(|s| s.as_str())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let title = validate::required("Task title", arg(sub, "title").context("title missing")?)?;
    let status: TaskStatus = arg(sub, "status").unwrap_or("todo").parse()?;
    let priority: TaskPriority = arg(sub, "priority").unwrap_or("medium").parse()?;

    let task = Task {
        id: new_id(),
        title,
        description: validate::optional_text(arg(sub, "description")).unwrap_or_default(),
        assignee: validate::assignee(arg(sub, "assignee")),
        status,
        priority,
        due_date: validate::due_date(arg(sub, "due"), today)?,
        created_at: Utc::now(),
        tags: arg(sub, "tags").map(validate::tags).unwrap_or_default(),
    };
    upsert_task(conn, &task)?;
    info!(id = %task.id, "created task");
    println!("Created task '{}' [{}]", task.title, task.id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let id = arg(sub, "id").context("id missing")?.trim();
    let mut task = get_task(conn, id)?.ok_or_else(|| anyhow!("Task '{}' not found", id))?;

    if let Some(t) = arg(sub, "title") {
        task.title = validate::required("Task title", t)?;
    }
    if let Some(d) = arg(sub, "description") {
        task.description = d.trim().to_string();
    }
    if let Some(a) = arg(sub, "assignee") {
        task.assignee = validate::assignee(Some(a));
    }
    if let Some(s) = arg(sub, "status") {
        task.status = s.parse()?;
    }
    if let Some(p) = arg(sub, "priority") {
        task.priority = p.parse()?;
    }
    if let Some(d) = arg(sub, "due") {
        task.due_date = validate::due_date(Some(d), today)?;
    }
    if let Some(t) = arg(sub, "tags") {
        task.tags = validate::tags(t);
    }

    upsert_task(conn, &task)?;
    println!("Updated task '{}'", task.title);
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").context("id missing")?.trim();
    let status: TaskStatus = arg(sub, "status").context("status missing")?.parse()?;
    let mut task = get_task(conn, id)?.ok_or_else(|| anyhow!("Task '{}' not found", id))?;
    task.status = status;
    upsert_task(conn, &task)?;
    println!("Task '{}' is now {}", task.title, status);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = arg(sub, "id").context("id missing")?.trim();
    delete_task(conn, id)?;
    println!("Removed task {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.title.clone(),
                    t.assignee.clone(),
                    t.status.to_string(),
                    t.priority.to_string(),
                    t.due_date.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    t.tags.join(", "),
                    t.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Title", "Assignee", "Status", "Priority", "Due", "Tags", "Id"],
                rows,
            )
        );
    }
    Ok(())
}

/// Tasks matching `--search` (title or assignee, case-insensitive) and
/// `--status`, newest first.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Task>> {
    let search = arg(sub, "search")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let status = arg(sub, "status")
        .map(|s| s.parse::<TaskStatus>())
        .transpose()?;

    Ok(load_tasks(conn)?
        .into_iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| match &search {
            Some(q) => {
                t.title.to_lowercase().contains(q.as_str())
                    || t.assignee.to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .collect())
}
