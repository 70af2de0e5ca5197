// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::currency_symbol;
use crate::models::{FinanceEntry, FinanceType};
use crate::store::{delete_entry, get_entry, load_entries, upsert_entry};
use crate::utils::{fmt_currency, json_flags, maybe_print_json, new_id, pretty_table};
use crate::validate;
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use tracing::info;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let r#type: FinanceType = sub
        .get_one::<String>("type")
        .context("type missing")?
        .parse()?;
    let amount = sub.get_one::<String>("amount").context("amount missing")?;
    let category = sub
        .get_one::<String>("category")
        .context("category missing")?;
    let today = chrono::Local::now().date_naive().to_string();
    let date = sub.get_one::<String>("date").unwrap_or(&today);
    let notes = sub.get_one::<String>("notes").map(|s| s.as_str());

    let entry = validate::finance_entry(new_id(), r#type, amount, date, category, notes)?;
    upsert_entry(conn, &entry)?;
    info!(id = %entry.id, kind = %entry.r#type, "recorded finance entry");
    println!(
        "Recorded {} of {} on {} ({}) [{}]",
        entry.r#type,
        fmt_currency(&entry.amount, &currency_symbol(conn)?),
        entry.date,
        entry.category,
        entry.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let mut entry =
        get_entry(conn, id)?.ok_or_else(|| anyhow!("Finance entry '{}' not found", id))?;

    if let Some(a) = sub.get_one::<String>("amount") {
        entry.amount = validate::amount(a)?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        entry.date = validate::date(d)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        entry.category = validate::required("Category", c)?;
    }
    if let Some(n) = sub.get_one::<String>("notes") {
        entry.notes = validate::optional_text(Some(n));
    }

    upsert_entry(conn, &entry)?;
    println!("Updated finance entry {}", entry.id);
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    delete_entry(conn, id)?;
    println!("Removed finance entry {}", id);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let symbol = currency_symbol(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|e| {
                vec![
                    e.date.to_string(),
                    e.r#type.to_string(),
                    e.category.clone(),
                    fmt_currency(&e.amount, &symbol),
                    e.notes.clone().unwrap_or_default(),
                    e.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Notes", "Id"], rows)
        );
    }
    Ok(())
}

/// Entries matching the list filters, latest date first.
///
/// `--search` is a case-insensitive match against the category, or a plain
/// substring match against the amount as written.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<FinanceEntry>> {
    let search = sub
        .get_one::<String>("search")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let kind = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<FinanceType>())
        .transpose()?;

    let mut data: Vec<FinanceEntry> = load_entries(conn)?
        .into_iter()
        .filter(|e| kind.is_none_or(|k| e.r#type == k))
        .filter(|e| match &search {
            Some(q) => {
                e.category.to_lowercase().contains(q.as_str())
                    || e.amount.to_string().contains(q.as_str())
            }
            None => true,
        })
        .collect();
    data.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}
