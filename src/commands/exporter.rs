// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::load_entries;
use anyhow::{bail, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("finance", sub)) => export_finance(conn, sub),
        _ => Ok(()),
    }
}

fn export_finance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.to_lowercase())
        .unwrap_or_else(|| "csv".into());
    let out = sub.get_one::<String>("out").context("out missing")?;

    let mut entries = load_entries(conn)?;
    entries.sort_by(|a, b| a.date.cmp(&b.date));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)
                .with_context(|| format!("Create CSV {}", out))?;
            wtr.write_record(["id", "date", "type", "category", "amount", "notes"])?;
            for e in &entries {
                wtr.write_record([
                    e.id.clone(),
                    e.date.to_string(),
                    e.r#type.to_string(),
                    e.category.clone(),
                    e.amount.to_string(),
                    e.notes.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&entries)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    println!("Exported {} finance entries to {}", entries.len(), out);
    Ok(())
}
