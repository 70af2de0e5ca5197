// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{bucket_by_period, summarize, CHART_WINDOW};
use crate::config::currency_symbol;
use crate::store::Snapshot;
use crate::utils::{fmt_currency, json_flags, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("chart", sub)) => chart(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = Snapshot::load_or_fallback(conn)?;
    let s = summarize(&snapshot.entries);
    if !maybe_print_json(json_flag, jsonl_flag, &s)? {
        let symbol = currency_symbol(conn)?;
        let data = vec![vec![
            fmt_currency(&s.total_revenue, &symbol),
            fmt_currency(&s.total_expenses, &symbol),
            fmt_currency(&s.net_profit, &symbol),
        ]];
        println!(
            "{}",
            pretty_table(&["Total revenue", "Total expenses", "Net profit"], data)
        );
    }
    Ok(())
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let snapshot = Snapshot::load_or_fallback(conn)?;
    let buckets = bucket_by_period(&snapshot.entries, &CHART_WINDOW);
    if !maybe_print_json(json_flag, jsonl_flag, &buckets)? {
        let symbol = currency_symbol(conn)?;
        let data = buckets
            .into_iter()
            .map(|b| {
                vec![
                    b.period_label,
                    fmt_currency(&b.revenue_total, &symbol),
                    fmt_currency(&b.expense_total, &symbol),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Month", "Revenue", "Expenses"], data));
    }
    Ok(())
}
