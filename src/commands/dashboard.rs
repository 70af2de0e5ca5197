// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{
    bucket_by_period, current_month_revenue, derive_kpis, task_distribution, PeriodBucket,
    TaskDistribution, CHART_WINDOW,
};
use crate::config::{baseline_kpis, company, currency_symbol};
use crate::models::{Company, FinanceEntry, FinanceType, KpiCard, TaskStatus};
use crate::store::Snapshot;
use crate::utils::{fmt_currency, json_flags, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

const RECENT_ENTRIES: usize = 4;

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub as_of: NaiveDate,
    pub kpis: Vec<KpiCard>,
    pub chart: Vec<PeriodBucket>,
    pub distribution: TaskDistribution,
    /// Most recently recorded first.
    pub recent: Vec<FinanceEntry>,
}

pub fn build(snapshot: &Snapshot, as_of: NaiveDate, currency: &str) -> DashboardView {
    let distribution = task_distribution(&snapshot.tasks);
    let month_revenue = current_month_revenue(&snapshot.entries, as_of);
    DashboardView {
        as_of,
        kpis: derive_kpis(&baseline_kpis(), distribution.total, month_revenue, currency),
        chart: bucket_by_period(&snapshot.entries, &CHART_WINDOW),
        distribution,
        recent: snapshot
            .entries
            .iter()
            .rev()
            .take(RECENT_ENTRIES)
            .cloned()
            .collect(),
    }
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let as_of = match sub.get_one::<String>("as_of") {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let snapshot = Snapshot::load_or_fallback(conn)?;
    let symbol = currency_symbol(conn)?;
    let view = build(&snapshot, as_of, &symbol);
    if maybe_print_json(json_flag, jsonl_flag, &view)? {
        return Ok(());
    }
    print_view(&company(conn)?, &view, &symbol);
    Ok(())
}

fn print_view(company: &Company, view: &DashboardView, symbol: &str) {
    println!("{} ({}, {}) as of {}", company.name, company.industry, company.size, view.as_of);

    let kpis = view
        .kpis
        .iter()
        .map(|k| {
            let sign = if k.trend.is_sign_negative() { "" } else { "+" };
            vec![k.label.clone(), k.value.clone(), format!("{}{}%", sign, k.trend)]
        })
        .collect();
    println!("{}", pretty_table(&["Metric", "Value", "Trend"], kpis));

    let chart = view
        .chart
        .iter()
        .map(|b| {
            vec![
                b.period_label.clone(),
                fmt_currency(&b.revenue_total, symbol),
                fmt_currency(&b.expense_total, symbol),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Month", "Revenue", "Expenses"], chart));

    let dist = TaskStatus::ALL
        .iter()
        .map(|s| vec![s.label().to_string(), format!("{}%", view.distribution.percent(*s))])
        .collect();
    println!("{}", pretty_table(&["Status", "Share"], dist));

    let recent = view
        .recent
        .iter()
        .map(|e| {
            let sign = match e.r#type {
                FinanceType::Revenue => "+",
                FinanceType::Expense => "-",
            };
            vec![
                e.date.to_string(),
                e.category.clone(),
                format!("{}{}", sign, fmt_currency(&e.amount, symbol)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Category", "Amount"], recent));
}
