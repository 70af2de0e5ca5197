// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger aggregation and KPI derivation.
//!
//! Every function here is pure: it reads the collections it is handed, never
//! mutates them, and recomputes its result from scratch on each call. Callers
//! own the collections and pass the current snapshot in.

use crate::models::{FinanceEntry, FinanceType, KpiCard, KpiKey, Task, TaskStatus};
use crate::utils::fmt_currency;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The chart window: the first seven calendar months.
pub const CHART_WINDOW: [&str; 7] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodBucket {
    pub period_label: String,
    pub revenue_total: Decimal,
    pub expense_total: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_revenue: Decimal,
    pub total_expenses: Decimal,
    pub net_profit: Decimal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskDistribution {
    pub todo: u32,
    pub in_progress: u32,
    pub review: u32,
    pub done: u32,
    /// Number of tasks the percentages were taken over.
    pub total: usize,
}

impl TaskDistribution {
    pub fn percent(&self, status: TaskStatus) -> u32 {
        match status {
            TaskStatus::Todo => self.todo,
            TaskStatus::InProgress => self.in_progress,
            TaskStatus::Review => self.review,
            TaskStatus::Done => self.done,
        }
    }
}

pub fn month_label(date: NaiveDate) -> &'static str {
    MONTH_LABELS[date.month0() as usize]
}

/// Sum entries into one bucket per label, in label order.
///
/// Buckets are keyed by month name only, so entries from different years that
/// share a month name land in the same bucket. Entries whose month is not one
/// of `labels` are left out of the chart.
pub fn bucket_by_period(entries: &[FinanceEntry], labels: &[&str]) -> Vec<PeriodBucket> {
    let mut buckets: Vec<PeriodBucket> = labels
        .iter()
        .map(|l| PeriodBucket {
            period_label: (*l).to_string(),
            revenue_total: Decimal::ZERO,
            expense_total: Decimal::ZERO,
        })
        .collect();

    for entry in entries {
        let month = month_label(entry.date);
        let Some(idx) = labels.iter().position(|l| *l == month) else {
            continue;
        };
        let bucket = &mut buckets[idx];
        match entry.r#type {
            FinanceType::Revenue => bucket.revenue_total += entry.amount,
            FinanceType::Expense => bucket.expense_total += entry.amount,
        }
    }
    buckets
}

/// Totals over the whole collection, regardless of date.
pub fn summarize(entries: &[FinanceEntry]) -> Summary {
    let mut total_revenue = Decimal::ZERO;
    let mut total_expenses = Decimal::ZERO;
    for entry in entries {
        match entry.r#type {
            FinanceType::Revenue => total_revenue += entry.amount,
            FinanceType::Expense => total_expenses += entry.amount,
        }
    }
    Summary {
        total_revenue,
        total_expenses,
        net_profit: total_revenue - total_expenses,
    }
}

/// Revenue booked in the same calendar month *and* year as `reference`.
///
/// Unlike [`bucket_by_period`] this never merges years.
pub fn current_month_revenue(entries: &[FinanceEntry], reference: NaiveDate) -> Decimal {
    entries
        .iter()
        .filter(|e| {
            e.r#type == FinanceType::Revenue
                && e.date.month() == reference.month()
                && e.date.year() == reference.year()
        })
        .map(|e| e.amount)
        .sum()
}

/// Share of tasks in each status, each rounded half-up on its own. The four
/// values are not forced to add up to 100.
pub fn task_distribution(tasks: &[Task]) -> TaskDistribution {
    let total = tasks.len();
    if total == 0 {
        return TaskDistribution::default();
    }
    let count = |s: TaskStatus| tasks.iter().filter(|t| t.status == s).count();
    TaskDistribution {
        todo: percent(count(TaskStatus::Todo), total),
        in_progress: percent(count(TaskStatus::InProgress), total),
        review: percent(count(TaskStatus::Review), total),
        done: percent(count(TaskStatus::Done), total),
        total,
    }
}

fn percent(count: usize, total: usize) -> u32 {
    // round(100 * count / total) in integers, halves going up
    ((200 * count + total) / (2 * total)) as u32
}

/// Fill the computed cards of a baseline KPI list.
///
/// `ActiveTasks` always takes `active_tasks`. `MonthlyRevenue` only takes the
/// computed figure when it is positive; otherwise the baseline value stays so
/// the card never reads as zero before the month has any revenue.
pub fn derive_kpis(
    base: &[KpiCard],
    active_tasks: usize,
    month_revenue: Decimal,
    currency_symbol: &str,
) -> Vec<KpiCard> {
    base.iter()
        .map(|card| match card.key {
            KpiKey::ActiveTasks => KpiCard {
                value: active_tasks.to_string(),
                ..card.clone()
            },
            KpiKey::MonthlyRevenue if month_revenue > Decimal::ZERO => KpiCard {
                value: fmt_currency(&month_revenue, currency_symbol),
                ..card.clone()
            },
            _ => card.clone(),
        })
        .collect()
}
