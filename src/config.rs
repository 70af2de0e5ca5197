// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Company, KpiCard, KpiKey, KpiKind};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

const COMPANY_NAME: &str = "company_name";
const COMPANY_INDUSTRY: &str = "company_industry";
const COMPANY_SIZE: &str = "company_size";
const CURRENCY_SYMBOL: &str = "currency_symbol";

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn company(conn: &Connection) -> Result<Company> {
    Ok(Company {
        name: get_setting(conn, COMPANY_NAME)?.unwrap_or_else(|| "Impulz Innovations".into()),
        industry: get_setting(conn, COMPANY_INDUSTRY)?.unwrap_or_else(|| "SaaS".into()),
        size: get_setting(conn, COMPANY_SIZE)?.unwrap_or_else(|| "1-10".into()),
    })
}

pub fn set_company(conn: &Connection, c: &Company) -> Result<()> {
    set_setting(conn, COMPANY_NAME, &c.name)?;
    set_setting(conn, COMPANY_INDUSTRY, &c.industry)?;
    set_setting(conn, COMPANY_SIZE, &c.size)?;
    Ok(())
}

pub fn currency_symbol(conn: &Connection) -> Result<String> {
    Ok(get_setting(conn, CURRENCY_SYMBOL)?.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.into()))
}

pub fn set_currency_symbol(conn: &Connection, symbol: &str) -> Result<()> {
    set_setting(conn, CURRENCY_SYMBOL, symbol)
}

/// Dashboard cards before live figures are filled in. Values here are the
/// placeholders shown until something better is computed.
pub fn baseline_kpis() -> Vec<KpiCard> {
    let card = |key, label: &str, value: &str, trend: Decimal, kind| KpiCard {
        key,
        label: label.to_string(),
        value: value.to_string(),
        trend,
        kind,
    };
    vec![
        card(
            KpiKey::MonthlyRevenue,
            "Monthly Revenue",
            "$45,231.00",
            Decimal::new(125, 1),
            KpiKind::Currency,
        ),
        card(
            KpiKey::ActiveTasks,
            "Active Tasks",
            "124",
            Decimal::new(-42, 1),
            KpiKind::Number,
        ),
        card(
            KpiKey::OperationalEfficiency,
            "Operational Efficiency",
            "92%",
            Decimal::new(21, 1),
            KpiKind::Percentage,
        ),
        card(
            KpiKey::CustomerGrowth,
            "Customer Growth",
            "18%",
            Decimal::new(54, 1),
            KpiKind::Percentage,
        ),
    ]
}
