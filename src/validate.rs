// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Checks applied where records enter the system. Analytics code downstream
//! assumes every record it sees has passed through here.

use crate::error::ValidationError;
use crate::models::{FinanceEntry, FinanceType};
use crate::utils::parse_date;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

pub const UNASSIGNED: &str = "Unassigned";

pub fn amount(raw: &str) -> Result<Decimal, ValidationError> {
    let d = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if d <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount(d));
    }
    Ok(d)
}

pub fn date(raw: &str) -> Result<NaiveDate, ValidationError> {
    parse_date(raw).map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

pub fn required(field: &'static str, raw: &str) -> Result<String, ValidationError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(v.to_string())
}

/// Trimmed text, with blank collapsing to `None`.
pub fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A due date may be omitted, but a given one may not precede `today`.
pub fn due_date(raw: Option<&str>, today: NaiveDate) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(raw) = optional_text(raw) else {
        return Ok(None);
    };
    let d = date(&raw)?;
    if d < today {
        return Err(ValidationError::DueDateInPast);
    }
    Ok(Some(d))
}

pub fn assignee(raw: Option<&str>) -> String {
    optional_text(raw).unwrap_or_else(|| UNASSIGNED.to_string())
}

/// Comma-separated labels, trimmed, blanks and repeats dropped, first
/// occurrence order kept.
pub fn tags(raw: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|seen| seen == t) {
            out.push(t.to_string());
        }
    }
    out
}

pub fn email(raw: &str) -> Result<String, ValidationError> {
    let v = required("Email", raw)?;
    if !EMAIL.is_match(&v) {
        return Err(ValidationError::InvalidEmail(v));
    }
    Ok(v)
}

pub fn finance_entry(
    id: String,
    r#type: FinanceType,
    amount_raw: &str,
    date_raw: &str,
    category_raw: &str,
    notes: Option<&str>,
) -> Result<FinanceEntry, ValidationError> {
    Ok(FinanceEntry {
        id,
        r#type,
        amount: amount(amount_raw)?,
        date: date(date_raw)?,
        category: required("Category", category_raw)?,
        notes: optional_text(notes),
    })
}
