// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Rejections raised where records are created or edited. Nothing past this
/// boundary re-validates amounts, dates or identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Due date cannot be in the past")]
    DueDateInPast,
    #[error("Please enter a valid email address (got '{0}')")]
    InvalidEmail(String),
    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
}
