// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use flowdesk::error::ValidationError;
use flowdesk::models::{FinanceType, TaskPriority, TaskStatus, UserRole};
use flowdesk::utils::fmt_currency;
use flowdesk::validate;
use rust_decimal::Decimal;

#[test]
fn currency_formatting() {
    assert_eq!(fmt_currency(&Decimal::new(45231, 0), "$"), "$45,231.00");
    assert_eq!(fmt_currency(&Decimal::new(1234567891, 3), "$"), "$1,234,567.89");
    assert_eq!(fmt_currency(&Decimal::new(999, 0), "$"), "$999.00");
    assert_eq!(fmt_currency(&Decimal::new(-1234, 0), "$"), "-$1,234.00");
    assert_eq!(fmt_currency(&Decimal::ZERO, "€"), "€0.00");
    assert_eq!(fmt_currency(&Decimal::new(100000, 0), "$"), "$100,000.00");
}

#[test]
fn status_tokens_accept_labels_and_snake_case() {
    assert_eq!("In Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
    assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
    assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    assert_eq!("High".parse::<TaskPriority>().unwrap(), TaskPriority::High);
    assert_eq!("manager".parse::<UserRole>().unwrap(), UserRole::Manager);
    assert_eq!("Expense".parse::<FinanceType>().unwrap(), FinanceType::Expense);
    assert!(matches!(
        "later".parse::<TaskStatus>(),
        Err(ValidationError::UnknownVariant { .. })
    ));
}

#[test]
fn entry_boundary_checks() {
    assert_eq!(
        validate::amount("abc"),
        Err(ValidationError::InvalidAmount("abc".into()))
    );
    assert_eq!(
        validate::amount("0.00"),
        Err(ValidationError::NonPositiveAmount(Decimal::new(0, 2)))
    );
    assert_eq!(validate::amount(" 12.5 ").unwrap(), Decimal::new(125, 1));

    assert_eq!(
        validate::date("15/01/2023"),
        Err(ValidationError::InvalidDate("15/01/2023".into()))
    );
    assert_eq!(
        validate::date(" 2023-01-15 "),
        Ok(chrono::NaiveDate::from_ymd_opt(2023, 1, 15).unwrap())
    );

    let today = chrono::NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    assert_eq!(validate::due_date(None, today), Ok(None));
    assert_eq!(validate::due_date(Some("  "), today), Ok(None));
    assert_eq!(
        validate::due_date(Some("2024-05-09"), today),
        Err(ValidationError::DueDateInPast)
    );
    assert_eq!(validate::due_date(Some("2024-05-10"), today), Ok(Some(today)));

    assert_eq!(validate::tags(" a, b ,a,, c "), vec!["a", "b", "c"]);
    assert_eq!(validate::assignee(Some("  ")), "Unassigned");

    let e = validate::finance_entry(
        "x".into(),
        FinanceType::Revenue,
        "10",
        "2023-01-01",
        "  ",
        None,
    );
    assert_eq!(e, Err(ValidationError::Required("Category")));
}
