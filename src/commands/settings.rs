// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{company, currency_symbol, set_company, set_currency_symbol};
use crate::utils::{json_flags, maybe_print_json, pretty_table};
use crate::validate;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => {
            let (json_flag, jsonl_flag) = json_flags(sub);
            let c = company(conn)?;
            let symbol = currency_symbol(conn)?;
            let v = json!({ "company": c, "currency_symbol": symbol });
            if !maybe_print_json(json_flag, jsonl_flag, &v)? {
                let rows = vec![
                    vec!["Company".into(), c.name],
                    vec!["Industry".into(), c.industry],
                    vec!["Size".into(), c.size],
                    vec!["Currency symbol".into(), symbol],
                ];
                println!("{}", pretty_table(&["Setting", "Value"], rows));
            }
        }
        Some(("company", sub)) => {
            let mut c = company(conn)?;
            if let Some(n) = sub.get_one::<String>("name") {
                c.name = validate::required("Company name", n)?;
            }
            if let Some(i) = sub.get_one::<String>("industry") {
                c.industry = validate::required("Industry", i)?;
            }
            if let Some(s) = sub.get_one::<String>("size") {
                c.size = validate::required("Company size", s)?;
            }
            set_company(conn, &c)?;
            println!("Company set to {} ({}, {})", c.name, c.industry, c.size);
        }
        Some(("currency", sub)) => {
            let symbol = sub.get_one::<String>("symbol").context("symbol missing")?;
            let symbol = validate::required("Currency symbol", symbol)?;
            set_currency_symbol(conn, &symbol)?;
            println!("Currency symbol set to {}", symbol);
        }
        _ => {}
    }
    Ok(())
}
