// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{User, UserRole, UserStatus};
use crate::store::{get_user, load_users, upsert_user};
use crate::utils::{json_flags, maybe_print_json, new_id, pretty_table};
use crate::validate;
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("status", sub)) => set_status(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = validate::required("Name", sub.get_one::<String>("name").context("name missing")?)?;
    let email = validate::email(sub.get_one::<String>("email").context("email missing")?)?;
    let role: UserRole = sub
        .get_one::<String>("role")
        .map(|s| s.as_str())
        .unwrap_or("Staff")
        .parse()?;
    let status: UserStatus = sub
        .get_one::<String>("status")
        .map(|s| s.as_str())
        .unwrap_or("Active")
        .parse()?;

    let user = User {
        id: new_id(),
        name,
        email,
        role,
        status,
        department: validate::optional_text(sub.get_one::<String>("department").map(|s| s.as_str())),
        last_login: Some("-".into()),
    };
    upsert_user(conn, &user)?;
    println!("Added {} ({}) as {} [{}]", user.name, user.email, user.role, user.id);
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let mut user = get_user(conn, id)?.ok_or_else(|| anyhow!("User '{}' not found", id))?;

    if let Some(n) = sub.get_one::<String>("name") {
        user.name = validate::required("Name", n)?;
    }
    if let Some(e) = sub.get_one::<String>("email") {
        user.email = validate::email(e)?;
    }
    if let Some(r) = sub.get_one::<String>("role") {
        user.role = r.parse()?;
    }
    if let Some(s) = sub.get_one::<String>("status") {
        user.status = s.parse()?;
    }
    if let Some(d) = sub.get_one::<String>("department") {
        user.department = validate::optional_text(Some(d));
    }

    upsert_user(conn, &user)?;
    println!("Updated {}", user.name);
    Ok(())
}

fn set_status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").context("id missing")?.trim();
    let status: UserStatus = sub
        .get_one::<String>("status")
        .context("status missing")?
        .parse()?;
    let mut user = get_user(conn, id)?.ok_or_else(|| anyhow!("User '{}' not found", id))?;
    user.status = status;
    upsert_user(conn, &user)?;
    println!("{} is now {}", user.name, status);
    Ok(())
}

/// Team members matching `--search` (name or email, case-insensitive) and
/// `--role`. A role of `all` disables the role filter.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<User>> {
    let search = sub
        .get_one::<String>("search")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());
    let role = match sub.get_one::<String>("role").map(|s| s.trim()) {
        None => None,
        Some(r) if r.eq_ignore_ascii_case("all") => None,
        Some(r) => Some(r.parse::<UserRole>()?),
    };

    Ok(load_users(conn)?
        .into_iter()
        .filter(|u| role.is_none_or(|r| u.role == r))
        .filter(|u| match &search {
            Some(q) => {
                u.name.to_lowercase().contains(q.as_str())
                    || u.email.to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .collect())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(sub);
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .into_iter()
            .map(|u| {
                vec![
                    u.name,
                    u.email,
                    u.role.to_string(),
                    u.status.to_string(),
                    u.department.unwrap_or_default(),
                    u.last_login.unwrap_or_else(|| "-".into()),
                    u.id,
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Name", "Email", "Role", "Status", "Department", "Last login", "Id"],
                rows,
            )
        );
    }
    Ok(())
}
