// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Demo workspace used when no persistent store is configured.

use crate::models::{FinanceEntry, Task, User};
use crate::store::{load_entries, load_tasks, load_users, upsert_entry, upsert_task, upsert_user};
use crate::utils::{parse_date, parse_decimal};
use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

const USERS: &[(&str, &str, &str, &str, &str, &str, &str)] = &[
    ("1", "Alex Sterling", "founder@flowdesk.com", "Admin", "Active", "Executive", "2023-11-20 09:45"),
    ("2", "Sarah Chen", "sarah.c@flowdesk.com", "Manager", "Active", "Operations", "2023-11-20 10:12"),
    ("3", "Alex Miller", "alex.m@flowdesk.com", "Staff", "Active", "Customer Success", "2023-11-19 16:30"),
    ("4", "Marcus Aurelius", "marcus@flowdesk.com", "Staff", "Pending", "Marketing", "-"),
    ("5", "Elena Rodriguez", "elena@flowdesk.com", "Guest", "Inactive", "Consultancy", "2023-10-05 11:00"),
];

// id, type, amount, date, category
const ENTRIES: &[(&str, &str, &str, &str, &str)] = &[
    ("f1", "revenue", "4000", "2023-01-15", "Sales"),
    ("f2", "expense", "2400", "2023-01-20", "Payroll"),
    ("f3", "revenue", "3000", "2023-02-10", "Subscription"),
    ("f4", "expense", "1398", "2023-02-25", "Tools"),
    ("f5", "revenue", "2000", "2023-03-05", "Service"),
    ("f6", "expense", "9800", "2023-03-28", "Operations"),
    ("f7", "revenue", "2780", "2023-04-12", "Sales"),
    ("f8", "expense", "3908", "2023-04-22", "Marketing"),
    ("f9", "revenue", "1890", "2023-05-02", "Subscription"),
    ("f10", "expense", "4800", "2023-05-18", "Payroll"),
    ("f11", "revenue", "2390", "2023-06-14", "Sales"),
    ("f12", "expense", "3800", "2023-06-25", "Operations"),
    ("f13", "revenue", "3490", "2023-07-10", "Service"),
    ("f14", "expense", "4300", "2023-07-28", "Marketing"),
];

struct DemoTask {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    assignee: &'static str,
    status: &'static str,
    priority: &'static str,
    due: &'static str,
    created: &'static str,
}

const TASKS: &[DemoTask] = &[
    DemoTask {
        id: "1",
        title: "Q3 Financial Audit Preparation",
        description: "Gather all receipts and bank statements from July to September. Ensure reconciliation is complete before the external audit starts.",
        assignee: "Sarah Chen",
        status: "in_progress",
        priority: "high",
        due: "2023-11-15",
        created: "2023-10-01",
    },
    DemoTask {
        id: "2",
        title: "Update Onboarding Documentation",
        description: "The current onboarding slides are outdated. We need to include the new HR policy and the updated benefits package overview.",
        assignee: "Alex Miller",
        status: "todo",
        priority: "medium",
        due: "2023-11-20",
        created: "2023-10-05",
    },
    DemoTask {
        id: "3",
        title: "Fix Dashboard Loading Latency",
        description: "Users are reporting slow load times on the main dashboard. Investigation suggests some SQL queries are not indexed properly.",
        assignee: "Dev Team",
        status: "review",
        priority: "high",
        due: "2023-11-12",
        created: "2023-10-10",
    },
    DemoTask {
        id: "4",
        title: "New Customer Success Playbook",
        description: "Draft the 2024 playbook for high-touch accounts. Include strategies for retention and upsell opportunities.",
        assignee: "Sarah Chen",
        status: "done",
        priority: "low",
        due: "2023-11-10",
        created: "2023-09-15",
    },
    DemoTask {
        id: "5",
        title: "Final Website Content Audit",
        description: "Please review the new landing page copy and imagery. Specifically check the mobile responsiveness of the hero section.",
        assignee: "Marcus Aurelius",
        status: "review",
        priority: "medium",
        due: "2023-11-18",
        created: "2023-11-01",
    },
];

pub fn users() -> Result<Vec<User>> {
    USERS
        .iter()
        .map(|(id, name, email, role, status, dept, last)| -> Result<User> {
            Ok(User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                role: role.parse()?,
                status: status.parse()?,
                department: Some(dept.to_string()),
                last_login: Some(last.to_string()),
            })
        })
        .collect()
}

pub fn entries() -> Result<Vec<FinanceEntry>> {
    ENTRIES
        .iter()
        .map(|(id, ty, amount, date, category)| -> Result<FinanceEntry> {
            Ok(FinanceEntry {
                id: id.to_string(),
                r#type: ty.parse()?,
                amount: parse_decimal(amount)?,
                date: parse_date(date)?,
                category: category.to_string(),
                notes: None,
            })
        })
        .collect()
}

/// Newest first, like every task listing.
pub fn tasks() -> Result<Vec<Task>> {
    let mut out = TASKS
        .iter()
        .map(|t| -> Result<Task> {
            let created = parse_date(t.created)?;
            Ok(Task {
                id: t.id.to_string(),
                title: t.title.to_string(),
                description: t.description.to_string(),
                assignee: t.assignee.to_string(),
                status: t.status.parse()?,
                priority: t.priority.parse()?,
                due_date: Some(parse_date(t.due)?),
                created_at: created.and_time(chrono::NaiveTime::MIN).and_utc(),
                tags: Vec::new(),
            })
        })
        .collect::<Result<Vec<Task>>>()?;
    out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(out)
}

/// Seed every empty table with demo data. Tables that already hold rows are
/// left alone.
pub fn seed(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    if load_entries(&tx)?.is_empty() {
        for e in entries()? {
            upsert_entry(&tx, &e)?;
        }
        info!(count = ENTRIES.len(), "seeded demo finance entries");
    }
    if load_tasks(&tx)?.is_empty() {
        for t in tasks()?.iter().rev() {
            upsert_task(&tx, t)?;
        }
        info!(count = TASKS.len(), "seeded demo tasks");
    }
    if load_users(&tx)?.is_empty() {
        for u in users()? {
            upsert_user(&tx, &u)?;
        }
        info!(count = USERS.len(), "seeded demo users");
    }
    tx.commit()?;
    Ok(())
}
