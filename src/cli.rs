// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{crate_version, value_parser, Arg, ArgAction, Command};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").long("id").required(true).help("Record id")
}

fn finance_cmd() -> Command {
    Command::new("finance")
        .about("Revenue and expense ledger")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record a revenue or expense entry")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .required(true)
                        .help("revenue | expense"),
                )
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .required(true)
                        .allow_negative_numbers(true),
                )
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (default: today)"),
                )
                .arg(Arg::new("category").long("category").required(true))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(
            Command::new("edit")
                .about("Replace fields of an existing entry")
                .arg(id_arg())
                .arg(
                    Arg::new("amount")
                        .long("amount")
                        .allow_negative_numbers(true),
                )
                .arg(Arg::new("date").long("date"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("notes").long("notes")),
        )
        .subcommand(Command::new("rm").about("Delete an entry").arg(id_arg()))
        .subcommand(json_args(
            Command::new("list")
                .about("List entries, newest date first")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Match category or amount"),
                )
                .arg(Arg::new("type").long("type").help("revenue | expense"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
}

fn task_cmd() -> Command {
    Command::new("task")
        .about("Task board")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Create a task")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("assignee").long("assignee"))
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("todo")
                        .help("todo | in_progress | review | done"),
                )
                .arg(
                    Arg::new("priority")
                        .long("priority")
                        .default_value("medium")
                        .help("low | medium | high"),
                )
                .arg(Arg::new("due").long("due").help("YYYY-MM-DD"))
                .arg(
                    Arg::new("tags")
                        .long("tags")
                        .help("Comma-separated labels"),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Update fields of an existing task")
                .arg(id_arg())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("description").long("description"))
                .arg(Arg::new("assignee").long("assignee"))
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("priority").long("priority"))
                .arg(Arg::new("due").long("due"))
                .arg(Arg::new("tags").long("tags")),
        )
        .subcommand(
            Command::new("status")
                .about("Move a task to another status")
                .arg(id_arg())
                .arg(Arg::new("status").long("status").required(true)),
        )
        .subcommand(Command::new("rm").about("Delete a task").arg(id_arg()))
        .subcommand(json_args(
            Command::new("list")
                .about("List tasks, newest first")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Match title or assignee"),
                )
                .arg(Arg::new("status").long("status")),
        ))
}

fn user_cmd() -> Command {
    Command::new("user")
        .about("Team members")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Invite a team member")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("role")
                        .long("role")
                        .default_value("Staff")
                        .help("Admin | Manager | Staff | Guest"),
                )
                .arg(
                    Arg::new("status")
                        .long("status")
                        .default_value("Active")
                        .help("Active | Inactive | Pending"),
                )
                .arg(Arg::new("department").long("department")),
        )
        .subcommand(
            Command::new("edit")
                .about("Update a team member")
                .arg(id_arg())
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("email").long("email"))
                .arg(Arg::new("role").long("role"))
                .arg(Arg::new("status").long("status"))
                .arg(Arg::new("department").long("department")),
        )
        .subcommand(
            Command::new("status")
                .about("Activate, deactivate or mark pending")
                .arg(id_arg())
                .arg(Arg::new("status").long("status").required(true)),
        )
        .subcommand(json_args(
            Command::new("list")
                .about("List team members")
                .arg(
                    Arg::new("search")
                        .long("search")
                        .help("Match name or email"),
                )
                .arg(
                    Arg::new("role")
                        .long("role")
                        .help("All | Admin | Manager | Staff | Guest"),
                ),
        ))
}

pub fn build_cli() -> Command {
    Command::new("flowdesk")
        .version(crate_version!())
        .about("Operations desk: tasks, team and finance analytics")
        .arg(
            Arg::new("demo")
                .long("demo")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Run against an in-memory demo workspace (with init: seed the database file)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about(
            "Create the database; with --demo, fill its empty tables with demo data",
        ))
        .subcommand(json_args(
            Command::new("dashboard")
                .about("KPI cards, revenue chart and task distribution")
                .arg(
                    Arg::new("as_of")
                        .long("as-of")
                        .help("Reference date for monthly revenue (default: today)"),
                ),
        ))
        .subcommand(
            Command::new("report")
                .about("Finance analytics")
                .subcommand_required(true)
                .subcommand(json_args(
                    Command::new("summary").about("Total revenue, expenses and net profit"),
                ))
                .subcommand(json_args(
                    Command::new("chart").about("Revenue vs expenses per month, Jan to Jul"),
                )),
        )
        .subcommand(finance_cmd())
        .subcommand(task_cmd())
        .subcommand(user_cmd())
        .subcommand(
            Command::new("settings")
                .about("Company profile and display preferences")
                .subcommand_required(true)
                .subcommand(json_args(Command::new("show")))
                .subcommand(
                    Command::new("company")
                        .about("Set the company profile")
                        .arg(Arg::new("name").long("name"))
                        .arg(Arg::new("industry").long("industry"))
                        .arg(Arg::new("size").long("size")),
                )
                .subcommand(
                    Command::new("currency")
                        .about("Set the currency symbol")
                        .arg(Arg::new("symbol").long("symbol").required(true)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand_required(true)
                .subcommand(
                    Command::new("finance")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv | json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("sync")
                .about("Merge a JSON-lines feed of change events into the store")
                .arg(Arg::new("from").long("from").required(true)),
        )
}
