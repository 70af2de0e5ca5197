// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use flowdesk::{cli, commands, db};

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Some(("init", sub)) = matches.subcommand() {
        let path = commands::init::handle(sub)?;
        println!("Database initialized at {}", path.display());
        return Ok(());
    }

    let mut conn = if matches.get_flag("demo") {
        db::open_demo()?
    } else {
        db::open_or_init()?
    };

    match matches.subcommand() {
        Some(("dashboard", sub)) => commands::dashboard::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        Some(("finance", sub)) => commands::finance::handle(&conn, sub)?,
        Some(("task", sub)) => commands::tasks::handle(&conn, sub)?,
        Some(("user", sub)) => commands::users::handle(&conn, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("sync", sub)) => commands::sync::handle(&mut conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
