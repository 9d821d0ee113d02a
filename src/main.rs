// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use budgetly::{cli, commands, db};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("BUDGETLY_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("signup", sub)) => commands::session::signup(&conn, sub)?,
        Some(("signin", sub)) => commands::session::signin(&conn, sub)?,
        Some(("signout", _)) => commands::session::signout(&conn)?,
        Some(("whoami", _)) => commands::session::whoami(&conn)?,
        Some(("add", sub)) => commands::records::add(&conn, sub)?,
        Some(("rm", sub)) => commands::records::remove(&conn, sub)?,
        Some(("list", sub)) => commands::records::list(&conn, sub)?,
        Some(("summary", sub)) => commands::summary::handle(&conn, sub)?,
        Some(("categories", _)) => commands::summary::categories()?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
