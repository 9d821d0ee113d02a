// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, command};

fn period_args() -> [Arg; 2] {
    [
        Arg::new("month")
            .long("month")
            .short('m')
            .help("Displayed month, 1-12 (default: current)"),
        Arg::new("year")
            .long("year")
            .short('y')
            .help("Displayed year (default: current)"),
    ]
}

fn output_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

pub fn build_cli() -> Command {
    command!()
        .name("budgetly")
        .about("Monthly income and expense tracking")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("signup")
                .about("Register with email and password")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true))
                .arg(
                    Arg::new("confirm")
                        .long("confirm")
                        .required(true)
                        .help("Repeat the password"),
                ),
        )
        .subcommand(
            Command::new("signin")
                .about("Sign in and cache the session")
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("password").long("password").required(true)),
        )
        .subcommand(Command::new("signout").about("Sign out and forget the cached session"))
        .subcommand(Command::new("whoami").about("Show the cached session"))
        .subcommand(
            Command::new("add")
                .about("Record an income or an expense")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .required(true)
                        .help("income | expense"),
                )
                .arg(
                    Arg::new("description")
                        .long("description")
                        .short('d')
                        .required(true),
                )
                .arg(Arg::new("value").long("value").short('v').required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD (default: today)"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .help("Expense category, name or slot 0-6 (default: Other)"),
                )
                .args(period_args()),
        )
        .subcommand(
            Command::new("rm")
                .about("Delete a record")
                .arg(
                    Arg::new("ref")
                        .required(true)
                        .help("Record reference, e.g. expenses-12"),
                )
                .args(period_args()),
        )
        .subcommand(
            Command::new("list")
                .about("List incomes and expenses of a month")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .short('t')
                        .help("Only this collection: incomes | expenses"),
                )
                .arg(Arg::new("min").long("min").help("Keep values >= min"))
                .arg(Arg::new("max").long("max").help("Keep values <= max"))
                .arg(
                    Arg::new("order")
                        .long("order")
                        .allow_hyphen_values(true)
                        .value_parser(["desc", "-desc", "value", "-value"])
                        .help("Sort by description (desc) or value; prefix '-' to reverse"),
                )
                .args(period_args())
                .args(output_args()),
        )
        .subcommand(
            Command::new("summary")
                .about("Budget totals and chart series of a month")
                .arg(
                    Arg::new("chart")
                        .long("chart")
                        .value_parser(["line", "bar"])
                        .default_value("line"),
                )
                .args(period_args())
                .args(output_args()),
        )
        .subcommand(Command::new("categories").about("List expense categories"))
}
