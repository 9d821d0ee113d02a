// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table, presets::UTF8_FULL};

use crate::models::Period;
use crate::notify::{Notification, Severity};

/// Period from optional `--month` / `--year`, defaulting to the current one.
pub fn parse_period(month: Option<&String>, year: Option<&String>) -> Result<Period> {
    let now = Period::current();
    let month = match month {
        Some(m) => m
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid month '{}', expected 1-12", m))?,
        None => now.month,
    };
    let year = match year {
        Some(y) => y
            .trim()
            .parse::<i32>()
            .with_context(|| format!("Invalid year '{}'", y))?,
        None => now.year,
    };
    Ok(Period::new(month, year)?)
}

pub fn period_from_matches(sub: &clap::ArgMatches) -> Result<Period> {
    parse_period(sub.get_one::<String>("month"), sub.get_one::<String>("year"))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Notifications go to stderr so JSON output stays clean.
pub fn print_notifications(items: &[Notification]) {
    if items.is_empty() {
        return;
    }
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    for n in items {
        let (tag, color) = match n.severity {
            Severity::Info => ("info", Color::Cyan),
            Severity::Error => ("error", Color::Red),
        };
        t.add_row(vec![Cell::new(tag).fg(color), Cell::new(&n.text)]);
    }
    eprintln!("{}", t);
}
