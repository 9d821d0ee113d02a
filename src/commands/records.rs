// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use rusqlite::Connection;

use super::{Backend, display};
use crate::controller::BudgetController;
use crate::models::{RecordRef, RecordType};
use crate::utils::{maybe_print_json, period_from_matches, print_notifications};
use crate::view::{RawFilter, RawInput};

pub fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(period_from_matches(sub)?);
    add_with(&mut ctl, sub)?;
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

/// Notices are left on `ctl`.
pub fn add_with(ctl: &mut BudgetController<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let input = RawInput {
        record_type: sub.get_one::<String>("type").cloned().unwrap_or_default(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        value: sub.get_one::<String>("value").cloned().unwrap_or_default(),
        date: sub
            .get_one::<String>("date")
            .cloned()
            .unwrap_or_else(|| chrono::Local::now().date_naive().to_string()),
        expense_type: sub.get_one::<String>("category").cloned().unwrap_or_default(),
    };
    if let Some(reference) = ctl.add_record(&input) {
        println!("Recorded {} ({})", reference, input.description.trim());
        if let Some(labels) = &ctl.screen().labels {
            display::print_budget(labels);
        }
    }
    Ok(())
}

pub fn remove(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(period_from_matches(sub)?);
    remove_with(&mut ctl, sub)?;
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

pub fn remove_with(ctl: &mut BudgetController<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let raw = sub.get_one::<String>("ref").map(String::as_str).unwrap_or("");
    let reference = raw
        .parse::<RecordRef>()
        .with_context(|| format!("Cannot delete '{}'", raw))?;
    if ctl.delete_record(reference) {
        println!("Removed {}", reference);
        if let Some(labels) = &ctl.screen().labels {
            display::print_budget(labels);
        }
    }
    Ok(())
}

pub fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(period_from_matches(sub)?);
    list_with(&mut ctl, sub)?;
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

pub fn list_with(ctl: &mut BudgetController<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let only = match sub.get_one::<String>("type") {
        Some(t) => Some(t.parse::<RecordType>()?),
        None => None,
    };
    let raw = RawFilter {
        min: sub.get_one::<String>("min").cloned().unwrap_or_default(),
        max: sub.get_one::<String>("max").cloned().unwrap_or_default(),
        order: sub.get_one::<String>("order").cloned().unwrap_or_default(),
    };
    let wants_filter = !(raw.min.trim().is_empty()
        && raw.max.trim().is_empty()
        && raw.order.trim().is_empty());

    if !ctl.ensure_signed_in() {
        return Ok(());
    }
    if wants_filter {
        for record_type in RecordType::ALL {
            if only.is_none_or(|t| t == record_type) {
                ctl.filter_list(record_type, &raw);
            }
        }
    }
    let screen = ctl.screen();
    let panes: Vec<_> = RecordType::ALL
        .into_iter()
        .filter(|t| only.is_none_or(|o| o == *t))
        .flat_map(|t| screen.pane(t).items.clone())
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &panes)? {
        if let Some(period) = screen.period {
            println!("Period {}", period);
        }
        display::print_lists(screen, only);
    }
    Ok(())
}
