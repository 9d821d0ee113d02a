// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;
use serde::Serialize;

use super::{Backend, display};
use crate::aggregate::ChartData;
use crate::controller::BudgetController;
use crate::models::{ExpenseCategory, Period};
use crate::utils::{maybe_print_json, period_from_matches, pretty_table, print_notifications};
use crate::view::{BudgetLabels, ChartStyle};

#[derive(Serialize)]
pub struct SummaryOut<'a> {
    pub period: Option<Period>,
    pub labels: Option<&'a BudgetLabels>,
    pub chart: Option<&'a ChartData>,
}

pub fn handle(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(period_from_matches(sub)?);
    handle_with(&mut ctl, sub)?;
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

/// Labels print even when the chart could not be computed.
pub fn handle_with(ctl: &mut BudgetController<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let style = match sub.get_one::<String>("chart").map(String::as_str) {
        Some("bar") => ChartStyle::Bar,
        _ => ChartStyle::Line,
    };
    if !ctl.ensure_signed_in() {
        return Ok(());
    }
    ctl.render_chart(style);
    let screen = ctl.screen();
    let out = SummaryOut {
        period: screen.period,
        labels: screen.labels.as_ref(),
        chart: screen.chart.as_ref(),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &out)? {
        if let Some(period) = out.period {
            println!("Period {}", period);
        }
        if let Some(labels) = out.labels {
            display::print_budget(labels);
        }
        if let Some(chart) = out.chart {
            display::print_chart(chart, screen.chart_style);
        }
    }
    Ok(())
}

pub fn categories() -> Result<()> {
    let rows = ExpenseCategory::ALL
        .iter()
        .map(|c| vec![c.index().to_string(), c.label().to_string()])
        .collect();
    println!("{}", pretty_table(&["Slot", "Category"], rows));
    Ok(())
}
