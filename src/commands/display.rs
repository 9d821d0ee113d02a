// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::aggregate::ChartData;
use crate::models::{ExpenseCategory, RecordType};
use crate::utils::pretty_table;
use crate::view::{BudgetLabels, ChartStyle, ListPane, Screen, format_number};

pub fn print_pane(title: &str, pane: &ListPane) {
    let heading = if pane.filtered {
        format!("{} (filtered)", title)
    } else {
        title.to_string()
    };
    println!("{}", heading);
    let rows: Vec<Vec<String>> = pane
        .items
        .iter()
        .map(|i| {
            vec![
                i.reference.clone(),
                i.date.clone(),
                i.description.clone(),
                i.category.clone(),
                i.value.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Ref", "Date", "Description", "Category", "Value"], rows)
    );
}

pub fn print_lists(screen: &Screen, only: Option<RecordType>) {
    for record_type in RecordType::ALL {
        if only.is_some_and(|t| t != record_type) {
            continue;
        }
        let title = match record_type {
            RecordType::Income => "Incomes",
            RecordType::Expense => "Expenses",
        };
        print_pane(title, screen.pane(record_type));
    }
}

pub fn print_budget(labels: &BudgetLabels) {
    println!(
        "{}",
        pretty_table(
            &["Available budget", "Income", "Expenses", "Spent"],
            vec![vec![
                labels.budget.clone(),
                labels.income.clone(),
                labels.expenses.clone(),
                labels.percentage.clone(),
            ]],
        )
    );
}

fn bar(value: Decimal, peak: Decimal, width: usize) -> String {
    if peak.is_zero() || value.is_zero() {
        return String::new();
    }
    let filled = (value / peak * Decimal::from(width))
        .round()
        .to_usize()
        .unwrap_or(0)
        .max(1);
    "#".repeat(filled.min(width))
}

pub fn print_chart(chart: &ChartData, style: ChartStyle) {
    let peak = chart
        .incomes_by_day
        .iter()
        .chain(chart.expenses_by_day.iter())
        .copied()
        .max()
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = chart
        .labels
        .iter()
        .zip(chart.incomes_by_day.iter().zip(chart.expenses_by_day.iter()))
        .filter(|(_, (i, e))| style == ChartStyle::Bar || !i.is_zero() || !e.is_zero())
        .map(|(day, (i, e))| {
            let mut row = vec![
                day.to_string(),
                format_number(*i, false),
                format_number(*e, true),
            ];
            if style == ChartStyle::Bar {
                row.push(format!("{}|{}", bar(*i, peak, 20), bar(*e, peak, 20)));
            }
            row
        })
        .collect();
    let headers: &[&str] = match style {
        ChartStyle::Line => &["Day", "Incomes", "Expenses"],
        ChartStyle::Bar => &["Day", "Incomes", "Expenses", "Incomes|Expenses"],
    };
    println!("{}", pretty_table(headers, rows));

    let cats: Vec<Vec<String>> = ExpenseCategory::ALL
        .iter()
        .map(|c| {
            vec![
                c.index().to_string(),
                c.label().to_string(),
                format_number(chart.expenses_by_category[c.index()], true),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Slot", "Category", "Spent"], cats));
}
