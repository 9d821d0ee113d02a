// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View adapter: turns raw form input into typed values and renders
//! formatted output into the [`Screen`]. No validation beyond trimming.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate::{ChartData, Totals};
use crate::filters::{FilterParams, SortOrder};
use crate::models::{ExpenseCategory, Period, Record, RecordDraft, RecordKind, RecordType, Session};

/// Shown instead of a percentage when there is no income, and
/// instead of any total that is out of range.
pub const PLACEHOLDER: &str = "---";

/// Raw values of the "new record" form.
#[derive(Debug, Clone, Default)]
pub struct RawInput {
    pub record_type: String,
    pub description: String,
    pub value: String,
    pub date: String,
    pub expense_type: String,
}

#[derive(Debug, Clone, Default)]
pub struct RawFilter {
    pub min: String,
    pub max: String,
    pub order: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password1: String,
    pub password2: String,
}

/// Unparsable or blank amounts read as zero, which later fails validation.
pub fn parse_amount(raw: &str) -> Decimal {
    let s = raw.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }
    s.parse::<Decimal>().unwrap_or(Decimal::ZERO)
}

fn optional_amount(raw: &str) -> Option<Decimal> {
    let s = raw.trim();
    if s.is_empty() {
        None
    } else {
        s.parse::<Decimal>().ok()
    }
}

/// Reads the new-record form. `None` when the type or the date cannot be read
/// at all; description and value are returned as typed for the controller to
/// validate.
pub fn read_draft(input: &RawInput) -> Option<RecordDraft> {
    let record_type = input.record_type.parse::<RecordType>().ok()?;
    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d").ok()?;
    let kind = match record_type {
        RecordType::Income => RecordKind::Income,
        RecordType::Expense => {
            let raw = input.expense_type.trim();
            if raw.is_empty() {
                RecordKind::Expense(ExpenseCategory::default())
            } else {
                RecordKind::Expense(raw.parse::<ExpenseCategory>().ok()?)
            }
        }
    };
    Some(RecordDraft {
        kind,
        description: input.description.trim().to_string(),
        value: parse_amount(&input.value),
        date,
    })
}

pub fn read_filter(raw: &RawFilter) -> FilterParams {
    FilterParams {
        min: optional_amount(&raw.min),
        max: optional_amount(&raw.max),
        order: {
            let o = raw.order.trim();
            if o.is_empty() {
                None
            } else {
                o.parse::<SortOrder>().ok()
            }
        },
    }
}

pub fn read_login(form: &LoginForm) -> (String, String) {
    (
        form.email.trim().to_string(),
        form.password.trim().to_string(),
    )
}

pub fn read_register(form: &RegisterForm) -> RegisterForm {
    RegisterForm {
        email: form.email.trim().to_string(),
        password1: form.password1.trim().to_string(),
        password2: form.password2.trim().to_string(),
    }
}

fn group_thousands(int: &str) -> String {
    let mut out = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// `+ 2 700.00` / `- 40.00`: sign, space, absolute value grouped by
/// thousands with two decimals.
pub fn format_number(value: Decimal, negative: bool) -> String {
    let fixed = format!("{:.2}", value.abs().round_dp(2));
    let (int, dec) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if negative { '-' } else { '+' };
    format!("{} {}.{}", sign, group_thousands(int), dec)
}

pub fn format_record_value(record: &Record) -> String {
    format_number(record.value, record.record_type() == RecordType::Expense)
}

pub fn format_percentage(totals: &Totals) -> String {
    match totals.percentage() {
        Some(p) => format!("{}%", p),
        None => PLACEHOLDER.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetLabels {
    pub budget: String,
    pub income: String,
    pub expenses: String,
    pub percentage: String,
}

impl BudgetLabels {
    /// Every label shows the placeholder.
    pub fn unavailable() -> Self {
        Self {
            budget: PLACEHOLDER.to_string(),
            income: PLACEHOLDER.to_string(),
            expenses: PLACEHOLDER.to_string(),
            percentage: PLACEHOLDER.to_string(),
        }
    }
}

pub fn budget_labels(totals: &Totals) -> BudgetLabels {
    BudgetLabels {
        budget: match totals.budget() {
            Some(b) => format_number(b, b < Decimal::ZERO),
            None => PLACEHOLDER.to_string(),
        },
        income: format_number(totals.income, false),
        expenses: format_number(totals.expense, true),
        percentage: format_percentage(totals),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Line,
    Bar,
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItem {
    pub reference: String,
    pub description: String,
    pub category: String,
    pub date: String,
    pub value: String,
}

impl ListItem {
    pub fn render(record: &Record) -> Self {
        Self {
            reference: record.reference().to_string(),
            description: record.description.clone(),
            category: record
                .kind
                .category()
                .map(|c| c.label().to_string())
                .unwrap_or_default(),
            date: record.date.format("%d/%m/%Y").to_string(),
            value: format_record_value(record),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ListPane {
    pub items: Vec<ListItem>,
    pub filtered: bool,
}

/// The display surface.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Screen {
    pub period: Option<Period>,
    pub signed_in_as: Option<String>,
    pub inputs_enabled: bool,
    pub incomes: ListPane,
    pub expenses: ListPane,
    pub labels: Option<BudgetLabels>,
    pub chart: Option<ChartData>,
    pub chart_style: ChartStyle,
    /// Set when the new-record inputs were cleared after a save.
    pub inputs_cleared: bool,
}

impl Screen {
    pub fn pane(&self, record_type: RecordType) -> &ListPane {
        match record_type {
            RecordType::Income => &self.incomes,
            RecordType::Expense => &self.expenses,
        }
    }

    fn pane_mut(&mut self, record_type: RecordType) -> &mut ListPane {
        match record_type {
            RecordType::Income => &mut self.incomes,
            RecordType::Expense => &mut self.expenses,
        }
    }

    pub fn fill_list(&mut self, record_type: RecordType, records: &[Record], filtered: bool) {
        let pane = self.pane_mut(record_type);
        pane.items = records.iter().map(ListItem::render).collect();
        pane.filtered = filtered;
    }

    pub fn add_to_list(&mut self, record: &Record) {
        self.pane_mut(record.record_type())
            .items
            .insert(0, ListItem::render(record));
    }

    pub fn remove_from_list(&mut self, reference: &str) {
        for pane in [&mut self.incomes, &mut self.expenses] {
            pane.items.retain(|i| i.reference != reference);
        }
    }

    pub fn fill_budget(&mut self, totals: &Totals) {
        self.labels = Some(budget_labels(totals));
    }

    /// Placeholder labels and no chart, for totals that cannot be computed.
    pub fn clear_budget(&mut self) {
        self.labels = Some(BudgetLabels::unavailable());
        self.chart = None;
    }

    pub fn render_chart(&mut self, period: Period, chart: ChartData) {
        self.period = Some(period);
        self.chart = Some(chart);
    }

    pub fn set_chart_style(&mut self, style: ChartStyle) {
        self.chart_style = style;
    }

    pub fn show_session(&mut self, session: Option<&Session>) {
        self.signed_in_as = session.map(|s| s.email.clone());
    }

    pub fn toggle_inputs(&mut self, enabled: bool) {
        self.inputs_enabled = enabled;
    }

    pub fn clear_fields(&mut self) {
        self.inputs_cleared = true;
    }
}
