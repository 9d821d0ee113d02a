// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::AggregateError;
use crate::models::{ExpenseCategory, Period, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
}

impl Totals {
    /// `None` when the difference is out of range.
    pub fn budget(&self) -> Option<Decimal> {
        self.income.checked_sub(self.expense)
    }

    /// `round(expense / income * 100)`, `None` when there is no income or the
    /// ratio is out of range.
    pub fn percentage(&self) -> Option<i64> {
        if self.income <= Decimal::ZERO {
            return None;
        }
        let pct = self
            .expense
            .checked_div(self.income)?
            .checked_mul(Decimal::ONE_HUNDRED)?
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        i64::try_from(pct).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ChartData {
    pub labels: Vec<u32>,
    pub incomes_by_day: Vec<Decimal>,
    pub expenses_by_day: Vec<Decimal>,
    pub expenses_by_category: [Decimal; ExpenseCategory::COUNT],
}

fn add(acc: Decimal, value: Decimal) -> Result<Decimal, AggregateError> {
    acc.checked_add(value).ok_or(AggregateError::Overflow)
}

pub fn sum(records: &[Record]) -> Result<Decimal, AggregateError> {
    records.iter().try_fold(Decimal::ZERO, |acc, r| add(acc, r.value))
}

pub fn totals(incomes: &[Record], expenses: &[Record]) -> Result<Totals, AggregateError> {
    Ok(Totals {
        income: sum(incomes)?,
        expense: sum(expenses)?,
    })
}

/// Per-day sums for a month of `days` days. Records dated past the end of the
/// month are ignored.
pub fn by_day(records: &[Record], days: usize) -> Result<Vec<Decimal>, AggregateError> {
    let mut out = vec![Decimal::ZERO; days];
    for r in records {
        let idx = r.day() as usize;
        if (1..=days).contains(&idx) {
            out[idx - 1] = add(out[idx - 1], r.value)?;
        }
    }
    Ok(out)
}

pub fn by_category(
    expenses: &[Record],
) -> Result<[Decimal; ExpenseCategory::COUNT], AggregateError> {
    let mut out = [Decimal::ZERO; ExpenseCategory::COUNT];
    for r in expenses {
        if let Some(c) = r.kind.category() {
            out[c.index()] = add(out[c.index()], r.value)?;
        }
    }
    Ok(out)
}

pub fn chart_series(
    period: Period,
    incomes: &[Record],
    expenses: &[Record],
) -> Result<ChartData, AggregateError> {
    let days = period.days();
    Ok(ChartData {
        labels: (1..=days as u32).collect(),
        incomes_by_day: by_day(incomes, days)?,
        expenses_by_day: by_day(expenses, days)?,
        expenses_by_category: by_category(expenses)?,
    })
}
