// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! In-memory application state and the pure updates applied to it once an
//! external call has succeeded.

use crate::aggregate::{self, ChartData, Totals};
use crate::error::AggregateError;
use crate::models::{Period, Record, RecordType, Session};

/// Result of loading both collections for one period.
#[derive(Debug, Clone)]
pub struct Fetched {
    pub period: Period,
    pub incomes: Vec<Record>,
    pub expenses: Vec<Record>,
}

#[derive(Debug, Clone)]
pub struct BudgetState {
    pub session: Option<Session>,
    pub period: Period,
    pub incomes: Vec<Record>,
    pub expenses: Vec<Record>,
}

impl BudgetState {
    pub fn new(period: Period) -> Self {
        Self {
            session: None,
            period,
            incomes: Vec::new(),
            expenses: Vec::new(),
        }
    }

    pub fn records(&self, record_type: RecordType) -> &[Record] {
        match record_type {
            RecordType::Income => &self.incomes,
            RecordType::Expense => &self.expenses,
        }
    }

    fn records_mut(&mut self, record_type: RecordType) -> &mut Vec<Record> {
        match record_type {
            RecordType::Income => &mut self.incomes,
            RecordType::Expense => &mut self.expenses,
        }
    }

    /// Switches the displayed period. Collections keep their old content until
    /// the next fetch for the new period lands.
    pub fn navigate(&mut self, period: Period) {
        self.period = period;
    }

    /// Replaces both collections. A result for a period that is no longer
    /// displayed is dropped and `false` returned.
    pub fn apply_fetch(&mut self, fetched: Fetched) -> bool {
        if fetched.period != self.period {
            return false;
        }
        self.incomes = fetched.incomes;
        self.expenses = fetched.expenses;
        true
    }

    /// Inserts a freshly persisted record at the front of its collection when
    /// it belongs to the displayed period.
    pub fn apply_created(&mut self, record: Record) -> bool {
        if record.period() != self.period {
            return false;
        }
        self.records_mut(record.record_type()).insert(0, record);
        true
    }

    pub fn apply_deleted(&mut self, record_type: RecordType, id: i64) -> Option<Record> {
        let list = self.records_mut(record_type);
        let pos = list.iter().position(|r| r.id == id)?;
        Some(list.remove(pos))
    }

    /// Drops session and records.
    pub fn reset(&mut self) {
        self.session = None;
        self.incomes.clear();
        self.expenses.clear();
    }

    pub fn totals(&self) -> Result<Totals, AggregateError> {
        aggregate::totals(&self.incomes, &self.expenses)
    }

    pub fn chart(&self) -> Result<ChartData, AggregateError> {
        aggregate::chart_series(self.period, &self.incomes, &self.expenses)
    }
}
