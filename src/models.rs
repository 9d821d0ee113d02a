// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Collection a record lives in. Carries no payload; see [`RecordKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordType {
    Income,
    Expense,
}

impl RecordType {
    pub const ALL: [RecordType; 2] = [RecordType::Income, RecordType::Expense];

    /// Collection (and table) name.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Income => "incomes",
            Self::Expense => "expenses",
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for RecordType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "incomes" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            other => Err(ParseError::RecordType(other.to_string())),
        }
    }
}

/// Fixed expense category enumeration. The discriminant is the chart slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Other = 0,
    Housing = 1,
    FoodAndGroceries = 2,
    ConsumerDebt = 3,
    HealthCare = 4,
    PersonalCare = 5,
    Entertainment = 6,
}

impl ExpenseCategory {
    pub const COUNT: usize = 7;

    pub const ALL: [ExpenseCategory; Self::COUNT] = [
        Self::Other,
        Self::Housing,
        Self::FoodAndGroceries,
        Self::ConsumerDebt,
        Self::HealthCare,
        Self::PersonalCare,
        Self::Entertainment,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Other => "Other",
            Self::Housing => "Housing",
            Self::FoodAndGroceries => "Food and Groceries",
            Self::ConsumerDebt => "Consumer Debt",
            Self::HealthCare => "Health Care",
            Self::PersonalCare => "Personal Care",
            Self::Entertainment => "Entertainment",
        }
    }
}

impl Default for ExpenseCategory {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ParseError;

    /// Accepts the slot index or the label, case and spacing insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(idx) = raw.parse::<usize>() {
            return Self::from_index(idx).ok_or_else(|| ParseError::Category(raw.to_string()));
        }
        let wanted: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| {
                let label: String = c.label().chars().filter(|c| c.is_alphanumeric()).collect();
                label.to_lowercase() == wanted
            })
            .ok_or_else(|| ParseError::Category(raw.to_string()))
    }
}

/// Tagged record variant; only expenses carry a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "expense_type", rename_all = "lowercase")]
pub enum RecordKind {
    Income,
    Expense(ExpenseCategory),
}

impl RecordKind {
    pub fn record_type(&self) -> RecordType {
        match self {
            Self::Income => RecordType::Income,
            Self::Expense(_) => RecordType::Expense,
        }
    }

    pub fn category(&self) -> Option<ExpenseCategory> {
        match self {
            Self::Income => None,
            Self::Expense(c) => Some(*c),
        }
    }
}

/// The (month, year) pair currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, ParseError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ParseError::Period(format!("{:02}/{}", month, year)));
        }
        Ok(Self { month, year })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn days(&self) -> usize {
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1);
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        match (first, next) {
            (Some(a), Some(b)) => (b - a).num_days() as usize,
            _ => 0,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// Largest amount a single record may carry, 1 000 000 000 000.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Validated user input, not yet persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDraft {
    pub kind: RecordKind,
    pub description: String,
    pub value: Decimal,
    pub date: NaiveDate,
}

impl RecordDraft {
    pub fn is_valid(&self) -> bool {
        !self.description.trim().is_empty()
            && self.value > Decimal::ZERO
            && self.value <= MAX_AMOUNT
    }

    pub fn period(&self) -> Period {
        Period::of(self.date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: i64,
    #[serde(flatten)]
    pub kind: RecordKind,
    pub description: String,
    pub value: Decimal,
    pub date: NaiveDate,
    pub user_id: String,
    pub timestamp: i64,
}

impl Record {
    pub fn record_type(&self) -> RecordType {
        self.kind.record_type()
    }

    pub fn period(&self) -> Period {
        Period::of(self.date)
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn reference(&self) -> RecordRef {
        RecordRef {
            record_type: self.record_type(),
            id: self.id,
        }
    }
}

/// Names a persisted record as `<collection>-<id>`, e.g. `expenses-12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordRef {
    pub record_type: RecordType,
    pub id: i64,
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.record_type.collection(), self.id)
    }
}

impl FromStr for RecordRef {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let (kind, id) = raw
            .split_once('-')
            .ok_or_else(|| ParseError::RecordRef(raw.to_string()))?;
        let record_type = kind.parse::<RecordType>()?;
        let id = id
            .parse::<i64>()
            .map_err(|_| ParseError::RecordRef(raw.to_string()))?;
        Ok(Self { record_type, id })
    }
}

/// Cached identity used to scope every record operation to one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub token: String,
}
