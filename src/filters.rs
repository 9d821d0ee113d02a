// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortOrder {
    DescriptionAsc,
    DescriptionDesc,
    ValueAsc,
    ValueDesc,
}

/// Case-folded first, raw text breaks ties.
fn by_description(a: &Record, b: &Record) -> Ordering {
    a.description
        .to_lowercase()
        .cmp(&b.description.to_lowercase())
        .then_with(|| a.description.cmp(&b.description))
}

impl SortOrder {
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            Self::DescriptionAsc => by_description(a, b),
            Self::DescriptionDesc => by_description(b, a),
            Self::ValueAsc => a.value.cmp(&b.value),
            Self::ValueDesc => b.value.cmp(&a.value),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "desc" | "description" => Ok(Self::DescriptionAsc),
            "-desc" | "-description" => Ok(Self::DescriptionDesc),
            "value" => Ok(Self::ValueAsc),
            "-value" => Ok(Self::ValueDesc),
            other => Err(ParseError::Order(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DescriptionAsc => "desc",
            Self::DescriptionDesc => "-desc",
            Self::ValueAsc => "value",
            Self::ValueDesc => "-value",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterParams {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
    pub order: Option<SortOrder>,
}

impl FilterParams {
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.order.is_none()
    }
}

pub fn filter_by_min(records: Vec<Record>, min: Decimal) -> Vec<Record> {
    records.into_iter().filter(|r| r.value >= min).collect()
}

pub fn filter_by_max(records: Vec<Record>, max: Decimal) -> Vec<Record> {
    records.into_iter().filter(|r| r.value <= max).collect()
}

/// Stable sort.
pub fn ordering(mut records: Vec<Record>, order: SortOrder) -> Vec<Record> {
    records.sort_by(|a, b| order.compare(a, b));
    records
}

/// Min, then max, then sort, on a copy of `records`.
pub fn apply(records: &[Record], params: &FilterParams) -> Vec<Record> {
    let mut out = records.to_vec();
    if let Some(min) = params.min {
        out = filter_by_min(out, min);
    }
    if let Some(max) = params.max {
        out = filter_by_max(out, max);
    }
    if let Some(order) = params.order {
        out = ordering(out, order);
    }
    out
}
