// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Record store client: create, query and delete records in the per-user
//! `incomes` / `expenses` collections.

use chrono::{Datelike, NaiveDate};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;

use crate::error::StoreError;
use crate::models::{ExpenseCategory, Period, Record, RecordDraft, RecordKind, RecordType};

pub trait RecordStore {
    /// Persist a draft for `user_id`. The returned record carries the id and
    /// timestamp assigned by the store.
    fn create(&self, draft: &RecordDraft, user_id: &str) -> Result<Record, StoreError>;

    /// Records of one collection for a user and period, newest first.
    fn query(
        &self,
        user_id: &str,
        record_type: RecordType,
        period: Period,
    ) -> Result<Vec<Record>, StoreError>;

    /// Fails when the record does not exist or belongs to another user.
    fn delete(&self, user_id: &str, record_type: RecordType, id: i64) -> Result<(), StoreError>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

impl RecordStore for SqliteStore<'_> {
    fn create(&self, draft: &RecordDraft, user_id: &str) -> Result<Record, StoreError> {
        let period = draft.period();
        let day = draft.date.day();
        let timestamp = now_millis();
        match draft.kind {
            RecordKind::Income => {
                self.conn.execute(
                    "INSERT INTO incomes(user_id, description, value, day, month, year, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    params![
                        user_id,
                        draft.description,
                        draft.value.to_string(),
                        day,
                        period.month,
                        period.year,
                        timestamp
                    ],
                )?;
            }
            RecordKind::Expense(category) => {
                self.conn.execute(
                    "INSERT INTO expenses(user_id, description, value, day, month, year, expense_type, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        user_id,
                        draft.description,
                        draft.value.to_string(),
                        day,
                        period.month,
                        period.year,
                        category.index() as i64,
                        timestamp
                    ],
                )?;
            }
        }
        let id = self.conn.last_insert_rowid();
        tracing::debug!(collection = %draft.kind.record_type(), id, "record created");
        Ok(Record {
            id,
            kind: draft.kind,
            description: draft.description.clone(),
            value: draft.value,
            date: draft.date,
            user_id: user_id.to_string(),
            timestamp,
        })
    }

    fn query(
        &self,
        user_id: &str,
        record_type: RecordType,
        period: Period,
    ) -> Result<Vec<Record>, StoreError> {
        let category_col = match record_type {
            RecordType::Income => "NULL",
            RecordType::Expense => "expense_type",
        };
        let sql = format!(
            "SELECT id, description, value, day, {category_col}, timestamp FROM {}
             WHERE user_id=?1 AND month=?2 AND year=?3
             ORDER BY timestamp DESC, id DESC",
            record_type.collection()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![user_id, period.month, period.year])?;

        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            let id: i64 = r.get(0)?;
            let description: String = r.get(1)?;
            let value_s: String = r.get(2)?;
            let day: u32 = r.get(3)?;
            let category: Option<i64> = r.get(4)?;
            let timestamp: i64 = r.get(5)?;

            let value = value_s.parse::<Decimal>().map_err(|_| {
                StoreError::Connectivity(format!(
                    "invalid value '{}' in {}-{}",
                    value_s, record_type, id
                ))
            })?;
            let date = NaiveDate::from_ymd_opt(period.year, period.month, day).ok_or_else(|| {
                StoreError::Connectivity(format!("invalid day {} in {}-{}", day, record_type, id))
            })?;
            let kind = match record_type {
                RecordType::Income => RecordKind::Income,
                RecordType::Expense => {
                    let slot = category.unwrap_or_default();
                    let category = usize::try_from(slot)
                        .ok()
                        .and_then(ExpenseCategory::from_index)
                        .unwrap_or_default();
                    RecordKind::Expense(category)
                }
            };
            out.push(Record {
                id,
                kind,
                description,
                value,
                date,
                user_id: user_id.to_string(),
                timestamp,
            });
        }
        tracing::debug!(collection = %record_type, %period, count = out.len(), "records queried");
        Ok(out)
    }

    fn delete(&self, user_id: &str, record_type: RecordType, id: i64) -> Result<(), StoreError> {
        let sql = format!("SELECT user_id FROM {} WHERE id=?1", record_type.collection());
        let owner: Option<String> = self
            .conn
            .query_row(&sql, params![id], |r| r.get(0))
            .optional()?;
        match owner {
            None => return Err(StoreError::NotFound(format!("{}-{}", record_type, id))),
            Some(o) if o != user_id => {
                return Err(StoreError::Permission(format!(
                    "{}-{} belongs to another user",
                    record_type, id
                )));
            }
            Some(_) => {}
        }
        let sql = format!("DELETE FROM {} WHERE id=?1", record_type.collection());
        self.conn.execute(&sql, params![id])?;
        tracing::debug!(collection = %record_type, id, "record deleted");
        Ok(())
    }
}
