// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod display;
pub mod records;
pub mod session;
pub mod summary;

use rusqlite::Connection;

use crate::auth::{SettingsSessionCache, SqliteIdentity};
use crate::controller::BudgetController;
use crate::models::Period;
use crate::store::SqliteStore;

/// SQLite-backed collaborators of one controller.
pub struct Backend<'c> {
    pub store: SqliteStore<'c>,
    pub identity: SqliteIdentity<'c>,
    pub cache: SettingsSessionCache<'c>,
}

impl<'c> Backend<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self {
            store: SqliteStore::new(conn),
            identity: SqliteIdentity::new(conn),
            cache: SettingsSessionCache::new(conn),
        }
    }

    /// Controller for `period`, with any cached session already restored.
    pub fn controller(&self, period: Period) -> BudgetController<'_> {
        let mut ctl = BudgetController::new(&self.store, &self.identity, &self.cache, period);
        ctl.initialize();
        ctl
    }
}
