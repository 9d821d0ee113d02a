// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Budget controller: orchestrates the record store, identity provider and
//! session cache, keeps [`BudgetState`] consistent and drives the [`Screen`].
//!
//! Every external failure ends as a notification; state only changes after
//! the call it depends on has succeeded.

use std::time::Instant;

use crate::aggregate::{ChartData, Totals};
use crate::error::AggregateError;
use crate::auth::{IdentityProvider, MIN_PASSWORD_LEN, SessionCache, is_valid_email};
use crate::filters;
use crate::models::{MAX_AMOUNT, Period, RecordRef, RecordType, Session};
use crate::notify::{NotificationSink, NotifyOptions};
use crate::state::{BudgetState, Fetched};
use crate::store::RecordStore;
use crate::view::{self, ChartStyle, LoginForm, RawFilter, RawInput, RegisterForm, Screen};

pub mod messages {
    pub const EMPTY_NEW_ITEM: &str = "Enter some data.";
    pub const EMPTY_FILTER: &str = "Set some filters.";
    pub const FETCH_FAILED: &str = "We can't receive your finances right now. Try again later.";
    pub const ADD_FAILED: &str = "The record could not be saved. Try again later.";
    pub const DELETE_FAILED: &str = "The record could not be removed. Try again later.";
    pub const EMPTY_LOGIN: &str = "Enter your email and password.";
    pub const INVALID_EMAIL: &str = "Enter a valid email.";
    pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
    pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters.";
    pub const NOT_SIGNED_IN: &str = "Sign in to manage your budget.";
    pub const OOPS: &str = "Oops, something went wrong. Try again later.";
    pub const AMOUNT_TOO_LARGE: &str = "Enter an amount up to 1 000 000 000 000.00.";
    pub const TOTALS_OUT_OF_RANGE: &str = "Your totals are too large to show.";
}

pub struct BudgetController<'a> {
    store: &'a dyn RecordStore,
    identity: &'a dyn IdentityProvider,
    cache: &'a dyn SessionCache,
    state: BudgetState,
    screen: Screen,
    notices: NotificationSink,
}

impl<'a> BudgetController<'a> {
    pub fn new(
        store: &'a dyn RecordStore,
        identity: &'a dyn IdentityProvider,
        cache: &'a dyn SessionCache,
        period: Period,
    ) -> Self {
        Self {
            store,
            identity,
            cache,
            state: BudgetState::new(period),
            screen: Screen {
                period: Some(period),
                ..Screen::default()
            },
            notices: NotificationSink::new(NotifyOptions::default()),
        }
    }

    pub fn state(&self) -> &BudgetState {
        &self.state
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn notices(&self) -> &NotificationSink {
        &self.notices
    }

    pub fn notices_mut(&mut self) -> &mut NotificationSink {
        &mut self.notices
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    fn info(&mut self, text: &str) {
        self.notices.info(text, Instant::now());
    }

    fn error(&mut self, text: &str) {
        self.notices.error(text, Instant::now());
    }

    /// Restores a cached session if there is one; otherwise inputs stay
    /// disabled.
    pub fn initialize(&mut self) {
        self.screen.period = Some(self.state.period);
        match self.cache.load() {
            Ok(Some(session)) => self.authorize(session),
            Ok(None) => self.screen.toggle_inputs(false),
            Err(err) => {
                tracing::warn!(error = %err, "cached session unreadable");
                self.screen.toggle_inputs(false);
            }
        }
    }

    /// Makes `session` current. A different session held before is ended
    /// with the provider first.
    fn authorize(&mut self, session: Session) {
        if let Some(prev) = self.state.session.take() {
            if prev.token != session.token {
                if let Err(err) = self.identity.sign_out(&prev) {
                    tracing::warn!(error = %err, "previous session not ended");
                }
            }
        }
        if let Err(err) = self.cache.save(&session) {
            tracing::warn!(error = %err, "session not cached");
        }
        self.screen.show_session(Some(&session));
        self.state.session = Some(session);
        self.fetch_and_fill();
        self.screen.toggle_inputs(true);
    }

    pub fn sign_in(&mut self, form: &LoginForm) -> bool {
        let (email, password) = view::read_login(form);
        if email.is_empty() || password.is_empty() {
            self.info(messages::EMPTY_LOGIN);
            return false;
        }
        match self.identity.sign_in(&email, &password) {
            Ok(session) => {
                self.authorize(session);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign in failed");
                self.error(&err.to_string());
                false
            }
        }
    }

    /// Reports every validation problem, not just the first.
    pub fn validate_registration(&mut self, form: &RegisterForm) -> bool {
        let mut ok = true;
        if !is_valid_email(&form.email) {
            self.error(messages::INVALID_EMAIL);
            ok = false;
        }
        if form.password1 != form.password2 {
            self.error(messages::PASSWORD_MISMATCH);
            ok = false;
        }
        if form.password1.chars().count() < MIN_PASSWORD_LEN {
            self.error(messages::SHORT_PASSWORD);
            ok = false;
        }
        ok
    }

    pub fn sign_up(&mut self, form: &RegisterForm) -> bool {
        let form = view::read_register(form);
        if !self.validate_registration(&form) {
            return false;
        }
        match self.identity.sign_up(&form.email, &form.password1) {
            Ok(session) => {
                self.authorize(session);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign up failed");
                self.error(&err.to_string());
                false
            }
        }
    }

    /// Ends the session everywhere and returns to the signed-out screen.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.state.session.as_ref() {
            if let Err(err) = self.identity.sign_out(session) {
                tracing::warn!(error = %err, "provider sign out failed");
            }
        }
        if let Err(err) = self.cache.clear() {
            tracing::warn!(error = %err, "cached session not cleared");
            self.error(messages::OOPS);
        }
        self.state.reset();
        self.screen = Screen {
            period: Some(self.state.period),
            ..Screen::default()
        };
    }

    /// `false`, with a notice asking to sign in, when there is no session.
    pub fn ensure_signed_in(&mut self) -> bool {
        self.user_id().is_some()
    }

    fn user_id(&mut self) -> Option<String> {
        match self.state.session.as_ref() {
            Some(s) => Some(s.user_id.clone()),
            None => {
                self.info(messages::NOT_SIGNED_IN);
                None
            }
        }
    }

    fn fetch(&self, user_id: &str, period: Period) -> Result<Fetched, crate::error::StoreError> {
        let expenses = self.store.query(user_id, RecordType::Expense, period)?;
        let incomes = self.store.query(user_id, RecordType::Income, period)?;
        Ok(Fetched {
            period,
            incomes,
            expenses,
        })
    }

    /// Loads both collections for the displayed period. Nothing changes
    /// unless both queries succeed.
    pub fn fetch_and_fill(&mut self) {
        let Some(user_id) = self.user_id() else {
            return;
        };
        let period = self.state.period;
        match self.fetch(&user_id, period) {
            Ok(fetched) => {
                if !self.state.apply_fetch(fetched) {
                    tracing::debug!(%period, "stale fetch dropped");
                    return;
                }
                self.screen
                    .fill_list(RecordType::Expense, &self.state.expenses, false);
                self.screen
                    .fill_list(RecordType::Income, &self.state.incomes, false);
                self.refresh_budget_and_charts();
            }
            Err(err) => {
                tracing::warn!(error = %err, %period, "fetch failed");
                self.error(messages::FETCH_FAILED);
            }
        }
    }

    pub fn show_period(&mut self, period: Period) {
        self.state.navigate(period);
        self.screen.period = Some(period);
        self.fetch_and_fill();
    }

    pub fn add_record(&mut self, input: &RawInput) -> Option<RecordRef> {
        let user_id = self.user_id()?;
        let draft = match view::read_draft(input) {
            Some(d) if d.value > MAX_AMOUNT => {
                self.info(messages::AMOUNT_TOO_LARGE);
                return None;
            }
            Some(d) if d.is_valid() => d,
            _ => {
                self.info(messages::EMPTY_NEW_ITEM);
                return None;
            }
        };
        match self.store.create(&draft, &user_id) {
            Ok(record) => {
                let reference = record.reference();
                if self.state.apply_created(record.clone()) {
                    self.screen.add_to_list(&record);
                    self.refresh_budget_and_charts();
                } else {
                    tracing::debug!(%reference, "record saved outside displayed period");
                }
                self.screen.clear_fields();
                Some(reference)
            }
            Err(err) => {
                tracing::warn!(error = %err, "create failed");
                self.error(messages::ADD_FAILED);
                None
            }
        }
    }

    pub fn delete_record(&mut self, reference: RecordRef) -> bool {
        let Some(user_id) = self.user_id() else {
            return false;
        };
        match self
            .store
            .delete(&user_id, reference.record_type, reference.id)
        {
            Ok(()) => {
                self.state
                    .apply_deleted(reference.record_type, reference.id);
                self.screen.remove_from_list(&reference.to_string());
                self.refresh_budget_and_charts();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, %reference, "delete failed");
                self.error(messages::DELETE_FAILED);
                false
            }
        }
    }

    pub fn recompute_totals(&self) -> Result<Totals, AggregateError> {
        self.state.totals()
    }

    pub fn recompute_chart_series(&self) -> Result<ChartData, AggregateError> {
        self.state.chart()
    }

    fn totals_out_of_range(&mut self, err: AggregateError) {
        tracing::warn!(error = %err, period = %self.state.period, "totals not computed");
        self.screen.clear_budget();
        self.error(messages::TOTALS_OUT_OF_RANGE);
    }

    fn refresh_budget_and_charts(&mut self) {
        let refreshed = self
            .recompute_totals()
            .and_then(|t| self.recompute_chart_series().map(|c| (t, c)));
        match refreshed {
            Ok((totals, chart)) => {
                self.screen.fill_budget(&totals);
                self.screen.render_chart(self.state.period, chart);
            }
            Err(err) => self.totals_out_of_range(err),
        }
    }

    pub fn render_chart(&mut self, style: ChartStyle) {
        self.screen.set_chart_style(style);
        match self.recompute_chart_series() {
            Ok(chart) => self.screen.render_chart(self.state.period, chart),
            Err(err) => self.totals_out_of_range(err),
        }
    }

    /// Renders a filtered copy of one collection. The canonical collection
    /// is left as is.
    pub fn filter_list(&mut self, record_type: RecordType, raw: &RawFilter) -> bool {
        let params = view::read_filter(raw);
        if params.is_empty() {
            self.info(messages::EMPTY_FILTER);
            return false;
        }
        let filtered = filters::apply(self.state.records(record_type), &params);
        self.screen.fill_list(record_type, &filtered, true);
        true
    }

    pub fn reset_filters(&mut self, record_type: RecordType) {
        self.screen
            .fill_list(record_type, self.state.records(record_type), false);
    }
}
