// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::Cell;

use budgetly::auth::{SessionCache, SettingsSessionCache, SqliteIdentity};
use budgetly::controller::{BudgetController, messages};
use budgetly::db;
use budgetly::error::StoreError;
use budgetly::models::{Period, Record, RecordDraft, RecordRef, RecordType, Session};
use budgetly::notify::Severity;
use budgetly::store::{RecordStore, SqliteStore};
use budgetly::view::{LoginForm, RawFilter, RawInput, RegisterForm};
use rusqlite::Connection;
use rust_decimal::Decimal;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

/// SQLite store that counts calls and can be switched offline.
struct Switchable<'c> {
    inner: SqliteStore<'c>,
    offline: Cell<bool>,
    creates: Cell<usize>,
    deletes: Cell<usize>,
}

impl<'c> Switchable<'c> {
    fn new(conn: &'c Connection) -> Self {
        Self {
            inner: SqliteStore::new(conn),
            offline: Cell::new(false),
            creates: Cell::new(0),
            deletes: Cell::new(0),
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.offline.get() {
            Err(StoreError::Connectivity("offline".into()))
        } else {
            Ok(())
        }
    }
}

impl RecordStore for Switchable<'_> {
    fn create(&self, draft: &RecordDraft, user_id: &str) -> Result<Record, StoreError> {
        self.creates.set(self.creates.get() + 1);
        self.check()?;
        self.inner.create(draft, user_id)
    }

    fn query(
        &self,
        user_id: &str,
        record_type: RecordType,
        period: Period,
    ) -> Result<Vec<Record>, StoreError> {
        self.check()?;
        self.inner.query(user_id, record_type, period)
    }

    fn delete(&self, user_id: &str, record_type: RecordType, id: i64) -> Result<(), StoreError> {
        self.deletes.set(self.deletes.get() + 1);
        self.check()?;
        self.inner.delete(user_id, record_type, id)
    }
}

fn may() -> Period {
    Period::new(5, 2025).unwrap()
}

fn register() -> RegisterForm {
    RegisterForm {
        email: "ana@example.com".into(),
        password1: "secret1".into(),
        password2: "secret1".into(),
    }
}

fn input(kind: &str, description: &str, value: &str, date: &str) -> RawInput {
    RawInput {
        record_type: kind.into(),
        description: description.into(),
        value: value.into(),
        date: date.into(),
        expense_type: String::new(),
    }
}

fn errors(ctl: &BudgetController<'_>) -> usize {
    ctl.notices()
        .active()
        .iter()
        .filter(|n| n.severity == Severity::Error)
        .count()
}

#[test]
fn add_records_updates_totals_and_screen() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());

    assert!(ctl.sign_up(&register()));
    assert!(ctl.screen().inputs_enabled);

    let inc = ctl
        .add_record(&input("income", "  salary ", "100", "2025-05-10"))
        .unwrap();
    assert_eq!(inc.record_type, RecordType::Income);
    let mut exp_in = input("expense", "rent", "40", "2025-05-11");
    exp_in.expense_type = "housing".into();
    ctl.add_record(&exp_in).unwrap();

    assert_eq!(ctl.state().incomes.len(), 1);
    assert_eq!(ctl.state().incomes[0].description, "salary");
    assert_eq!(ctl.state().expenses.len(), 1);

    let labels = ctl.screen().labels.clone().unwrap();
    assert_eq!(labels.income, "+ 100.00");
    assert_eq!(labels.expenses, "- 40.00");
    assert_eq!(labels.percentage, "40%");
    assert_eq!(labels.budget, "+ 60.00");
    assert!(ctl.screen().inputs_cleared);
    assert_eq!(ctl.screen().expenses.items[0].category, "Housing");

    let chart = ctl.screen().chart.clone().unwrap();
    assert_eq!(chart.incomes_by_day[9], Decimal::from(100));
    assert_eq!(chart.expenses_by_category[1], Decimal::from(40));
    assert!(ctl.notices().is_empty());
}

#[test]
fn invalid_input_never_reaches_the_store() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));

    for bad in [
        input("income", "   ", "10", "2025-05-01"),
        input("income", "gift", "0", "2025-05-01"),
        input("income", "gift", "-5", "2025-05-01"),
        input("expense", "lunch", "abc", "2025-05-01"),
        input("expense", "lunch", "", "2025-05-01"),
    ] {
        assert!(ctl.add_record(&bad).is_none());
    }

    assert_eq!(store.creates.get(), 0);
    assert!(ctl.state().incomes.is_empty());
    assert!(ctl.state().expenses.is_empty());
    assert!(!ctl.screen().inputs_cleared);
    let notes = ctl.notices().active();
    assert_eq!(notes.len(), 5);
    assert!(notes
        .iter()
        .all(|n| n.severity == Severity::Info && n.text == messages::EMPTY_NEW_ITEM));
}

#[test]
fn record_outside_displayed_period_is_saved_but_not_shown() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));

    let reference = ctl
        .add_record(&input("income", "june pay", "10", "2025-06-02"))
        .unwrap();
    assert!(ctl.state().incomes.is_empty());
    assert!(ctl.screen().inputs_cleared);

    ctl.show_period(Period::new(6, 2025).unwrap());
    assert_eq!(ctl.state().incomes.len(), 1);
    assert_eq!(ctl.state().incomes[0].reference(), reference);
}

#[test]
fn deleting_missing_record_reports_once_and_keeps_state() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    ctl.add_record(&input("expense", "coffee", "3.50", "2025-05-03"))
        .unwrap();
    let before = ctl.state().expenses.clone();

    let ok = ctl.delete_record(RecordRef {
        record_type: RecordType::Expense,
        id: 9999,
    });
    assert!(!ok);
    assert_eq!(ctl.state().expenses, before);
    assert_eq!(ctl.notices().active().len(), 1);
    assert_eq!(errors(&ctl), 1);
    assert_eq!(ctl.notices().active()[0].text, messages::DELETE_FAILED);
}

#[test]
fn deleting_record_removes_it_everywhere() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    let r = ctl
        .add_record(&input("expense", "coffee", "3.50", "2025-05-03"))
        .unwrap();
    ctl.add_record(&input("income", "pay", "10", "2025-05-03"))
        .unwrap();

    assert!(ctl.delete_record(r));
    assert!(ctl.state().expenses.is_empty());
    assert!(ctl.screen().expenses.items.is_empty());
    assert_eq!(ctl.screen().labels.clone().unwrap().expenses, "- 0.00");
    assert_eq!(ctl.screen().labels.clone().unwrap().percentage, "0%");
    assert_eq!(store.deletes.get(), 1);
}

#[test]
fn store_failures_leave_state_untouched() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    let r = ctl
        .add_record(&input("income", "pay", "10", "2025-05-03"))
        .unwrap();
    let incomes = ctl.state().incomes.clone();

    store.offline.set(true);
    ctl.fetch_and_fill();
    assert!(ctl.add_record(&input("income", "more", "5", "2025-05-04")).is_none());
    assert!(!ctl.delete_record(r));
    ctl.show_period(Period::new(4, 2025).unwrap());

    assert_eq!(ctl.state().incomes, incomes);
    assert_eq!(errors(&ctl), 4);
    let texts: Vec<&str> = ctl
        .notices()
        .active()
        .iter()
        .map(|n| n.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec![
            messages::FETCH_FAILED,
            messages::ADD_FAILED,
            messages::DELETE_FAILED,
            messages::FETCH_FAILED
        ]
    );
}

#[test]
fn filtering_works_on_a_copy() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    for (d, v) in [("rent", "900"), ("bread", "2"), ("cinema", "15")] {
        ctl.add_record(&input("expense", d, v, "2025-05-05")).unwrap();
    }
    let canonical = ctl.state().expenses.clone();

    assert!(!ctl.filter_list(RecordType::Expense, &RawFilter::default()));
    assert_eq!(ctl.notices().active()[0].text, messages::EMPTY_FILTER);

    let raw = RawFilter {
        min: "10".into(),
        max: String::new(),
        order: "desc".into(),
    };
    assert!(ctl.filter_list(RecordType::Expense, &raw));
    let shown: Vec<&str> = ctl
        .screen()
        .expenses
        .items
        .iter()
        .map(|i| i.description.as_str())
        .collect();
    assert_eq!(shown, vec!["cinema", "rent"]);
    assert!(ctl.screen().expenses.filtered);
    assert_eq!(ctl.state().expenses, canonical);

    ctl.reset_filters(RecordType::Expense);
    assert_eq!(ctl.screen().expenses.items.len(), 3);
    assert!(!ctl.screen().expenses.filtered);
}

#[test]
fn session_is_cached_restored_and_cleared() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    {
        let mut ctl = BudgetController::new(&store, &identity, &cache, may());
        assert!(ctl.sign_up(&register()));
        ctl.add_record(&input("income", "pay", "10", "2025-05-03"))
            .unwrap();
    }
    let cached: Session = cache.load().unwrap().unwrap();
    assert_eq!(cached.email, "ana@example.com");

    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    ctl.initialize();
    assert_eq!(ctl.session(), Some(&cached));
    assert_eq!(ctl.state().incomes.len(), 1);
    assert!(ctl.screen().inputs_enabled);
    assert_eq!(ctl.screen().signed_in_as.as_deref(), Some("ana@example.com"));

    ctl.sign_out();
    assert!(ctl.session().is_none());
    assert!(ctl.state().incomes.is_empty());
    assert!(!ctl.screen().inputs_enabled);
    assert!(cache.load().unwrap().is_none());

    let mut again = BudgetController::new(&store, &identity, &cache, may());
    again.initialize();
    assert!(again.session().is_none());
    assert!(!again.screen().inputs_enabled);
}

#[test]
fn registration_reports_every_problem() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());

    let form = RegisterForm {
        email: "not-an-email".into(),
        password1: "abc".into(),
        password2: "abd".into(),
    };
    assert!(!ctl.sign_up(&form));
    let texts: Vec<&str> = ctl
        .notices()
        .active()
        .iter()
        .map(|n| n.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec![
            messages::INVALID_EMAIL,
            messages::PASSWORD_MISMATCH,
            messages::SHORT_PASSWORD
        ]
    );
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users", [], |r| r.get(0))
        .unwrap();
    assert_eq!(users, 0);
}

#[test]
fn sign_in_failure_surfaces_provider_message() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    ctl.sign_out();

    let wrong = LoginForm {
        email: "ana@example.com".into(),
        password: "nope123".into(),
    };
    assert!(!ctl.sign_in(&wrong));
    assert_eq!(
        ctl.notices().active()[0].text,
        "There is no user with this email and password."
    );
    assert!(ctl.session().is_none());

    let right = LoginForm {
        email: " ana@example.com ".into(),
        password: "secret1".into(),
    };
    assert!(ctl.sign_in(&right));
    assert!(ctl.session().is_some());
}

#[test]
fn actions_without_session_ask_to_sign_in() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    ctl.initialize();

    assert!(ctl.add_record(&input("income", "pay", "10", "2025-05-03")).is_none());
    assert_eq!(store.creates.get(), 0);
    assert_eq!(ctl.notices().active()[0].text, messages::NOT_SIGNED_IN);
}

#[test]
fn amount_above_limit_is_rejected_before_saving() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));

    let huge = input("income", "jackpot", "50000000000000000000000000000", "2025-05-03");
    assert!(ctl.add_record(&huge).is_none());
    assert_eq!(store.creates.get(), 0);
    assert_eq!(ctl.notices().active()[0].text, messages::AMOUNT_TOO_LARGE);

    let at_limit = input("income", "jackpot", "1000000000000", "2025-05-03");
    assert!(ctl.add_record(&at_limit).is_some());
    assert_eq!(store.creates.get(), 1);
}

#[test]
fn stored_totals_out_of_range_show_placeholders() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    let user = ctl.session().unwrap().user_id.clone();

    // written straight to the store, past the input limit
    let draft = RecordDraft {
        kind: budgetly::models::RecordKind::Income,
        description: "legacy".into(),
        value: "50000000000000000000000000000".parse().unwrap(),
        date: chrono::NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
    };
    store.inner.create(&draft, &user).unwrap();
    store.inner.create(&draft, &user).unwrap();

    ctl.fetch_and_fill();
    assert_eq!(ctl.state().incomes.len(), 2);
    let labels = ctl.screen().labels.clone().unwrap();
    assert_eq!(labels.budget, "---");
    assert_eq!(labels.income, "---");
    assert_eq!(labels.percentage, "---");
    assert!(ctl.screen().chart.is_none());
    assert_eq!(errors(&ctl), 1);
    assert_eq!(ctl.notices().active()[0].text, messages::TOTALS_OUT_OF_RANGE);
    assert!(ctl.recompute_totals().is_err());
}

#[test]
fn signing_in_again_ends_the_previous_session() {
    let conn = setup();
    let store = Switchable::new(&conn);
    let identity = SqliteIdentity::new(&conn);
    let cache = SettingsSessionCache::new(&conn);
    let mut ctl = BudgetController::new(&store, &identity, &cache, may());
    assert!(ctl.sign_up(&register()));
    let first = ctl.session().unwrap().token.clone();

    let login = LoginForm {
        email: "ana@example.com".into(),
        password: "secret1".into(),
    };
    assert!(ctl.sign_in(&login));
    assert!(ctl.sign_in(&login));
    let last = ctl.session().unwrap().token.clone();
    assert_ne!(first, last);

    let open: Vec<String> = conn
        .prepare("SELECT token FROM sessions")
        .unwrap()
        .query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(open, vec![last.clone()]);
    assert_eq!(cache.load().unwrap().unwrap().token, last);
}
