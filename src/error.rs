// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Any failure from the record store. The controller treats every variant the
/// same way: a notification and untouched state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Connectivity(String),
    #[error("permission denied: {0}")]
    Permission(String),
    #[error("{0} not found")]
    NotFound(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Connectivity(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("There is no user with this email and password.")]
    InvalidCredentials,
    #[error("The email address is already in use by another account.")]
    EmailInUse,
    #[error("Session is no longer valid.")]
    InvalidSession,
    #[error("Authentication service unavailable: {0}")]
    Unavailable(String),
}

impl From<rusqlite::Error> for AuthError {
    fn from(err: rusqlite::Error) -> Self {
        AuthError::Unavailable(err.to_string())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown record type '{0}', expected income|expense")]
    RecordType(String),
    #[error("Unknown expense category '{0}'")]
    Category(String),
    #[error("Invalid record reference '{0}', expected <incomes|expenses>-<id>")]
    RecordRef(String),
    #[error("Invalid period '{0}'")]
    Period(String),
    #[error("Unknown order '{0}', expected desc|-desc|value|-value")]
    Order(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Amounts add up past the representable range")]
    Overflow,
}
