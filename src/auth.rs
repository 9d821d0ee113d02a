// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Identity provider (email/password) and the local session cache.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, params};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::db;
use crate::error::AuthError;
use crate::models::Session;

/// Settings key the session is cached under.
pub const SESSION_KEY: &str = "auth_user";

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(([^<>()\[\]\.,;:\s@"]+(\.[^<>()\[\]\.,;:\s@"]+)*)|(".+"))@(([^<>()\[\]\.,;:\s@"]+\.)+[^<>()\[\]\.,;:\s@"]{2,})$"#,
    )
    .expect("email pattern is valid")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub trait IdentityProvider {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;
    fn sign_out(&self, session: &Session) -> Result<(), AuthError>;
}

pub struct SqliteIdentity<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteIdentity<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn open_session(&self, user_id: &str, email: &str) -> Result<Session, AuthError> {
        let token = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO sessions(token, user_id) VALUES (?1, ?2)",
            params![token, user_id],
        )?;
        Ok(Session {
            user_id: user_id.to_string(),
            email: email.to_string(),
            token,
        })
    }
}

/// Salted single-pass SHA-256. Enough for a local, single-user store; not
/// meant to protect real credentials.
fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl IdentityProvider for SqliteIdentity<'_> {
    fn sign_up(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let taken: Option<String> = self
            .conn
            .query_row("SELECT id FROM users WHERE email=?1", params![email], |r| {
                r.get(0)
            })
            .optional()?;
        if taken.is_some() {
            return Err(AuthError::EmailInUse);
        }
        let id = Uuid::new_v4().to_string();
        let salt = Uuid::new_v4().simple().to_string();
        self.conn.execute(
            "INSERT INTO users(id, email, salt, password_hash) VALUES (?1, ?2, ?3, ?4)",
            params![id, email, salt, digest(&salt, password)],
        )?;
        tracing::info!(user = %id, "user registered");
        self.open_session(&id, email)
    }

    fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let row: Option<(String, String, String, String)> = self
            .conn
            .query_row(
                "SELECT id, email, salt, password_hash FROM users WHERE email=?1",
                params![email],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;
        let (id, stored_email, salt, hash) = row.ok_or(AuthError::InvalidCredentials)?;
        if digest(&salt, password) != hash {
            return Err(AuthError::InvalidCredentials);
        }
        tracing::info!(user = %id, "user signed in");
        self.open_session(&id, &stored_email)
    }

    fn sign_out(&self, session: &Session) -> Result<(), AuthError> {
        let n = self.conn.execute(
            "DELETE FROM sessions WHERE token=?1 AND user_id=?2",
            params![session.token, session.user_id],
        )?;
        if n == 0 {
            return Err(AuthError::InvalidSession);
        }
        tracing::info!(user = %session.user_id, "user signed out");
        Ok(())
    }
}

/// Persisted session across runs, one serialized object under [`SESSION_KEY`].
pub trait SessionCache {
    fn load(&self) -> Result<Option<Session>>;
    fn save(&self, session: &Session) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

pub struct SettingsSessionCache<'c> {
    conn: &'c Connection,
}

impl<'c> SettingsSessionCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl SessionCache for SettingsSessionCache<'_> {
    fn load(&self) -> Result<Option<Session>> {
        match db::get_setting(self.conn, SESSION_KEY)? {
            Some(raw) => {
                let s: Session = serde_json::from_str(&raw)
                    .with_context(|| format!("Invalid cached session under '{}'", SESSION_KEY))?;
                Ok(Some(s))
            }
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        db::set_setting(self.conn, SESSION_KEY, &serde_json::to_string(session)?)
    }

    fn clear(&self) -> Result<()> {
        db::remove_setting(self.conn, SESSION_KEY)
    }
}
