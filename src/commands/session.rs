// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rusqlite::Connection;

use super::Backend;
use crate::auth::SessionCache;
use crate::models::Period;
use crate::utils::print_notifications;
use crate::view::{LoginForm, RegisterForm};

pub fn signup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let form = RegisterForm {
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        password1: sub.get_one::<String>("password").cloned().unwrap_or_default(),
        password2: sub.get_one::<String>("confirm").cloned().unwrap_or_default(),
    };
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(Period::current());
    if ctl.sign_up(&form) {
        if let Some(s) = ctl.session() {
            println!("Registered and signed in as {}", s.email);
        }
    }
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

pub fn signin(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let form = LoginForm {
        email: sub.get_one::<String>("email").cloned().unwrap_or_default(),
        password: sub.get_one::<String>("password").cloned().unwrap_or_default(),
    };
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(Period::current());
    if ctl.sign_in(&form) {
        if let Some(s) = ctl.session() {
            println!("Signed in as {}", s.email);
        }
    }
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

pub fn signout(conn: &Connection) -> Result<()> {
    let backend = Backend::new(conn);
    let mut ctl = backend.controller(Period::current());
    if ctl.session().is_none() {
        println!("Not signed in");
        return Ok(());
    }
    ctl.sign_out();
    println!("Signed out");
    print_notifications(&ctl.notices_mut().drain());
    Ok(())
}

pub fn whoami(conn: &Connection) -> Result<()> {
    let backend = Backend::new(conn);
    match backend.cache.load()? {
        Some(s) => println!("{} ({})", s.email, s.user_id),
        None => println!("Not signed in"),
    }
    Ok(())
}
