// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod controller;
pub mod db;
pub mod error;
pub mod filters;
pub mod models;
pub mod notify;
pub mod state;
pub mod store;
pub mod utils;
pub mod view;
