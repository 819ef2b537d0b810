// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TravelBud: backend API and sync client for a travel companion app.
//!
//! The server half exposes user accounts, profile preferences, and a
//! favourites list over HTTP. The `client` module is the mobile-side
//! counterpart: a session-scoped cache that keeps local state consistent
//! with the server under optimistic edits and network failure.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
}
