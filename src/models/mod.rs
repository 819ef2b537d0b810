// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod place;
pub mod user;

pub use place::PlaceRecord;
pub use user::{ProfilePatch, ProfileView, User};
