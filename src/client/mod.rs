// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mobile-side client library.
//!
//! Mirrors the layering of the app shell: a thin HTTP client (`api`), the
//! session-scoped state cache with optimistic mutation (`session`), the
//! device key-value storage boundary (`storage`), and the external places
//! provider (`places`). Presentation code talks to `UserSession` only.

pub mod api;
pub mod places;
pub mod session;
pub mod storage;

pub use api::{ApiClient, ClientError, LoginOutcome, SyncApi};
pub use places::{LatLng, PlacesClient};
pub use session::{MutationState, SyncStates, UserSession};
pub use storage::{KeyValueStore, MemoryStore, DARK_MODE_KEY, TOKEN_KEY};
