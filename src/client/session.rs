// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session-scoped user state cache.
//!
//! Constructed when an authenticated identity is acquired and torn down on
//! logout; presentation code holds a reference to it rather than a global.
//!
//! Mutation policies:
//! - Profile fields (`username`, `profile_pic`, `interests`) are optimistic
//!   with rollback: the local value changes immediately, and a failed push
//!   restores the previous value and re-surfaces the error.
//! - Favourites always await the server before the mutation is confirmed to
//!   the caller; a failed call rolls the local list back.
//! - `dark_mode` is local UI state, persisted on-device only. It is never
//!   sent to the server and survives logout.

use crate::client::api::{ApiClient, ClientError, SyncApi};
use crate::client::storage::{KeyValueStore, DARK_MODE_KEY, TOKEN_KEY};
use crate::models::{PlaceRecord, ProfilePatch, ProfileView};

/// Lifecycle of the most recent mutation of a synced field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Committed,
    Reverted,
}

/// Per-field mutation states, exposed for UI affordances (spinners, undo
/// toasts) and asserted on in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncStates {
    pub username: MutationState,
    pub profile_pic: MutationState,
    pub interests: MutationState,
    pub favourites: MutationState,
}

/// The client's mirror of server-held profile and favourites state.
pub struct UserSession<A: SyncApi, S: KeyValueStore> {
    api: A,
    store: S,
    pub username: String,
    pub profile_pic: String,
    pub interests: Vec<String>,
    pub favourites: Vec<PlaceRecord>,
    dark_mode: bool,
    pub sync: SyncStates,
}

impl<A: SyncApi, S: KeyValueStore> UserSession<A, S> {
    /// Build a session and populate it from the server.
    ///
    /// A failed profile fetch leaves the defaults in place; a failed
    /// favourites fetch resets the list to empty. Neither is retried.
    pub async fn start(api: A, store: S) -> Self {
        let mut session = Self::empty(api, store);
        session.refresh().await;
        session
    }

    fn empty(api: A, store: S) -> Self {
        let dark_mode = store.get(DARK_MODE_KEY).as_deref() == Some("true");
        Self {
            api,
            store,
            username: String::new(),
            profile_pic: String::new(),
            interests: Vec::new(),
            favourites: Vec::new(),
            dark_mode,
            sync: SyncStates::default(),
        }
    }

    fn populate(&mut self, view: ProfileView) {
        self.username = view.username;
        self.profile_pic = view.profile_pic;
        self.interests = view.preferences;
        self.favourites = view.favourites;
    }

    /// Re-fetch profile and favourites from the server.
    pub async fn refresh(&mut self) {
        match self.api.fetch_profile().await {
            Ok(view) => self.populate(view),
            Err(err) => {
                tracing::warn!(error = %err, "Profile fetch failed, keeping defaults");
            }
        }

        match self.api.fetch_favourites().await {
            Ok(favourites) => self.favourites = favourites,
            Err(err) => {
                // Deliberately lossy: an empty list beats stale favourites
                tracing::warn!(error = %err, "Favourites fetch failed, resetting to empty");
                self.favourites.clear();
            }
        }
    }

    /// Rename the user (optimistic, rolls back on failure).
    ///
    /// An empty value is a no-op without a network call: the server treats
    /// falsy patch fields as absent, so applying it locally would diverge
    /// from canonical state.
    pub async fn set_username(&mut self, username: impl Into<String>) -> Result<(), ClientError> {
        let username = username.into();
        if username.is_empty() {
            return Ok(());
        }
        let previous = std::mem::replace(&mut self.username, username.clone());
        self.sync.username = MutationState::Pending;

        let patch = ProfilePatch {
            username: Some(username),
            ..Default::default()
        };
        match self.api.push_profile(&patch).await {
            Ok(()) => {
                self.sync.username = MutationState::Committed;
                Ok(())
            }
            Err(err) => {
                self.username = previous;
                self.sync.username = MutationState::Reverted;
                Err(err)
            }
        }
    }

    /// Change the profile picture URL (optimistic, rolls back on failure).
    /// Empty values are a no-op, matching the server's falsy-is-absent rule.
    pub async fn set_profile_pic(&mut self, url: impl Into<String>) -> Result<(), ClientError> {
        let url = url.into();
        if url.is_empty() {
            return Ok(());
        }
        let previous = std::mem::replace(&mut self.profile_pic, url.clone());
        self.sync.profile_pic = MutationState::Pending;

        let patch = ProfilePatch {
            profile_pic: Some(url),
            ..Default::default()
        };
        match self.api.push_profile(&patch).await {
            Ok(()) => {
                self.sync.profile_pic = MutationState::Committed;
                Ok(())
            }
            Err(err) => {
                self.profile_pic = previous;
                self.sync.profile_pic = MutationState::Reverted;
                Err(err)
            }
        }
    }

    /// Replace the interests list (optimistic, rolls back on failure).
    ///
    /// Goes through PATCH /preferences so an empty list genuinely clears.
    pub async fn set_interests(&mut self, interests: Vec<String>) -> Result<(), ClientError> {
        let previous = std::mem::replace(&mut self.interests, interests);
        self.sync.interests = MutationState::Pending;

        match self.api.push_preferences(&self.interests).await {
            Ok(()) => {
                self.sync.interests = MutationState::Committed;
                Ok(())
            }
            Err(err) => {
                self.interests = previous;
                self.sync.interests = MutationState::Reverted;
                Err(err)
            }
        }
    }

    /// Toggle membership of one interest tag. The server never de-dupes
    /// preferences; membership is the client's job.
    pub async fn toggle_interest(&mut self, tag: &str) -> Result<(), ClientError> {
        let mut next = self.interests.clone();
        match next.iter().position(|t| t == tag) {
            Some(idx) => {
                next.remove(idx);
            }
            None => next.push(tag.to_string()),
        }
        self.set_interests(next).await
    }

    /// Add a favourite place.
    ///
    /// No-op (and no network call) if the place is already favourited
    /// locally; otherwise the server is awaited and a failure rolls the
    /// local list back.
    pub async fn add_favourite(&mut self, place: PlaceRecord) -> Result<(), ClientError> {
        if self
            .favourites
            .iter()
            .any(|f| f.place_id == place.place_id)
        {
            return Ok(());
        }

        self.favourites.push(place.clone());
        self.sync.favourites = MutationState::Pending;

        match self.api.push_favourite(&place).await {
            Ok(()) => {
                self.sync.favourites = MutationState::Committed;
                Ok(())
            }
            Err(err) => {
                self.favourites.retain(|f| f.place_id != place.place_id);
                self.sync.favourites = MutationState::Reverted;
                Err(err)
            }
        }
    }

    /// Remove a favourite by place id. No-op without a network call if the
    /// id is absent locally; on server failure the entry is restored at its
    /// previous position.
    pub async fn remove_favourite(&mut self, place_id: &str) -> Result<(), ClientError> {
        let Some(index) = self.favourites.iter().position(|f| f.place_id == place_id) else {
            return Ok(());
        };

        let removed = self.favourites.remove(index);
        self.sync.favourites = MutationState::Pending;

        match self.api.delete_favourite(place_id).await {
            Ok(()) => {
                self.sync.favourites = MutationState::Committed;
                Ok(())
            }
            Err(err) => {
                self.favourites.insert(index, removed);
                self.sync.favourites = MutationState::Reverted;
                Err(err)
            }
        }
    }

    /// Whether a place is currently favourited.
    pub fn is_favourite(&self, place_id: &str) -> bool {
        self.favourites.iter().any(|f| f.place_id == place_id)
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip dark mode. Persisted on-device, never synced.
    pub fn set_dark_mode(&mut self, on: bool) {
        self.dark_mode = on;
        self.store
            .set(DARK_MODE_KEY, if on { "true" } else { "false" });
    }

    /// Tear down the session: clear synced state and the stored token.
    /// `dark_mode` is exempt, it is not part of the sync contract.
    pub fn logout(&mut self) {
        self.store.remove(TOKEN_KEY);
        self.username.clear();
        self.profile_pic.clear();
        self.interests.clear();
        self.favourites.clear();
        self.sync = SyncStates::default();
    }
}

impl<S: KeyValueStore> UserSession<ApiClient, S> {
    /// Log in and build a session seeded from the login response.
    ///
    /// The issued token is installed on the client and persisted so a later
    /// launch can `resume`.
    pub async fn login(
        api: ApiClient,
        store: S,
        email: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        let outcome = api.login(email, password).await?;
        api.set_token(outcome.token.clone());
        store.set(TOKEN_KEY, &outcome.token);

        let mut session = Self::empty(api, store);
        session.populate(outcome.user);
        Ok(session)
    }

    /// Resume a session from a previously persisted token, if any.
    pub async fn resume(api: ApiClient, store: S) -> Option<Self> {
        let token = store.get(TOKEN_KEY)?;
        api.set_token(token);
        Some(Self::start(api, store).await)
    }
}
