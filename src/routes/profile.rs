// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile and preferences routes.

use axum::{
    extract::State,
    routing::{get, patch},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{ProfilePatch, ProfileView, User};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/profile", get(get_profile).patch(patch_profile))
        .route("/preferences", patch(patch_preferences))
}

/// Load the authenticated user's document.
///
/// A valid token whose user no longer exists is reported as an invalid
/// token, not a not-found, so callers learn nothing about account state.
pub(crate) async fn load_user(state: &AppState, auth: &AuthUser) -> Result<User> {
    state
        .db
        .get_user(&auth.user_id)
        .await?
        .ok_or(AppError::InvalidToken)
}

/// Get the current user's redacted profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileView>> {
    let user = load_user(&state, &user).await?;
    Ok(Json(user.profile_view()))
}

/// Patch profile fields.
///
/// Only fields present and non-falsy in the body are applied; `interests`
/// replaces the preferences list the same way PATCH /preferences does.
async fn patch_profile(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<ProfilePatch>,
) -> Result<Json<ProfileView>> {
    let mut user = load_user(&state, &auth).await?;

    user.apply_patch(&req);
    state.db.upsert_user(&user).await?;

    tracing::debug!(user_id = %user.id, "Profile updated");

    Ok(Json(user.profile_view()))
}

#[derive(Deserialize)]
pub struct PreferencesRequest {
    preferences: Vec<String>,
}

#[derive(Serialize)]
pub struct PreferencesResponse {
    pub preferences: Vec<String>,
}

/// Replace the preferences list wholesale.
///
/// Not a merge: an empty list clears preferences. Tag values are accepted
/// as-is; the client owns toggling membership.
async fn patch_preferences(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<PreferencesRequest>,
) -> Result<Json<PreferencesResponse>> {
    let mut user = load_user(&state, &auth).await?;

    user.preferences = req.preferences;
    state.db.upsert_user(&user).await?;

    tracing::debug!(user_id = %user.id, count = user.preferences.len(), "Preferences replaced");

    Ok(Json(PreferencesResponse {
        preferences: user.preferences,
    }))
}
