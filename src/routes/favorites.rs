// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Favourites routes.
//!
//! Wire quirks fixed by the mobile client: the response field and the GET
//! path use the British spelling (`/favourites`), while the mutation paths
//! use `/favorites`, and the add body nests the place under a `place` key.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::PlaceRecord;
use crate::routes::profile::load_user;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/favourites", get(get_favourites))
        .route("/favorites", post(add_favorite))
        .route("/favorites/{place_id}", delete(remove_favorite))
}

/// Get the favourites collection (empty array if none).
async fn get_favourites(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<Vec<PlaceRecord>>> {
    let user = load_user(&state, &auth).await?;
    Ok(Json(user.favorites))
}

#[derive(Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default)]
    place: serde_json::Value,
}

/// Parse a raw provider place out of the request body.
///
/// Only `place_id` is validated; every other field is preserved verbatim.
fn parse_place(value: serde_json::Value) -> Result<PlaceRecord> {
    match value.get("place_id").and_then(|v| v.as_str()) {
        Some(id) if !id.is_empty() => {}
        _ => return Err(AppError::Validation("place_id required".to_string())),
    }

    serde_json::from_value(value)
        .map_err(|_| AppError::Validation("place_id required".to_string()))
}

/// Add a place to the favourites collection.
///
/// Idempotent: re-adding an existing `place_id` changes nothing and the
/// current collection is returned.
async fn add_favorite(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<Json<Vec<PlaceRecord>>> {
    let place = parse_place(req.place)?;

    let mut user = load_user(&state, &auth).await?;

    if user.add_favorite(place) {
        state.db.upsert_user(&user).await?;
        tracing::debug!(user_id = %user.id, count = user.favorites.len(), "Favourite added");
    }

    Ok(Json(user.favorites))
}

/// Remove a favourite by place id (no-op success if absent).
async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Path(place_id): Path<String>,
) -> Result<Json<Vec<PlaceRecord>>> {
    let mut user = load_user(&state, &auth).await?;

    if user.remove_favorite(&place_id) {
        state.db.upsert_user(&user).await?;
        tracing::debug!(user_id = %user.id, %place_id, "Favourite removed");
    }

    Ok(Json(user.favorites))
}
