// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration and login routes.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::db::firestore::new_user_id;
use crate::error::{AppError, Result};
use crate::middleware::auth::create_jwt;
use crate::models::{ProfileView, User};
use crate::services::password;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Registration request body.
///
/// Fields default to empty so that absent and empty values fail validation
/// the same way (400, not a body-rejection error).
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    password: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// Create a new account.
///
/// Registration does not issue a token; the client performs an explicit
/// login afterwards.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>> {
    if req.validate().is_err() {
        return Err(AppError::Validation("All fields required".to_string()));
    }

    // Duplicate check happens before any write; email matching is exact and
    // case-sensitive.
    if state.db.get_user_by_email(&req.email).await?.is_some() {
        return Err(AppError::DuplicateEmail);
    }

    let password_hash = password::hash(&req.password)?;
    let user = User::new(new_user_id()?, req.username, req.email, password_hash);

    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(Json(RegisterResponse {
        message: "Registration successful".to_string(),
    }))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: ProfileView,
}

/// Log in with email and password.
///
/// Unknown email and wrong password produce the identical response so the
/// caller cannot tell which check failed.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = state
        .db
        .get_user_by_email(&req.email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !password::verify(&req.password, &user.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let token = create_jwt(&user.id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: user.profile_view(),
    }))
}
