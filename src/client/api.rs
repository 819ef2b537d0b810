// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the TravelBud API.
//!
//! Once a token is set it is attached as a Bearer header on every request.
//! Server failures carry the `{"error": "..."}` body; that message is
//! surfaced verbatim so the UI can show it inline next to the triggering
//! control.

use crate::models::{PlaceRecord, ProfilePatch, ProfileView};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::RwLock;

/// Client-side error type.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the request; contains its `error` message.
    #[error("{0}")]
    Api(String),

    /// The request never produced a server response.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// The server operations the session cache synchronizes against.
///
/// `ApiClient` is the real implementation; tests substitute a fake to drive
/// failure paths without a server.
#[allow(async_fn_in_trait)]
pub trait SyncApi {
    async fn fetch_profile(&self) -> Result<ProfileView, ClientError>;
    async fn fetch_favourites(&self) -> Result<Vec<PlaceRecord>, ClientError>;
    async fn push_profile(&self, patch: &ProfilePatch) -> Result<(), ClientError>;
    async fn push_preferences(&self, preferences: &[String]) -> Result<(), ClientError>;
    async fn push_favourite(&self, place: &PlaceRecord) -> Result<(), ClientError>;
    async fn delete_favourite(&self, place_id: &str) -> Result<(), ClientError>;
}

/// Successful login: the issued token plus the redacted user view.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: ProfileView,
}

#[derive(Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct PreferencesBody {
    #[allow(dead_code)]
    preferences: Vec<String>,
}

/// TravelBud API client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Set the bearer token attached to subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Discard the bearer token (logout).
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match self.token.read().expect("token lock poisoned").as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Decode a success body, or extract the server's `error` message.
    async fn check<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| format!("Request failed: {}", status));
        Err(ClientError::Api(message))
    }

    /// Create an account. Does not log in; call `login` afterwards.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/register")
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await?;

        let body: MessageBody = Self::check(response).await?;
        Ok(body.message)
    }

    /// Exchange credentials for a token and the current user view.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::check(response).await
    }
}

impl SyncApi for ApiClient {
    async fn fetch_profile(&self) -> Result<ProfileView, ClientError> {
        let response = self.request(reqwest::Method::GET, "/profile").send().await?;
        Self::check(response).await
    }

    async fn fetch_favourites(&self) -> Result<Vec<PlaceRecord>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/favourites")
            .send()
            .await?;
        Self::check(response).await
    }

    async fn push_profile(&self, patch: &ProfilePatch) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, "/profile")
            .json(patch)
            .send()
            .await?;
        let _: ProfileView = Self::check(response).await?;
        Ok(())
    }

    async fn push_preferences(&self, preferences: &[String]) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::PATCH, "/preferences")
            .json(&serde_json::json!({ "preferences": preferences }))
            .send()
            .await?;
        let _: PreferencesBody = Self::check(response).await?;
        Ok(())
    }

    async fn push_favourite(&self, place: &PlaceRecord) -> Result<(), ClientError> {
        // The add body nests the place under a `place` key
        let response = self
            .request(reqwest::Method::POST, "/favorites")
            .json(&serde_json::json!({ "place": place }))
            .send()
            .await?;
        let _: Vec<PlaceRecord> = Self::check(response).await?;
        Ok(())
    }

    async fn delete_favourite(&self, place_id: &str) -> Result<(), ClientError> {
        let path = format!("/favorites/{}", urlencoding::encode(place_id));
        let response = self.request(reqwest::Method::DELETE, &path).send().await?;
        let _: Vec<PlaceRecord> = Self::check(response).await?;
        Ok(())
    }
}
