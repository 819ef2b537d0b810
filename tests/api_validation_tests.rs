// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.
//!
//! Validation failures are detected before any database access, so these
//! run against the offline mock DB.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/register",
            json!({ "username": "bob" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "All fields required");
}

#[tokio::test]
async fn test_register_empty_fields_same_as_missing() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/register",
            json!({ "username": "bob", "email": "", "password": "pw123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "All fields required");
}

#[tokio::test]
async fn test_add_favorite_requires_place_id() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user123", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/favorites")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "place": { "name": "Cafe X" } }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "place_id required");
}

#[tokio::test]
async fn test_add_favorite_place_must_be_nested() {
    // The body nests the place under a `place` key; a top-level place_id
    // is not recognized.
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("user123", &state.config.jwt_signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/favorites")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "place_id": "p1", "name": "Cafe X" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
