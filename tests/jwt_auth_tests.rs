// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JWT authentication tests.
//!
//! These tests verify that tokens issued by `create_jwt` can be decoded by
//! the auth middleware, catching compatibility issues early.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use travelbud::middleware::auth::{create_jwt, Claims, TOKEN_TTL_SECS};

const SIGNING_KEY: &[u8] = b"test_signing_key_32_bytes_long!!";

#[test]
fn test_jwt_roundtrip() {
    // A token created by the login flow must decode with the same Claims
    // structure and algorithm the middleware uses.
    let token = create_jwt("user123", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "user123");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_jwt_rejects_wrong_key() {
    let token = create_jwt("user123", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(b"a_different_signing_key_entirely");
    let validation = Validation::new(Algorithm::HS256);

    assert!(decode::<Claims>(&token, &key, &validation).is_err());
}

#[test]
fn test_jwt_expiration_is_seven_days() {
    use std::time::{SystemTime, UNIX_EPOCH};

    let token = create_jwt("user123", SIGNING_KEY).unwrap();

    let key = DecodingKey::from_secret(SIGNING_KEY);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // checked manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;

    // Expiry is 7 days out, allowing a little slack for test runtime
    assert!(token_data.claims.exp > now + TOKEN_TTL_SECS - 60);
    assert!(token_data.claims.exp <= now + TOKEN_TTL_SECS + 60);
}
