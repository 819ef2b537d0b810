// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing with PBKDF2-HMAC-SHA256.
//!
//! Stored form is `iterations$salt_b64$hash_b64`. The iteration count is
//! embedded so it can be raised later without invalidating existing hashes.

use crate::error::AppError;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};
use std::num::NonZeroU32;

const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const HASH_LEN: usize = 32;

static ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;

/// Derive a storable hash from a cleartext password.
pub fn hash(password: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];
    SystemRandom::new()
        .fill(&mut salt)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to generate salt")))?;

    let mut derived = [0u8; HASH_LEN];
    pbkdf2::derive(
        ALGORITHM,
        NonZeroU32::new(ITERATIONS).expect("iteration count is non-zero"),
        &salt,
        password.as_bytes(),
        &mut derived,
    );

    Ok(format!(
        "{}${}${}",
        ITERATIONS,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(derived)
    ))
}

/// Verify a cleartext password against a stored hash.
///
/// Returns false on any malformed stored value rather than erroring; the
/// caller maps that to the same invalid-credentials response as a mismatch.
pub fn verify(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(iters), Some(salt_b64), Some(hash_b64)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    let Ok(iterations) = iters.parse::<u32>() else {
        return false;
    };
    let Some(iterations) = NonZeroU32::new(iterations) else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (
        URL_SAFE_NO_PAD.decode(salt_b64),
        URL_SAFE_NO_PAD.decode(hash_b64),
    ) else {
        return false;
    };

    // ring's verify is constant-time over the derived output
    pbkdf2::verify(ALGORITHM, iterations, &salt, password.as_bytes(), &expected).is_ok()
}
