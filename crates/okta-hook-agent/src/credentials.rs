// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Shipping credential extraction and validation from request headers.

use std::sync::OnceLock;

use hyper::http::HeaderMap;
use regex::Regex;
use thiserror::Error;

/// Header carrying the Logz.io shipping token.
pub const TOKEN_HEADER: &str = "logzio_token";
/// Header carrying the Logz.io account region code.
pub const REGION_HEADER: &str = "logzio_region";

const VALID_REGIONS: [&str; 7] = ["us", "au", "wa", "nl", "ca", "eu", "uk"];

static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

// Shipping tokens carry a run of 32 letters.
#[allow(clippy::expect_used)]
fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| Regex::new("[a-zA-Z]{32}").expect("token pattern is valid"))
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("logzio_token header not found")]
    MissingToken,
    #[error("logzio token is not valid")]
    InvalidToken,
    #[error("logzio_region header not found")]
    MissingRegion,
    #[error("logzio_region header value is not valid")]
    InvalidRegion,
}

/// Extracts and validates the shipping token and region from `headers`.
///
/// The region check is case-insensitive and the returned region is
/// lowercased, so validation always agrees with listener resolution.
pub fn credentials_from_headers(
    headers: &HeaderMap,
) -> Result<(String, String), ValidationError> {
    let token = headers
        .get(TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if token.is_empty() {
        return Err(ValidationError::MissingToken);
    }
    if !token_pattern().is_match(token) {
        return Err(ValidationError::InvalidToken);
    }

    let region = headers
        .get(REGION_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if region.is_empty() {
        return Err(ValidationError::MissingRegion);
    }
    let region = region.to_lowercase();
    if !VALID_REGIONS.contains(&region.as_str()) {
        return Err(ValidationError::InvalidRegion);
    }

    Ok((token.to_string(), region))
}
