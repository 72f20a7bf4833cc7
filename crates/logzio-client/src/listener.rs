// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Region code to bulk listener URL resolution.

const US_LISTENER_URL: &str = "https://listener.logz.io:8071";

/// Resolves a Logz.io region code to its bulk listener base URL.
///
/// Region codes are matched case-insensitively. Unrecognized or empty codes
/// fall back to the `us` listener rather than failing, so resolution is
/// total.
#[must_use]
pub fn listener_url(region: &str) -> &'static str {
    match region.to_lowercase().as_str() {
        "us" => US_LISTENER_URL,
        "ca" => "https://listener-ca.logz.io:8071",
        "eu" => "https://listener-eu.logz.io:8071",
        "uk" => "https://listener-uk.logz.io:8071",
        "au" => "https://listener-au.logz.io:8071",
        "nl" => "https://listener-nl.logz.io:8071",
        "wa" => "https://listener-wa.logz.io:8071",
        _ => US_LISTENER_URL,
    }
}
