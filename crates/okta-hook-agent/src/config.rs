// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

use std::env;
use std::time::Duration;

const DEFAULT_RECEIVER_PORT: u16 = 8070;

/// Agent configuration.
///
/// Shipping credentials are not part of the configuration: the token and
/// region arrive on each request's headers, so one deployment can serve
/// many Logz.io accounts.
#[derive(Debug)]
pub struct Config {
    /// Port the event hook receiver listens on.
    pub receiver_port: u16,
    /// Maximum accepted inbound request body size, in bytes.
    pub max_request_content_length: usize,
    /// Timeout for each individual bulk send attempt.
    pub bulk_request_timeout: Duration,
    /// Delay before the first bulk retry; doubles on every subsequent retry.
    pub bulk_retry_backoff_base: Duration,
    /// Overrides the per-region listener URL. Primarily used for
    /// integration tests.
    pub listener_url_override: Option<String>,
}

impl Config {
    pub fn new() -> Result<Config, Box<dyn std::error::Error>> {
        let receiver_port: u16 = match env::var("LOGZIO_HOOK_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("LOGZIO_HOOK_PORT is not a valid port: {port}"))?,
            Err(_) => DEFAULT_RECEIVER_PORT,
        };

        Ok(Config {
            receiver_port,
            max_request_content_length: 10 * 1024 * 1024, // 10MB in Bytes
            bulk_request_timeout: Duration::from_secs(10),
            bulk_retry_backoff_base: Duration::from_secs(2),
            listener_url_override: env::var("LOGZIO_LISTENER_URL").ok(),
        })
    }
}
