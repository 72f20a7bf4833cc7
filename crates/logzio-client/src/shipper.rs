// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Bulk shipping to the Logz.io listener with compression and retry logic.
//!
//! One [`LogzioClient`] handles one inbound batch: records are written to
//! its owned buffer, then [`LogzioClient::export`] compresses the buffer,
//! POSTs it and drives the retry loop.
//!
//! ```text
//!   RecordBuffer
//!       │
//!       v
//!   ┌─────────────┐
//!   │  Compress   │ (gzip, size guard)
//!   └──────┬──────┘
//!          │
//!          v
//!   ┌─────────────┐
//!   │ HTTP POST   │
//!   └──────┬──────┘
//!          │
//!          v
//!   ┌─────────────┐
//!   │   Retry?    │ (backoff 2s, 4s, 8s)
//!   └─────────────┘
//! ```

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::CONTENT_ENCODING;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::buffer::{RecordBuffer, WriteError};
use crate::compress::{compress, CompressError};
use crate::listener;

/// Maximum number of send attempts per export cycle.
pub const SEND_RETRY_COUNT: u32 = 4;

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(2);

/// Decides whether a bulk send should be retried based on the listener's
/// response status.
///
/// 200 and the credential/request errors are final; everything else is
/// treated as transient.
#[must_use]
pub fn should_retry(status: StatusCode) -> bool {
    match status {
        StatusCode::OK => false,
        StatusCode::BAD_REQUEST => {
            debug!("got HTTP {status} bad request, skip retry");
            false
        }
        StatusCode::UNAUTHORIZED => {
            debug!("got HTTP {status} unauthorized, check the shipping token");
            false
        }
        StatusCode::FORBIDDEN => {
            debug!("got HTTP {status} forbidden, skip retry");
            false
        }
        StatusCode::NOT_FOUND => {
            debug!("got HTTP {status} not found, skip retry");
            false
        }
        _ => true,
    }
}

/// Configuration for a [`LogzioClient`].
pub struct LogzioClientConfig {
    /// Logz.io shipping token, appended to the listener URL as a query
    /// parameter.
    pub token: String,
    /// Bulk listener base URL.
    pub listener_url: String,
    /// Timeout for each individual send attempt.
    pub request_timeout: Duration,
    /// Delay before the first retry; doubles on every subsequent retry.
    pub initial_backoff: Duration,
}

impl LogzioClientConfig {
    /// Builds a config for the listener serving `region`, with the default
    /// timeout and backoff.
    #[must_use]
    pub fn for_region(token: String, region: &str) -> Self {
        LogzioClientConfig {
            token,
            listener_url: listener::listener_url(region).to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            initial_backoff: DEFAULT_INITIAL_BACKOFF,
        }
    }
}

/// Client for one bulk export cycle against the Logz.io listener.
pub struct LogzioClient {
    token: String,
    listener_url: String,
    request_timeout: Duration,
    initial_backoff: Duration,
    client: reqwest::Client,
    buffer: RecordBuffer,
}

impl LogzioClient {
    #[must_use]
    pub fn new(config: LogzioClientConfig) -> Self {
        let client = reqwest::Client::builder().build().unwrap_or_else(|e| {
            error!("unable to build HTTP client: {e}, falling back to defaults");
            reqwest::Client::new()
        });
        LogzioClient {
            token: config.token,
            listener_url: config.listener_url,
            request_timeout: config.request_timeout,
            initial_backoff: config.initial_backoff,
            client,
            buffer: RecordBuffer::new(),
        }
    }

    /// Serializes one record into the buffer, newline-terminated.
    pub fn write_record<T: Serialize>(&mut self, record: &T) -> Result<(), WriteError> {
        self.buffer.write(record)
    }

    /// Number of bytes currently buffered.
    #[must_use]
    pub fn buffered_bytes(&self) -> usize {
        self.buffer.len()
    }

    /// Compresses the buffered records and sends them to the listener,
    /// retrying transient failures up to [`SEND_RETRY_COUNT`] attempts with
    /// exponential backoff.
    ///
    /// The record buffer is taken up front, so it is empty once this
    /// returns, whatever the outcome. Returns the final listener status, or
    /// a synthetic status: 500 when compression fails, 413 when the
    /// compressed bulk exceeds the size limit (checked before any network
    /// call), 502 when every attempt ended without a response.
    pub async fn export(&mut self) -> StatusCode {
        let records = self.buffer.take();
        debug!("sending bulk of {} bytes", records.len());

        let payload = match compress(&records) {
            Ok(compressed) => Bytes::from(compressed),
            Err(CompressError::PayloadTooLarge { size }) => {
                warn!("compressed bulk is {size} bytes, cancelling export");
                return StatusCode::PAYLOAD_TOO_LARGE;
            }
            Err(e) => {
                error!("failed to compress bulk: {e}");
                return StatusCode::INTERNAL_SERVER_ERROR;
            }
        };

        let mut backoff = self.initial_backoff;
        let mut last_status: Option<StatusCode> = None;

        for attempt in 1..=SEND_RETRY_COUNT {
            if attempt > 1 {
                debug!("failed to send bulk, trying again in {backoff:?}");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }

            match self.send_bulk(payload.clone()).await {
                Ok(status) => {
                    last_status = Some(status);
                    if !should_retry(status) {
                        break;
                    }
                }
                // No response at all; retried like any transient failure.
                Err(e) => {
                    error!(
                        "error sending bulk to {} (attempt {attempt}): {e}",
                        self.listener_url
                    );
                }
            }
        }

        let status = last_status.unwrap_or(StatusCode::BAD_GATEWAY);
        if status != StatusCode::OK {
            error!("error sending bulk, status code is: {status}");
        }
        status
    }

    async fn send_bulk(&self, payload: Bytes) -> Result<StatusCode, reqwest::Error> {
        let url = format!("{}/?token={}", self.listener_url, self.token);
        let response = self
            .client
            .post(&url)
            .header(CONTENT_ENCODING, "gzip")
            .timeout(self.request_timeout)
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        if let Err(e) = response.bytes().await {
            debug!("error reading listener response body: {e}");
        }
        debug!("listener response status code: {status}");
        Ok(status)
    }
}
