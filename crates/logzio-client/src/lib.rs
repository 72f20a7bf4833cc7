// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Client for the Logz.io bulk HTTP listener.
//!
//! One [`shipper::LogzioClient`] is created per inbound batch. Records are
//! appended to an owned [`buffer::RecordBuffer`] as newline-delimited JSON,
//! gzip-compressed in one pass, and POSTed to the listener resolved for the
//! account's region, with bounded retry on transient failures.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod buffer;
pub mod compress;
pub mod listener;
pub mod shipper;

pub use buffer::{RecordBuffer, WriteError};
pub use compress::{compress, CompressError, MAX_BULK_SIZE_BYTES};
pub use shipper::{should_retry, LogzioClient, LogzioClientConfig, SEND_RETRY_COUNT};
