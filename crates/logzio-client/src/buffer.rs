// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Buffering of serialized records ahead of a bulk export.
//!
//! A [`RecordBuffer`] is exclusively owned by one shipping client and lives
//! for one request. Records are appended as newline-terminated JSON; the
//! whole buffer is taken by value when an export starts, so no record ever
//! carries over into a later request.

use std::io::Write;

use serde::Serialize;
use thiserror::Error;

/// Error appending one record to the buffer.
///
/// Writes are independent: a failure on one record must not abort the rest
/// of the batch. Callers log and continue.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The record could not be serialized to JSON.
    #[error("failed to serialize log record: {0}")]
    Serialization(#[source] serde_json::Error),
    /// The buffer rejected the serialized bytes.
    #[error("failed to write log record to buffer: {0}")]
    Buffer(#[source] std::io::Error),
}

/// Append-only byte buffer of newline-delimited JSON records.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    buf: Vec<u8>,
}

impl RecordBuffer {
    #[must_use]
    pub fn new() -> Self {
        RecordBuffer::default()
    }

    /// Serializes `record` and appends it to the buffer followed by a single
    /// newline.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<(), WriteError> {
        let record_bytes = serde_json::to_vec(record).map_err(WriteError::Serialization)?;
        self.buf
            .write_all(&record_bytes)
            .and_then(|()| self.buf.write_all(b"\n"))
            .map_err(WriteError::Buffer)
    }

    /// Number of buffered bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Takes the buffered bytes, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.buf)
    }
}
