// Copyright 2024-Present Logz.io Ltd. https://logz.io/
// SPDX-License-Identifier: Apache-2.0

//! Gzip compression of a record buffer with a hard size ceiling.

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

/// Maximum accepted size of one compressed bulk, in bytes.
///
/// The bulk listener rejects larger payloads, so oversize bulks are aborted
/// locally before any network call.
pub const MAX_BULK_SIZE_BYTES: usize = 10_000_000;

#[derive(Debug, Error)]
pub enum CompressError {
    #[error("failed to write to gzip encoder: {0}")]
    Write(#[source] std::io::Error),
    /// The compressed bulk exceeds [`MAX_BULK_SIZE_BYTES`].
    #[error("compressed bulk is {size} bytes, exceeds the {MAX_BULK_SIZE_BYTES} byte limit")]
    PayloadTooLarge { size: usize },
    #[error("failed to finish gzip stream: {0}")]
    Finish(#[source] std::io::Error),
}

/// Gzip-encodes `data` in one pass.
///
/// The size ceiling is checked against the bytes produced by the encoder
/// before the stream is finished, so an oversize bulk is rejected before it
/// is ever eligible to be sent.
pub fn compress(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).map_err(CompressError::Write)?;

    let size = encoder.get_ref().len();
    if size > MAX_BULK_SIZE_BYTES {
        return Err(CompressError::PayloadTooLarge { size });
    }

    encoder.finish().map_err(CompressError::Finish)
}
