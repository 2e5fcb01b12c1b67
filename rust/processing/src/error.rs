// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for batch processing.

use thiserror::Error;

/// Result type for batch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a whole batch.
///
/// A single part that cannot be meshed is reported as skipped instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid batch JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
