//! REST-specific error types.

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// The path was empty after normalization.
    #[error("Invalid REST API path: {path}")]
    InvalidPath {
        /// The path that failed validation.
        path: String,
    },

    /// The HTTP exchange failed.
    #[error(transparent)]
    Http(#[from] HttpError),
}
