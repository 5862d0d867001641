//! Error types for library operations.

use ludoteca_api::ApiError;

use crate::quota::QuotaKind;

/// Errors produced by the store, the review board and their backends.
///
/// `Display` is the message shown to the user.
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// A favorite or pending quota would be exceeded.
    #[error("{message}")]
    QuotaExceeded {
        kind: QuotaKind,
        limit: usize,
        message: String,
    },

    #[error(transparent)]
    Api(#[from] ApiError),

    /// Form input rejected before reaching the backend.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    GameNotFound(String),

    #[error("reviews are disabled in the settings")]
    ReviewsDisabled,
}
