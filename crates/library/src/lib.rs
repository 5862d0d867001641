//! Game library logic for the Ludoteca client.
//!
//! This crate holds the state and rules behind the library screens and has
//! no UI dependencies. Persistence goes through the [`GameBackend`] and
//! [`ReviewBackend`] traits, implemented by the HTTP [`ludoteca_api::Client`]
//! and by [`MemoryBackend`].
//!
//! # Pieces
//!
//! - [`GameStore`]: the game list with create, edit and delete
//! - [`LibraryBrowser`]: sorting, search and pagination over the list
//! - [`GenreView`]: games of one genre, addressed by slug
//! - [`ReviewBoard`]: reviews of one game

pub mod backend;
pub mod error;
pub mod genre;
pub mod memory;
pub mod query;
pub mod quota;
pub mod reviews;
pub mod store;
pub mod text;

#[cfg(test)]
mod testing;

// Re-export primary types for convenience.
pub use backend::{BackendFuture, GameBackend, ReviewBackend};
pub use error::LibraryError;
pub use genre::{GenreView, genre_slug, normalize_genre};
pub use memory::MemoryBackend;
pub use query::{LibraryBrowser, LibraryStats, LibraryView, SearchField, SortOrder};
pub use quota::{QuotaKind, QuotaStatus, Quotas};
pub use reviews::{ReviewBoard, ReviewForm, ReviewStats};
pub use store::GameStore;
