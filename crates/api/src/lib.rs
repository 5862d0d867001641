//! HTTP client for the Ludoteca games and reviews backend.
//!
//! Wraps the REST API (`/juegos`, `/resenias`) with base URL resolution,
//! default headers, per-request timeouts and retries of transport failures.

pub mod client;
pub mod error;
pub mod url;

#[cfg(test)]
mod mock_server;

pub use client::{Client, extract_error_message};
pub use error::ApiError;
pub use url::{ENV_API_URL, resolve_base_url};
