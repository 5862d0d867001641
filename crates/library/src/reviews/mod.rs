//! Per-game review board: form validation, list helpers and the board itself.

mod board;
mod form;
mod list;

pub use board::ReviewBoard;
pub use form::ReviewForm;
pub use list::{ReviewStats, review_stats, search_reviews, sort_reviews};
