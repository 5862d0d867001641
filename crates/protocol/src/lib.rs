//! Wire types for the Ludoteca games/reviews REST backend.

mod de;
pub mod envelope;
pub mod game;
pub mod review;

// Re-export primary types for convenience.
pub use game::{FieldValue, Game, GameDraft, GameFlags};
pub use review::{Difficulty, Review, ReviewPayload, UnknownDifficulty};
