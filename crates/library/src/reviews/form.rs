//! Review form state and validation.

use ludoteca_protocol::{Difficulty, Review, ReviewPayload};

use crate::error::LibraryError;

const MIN_COMMENT_CHARS: usize = 10;

/// Editable state of the review form.
///
/// `hours` is kept as typed; it is parsed on [`ReviewForm::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewForm {
    pub rating: Option<u8>,
    pub comment: String,
    pub hours: String,
    pub difficulty: Difficulty,
    pub would_recommend: bool,
    pub author: Option<String>,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            rating: Some(3),
            comment: String::new(),
            hours: String::new(),
            difficulty: Difficulty::Normal,
            would_recommend: true,
            author: None,
        }
    }
}

impl ReviewForm {
    /// Pre-fills the form for editing `review`.
    pub fn from_review(review: &Review) -> Self {
        Self {
            rating: review.rating,
            comment: review.comment.clone(),
            hours: review
                .hours_played
                .map(|h| h.to_string())
                .unwrap_or_default(),
            difficulty: review.difficulty.unwrap_or_default(),
            would_recommend: review.would_recommend,
            author: review.author.clone(),
        }
    }

    /// Checks the form and builds the payload for `game_id`.
    pub fn validate(&self, game_id: &str) -> Result<ReviewPayload, LibraryError> {
        let invalid = |msg: &str| LibraryError::Validation(msg.to_string());

        let rating = match self.rating {
            Some(r @ 1..=5) => r,
            _ => return Err(invalid("Select a rating between 1 and 5 stars")),
        };

        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(invalid("Add some details about your experience"));
        }
        if comment.chars().count() < MIN_COMMENT_CHARS {
            return Err(invalid("The review must be at least 10 characters long"));
        }

        let hours = self.hours.trim();
        let hours_played = if hours.is_empty() {
            None
        } else {
            match hours.parse::<f64>() {
                Ok(h) if h.is_finite() && h >= 0.0 => Some(h),
                _ => return Err(invalid("Enter a valid number of hours (0 or more)")),
            }
        };

        Ok(ReviewPayload {
            game_id: game_id.to_string(),
            rating: Some(rating),
            comment: comment.to_string(),
            author: self
                .author
                .as_deref()
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(String::from),
            hours_played,
            difficulty: self.difficulty,
            would_recommend: self.would_recommend,
        })
    }
}
