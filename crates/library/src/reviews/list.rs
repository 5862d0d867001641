//! Helpers over the reviews of one game.

use ludoteca_protocol::Review;

use crate::query::timestamp_millis;

/// Most recent change of a review, in epoch milliseconds.
fn last_touched(review: &Review) -> i64 {
    timestamp_millis(review.updated_at.as_deref().or(review.created_at.as_deref()))
}

/// Newest first by update date, falling back to creation date.
pub fn sort_reviews(reviews: &[Review]) -> Vec<&Review> {
    let mut sorted: Vec<&Review> = reviews.iter().collect();
    sorted.sort_by_key(|r| std::cmp::Reverse(last_touched(r)));
    sorted
}

/// Reviews whose comment, difficulty, recommendation or hours contain `term`.
pub fn search_reviews<'a>(reviews: &[&'a Review], term: &str) -> Vec<&'a Review> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return reviews.to_vec();
    }
    reviews
        .iter()
        .copied()
        .filter(|r| {
            let recommend = if r.would_recommend {
                "recomendado"
            } else {
                "no recomendado"
            };
            r.comment.to_lowercase().contains(&term)
                || [r.difficulty_text(), r.difficulty_label.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|d| d.to_lowercase().contains(&term))
                || recommend.contains(&term)
                || r.hours_played.is_some_and(|h| h.to_string().contains(&term))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReviewStats {
    pub count: usize,
    /// Mean rating to one decimal; missing ratings count as 0.
    pub average_rating: Option<f64>,
    /// Mean of the reported hours, rounded.
    pub average_hours: Option<u64>,
}

pub fn review_stats(reviews: &[Review]) -> ReviewStats {
    let count = reviews.len();
    let average_rating = (count > 0).then(|| {
        let total: f64 = reviews.iter().map(|r| f64::from(r.rating.unwrap_or(0))).sum();
        (total / count as f64 * 10.0).round() / 10.0
    });

    let hours: Vec<f64> = reviews.iter().filter_map(|r| r.hours_played).collect();
    let average_hours = (!hours.is_empty())
        .then(|| (hours.iter().sum::<f64>() / hours.len() as f64).round() as u64);

    ReviewStats {
        count,
        average_rating,
        average_hours,
    }
}
