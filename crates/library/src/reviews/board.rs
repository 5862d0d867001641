//! Review board for one game.

use std::sync::Arc;

use ludoteca_protocol::{Game, Review};
use ludoteca_settings::{IntegrationSettings, Notifier};
use tracing::{debug, warn};

use super::form::ReviewForm;
use super::list::{ReviewStats, review_stats, search_reviews, sort_reviews};
use crate::backend::{GameBackend, ReviewBackend};
use crate::error::LibraryError;
use crate::store::GameStore;

/// Reviews of a single game.
pub struct ReviewBoard {
    game: Game,
    backend: Arc<dyn ReviewBackend>,
    notifier: Arc<dyn Notifier>,
    reviews: Vec<Review>,
    loading: bool,
}

impl ReviewBoard {
    /// Opens the board for `game_id`.
    ///
    /// The game comes from the store when it is cached there, otherwise it
    /// is fetched from `games`.
    pub async fn open(
        integrations: &IntegrationSettings,
        game_id: &str,
        store: &GameStore,
        games: &dyn GameBackend,
        backend: Arc<dyn ReviewBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, LibraryError> {
        if !integrations.reviews_enabled {
            return Err(LibraryError::ReviewsDisabled);
        }
        let game = match store.find(game_id) {
            Some(game) => game.clone(),
            None => games.get_game(game_id).await.map_err(|e| {
                warn!(%game_id, error = %e, "game for review board not found");
                LibraryError::GameNotFound(e.to_string())
            })?,
        };
        Ok(Self {
            game,
            backend,
            notifier,
            reviews: Vec::new(),
            loading: false,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reviews in the order they were received or saved.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Fetches the game's reviews. A failure is notified and leaves the
    /// board empty.
    pub async fn load(&mut self) {
        self.loading = true;
        match self.backend.reviews_for_game(&self.game.id).await {
            Ok(reviews) => {
                debug!(game = %self.game.id, count = reviews.len(), "reviews loaded");
                self.reviews = reviews;
            }
            Err(e) => {
                warn!(game = %self.game.id, error = %e, "failed to load reviews");
                self.reviews.clear();
                self.notifier.error(&e.to_string());
            }
        }
        self.loading = false;
    }

    /// Creates a review, or replaces the one with id `editing`.
    pub async fn save(
        &mut self,
        form: &ReviewForm,
        editing: Option<&str>,
    ) -> Result<Review, LibraryError> {
        let payload = form
            .validate(&self.game.id)
            .inspect_err(|e| self.notifier.error(&e.to_string()))?;

        let result = match editing {
            Some(id) => self.backend.update_review(id, &payload).await,
            None => self.backend.create_review(&payload).await,
        };
        let saved = match result {
            Ok(review) => review,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return Err(e.into());
            }
        };

        match editing {
            Some(id) => {
                if let Some(slot) = self.reviews.iter_mut().find(|r| r.id == id) {
                    *slot = saved.clone();
                }
                self.notifier.success("Review updated successfully");
            }
            None => {
                self.reviews.insert(0, saved.clone());
                self.notifier.success("Review created successfully");
            }
        }
        Ok(saved)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), LibraryError> {
        if let Err(e) = self.backend.delete_review(id).await {
            self.notifier.error(&e.to_string());
            return Err(e.into());
        }
        self.reviews.retain(|r| r.id != id);
        self.notifier.success("Review deleted");
        Ok(())
    }

    /// Reviews newest first.
    pub fn sorted(&self) -> Vec<&Review> {
        sort_reviews(&self.reviews)
    }

    /// Newest-first reviews matching `term`.
    pub fn search(&self, term: &str) -> Vec<&Review> {
        search_reviews(&self.sorted(), term)
    }

    pub fn stats(&self) -> ReviewStats {
        review_stats(&self.reviews)
    }
}
