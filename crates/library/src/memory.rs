//! In-process backend used when the settings ask for mock data.

use std::future::ready;
use std::sync::{Mutex, PoisonError};

use chrono::{SecondsFormat, Utc};
use ludoteca_api::ApiError;
use ludoteca_protocol::{Game, GameDraft, Review, ReviewPayload};
use tracing::debug;
use uuid::Uuid;

use crate::backend::{BackendFuture, GameBackend, ReviewBackend};

/// Games and reviews kept in memory for the life of the process.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    games: Mutex<Vec<Game>>,
    reviews: Mutex<Vec<Review>>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(what: &str) -> ApiError {
    ApiError::Api {
        status: 404,
        message: format!("{what} not found"),
    }
}

impl MemoryBackend {
    /// Creates a backend holding `games`.
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games: Mutex::new(games),
            reviews: Mutex::new(Vec::new()),
        }
    }

    fn games(&self) -> std::sync::MutexGuard<'_, Vec<Game>> {
        self.games.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reviews(&self) -> std::sync::MutexGuard<'_, Vec<Review>> {
        self.reviews.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fills in the name and genre of the reviewed game.
    fn annotate(&self, mut review: Review) -> Review {
        if let Some(game) = self.games().iter().find(|g| g.id == review.game_id) {
            review.game_name = Some(game.name.clone());
            review.game_genre = Some(game.genre.clone());
        }
        review
    }

    fn insert_game(&self, draft: &GameDraft) -> Game {
        let mut draft = draft.clone();
        draft.created_at.get_or_insert_with(now);
        let game = draft.into_game(new_id());
        debug!(id = %game.id, "memory backend: game created");
        self.games().push(game.clone());
        game
    }

    fn replace_game(&self, id: &str, draft: &GameDraft) -> Result<Game, ApiError> {
        let mut games = self.games();
        let slot = games
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| not_found("Game"))?;
        let mut updated = draft.clone().into_game(id);
        if updated.created_at.is_none() {
            updated.created_at = slot.created_at.take();
        }
        *slot = updated.clone();
        Ok(updated)
    }

    fn remove_game(&self, id: &str) -> Result<(), ApiError> {
        let mut games = self.games();
        let before = games.len();
        games.retain(|g| g.id != id);
        if games.len() == before {
            return Err(not_found("Game"));
        }
        drop(games);
        self.reviews().retain(|r| r.game_id != id);
        Ok(())
    }

    fn insert_review(&self, payload: &ReviewPayload) -> Result<Review, ApiError> {
        if !self.games().iter().any(|g| g.id == payload.game_id) {
            return Err(not_found("Game"));
        }
        let stamp = now();
        let mut review = payload.clone().into_review(new_id());
        review.created_at = Some(stamp.clone());
        review.updated_at = Some(stamp);
        let review = self.annotate(review);
        self.reviews().push(review.clone());
        Ok(review)
    }

    fn replace_review(&self, id: &str, payload: &ReviewPayload) -> Result<Review, ApiError> {
        let created_at = self
            .reviews()
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.created_at.clone())
            .ok_or_else(|| not_found("Review"))?;

        let mut review = payload.clone().into_review(id);
        review.created_at = created_at;
        review.updated_at = Some(now());
        let review = self.annotate(review);

        let mut reviews = self.reviews();
        if let Some(slot) = reviews.iter_mut().find(|r| r.id == id) {
            *slot = review.clone();
        }
        Ok(review)
    }

    fn remove_review(&self, id: &str) -> Result<(), ApiError> {
        let mut reviews = self.reviews();
        let before = reviews.len();
        reviews.retain(|r| r.id != id);
        if reviews.len() == before {
            return Err(not_found("Review"));
        }
        Ok(())
    }
}

impl GameBackend for MemoryBackend {
    fn list_games(&self) -> BackendFuture<'_, Vec<Game>> {
        Box::pin(ready(Ok(self.games().clone())))
    }

    fn get_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, Game> {
        let result = self
            .games()
            .iter()
            .find(|g| g.id == id)
            .cloned()
            .ok_or_else(|| not_found("Game"));
        Box::pin(ready(result))
    }

    fn create_game<'a>(&'a self, draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        Box::pin(ready(Ok(self.insert_game(draft))))
    }

    fn update_game<'a>(&'a self, id: &'a str, draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        Box::pin(ready(self.replace_game(id, draft)))
    }

    fn delete_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(ready(self.remove_game(id)))
    }
}

impl ReviewBackend for MemoryBackend {
    fn list_reviews(&self) -> BackendFuture<'_, Vec<Review>> {
        let reviews: Vec<Review> = self.reviews().clone();
        let annotated = reviews.into_iter().map(|r| self.annotate(r)).collect();
        Box::pin(ready(Ok(annotated)))
    }

    fn reviews_for_game<'a>(&'a self, game_id: &'a str) -> BackendFuture<'a, Vec<Review>> {
        let reviews: Vec<Review> = self
            .reviews()
            .iter()
            .filter(|r| r.game_id == game_id)
            .cloned()
            .collect();
        let annotated = reviews.into_iter().map(|r| self.annotate(r)).collect();
        Box::pin(ready(Ok(annotated)))
    }

    fn create_review<'a>(&'a self, payload: &'a ReviewPayload) -> BackendFuture<'a, Review> {
        Box::pin(ready(self.insert_review(payload)))
    }

    fn update_review<'a>(
        &'a self,
        id: &'a str,
        payload: &'a ReviewPayload,
    ) -> BackendFuture<'a, Review> {
        Box::pin(ready(self.replace_review(id, payload)))
    }

    fn delete_review<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(ready(self.remove_review(id)))
    }
}
