//! Backend abstraction for games and reviews.
//!
//! The store and the review board talk to these traits; the HTTP client and
//! the in-memory backend implement them, and tests provide mocks.

use std::future::Future;
use std::pin::Pin;

use ludoteca_api::{ApiError, Client};
use ludoteca_protocol::{Game, GameDraft, Review, ReviewPayload};

/// Boxed future returned by backend operations.
pub type BackendFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Game persistence.
pub trait GameBackend: Send + Sync {
    fn list_games(&self) -> BackendFuture<'_, Vec<Game>>;

    fn get_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, Game>;

    fn create_game<'a>(&'a self, draft: &'a GameDraft) -> BackendFuture<'a, Game>;

    fn update_game<'a>(&'a self, id: &'a str, draft: &'a GameDraft) -> BackendFuture<'a, Game>;

    fn delete_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()>;
}

/// Review persistence.
pub trait ReviewBackend: Send + Sync {
    fn list_reviews(&self) -> BackendFuture<'_, Vec<Review>>;

    fn reviews_for_game<'a>(&'a self, game_id: &'a str) -> BackendFuture<'a, Vec<Review>>;

    fn create_review<'a>(&'a self, payload: &'a ReviewPayload) -> BackendFuture<'a, Review>;

    fn update_review<'a>(
        &'a self,
        id: &'a str,
        payload: &'a ReviewPayload,
    ) -> BackendFuture<'a, Review>;

    fn delete_review<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()>;
}

impl GameBackend for Client {
    fn list_games(&self) -> BackendFuture<'_, Vec<Game>> {
        Box::pin(Client::list_games(self))
    }

    fn get_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, Game> {
        Box::pin(Client::get_game(self, id))
    }

    fn create_game<'a>(&'a self, draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        Box::pin(Client::create_game(self, draft))
    }

    fn update_game<'a>(&'a self, id: &'a str, draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        Box::pin(Client::update_game(self, id, draft))
    }

    fn delete_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(Client::delete_game(self, id))
    }
}

impl ReviewBackend for Client {
    fn list_reviews(&self) -> BackendFuture<'_, Vec<Review>> {
        Box::pin(Client::list_reviews(self))
    }

    fn reviews_for_game<'a>(&'a self, game_id: &'a str) -> BackendFuture<'a, Vec<Review>> {
        Box::pin(Client::reviews_for_game(self, game_id))
    }

    fn create_review<'a>(&'a self, payload: &'a ReviewPayload) -> BackendFuture<'a, Review> {
        Box::pin(Client::create_review(self, payload))
    }

    fn update_review<'a>(
        &'a self,
        id: &'a str,
        payload: &'a ReviewPayload,
    ) -> BackendFuture<'a, Review> {
        Box::pin(Client::update_review(self, id, payload))
    }

    fn delete_review<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        Box::pin(Client::delete_review(self, id))
    }
}
