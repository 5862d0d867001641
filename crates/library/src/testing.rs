//! Test doubles shared by the library's unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use ludoteca_api::ApiError;
use ludoteca_protocol::{Game, GameDraft, Review, ReviewPayload};
use ludoteca_settings::Notifier;

use crate::backend::{BackendFuture, GameBackend, ReviewBackend};

pub(crate) fn game(id: &str, name: &str) -> Game {
    GameDraft {
        name: name.into(),
        ..Default::default()
    }
    .into_game(id)
}

pub(crate) fn api_error(status: u16, message: &str) -> ApiError {
    ApiError::Api {
        status,
        message: message.into(),
    }
}

/// Notifier that records `(kind, message)` pairs.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    pub events: Mutex<Vec<(&'static str, String)>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<(&'static str, String)> {
        self.events.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(&'static str, String)> {
        self.events.lock().unwrap().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.events.lock().unwrap().push(("success", message.into()));
    }

    fn warning(&self, message: &str) {
        self.events.lock().unwrap().push(("warning", message.into()));
    }

    fn error(&self, message: &str) {
        self.events.lock().unwrap().push(("error", message.into()));
    }
}

/// Game backend with scripted responses that records every call.
#[derive(Default)]
pub(crate) struct MockGames {
    pub list: Mutex<VecDeque<Result<Vec<Game>, ApiError>>>,
    pub single: Mutex<VecDeque<Result<Game, ApiError>>>,
    pub deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockGames {
    pub fn with_list(result: Result<Vec<Game>, ApiError>) -> Self {
        let mock = Self::default();
        mock.list.lock().unwrap().push_back(result);
        mock
    }

    pub fn push_single(&self, result: Result<Game, ApiError>) {
        self.single.lock().unwrap().push_back(result);
    }

    pub fn push_delete(&self, result: Result<(), ApiError>) {
        self.deletes.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_single(&self) -> Result<Game, ApiError> {
        self.single
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500, "no mock response")))
    }
}

impl GameBackend for MockGames {
    fn list_games(&self) -> BackendFuture<'_, Vec<Game>> {
        self.record("list".into());
        let result = self
            .list
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500, "no mock response")));
        Box::pin(async move { result })
    }

    fn get_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, Game> {
        self.record(format!("get {id}"));
        let result = self.next_single();
        Box::pin(async move { result })
    }

    fn create_game<'a>(&'a self, draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        self.record(format!("create {}", draft.name));
        let result = self.next_single();
        Box::pin(async move { result })
    }

    fn update_game<'a>(&'a self, id: &'a str, _draft: &'a GameDraft) -> BackendFuture<'a, Game> {
        self.record(format!("update {id}"));
        let result = self.next_single();
        Box::pin(async move { result })
    }

    fn delete_game<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        self.record(format!("delete {id}"));
        let result = self
            .deletes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        Box::pin(async move { result })
    }
}

/// Review backend with scripted responses that records every call.
#[derive(Default)]
pub(crate) struct MockReviews {
    pub lists: Mutex<VecDeque<Result<Vec<Review>, ApiError>>>,
    pub single: Mutex<VecDeque<Result<Review, ApiError>>>,
    pub deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    pub payloads: Mutex<Vec<ReviewPayload>>,
    pub calls: Mutex<Vec<String>>,
}

impl MockReviews {
    pub fn with_list(result: Result<Vec<Review>, ApiError>) -> Self {
        let mock = Self::default();
        mock.lists.lock().unwrap().push_back(result);
        mock
    }

    pub fn push_single(&self, result: Result<Review, ApiError>) {
        self.single.lock().unwrap().push_back(result);
    }

    pub fn push_delete(&self, result: Result<(), ApiError>) {
        self.deletes.lock().unwrap().push_back(result);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_list(&self) -> Result<Vec<Review>, ApiError> {
        self.lists
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn next_single(&self, payload: &ReviewPayload) -> Result<Review, ApiError> {
        self.payloads.lock().unwrap().push(payload.clone());
        self.single
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(api_error(500, "no mock response")))
    }
}

impl ReviewBackend for MockReviews {
    fn list_reviews(&self) -> BackendFuture<'_, Vec<Review>> {
        self.record("list".into());
        let result = self.next_list();
        Box::pin(async move { result })
    }

    fn reviews_for_game<'a>(&'a self, game_id: &'a str) -> BackendFuture<'a, Vec<Review>> {
        self.record(format!("for-game {game_id}"));
        let result = self.next_list();
        Box::pin(async move { result })
    }

    fn create_review<'a>(&'a self, payload: &'a ReviewPayload) -> BackendFuture<'a, Review> {
        self.record("create".into());
        let result = self.next_single(payload);
        Box::pin(async move { result })
    }

    fn update_review<'a>(
        &'a self,
        id: &'a str,
        payload: &'a ReviewPayload,
    ) -> BackendFuture<'a, Review> {
        self.record(format!("update {id}"));
        let result = self.next_single(payload);
        Box::pin(async move { result })
    }

    fn delete_review<'a>(&'a self, id: &'a str) -> BackendFuture<'a, ()> {
        self.record(format!("delete {id}"));
        let result = self
            .deletes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        Box::pin(async move { result })
    }
}
