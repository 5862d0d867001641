//! The in-memory game list and its mutations.
//!
//! [`GameStore`] mirrors the backend's game collection. Every mutation goes
//! through the backend first; the local list only changes on success. Quota
//! violations are caught locally and never reach the backend.

use std::sync::Arc;

use ludoteca_protocol::{Game, GameDraft};
use ludoteca_settings::{Notifier, Settings};
use tracing::{debug, info, warn};

use crate::backend::GameBackend;
use crate::error::LibraryError;
use crate::quota::Quotas;

/// Game list backed by a [`GameBackend`], with soft quotas.
pub struct GameStore {
    backend: Arc<dyn GameBackend>,
    notifier: Arc<dyn Notifier>,
    quotas: Quotas,
    defaults: Option<Vec<Game>>,
    games: Vec<Game>,
    loading: bool,
    error: Option<String>,
}

impl GameStore {
    /// Creates a store.
    ///
    /// When the settings enable default games the store starts populated
    /// with them; otherwise it starts empty and loading.
    pub fn new(
        settings: &Settings,
        backend: Arc<dyn GameBackend>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let defaults = settings
            .library
            .uses_default_games()
            .then(|| settings.library.games.clone());
        Self {
            backend,
            notifier,
            quotas: Quotas::from_settings(settings),
            games: defaults.clone().unwrap_or_default(),
            loading: defaults.is_none(),
            defaults,
            error: None,
        }
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn find(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|g| g.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of the last failed load, cleared by the next load.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn quotas(&self) -> &Quotas {
        &self.quotas
    }

    /// Fetches the game list from the backend.
    ///
    /// Failures are recorded in [`GameStore::error`] and notified. With
    /// default games configured the list falls back to them.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.backend.list_games().await {
            Ok(games) => {
                info!(count = games.len(), "games loaded");
                self.games = games;
            }
            Err(e) => {
                let message = e.to_string();
                warn!(error = %message, "failed to load games");
                match &self.defaults {
                    Some(defaults) => {
                        self.games = defaults.clone();
                        self.notifier.warning(&format!(
                            "{message}. Showing the games defined in the settings file."
                        ));
                    }
                    None => self.notifier.error(&message),
                }
                self.error = Some(message);
            }
        }

        self.loading = false;
    }

    /// Reloads the game list; same as [`GameStore::load`].
    pub async fn refresh(&mut self) {
        self.load().await;
    }

    /// Creates a game after checking the favorite and pending quotas.
    pub async fn create(&mut self, draft: GameDraft) -> Result<Game, LibraryError> {
        self.guard(self.quotas.check_create(&self.games, &draft.flags()))?;

        let created = match self.backend.create_game(&draft).await {
            Ok(game) => game,
            Err(e) => return Err(self.fail(e.into())),
        };
        debug!(id = %created.id, name = %created.name, "game created");
        self.games.push(created.clone());
        self.notifier.success("Game added successfully");
        Ok(created)
    }

    /// Replaces the game `id` with the edited version.
    pub async fn update(&mut self, id: &str, draft: GameDraft) -> Result<Game, LibraryError> {
        self.guard(self.quotas.check_update(&self.games, id, &draft.flags()))?;

        let updated = match self.backend.update_game(id, &draft).await {
            Ok(game) => game,
            Err(e) => return Err(self.fail(e.into())),
        };
        debug!(%id, "game updated");
        if let Some(slot) = self.games.iter_mut().find(|g| g.id == id) {
            *slot = updated.clone();
        }
        self.notifier.success("Game updated successfully");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: &str) -> Result<(), LibraryError> {
        if let Err(e) = self.backend.delete_game(id).await {
            return Err(self.fail(e.into()));
        }
        debug!(%id, "game deleted");
        self.games.retain(|g| g.id != id);
        self.notifier.success("Game deleted successfully");
        Ok(())
    }

    /// Notifies a quota violation as a warning.
    fn guard(&self, check: Result<(), LibraryError>) -> Result<(), LibraryError> {
        check.inspect_err(|e| self.notifier.warning(&e.to_string()))
    }

    fn fail(&self, err: LibraryError) -> LibraryError {
        self.notifier.error(&err.to_string());
        err
    }
}
