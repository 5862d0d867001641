//! Soft client-side limits on favorite and pending games.

use std::fmt;

use ludoteca_protocol::{Game, GameFlags};
use ludoteca_settings::{Settings, UiMessages};

use crate::error::LibraryError;

/// Which quota a game counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaKind {
    Favorites,
    Pending,
}

impl QuotaKind {
    /// Whether a game with these flags counts against the quota.
    pub fn counts(&self, flags: &GameFlags) -> bool {
        match self {
            QuotaKind::Favorites => flags.is_favorite(),
            QuotaKind::Pending => flags.is_pending(),
        }
    }
}

impl fmt::Display for QuotaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuotaKind::Favorites => f.write_str("favorites"),
            QuotaKind::Pending => f.write_str("pending"),
        }
    }
}

/// Usage of one quota over a list of games.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaStatus {
    pub kind: QuotaKind,
    /// 0 means unlimited.
    pub limit: usize,
    pub count: usize,
    /// Set when the limit is reached.
    pub message: Option<String>,
}

impl QuotaStatus {
    pub fn reached(&self) -> bool {
        self.message.is_some()
    }
}

/// Configured limits plus the messages shown when they are hit.
#[derive(Debug, Clone)]
pub struct Quotas {
    max_favorites: usize,
    max_pending: usize,
    messages: UiMessages,
}

impl Quotas {
    pub fn new(max_favorites: usize, max_pending: usize, messages: UiMessages) -> Self {
        Self {
            max_favorites,
            max_pending,
            messages,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.library.max_favorites,
            settings.library.max_pending,
            settings.ui.messages.clone(),
        )
    }

    pub fn limit(&self, kind: QuotaKind) -> usize {
        match kind {
            QuotaKind::Favorites => self.max_favorites,
            QuotaKind::Pending => self.max_pending,
        }
    }

    /// Message shown when `kind` is at its limit.
    pub fn message(&self, kind: QuotaKind) -> String {
        let limit = self.limit(kind);
        match kind {
            QuotaKind::Favorites => self.messages.favorites_limit_reached(limit),
            QuotaKind::Pending => self.messages.pending_limit_reached(limit),
        }
    }

    /// Counts the games against `kind` and reports whether the limit is hit.
    pub fn status<'a>(&self, kind: QuotaKind, games: impl IntoIterator<Item = &'a Game>) -> QuotaStatus {
        let limit = self.limit(kind);
        let count = games
            .into_iter()
            .filter(|g| kind.counts(&g.flags()))
            .count();
        QuotaStatus {
            kind,
            limit,
            count,
            message: (limit > 0 && count >= limit).then(|| self.message(kind)),
        }
    }

    /// Checks that a new game with `flags` fits in both quotas.
    ///
    /// Favorites are checked before pending.
    pub fn check_create(&self, games: &[Game], flags: &GameFlags) -> Result<(), LibraryError> {
        for kind in [QuotaKind::Favorites, QuotaKind::Pending] {
            if kind.counts(flags) {
                self.ensure_room(kind, games.iter())?;
            }
        }
        Ok(())
    }

    /// Checks an edit of the game `id`.
    ///
    /// A quota is only checked when the edit moves the game into it; the
    /// edited game itself is not counted. Unknown ids are not checked.
    pub fn check_update(
        &self,
        games: &[Game],
        id: &str,
        flags: &GameFlags,
    ) -> Result<(), LibraryError> {
        let Some(original) = games.iter().find(|g| g.id == id) else {
            return Ok(());
        };
        let before = original.flags();
        for kind in [QuotaKind::Favorites, QuotaKind::Pending] {
            if !kind.counts(&before) && kind.counts(flags) {
                self.ensure_room(kind, games.iter().filter(|g| g.id != id))?;
            }
        }
        Ok(())
    }

    fn ensure_room<'a>(
        &self,
        kind: QuotaKind,
        others: impl Iterator<Item = &'a Game>,
    ) -> Result<(), LibraryError> {
        let status = self.status(kind, others);
        match status.message {
            Some(message) => Err(LibraryError::QuotaExceeded {
                kind,
                limit: status.limit,
                message,
            }),
            None => Ok(()),
        }
    }
}
