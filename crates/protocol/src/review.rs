//! Game reviews.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::de;

/// Perceived difficulty of a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Muy fácil")]
    VeryEasy,
    #[serde(rename = "Fácil")]
    Easy,
    #[default]
    Normal,
    #[serde(rename = "Difícil")]
    Hard,
    #[serde(rename = "Muy difícil")]
    VeryHard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    /// Label used on the wire and shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Muy fácil",
            Difficulty::Easy => "Fácil",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Difícil",
            Difficulty::VeryHard => "Muy difícil",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a difficulty label is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDifficulty(pub String);

impl fmt::Display for UnknownDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown difficulty: {}", self.0)
    }
}

impl std::error::Error for UnknownDifficulty {}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    /// Accepts the wire labels case-insensitively, with or without accents.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .to_lowercase()
            .replace('á', "a")
            .replace('í', "i")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        match key.as_str() {
            "muy facil" | "very-easy" | "very easy" => Ok(Difficulty::VeryEasy),
            "facil" | "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "dificil" | "hard" => Ok(Difficulty::Hard),
            "muy dificil" | "very-hard" | "very hard" => Ok(Difficulty::VeryHard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

/// A review of a single game.
///
/// The backend has used both `puntuacion`/`texto` and
/// `calificacion`/`contenido` for rating and comment. Either spelling is
/// accepted, and when a record carries both the first non-empty one wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireReview")]
pub struct Review {
    pub id: String,
    #[serde(rename = "juegoId")]
    pub game_id: String,
    #[serde(rename = "puntuacion")]
    pub rating: Option<u8>,
    #[serde(rename = "texto")]
    pub comment: String,
    #[serde(rename = "autor", skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "horasJugadas")]
    pub hours_played: Option<f64>,
    #[serde(rename = "dificultad")]
    pub difficulty: Option<Difficulty>,
    /// Difficulty text as the backend sent it, kept even when it is not one
    /// of the known labels.
    #[serde(skip_serializing)]
    pub difficulty_label: Option<String>,
    #[serde(rename = "recomendaria")]
    pub would_recommend: bool,
    #[serde(rename = "fechaCreacion")]
    pub created_at: Option<String>,
    #[serde(rename = "fechaActualizacion")]
    pub updated_at: Option<String>,
    #[serde(rename = "juegoNombre", skip_serializing_if = "Option::is_none")]
    pub game_name: Option<String>,
    #[serde(rename = "juegoGenero", skip_serializing_if = "Option::is_none")]
    pub game_genre: Option<String>,
}

impl Review {
    /// Difficulty text to show or search: the known label, else the raw one.
    pub fn difficulty_text(&self) -> Option<&str> {
        match self.difficulty {
            Some(d) => Some(d.label()),
            None => self.difficulty_label.as_deref(),
        }
    }
}

/// Review record as read off the wire, with both field spellings.
#[derive(Deserialize)]
struct WireReview {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    id: String,
    #[serde(rename = "juegoId", default, deserialize_with = "de::string_or_empty")]
    game_id: String,
    #[serde(rename = "puntuacion", default, deserialize_with = "de::rating")]
    rating: Option<u8>,
    #[serde(rename = "calificacion", default, deserialize_with = "de::rating")]
    legacy_rating: Option<u8>,
    #[serde(rename = "texto", default, deserialize_with = "de::optional_string")]
    comment: Option<String>,
    #[serde(rename = "contenido", default, deserialize_with = "de::optional_string")]
    legacy_comment: Option<String>,
    #[serde(rename = "autor", default, deserialize_with = "de::optional_string")]
    author: Option<String>,
    #[serde(rename = "horasJugadas", default, deserialize_with = "de::hours")]
    hours_played: Option<f64>,
    #[serde(rename = "dificultad", default, deserialize_with = "de::optional_string")]
    difficulty: Option<String>,
    #[serde(rename = "recomendaria", default, deserialize_with = "de::bool_or_false")]
    would_recommend: bool,
    #[serde(rename = "fechaCreacion", default, deserialize_with = "de::optional_string")]
    created_at: Option<String>,
    #[serde(
        rename = "fechaActualizacion",
        default,
        deserialize_with = "de::optional_string"
    )]
    updated_at: Option<String>,
    #[serde(rename = "juegoNombre", default, deserialize_with = "de::optional_string")]
    game_name: Option<String>,
    #[serde(rename = "juegoGenero", default, deserialize_with = "de::optional_string")]
    game_genre: Option<String>,
}

impl From<WireReview> for Review {
    fn from(wire: WireReview) -> Self {
        let comment = wire
            .comment
            .filter(|c| !c.trim().is_empty())
            .or(wire.legacy_comment)
            .unwrap_or_default();
        let difficulty_label = wire
            .difficulty
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        Review {
            id: wire.id,
            game_id: wire.game_id,
            rating: wire.rating.or(wire.legacy_rating),
            comment,
            author: wire.author,
            hours_played: wire.hours_played,
            difficulty: difficulty_label.as_deref().and_then(|d| d.parse().ok()),
            difficulty_label,
            would_recommend: wire.would_recommend,
            created_at: wire.created_at,
            updated_at: wire.updated_at,
            game_name: wire.game_name,
            game_genre: wire.game_genre,
        }
    }
}

/// Body sent when creating or updating a review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewPayload {
    #[serde(rename = "juegoId")]
    pub game_id: String,
    #[serde(rename = "puntuacion")]
    pub rating: Option<u8>,
    #[serde(rename = "texto")]
    pub comment: String,
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(rename = "horasJugadas")]
    pub hours_played: Option<f64>,
    #[serde(rename = "dificultad")]
    pub difficulty: Difficulty,
    #[serde(rename = "recomendaria")]
    pub would_recommend: bool,
}

impl ReviewPayload {
    /// Builds the stored review for this payload.
    ///
    /// Used by backends that do not round-trip through HTTP.
    pub fn into_review(self, id: impl Into<String>) -> Review {
        Review {
            id: id.into(),
            game_id: self.game_id,
            rating: self.rating,
            comment: self.comment,
            author: self.author,
            hours_played: self.hours_played,
            difficulty: Some(self.difficulty),
            difficulty_label: None,
            would_recommend: self.would_recommend,
            created_at: None,
            updated_at: None,
            game_name: None,
            game_genre: None,
        }
    }
}
