//! Game records as stored by the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de;

/// A game in the library.
///
/// Field names on the wire are the backend's (`nombre`, `año`, ...). Keys the
/// client does not know are kept in [`Game::extra`] so they survive an update
/// round-trip and can be searched as custom fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    #[serde(default, deserialize_with = "de::string_or_empty")]
    pub id: String,
    #[serde(rename = "nombre", default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(
        rename = "año",
        default,
        deserialize_with = "de::year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(rename = "genero", default, deserialize_with = "de::string_or_empty")]
    pub genre: String,
    #[serde(rename = "plataforma", default, deserialize_with = "de::string_or_empty")]
    pub platform: String,
    #[serde(rename = "imagen", default, deserialize_with = "de::string_or_empty")]
    pub image: String,
    #[serde(rename = "sinopsis", default, deserialize_with = "de::string_or_empty")]
    pub synopsis: String,
    #[serde(
        rename = "desarrollador",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub developer: Option<String>,
    #[serde(
        rename = "tienda",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<String>,
    #[serde(
        rename = "completado",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<bool>,
    #[serde(
        rename = "favorito",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub favorite: Option<bool>,
    #[serde(
        rename = "pendiente",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub pending: Option<bool>,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    /// Backend fields without a named accessor.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Data for a game that has not been created yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDraft {
    #[serde(rename = "nombre", default, deserialize_with = "de::string_or_empty")]
    pub name: String,
    #[serde(
        rename = "año",
        default,
        deserialize_with = "de::year",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(rename = "genero", default, deserialize_with = "de::string_or_empty")]
    pub genre: String,
    #[serde(rename = "plataforma", default, deserialize_with = "de::string_or_empty")]
    pub platform: String,
    #[serde(rename = "imagen", default, deserialize_with = "de::string_or_empty")]
    pub image: String,
    #[serde(rename = "sinopsis", default, deserialize_with = "de::string_or_empty")]
    pub synopsis: String,
    #[serde(
        rename = "desarrollador",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub developer: Option<String>,
    #[serde(
        rename = "tienda",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub store: Option<String>,
    #[serde(
        rename = "completado",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub completed: Option<bool>,
    #[serde(
        rename = "favorito",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub favorite: Option<bool>,
    #[serde(
        rename = "pendiente",
        default,
        deserialize_with = "de::optional_bool",
        skip_serializing_if = "Option::is_none"
    )]
    pub pending: Option<bool>,
    #[serde(
        rename = "fechaCreacion",
        default,
        deserialize_with = "de::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    /// Backend fields carried over from the stored game so an update does not
    /// drop them.
    #[serde(flatten, default)]
    pub extra: BTreeMap<String, Value>,
}

/// Status flags shared by [`Game`] and [`GameDraft`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameFlags {
    pub completed: Option<bool>,
    pub favorite: Option<bool>,
    pub pending: Option<bool>,
}

impl GameFlags {
    /// Whether the game is marked as favorite.
    pub fn is_favorite(&self) -> bool {
        self.favorite.unwrap_or(false)
    }

    /// Whether the game is marked as completed.
    pub fn is_completed(&self) -> bool {
        self.completed.unwrap_or(false)
    }

    /// Whether the game is still pending.
    ///
    /// An explicit `pendiente` wins; otherwise a game is pending unless it is
    /// completed. A game with neither flag counts as pending.
    pub fn is_pending(&self) -> bool {
        match (self.pending, self.completed) {
            (Some(pending), _) => pending,
            (None, Some(completed)) => !completed,
            (None, None) => true,
        }
    }
}

/// A custom field value visible to search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    /// Text used for substring matching; numbers are written without a
    /// trailing `.0`.
    pub fn to_search_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.to_lowercase(),
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

impl Game {
    pub fn flags(&self) -> GameFlags {
        GameFlags {
            completed: self.completed,
            favorite: self.favorite,
            pending: self.pending,
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.flags().is_favorite()
    }

    pub fn is_completed(&self) -> bool {
        self.flags().is_completed()
    }

    pub fn is_pending(&self) -> bool {
        self.flags().is_pending()
    }

    /// Looks up a backend field without a named accessor.
    ///
    /// Only string and number values are exposed.
    pub fn custom_field(&self, name: &str) -> Option<FieldValue<'_>> {
        match self.extra.get(name)? {
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            _ => None,
        }
    }

    /// Returns the editable part of this game.
    pub fn to_draft(&self) -> GameDraft {
        GameDraft {
            name: self.name.clone(),
            year: self.year,
            genre: self.genre.clone(),
            platform: self.platform.clone(),
            image: self.image.clone(),
            synopsis: self.synopsis.clone(),
            developer: self.developer.clone(),
            store: self.store.clone(),
            completed: self.completed,
            favorite: self.favorite,
            pending: self.pending,
            created_at: self.created_at.clone(),
            extra: self.extra.clone(),
        }
    }
}

impl GameDraft {
    pub fn flags(&self) -> GameFlags {
        GameFlags {
            completed: self.completed,
            favorite: self.favorite,
            pending: self.pending,
        }
    }

    /// Turns the draft into a stored game with the given id.
    pub fn into_game(self, id: impl Into<String>) -> Game {
        Game {
            id: id.into(),
            name: self.name,
            year: self.year,
            genre: self.genre,
            platform: self.platform,
            image: self.image,
            synopsis: self.synopsis,
            developer: self.developer,
            store: self.store,
            completed: self.completed,
            favorite: self.favorite,
            pending: self.pending,
            created_at: self.created_at,
            extra: self.extra,
        }
    }
}
