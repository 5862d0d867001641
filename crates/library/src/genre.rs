//! Genre pages addressed by URL slug.

use std::borrow::Cow;

use ludoteca_protocol::Game;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::query::{SearchField, filter_games};
use crate::text::fold_diacritics;

/// Fields searched inside a genre page.
const GENRE_SEARCH_FIELDS: [SearchField; 6] = [
    SearchField::Name,
    SearchField::Platform,
    SearchField::Developer,
    SearchField::Store,
    SearchField::Synopsis,
    SearchField::Year,
];

/// Comparable form of a genre: no accents, lower case, only `[a-z0-9 ]`,
/// single spaces.
pub fn normalize_genre(text: &str) -> String {
    let folded: String = fold_diacritics(text)
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_lowercase() || c.is_ascii_digit() { c } else { ' ' })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Percent-decodes a slug; invalid UTF-8 is replaced.
pub fn decode_slug(slug: &str) -> Cow<'_, str> {
    percent_decode_str(slug).decode_utf8_lossy()
}

/// Slug that [`GenreView::resolve`] maps back to `genre`.
pub fn genre_slug(genre: &str) -> String {
    utf8_percent_encode(genre, NON_ALPHANUMERIC).to_string()
}

/// The games of one genre.
#[derive(Debug, Clone)]
pub struct GenreView<'a> {
    /// Display name of the genre.
    pub name: String,
    /// Normalised slug; empty when the slug was blank.
    pub key: String,
    pub games: Vec<&'a Game>,
}

impl<'a> GenreView<'a> {
    /// Resolves `slug` against the configured genres and the game list.
    pub fn resolve(slug: &str, genres: &[String], games: &'a [Game]) -> Self {
        let decoded = decode_slug(slug);
        let key = normalize_genre(&decoded);
        if key.is_empty() {
            return Self {
                name: String::new(),
                key,
                games: Vec::new(),
            };
        }

        let matching: Vec<&Game> = games
            .iter()
            .filter(|g| normalize_genre(&g.genre) == key)
            .collect();

        let name = genres
            .iter()
            .find(|g| normalize_genre(g) == key)
            .cloned()
            .or_else(|| matching.first().map(|g| g.genre.clone()))
            .unwrap_or_else(|| title_from_slug(&decoded));

        Self {
            name,
            key,
            games: matching,
        }
    }

    /// Games of this genre matching `term`; all of them for a blank term.
    pub fn search(&self, term: &str) -> Vec<&'a Game> {
        filter_games(&self.games, &GENRE_SEARCH_FIELDS, term)
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

fn title_from_slug(decoded: &str) -> String {
    let spaced = decoded
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
