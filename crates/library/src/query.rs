//! Sorting, searching and pagination of the game list.
//!
//! Everything here is derived from a slice of games; nothing touches the
//! backend. [`LibraryBrowser`] holds the user's search term and page and
//! produces a [`LibraryView`] for a given game list.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use ludoteca_protocol::Game;
use ludoteca_settings::Settings;

use crate::quota::{QuotaKind, QuotaStatus, Quotas};
use crate::text::collate;

const DEFAULT_PLACEHOLDER: &str = "Search your library";
const DEFAULT_NO_RESULTS: &str = "No matches for the applied filters";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    /// Creation date (`fechaCreacion`).
    #[default]
    Date,
    Name,
    Year,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Order of the library, written as `"<field>-<direction>"` in the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Parses `fecha|nombre|año|ano` and `asc|desc`; anything else falls back
    /// to newest first.
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_lowercase();
        let mut parts = value.split('-');
        let field = match parts.next().unwrap_or_default() {
            "nombre" => SortField::Name,
            "año" | "ano" => SortField::Year,
            _ => SortField::Date,
        };
        let direction = match parts.next() {
            Some("asc") => SortDirection::Asc,
            _ => SortDirection::Desc,
        };
        Self { field, direction }
    }

    fn compare(&self, a: &Game, b: &Game) -> Ordering {
        let ord = match self.field {
            SortField::Name => collate(&a.name, &b.name),
            SortField::Year => a.year.unwrap_or(0).cmp(&b.year.unwrap_or(0)),
            SortField::Date => timestamp_millis(a.created_at.as_deref())
                .cmp(&timestamp_millis(b.created_at.as_deref())),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

/// Milliseconds since the epoch of an ISO timestamp; 0 when missing or
/// unparsable. Timestamps without an offset are read as UTC.
pub fn timestamp_millis(value: Option<&str>) -> i64 {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return 0;
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.and_utc().timestamp_millis();
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// A game attribute that search can look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchField {
    Name,
    Genre,
    Platform,
    Developer,
    Store,
    Synopsis,
    Year,
    Id,
    Image,
    /// A backend field without a named accessor.
    Custom(String),
}

impl SearchField {
    /// Maps a settings field name (already lower-cased) to a field.
    pub fn parse(name: &str) -> Self {
        match name {
            "nombre" => SearchField::Name,
            "genero" => SearchField::Genre,
            "plataforma" => SearchField::Platform,
            "desarrollador" => SearchField::Developer,
            "tienda" => SearchField::Store,
            "sinopsis" => SearchField::Synopsis,
            "año" | "ano" => SearchField::Year,
            "id" => SearchField::Id,
            "imagen" => SearchField::Image,
            other => SearchField::Custom(other.to_string()),
        }
    }

    /// Whether the field contains `term`, which must already be lower-cased.
    pub fn matches(&self, game: &Game, term: &str) -> bool {
        let contains = |text: &str| text.to_lowercase().contains(term);
        match self {
            SearchField::Name => contains(&game.name),
            SearchField::Genre => contains(&game.genre),
            SearchField::Platform => contains(&game.platform),
            SearchField::Developer => game.developer.as_deref().is_some_and(contains),
            SearchField::Store => game.store.as_deref().is_some_and(contains),
            SearchField::Synopsis => contains(&game.synopsis),
            SearchField::Year => game
                .year
                .filter(|y| *y != 0)
                .is_some_and(|y| y.to_string().contains(term)),
            SearchField::Id => contains(&game.id),
            SearchField::Image => contains(&game.image),
            SearchField::Custom(name) => game
                .custom_field(name)
                .is_some_and(|v| v.to_search_text().contains(term)),
        }
    }
}

/// Resolves configured field names, falling back to name, genre and platform.
pub fn search_fields(configured: &[String]) -> Vec<SearchField> {
    let fields: Vec<SearchField> = configured
        .iter()
        .map(|f| f.trim().to_lowercase())
        .filter(|f| !f.is_empty())
        .map(|f| SearchField::parse(&f))
        .collect();
    if fields.is_empty() {
        vec![SearchField::Name, SearchField::Genre, SearchField::Platform]
    } else {
        fields
    }
}

/// The base list: optionally only completed games, in `order`.
pub fn configured_games<'a>(
    games: &'a [Game],
    order: SortOrder,
    only_completed: bool,
) -> Vec<&'a Game> {
    let mut list: Vec<&Game> = games
        .iter()
        .filter(|g| !only_completed || g.is_completed())
        .collect();
    list.sort_by(|a, b| order.compare(a, b));
    list
}

/// Games where any of `fields` contains `term`. A blank term keeps all.
pub fn filter_games<'a>(games: &[&'a Game], fields: &[SearchField], term: &str) -> Vec<&'a Game> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return games.to_vec();
    }
    games
        .iter()
        .copied()
        .filter(|g| fields.iter().any(|f| f.matches(g, &term)))
        .collect()
}

/// Number of pages for `len` items; 1 when pagination is off.
pub fn total_pages(len: usize, page_size: Option<usize>) -> usize {
    match page_size {
        Some(size) if size > 0 => len.div_ceil(size).max(1),
        _ => 1,
    }
}

/// Items of the 1-based `page`; everything when pagination is off.
pub fn paginate<T>(items: &[T], page: usize, page_size: Option<usize>) -> &[T] {
    match page_size {
        Some(size) if size > 0 => {
            let start = page.saturating_sub(1).saturating_mul(size).min(items.len());
            let end = start.saturating_add(size).min(items.len());
            &items[start..end]
        }
        _ => items,
    }
}

/// Number of games whose genre is exactly one of the configured genres.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Aggregates over the base list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryStats {
    pub total: usize,
    pub completed: usize,
    /// `total - completed`.
    pub pending: usize,
    pub genres: Vec<GenreCount>,
    pub favorites_quota: QuotaStatus,
    pub pending_quota: QuotaStatus,
}

pub fn library_stats(games: &[&Game], genres: &[String], quotas: &Quotas) -> LibraryStats {
    let total = games.len();
    let completed = games.iter().filter(|g| g.is_completed()).count();
    LibraryStats {
        total,
        completed,
        pending: total.saturating_sub(completed),
        genres: genres
            .iter()
            .map(|genre| GenreCount {
                genre: genre.clone(),
                count: games.iter().filter(|g| g.genre == *genre).count(),
            })
            .collect(),
        favorites_quota: quotas.status(QuotaKind::Favorites, games.iter().copied()),
        pending_quota: quotas.status(QuotaKind::Pending, games.iter().copied()),
    }
}

/// One computed state of the library page.
#[derive(Debug, Clone)]
pub struct LibraryView<'a> {
    /// Base list, sorted, before search.
    pub configured: Vec<&'a Game>,
    pub filtered: Vec<&'a Game>,
    pub page_items: Vec<&'a Game>,
    pub page: usize,
    pub total_pages: usize,
    pub search_active: bool,
    pub stats: LibraryStats,
}

impl LibraryView<'_> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Search and pagination state of the library page.
#[derive(Debug, Clone)]
pub struct LibraryBrowser {
    order: SortOrder,
    only_completed: bool,
    fields: Vec<SearchField>,
    page_size: Option<usize>,
    genres: Vec<String>,
    quotas: Quotas,
    placeholder: String,
    no_results: String,
    term: String,
    page: usize,
    total_pages: usize,
}

impl LibraryBrowser {
    pub fn new(settings: &Settings) -> Self {
        let library = &settings.library;
        Self {
            order: SortOrder::parse(&library.default_order),
            only_completed: library.show_only_completed,
            fields: search_fields(&library.search_fields),
            page_size: library.page_size.filter(|s| *s > 0),
            genres: library.genres.clone(),
            quotas: Quotas::from_settings(settings),
            placeholder: library
                .search_placeholder
                .clone()
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.into()),
            no_results: library
                .no_results_text
                .clone()
                .or_else(|| settings.ui.messages.no_results.clone())
                .unwrap_or_else(|| DEFAULT_NO_RESULTS.into()),
            term: String::new(),
            page: 1,
            total_pages: 1,
        }
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn no_results_text(&self) -> &str {
        &self.no_results
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Changing the term returns to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term != self.term {
            self.term = term;
            self.page = 1;
        }
    }

    pub fn clear_search(&mut self) {
        self.set_search_term(String::new());
    }

    /// Changing the page size returns to the first page. `None` or 0
    /// disables pagination.
    pub fn set_page_size(&mut self, size: Option<usize>) {
        let size = size.filter(|s| *s > 0);
        if size != self.page_size {
            self.page_size = size;
            self.page = 1;
        }
    }

    /// Moves to `page` if it exists in the last computed view.
    pub fn go_to(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages {
            return false;
        }
        self.page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to(self.page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to(self.page.saturating_sub(1))
    }

    /// Computes the view for `games`, clamping the page to the last one.
    pub fn view<'a>(&mut self, games: &'a [Game]) -> LibraryView<'a> {
        let configured = configured_games(games, self.order, self.only_completed);
        let filtered = filter_games(&configured, &self.fields, &self.term);

        self.total_pages = total_pages(filtered.len(), self.page_size);
        self.page = self.page.clamp(1, self.total_pages);

        let page_items = paginate(&filtered, self.page, self.page_size).to_vec();
        let stats = library_stats(&configured, &self.genres, &self.quotas);

        LibraryView {
            search_active: !self.term.trim().is_empty(),
            page: self.page,
            total_pages: self.total_pages,
            configured,
            filtered,
            page_items,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::game;
    use serde_json::json;

    fn dated(id: &str, name: &str, created: &str, year: i32) -> Game {
        let mut g = game(id, name);
        g.created_at = Some(created.into());
        g.year = Some(year);
        g
    }

    fn sample() -> Vec<Game> {
        vec![
            dated("a", "Zelda", "2024-01-01T00:00:00Z", 2017),
            dated("b", "Ápex", "2024-03-01", 2019),
            dated("c", "celeste", "2024-02-01T12:00:00", 2018),
        ]
    }

    fn ids(games: &[&Game]) -> Vec<String> {
        games.iter().map(|g| g.id.clone()).collect()
    }

    #[test]
    fn sort_order_parsing() {
        assert_eq!(SortOrder::parse("nombre-asc").field, SortField::Name);
        assert_eq!(SortOrder::parse("NOMBRE-ASC").direction, SortDirection::Asc);
        assert_eq!(SortOrder::parse("año").field, SortField::Year);
        assert_eq!(SortOrder::parse("ano-desc").field, SortField::Year);
        assert_eq!(SortOrder::parse("rating-up"), SortOrder::default());
        assert_eq!(SortOrder::parse(""), SortOrder::default());
    }

    #[test]
    fn sorts_by_date_desc_by_default() {
        let games = sample();
        let list = configured_games(&games, SortOrder::default(), false);
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn sorts_by_name_ignoring_accents_and_case() {
        let games = sample();
        let list = configured_games(&games, SortOrder::parse("nombre-asc"), false);
        assert_eq!(ids(&list), vec!["b", "c", "a"]);
    }

    #[test]
    fn sorts_by_year_with_missing_as_zero() {
        let mut games = sample();
        games.push(game("d", "No Year"));
        let list = configured_games(&games, SortOrder::parse("año-asc"), false);
        assert_eq!(ids(&list), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let games = vec![game("1", "Same"), game("2", "Same"), game("3", "Same")];
        let asc = configured_games(&games, SortOrder::parse("fecha-asc"), false);
        let desc = configured_games(&games, SortOrder::parse("fecha-desc"), false);
        assert_eq!(ids(&asc), vec!["1", "2", "3"]);
        assert_eq!(ids(&desc), vec!["1", "2", "3"]);
    }

    #[test]
    fn timestamps() {
        assert_eq!(timestamp_millis(None), 0);
        assert_eq!(timestamp_millis(Some("garbage")), 0);
        assert_eq!(timestamp_millis(Some("1970-01-02")), 86_400_000);
        assert_eq!(timestamp_millis(Some("1970-01-01T00:00:01Z")), 1000);
        assert_eq!(timestamp_millis(Some("1970-01-01T01:00:00+01:00")), 0);
        assert_eq!(timestamp_millis(Some("1970-01-01T00:00:02.5")), 2500);
    }

    #[test]
    fn only_completed_filter() {
        let mut games = sample();
        games[0].completed = Some(true);
        let list = configured_games(&games, SortOrder::default(), true);
        assert_eq!(ids(&list), vec!["a"]);
    }

    #[test]
    fn search_fields_fallback() {
        assert_eq!(
            search_fields(&[]),
            vec![SearchField::Name, SearchField::Genre, SearchField::Platform]
        );
        assert_eq!(
            search_fields(&[" Tienda ".into(), "".into(), "saga".into()]),
            vec![SearchField::Store, SearchField::Custom("saga".into())]
        );
    }

    #[test]
    fn search_matches_any_field() {
        let mut g = game("g1", "Hollow Knight");
        g.genre = "Metroidvania".into();
        g.developer = Some("Team Cherry".into());
        g.year = Some(2017);
        g.extra.insert("saga".into(), json!("Hallownest"));
        g.extra.insert("horas".into(), json!(42));
        let games = [&g];

        let search = |fields: &[SearchField], term: &str| filter_games(&games, fields, term).len();

        assert_eq!(search(&[SearchField::Name], "  KNIGHT "), 1);
        assert_eq!(search(&[SearchField::Name], "cherry"), 0);
        assert_eq!(search(&[SearchField::Name, SearchField::Developer], "cherry"), 1);
        assert_eq!(search(&[SearchField::Year], "201"), 1);
        assert_eq!(search(&[SearchField::Custom("saga".into())], "hallow"), 1);
        assert_eq!(search(&[SearchField::Custom("horas".into())], "42"), 1);
        assert_eq!(search(&[SearchField::Custom("nope".into())], "x"), 0);
        assert_eq!(search(&[SearchField::Store], "steam"), 0);
        assert_eq!(search(&[SearchField::Name], "   "), 1);
    }

    #[test]
    fn zero_year_never_matches() {
        let mut g = game("g1", "X");
        g.year = Some(0);
        assert!(!SearchField::Year.matches(&g, "0"));
    }

    #[test]
    fn filter_is_idempotent() {
        let games = sample();
        let base = configured_games(&games, SortOrder::default(), false);
        let fields = search_fields(&[]);
        let once = filter_games(&base, &fields, "e");
        let twice = filter_games(&once, &fields, "e");
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn pagination_math() {
        assert_eq!(total_pages(0, Some(9)), 1);
        assert_eq!(total_pages(9, Some(9)), 1);
        assert_eq!(total_pages(10, Some(9)), 2);
        assert_eq!(total_pages(100, None), 1);

        let items: Vec<u32> = (1..=10).collect();
        assert_eq!(paginate(&items, 1, Some(9)).len(), 9);
        assert_eq!(paginate(&items, 2, Some(9)), &[10]);
        assert!(paginate(&items, 3, Some(9)).is_empty());
        assert_eq!(paginate(&items, 1, None).len(), 10);

        let joined: Vec<u32> = (1..=total_pages(items.len(), Some(3)))
            .flat_map(|p| paginate(&items, p, Some(3)).to_vec())
            .collect();
        assert_eq!(joined, items);
    }

    fn ten_games() -> Vec<Game> {
        (1..=10)
            .map(|i| {
                let mut g = game(&format!("g{i}"), &format!("Game {i}"));
                if i == 10 {
                    g.name = "Unique Outlier".into();
                }
                g
            })
            .collect()
    }

    #[test]
    fn browser_pages_and_search_reset() {
        let games = ten_games();
        let mut browser = LibraryBrowser::new(&Settings::default());

        let view = browser.view(&games);
        assert_eq!(view.page_items.len(), 9);
        assert_eq!(view.total_pages, 2);
        assert!(view.has_next());

        assert!(browser.next_page());
        let view = browser.view(&games);
        assert_eq!(view.page, 2);
        assert_eq!(view.page_items.len(), 1);

        browser.set_search_term("outlier");
        assert_eq!(browser.page(), 1);
        let view = browser.view(&games);
        assert_eq!(view.filtered.len(), 1);
        assert_eq!(view.total_pages, 1);
        assert!(view.search_active);
        assert_eq!(view.page_items[0].id, "g10");
    }

    #[test]
    fn go_to_ignores_out_of_range() {
        let games = ten_games();
        let mut browser = LibraryBrowser::new(&Settings::default());
        browser.view(&games);

        assert!(!browser.go_to(0));
        assert!(!browser.go_to(3));
        assert!(!browser.previous_page());
        assert!(browser.go_to(2));
        assert!(!browser.next_page());
        assert_eq!(browser.page(), 2);
    }

    #[test]
    fn page_clamped_when_list_shrinks() {
        let mut games = ten_games();
        let mut browser = LibraryBrowser::new(&Settings::default());
        browser.view(&games);
        browser.go_to(2);

        games.truncate(5);
        let view = browser.view(&games);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_items.len(), 5);
    }

    #[test]
    fn page_size_change_resets_page() {
        let games = ten_games();
        let mut browser = LibraryBrowser::new(&Settings::default());
        browser.view(&games);
        browser.go_to(2);

        browser.set_page_size(Some(3));
        assert_eq!(browser.page(), 1);
        assert_eq!(browser.view(&games).total_pages, 4);

        browser.set_page_size(Some(0));
        let view = browser.view(&games);
        assert_eq!(view.total_pages, 1);
        assert_eq!(view.page_items.len(), 10);
    }

    #[test]
    fn stats_and_quota_flags() {
        let settings = Settings::from_value(&json!({
            "biblioteca": {"generos": ["Rol", "Indie"], "maxFavoritos": 1, "maxPendientes": 2}
        }));
        let mut games = ten_games();
        games[0].genre = "Rol".into();
        games[0].completed = Some(true);
        games[0].favorite = Some(true);
        games[1].genre = "Indie".into();
        games[2].genre = "indie".into();

        let mut browser = LibraryBrowser::new(&settings);
        let stats = browser.view(&games).stats;

        assert_eq!(stats.total, 10);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 9);
        assert_eq!(
            stats.genres,
            vec![
                GenreCount { genre: "Rol".into(), count: 1 },
                GenreCount { genre: "Indie".into(), count: 1 },
            ]
        );
        assert!(stats.favorites_quota.reached());
        assert_eq!(stats.pending_quota.count, 9);
        assert_eq!(
            stats.pending_quota.message.as_deref(),
            Some("You reached the limit of 2 pending games.")
        );
    }

    #[test]
    fn copy_defaults_and_overrides() {
        let browser = LibraryBrowser::new(&Settings::default());
        assert_eq!(browser.placeholder(), "Search your library");
        assert_eq!(browser.no_results_text(), "No matches for the applied filters");

        let settings = Settings::from_value(&json!({
            "biblioteca": {"placeholderBusqueda": "Find a game"},
            "ui": {"mensajes": {"sinResultados": "Nothing here"}}
        }));
        let browser = LibraryBrowser::new(&settings);
        assert_eq!(browser.placeholder(), "Find a game");
        assert_eq!(browser.no_results_text(), "Nothing here");
    }
}
