//! Typed application settings.
//!
//! Settings come from a loosely-typed JSON document (see [`crate::source`]).
//! Every field has a fallback: missing keys, wrong types and unusable values
//! resolve to the default instead of failing, so a half-written settings
//! file still produces a working configuration.

use std::collections::BTreeMap;

use ludoteca_protocol::Game;
use ludoteca_protocol::envelope::promote_legacy_id;
use serde_json::{Map, Value};
use tracing::warn;

use crate::template::fill_template;

/// Genres used when the settings do not list any.
pub const BASE_GENRES: [&str; 11] = [
    "Acción",
    "Aventura",
    "Rol",
    "Estrategia",
    "Simulación",
    "Deportes",
    "Carreras",
    "Plataformas",
    "Puzzle",
    "Metroidvania",
    "Indie",
];

/// Search fields used when the settings do not list any.
pub const DEFAULT_SEARCH_FIELDS: [&str; 3] = ["nombre", "genero", "plataforma"];

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_RETRIES: u32 = 1;
const DEFAULT_REVIEWS_ENDPOINT: &str = "/resenias";
const DEFAULT_PAGE_SIZE: usize = 9;
const DEFAULT_ORDER: &str = "fecha-desc";
const DEFAULT_MAX_FAVORITES: usize = 50;
const DEFAULT_TRANSITION_MS: u64 = 300;
const DEFAULT_THEME: &str = "oscuro";
const DEFAULT_FAVORITES_LIMIT_MESSAGE: &str = "You reached the limit of {limite} favorite games.";
const DEFAULT_PENDING_LIMIT_MESSAGE: &str = "You reached the limit of {limite} pending games.";

/// Complete application settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub api: ApiSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
    pub integrations: IntegrationSettings,
}

/// Backend connection settings (`api`).
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Use `base_url` even when an environment override is present.
    pub force_base_url: bool,
    pub base_url: Option<String>,
    /// Per-request timeout; 0 disables it.
    pub timeout_ms: u64,
    /// Retries after the first attempt.
    pub retries: u32,
    pub default_headers: BTreeMap<String, String>,
    pub auth_token: Option<String>,
    /// Serve everything from an in-memory backend.
    pub use_mock: bool,
    pub reviews_endpoint: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            force_base_url: false,
            base_url: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retries: DEFAULT_RETRIES,
            default_headers: BTreeMap::from([("Accept".into(), "application/json".into())]),
            auth_token: None,
            use_mock: false,
            reviews_endpoint: DEFAULT_REVIEWS_ENDPOINT.into(),
        }
    }
}

/// Library behaviour (`biblioteca`).
#[derive(Debug, Clone, PartialEq)]
pub struct LibrarySettings {
    pub use_default_games: bool,
    pub genres: Vec<String>,
    /// Games shown when the backend is unreachable (and before it answers).
    pub games: Vec<Game>,
    /// `None` disables pagination.
    pub page_size: Option<usize>,
    /// `"<field>-<direction>"`, e.g. `"nombre-asc"`.
    pub default_order: String,
    pub show_only_completed: bool,
    /// 0 means unlimited.
    pub max_favorites: usize,
    /// 0 means unlimited.
    pub max_pending: usize,
    pub search_fields: Vec<String>,
    pub search_placeholder: Option<String>,
    pub no_results_text: Option<String>,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            use_default_games: false,
            genres: BASE_GENRES.iter().map(|g| g.to_string()).collect(),
            games: Vec::new(),
            page_size: Some(DEFAULT_PAGE_SIZE),
            default_order: DEFAULT_ORDER.into(),
            show_only_completed: false,
            max_favorites: DEFAULT_MAX_FAVORITES,
            max_pending: 0,
            search_fields: DEFAULT_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect(),
            search_placeholder: None,
            no_results_text: None,
        }
    }
}

impl LibrarySettings {
    /// Whether the configured default games should seed the store.
    pub fn uses_default_games(&self) -> bool {
        self.use_default_games && !self.games.is_empty()
    }
}

/// Presentation settings (`ui`).
#[derive(Debug, Clone, PartialEq)]
pub struct UiSettings {
    pub enable_toasts: bool,
    pub messages: UiMessages,
    pub theme: ThemeSettings,
    pub transition_ms: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            enable_toasts: true,
            messages: UiMessages::default(),
            theme: ThemeSettings::default(),
            transition_ms: DEFAULT_TRANSITION_MS,
        }
    }
}

/// User-facing copy with `{placeholder}` templates (`ui.mensajes`).
#[derive(Debug, Clone, PartialEq)]
pub struct UiMessages {
    pub favorites_limit: String,
    pub pending_limit: String,
    pub no_results: Option<String>,
}

impl Default for UiMessages {
    fn default() -> Self {
        Self {
            favorites_limit: DEFAULT_FAVORITES_LIMIT_MESSAGE.into(),
            pending_limit: DEFAULT_PENDING_LIMIT_MESSAGE.into(),
            no_results: None,
        }
    }
}

impl UiMessages {
    /// Message shown when the favorites quota is reached.
    pub fn favorites_limit_reached(&self, limit: usize) -> String {
        fill_template(&self.favorites_limit, &[("limite", &limit.to_string())])
    }

    /// Message shown when the pending quota is reached.
    pub fn pending_limit_reached(&self, limit: usize) -> String {
        fill_template(&self.pending_limit, &[("limite", &limit.to_string())])
    }
}

/// Colour palette and gradients of one theme.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemePreset {
    pub palette: BTreeMap<String, String>,
    pub gradients: BTreeMap<String, String>,
}

/// Theme selection (`ui.tema`).
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSettings {
    pub variant: String,
    pub presets: BTreeMap<String, ThemePreset>,
    /// Overrides applied on top of whichever preset is active.
    pub palette: BTreeMap<String, String>,
    pub gradients: BTreeMap<String, String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        let preset = |pairs: [(&str, &str); 4], portada: &str| ThemePreset {
            palette: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            gradients: BTreeMap::from([("portada".to_string(), portada.to_string())]),
        };
        Self {
            variant: DEFAULT_THEME.into(),
            presets: BTreeMap::from([
                (
                    "oscuro".to_string(),
                    preset(
                        [
                            ("primario", "#7c3aed"),
                            ("secundario", "#22d3ee"),
                            ("fondo", "#0f172a"),
                            ("texto", "#e2e8f0"),
                        ],
                        "linear-gradient(135deg, #7c3aed, #22d3ee)",
                    ),
                ),
                (
                    "claro".to_string(),
                    preset(
                        [
                            ("primario", "#6d28d9"),
                            ("secundario", "#0891b2"),
                            ("fondo", "#f8fafc"),
                            ("texto", "#0f172a"),
                        ],
                        "linear-gradient(135deg, #ede9fe, #cffafe)",
                    ),
                ),
            ]),
            palette: BTreeMap::new(),
            gradients: BTreeMap::new(),
        }
    }
}

/// Optional features (`integraciones`).
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationSettings {
    pub reviews_enabled: bool,
}

impl Default for IntegrationSettings {
    fn default() -> Self {
        Self {
            reviews_enabled: true,
        }
    }
}

impl Settings {
    /// Resolves settings from JSON text.
    ///
    /// Text that is not valid JSON resolves to the defaults.
    pub fn from_json_str(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!(error = %e, "settings are not valid JSON, using defaults");
                Self::default()
            }
        }
    }

    /// Resolves settings from an already-parsed document.
    pub fn from_value(value: &Value) -> Self {
        let root = Section::root(value);
        Self {
            api: parse_api(&root.child("api")),
            library: parse_library(&root.child("biblioteca")),
            ui: parse_ui(&root.child("ui")),
            integrations: parse_integrations(&root.child("integraciones")),
        }
    }
}

fn parse_api(section: &Section<'_>) -> ApiSettings {
    let fallback = ApiSettings::default();
    ApiSettings {
        force_base_url: section.flag("forceBaseUrl", fallback.force_base_url),
        base_url: section.text("baseUrl"),
        timeout_ms: section
            .number("timeoutMs")
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(fallback.timeout_ms),
        retries: section
            .number("reintentos")
            .map(|n| n.max(0.0).min(u32::MAX as f64) as u32)
            .unwrap_or(fallback.retries),
        default_headers: section
            .string_map("defaultHeaders")
            .unwrap_or(fallback.default_headers),
        auth_token: section.text("authToken"),
        use_mock: section.flag("usarMock", fallback.use_mock),
        reviews_endpoint: section
            .text("reseniasEndpoint")
            .unwrap_or(fallback.reviews_endpoint),
    }
}

fn parse_library(section: &Section<'_>) -> LibrarySettings {
    let fallback = LibrarySettings::default();

    let genres = section
        .strings("generos")
        .map(dedupe)
        .filter(|g| !g.is_empty())
        .unwrap_or(fallback.genres);

    let games = section
        .array("juegos")
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter_map(|(index, item)| {
                    match serde_json::from_value::<Game>(promote_legacy_id(item.clone())) {
                        Ok(game) => Some(game),
                        Err(e) => {
                            warn!(index, error = %e, "skipping unparsable default game");
                            None
                        }
                    }
                })
                .collect()
        })
        .unwrap_or_default();

    let page_size = match section.number("juegosPorPagina") {
        Some(n) if n >= 1.0 => Some(n.floor() as usize),
        Some(_) => None,
        None => fallback.page_size,
    };

    let search_fields = section
        .strings("camposBusqueda")
        .map(|fields| fields.into_iter().map(|f| f.to_lowercase()).collect::<Vec<_>>())
        .filter(|f| !f.is_empty())
        .unwrap_or(fallback.search_fields);

    LibrarySettings {
        use_default_games: section.flag("habilitarJuegosPredeterminados", false),
        genres,
        games,
        page_size,
        default_order: section
            .text("ordenPredeterminado")
            .unwrap_or(fallback.default_order),
        show_only_completed: section.flag("mostrarSoloCompletados", false),
        max_favorites: section
            .number("maxFavoritos")
            .map(|n| n.max(0.0) as usize)
            .unwrap_or(fallback.max_favorites),
        max_pending: section
            .number("maxPendientes")
            .map(|n| n.max(0.0) as usize)
            .unwrap_or(fallback.max_pending),
        search_fields,
        search_placeholder: section.text("placeholderBusqueda"),
        no_results_text: section.text("textoSinResultados"),
    }
}

fn parse_ui(section: &Section<'_>) -> UiSettings {
    let fallback = UiSettings::default();
    let messages = section.child("mensajes");
    let theme = section.child("tema");

    let presets = theme
        .object("presets")
        .map(|presets| {
            presets
                .iter()
                .filter_map(|(name, preset)| {
                    let preset = Section(preset.as_object());
                    preset.0?;
                    Some((
                        name.clone(),
                        ThemePreset {
                            palette: preset.string_map("paletaColores").unwrap_or_default(),
                            gradients: preset.string_map("gradientes").unwrap_or_default(),
                        },
                    ))
                })
                .collect::<BTreeMap<_, _>>()
        })
        .filter(|p| !p.is_empty())
        .unwrap_or(fallback.theme.presets);

    UiSettings {
        enable_toasts: section.flag("habilitarToasts", fallback.enable_toasts),
        messages: UiMessages {
            favorites_limit: messages
                .text("limiteFavoritos")
                .unwrap_or(fallback.messages.favorites_limit),
            pending_limit: messages
                .text("limitePendientes")
                .unwrap_or(fallback.messages.pending_limit),
            no_results: messages.text("sinResultados"),
        },
        theme: ThemeSettings {
            variant: theme.text("variant").unwrap_or(fallback.theme.variant),
            presets,
            palette: theme.string_map("paletaColores").unwrap_or_default(),
            gradients: theme.string_map("gradientes").unwrap_or_default(),
        },
        transition_ms: section
            .number("duracionTransicionMs")
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(fallback.transition_ms),
    }
}

fn parse_integrations(section: &Section<'_>) -> IntegrationSettings {
    IntegrationSettings {
        reviews_enabled: section
            .child("featureFlags")
            .flag("habilitarResenias", true),
    }
}

/// Removes duplicates, keeping the first occurrence.
fn dedupe(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

/// A possibly-missing JSON object with typed, forgiving accessors.
struct Section<'a>(Option<&'a Map<String, Value>>);

impl<'a> Section<'a> {
    fn root(value: &'a Value) -> Self {
        Section(value.as_object())
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|map| map.get(key))
    }

    fn child(&self, key: &str) -> Section<'a> {
        Section(self.get(key).and_then(Value::as_object))
    }

    fn object(&self, key: &str) -> Option<&'a Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    fn array(&self, key: &str) -> Option<&'a Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Trimmed, non-blank string.
    fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Finite number.
    fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64).filter(|n| n.is_finite())
    }

    /// Array of trimmed, non-blank strings; other entries are dropped.
    fn strings(&self, key: &str) -> Option<Vec<String>> {
        self.array(key).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Object whose string values are kept; other values are dropped.
    fn string_map(&self, key: &str) -> Option<BTreeMap<String, String>> {
        self.object(key).map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                .collect()
        })
    }
}
