fn main() {
    println!("Run `cargo test -p wire-compat` to execute wire compatibility tests.");
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use ludoteca_protocol::envelope::{game_items, review_items};
    use ludoteca_protocol::{Difficulty, FieldValue, Game, Review, ReviewPayload};
    use ludoteca_settings::Settings;

    /// Returns the path to the fixtures directory.
    fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
    }

    /// Loads a fixture JSON file and returns it as a `serde_json::Value`.
    fn load_fixture(name: &str) -> serde_json::Value {
        let path = fixtures_dir().join(name);
        let data = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()));
        serde_json::from_str(&data)
            .unwrap_or_else(|e| panic!("failed to parse fixture {}: {e}", path.display()))
    }

    /// Normalizes JSON values so that integer-valued floats compare equal.
    ///
    /// The backend writes `42` where Rust writes `42.0` for an `f64`.
    fn normalize_value(v: &serde_json::Value) -> serde_json::Value {
        match v {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => serde_json::json!(f),
                None => v.clone(),
            },
            serde_json::Value::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), normalize_value(v)))
                    .collect(),
            ),
            serde_json::Value::Array(arr) => {
                serde_json::Value::Array(arr.iter().map(normalize_value).collect())
            }
            _ => v.clone(),
        }
    }

    /// Deserializes a fixture into a Rust type, re-serializes it, and compares
    /// the JSON values (order-independent, float-normalized comparison).
    fn roundtrip_test<T>(name: &str)
    where
        T: serde::de::DeserializeOwned + serde::Serialize,
    {
        let fixture = load_fixture(name);
        let parsed: T = serde_json::from_value(fixture.clone())
            .unwrap_or_else(|e| panic!("failed to deserialize {name}: {e}"));
        let reserialized = serde_json::to_value(&parsed)
            .unwrap_or_else(|e| panic!("failed to re-serialize {name}: {e}"));

        assert_eq!(
            normalize_value(&fixture),
            normalize_value(&reserialized),
            "roundtrip mismatch for {name}:\n  Backend: {fixture}\n  Rust:    {reserialized}"
        );
    }

    fn reviews_from(name: &str) -> Vec<Review> {
        review_items(load_fixture(name))
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap())
            .collect()
    }

    // --- Games ---

    #[test]
    fn fixture_game_full() {
        roundtrip_test::<Game>("game_full.json");
    }

    #[test]
    fn fixture_games_list() {
        let items = game_items(load_fixture("games_list.json")).expect("games list is an array");
        let games: Vec<Game> = items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap())
            .collect();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, "65f1c2a9e4b0a1b2c3d4e5f6");
        assert_eq!(games[0].year, Some(2017));
        assert!(games[0].is_completed());

        assert_eq!(games[1].year, None);
        assert_eq!(games[1].developer, None);
        assert_eq!(games[1].favorite, None);
        assert!(games[1].is_pending());
        assert_eq!(
            games[1].custom_field("horasEstimadas"),
            Some(FieldValue::Number(12.0))
        );
    }

    // --- Reviews ---

    #[test]
    fn fixture_review_full() {
        roundtrip_test::<Review>("review_full.json");
    }

    #[test]
    fn fixture_review_payload() {
        roundtrip_test::<ReviewPayload>("review_payload.json");
        let payload: ReviewPayload =
            serde_json::from_value(load_fixture("review_payload.json")).unwrap();
        assert_eq!(payload.difficulty, Difficulty::VeryHard);
    }

    #[test]
    fn fixture_review_shapes_agree() {
        let array = reviews_from("reviews_array.json");
        let envelope = reviews_from("reviews_envelope.json");
        let single = reviews_from("review_single.json");

        assert_eq!(array, envelope);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0], array[0]);

        assert_eq!(array[0].id, "r-1");
        assert_eq!(array[0].rating, Some(4));
        assert_eq!(array[0].comment, "Great pacing overall");
        assert_eq!(array[1].difficulty, Some(Difficulty::Normal));
        assert!(!array[1].would_recommend);
    }

    #[test]
    fn fixture_review_both_spellings() {
        let reviews = reviews_from("review_both_spellings.json");
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "r-7");
        assert_eq!(reviews[0].rating, Some(4));
        assert_eq!(reviews[0].comment, "Great pacing overall");
        assert_eq!(reviews[0].difficulty, None);
        assert_eq!(reviews[0].difficulty_text(), Some("Pesadilla"));
    }

    // --- Settings ---

    fn assert_fixture_settings(s: &Settings) {
        assert_eq!(s.api.base_url.as_deref(), Some("https://ludoteca.example.com/api/"));
        assert_eq!(s.api.timeout_ms, 5000);
        assert_eq!(s.api.retries, 2);
        assert_eq!(s.library.genres, vec!["Rol", "Indie"]);
        assert!(s.library.uses_default_games());
        assert_eq!(s.library.games.len(), 1);
        assert!(s.library.games[0].is_favorite());
        assert_eq!(s.library.page_size, Some(6));
        assert_eq!(s.library.default_order, "nombre-asc");
        assert_eq!(s.library.max_favorites, 10);
        assert_eq!(s.library.search_fields, vec!["nombre", "desarrollador", "saga"]);
        assert!(!s.ui.enable_toasts);
        assert_eq!(s.ui.messages.favorites_limit_reached(10), "Max 10 favorites!");
        assert!(!s.integrations.reviews_enabled);

        let theme = s.ui.theme.resolve(None);
        assert_eq!(theme.variant, "claro");
        assert_eq!(theme.palette["primario"], "#ff0066");
        assert_eq!(theme.palette["fondo"], "#f8fafc");
    }

    #[test]
    fn fixture_settings_json() {
        let settings = Settings::load(&fixtures_dir().join("settings.json")).unwrap();
        assert_fixture_settings(&settings);
    }

    #[test]
    fn fixture_settings_toml_matches_json() {
        let toml = Settings::load(&fixtures_dir().join("settings.toml")).unwrap();
        let json = Settings::load(&fixtures_dir().join("settings.json")).unwrap();
        assert_fixture_settings(&toml);
        assert_eq!(toml, json);
    }
}
