//! Ludoteca backend client.
//!
//! Async HTTP client using `reqwest`. Transport failures are retried with a
//! linear backoff; any HTTP response ends the attempt loop.

use std::time::Duration;

use ludoteca_protocol::envelope::{game_items, promote_legacy_id, review_items};
use ludoteca_protocol::{Game, GameDraft, Review, ReviewPayload};
use ludoteca_settings::ApiSettings;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::url::{normalize_endpoint, resolve_base_url, strip_trailing_slash};

const GAMES_ENDPOINT: &str = "/juegos";

/// Delay before the second attempt; later attempts wait proportionally longer.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(150);

/// Characters left as-is in path segments.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Ludoteca REST client.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    reviews_endpoint: String,
    timeout_ms: u64,
    retries: u32,
}

impl Client {
    /// Creates a client for `base_url` with the given connection settings.
    pub fn new(settings: &ApiSettings, base_url: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &settings.default_headers {
            let invalid = || ApiError::InvalidHeader { name: name.clone() };
            headers.insert(
                HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?,
                HeaderValue::from_str(value).map_err(|_| invalid())?,
            );
        }
        if let Some(token) = settings.auth_token.as_deref().map(str::trim) {
            if !token.is_empty() && !headers.contains_key(AUTHORIZATION) {
                headers.insert(
                    AUTHORIZATION,
                    HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                        ApiError::InvalidHeader {
                            name: AUTHORIZATION.to_string(),
                        }
                    })?,
                );
            }
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if settings.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(settings.timeout_ms));
        }

        Ok(Self {
            http: builder.build()?,
            base_url: strip_trailing_slash(base_url.trim()).to_string(),
            reviews_endpoint: normalize_endpoint(&settings.reviews_endpoint),
            timeout_ms: settings.timeout_ms,
            retries: settings.retries,
        })
    }

    /// Creates a client whose base URL is resolved from the settings, the
    /// environment override and the page origin.
    pub fn from_settings(
        settings: &ApiSettings,
        env_override: Option<&str>,
        origin: Option<&str>,
    ) -> Result<Self, ApiError> {
        let base_url = resolve_base_url(settings, env_override, origin);
        debug!(%base_url, "backend base URL resolved");
        Self::new(settings, &base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn reviews_endpoint(&self) -> &str {
        &self.reviews_endpoint
    }

    // --- Games ---

    pub async fn list_games(&self) -> Result<Vec<Game>, ApiError> {
        let fallback = "Failed to fetch games";
        let resp = self.execute(Method::GET, GAMES_ENDPOINT, None).await?;
        let body = self.parse(resp, fallback).await?;
        let items = game_items(body).ok_or(ApiError::UnexpectedShape("expected a list of games"))?;
        Ok(decode_all(items))
    }

    pub async fn get_game(&self, id: &str) -> Result<Game, ApiError> {
        let resp = self.execute(Method::GET, &game_path(id), None).await?;
        let body = self.parse(resp, "Failed to fetch game").await?;
        decode(promote_legacy_id(body))
    }

    pub async fn create_game(&self, draft: &GameDraft) -> Result<Game, ApiError> {
        let payload = serde_json::to_value(draft)?;
        let resp = self
            .execute(Method::POST, GAMES_ENDPOINT, Some(&payload))
            .await?;
        let body = self.parse(resp, "Failed to create game").await?;
        decode(promote_legacy_id(body))
    }

    pub async fn update_game(&self, id: &str, draft: &GameDraft) -> Result<Game, ApiError> {
        let payload = serde_json::to_value(draft)?;
        let resp = self
            .execute(Method::PUT, &game_path(id), Some(&payload))
            .await?;
        let body = self.parse(resp, "Failed to update game").await?;
        decode(promote_legacy_id(body))
    }

    pub async fn delete_game(&self, id: &str) -> Result<(), ApiError> {
        let resp = self.execute(Method::DELETE, &game_path(id), None).await?;
        self.ensure_success(resp, "Failed to delete game").await
    }

    // --- Reviews ---

    pub async fn list_reviews(&self) -> Result<Vec<Review>, ApiError> {
        let resp = self
            .execute(Method::GET, &self.reviews_endpoint, None)
            .await?;
        let body = self.parse(resp, "Failed to fetch reviews").await?;
        Ok(decode_all(review_items(body)))
    }

    /// Reviews of a single game (`GET <reviews>/juego/:id`).
    pub async fn reviews_for_game(&self, game_id: &str) -> Result<Vec<Review>, ApiError> {
        let path = format!("{}/juego/{}", self.reviews_endpoint, encode_segment(game_id));
        let resp = self.execute(Method::GET, &path, None).await?;
        let body = self
            .parse(resp, "Failed to fetch the game's reviews")
            .await?;
        Ok(decode_all(review_items(body)))
    }

    pub async fn create_review(&self, payload: &ReviewPayload) -> Result<Review, ApiError> {
        let payload = serde_json::to_value(payload)?;
        let resp = self
            .execute(Method::POST, &self.reviews_endpoint, Some(&payload))
            .await?;
        let body = self.parse(resp, "Failed to create review").await?;
        decode(single_review(body))
    }

    pub async fn update_review(
        &self,
        id: &str,
        payload: &ReviewPayload,
    ) -> Result<Review, ApiError> {
        let payload = serde_json::to_value(payload)?;
        let resp = self
            .execute(Method::PUT, &self.review_path(id), Some(&payload))
            .await?;
        let body = self.parse(resp, "Failed to update review").await?;
        decode(single_review(body))
    }

    pub async fn delete_review(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .execute(Method::DELETE, &self.review_path(id), None)
            .await?;
        self.ensure_success(resp, "Failed to delete review").await
    }

    fn review_path(&self, id: &str) -> String {
        format!("{}/{}", self.reviews_endpoint, encode_segment(id))
    }

    // --- Transport ---

    /// Sends a request, retrying transport failures.
    async fn execute(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let attempts = self.retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let mut request = self.http.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().await {
                Ok(resp) => {
                    debug!(%method, %url, status = resp.status().as_u16(), attempt, "response received");
                    return Ok(resp);
                }
                Err(e) if attempt >= attempts => return Err(self.transport_error(e)),
                Err(e) => {
                    let delay = retry_delay(attempt);
                    warn!(
                        %method,
                        %url,
                        attempt,
                        max_attempts = attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout {
                ms: self.timeout_ms,
            }
        } else {
            ApiError::Http(e)
        }
    }

    /// Reads the body as JSON. Empty or malformed bodies yield `None`.
    async fn read_json_body(&self, resp: Response) -> Result<Option<Value>, ApiError> {
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&text) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                debug!(error = %e, "response body is not JSON");
                Ok(None)
            }
        }
    }

    /// Returns the JSON body of a successful response.
    async fn parse(&self, resp: Response, fallback: &str) -> Result<Value, ApiError> {
        let status = resp.status();
        let body = self.read_json_body(resp).await?;
        if !status.is_success() {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: extract_error_message(body.as_ref(), fallback),
            });
        }
        body.ok_or(ApiError::EmptyBody)
    }

    /// Fails on a non-success status; the body of a success is ignored.
    async fn ensure_success(&self, resp: Response, fallback: &str) -> Result<(), ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = self.read_json_body(resp).await?;
        Err(ApiError::Api {
            status: status.as_u16(),
            message: extract_error_message(body.as_ref(), fallback),
        })
    }
}

/// Wait before attempt `attempt + 1`.
pub(crate) fn retry_delay(attempt: u32) -> Duration {
    RETRY_BASE_DELAY * attempt
}

/// Picks the user-facing message out of an error body.
///
/// Looks at `error`, then `detalles`; each may be a string or a list of
/// strings (joined with `". "`). Blank values are skipped.
pub fn extract_error_message(body: Option<&Value>, fallback: &str) -> String {
    let Some(Value::Object(map)) = body else {
        return fallback.to_string();
    };
    ["error", "detalles"]
        .iter()
        .find_map(|key| match map.get(*key)? {
            Value::Array(items) if !items.is_empty() => Some(
                items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(". "),
            ),
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

fn game_path(id: &str) -> String {
    format!("{GAMES_ENDPOINT}/{}", encode_segment(id))
}

/// A single review may come bare or wrapped as `{"resenia": {...}}`.
fn single_review(body: Value) -> Value {
    match body {
        Value::Object(mut map) if matches!(map.get("resenia"), Some(Value::Object(_))) => {
            promote_legacy_id(map.remove("resenia").unwrap_or_default())
        }
        other => promote_legacy_id(other),
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    Ok(serde_json::from_value(value)?)
}

/// Decodes every list item that parses; the rest are logged and dropped.
fn decode_all<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed list item");
                None
            }
        })
        .collect()
}
