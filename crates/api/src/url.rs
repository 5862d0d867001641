//! Base URL selection.

use ludoteca_settings::ApiSettings;
use reqwest::Url;
use tracing::debug;

/// Environment variable that overrides the configured base URL.
pub const ENV_API_URL: &str = "LUDOTECA_API_URL";

/// Base URL used when nothing is configured and no origin is known.
pub const FALLBACK_BASE_URL: &str = "http://localhost:3000/api";

/// Frontend development server ports; the backend listens on 3000 instead.
const DEV_PORTS: [u16; 3] = [8080, 5173, 4173];
const BACKEND_DEV_PORT: u16 = 3000;

/// Picks the backend base URL.
///
/// In order: a forced configured URL, the environment override, the
/// configured URL, then a same-origin default derived from `origin`. Blank
/// values count as absent. A trailing `/` is removed.
pub fn resolve_base_url(
    settings: &ApiSettings,
    env_override: Option<&str>,
    origin: Option<&str>,
) -> String {
    let configured = non_blank(settings.base_url.as_deref());
    let from_env = non_blank(env_override);

    let chosen = match (settings.force_base_url, configured, from_env) {
        (true, Some(url), _) => url,
        (_, _, Some(url)) => url,
        (_, Some(url), _) => url,
        _ => return default_base_url(origin),
    };
    strip_trailing_slash(chosen).to_string()
}

/// Derives `<scheme>://<host>[:port]/api` from the page origin.
///
/// Development ports are rewritten to the backend port and the standard
/// HTTP(S) ports are omitted.
pub fn default_base_url(origin: Option<&str>) -> String {
    let Some(origin) = non_blank(origin) else {
        return FALLBACK_BASE_URL.to_string();
    };
    let url = match Url::parse(origin) {
        Ok(url) => url,
        Err(e) => {
            debug!(%origin, error = %e, "unparsable origin, using fallback base URL");
            return FALLBACK_BASE_URL.to_string();
        }
    };
    let Some(host) = url.host_str() else {
        return FALLBACK_BASE_URL.to_string();
    };

    let port = match url.port() {
        Some(p) if DEV_PORTS.contains(&p) => Some(BACKEND_DEV_PORT),
        Some(80 | 443) | None => None,
        other => other,
    };

    match port {
        Some(port) => format!("{}://{host}:{port}/api", url.scheme()),
        None => format!("{}://{host}/api", url.scheme()),
    }
}

/// Ensures an endpoint starts with `/`.
pub fn normalize_endpoint(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    if endpoint.starts_with('/') {
        endpoint.to_string()
    } else {
        format!("/{endpoint}")
    }
}

pub(crate) fn strip_trailing_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
