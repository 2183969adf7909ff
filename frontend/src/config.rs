//! Backend endpoints. The project URL and publishable key are baked in at
//! build time; defaults point at a local development stack.

const DEFAULT_BACKEND_URL: &str = "http://localhost:54321";
const DEFAULT_ANON_KEY: &str = "lumio-dev-anon-key";

pub fn backend_url() -> String {
    option_env!("LUMIO_BACKEND_URL")
        .unwrap_or(DEFAULT_BACKEND_URL)
        .trim_end_matches('/')
        .to_string()
}

pub fn anon_key() -> &'static str {
    option_env!("LUMIO_ANON_KEY").unwrap_or(DEFAULT_ANON_KEY)
}

/// Row endpoint: `query` is a built `Select` (or a bare table name for
/// inserts).
pub fn rest_url(query: &str) -> String {
    format!("{}/rest/v1/{query}", backend_url())
}

pub fn auth_url(path: &str) -> String {
    format!("{}/auth/v1/{path}", backend_url())
}

pub fn storage_object_url(bucket: &str, path: &str) -> String {
    format!("{}/storage/v1/object/{bucket}/{path}", backend_url())
}

/// The realtime WebSocket endpoint, with the http scheme swapped for ws.
pub fn realtime_url() -> String {
    let base = backend_url();
    let ws_base = if let Some(rest) = base.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = base.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        base
    };
    format!("{ws_base}/realtime/v1/websocket?apikey={}", anon_key())
}
