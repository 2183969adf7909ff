use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use lumio_core::errors::ClientError;
use lumio_core::local::{KvStore, keys};
use lumio_core::models::{Session, User};
use lumio_core::query::Select;

use crate::browser::BrowserStore;
use crate::config;

// ── Session persistence ──────────────────────────────────────────────────────

/// Read-through of the persisted session, if any.
pub fn load_session() -> Option<Session> {
    let store = BrowserStore::local().ok()?;
    let raw = store.get(keys::SESSION)?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            log::error!("Stored session is unreadable: {e}");
            None
        }
    }
}

pub fn store_session(session: &Session) {
    let Ok(store) = BrowserStore::local() else { return };
    match serde_json::to_string(session) {
        Ok(raw) => store.set(keys::SESSION, &raw),
        Err(e) => log::error!("Failed to serialize session: {e}"),
    }
}

pub fn clear_session() {
    if let Ok(store) = BrowserStore::local() {
        store.remove(keys::SESSION);
    }
}

fn bearer() -> Option<String> {
    load_session().map(|s| s.access_token)
}

// ── Request plumbing ─────────────────────────────────────────────────────────

/// Attach the project key and, when a session exists, the bearer token.
fn authed(req: RequestBuilder) -> RequestBuilder {
    let req = req.header("apikey", config::anon_key());
    match bearer() {
        Some(token) => req.header("Authorization", &format!("Bearer {token}")),
        None => req,
    }
}

/// Best-effort extraction of the service's error message body.
async fn response_message(resp: &Response) -> String {
    match resp.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("msg")
            .or_else(|| body.get("message"))
            .or_else(|| body.get("error_description"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| resp.status_text()),
        Err(_) => resp.status_text(),
    }
}

async fn service_error(resp: Response) -> ClientError {
    let status = resp.status();
    let message = response_message(&resp).await;
    ClientError::service(status, message)
}

// ── Row endpoints ────────────────────────────────────────────────────────────

/// Fetch all rows matching a built select.
pub async fn select_rows<T: DeserializeOwned>(query: &Select) -> Result<Vec<T>, ClientError> {
    let resp = authed(Request::get(&config::rest_url(&query.build())))
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(service_error(resp).await);
    }

    resp.json::<Vec<T>>()
        .await
        .map_err(|e| ClientError::decode(e.to_string()))
}

/// Insert one row and return the server's representation of it.
pub async fn insert_returning<T: DeserializeOwned>(
    table: &str,
    body: &impl Serialize,
) -> Result<T, ClientError> {
    let resp = authed(Request::post(&config::rest_url(table)))
        .header("Prefer", "return=representation")
        .json(body)
        .map_err(|e| ClientError::decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(service_error(resp).await);
    }

    let mut rows: Vec<T> = resp
        .json()
        .await
        .map_err(|e| ClientError::decode(e.to_string()))?;
    if rows.is_empty() {
        return Err(ClientError::decode("insert returned no rows"));
    }
    Ok(rows.remove(0))
}

/// Insert one row, discarding the response body.
pub async fn insert_row(table: &str, body: &impl Serialize) -> Result<(), ClientError> {
    let resp = authed(Request::post(&config::rest_url(table)))
        .header("Prefer", "return=minimal")
        .json(body)
        .map_err(|e| ClientError::decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(service_error(resp).await);
    }
    Ok(())
}

// ── Auth endpoints ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

async fn auth_request(path: &str, credentials: &Credentials<'_>) -> Result<Session, ClientError> {
    let resp = Request::post(&config::auth_url(path))
        .header("apikey", config::anon_key())
        .json(credentials)
        .map_err(|e| ClientError::decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(ClientError::auth(response_message(&resp).await));
    }

    resp.json::<Session>()
        .await
        .map_err(|e| ClientError::decode(e.to_string()))
}

pub async fn sign_in(email: &str, password: &str) -> Result<Session, ClientError> {
    auth_request("token?grant_type=password", &Credentials { email, password }).await
}

pub async fn sign_up(email: &str, password: &str) -> Result<Session, ClientError> {
    auth_request("signup", &Credentials { email, password }).await
}

pub async fn sign_out() -> Result<(), ClientError> {
    let Some(token) = bearer() else { return Ok(()) };
    let resp = Request::post(&config::auth_url("logout"))
        .header("apikey", config::anon_key())
        .header("Authorization", &format!("Bearer {token}"))
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(ClientError::auth(response_message(&resp).await));
    }
    Ok(())
}

/// Confirm the persisted token with the auth service and return its user.
pub async fn current_user() -> Result<User, ClientError> {
    if bearer().is_none() {
        return Err(ClientError::NoSession);
    }
    let resp = authed(Request::get(&config::auth_url("user")))
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(ClientError::auth(response_message(&resp).await));
    }

    resp.json::<User>()
        .await
        .map_err(|e| ClientError::decode(e.to_string()))
}

// ── Object storage ───────────────────────────────────────────────────────────

/// Upload a file and return its storage path.
pub async fn upload_object(
    bucket: &str,
    path: &str,
    file: &web_sys::File,
) -> Result<String, ClientError> {
    let resp = authed(Request::post(&config::storage_object_url(bucket, path)))
        .body(wasm_bindgen::JsValue::from(file.clone()))
        .map_err(|e| ClientError::network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ClientError::network(e.to_string()))?;

    if !resp.ok() {
        return Err(service_error(resp).await);
    }
    Ok(path.to_string())
}
