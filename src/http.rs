//! JSON fetch plumbing over `web_sys::Request`/`Response`.
//!
//! Promises are awaited through `wasm_bindgen_futures::JsFuture`; `JsValue`
//! failures collapse to strings at this boundary so the widgets above never
//! see a raw `JsValue`.

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

#[derive(Clone, Debug)]
pub(crate) enum FetchError {
    /// The request never produced a response (offline, CORS, bad URL).
    Network(String),
    /// Non-2xx response; `body` is the raw text, usually `{"error": …}`.
    Status { code: u16, body: String },
    /// 2xx response whose body did not parse as the expected shape.
    Decode(String),
}

impl FetchError {
    pub(crate) fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Best human-readable message: the server's `error` field when the body
    /// carries one, otherwise a generic line per failure class.
    pub(crate) fn message(&self) -> String {
        match self {
            FetchError::Network(_) => "A network error occurred.".to_string(),
            FetchError::Status { body, code } => server_error_text(body)
                .unwrap_or_else(|| format!("Request failed with status {code}.")),
            FetchError::Decode(_) => "The server sent an unexpected reply.".to_string(),
        }
    }
}

fn server_error_text(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(|error| error.as_str())
        .map(str::to_string)
}

pub(crate) fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "unknown browser error".to_string()
}

/// Compile-time override for deployments that serve the API from another
/// origin; defaults to same-origin relative paths.
fn api_url(path: &str) -> String {
    match option_env!("BAPSIMI_API_BASE") {
        Some(base) if !base.trim().is_empty() => {
            format!("{}{}", base.trim_end_matches('/'), path)
        }
        _ => path.to_string(),
    }
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<String, FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::Network("no window".to_string()))?;
    let init = RequestInit::new();
    init.set_method(method);
    let has_body = body.is_some();
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(&body));
    }
    let request = Request::new_with_str_and_init(&api_url(path), &init)
        .map_err(|error| FetchError::Network(js_err(error)))?;
    if has_body {
        let _ = request.headers().set("Content-Type", "application/json");
    }
    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|error| FetchError::Network(js_err(error)))?;
    let response: Response = response_value
        .dyn_into()
        .map_err(|error| FetchError::Network(js_err(error)))?;
    let text_promise = response
        .text()
        .map_err(|error| FetchError::Network(js_err(error)))?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|error| FetchError::Network(js_err(error)))?
        .as_string()
        .unwrap_or_default();
    if !response.ok() {
        return Err(FetchError::Status {
            code: response.status(),
            body: text,
        });
    }
    Ok(text)
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, FetchError> {
    serde_json::from_str(text).map_err(|error| FetchError::Decode(error.to_string()))
}

pub(crate) async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    let text = send("GET", path, None).await?;
    decode(&text)
}

pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, FetchError> {
    let encoded =
        serde_json::to_string(body).map_err(|error| FetchError::Decode(error.to_string()))?;
    let text = send("POST", path, Some(encoded)).await?;
    decode(&text)
}

/// POST without a body, for endpoints that key entirely off the URL and the
/// session cookie (likes, unlikes).
pub(crate) async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    let text = send("POST", path, None).await?;
    decode(&text)
}

pub(crate) async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, FetchError> {
    let text = send("DELETE", path, None).await?;
    decode(&text)
}
