//! Network fetching utilities with timeout support.
//!
//! Provides async fetch functions with timeout racing. Authenticated calls
//! take the `Authorization` header value explicitly.

use js_sys::{Array, Promise};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Headers, Request, RequestInit, RequestMode, Response};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;

// =============================================================================
// Promise Racing Utilities
// =============================================================================

/// Result of a promise race with timeout.
#[derive(Debug)]
pub enum RaceResult {
    /// The promise completed before timeout.
    Completed(JsValue),
    /// Timeout occurred before promise completed.
    TimedOut,
    /// Promise rejected with an error.
    Error(String),
}

/// Race a promise against a timeout.
///
/// # Returns
/// * `RaceResult::Completed` if promise resolves before timeout
/// * `RaceResult::TimedOut` if timeout occurs first
/// * `RaceResult::Error` if promise rejects
pub async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".to_string());
    };

    // Create timeout promise that resolves to undefined
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);
    let race_promise = Promise::race(&race_array);

    match JsFuture::from(race_promise).await {
        Ok(result) => {
            if result.is_undefined() {
                RaceResult::TimedOut
            } else {
                RaceResult::Completed(result)
            }
        }
        Err(e) => RaceResult::Error(e.as_string().unwrap_or_else(|| "Unknown error".to_string())),
    }
}

// =============================================================================
// Requests
// =============================================================================

/// Body of an outgoing request.
pub enum RequestBody {
    Empty,
    Json(String),
    /// `application/x-www-form-urlencoded` pairs.
    UrlEncoded(String),
    Form(FormData),
}

/// Send a request and return the response if its status is 2xx.
pub async fn send(
    method: &str,
    url: &str,
    authorization: Option<&str>,
    body: RequestBody,
    timeout_ms: i32,
) -> Result<Response, FetchError> {
    let window = web_sys::window().ok_or(FetchError::NoWindow)?;

    let headers = Headers::new().map_err(|_| FetchError::RequestCreationFailed)?;
    if let Some(value) = authorization {
        headers
            .set("Authorization", value)
            .map_err(|_| FetchError::RequestCreationFailed)?;
    }

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    match body {
        RequestBody::Empty => {}
        RequestBody::Json(json) => {
            headers
                .set("Content-Type", "application/json")
                .map_err(|_| FetchError::RequestCreationFailed)?;
            opts.set_body(&JsValue::from_str(&json));
        }
        RequestBody::UrlEncoded(pairs) => {
            headers
                .set("Content-Type", "application/x-www-form-urlencoded")
                .map_err(|_| FetchError::RequestCreationFailed)?;
            opts.set_body(&JsValue::from_str(&pairs));
        }
        // The browser sets the multipart boundary itself.
        RequestBody::Form(form) => opts.set_body(&form),
    }
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)
        .map_err(|_| FetchError::RequestCreationFailed)?;

    match race_with_timeout(window.fetch_with_request(&request), timeout_ms).await {
        RaceResult::TimedOut => Err(FetchError::Timeout),
        RaceResult::Error(msg) => Err(FetchError::NetworkError(msg)),
        RaceResult::Completed(result) => {
            let resp: Response = result.dyn_into().map_err(|_| FetchError::InvalidContent)?;
            if !resp.ok() {
                return Err(FetchError::HttpError(resp.status()));
            }
            Ok(resp)
        }
    }
}

/// Read a response body as text.
pub async fn response_text(resp: &Response) -> Result<String, FetchError> {
    let text = JsFuture::from(resp.text().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    text.as_string().ok_or(FetchError::InvalidContent)
}

/// Read and parse a JSON response body.
pub async fn response_json<T: DeserializeOwned>(resp: &Response) -> Result<T, FetchError> {
    let text = response_text(resp).await?;
    serde_json::from_str(&text).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

/// Read a response body as a `Blob`.
pub async fn response_blob(resp: &Response) -> Result<Blob, FetchError> {
    let blob = JsFuture::from(resp.blob().map_err(|_| FetchError::ResponseReadFailed)?)
        .await
        .map_err(|_| FetchError::ResponseReadFailed)?;
    blob.dyn_into().map_err(|_| FetchError::InvalidContent)
}

/// Fetch and parse JSON from a public URL (no credentials).
pub async fn fetch_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let resp = send("GET", url, None, RequestBody::Empty, FETCH_TIMEOUT_MS).await?;
    response_json(&resp).await
}
