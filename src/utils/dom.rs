//! DOM and Web API utility functions.
//!
//! Provides safe, consistent access to browser APIs with proper error handling.
//! Everything here degrades to a no-op (or `None`) outside the browser, so
//! callers in core logic stay testable natively.

use std::fmt::Display;

use wasm_bindgen::JsCast;
use web_sys::{Storage, Window};

use crate::core::error::ErrorClass;

/// Get the browser window object.
#[inline]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// Get sessionStorage.
#[inline]
pub fn session_storage() -> Option<Storage> {
    window()?.session_storage().ok()?
}

// =============================================================================
// Console Logging
// =============================================================================

#[allow(unused_variables)]
pub fn log_info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
}

#[allow(unused_variables)]
pub fn log_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
}

#[allow(unused_variables)]
pub fn log_error(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::error_1(&message.into());
}

/// Log a failure at the severity its class calls for.
pub fn log_failure(class: ErrorClass, context: &str, error: &dyn Display) {
    let message = format!("{}: {}", context, error);
    match class {
        ErrorClass::Transient | ErrorClass::Resource => log_warn(&message),
        ErrorClass::Mutation | ErrorClass::Fatal => log_error(&message),
    }
}

// =============================================================================
// Dialogs
// =============================================================================

/// Blocking notice.
pub fn alert(message: &str) {
    if let Some(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Yes/no question; `false` outside the browser.
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Text prompt pre-filled with `default`. `None` if dismissed.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

// =============================================================================
// Browser Navigation
// =============================================================================

/// Send the browser to `url`.
pub fn navigate(url: &str) {
    if let Some(window) = window() {
        let _ = window.location().set_href(url);
    }
}

pub fn reload() {
    if let Some(window) = window() {
        let _ = window.location().reload();
    }
}

/// `location.search` of the current page, including the leading `?`.
pub fn location_search() -> String {
    window()
        .and_then(|w| w.location().search().ok())
        .unwrap_or_default()
}

/// Scheme, host and port of the current page.
pub fn origin() -> String {
    window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

/// Drop the query string from the address bar without reloading.
pub fn clear_query() {
    let Some(window) = window() else {
        return;
    };
    if let (Ok(path), Ok(history)) = (window.location().pathname(), window.history()) {
        let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
    }
}

/// Open `url` in a new tab.
pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window() {
        let _ = window.open_with_url_and_target(url, "_blank");
    }
}

/// Save `url` under `file_name` via a temporary anchor element.
pub fn trigger_download(url: &str, file_name: &str) {
    if let Some(document) = window().and_then(|w| w.document())
        && let Ok(element) = document.create_element("a")
        && let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>()
    {
        anchor.set_href(url);
        anchor.set_download(file_name);
        if let Some(body) = document.body() {
            let _ = body.append_child(&anchor);
            anchor.click();
            let _ = body.remove_child(&anchor);
        }
    }
}

/// Revoke an object URL after `delay_ms`.
pub fn revoke_object_url_later(url: String, delay_ms: u32) {
    gloo_timers::callback::Timeout::new(delay_ms, move || {
        let _ = web_sys::Url::revoke_object_url(&url);
    })
    .forget();
}
