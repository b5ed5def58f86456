//! Application configuration.
//!
//! Centralizes all configuration constants used throughout the application,
//! plus the runtime [`ClientConfig`] served as `/config.json` next to the
//! bundle (so deployments can point at their own identity provider without
//! a rebuild).

use serde::{Deserialize, Serialize};

// =============================================================================
// Application Metadata
// =============================================================================

/// Application name displayed in the sidebar and sign-in screen.
pub const APP_NAME: &str = "WebDrive";

/// Tagline on the sign-in screen.
pub const APP_TAGLINE: &str = "Secure & Simple Storage";

// =============================================================================
// Network Configuration
// =============================================================================

/// Default base path of the remote storage API.
pub const API_BASE: &str = "/api";

/// Location of the runtime client configuration.
pub const CONFIG_URL: &str = "/config.json";

/// Fetch request timeout in milliseconds.
pub const FETCH_TIMEOUT_MS: i32 = 10000;

/// Upload request timeout in milliseconds (uploads stream whole files).
pub const UPLOAD_TIMEOUT_MS: i32 = 600_000;

/// How long a blob URL opened in a new tab stays valid.
pub const OPENED_BLOB_TTL_MS: u32 = 60_000;

// =============================================================================
// Storage Configuration
// =============================================================================

/// Quota assumed until the server reports one (15 GiB).
pub const DEFAULT_STORAGE_LIMIT: u64 = 15 * 1024 * 1024 * 1024;

// =============================================================================
// View Labels
// =============================================================================

/// Root breadcrumb labels per view.
pub mod view_labels {
    pub const MY_FILES: &str = "My Files";
    pub const RECENT: &str = "Recent";
    pub const STARRED: &str = "Starred";
    pub const TRASH: &str = "Trash";
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Allowed clock skew when checking token expiry, in seconds.
pub const TOKEN_CLOCK_SKEW_SECS: u64 = 300;

// =============================================================================
// UI Configuration
// =============================================================================

/// Icon theme selection.
///
/// Available themes:
/// - `Bootstrap` - Familiar, slightly bolder (default)
/// - `Lucide` - Minimal, thin strokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(dead_code)]
pub enum IconTheme {
    #[default]
    Bootstrap,
    Lucide,
}

/// Current icon theme used throughout the application.
pub const ICON_THEME: IconTheme = IconTheme::Bootstrap;

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Client configuration loaded from [`CONFIG_URL`] at start-up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// OIDC issuer URL.
    pub authority: String,
    /// OIDC client id.
    pub client_id: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Override for [`API_BASE`].
    #[serde(default)]
    pub api_base: Option<String>,
}

fn default_scope() -> String {
    "openid profile email".to_string()
}

impl ClientConfig {
    /// API base without a trailing slash.
    pub fn api_base(&self) -> String {
        self.api_base
            .as_deref()
            .unwrap_or(API_BASE)
            .trim_end_matches('/')
            .to_string()
    }

    /// sessionStorage key of the signed-in user record.
    pub fn session_key(&self) -> String {
        format!("oidc.user:{}:{}", self.authority, self.client_id)
    }
}

/// Loading state of the runtime configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigState {
    #[default]
    Loading,
    Ready(ClientConfig),
    Failed(String),
}
