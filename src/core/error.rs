//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`MutationError`] - Rejected or failed create/rename/star/trash/upload
//! - [`ConfigError`] - Runtime configuration loading
//! - [`AuthError`] - OIDC sign-in and token exchange
//!
//! Every error maps onto an [`ErrorClass`], which decides how far it may
//! propagate in the UI.

use thiserror::Error;

/// How a failure is surfaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Listing or storage-usage fetch, or rejected local input: logged,
    /// previous state kept.
    Transient,
    /// Mutation: blocking notice, no state change.
    Mutation,
    /// Authenticated media: inline fallback glyph for the affected item.
    Resource,
    /// Configuration or session failure: replaces the whole application view.
    Fatal,
}

impl ErrorClass {
    /// Whether the user gets a blocking notice.
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::Mutation)
    }

    /// Whether the failure replaces the whole application view.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Browser window not available
    #[error("Browser window not available")]
    NoWindow,
    /// Failed to create HTTP request
    #[error("Failed to create request")]
    RequestCreationFailed,
    /// Network request failed (CORS, offline, ...)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status)
    #[error("HTTP error: {0}")]
    HttpError(u16),
    /// Failed to read response body
    #[error("Failed to read response")]
    ResponseReadFailed,
    /// Invalid response content
    #[error("Invalid response content")]
    InvalidContent,
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
    /// Could not create a local handle for fetched content
    #[error("Failed to create object URL")]
    ObjectUrlFailed,
}

/// Errors from [`MutationDispatcher`](crate::core::MutationDispatcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// Name is empty or whitespace.
    #[error("Name cannot be empty")]
    EmptyName,
    /// Rename to the current name.
    #[error("Name is unchanged")]
    UnchangedName,
    /// Another upload has not settled yet.
    #[error("An upload is already in progress")]
    UploadInFlight,
    /// Operation not allowed from the active view.
    #[error("{0} is not available in this view")]
    NotPermitted(&'static str),
    /// Client is not signed in.
    #[error("Not signed in")]
    Unauthenticated,
    /// The server rejected the request or could not be reached.
    #[error(transparent)]
    Remote(#[from] FetchError),
}

impl MutationError {
    /// Local validation failures are silent (nothing was sent).
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyName | Self::UnchangedName)
    }

    /// Validation failures stay silent; everything else gets a notice.
    pub fn class(&self) -> ErrorClass {
        if self.is_validation() {
            ErrorClass::Transient
        } else {
            ErrorClass::Mutation
        }
    }
}

/// Runtime configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadFailed(FetchError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Fatal
    }
}

/// Sign-in errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Identity provider discovery failed: {0}")]
    Discovery(FetchError),
    #[error("Invalid provider endpoint: {0}")]
    Endpoint(String),
    #[error("Token exchange failed: {0}")]
    TokenExchange(FetchError),
    /// The callback does not belong to a sign-in started from this tab.
    #[error("Sign-in response does not match a pending sign-in")]
    StateMismatch,
    #[error("No secure random source: {0}")]
    Random(String),
    #[error("Session storage unavailable")]
    Storage,
}

impl AuthError {
    pub fn class(&self) -> ErrorClass {
        ErrorClass::Fatal
    }
}
