//! Remote storage API as seen by the browsing engine.
//!
//! The engine talks to the server only through [`DriveApi`]. Every call
//! receives an explicit [`RequestContext`] carrying the bearer token; nothing
//! reads credentials from ambient state.

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::HttpDriveApi;

use crate::core::error::FetchError;
use crate::models::{
    AuthState, Entry, EntryKey, FileEntry, FolderEntry, Listing, Scope, StorageUsage,
};

/// Credentials and endpoint for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    api_base: String,
    token: String,
}

impl RequestContext {
    pub fn new(api_base: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            token: token.into(),
        }
    }

    /// Context for an authenticated session; `None` otherwise, in which case
    /// no request may be issued.
    pub fn for_session(auth: &AuthState, api_base: &str) -> Option<Self> {
        auth.token().map(|token| Self::new(api_base, token))
    }

    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Absolute API URL for `path` (which starts with `/`).
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    /// Content URL for a file.
    pub fn content_url(&self, id: u64, intent: ContentIntent) -> String {
        match intent {
            ContentIntent::Inline => self.url(&format!("/file/{}/content", id)),
            ContentIntent::Download => self.url(&format!("/file/{}/content?download=true", id)),
        }
    }
}

/// Hint for the server's `Content-Disposition`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentIntent {
    Inline,
    Download,
}

/// The remote storage API.
#[allow(async_fn_in_trait)]
pub trait DriveApi {
    /// Fetched binary content (a `Blob` in the browser).
    type Content;
    /// A file picked for upload.
    type Upload;

    async fn list_entries(&self, cx: &RequestContext, scope: &Scope) -> Result<Listing, FetchError>;

    async fn storage_usage(&self, cx: &RequestContext) -> Result<StorageUsage, FetchError>;

    async fn create_folder(
        &self,
        cx: &RequestContext,
        name: &str,
        parent: Option<u64>,
    ) -> Result<FolderEntry, FetchError>;

    async fn upload_file(
        &self,
        cx: &RequestContext,
        file: &Self::Upload,
        parent: Option<u64>,
    ) -> Result<FileEntry, FetchError>;

    async fn rename(&self, cx: &RequestContext, key: EntryKey, name: &str) -> Result<Entry, FetchError>;

    /// Flip the star; the server decides the new value.
    async fn toggle_star(&self, cx: &RequestContext, key: EntryKey) -> Result<Entry, FetchError>;

    /// Move to trash (`restore == false`) or back out of it.
    async fn set_trashed(&self, cx: &RequestContext, key: EntryKey, restore: bool) -> Result<(), FetchError>;

    async fn delete_forever(&self, cx: &RequestContext, key: EntryKey) -> Result<(), FetchError>;

    async fn fetch_content(&self, cx: &RequestContext, url: &str) -> Result<Self::Content, FetchError>;
}
