//! [`DriveApi`] over `fetch`.

use serde_json::{Value, json};
use web_sys::{Blob, File, FormData};

use super::{DriveApi, RequestContext};
use crate::config::{FETCH_TIMEOUT_MS, UPLOAD_TIMEOUT_MS};
use crate::core::error::FetchError;
use crate::models::{Entry, EntryKey, FileEntry, FolderEntry, Listing, Scope, StorageUsage};
use crate::utils::fetch::{RequestBody, response_blob, response_json, send};

/// The browser's HTTP client, authenticated per call.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpDriveApi;

impl HttpDriveApi {
    async fn request(
        &self,
        cx: &RequestContext,
        method: &str,
        path: &str,
        body: RequestBody,
    ) -> Result<web_sys::Response, FetchError> {
        let authorization = cx.authorization();
        send(method, &cx.url(path), Some(&authorization), body, FETCH_TIMEOUT_MS).await
    }
}

fn entry_path(prefix: &str, key: EntryKey) -> String {
    format!("/{}/{}/{}", prefix, key.kind, key.id)
}

fn json_body(value: Value) -> RequestBody {
    RequestBody::Json(value.to_string())
}

impl DriveApi for HttpDriveApi {
    type Content = Blob;
    type Upload = File;

    async fn list_entries(&self, cx: &RequestContext, scope: &Scope) -> Result<Listing, FetchError> {
        let query = scope.query();
        let path = if query.is_empty() {
            "/browse".to_string()
        } else {
            format!("/browse?{}", query)
        };
        let resp = self.request(cx, "GET", &path, RequestBody::Empty).await?;
        response_json(&resp).await
    }

    async fn storage_usage(&self, cx: &RequestContext) -> Result<StorageUsage, FetchError> {
        let resp = self.request(cx, "GET", "/storage", RequestBody::Empty).await?;
        response_json(&resp).await
    }

    async fn create_folder(
        &self,
        cx: &RequestContext,
        name: &str,
        parent: Option<u64>,
    ) -> Result<FolderEntry, FetchError> {
        let body = json_body(json!({ "name": name, "parent_id": parent }));
        let resp = self.request(cx, "POST", "/folder", body).await?;
        response_json(&resp).await
    }

    async fn upload_file(
        &self,
        cx: &RequestContext,
        file: &File,
        parent: Option<u64>,
    ) -> Result<FileEntry, FetchError> {
        let form = FormData::new().map_err(|_| FetchError::RequestCreationFailed)?;
        form.append_with_blob("file", file)
            .map_err(|_| FetchError::RequestCreationFailed)?;
        if let Some(id) = parent {
            form.append_with_str("parent_id", &id.to_string())
                .map_err(|_| FetchError::RequestCreationFailed)?;
        }
        let authorization = cx.authorization();
        let resp = send(
            "POST",
            &cx.url("/upload"),
            Some(&authorization),
            RequestBody::Form(form),
            UPLOAD_TIMEOUT_MS,
        )
        .await?;
        response_json(&resp).await
    }

    async fn rename(&self, cx: &RequestContext, key: EntryKey, name: &str) -> Result<Entry, FetchError> {
        let body = json_body(json!({ "name": name }));
        let resp = self.request(cx, "PUT", &entry_path("rename", key), body).await?;
        let value: Value = response_json(&resp).await?;
        Entry::from_json(key.kind, value).map_err(|e| FetchError::JsonParseError(e.to_string()))
    }

    async fn toggle_star(&self, cx: &RequestContext, key: EntryKey) -> Result<Entry, FetchError> {
        let resp = self
            .request(cx, "POST", &entry_path("star", key), RequestBody::Empty)
            .await?;
        let value: Value = response_json(&resp).await?;
        Entry::from_json(key.kind, value).map_err(|e| FetchError::JsonParseError(e.to_string()))
    }

    async fn set_trashed(&self, cx: &RequestContext, key: EntryKey, restore: bool) -> Result<(), FetchError> {
        let mut path = entry_path("trash", key);
        if restore {
            path.push_str("?restore=true");
        }
        self.request(cx, "DELETE", &path, RequestBody::Empty).await?;
        Ok(())
    }

    async fn delete_forever(&self, cx: &RequestContext, key: EntryKey) -> Result<(), FetchError> {
        let path = format!("{}?permanent=true", entry_path("trash", key));
        self.request(cx, "DELETE", &path, RequestBody::Empty).await?;
        Ok(())
    }

    async fn fetch_content(&self, cx: &RequestContext, url: &str) -> Result<Blob, FetchError> {
        let authorization = cx.authorization();
        let resp = send("GET", url, Some(&authorization), RequestBody::Empty, FETCH_TIMEOUT_MS).await?;
        response_blob(&resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_paths_use_kind_segment() {
        assert_eq!(entry_path("star", EntryKey::file(5)), "/star/file/5");
        assert_eq!(entry_path("rename", EntryKey::folder(2)), "/rename/folder/2");
    }
}
