//! UI entry points into the browsing engine.
//!
//! Components call these from event handlers. Each one spawns the async
//! work on the local executor; mutation failures end in a blocking notice,
//! listing and storage failures only in the console.

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::config::OPENED_BLOB_TTL_MS;
use crate::core::auth;
use crate::core::drive::{self, refresh_storage};
use crate::core::error::{ErrorClass, MutationError};
use crate::core::{ConfirmedDelete, ContentIntent, DriveApi, HttpDriveApi, OpenAction, RequestContext};
use crate::models::{AuthState, Entry, EntryKey, FileEntry, View};
use crate::utils::dom::{
    alert, confirm, log_failure, open_in_new_tab, prompt, revoke_object_url_later, trigger_download,
};

/// Show a blocking notice for failures the user must see.
fn report<T>(result: Result<T, MutationError>) {
    if let Err(e) = result
        && e.class().is_blocking()
    {
        alert(&e.to_string());
    }
}

// =============================================================================
// Navigation
// =============================================================================

pub fn switch_view(ctx: AppContext, view: View) {
    let Some(cx) = ctx.request_context() else {
        return;
    };
    let drive = ctx.drive;
    spawn_local(async move {
        drive::switch_view(&HttpDriveApi, &cx, &drive, view).await;
        let _ = refresh_storage(&HttpDriveApi, &cx, &drive).await;
    });
}

pub fn open_breadcrumb(ctx: AppContext, index: usize) {
    let Some(cx) = ctx.request_context() else {
        return;
    };
    let drive = ctx.drive;
    spawn_local(async move {
        if drive::open_breadcrumb(&HttpDriveApi, &cx, &drive, index).await.is_some() {
            let _ = refresh_storage(&HttpDriveApi, &cx, &drive).await;
        }
    });
}

/// Double-click semantics: folder opens, image previews, other files open
/// in a new tab.
pub fn open_entry(ctx: AppContext, entry: Entry) {
    let Some(cx) = ctx.request_context() else {
        return;
    };
    let drive = ctx.drive;
    if let Entry::Folder(folder) = entry {
        spawn_local(async move {
            if drive::open_folder(&HttpDriveApi, &cx, &drive, &folder).await.is_some() {
                let _ = refresh_storage(&HttpDriveApi, &cx, &drive).await;
            }
        });
        return;
    }
    if let Some(OpenAction::External(file)) = drive.try_update(|state| state.open_entry(&entry)) {
        open_external(cx, file);
    }
}

fn open_external(cx: RequestContext, file: FileEntry) {
    spawn_local(async move {
        let url = cx.content_url(file.id, ContentIntent::Inline);
        match HttpDriveApi.fetch_content(&cx, &url).await {
            Ok(blob) => match web_sys::Url::create_object_url_with_blob(&blob) {
                Ok(object_url) => {
                    open_in_new_tab(&object_url);
                    revoke_object_url_later(object_url, OPENED_BLOB_TTL_MS);
                }
                Err(e) => log_failure(ErrorClass::Resource, &format!("Could not open {}", file.name), &format!("{e:?}")),
            },
            Err(e) => alert(&format!("Could not open {}: {}", file.name, e)),
        }
    });
}

pub fn download(ctx: AppContext, file: FileEntry) {
    let Some(cx) = ctx.request_context() else {
        return;
    };
    spawn_local(async move {
        let url = cx.content_url(file.id, ContentIntent::Download);
        match HttpDriveApi.fetch_content(&cx, &url).await {
            Ok(blob) => match web_sys::Url::create_object_url_with_blob(&blob) {
                Ok(object_url) => {
                    trigger_download(&object_url, &file.name);
                    let _ = web_sys::Url::revoke_object_url(&object_url);
                }
                Err(e) => log_failure(ErrorClass::Resource, &format!("Could not save {}", file.name), &format!("{e:?}")),
            },
            Err(e) => alert(&format!("Download failed: {}", e)),
        }
    });
}

// =============================================================================
// Mutations
// =============================================================================

pub fn create_folder(ctx: AppContext, name: String) {
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    spawn_local(async move {
        let result = dispatcher.create_folder(&name).await;
        if result.is_ok() {
            ctx.new_folder_open.set(false);
        }
        report(result);
    });
}

pub fn upload(ctx: AppContext, file: web_sys::File) {
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    spawn_local(async move {
        report(dispatcher.upload(&file).await);
    });
}

/// Ask for a new name, then rename.
pub fn rename(ctx: AppContext, entry: Entry) {
    let Some(new_name) = prompt("New name?", entry.name()) else {
        return;
    };
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    spawn_local(async move {
        report(dispatcher.rename(&entry, &new_name).await);
    });
}

pub fn toggle_star(ctx: AppContext, key: EntryKey) {
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    spawn_local(async move {
        report(dispatcher.toggle_star(key).await);
    });
}

pub fn set_trashed(ctx: AppContext, key: EntryKey, restore: bool) {
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    spawn_local(async move {
        report(dispatcher.set_trashed(key, restore).await);
    });
}

/// Confirm, then delete irreversibly.
pub fn delete_forever(ctx: AppContext, entry: Entry) {
    let question = format!("Delete \"{}\" forever? This cannot be undone.", entry.name());
    if !confirm(&question) {
        return;
    }
    let Some(dispatcher) = ctx.dispatcher() else {
        return report::<()>(Err(MutationError::Unauthenticated));
    };
    let confirmed = ConfirmedDelete::confirmed(entry.key());
    spawn_local(async move {
        report(dispatcher.delete_forever(confirmed).await);
    });
}

// =============================================================================
// Session
// =============================================================================

/// Start the provider sign-in. Failures land on the authentication error
/// screen.
pub fn sign_in(ctx: AppContext) {
    let Some(config) = ctx.client_config() else {
        return;
    };
    spawn_local(async move {
        if let Err(e) = auth::sign_in(&config).await {
            log_failure(e.class(), "Sign-in failed", &e);
            ctx.auth.set(AuthState::Error(e.to_string()));
        }
    });
}

pub fn sign_out(ctx: AppContext) {
    if ctx.drive.with_untracked(|state| state.is_uploading()) {
        return;
    }
    let Some(config) = ctx.client_config() else {
        return;
    };
    spawn_local(async move {
        auth::sign_out(&config).await;
    });
}

/// Re-query the current scope (user-initiated retry).
pub fn reload_listing(ctx: AppContext) {
    let Some(cx) = ctx.request_context() else {
        return;
    };
    let drive = ctx.drive;
    spawn_local(async move {
        drive::refresh(&HttpDriveApi, &cx, &drive).await;
    });
}
