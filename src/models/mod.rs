//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Entry`], [`FileEntry`], [`FolderEntry`], [`FileType`] - Remote file store records
//! - [`Listing`], [`StorageUsage`] - Server responses for a scope
//! - [`View`], [`Scope`], [`NavigationPath`] - Navigation state
//! - [`Selection`], [`ContextMenu`] - Explorer interaction state
//! - [`AuthState`] - Sign-in session state

mod auth;
mod entry;
mod explorer;
mod listing;
mod view;

pub use auth::AuthState;
#[cfg(test)]
pub(crate) use entry::fixtures;
pub use entry::{Entry, EntryKey, FileEntry, FileType, FolderEntry, type_label};
pub use explorer::{ContextMenu, Selection};
pub use listing::{Listing, StorageUsage};
pub use view::{NavigationPath, Scope, View};
