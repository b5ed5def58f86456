//! Core browsing engine for the file manager.
//!
//! This module provides:
//! - `ViewState` active view, navigation path and listing
//! - `SelectionController` single selection and context menu
//! - `CarouselNavigator` image preview navigation
//! - [`ResourceSlot`] per-consumer lifetime of authenticated media
//! - [`MutationDispatcher`] server mutations followed by a refresh
//! - [`DriveState`] the aggregate of the above, plus the async drivers
//! - [`DriveApi`] the remote storage API, with [`HttpDriveApi`]
//! - [`auth`] and [`oidc`] the sign-in session

pub mod api;
pub mod auth;
mod carousel;
pub mod drive;
pub mod error;
mod mutations;
pub mod oidc;
mod resource;
mod selection;
mod view_state;

pub use api::{ContentIntent, DriveApi, HttpDriveApi, RequestContext};
pub use carousel::Direction;
pub use drive::{DriveCell, DriveState, OpenAction};
pub use mutations::{ConfirmedDelete, MutationDispatcher};
pub use resource::{AcquireTicket, BlobUrls, ResourceSlot, ResourceView};
