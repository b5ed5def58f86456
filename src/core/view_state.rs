//! Active view, folder path and the last fetched listing.
//!
//! Navigation calls return a [`RefreshRequest`] tagged with a monotonically
//! increasing epoch; the caller performs the fetch and hands the result back
//! to [`ViewState::apply`]. Only the most recently issued request can land,
//! so overlapping refreshes resolve as last-issued-wins regardless of the
//! order in which responses arrive.

use crate::core::error::FetchError;
use crate::models::{FolderEntry, Listing, NavigationPath, Scope, View};

/// A listing query the caller must run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefreshRequest {
    pub epoch: u64,
    pub scope: Scope,
}

/// What happened to a refresh result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Listing replaced.
    Applied,
    /// A newer request was issued meanwhile; result discarded.
    Stale,
    /// Fetch failed; previous listing kept.
    Failed(FetchError),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    view: View,
    path: NavigationPath,
    listing: Listing,
    epoch: u64,
    pending: bool,
    last_error: Option<FetchError>,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            view: View::default(),
            path: NavigationPath::root(View::default()),
            listing: Listing::default(),
            epoch: 0,
            pending: false,
            last_error: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn path(&self) -> &NavigationPath {
        &self.path
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    /// Whether the latest request is still outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    /// Folder the listing belongs to (always `None` outside "My Files").
    pub fn active_folder(&self) -> Option<u64> {
        self.path.current_folder()
    }

    /// Parent for newly created entries.
    pub fn upload_parent(&self) -> Option<u64> {
        if self.view.is_hierarchical() {
            self.active_folder()
        } else {
            None
        }
    }

    pub fn scope(&self) -> Scope {
        match self.view {
            View::MyFiles => Scope::Folder(self.active_folder()),
            View::Recent => Scope::Recent,
            View::Starred => Scope::Starred,
            View::Trash => Scope::Trash,
        }
    }

    /// Switch to `view` at its root.
    pub fn set_view(&mut self, view: View) -> RefreshRequest {
        self.view = view;
        self.path = NavigationPath::root(view);
        self.refresh()
    }

    /// Descend into `folder`. Only allowed in the hierarchical view.
    pub fn navigate_into(&mut self, folder: &FolderEntry) -> Option<RefreshRequest> {
        if !self.view.is_hierarchical() {
            return None;
        }
        self.path.push(folder.id, folder.name.clone());
        Some(self.refresh())
    }

    /// Jump back to breadcrumb `index`. Only allowed in the hierarchical view.
    pub fn navigate_to_breadcrumb(&mut self, index: usize) -> Option<RefreshRequest> {
        if !self.view.is_hierarchical() || !self.path.truncate_to(index) {
            return None;
        }
        Some(self.refresh())
    }

    /// Issue a listing query for the current scope.
    pub fn refresh(&mut self) -> RefreshRequest {
        self.epoch += 1;
        self.pending = true;
        RefreshRequest {
            epoch: self.epoch,
            scope: self.scope(),
        }
    }

    /// Land the result of `request`. The listing is replaced whole or not at all.
    pub fn apply(
        &mut self,
        request: &RefreshRequest,
        result: Result<Listing, FetchError>,
    ) -> RefreshOutcome {
        if request.epoch != self.epoch {
            return RefreshOutcome::Stale;
        }
        self.pending = false;
        match result {
            Ok(listing) => {
                self.listing = listing;
                self.last_error = None;
                RefreshOutcome::Applied
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                RefreshOutcome::Failed(e)
            }
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}
