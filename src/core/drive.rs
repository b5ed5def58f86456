//! The browsing engine as one aggregate, and the async drivers around it.
//!
//! [`DriveState`] bundles the view, selection, preview and storage meter so
//! that cross-cutting rules (a scope change clears the selection, a landed
//! listing revalidates the preview) live in one place. It is stored behind a
//! [`DriveCell`]: a reactive signal in the app, a plain `RefCell` in tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::api::{DriveApi, RequestContext};
use crate::core::carousel::{CarouselNavigator, Direction};
use crate::core::error::{ErrorClass, FetchError};
use crate::core::selection::SelectionController;
use crate::core::view_state::{RefreshOutcome, RefreshRequest, ViewState};
use crate::models::{Entry, EntryKey, FileEntry, FolderEntry, Listing, StorageUsage, View};
use crate::utils::dom::{log_failure, log_info};

/// What "open" (double-click, Enter, context menu) does with an entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpenAction {
    /// Descended into a folder; run the request.
    Navigate(RefreshRequest),
    /// Image shown in the carousel.
    Preview,
    /// Anything else: show the content in a new tab.
    External(FileEntry),
    /// Folder outside the hierarchical view.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriveState {
    view: ViewState,
    selection: SelectionController,
    carousel: CarouselNavigator,
    storage: StorageUsage,
    uploading: bool,
    search_query: String,
}

impl DriveState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    pub fn carousel(&self) -> &CarouselNavigator {
        &self.carousel
    }

    pub fn storage(&self) -> StorageUsage {
        self.storage
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Background click: drop the selection and any open menu.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    fn leave_scope(&mut self) {
        self.selection.clear();
        self.carousel.close();
    }

    pub fn set_view(&mut self, view: View) -> RefreshRequest {
        self.leave_scope();
        self.view.set_view(view)
    }

    pub fn navigate_into(&mut self, folder: &FolderEntry) -> Option<RefreshRequest> {
        let request = self.view.navigate_into(folder)?;
        self.leave_scope();
        Some(request)
    }

    pub fn navigate_to_breadcrumb(&mut self, index: usize) -> Option<RefreshRequest> {
        let request = self.view.navigate_to_breadcrumb(index)?;
        self.leave_scope();
        Some(request)
    }

    pub fn refresh(&mut self) -> RefreshRequest {
        self.view.refresh()
    }

    /// Land a listing. An applied listing closes a preview whose target is
    /// gone.
    pub fn apply_refresh(
        &mut self,
        request: &RefreshRequest,
        result: Result<Listing, FetchError>,
    ) -> RefreshOutcome {
        let outcome = self.view.apply(request, result);
        if outcome == RefreshOutcome::Applied && self.carousel.revalidate(self.view.listing()) {
            log_info("Preview closed: image no longer in listing");
        }
        outcome
    }

    pub fn set_storage(&mut self, storage: StorageUsage) {
        self.storage = storage;
    }

    // -------------------------------------------------------------------------
    // Preview
    // -------------------------------------------------------------------------

    pub fn open_entry(&mut self, entry: &Entry) -> OpenAction {
        match entry {
            Entry::Folder(folder) => match self.navigate_into(folder) {
                Some(request) => OpenAction::Navigate(request),
                None => OpenAction::Ignored,
            },
            Entry::File(file) if self.carousel.open(file, self.view.listing()) => OpenAction::Preview,
            Entry::File(file) => OpenAction::External(file.clone()),
        }
    }

    pub fn close_preview(&mut self) {
        self.carousel.close();
    }

    pub fn step_preview(&mut self, direction: Direction) {
        self.carousel.step(direction, self.view.listing());
    }

    /// Returns `true` when the key was consumed by the open preview.
    pub fn handle_preview_key(&mut self, key: &str) -> bool {
        self.carousel.handle_key(key, self.view.listing())
    }

    pub fn preview_position(&self) -> Option<(usize, usize)> {
        self.carousel.position(self.view.listing())
    }

    // -------------------------------------------------------------------------
    // Mutation bookkeeping
    // -------------------------------------------------------------------------

    /// Mark an upload as started. `false` if one is already in flight.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        true
    }

    pub fn finish_upload(&mut self) {
        self.uploading = false;
    }

    pub fn entry_updated(&mut self, entry: &Entry) {
        self.selection.refresh_selected(entry);
    }

    pub fn entry_removed(&mut self, key: EntryKey) {
        self.selection.clear_if_targets(key);
    }
}

/// Shared, interior-mutable home of a [`DriveState`].
///
/// Both accessors return `None` once the owner has been disposed.
pub trait DriveCell {
    fn with_state<R>(&self, f: impl FnOnce(&DriveState) -> R) -> Option<R>;
    fn update_state<R>(&self, f: impl FnOnce(&mut DriveState) -> R) -> Option<R>;
}

impl DriveCell for Rc<RefCell<DriveState>> {
    fn with_state<R>(&self, f: impl FnOnce(&DriveState) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }

    fn update_state<R>(&self, f: impl FnOnce(&mut DriveState) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

// =============================================================================
// Async drivers
// =============================================================================

/// Run an issued listing query and land its result.
pub async fn run_refresh<A: DriveApi, C: DriveCell>(
    api: &A,
    cx: &RequestContext,
    cell: &C,
    request: RefreshRequest,
) -> RefreshOutcome {
    let result = api.list_entries(cx, &request.scope).await;
    let outcome = cell
        .update_state(|state| state.apply_refresh(&request, result))
        .unwrap_or(RefreshOutcome::Stale);
    if let RefreshOutcome::Failed(e) = &outcome {
        log_failure(ErrorClass::Transient, "Failed to refresh listing", e);
    }
    outcome
}

/// Re-query the current scope.
pub async fn refresh<A: DriveApi, C: DriveCell>(api: &A, cx: &RequestContext, cell: &C) -> RefreshOutcome {
    match cell.update_state(DriveState::refresh) {
        Some(request) => run_refresh(api, cx, cell, request).await,
        None => RefreshOutcome::Stale,
    }
}

pub async fn switch_view<A: DriveApi, C: DriveCell>(
    api: &A,
    cx: &RequestContext,
    cell: &C,
    view: View,
) -> RefreshOutcome {
    match cell.update_state(|state| state.set_view(view)) {
        Some(request) => run_refresh(api, cx, cell, request).await,
        None => RefreshOutcome::Stale,
    }
}

/// Descend into `folder`; `None` if the active view is not hierarchical.
pub async fn open_folder<A: DriveApi, C: DriveCell>(
    api: &A,
    cx: &RequestContext,
    cell: &C,
    folder: &FolderEntry,
) -> Option<RefreshOutcome> {
    let request = cell.update_state(|state| state.navigate_into(folder)).flatten()?;
    Some(run_refresh(api, cx, cell, request).await)
}

pub async fn open_breadcrumb<A: DriveApi, C: DriveCell>(
    api: &A,
    cx: &RequestContext,
    cell: &C,
    index: usize,
) -> Option<RefreshOutcome> {
    let request = cell
        .update_state(|state| state.navigate_to_breadcrumb(index))
        .flatten()?;
    Some(run_refresh(api, cx, cell, request).await)
}

/// Update the storage meter. Failures keep the previous value.
pub async fn refresh_storage<A: DriveApi, C: DriveCell>(
    api: &A,
    cx: &RequestContext,
    cell: &C,
) -> Result<(), FetchError> {
    match api.storage_usage(cx).await {
        Ok(usage) => {
            cell.update_state(|state| state.set_storage(usage));
            Ok(())
        }
        Err(e) => {
            log_failure(ErrorClass::Transient, "Failed to fetch storage usage", &e);
            Err(e)
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::api::mock::{Call, MockApi};
    use crate::models::fixtures::{file, folder};
    use crate::models::Scope;

    pub(crate) fn cx() -> RequestContext {
        RequestContext::new("/api", "token")
    }

    pub(crate) fn cell() -> Rc<RefCell<DriveState>> {
        Rc::new(RefCell::new(DriveState::new()))
    }

    fn root_listing() -> Listing {
        Listing {
            folders: vec![folder(1, "Docs")],
            files: vec![file(1, "a.png"), file(2, "notes.txt"), file(3, "b.jpg")],
        }
    }

    #[tokio::test]
    async fn test_refresh_lands_listing() {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        let outcome = refresh(&api, &cx(), &cell).await;
        assert_eq!(outcome, RefreshOutcome::Applied);
        assert_eq!(cell.borrow().view().listing(), &root_listing());
        assert_eq!(api.calls(), vec![Call::List(Scope::Folder(None))]);
    }

    #[tokio::test]
    async fn test_open_folder_issues_scoped_refresh_and_clears_selection() {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        refresh(&api, &cx(), &cell).await;
        cell.borrow_mut()
            .selection_mut()
            .select(Entry::from(file(1, "a.png")));

        let outcome = open_folder(&api, &cx(), &cell, &folder(1, "Docs")).await;
        assert_eq!(outcome, Some(RefreshOutcome::Applied));
        assert_eq!(api.calls().last(), Some(&Call::List(Scope::Folder(Some(1)))));
        assert!(cell.borrow().selection().selection().is_none());
        assert_eq!(cell.borrow().view().active_folder(), Some(1));
    }

    #[tokio::test]
    async fn test_open_folder_in_flat_view_sends_nothing() {
        let api = MockApi::new();
        let cell = cell();
        switch_view(&api, &cx(), &cell, View::Starred).await;
        let before = api.calls().len();
        assert_eq!(open_folder(&api, &cx(), &cell, &folder(9, "x")).await, None);
        assert_eq!(api.calls().len(), before);
        assert_eq!(cell.borrow().view().path().last().label, "Starred");
    }

    #[tokio::test]
    async fn test_breadcrumb_clears_context_menu() {
        let api = MockApi::new();
        let cell = cell();
        open_folder(&api, &cx(), &cell, &folder(1, "Docs")).await;
        cell.borrow_mut()
            .selection_mut()
            .open_context_menu_at(3, 4, Entry::from(file(8, "x.txt")));

        open_breadcrumb(&api, &cx(), &cell, 0).await;
        let state = cell.borrow();
        assert!(state.selection().context_menu().is_none());
        assert!(state.selection().selection().is_none());
        assert_eq!(state.view().path().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_listing() {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        refresh(&api, &cx(), &cell).await;

        api.set_failing(true);
        let outcome = refresh(&api, &cx(), &cell).await;
        assert_eq!(outcome, RefreshOutcome::Failed(FetchError::HttpError(500)));
        assert_eq!(cell.borrow().view().listing(), &root_listing());
    }

    #[tokio::test]
    async fn test_refresh_closes_preview_of_removed_image() {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        refresh(&api, &cx(), &cell).await;
        assert_eq!(
            cell.borrow_mut().open_entry(&Entry::from(file(3, "b.jpg"))),
            OpenAction::Preview
        );

        api.set_listing(
            Scope::Folder(None),
            Listing {
                folders: vec![],
                files: vec![file(1, "a.png")],
            },
        );
        refresh(&api, &cx(), &cell).await;
        assert!(!cell.borrow().carousel().is_open());
    }

    #[tokio::test]
    async fn test_out_of_order_responses_keep_latest() {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        let release_first = api.hold_next_list();

        let first_cx = cx();
        let first = refresh(&api, &first_cx, &cell);
        let second = async {
            assert!(cell.borrow().view().is_pending());
            let outcome = refresh(&api, &cx(), &cell).await;
            // The slow first response lands after the second one.
            let _ = release_first.send(Ok(Listing::default()));
            outcome
        };
        let (first, second) = futures::join!(first, second);

        assert_eq!(second, RefreshOutcome::Applied);
        assert_eq!(first, RefreshOutcome::Stale);
        assert_eq!(cell.borrow().view().listing(), &root_listing());
        assert!(!cell.borrow().view().is_pending());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_previous_value() {
        let api = MockApi::new();
        api.set_storage(2048, 4096);
        let cell = cell();
        refresh_storage(&api, &cx(), &cell).await.unwrap();
        assert_eq!(cell.borrow().storage().used, 2048);

        api.set_failing(true);
        assert!(refresh_storage(&api, &cx(), &cell).await.is_err());
        assert_eq!(cell.borrow().storage().limit, 4096);
    }

    #[test]
    fn test_open_entry_dispatch() {
        let mut state = DriveState::new();
        let request = state.refresh();
        state.apply_refresh(&request, Ok(root_listing()));

        assert_eq!(state.open_entry(&Entry::from(file(1, "a.png"))), OpenAction::Preview);
        assert_eq!(state.preview_position(), Some((1, 2)));
        assert!(state.handle_preview_key("ArrowRight"));
        assert_eq!(state.carousel().target().map(|f| f.id), Some(3));

        let notes = file(2, "notes.txt");
        assert_eq!(
            state.open_entry(&Entry::from(notes.clone())),
            OpenAction::External(notes)
        );
        assert!(matches!(
            state.open_entry(&Entry::from(folder(1, "Docs"))),
            OpenAction::Navigate(_)
        ));
        // Leaving the folder closed the preview.
        assert!(!state.carousel().is_open());

        state.set_view(View::Trash);
        assert_eq!(state.open_entry(&Entry::from(folder(1, "Docs"))), OpenAction::Ignored);
    }

    #[test]
    fn test_background_click_clears_selection_and_menu() {
        let mut state = DriveState::new();
        state
            .selection_mut()
            .open_context_menu_at(10, 20, Entry::from(file(1, "a.png")));

        state.clear_selection();
        assert!(state.selection().selection().is_none());
        assert!(state.selection().context_menu().is_none());
    }

    #[test]
    fn test_upload_flag_is_exclusive() {
        let mut state = DriveState::new();
        assert!(state.begin_upload());
        assert!(!state.begin_upload());
        state.finish_upload();
        assert!(state.begin_upload());
    }
}
