//! Create, upload, rename, star, trash, restore and delete.
//!
//! Every operation follows the same protocol: validate locally, send one
//! request, and on success re-query the current scope. Nothing is applied
//! optimistically, so a failed request leaves the listing and the selection
//! exactly as they were.

use crate::core::api::{DriveApi, RequestContext};
use crate::core::drive::{DriveCell, refresh, refresh_storage};
use crate::core::error::MutationError;
use crate::models::{Entry, EntryKey, FileEntry, FolderEntry, View};
use crate::utils::dom::log_failure;

/// Proof that the user confirmed an irreversible delete.
#[derive(Debug, PartialEq, Eq)]
pub struct ConfirmedDelete {
    key: EntryKey,
}

impl ConfirmedDelete {
    /// Construct only after an explicit confirmation prompt was accepted.
    pub fn confirmed(key: EntryKey) -> Self {
        Self { key }
    }

    pub fn key(&self) -> EntryKey {
        self.key
    }
}

/// Issues mutations for one session.
pub struct MutationDispatcher<A, C> {
    api: A,
    cx: RequestContext,
    cell: C,
}

impl<A: DriveApi, C: DriveCell> MutationDispatcher<A, C> {
    pub fn new(api: A, cx: RequestContext, cell: C) -> Self {
        Self { api, cx, cell }
    }

    fn active_view(&self) -> View {
        self.cell
            .with_state(|state| state.view().view())
            .unwrap_or_default()
    }

    fn upload_parent(&self) -> Option<u64> {
        self.cell
            .with_state(|state| state.view().upload_parent())
            .flatten()
    }

    fn is_uploading(&self) -> bool {
        self.cell
            .with_state(|state| state.is_uploading())
            .unwrap_or(false)
    }

    fn failed(&self, action: &str, err: MutationError) -> MutationError {
        log_failure(err.class(), &format!("{} failed", action), &err);
        err
    }

    async fn after_success(&self, storage_changed: bool) {
        refresh(&self.api, &self.cx, &self.cell).await;
        if storage_changed {
            let _ = refresh_storage(&self.api, &self.cx, &self.cell).await;
        }
    }

    /// Create a folder under the active folder (root outside "My Files").
    pub async fn create_folder(&self, name: &str) -> Result<FolderEntry, MutationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(MutationError::EmptyName);
        }
        if self.is_uploading() {
            return Err(MutationError::UploadInFlight);
        }
        let parent = self.upload_parent();
        match self.api.create_folder(&self.cx, name, parent).await {
            Ok(folder) => {
                self.after_success(false).await;
                Ok(folder)
            }
            Err(e) => Err(self.failed("Create folder", e.into())),
        }
    }

    /// Upload one file. Rejected while a previous upload is unsettled.
    pub async fn upload(&self, file: &A::Upload) -> Result<FileEntry, MutationError> {
        if !self
            .cell
            .update_state(|state| state.begin_upload())
            .unwrap_or(false)
        {
            return Err(MutationError::UploadInFlight);
        }
        let parent = self.upload_parent();
        let result = self.api.upload_file(&self.cx, file, parent).await;
        self.cell.update_state(|state| state.finish_upload());
        match result {
            Ok(uploaded) => {
                self.after_success(true).await;
                Ok(uploaded)
            }
            Err(e) => Err(self.failed("Upload", e.into())),
        }
    }

    pub async fn rename(&self, entry: &Entry, new_name: &str) -> Result<Entry, MutationError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(MutationError::EmptyName);
        }
        if new_name == entry.name() {
            return Err(MutationError::UnchangedName);
        }
        match self.api.rename(&self.cx, entry.key(), new_name).await {
            Ok(updated) => {
                self.cell.update_state(|state| state.entry_updated(&updated));
                self.after_success(false).await;
                Ok(updated)
            }
            Err(e) => Err(self.failed("Rename", e.into())),
        }
    }

    pub async fn toggle_star(&self, key: EntryKey) -> Result<Entry, MutationError> {
        match self.api.toggle_star(&self.cx, key).await {
            Ok(updated) => {
                self.cell.update_state(|state| state.entry_updated(&updated));
                self.after_success(false).await;
                Ok(updated)
            }
            Err(e) => Err(self.failed("Star", e.into())),
        }
    }

    /// Move to trash (`restore == false`, outside the trash view) or restore
    /// from it (`restore == true`, trash view only).
    pub async fn set_trashed(&self, key: EntryKey, restore: bool) -> Result<(), MutationError> {
        let in_trash = self.active_view() == View::Trash;
        if restore && !in_trash {
            return Err(MutationError::NotPermitted("Restore"));
        }
        if !restore && in_trash {
            return Err(MutationError::NotPermitted("Move to trash"));
        }
        match self.api.set_trashed(&self.cx, key, restore).await {
            Ok(()) => {
                self.cell.update_state(|state| state.entry_removed(key));
                self.after_success(true).await;
                Ok(())
            }
            Err(e) => {
                let action = if restore { "Restore" } else { "Move to trash" };
                Err(self.failed(action, e.into()))
            }
        }
    }

    /// Irreversibly delete a trashed entry.
    pub async fn delete_forever(&self, confirmed: ConfirmedDelete) -> Result<(), MutationError> {
        if self.active_view() != View::Trash {
            return Err(MutationError::NotPermitted("Delete forever"));
        }
        let key = confirmed.key();
        match self.api.delete_forever(&self.cx, key).await {
            Ok(()) => {
                self.cell.update_state(|state| state.entry_removed(key));
                self.after_success(true).await;
                Ok(())
            }
            Err(e) => Err(self.failed("Delete forever", e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::api::mock::{Call, MockApi};
    use crate::core::drive::tests::{cell, cx};
    use crate::core::drive::{DriveState, switch_view};
    use crate::core::error::FetchError;
    use crate::models::fixtures::{file, folder};
    use crate::models::{Listing, Scope};

    fn root_listing() -> Listing {
        Listing {
            folders: vec![folder(1, "Docs")],
            files: vec![file(5, "report.pdf"), file(6, "photo.png")],
        }
    }

    async fn setup() -> (MockApi, Rc<RefCell<DriveState>>) {
        let api = MockApi::new().with_listing(Scope::Folder(None), root_listing());
        let cell = cell();
        refresh(&api, &cx(), &cell).await;
        (api, cell)
    }

    fn dispatcher(
        api: &MockApi,
        cell: &Rc<RefCell<DriveState>>,
    ) -> MutationDispatcher<MockApi, Rc<RefCell<DriveState>>> {
        MutationDispatcher::new(api.clone(), cx(), cell.clone())
    }

    #[tokio::test]
    async fn test_trash_clears_selection_and_refreshes() {
        let (api, cell) = setup().await;
        cell.borrow_mut()
            .selection_mut()
            .select(Entry::from(file(5, "report.pdf")));
        let before = api.calls().len();

        dispatcher(&api, &cell)
            .set_trashed(EntryKey::file(5), false)
            .await
            .unwrap();

        let calls = api.calls()[before..].to_vec();
        assert_eq!(calls[0], Call::SetTrashed(EntryKey::file(5), false));
        assert!(calls.contains(&Call::List(Scope::Folder(None))));
        assert!(cell.borrow().selection().selection().is_none());
    }

    #[tokio::test]
    async fn test_failed_mutations_change_nothing() {
        let (api, cell) = setup().await;
        let selected = Entry::from(file(5, "report.pdf"));
        cell.borrow_mut().selection_mut().select(selected.clone());
        let snapshot = cell.borrow().clone();

        api.set_failing(true);
        let d = dispatcher(&api, &cell);
        assert_eq!(
            d.rename(&selected, "final.pdf").await,
            Err(MutationError::Remote(FetchError::HttpError(500)))
        );
        assert!(d.toggle_star(selected.key()).await.is_err());
        assert!(d.set_trashed(selected.key(), false).await.is_err());

        assert_eq!(*cell.borrow(), snapshot);
        // No refresh was attempted after a failure.
        assert!(!api.calls().ends_with(&[Call::List(Scope::Folder(None))]));
    }

    #[tokio::test]
    async fn test_rename_validation_sends_nothing() {
        let (api, cell) = setup().await;
        let d = dispatcher(&api, &cell);
        let entry = Entry::from(file(5, "report.pdf"));

        assert_eq!(d.rename(&entry, "   ").await, Err(MutationError::EmptyName));
        assert_eq!(d.rename(&entry, "report.pdf").await, Err(MutationError::UnchangedName));
        assert!(api.mutation_calls().is_empty());
    }

    #[tokio::test]
    async fn test_rename_updates_selection_with_server_copy() {
        let (api, cell) = setup().await;
        let entry = Entry::from(file(5, "report.pdf"));
        cell.borrow_mut().selection_mut().select(entry.clone());

        let updated = dispatcher(&api, &cell)
            .rename(&entry, "  final.pdf ")
            .await
            .unwrap();
        assert_eq!(updated.name(), "final.pdf");
        assert_eq!(
            api.mutation_calls(),
            vec![Call::Rename(EntryKey::file(5), "final.pdf".to_string())]
        );
        assert_eq!(
            cell.borrow().selection().selection().map(|s| s.entry.name().to_string()),
            Some("final.pdf".to_string())
        );
    }

    #[tokio::test]
    async fn test_toggle_star_uses_server_value() {
        let (api, cell) = setup().await;
        cell.borrow_mut()
            .selection_mut()
            .select(Entry::from(folder(1, "Docs")));
        let updated = dispatcher(&api, &cell)
            .toggle_star(EntryKey::folder(1))
            .await
            .unwrap();
        assert!(updated.is_starred());
        assert!(cell.borrow().selection().selection().unwrap().entry.is_starred());
    }

    #[tokio::test]
    async fn test_trash_and_restore_respect_active_view() {
        let (api, cell) = setup().await;
        let d = dispatcher(&api, &cell);
        assert_eq!(
            d.set_trashed(EntryKey::file(5), true).await,
            Err(MutationError::NotPermitted("Restore"))
        );

        switch_view(&api, &cx(), &cell, View::Trash).await;
        assert_eq!(
            d.set_trashed(EntryKey::file(5), false).await,
            Err(MutationError::NotPermitted("Move to trash"))
        );
        d.set_trashed(EntryKey::file(5), true).await.unwrap();
        assert_eq!(
            api.mutation_calls(),
            vec![Call::SetTrashed(EntryKey::file(5), true)]
        );
    }

    #[tokio::test]
    async fn test_delete_forever_only_from_trash() {
        let (api, cell) = setup().await;
        let d = dispatcher(&api, &cell);
        let result = d
            .delete_forever(ConfirmedDelete::confirmed(EntryKey::file(5)))
            .await;
        assert_eq!(result, Err(MutationError::NotPermitted("Delete forever")));

        switch_view(&api, &cx(), &cell, View::Trash).await;
        d.delete_forever(ConfirmedDelete::confirmed(EntryKey::file(5)))
            .await
            .unwrap();
        assert_eq!(api.mutation_calls(), vec![Call::DeleteForever(EntryKey::file(5))]);
        assert_eq!(api.calls().last(), Some(&Call::Storage));
    }

    #[tokio::test]
    async fn test_upload_targets_active_folder_and_clears_flag() {
        let (api, cell) = setup().await;
        crate::core::drive::open_folder(&api, &cx(), &cell, &folder(1, "Docs")).await;

        let d = dispatcher(&api, &cell);
        d.upload(&"cat.png".to_string()).await.unwrap();
        assert_eq!(
            api.mutation_calls(),
            vec![Call::Upload("cat.png".to_string(), Some(1))]
        );
        assert!(!cell.borrow().is_uploading());

        api.set_failing(true);
        assert!(d.upload(&"dog.png".to_string()).await.is_err());
        assert!(!cell.borrow().is_uploading());
    }

    #[tokio::test]
    async fn test_upload_rejected_while_in_flight() {
        let (api, cell) = setup().await;
        let release = api.hold_next_upload();
        let d = dispatcher(&api, &cell);

        let name = "cat.png".to_string();
        let first = d.upload(&name);
        let during = async {
            assert!(cell.borrow().is_uploading());
            let second = d.upload(&"dog.png".to_string()).await;
            let folder = d.create_folder("New").await;
            let _ = release.send(Ok(()));
            (second, folder)
        };
        let (first, (second, folder)) = futures::join!(first, during);

        assert!(first.is_ok());
        assert_eq!(second, Err(MutationError::UploadInFlight));
        assert_eq!(folder, Err(MutationError::UploadInFlight));
        assert_eq!(
            api.mutation_calls(),
            vec![Call::Upload("cat.png".to_string(), None)]
        );
        assert!(!cell.borrow().is_uploading());
    }

    #[tokio::test]
    async fn test_upload_failing_mid_flight_clears_flag() {
        let (api, cell) = setup().await;
        let release = api.hold_next_upload();
        let d = dispatcher(&api, &cell);
        let listing_before = cell.borrow().view().listing().clone();

        let name = "cat.png".to_string();
        let upload = d.upload(&name);
        let fail = async {
            assert!(cell.borrow().is_uploading());
            let _ = release.send(Err(FetchError::Timeout));
        };
        let (result, ()) = futures::join!(upload, fail);

        assert_eq!(result, Err(MutationError::Remote(FetchError::Timeout)));
        assert!(!cell.borrow().is_uploading());
        assert_eq!(*cell.borrow().view().listing(), listing_before);
        d.upload(&"dog.png".to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn test_create_folder_in_flat_view_goes_to_root() {
        let (api, cell) = setup().await;
        crate::core::drive::open_folder(&api, &cx(), &cell, &folder(1, "Docs")).await;
        switch_view(&api, &cx(), &cell, View::Recent).await;

        let d = dispatcher(&api, &cell);
        assert_eq!(d.create_folder("  ").await, Err(MutationError::EmptyName));
        let created = d.create_folder(" Photos ").await.unwrap();
        assert_eq!(created.name, "Photos");
        assert_eq!(
            api.mutation_calls(),
            vec![Call::CreateFolder("Photos".to_string(), None)]
        );
    }
}
