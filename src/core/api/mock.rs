//! In-memory [`DriveApi`] for tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use futures::channel::oneshot;

use super::{DriveApi, RequestContext};
use crate::core::error::FetchError;
use crate::models::{Entry, EntryKey, FileEntry, FolderEntry, Listing, Scope, StorageUsage};

/// A request the mock received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    List(Scope),
    Storage,
    CreateFolder(String, Option<u64>),
    Upload(String, Option<u64>),
    Rename(EntryKey, String),
    ToggleStar(EntryKey),
    SetTrashed(EntryKey, bool),
    DeleteForever(EntryKey),
    FetchContent(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        !matches!(self, Self::List(_) | Self::Storage | Self::FetchContent(_))
    }
}

#[derive(Default)]
struct MockState {
    listings: HashMap<Scope, Listing>,
    storage: StorageUsage,
    failing: bool,
    calls: Vec<Call>,
    next_id: u64,
    held_list: Option<oneshot::Receiver<Result<Listing, FetchError>>>,
    held_upload: Option<oneshot::Receiver<Result<(), FetchError>>>,
}

/// Scripted API. Clones share state, so a test can keep one copy while the
/// code under test owns another.
#[derive(Clone, Default)]
pub struct MockApi {
    state: Rc<RefCell<MockState>>,
}

impl MockApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.state.borrow_mut().next_id = 100;
        api
    }

    pub fn with_listing(self, scope: Scope, listing: Listing) -> Self {
        self.set_listing(scope, listing);
        self
    }

    pub fn set_listing(&self, scope: Scope, listing: Listing) {
        self.state.borrow_mut().listings.insert(scope, listing);
    }

    pub fn set_storage(&self, used: u64, limit: u64) {
        self.state.borrow_mut().storage = StorageUsage { used, limit };
    }

    /// Make every following call fail with a 500.
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    /// Keep the next listing request pending until the returned sender
    /// delivers its result.
    pub fn hold_next_list(&self) -> oneshot::Sender<Result<Listing, FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().held_list = Some(rx);
        tx
    }

    /// Keep the next upload pending until the returned sender settles it.
    pub fn hold_next_upload(&self) -> oneshot::Sender<Result<(), FetchError>> {
        let (tx, rx) = oneshot::channel();
        self.state.borrow_mut().held_upload = Some(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn mutation_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    fn record(&self, call: Call) -> Result<(), FetchError> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if state.failing {
            Err(FetchError::HttpError(500))
        } else {
            Ok(())
        }
    }

    fn find(&self, key: EntryKey) -> Result<Entry, FetchError> {
        let state = self.state.borrow();
        state
            .listings
            .values()
            .flat_map(|l| {
                l.folders
                    .iter()
                    .cloned()
                    .map(Entry::from)
                    .chain(l.files.iter().cloned().map(Entry::from))
            })
            .find(|e| e.key() == key)
            .ok_or(FetchError::HttpError(404))
    }

    fn next_id(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.next_id
    }
}

impl DriveApi for MockApi {
    type Content = Vec<u8>;
    /// File name.
    type Upload = String;

    async fn list_entries(&self, _cx: &RequestContext, scope: &Scope) -> Result<Listing, FetchError> {
        self.record(Call::List(*scope))?;
        let held = self.state.borrow_mut().held_list.take();
        if let Some(rx) = held {
            return rx.await.unwrap_or(Err(FetchError::Timeout));
        }
        Ok(self
            .state
            .borrow()
            .listings
            .get(scope)
            .cloned()
            .unwrap_or_default())
    }

    async fn storage_usage(&self, _cx: &RequestContext) -> Result<StorageUsage, FetchError> {
        self.record(Call::Storage)?;
        Ok(self.state.borrow().storage)
    }

    async fn create_folder(
        &self,
        _cx: &RequestContext,
        name: &str,
        parent: Option<u64>,
    ) -> Result<FolderEntry, FetchError> {
        self.record(Call::CreateFolder(name.to_string(), parent))?;
        Ok(FolderEntry {
            id: self.next_id(),
            name: name.to_string(),
            created_at: "2024-03-02T00:00:00Z".to_string(),
            is_starred: false,
            deleted_at: None,
        })
    }

    async fn upload_file(
        &self,
        _cx: &RequestContext,
        file: &String,
        parent: Option<u64>,
    ) -> Result<FileEntry, FetchError> {
        self.record(Call::Upload(file.clone(), parent))?;
        let held = self.state.borrow_mut().held_upload.take();
        if let Some(rx) = held {
            rx.await.unwrap_or(Err(FetchError::Timeout))?;
        }
        Ok(FileEntry {
            id: self.next_id(),
            name: file.clone(),
            size: 0,
            created_at: "2024-03-02T00:00:00Z".to_string(),
            is_starred: false,
            deleted_at: None,
        })
    }

    async fn rename(&self, _cx: &RequestContext, key: EntryKey, name: &str) -> Result<Entry, FetchError> {
        self.record(Call::Rename(key, name.to_string()))?;
        Ok(match self.find(key)? {
            Entry::File(mut f) => {
                f.name = name.to_string();
                Entry::File(f)
            }
            Entry::Folder(mut f) => {
                f.name = name.to_string();
                Entry::Folder(f)
            }
        })
    }

    async fn toggle_star(&self, _cx: &RequestContext, key: EntryKey) -> Result<Entry, FetchError> {
        self.record(Call::ToggleStar(key))?;
        Ok(match self.find(key)? {
            Entry::File(mut f) => {
                f.is_starred = !f.is_starred;
                Entry::File(f)
            }
            Entry::Folder(mut f) => {
                f.is_starred = !f.is_starred;
                Entry::Folder(f)
            }
        })
    }

    async fn set_trashed(&self, _cx: &RequestContext, key: EntryKey, restore: bool) -> Result<(), FetchError> {
        self.record(Call::SetTrashed(key, restore))
    }

    async fn delete_forever(&self, _cx: &RequestContext, key: EntryKey) -> Result<(), FetchError> {
        self.record(Call::DeleteForever(key))
    }

    async fn fetch_content(&self, _cx: &RequestContext, url: &str) -> Result<Vec<u8>, FetchError> {
        self.record(Call::FetchContent(url.to_string()))?;
        Ok(url.as_bytes().to_vec())
    }
}
