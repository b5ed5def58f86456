//! Local handles for authenticated binary content.
//!
//! Images behind bearer-token auth cannot be referenced by URL from an
//! `<img>` tag. Instead each consumer owns a [`ResourceSlot`]: it fetches the
//! bytes, wraps them in a revocable object URL and revokes that URL when the
//! consumer goes away or switches to another source.
//!
//! Slots are never shared. A slot holds at most one live handle, and a
//! [`ResourceHandle`] is not `Clone`, so the only way to give it up is to
//! move it into [`ObjectUrls::revoke`].

use crate::core::error::FetchError;

/// Creates and revokes object URLs for fetched content.
pub trait ObjectUrls {
    type Content;

    fn create(&self, content: &Self::Content) -> Result<String, FetchError>;
    fn revoke(&self, handle: ResourceHandle);
}

/// A live object URL. Revoked exactly once, by moving it into
/// [`ObjectUrls::revoke`].
#[derive(Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    object_url: String,
}

impl ResourceHandle {
    pub fn object_url(&self) -> &str {
        &self.object_url
    }
}

/// What a consumer should render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ResourceView {
    #[default]
    Idle,
    /// Fetch in flight: loading placeholder.
    Loading,
    /// Handle ready: `src` for the element.
    Ready(String),
    /// Fetch failed: fallback placeholder, no automatic retry.
    Failed,
}

/// Token for one `acquire`; results carrying an outdated token are dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcquireTicket {
    generation: u64,
    url: String,
}

impl AcquireTicket {
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[derive(Debug)]
enum SlotState {
    Idle,
    Pending,
    Ready(ResourceHandle),
    Failed,
}

/// Per-consumer holder of at most one handle.
pub struct ResourceSlot<O: ObjectUrls> {
    urls: O,
    generation: u64,
    source: Option<String>,
    state: SlotState,
}

impl<O: ObjectUrls> ResourceSlot<O> {
    pub fn new(urls: O) -> Self {
        Self {
            urls,
            generation: 0,
            source: None,
            state: SlotState::Idle,
        }
    }

    pub fn view(&self) -> ResourceView {
        match &self.state {
            SlotState::Idle => ResourceView::Idle,
            SlotState::Pending => ResourceView::Loading,
            SlotState::Ready(handle) => ResourceView::Ready(handle.object_url().to_string()),
            SlotState::Failed => ResourceView::Failed,
        }
    }

    /// Start tracking `url`. The previous handle is released first, whether
    /// or not the new fetch succeeds, and any fetch still pending for the old
    /// URL is orphaned.
    ///
    /// Returns `None` when `url` is already tracked (loading, ready or
    /// failed): re-renders do not re-fetch and failures are not retried.
    /// An empty `url` releases the slot and fetches nothing.
    pub fn acquire(&mut self, url: &str) -> Option<AcquireTicket> {
        if url.is_empty() {
            self.release();
            return None;
        }
        if self.source.as_deref() == Some(url) && !matches!(self.state, SlotState::Idle) {
            return None;
        }
        self.release();
        self.source = Some(url.to_string());
        self.state = SlotState::Pending;
        Some(AcquireTicket {
            generation: self.generation,
            url: url.to_string(),
        })
    }

    /// Forget the current result and fetch `url` again (user-initiated retry).
    pub fn reload(&mut self, url: &str) -> AcquireTicket {
        self.release();
        self.source = Some(url.to_string());
        self.state = SlotState::Pending;
        AcquireTicket {
            generation: self.generation,
            url: url.to_string(),
        }
    }

    /// Land a fetch result. Returns `false` if the ticket is outdated and the
    /// result was discarded.
    pub fn resolve(&mut self, ticket: &AcquireTicket, result: Result<O::Content, FetchError>) -> bool {
        if ticket.generation != self.generation || !matches!(self.state, SlotState::Pending) {
            return false;
        }
        self.state = match result.and_then(|content| self.urls.create(&content)) {
            Ok(object_url) => SlotState::Ready(ResourceHandle { object_url }),
            Err(_) => SlotState::Failed,
        };
        true
    }

    /// Revoke the handle (if any) and orphan any pending fetch.
    pub fn release(&mut self) {
        self.generation += 1;
        if let SlotState::Ready(handle) = std::mem::replace(&mut self.state, SlotState::Idle) {
            self.urls.revoke(handle);
        }
        self.state = SlotState::Idle;
        self.source = None;
    }
}

impl<O: ObjectUrls> Drop for ResourceSlot<O> {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Browser implementation
// =============================================================================

/// Object URLs backed by `URL.createObjectURL` / `URL.revokeObjectURL`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlobUrls;

impl ObjectUrls for BlobUrls {
    type Content = web_sys::Blob;

    fn create(&self, content: &web_sys::Blob) -> Result<String, FetchError> {
        web_sys::Url::create_object_url_with_blob(content).map_err(|_| FetchError::ObjectUrlFailed)
    }

    fn revoke(&self, handle: ResourceHandle) {
        let _ = web_sys::Url::revoke_object_url(handle.object_url());
    }
}


#[cfg(test)]
mod tests {
    use super::mock::CountingUrls;
    use super::*;

    #[test]
    fn test_acquire_then_resolve() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        let ticket = slot.acquire("/api/file/1/content").unwrap();
        assert_eq!(slot.view(), ResourceView::Loading);

        assert!(slot.resolve(&ticket, Ok(b"a".to_vec())));
        assert_eq!(slot.view(), ResourceView::Ready("blob:test/0-a".to_string()));
        assert_eq!(urls.live().len(), 1);
    }

    #[test]
    fn test_slow_first_fetch_cannot_overwrite_second() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        let a = slot.acquire("/a").unwrap();
        let b = slot.acquire("/b").unwrap();

        assert!(slot.resolve(&b, Ok(b"b".to_vec())));
        assert!(!slot.resolve(&a, Ok(b"a".to_vec())));

        assert_eq!(slot.view(), ResourceView::Ready("blob:test/0-b".to_string()));
        // The late result never became a handle.
        assert_eq!(urls.created.borrow().len(), 1);
    }

    #[test]
    fn test_slow_first_fetch_discarded_even_if_second_pending() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        let a = slot.acquire("/a").unwrap();
        let _b = slot.acquire("/b").unwrap();
        assert!(!slot.resolve(&a, Ok(b"a".to_vec())));
        assert_eq!(slot.view(), ResourceView::Loading);
    }

    #[test]
    fn test_url_change_releases_old_handle_first() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        let a = slot.acquire("/a").unwrap();
        slot.resolve(&a, Ok(b"a".to_vec()));

        let b = slot.acquire("/b").unwrap();
        assert_eq!(urls.revoked.borrow().as_slice(), ["blob:test/0-a"]);

        // New fetch fails: old handle stays revoked, nothing leaks.
        slot.resolve(&b, Err(FetchError::HttpError(404)));
        assert_eq!(slot.view(), ResourceView::Failed);
        assert!(urls.live().is_empty());
    }

    #[test]
    fn test_same_url_is_not_refetched_or_retried() {
        let mut slot = ResourceSlot::new(CountingUrls::default());
        let ticket = slot.acquire("/a").unwrap();
        assert!(slot.acquire("/a").is_none());
        slot.resolve(&ticket, Err(FetchError::Timeout));
        assert!(slot.acquire("/a").is_none());
        assert_eq!(slot.view(), ResourceView::Failed);

        let retry = slot.reload("/a");
        assert!(slot.resolve(&retry, Ok(b"a".to_vec())));
    }

    #[test]
    fn test_empty_source_releases_without_fetching() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        assert!(slot.acquire("").is_none());
        assert_eq!(slot.view(), ResourceView::Idle);

        let ticket = slot.acquire("/a").unwrap();
        slot.resolve(&ticket, Ok(b"a".to_vec()));
        assert!(slot.acquire("").is_none());
        assert_eq!(slot.view(), ResourceView::Idle);
        assert!(urls.live().is_empty());

        // Coming back to the same image fetches it again.
        assert!(slot.acquire("/a").is_some());
    }

    #[test]
    fn test_release_revokes_exactly_once() {
        let urls = CountingUrls::default();
        let mut slot = ResourceSlot::new(urls.clone());
        let ticket = slot.acquire("/a").unwrap();
        slot.resolve(&ticket, Ok(b"a".to_vec()));

        slot.release();
        slot.release();
        drop(slot);
        assert_eq!(urls.revoked.borrow().len(), 1);
    }

    #[test]
    fn test_drop_revokes_and_orphans_pending() {
        let urls = CountingUrls::default();
        {
            let mut slot = ResourceSlot::new(urls.clone());
            let ticket = slot.acquire("/a").unwrap();
            slot.resolve(&ticket, Ok(b"a".to_vec()));
        }
        assert!(urls.live().is_empty());

        let mut slot = ResourceSlot::new(urls.clone());
        let ticket = slot.acquire("/b").unwrap();
        slot.release();
        assert!(!slot.resolve(&ticket, Ok(b"b".to_vec())));
        assert_eq!(slot.view(), ResourceView::Idle);
    }
}
