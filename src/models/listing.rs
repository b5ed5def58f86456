//! Listings returned for one navigation scope, and storage usage.

use serde::{Deserialize, Serialize};

use super::entry::{FileEntry, FolderEntry};
use crate::config::DEFAULT_STORAGE_LIMIT;

/// Folders and files for one scope, in server order.
///
/// The client never re-sorts a listing and never patches one in place; a
/// refresh replaces it as a whole.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListingWire")]
pub struct Listing {
    pub folders: Vec<FolderEntry>,
    pub files: Vec<FileEntry>,
}

/// Wire shape: the server may send `null` for an empty list.
#[derive(Deserialize)]
struct ListingWire {
    #[serde(default)]
    folders: Option<Vec<FolderEntry>>,
    #[serde(default)]
    files: Option<Vec<FileEntry>>,
}

impl From<ListingWire> for Listing {
    fn from(wire: ListingWire) -> Self {
        Self {
            folders: wire.folders.unwrap_or_default(),
            files: wire.files.unwrap_or_default(),
        }
    }
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Image-type files, in listing order.
    pub fn images(&self) -> Vec<&FileEntry> {
        self.files.iter().filter(|f| f.is_image()).collect()
    }
}

/// Storage quota as reported by the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    pub used: u64,
    pub limit: u64,
}

impl Default for StorageUsage {
    fn default() -> Self {
        Self {
            used: 0,
            limit: DEFAULT_STORAGE_LIMIT,
        }
    }
}

impl StorageUsage {
    /// Share of the quota in use, capped at 100.
    pub fn percent_used(&self) -> f64 {
        if self.limit == 0 {
            return 100.0;
        }
        (self.used as f64 / self.limit as f64 * 100.0).min(100.0)
    }
}
