//! Explorer-related data types for the file browser UI.

use super::entry::{Entry, EntryKey};

/// The single selected entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection {
    pub entry: Entry,
}

impl Selection {
    pub fn key(&self) -> EntryKey {
        self.entry.key()
    }
}

/// An open context menu: screen position and target entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextMenu {
    pub x: i32,
    pub y: i32,
    pub target: Entry,
}
