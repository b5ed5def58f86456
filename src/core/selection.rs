//! Single selection and single context menu.
//!
//! Both are replaced wholesale, never merged or patched field by field.

use crate::models::{ContextMenu, Entry, EntryKey, Selection};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionController {
    selection: Option<Selection>,
    context_menu: Option<ContextMenu>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn is_selected(&self, key: EntryKey) -> bool {
        self.selection.as_ref().is_some_and(|s| s.key() == key)
    }

    /// Replace any existing selection (no toggle).
    pub fn select(&mut self, entry: Entry) {
        self.selection = Some(Selection { entry });
    }

    /// Empty both the selection and the context menu.
    pub fn clear(&mut self) {
        self.selection = None;
        self.context_menu = None;
    }

    /// Open the menu at a screen position; right-click implies select.
    pub fn open_context_menu_at(&mut self, x: i32, y: i32, entry: Entry) {
        self.context_menu = Some(ContextMenu {
            x,
            y,
            target: entry.clone(),
        });
        self.select(entry);
    }

    /// Close the menu but keep the selection (window click).
    pub fn dismiss_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Swap in the server's copy of the selected entry after a mutation.
    pub fn refresh_selected(&mut self, entry: &Entry) {
        if self.is_selected(entry.key()) {
            self.select(entry.clone());
        }
    }

    /// Clear if `key` is selected or targeted by the menu.
    pub fn clear_if_targets(&mut self, key: EntryKey) {
        let menu_targets = self
            .context_menu
            .as_ref()
            .is_some_and(|m| m.target.key() == key);
        if self.is_selected(key) || menu_targets {
            self.clear();
        }
    }
}
