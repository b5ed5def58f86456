//! Top-level views, navigation scopes and the breadcrumb path.

use std::fmt;

use crate::config::view_labels;

/// The four browsing modes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum View {
    /// Folder hierarchy ("My Files"), the only navigable view.
    #[default]
    MyFiles,
    Recent,
    Starred,
    Trash,
}

impl View {
    pub const ALL: [View; 4] = [View::MyFiles, View::Recent, View::Starred, View::Trash];

    pub fn is_hierarchical(&self) -> bool {
        matches!(self, Self::MyFiles)
    }

    /// Label of the single root breadcrumb.
    pub fn root_label(&self) -> &'static str {
        match self {
            Self::MyFiles => view_labels::MY_FILES,
            Self::Recent => view_labels::RECENT,
            Self::Starred => view_labels::STARRED,
            Self::Trash => view_labels::TRASH,
        }
    }

    /// Title and hint shown when the listing is empty.
    pub fn empty_state(&self) -> (&'static str, &'static str) {
        match self {
            Self::MyFiles => (
                "Folder is empty",
                "Drag files here or use the Upload button",
            ),
            Self::Recent => ("No recent files", "Files you upload will appear here"),
            Self::Starred => (
                "No starred files",
                "Star files/folders to find them easily here",
            ),
            Self::Trash => ("Trash is empty", "Deleted items will appear here"),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root_label())
    }
}

/// What a listing query returns: a folder under the hierarchical view, or
/// one of the flat views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Children of a folder (`None` = root).
    Folder(Option<u64>),
    Recent,
    Starred,
    Trash,
}

impl Scope {
    /// Query string for `GET /browse`.
    pub fn query(&self) -> String {
        match self {
            Self::Folder(None) => String::new(),
            Self::Folder(Some(id)) => format!("parent_id={}", id),
            Self::Recent => "view=recent".to_string(),
            Self::Starred => "view=starred".to_string(),
            Self::Trash => "view=trash".to_string(),
        }
    }
}

/// One (folder id, label) element of the navigation path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    pub folder_id: Option<u64>,
    pub label: String,
}

/// Non-empty breadcrumb stack whose first element is always the view root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationPath {
    crumbs: Vec<Breadcrumb>,
}

impl NavigationPath {
    /// Single root breadcrumb for `view`.
    pub fn root(view: View) -> Self {
        Self {
            crumbs: vec![Breadcrumb {
                folder_id: None,
                label: view.root_label().to_string(),
            }],
        }
    }

    pub fn crumbs(&self) -> &[Breadcrumb] {
        &self.crumbs
    }

    pub fn len(&self) -> usize {
        self.crumbs.len()
    }

    pub fn last(&self) -> &Breadcrumb {
        // Never empty: constructed with a root and only truncated to len >= 1.
        &self.crumbs[self.crumbs.len() - 1]
    }

    /// Folder id of the last breadcrumb.
    pub fn current_folder(&self) -> Option<u64> {
        self.last().folder_id
    }

    pub fn push(&mut self, folder_id: u64, label: impl Into<String>) {
        self.crumbs.push(Breadcrumb {
            folder_id: Some(folder_id),
            label: label.into(),
        });
    }

    /// Keep the first `index + 1` breadcrumbs. Returns `false` if `index` is
    /// out of range, leaving the path untouched.
    pub fn truncate_to(&mut self, index: usize) -> bool {
        if index >= self.crumbs.len() {
            return false;
        }
        self.crumbs.truncate(index + 1);
        true
    }
}

impl Default for NavigationPath {
    fn default() -> Self {
        Self::root(View::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_labels() {
        assert_eq!(NavigationPath::root(View::MyFiles).last().label, "My Files");
        assert_eq!(NavigationPath::root(View::Starred).last().label, "Starred");
        assert_eq!(NavigationPath::root(View::Trash).current_folder(), None);
    }

    #[test]
    fn test_truncate_keeps_root() {
        let mut path = NavigationPath::root(View::MyFiles);
        path.push(1, "a");
        path.push(2, "b");
        assert!(path.truncate_to(0));
        assert_eq!(path.len(), 1);
        assert_eq!(path.current_folder(), None);
    }

    #[test]
    fn test_truncate_out_of_range() {
        let mut path = NavigationPath::root(View::MyFiles);
        path.push(1, "a");
        assert!(!path.truncate_to(2));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_scope_query() {
        assert_eq!(Scope::Folder(None).query(), "");
        assert_eq!(Scope::Folder(Some(4)).query(), "parent_id=4");
        assert_eq!(Scope::Trash.query(), "view=trash");
    }

    #[test]
    fn test_only_my_files_is_hierarchical() {
        let navigable: Vec<_> = View::ALL.iter().filter(|v| v.is_hierarchical()).collect();
        assert_eq!(navigable, vec![&View::MyFiles]);
    }
}
