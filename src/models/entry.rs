//! File and folder records as known to the client.
//!
//! The kind of an entry is always explicit: a record is a [`FileEntry`] or a
//! [`FolderEntry`] depending on which list the server returned it in, and
//! everything above this module matches on [`Entry`] rather than probing
//! fields.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Entry identity
// =============================================================================

/// Discriminates the two entry namespaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Folder,
}

impl EntryKind {
    /// Path segment used by the remote API (`/star/{kind}/{id}`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Folder => "folder",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The true key of an entry: a file and a folder may share a numeric id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub kind: EntryKind,
    pub id: u64,
}

impl EntryKey {
    pub fn file(id: u64) -> Self {
        Self {
            kind: EntryKind::File,
            id,
        }
    }

    pub fn folder(id: u64) -> Self {
        Self {
            kind: EntryKind::Folder,
            id,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// A file record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    #[serde(default)]
    pub is_starred: bool,
    /// Present iff the file is in trash.
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl FileEntry {
    pub fn key(&self) -> EntryKey {
        EntryKey::file(self.id)
    }

    pub fn file_type(&self) -> FileType {
        FileType::from_name(&self.name)
    }

    pub fn is_image(&self) -> bool {
        self.file_type() == FileType::Image
    }
}

/// A folder record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: u64,
    pub name: String,
    pub created_at: String,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

impl FolderEntry {
    pub fn key(&self) -> EntryKey {
        EntryKey::folder(self.id)
    }
}

/// A file or a folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entry {
    File(FileEntry),
    Folder(FolderEntry),
}

impl Entry {
    /// Decode a single record whose kind is already known from context.
    pub fn from_json(kind: EntryKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            EntryKind::File => Self::File(serde_json::from_value(value)?),
            EntryKind::Folder => Self::Folder(serde_json::from_value(value)?),
        })
    }

    pub fn key(&self) -> EntryKey {
        match self {
            Self::File(f) => f.key(),
            Self::Folder(f) => f.key(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }

    pub fn created_at(&self) -> &str {
        match self {
            Self::File(f) => &f.created_at,
            Self::Folder(f) => &f.created_at,
        }
    }

    pub fn is_starred(&self) -> bool {
        match self {
            Self::File(f) => f.is_starred,
            Self::Folder(f) => f.is_starred,
        }
    }

    /// An entry is live iff it is not in trash.
    pub fn is_live(&self) -> bool {
        match self {
            Self::File(f) => f.deleted_at.is_none(),
            Self::Folder(f) => f.deleted_at.is_none(),
        }
    }

    pub fn as_file(&self) -> Option<&FileEntry> {
        match self {
            Self::File(f) => Some(f),
            Self::Folder(_) => None,
        }
    }
}

impl From<FileEntry> for Entry {
    fn from(file: FileEntry) -> Self {
        Self::File(file)
    }
}

impl From<FolderEntry> for Entry {
    fn from(folder: FolderEntry) -> Self {
        Self::Folder(folder)
    }
}

// =============================================================================
// File Type
// =============================================================================

/// File categories inferred from the name's extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Image,
    Document,
    Audio,
    Video,
    Other,
}

impl FileType {
    /// Detect file type from the extension (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Other;
        };
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Self::Image,
            "pdf" | "txt" | "doc" | "docx" => Self::Document,
            "mp3" | "wav" => Self::Audio,
            "mp4" | "mov" => Self::Video,
            _ => Self::Other,
        }
    }
}

/// Label shown in the details panel ("PNG", "Folder", "File").
pub fn type_label(entry: &Entry) -> String {
    match entry {
        Entry::Folder(_) => "Folder".to_string(),
        Entry::File(f) => f
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .map(str::to_uppercase)
            .unwrap_or_else(|| "File".to_string()),
    }
}
