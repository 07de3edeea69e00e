//! Directory listing data model.

use serde::{Deserialize, Serialize};

/// A folder visible in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderRef {
    /// Display name from the listing.
    pub name: String,
    /// Absolute URL of the folder.
    pub url: String,
}

/// A file visible in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Display name from the listing.
    pub name: String,
    /// Absolute URL of the file.
    pub url: String,
    /// Size in bytes, when known. The index layout carries no size column,
    /// so this is typically filled from `Content-Length` at download time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// The folders and files visible at one directory URL, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    pub folders: Vec<FolderRef>,
    pub files: Vec<FileRef>,
}

impl Listing {
    /// Total number of entries, folders first.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }
}
