//! Bookmark storage for quick access to favorite directories.
//!
//! Bookmarks persist as one JSON array in the user config directory. The
//! same resilience policy as the listing cache applies: a missing or corrupt
//! file reads as empty, and persist failures are logged without failing the
//! calling operation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::now_epoch_seconds;

/// A saved directory location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// User-chosen name, unique case-insensitively.
    pub name: String,
    /// Name of the server the directory belongs to.
    pub server: String,
    /// Absolute directory URL.
    pub url: String,
    /// Creation time, seconds since the Unix epoch.
    pub timestamp: f64,
}

/// JSON-file-backed bookmark collection.
pub struct BookmarkStore {
    file: PathBuf,
}

impl BookmarkStore {
    /// Create a store over `<dir>/bookmarks.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            file: dir.into().join("bookmarks.json"),
        }
    }

    /// Default bookmark directory in the platform config dir.
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("webdex")
    }

    /// Path of the bookmark file.
    pub fn location(&self) -> &Path {
        &self.file
    }

    /// Add a bookmark. Returns false when the name is already taken
    /// (case-insensitive).
    pub fn add(&self, name: &str, server: &str, url: &str) -> bool {
        let mut bookmarks = self.load();
        if bookmarks.iter().any(|b| b.name.eq_ignore_ascii_case(name)) {
            return false;
        }

        bookmarks.push(Bookmark {
            name: name.to_string(),
            server: server.to_string(),
            url: url.to_string(),
            timestamp: now_epoch_seconds(),
        });
        self.save(&bookmarks);
        true
    }

    /// Remove a bookmark by name. Returns false when no such bookmark
    /// exists.
    pub fn remove(&self, name: &str) -> bool {
        let mut bookmarks = self.load();
        let before = bookmarks.len();
        bookmarks.retain(|b| !b.name.eq_ignore_ascii_case(name));

        if bookmarks.len() < before {
            self.save(&bookmarks);
            true
        } else {
            false
        }
    }

    /// Look up a bookmark by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<Bookmark> {
        self.load()
            .into_iter()
            .find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// All bookmarks, most recent first.
    pub fn list(&self) -> Vec<Bookmark> {
        let mut bookmarks = self.load();
        bookmarks.sort_by(|a, b| {
            b.timestamp
                .partial_cmp(&a.timestamp)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        bookmarks
    }

    /// The name bookmarking `url`, if any.
    pub fn find_by_url(&self, url: &str) -> Option<String> {
        self.load()
            .into_iter()
            .find(|b| b.url == url)
            .map(|b| b.name)
    }

    /// Remove every bookmark, returning how many were removed.
    pub fn clear_all(&self) -> usize {
        let count = self.load().len();
        if count > 0 {
            self.save(&[]);
        }
        count
    }

    fn load(&self) -> Vec<Bookmark> {
        let content = match fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&content) {
            Ok(bookmarks) => bookmarks,
            Err(e) => {
                tracing::warn!("could not load bookmarks from {:?}: {}", self.file, e);
                Vec::new()
            }
        }
    }

    fn save(&self, bookmarks: &[Bookmark]) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.file.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(bookmarks)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let temp_path = self.file.with_extension("json.tmp");
            fs::write(&temp_path, json)?;
            fs::rename(&temp_path, &self.file)?;
            Ok(())
        })();

        if let Err(e) = result {
            tracing::warn!("could not save bookmarks to {:?}: {}", self.file, e);
        }
    }
}
