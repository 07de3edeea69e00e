//! Two-tier listing cache storage.
//!
//! An in-process map layered over a single durable JSON document. The
//! in-process tier is volatile and rebuilt from the durable tier as entries
//! are observed; the durable document is read-modify-written whole on every
//! mutation. The file is owned by the single running process: there is no
//! locking, and a concurrent external writer loses to the next `put`.
//!
//! Storage faults never propagate to callers. A missing, unreadable, or
//! malformed durable file reads as an empty document, and a failed persist
//! is logged while the in-process tier stays authoritative for the rest of
//! the process lifetime.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::entry::ListingEntry;

/// Default time-to-live for cached listings, in seconds.
pub const DEFAULT_TTL_SECONDS: u64 = 300;

/// Read-only view over the durable tier, for the `cache stats` command.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub size_bytes: u64,
    pub ttl_seconds: u64,
    pub location: PathBuf,
}

/// Two-tier key → [`ListingEntry`] store with TTL expiration checked on read.
pub struct ListingStore {
    ttl_seconds: u64,
    cache_file: PathBuf,
    memory: HashMap<String, ListingEntry>,
}

impl ListingStore {
    /// Create a store over `<cache_dir>/listings.json`.
    pub fn new(cache_dir: impl Into<PathBuf>, ttl_seconds: u64) -> Self {
        Self {
            ttl_seconds,
            cache_file: cache_dir.into().join("listings.json"),
            memory: HashMap::new(),
        }
    }

    /// Path of the durable document.
    pub fn location(&self) -> &Path {
        &self.cache_file
    }

    /// Configured TTL in seconds.
    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Look up a fresh entry by key.
    ///
    /// Checks the in-process tier first; an expired in-process entry is
    /// dropped and the durable tier consulted. A fresh durable entry is
    /// promoted into the in-process tier; an expired one is deleted from the
    /// document on the spot.
    pub fn lookup(&mut self, key: &str) -> Option<ListingEntry> {
        if let Some(entry) = self.memory.get(key) {
            if entry.is_fresh(self.ttl_seconds) {
                return Some(entry.clone());
            }
            self.memory.remove(key);
        }

        let mut document = self.load_document();
        match document.get(key) {
            Some(entry) if entry.is_fresh(self.ttl_seconds) => {
                let entry = entry.clone();
                self.memory.insert(key.to_string(), entry.clone());
                Some(entry)
            }
            Some(_) => {
                document.remove(key);
                self.save_document(&document);
                None
            }
            None => None,
        }
    }

    /// Insert an entry into both tiers.
    pub fn put(&mut self, key: &str, entry: ListingEntry) {
        self.memory.insert(key.to_string(), entry.clone());

        let mut document = self.load_document();
        document.insert(key.to_string(), entry);
        self.save_document(&document);
    }

    /// Remove an entry from both tiers. Idempotent.
    pub fn invalidate(&mut self, key: &str) {
        self.memory.remove(key);

        let mut document = self.load_document();
        if document.remove(key).is_some() {
            self.save_document(&document);
        }
    }

    /// Drop every entry: empty the in-process tier and delete the durable
    /// file if present.
    pub fn clear_all(&mut self) {
        self.memory.clear();

        if self.cache_file.exists() {
            if let Err(e) = fs::remove_file(&self.cache_file) {
                tracing::warn!("could not delete cache file {:?}: {}", self.cache_file, e);
            }
        }
    }

    /// Remove every expired entry from the durable document, returning the
    /// number removed. The in-process tier is not touched; its stale entries
    /// fall out lazily on the next lookup.
    pub fn purge_expired(&mut self) -> usize {
        let document = self.load_document();
        let before = document.len();

        let retained: HashMap<String, ListingEntry> = document
            .into_iter()
            .filter(|(_, entry)| entry.is_fresh(self.ttl_seconds))
            .collect();

        let removed = before - retained.len();
        if removed > 0 {
            self.save_document(&retained);
        }
        removed
    }

    /// Introspection over the durable document only.
    pub fn stats(&self) -> CacheStats {
        let document = self.load_document();
        let total_entries = document.len();
        let expired_entries = document
            .values()
            .filter(|entry| !entry.is_fresh(self.ttl_seconds))
            .count();
        let size_bytes = fs::metadata(&self.cache_file).map(|m| m.len()).unwrap_or(0);

        CacheStats {
            total_entries,
            valid_entries: total_entries - expired_entries,
            expired_entries,
            size_bytes,
            ttl_seconds: self.ttl_seconds,
            location: self.cache_file.clone(),
        }
    }

    /// Load the durable document. Any read or parse failure degrades to an
    /// empty document; records that do not conform to the entry shape are
    /// skipped individually rather than failing the whole load.
    fn load_document(&self) -> HashMap<String, ListingEntry> {
        let content = match fs::read_to_string(&self.cache_file) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };

        let raw: serde_json::Map<String, serde_json::Value> = match serde_json::from_str(&content)
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    "cache file {:?} is not valid JSON ({}), treating as empty",
                    self.cache_file,
                    e
                );
                return HashMap::new();
            }
        };

        let mut document = HashMap::with_capacity(raw.len());
        for (key, value) in raw {
            match serde_json::from_value::<ListingEntry>(value) {
                Ok(entry) => {
                    document.insert(key, entry);
                }
                Err(e) => {
                    tracing::debug!("skipping malformed cache record {}: {}", key, e);
                }
            }
        }
        document
    }

    /// Persist the whole document. Failures are logged, never propagated:
    /// cache unavailability must not block navigation.
    fn save_document(&self, document: &HashMap<String, ListingEntry>) {
        let result = (|| -> std::io::Result<()> {
            if let Some(parent) = self.cache_file.parent() {
                fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(document)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            let temp_path = self.cache_file.with_extension("json.tmp");
            fs::write(&temp_path, json)?;
            fs::rename(&temp_path, &self.cache_file)?;
            Ok(())
        })();

        if let Err(e) = result {
            tracing::warn!("could not save cache to {:?}: {}", self.cache_file, e);
        }
    }
}
