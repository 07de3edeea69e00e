//! Cached listing entries.

use serde::{Deserialize, Serialize};

use crate::listing::{FileRef, FolderRef, Listing};

/// A cached directory listing.
///
/// Entries are immutable once created: a refresh builds a new entry and
/// replaces the old one wholesale. `timestamp` is float seconds since the
/// Unix epoch, which is also the on-disk representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// The listing URL this entry was fetched from.
    pub url: String,
    /// Fetch time, seconds since the Unix epoch.
    pub timestamp: f64,
    /// Folders in document order (synthetic ".." first).
    pub folders: Vec<FolderRef>,
    /// Files in document order.
    pub files: Vec<FileRef>,
}

impl ListingEntry {
    /// Create an entry for a freshly parsed listing, stamped with the
    /// current time.
    pub fn new(url: impl Into<String>, listing: &Listing) -> Self {
        Self {
            url: url.into(),
            timestamp: now_epoch_seconds(),
            folders: listing.folders.clone(),
            files: listing.files.clone(),
        }
    }

    /// Override the fetch timestamp (epoch seconds).
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Age in seconds. Clock skew backwards clamps to zero.
    pub fn age_seconds(&self) -> f64 {
        (now_epoch_seconds() - self.timestamp).max(0.0)
    }

    /// Freshness check. The boundary is inclusive: an entry exactly
    /// `ttl_seconds` old is still fresh.
    pub fn is_fresh(&self, ttl_seconds: u64) -> bool {
        self.age_seconds() <= ttl_seconds as f64
    }

    /// Consume the entry into its (folders, files) listing.
    pub fn into_listing(self) -> Listing {
        Listing {
            folders: self.folders,
            files: self.files,
        }
    }
}

/// Current time as float seconds since the Unix epoch.
pub(crate) fn now_epoch_seconds() -> f64 {
    chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
