//! Listing cache: key derivation, entries, and the two-tier store.

mod entry;
mod key;
mod store;

pub use entry::ListingEntry;
pub(crate) use entry::now_epoch_seconds;
pub use key::derive_key;
pub use store::{CacheStats, ListingStore, DEFAULT_TTL_SECONDS};

use std::path::PathBuf;

/// Default cache directory.
///
/// `WEBDEX_CACHE_DIR` overrides the platform cache dir, which keeps tests
/// and scripted runs hermetic.
pub fn default_cache_dir() -> PathBuf {
    std::env::var("WEBDEX_CACHE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from(".cache"))
                .join("webdex")
        })
}
