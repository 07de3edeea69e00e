//! webdex - Terminal browser for HTTP directory indexes.
//!
//! webdex navigates the HTML listing pages served by file-indexing web
//! servers, caching each parsed directory in a two-tier TTL cache so that
//! stepping back and forth through a tree costs one fetch per directory.
//! Files can be downloaded or handed to an external media player.
//!
//! # Modules
//!
//! - [`bookmarks`] - Saved directory locations
//! - [`cache`] - Cache keys, entries, and the two-tier listing store
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Server table and settings from `~/.webdex.env`
//! - [`download`] - Streaming file downloads with progress
//! - [`error`] - Error types and result alias
//! - [`fetch`] - Resilient HTTP fetching with typed errors and retry
//! - [`listing`] - Listing model, index-page parser, and retrieval service
//! - [`player`] - External media player hand-off
//! - [`ui`] - Interactive terminal menus
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use webdex::cache::ListingStore;
//! use webdex::fetch::{Fetcher, RetryPolicy};
//! use webdex::listing::ListingService;
//!
//! let mut service = ListingService::new(
//!     Fetcher::new(Duration::from_secs(30)),
//!     RetryPolicy::default(),
//!     ListingStore::new("/tmp/webdex-cache", 300),
//! );
//!
//! let listing = service
//!     .get_listing("http://media.local/movies/", None, false)
//!     .unwrap();
//! for folder in &listing.folders {
//!     println!("{}/", folder.name);
//! }
//! ```

pub mod bookmarks;
pub mod cache;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fetch;
pub mod listing;
pub mod player;
pub mod ui;

pub use error::{Result, WebdexError};
