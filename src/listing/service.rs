//! Cache-aware listing retrieval.

use url::Url;

use crate::cache::{derive_key, CacheStats, ListingEntry, ListingStore};
use crate::error::{Result, WebdexError};
use crate::fetch::{fetch_with_retry, Credentials, Fetcher, RetryPolicy};

use super::model::Listing;
use super::parser;

/// Composes the fetcher, parser, and store: serve-from-cache-if-fresh, else
/// fetch, parse, populate.
///
/// The service owns its collaborators; construction happens at the CLI entry
/// point and the instance is threaded through the navigation loop. One
/// listing request is outstanding at a time; racing callers on separate
/// instances would duplicate the fetch and the last `put` would win.
pub struct ListingService {
    fetcher: Fetcher,
    retry: RetryPolicy,
    store: ListingStore,
}

impl ListingService {
    pub fn new(fetcher: Fetcher, retry: RetryPolicy, store: ListingStore) -> Self {
        Self {
            fetcher,
            retry,
            store,
        }
    }

    /// Resolve a directory URL to its listing.
    ///
    /// With `force_refresh` unset, a fresh cached entry is returned without
    /// touching the network. Otherwise the page is fetched (with retry),
    /// parsed, cached, and returned. A fetch failure propagates and leaves
    /// the store untouched: no partial entry is ever written.
    pub fn get_listing(
        &mut self,
        url: &str,
        credentials: Option<&Credentials>,
        force_refresh: bool,
    ) -> Result<Listing> {
        let key = derive_key(url);

        if !force_refresh {
            if let Some(entry) = self.store.lookup(&key) {
                tracing::debug!("cache hit for {}", url);
                return Ok(entry.into_listing());
            }
        }

        let base = Url::parse(url).map_err(|e| WebdexError::Connection {
            message: format!("invalid listing URL {url}: {e}"),
        })?;

        tracing::debug!("fetching {}", url);
        let body = fetch_with_retry(&self.fetcher, self.retry, url, credentials)?;
        let listing = parser::parse(&base, &body);

        self.store.put(&key, ListingEntry::new(url, &listing));
        Ok(listing)
    }

    /// Drop the cached listing for one URL, forcing the next `get_listing`
    /// to fetch.
    pub fn invalidate(&mut self, url: &str) {
        self.store.invalidate(&derive_key(url));
    }

    /// Drop every cached listing.
    pub fn clear_cache(&mut self) {
        self.store.clear_all();
    }

    /// Sweep expired entries out of the durable cache tier.
    pub fn purge_expired(&mut self) -> usize {
        self.store.purge_expired()
    }

    /// Cache introspection.
    pub fn cache_stats(&self) -> CacheStats {
        self.store.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    const INDEX_HTML: &str = concat!(
        r#"<table>"#,
        r#"<tr><td class="fb-n"><a href="films/">films</a></td></tr>"#,
        r#"<tr><td class="fb-n"><a href="clip.mp4">clip.mp4</a></td></tr>"#,
        r#"</table>"#
    );

    fn service(temp: &TempDir) -> ListingService {
        ListingService::new(
            Fetcher::default(),
            RetryPolicy::default(),
            ListingStore::new(temp.path(), 300),
        )
    }

    #[test]
    fn miss_fetches_parses_and_caches() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/media/");
            then.status(200).body(INDEX_HTML);
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);
        let url = server.url("/media/");

        let listing = service.get_listing(&url, None, false).unwrap();

        assert_eq!(listing.folders.len(), 2); // ".." + films/
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "clip.mp4");
        mock.assert_calls(1);
        assert_eq!(service.cache_stats().total_entries, 1);
    }

    #[test]
    fn fresh_hit_skips_the_network() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/media/");
            then.status(200).body(INDEX_HTML);
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);
        let url = server.url("/media/");

        let first = service.get_listing(&url, None, false).unwrap();
        let second = service.get_listing(&url, None, false).unwrap();

        assert_eq!(first, second);
        mock.assert_calls(1);
    }

    #[test]
    fn force_refresh_bypasses_a_fresh_cache() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/media/");
            then.status(200).body(INDEX_HTML);
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);
        let url = server.url("/media/");

        service.get_listing(&url, None, false).unwrap();
        service.get_listing(&url, None, true).unwrap();

        mock.assert_calls(2);
        // Still a single (overwritten) entry.
        assert_eq!(service.cache_stats().total_entries, 1);
    }

    #[test]
    fn invalidate_forces_the_next_fetch() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/media/");
            then.status(200).body(INDEX_HTML);
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);
        let url = server.url("/media/");

        service.get_listing(&url, None, false).unwrap();
        service.invalidate(&url);
        service.get_listing(&url, None, false).unwrap();

        mock.assert_calls(2);
    }

    #[test]
    fn fetch_failure_propagates_and_leaves_store_untouched() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone/");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);

        let err = service
            .get_listing(&server.url("/gone/"), None, false)
            .unwrap_err();

        assert!(matches!(err, WebdexError::NotFound { .. }));
        assert_eq!(service.cache_stats().total_entries, 0);
    }

    #[test]
    fn invalid_url_is_a_connection_error() {
        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);

        let err = service.get_listing("not a url", None, false).unwrap_err();

        assert!(matches!(err, WebdexError::Connection { .. }));
    }

    #[test]
    fn unparseable_page_caches_the_degraded_listing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/odd/");
            then.status(200).body("<html><p>no table here</p></html>");
        });

        let temp = TempDir::new().unwrap();
        let mut service = service(&temp);

        let listing = service
            .get_listing(&server.url("/odd/"), None, false)
            .unwrap();

        // Only the synthetic parent; still a valid, cached result.
        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].name, "..");
        assert!(listing.files.is_empty());
        assert_eq!(service.cache_stats().total_entries, 1);
    }
}
