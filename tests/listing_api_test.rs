//! End-to-end listing pipeline tests: mock index server → fetch → parse →
//! two-tier cache.

use httpmock::prelude::*;
use tempfile::TempDir;

use webdex::cache::{derive_key, ListingStore};
use webdex::fetch::{Credentials, Fetcher, RetryPolicy};
use webdex::listing::ListingService;
use webdex::WebdexError;

const INDEX_HTML: &str = concat!(
    "<html><body><table>",
    r#"<tr><td class="fb-n"><a href="../">parent</a></td></tr>"#,
    r#"<tr><td class="fb-n"><a href="series/">series</a></td></tr>"#,
    r#"<tr><td class="fb-n"><a href="trailer.mp4">trailer.mp4</a></td></tr>"#,
    r#"<tr><td class="fb-n"><a href="poster.jpg">poster.jpg</a></td></tr>"#,
    "</table></body></html>"
);

fn service(temp: &TempDir, ttl: u64) -> ListingService {
    ListingService::new(
        Fetcher::default(),
        RetryPolicy::default(),
        ListingStore::new(temp.path(), ttl),
    )
}

#[test]
fn full_pipeline_parses_and_resolves_urls() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/media/movies/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);
    let url = server.url("/media/movies/");

    let listing = service.get_listing(&url, None, false).unwrap();

    // Synthetic parent first, then the one real folder; the "../" anchor is
    // not duplicated.
    let folder_names: Vec<_> = listing.folders.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(folder_names, vec!["..", "series"]);
    assert_eq!(listing.folders[0].url, server.url("/media/"));
    assert_eq!(listing.folders[1].url, server.url("/media/movies/series/"));

    let file_names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(file_names, vec!["trailer.mp4", "poster.jpg"]);
    assert_eq!(listing.files[0].url, server.url("/media/movies/trailer.mp4"));
}

#[test]
fn second_navigation_is_served_from_cache() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/media/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);
    let url = server.url("/media/");

    let first = service.get_listing(&url, None, false).unwrap();
    let second = service.get_listing(&url, None, false).unwrap();

    assert_eq!(first, second);
    mock.assert_calls(1);
}

#[test]
fn cache_survives_service_restart_via_durable_tier() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/media/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let url = server.url("/media/");

    let first = {
        let mut service = service(&temp, 300);
        service.get_listing(&url, None, false).unwrap()
    };

    // Fresh service over the same cache dir: still no second fetch.
    let mut service = service(&temp, 300);
    let second = service.get_listing(&url, None, false).unwrap();

    assert_eq!(first, second);
    mock.assert_calls(1);
}

#[test]
fn force_refresh_always_fetches_and_overwrites() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/media/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);
    let url = server.url("/media/");

    service.get_listing(&url, None, false).unwrap();
    service.get_listing(&url, None, true).unwrap();
    service.get_listing(&url, None, true).unwrap();

    mock.assert_calls(3);
    assert_eq!(service.cache_stats().total_entries, 1);
}

#[test]
fn zero_ttl_expires_on_the_next_navigation() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/media/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    // TTL of zero: fresh only within the same instant.
    let mut service = service(&temp, 0);
    let url = server.url("/media/");

    service.get_listing(&url, None, false).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));
    service.get_listing(&url, None, false).unwrap();

    mock.assert_calls(2);
}

#[test]
fn credentials_are_forwarded_to_the_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/private/")
            // "sam:sekret" base64-encoded
            .header("authorization", "Basic c2FtOnNla3JldA==");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);
    let creds = Credentials {
        username: "sam".into(),
        password: "sekret".into(),
    };

    service
        .get_listing(&server.url("/private/"), Some(&creds), false)
        .unwrap();

    mock.assert();
}

#[test]
fn wire_error_taxonomy_reaches_the_caller() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/forbidden/");
        then.status(403);
    });
    server.mock(|when, then| {
        when.method(GET).path("/missing/");
        then.status(404);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);

    let err = service
        .get_listing(&server.url("/forbidden/"), None, false)
        .unwrap_err();
    assert!(matches!(err, WebdexError::Authentication { .. }));

    let err = service
        .get_listing(&server.url("/missing/"), None, false)
        .unwrap_err();
    assert!(matches!(err, WebdexError::NotFound { .. }));

    // Neither failure cached anything.
    assert_eq!(service.cache_stats().total_entries, 0);
}

#[test]
fn durable_document_uses_the_published_format() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/media/");
        then.status(200).body(INDEX_HTML);
    });

    let temp = TempDir::new().unwrap();
    let mut service = service(&temp, 300);
    let url = server.url("/media/");

    service.get_listing(&url, None, false).unwrap();

    let raw = std::fs::read_to_string(temp.path().join("listings.json")).unwrap();
    let document: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entry = &document[derive_key(&url)];
    assert_eq!(entry["url"], url);
    assert!(entry["timestamp"].is_f64());
    assert!(entry["folders"].is_array());
    assert!(entry["files"][0]["name"].is_string());
    assert!(entry["files"][0]["url"].is_string());
}
