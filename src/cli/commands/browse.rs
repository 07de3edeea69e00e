//! Interactive directory browsing.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use console::style;

use crate::bookmarks::BookmarkStore;
use crate::cache::{default_cache_dir, ListingStore, DEFAULT_TTL_SECONDS};
use crate::cli::args::BrowseArgs;
use crate::config::Config;
use crate::download;
use crate::fetch::{Credentials, Fetcher, RetryPolicy};
use crate::listing::{Listing, ListingService};
use crate::player::{self, MediaKind, PlayerChoice};
use crate::ui::{self, MenuChoice};

/// Run the browse loop. Returns the process exit code.
pub fn execute(args: &BrowseArgs, config_path: Option<&Path>) -> Result<i32> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let Some((server_name, start_url, credentials)) = resolve_start(args, &config)? else {
        print_setup_hint();
        return Ok(1);
    };

    println!("Connecting to {server_name}...");
    if let Err(e) = Fetcher::probe(&start_url, credentials.as_ref()) {
        eprintln!("{} {}", style("✗").red(), e);
        return Ok(1);
    }

    let ttl = args.ttl.or(config.cache_ttl).unwrap_or(DEFAULT_TTL_SECONDS);
    let mut service = ListingService::new(
        Fetcher::new(Duration::from_secs(args.timeout)),
        RetryPolicy::new(args.retries),
        ListingStore::new(default_cache_dir(), ttl),
    );
    let bookmarks = BookmarkStore::new(BookmarkStore::default_dir());
    let downloader = Fetcher::streaming();

    let mut current_url = start_url;
    let mut force_next = false;

    loop {
        let force = force_next || args.no_cache;
        force_next = false;

        let listing = match service.get_listing(&current_url, credentials.as_ref(), force) {
            Ok(listing) => listing,
            Err(e) => {
                eprintln!("{} {}", style("✗").red(), e);
                return Ok(1);
            }
        };

        let bookmark_name = bookmarks.find_by_url(&current_url);
        match ui::browse_menu(&listing, &current_url, bookmark_name.as_deref())? {
            MenuChoice::Open(index) => {
                if let Some(next) = open_entry(
                    &listing,
                    index,
                    &downloader,
                    credentials.as_ref(),
                    &config,
                )? {
                    current_url = next;
                }
            }
            MenuChoice::Refresh => {
                service.invalidate(&current_url);
                force_next = true;
            }
            MenuChoice::DownloadAll => {
                let dest = pick_download_dir(&config)?;
                download::download_all(&downloader, &listing.files, &dest, credentials.as_ref());
            }
            MenuChoice::PlayAll => {
                if let Some(player) = pick_player(&config)? {
                    player::play_all_videos(&player, &listing.files)?;
                }
            }
            MenuChoice::Filter => {
                if let Some(index) = ui::filter_and_pick(&listing)? {
                    if let Some(next) = open_entry(
                        &listing,
                        index,
                        &downloader,
                        credentials.as_ref(),
                        &config,
                    )? {
                        current_url = next;
                    }
                }
            }
            MenuChoice::Bookmark => {
                let default_name = suggest_bookmark_name(&current_url);
                let name = ui::input_with_default("Bookmark name", &default_name)?;
                if bookmarks.add(&name, &server_name, &current_url) {
                    println!("{} bookmarked as {name:?}", style("✓").green());
                } else {
                    println!("A bookmark named {name:?} already exists.");
                }
            }
            MenuChoice::Quit => break,
        }
    }

    Ok(0)
}

/// Figure out where to start: an explicit URL, a named server, or the
/// interactive picker. None means nothing is configured.
fn resolve_start(
    args: &BrowseArgs,
    config: &Config,
) -> Result<Option<(String, String, Option<Credentials>)>> {
    if let Some(url) = &args.url {
        return Ok(Some(("custom URL".to_string(), url.clone(), None)));
    }

    if let Some(name) = &args.server {
        let Some(server) = config.find_server(name) else {
            anyhow::bail!(
                "no server named {:?} in config (known: {})",
                name,
                config
                    .servers
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        };
        return Ok(Some((
            server.name.clone(),
            server.url.clone(),
            server.credentials.clone(),
        )));
    }

    let Some(index) = ui::select_server(&config.servers)? else {
        return Ok(None);
    };
    let server = &config.servers[index];
    Ok(Some((
        server.name.clone(),
        server.url.clone(),
        server.credentials.clone(),
    )))
}

/// Open a listing entry: navigate into folders, play media files, offer a
/// download for everything else. Returns the next URL when navigating.
fn open_entry(
    listing: &Listing,
    index: usize,
    downloader: &Fetcher,
    credentials: Option<&Credentials>,
    config: &Config,
) -> Result<Option<String>> {
    if index < listing.folders.len() {
        return Ok(Some(listing.folders[index].url.clone()));
    }

    let file = &listing.files[index - listing.folders.len()];
    match player::media_kind(&file.url) {
        MediaKind::Video | MediaKind::Image => {
            if let Some(player) = pick_player(config)? {
                println!("Playing {} with {player}...", file.name);
                player::play_file(&player, file)?;
            }
        }
        MediaKind::Other => {
            if ui::confirm(&format!("Download {}?", file.name), true)? {
                let dest = pick_download_dir(config)?;
                download::download_file(downloader, file, &dest, credentials)?;
                println!("{} saved {}", style("✓").green(), file.name);
            }
        }
    }
    Ok(None)
}

/// Resolve the player to use, prompting when several are installed.
fn pick_player(config: &Config) -> Result<Option<String>> {
    match player::resolve_player(config.player.as_deref()) {
        PlayerChoice::Resolved(player) => Ok(Some(player)),
        PlayerChoice::PickFrom(players) => Ok(Some(ui::select_player(&players)?)),
        PlayerChoice::NoneAvailable => {
            eprintln!("No supported media players found. Install mpv, VLC, or IINA.");
            Ok(None)
        }
    }
}

/// Confirm or override the download directory.
fn pick_download_dir(config: &Config) -> Result<PathBuf> {
    let default = config
        .download_dir
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    let chosen = ui::input_with_default("Download directory", &default.to_string_lossy())?;
    Ok(PathBuf::from(chosen))
}

/// Last path segment of the URL, as a bookmark-name suggestion.
fn suggest_bookmark_name(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
        .unwrap_or("directory")
        .to_string()
}

fn print_setup_hint() {
    let path = Config::default_path();
    println!("No server configurations found.");
    println!("Create {} with entries like:", path.display());
    println!();
    println!("  SERVER_1_NAME=Movies");
    println!("  SERVER_1_URL=http://media.local/movies/");
}
