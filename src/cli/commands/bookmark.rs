//! Bookmark management commands.

use anyhow::Result;

use crate::bookmarks::BookmarkStore;
use crate::cli::args::{BookmarkArgs, BookmarkSubcommand};
use crate::ui;

/// Run a bookmark subcommand. Returns the process exit code.
pub fn execute(args: &BookmarkArgs) -> Result<i32> {
    let store = BookmarkStore::new(BookmarkStore::default_dir());

    match &args.command {
        BookmarkSubcommand::List { json } => list(&store, *json),
        BookmarkSubcommand::Add { name, server, url } => add(&store, name, server, url),
        BookmarkSubcommand::Remove { name } => remove(&store, name),
        BookmarkSubcommand::Clear { force } => clear(&store, *force),
    }
}

fn list(store: &BookmarkStore, json: bool) -> Result<i32> {
    let bookmarks = store.list();

    if json {
        println!("{}", serde_json::to_string_pretty(&bookmarks)?);
        return Ok(0);
    }

    if bookmarks.is_empty() {
        println!("No bookmarks saved");
        return Ok(0);
    }

    println!("{} bookmarks:", bookmarks.len());
    for bookmark in bookmarks {
        println!("  ★ {} [{}] {}", bookmark.name, bookmark.server, bookmark.url);
    }
    Ok(0)
}

fn add(store: &BookmarkStore, name: &str, server: &str, url: &str) -> Result<i32> {
    if store.add(name, server, url) {
        println!("Bookmarked {url} as {name:?}");
        Ok(0)
    } else {
        eprintln!("A bookmark named {name:?} already exists");
        Ok(1)
    }
}

fn remove(store: &BookmarkStore, name: &str) -> Result<i32> {
    if store.remove(name) {
        println!("Removed bookmark {name:?}");
        Ok(0)
    } else {
        eprintln!("No bookmark named {name:?}");
        Ok(1)
    }
}

fn clear(store: &BookmarkStore, force: bool) -> Result<i32> {
    let total = store.list().len();
    if total == 0 {
        println!("No bookmarks saved");
        return Ok(0);
    }

    if !force && !ui::confirm(&format!("Delete all {total} bookmarks?"), false)? {
        println!("Cancelled");
        return Ok(0);
    }

    let removed = store.clear_all();
    println!("Removed {removed} bookmarks");
    Ok(0)
}
