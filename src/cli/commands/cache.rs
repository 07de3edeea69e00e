//! Cache maintenance commands.
//!
//! Provides `webdex cache stats`, `webdex cache clear`, and
//! `webdex cache purge`.

use anyhow::Result;

use crate::cache::{default_cache_dir, CacheStats, ListingStore};
use crate::cli::args::{CacheArgs, CacheSubcommand};
use crate::ui;

/// Run a cache subcommand. Returns the process exit code.
pub fn execute(args: &CacheArgs) -> Result<i32> {
    let mut store = ListingStore::new(default_cache_dir(), args.ttl);

    match &args.command {
        CacheSubcommand::Stats { json } => show_stats(&store, *json),
        CacheSubcommand::Clear { force } => clear(&mut store, *force),
        CacheSubcommand::Purge => purge(&mut store),
    }
}

fn show_stats(store: &ListingStore, json: bool) -> Result<i32> {
    let stats = store.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(0);
    }

    print_stats(&stats);
    Ok(0)
}

fn print_stats(stats: &CacheStats) {
    println!("Cache statistics:");
    println!();
    println!("  Total entries: {}", stats.total_entries);
    println!("  Valid: {}", stats.valid_entries);
    println!("  Expired: {}", stats.expired_entries);
    println!(
        "  Size: {} bytes ({:.1} KiB)",
        stats.size_bytes,
        stats.size_bytes as f64 / 1024.0
    );
    println!("  TTL: {}s", stats.ttl_seconds);
    println!("  Location: {}", stats.location.display());
}

fn clear(store: &mut ListingStore, force: bool) -> Result<i32> {
    let total = store.stats().total_entries;
    if total == 0 {
        println!("Cache is already empty");
        return Ok(0);
    }

    if !force && !ui::confirm(&format!("Clear {total} cached listings?"), false)? {
        println!("Cancelled");
        return Ok(0);
    }

    store.clear_all();
    println!("Cleared {total} listings");
    Ok(0)
}

fn purge(store: &mut ListingStore) -> Result<i32> {
    let removed = store.purge_expired();
    println!("Removed {removed} expired listings");
    Ok(0)
}
