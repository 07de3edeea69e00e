//! CLI argument definitions.
//!
//! All CLI arguments are defined with clap's derive macros. The main entry
//! point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::cache::DEFAULT_TTL_SECONDS;
use crate::fetch::DEFAULT_MAX_RETRIES;

/// webdex - Terminal browser for HTTP directory indexes.
#[derive(Debug, Parser)]
#[command(name = "webdex")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides ~/.webdex.env)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Browse a configured server (default if no command specified)
    Browse(BrowseArgs),

    /// Inspect and maintain the listing cache
    Cache(CacheArgs),

    /// Manage directory bookmarks
    Bookmark(BookmarkArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `browse` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BrowseArgs {
    /// Server name from the config (skips the picker)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Browse this URL directly instead of a configured server
    #[arg(long)]
    pub url: Option<String>,

    /// Bypass the listing cache on every navigation
    #[arg(long)]
    pub no_cache: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Retry attempts for transient fetch failures
    #[arg(long, default_value_t = DEFAULT_MAX_RETRIES)]
    pub retries: u32,

    /// Listing cache TTL in seconds (overrides config)
    #[arg(long)]
    pub ttl: Option<u64>,
}

impl Default for BrowseArgs {
    fn default() -> Self {
        Self {
            server: None,
            url: None,
            no_cache: false,
            timeout: 30,
            retries: DEFAULT_MAX_RETRIES,
            ttl: None,
        }
    }
}

/// Arguments for the `cache` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheSubcommand,

    /// Cache TTL in seconds used for freshness classification
    #[arg(long, default_value_t = DEFAULT_TTL_SECONDS)]
    pub ttl: u64,
}

/// Cache subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum CacheSubcommand {
    /// Show cache statistics.
    Stats {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Delete every cached listing.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
    /// Remove expired listings only.
    Purge,
}

/// Arguments for the `bookmark` command.
#[derive(Debug, Clone, clap::Args)]
pub struct BookmarkArgs {
    #[command(subcommand)]
    pub command: BookmarkSubcommand,
}

/// Bookmark subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum BookmarkSubcommand {
    /// List bookmarks, most recent first.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Save a directory URL under a name.
    Add {
        /// Bookmark name (unique, case-insensitive).
        name: String,
        /// Server the directory belongs to.
        #[arg(long)]
        server: String,
        /// Absolute directory URL.
        #[arg(long)]
        url: String,
    },
    /// Delete a bookmark by name.
    Remove { name: String },
    /// Delete every bookmark.
    Clear {
        /// Don't prompt for confirmation.
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn browse_is_optional_default() {
        let cli = Cli::parse_from(["webdex"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn browse_args_parse() {
        let cli = Cli::parse_from(["webdex", "browse", "--server", "Movies", "--no-cache"]);
        match cli.command {
            Some(Commands::Browse(args)) => {
                assert_eq!(args.server.as_deref(), Some("Movies"));
                assert!(args.no_cache);
                assert_eq!(args.timeout, 30);
                assert_eq!(args.retries, 3);
            }
            other => panic!("expected browse, got {other:?}"),
        }
    }

    #[test]
    fn cache_stats_parses_with_ttl_override() {
        let cli = Cli::parse_from(["webdex", "cache", "--ttl", "600", "stats", "--json"]);
        match cli.command {
            Some(Commands::Cache(args)) => {
                assert_eq!(args.ttl, 600);
                assert!(matches!(args.command, CacheSubcommand::Stats { json: true }));
            }
            other => panic!("expected cache, got {other:?}"),
        }
    }

    #[test]
    fn bookmark_add_requires_server_and_url() {
        let result = Cli::try_parse_from(["webdex", "bookmark", "add", "name-only"]);
        assert!(result.is_err());
    }
}
