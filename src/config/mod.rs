//! Server and application configuration.
//!
//! Configuration lives in an env-style file at `~/.webdex.env`. Servers are
//! declared as a 1-based numbered table and read until the first gap:
//!
//! ```text
//! SERVER_1_NAME=Movies
//! SERVER_1_URL=http://media.local/movies/
//! SERVER_1_USERNAME=sam        # optional, with SERVER_1_PASSWORD
//! SERVER_1_PASSWORD=sekret
//! SERVER_2_NAME=Series
//! SERVER_2_URL=http://media.local/series/
//!
//! DOWNLOAD_DIR=~/Downloads     # optional
//! PLAYER=mpv                   # optional
//! CACHE_TTL=300                # optional, seconds
//! ```

mod env_file;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::fetch::Credentials;

/// A configured directory server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub url: String,
    pub credentials: Option<Credentials>,
}

/// Loaded application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub servers: Vec<ServerEntry>,
    pub download_dir: Option<PathBuf>,
    pub player: Option<String>,
    pub cache_ttl: Option<u64>,
}

impl Config {
    /// Default config file location: `~/.webdex.env`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(".webdex.env")
    }

    /// Load from the default location. A missing file yields an empty
    /// config; the browse command prints the setup hint.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let vars = env_file::load_optional(path)?;
        Ok(Self::from_vars(&vars))
    }

    fn from_vars(vars: &HashMap<String, String>) -> Self {
        let mut servers = Vec::new();
        let mut index = 1;
        loop {
            let name = vars.get(&format!("SERVER_{index}_NAME"));
            let url = vars.get(&format!("SERVER_{index}_URL"));
            let (Some(name), Some(url)) = (name, url) else {
                break;
            };

            let credentials = match (
                vars.get(&format!("SERVER_{index}_USERNAME")),
                vars.get(&format!("SERVER_{index}_PASSWORD")),
            ) {
                (Some(username), Some(password)) => Some(Credentials {
                    username: username.clone(),
                    password: password.clone(),
                }),
                _ => None,
            };

            servers.push(ServerEntry {
                name: name.clone(),
                url: url.clone(),
                credentials,
            });
            index += 1;
        }

        let cache_ttl = vars.get("CACHE_TTL").and_then(|raw| match raw.parse() {
            Ok(ttl) => Some(ttl),
            Err(_) => {
                tracing::warn!("ignoring non-numeric CACHE_TTL {:?}", raw);
                None
            }
        });

        Config {
            servers,
            download_dir: vars.get("DOWNLOAD_DIR").map(|raw| expand_home(raw)),
            player: vars.get("PLAYER").cloned(),
            cache_ttl,
        }
    }

    /// Find a configured server by case-insensitive name.
    pub fn find_server(&self, name: &str) -> Option<&ServerEntry> {
        self.servers
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

/// Expand a leading `~/` against the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("~"))
            .join(rest),
        None => PathBuf::from(raw),
    }
}
