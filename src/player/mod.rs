//! External media player hand-off.
//!
//! Media files are never downloaded for playback; the player receives the
//! URL directly and streams it itself.

use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::Result;
use crate::listing::FileRef;

/// Extensions handed to the player as video.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Extensions handed to the player as still images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Players probed for on PATH, in preference order.
pub const SUPPORTED_PLAYERS: &[&str] = &["mpv", "vlc", "iina"];

/// Coarse media classification by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Image,
    Other,
}

/// Classify a name or URL by its extension, case-insensitively. Query
/// strings and fragments are ignored.
pub fn media_kind(name_or_url: &str) -> MediaKind {
    let path = name_or_url
        .split(['?', '#'])
        .next()
        .unwrap_or(name_or_url);
    let Some((_, extension)) = path.rsplit_once('.') else {
        return MediaKind::Other;
    };
    let extension = extension.to_ascii_lowercase();

    if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Video
    } else if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Image
    } else {
        MediaKind::Other
    }
}

/// Scan PATH for the supported players.
pub fn available_players() -> Vec<String> {
    let Some(path_var) = env::var_os("PATH") else {
        return Vec::new();
    };

    SUPPORTED_PLAYERS
        .iter()
        .filter(|player| {
            env::split_paths(&path_var).any(|dir| dir.join(player).is_file())
        })
        .map(|player| player.to_string())
        .collect()
}

/// Pick the player to use: a requested name wins if installed, a single
/// candidate is used directly, otherwise the caller must prompt.
pub fn resolve_player(requested: Option<&str>) -> PlayerChoice {
    let available = available_players();

    if let Some(name) = requested {
        if available.iter().any(|p| p == name) {
            return PlayerChoice::Resolved(name.to_string());
        }
        tracing::warn!("configured player {:?} not found on PATH", name);
    }

    match available.len() {
        0 => PlayerChoice::NoneAvailable,
        1 => PlayerChoice::Resolved(available[0].clone()),
        _ => PlayerChoice::PickFrom(available),
    }
}

/// Outcome of [`resolve_player`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerChoice {
    Resolved(String),
    PickFrom(Vec<String>),
    NoneAvailable,
}

/// Play a single media file.
///
/// Videos block until the player exits; images are spawned and left in the
/// background (looped where the player supports it).
pub fn play_file(player: &str, file: &FileRef) -> Result<()> {
    match media_kind(&file.url) {
        MediaKind::Image => {
            let mut command = Command::new(player);
            if player == "mpv" {
                command.arg("--loop-file=inf");
            }
            command
                .arg(&file.url)
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()?;
        }
        _ => {
            Command::new(player).arg(&file.url).status()?;
        }
    }
    Ok(())
}

/// Play every video in the list, returning how many were queued.
///
/// mpv receives a temporary `.m3u` playlist; vlc and iina take the URLs as
/// arguments.
pub fn play_all_videos(player: &str, files: &[FileRef]) -> Result<usize> {
    let videos: Vec<&str> = files
        .iter()
        .filter(|f| media_kind(&f.url) == MediaKind::Video)
        .map(|f| f.url.as_str())
        .collect();

    if videos.is_empty() {
        println!("No video files to play.");
        return Ok(0);
    }

    println!("Playing {} videos with {}...", videos.len(), player);

    if player == "mpv" {
        let playlist = write_playlist(&videos)?;
        Command::new(player)
            .arg(format!("--playlist={}", playlist.display()))
            .status()?;
    } else {
        Command::new(player).args(&videos).status()?;
    }

    Ok(videos.len())
}

/// Write an m3u playlist into the temp dir and return its path. The file is
/// left behind for the OS temp cleaner.
fn write_playlist(urls: &[&str]) -> Result<PathBuf> {
    let path = env::temp_dir().join(format!("webdex-playlist-{}.m3u", std::process::id()));
    let mut file = fs::File::create(&path)?;
    writeln!(file, "{}", urls.join("\n"))?;
    Ok(path)
}
