//! Interactive terminal menus for the browse loop.

use console::style;
use dialoguer::{Confirm, Input, Select};

use crate::config::ServerEntry;
use crate::error::{Result, WebdexError};
use crate::listing::Listing;
use crate::player::{media_kind, MediaKind};

/// What the user picked from the directory menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Open the entry at this index into the combined folders-then-files
    /// sequence.
    Open(usize),
    /// Re-fetch the current directory, bypassing the cache.
    Refresh,
    /// Download every file in the current directory.
    DownloadAll,
    /// Play every video in the current directory.
    PlayAll,
    /// Filter entries by a substring and open the match.
    Filter,
    /// Bookmark the current directory.
    Bookmark,
    /// Leave the browser.
    Quit,
}

const ACTIONS: &[(&str, MenuChoice)] = &[
    ("[refresh listing]", MenuChoice::Refresh),
    ("[download all files]", MenuChoice::DownloadAll),
    ("[play all videos]", MenuChoice::PlayAll),
    ("[filter entries]", MenuChoice::Filter),
    ("[bookmark this directory]", MenuChoice::Bookmark),
    ("[quit]", MenuChoice::Quit),
];

fn map_dialoguer_err(e: dialoguer::Error) -> WebdexError {
    WebdexError::Io(e.into())
}

/// Prompt for a server. Returns None when the list is empty.
pub fn select_server(servers: &[ServerEntry]) -> Result<Option<usize>> {
    if servers.is_empty() {
        return Ok(None);
    }
    if servers.len() == 1 {
        println!("Using server {} (only one configured)", servers[0].name);
        return Ok(Some(0));
    }

    let labels: Vec<_> = servers.iter().map(|s| s.name.as_str()).collect();
    let selection = Select::new()
        .with_prompt("Select a server")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(map_dialoguer_err)?;

    Ok(Some(selection))
}

/// Show the directory menu and return the user's choice.
pub fn browse_menu(
    listing: &Listing,
    current_url: &str,
    bookmark_name: Option<&str>,
) -> Result<MenuChoice> {
    let mut items = entry_labels(listing);
    items.extend(ACTIONS.iter().map(|(label, _)| style(label).dim().to_string()));

    let heading = match bookmark_name {
        Some(name) => format!("{current_url} (★ {name})"),
        None => current_url.to_string(),
    };

    let selection = Select::new()
        .with_prompt(heading)
        .items(&items)
        .default(0)
        .interact()
        .map_err(map_dialoguer_err)?;

    if selection < listing.len() {
        return Ok(MenuChoice::Open(selection));
    }
    Ok(ACTIONS[selection - listing.len()].1.clone())
}

/// Styled labels for every listing entry, folders first, document order.
pub fn entry_labels(listing: &Listing) -> Vec<String> {
    let mut labels = Vec::with_capacity(listing.len());

    for folder in &listing.folders {
        let label = if folder.name == ".." {
            style(folder.name.as_str()).red().bold()
        } else {
            style(folder.name.as_str()).green().bold()
        };
        labels.push(format!("{label}/"));
    }

    for file in &listing.files {
        let label = match media_kind(&file.url) {
            MediaKind::Video => style(file.name.as_str()).blue(),
            MediaKind::Image => style(file.name.as_str()).yellow(),
            MediaKind::Other => style(file.name.as_str()),
        };
        labels.push(label.to_string());
    }

    labels
}

/// Indices (into the combined folders-then-files sequence) of entries whose
/// name contains `query`, case-insensitively.
pub fn filter_entries(listing: &Listing, query: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    listing
        .folders
        .iter()
        .map(|f| f.name.as_str())
        .chain(listing.files.iter().map(|f| f.name.as_str()))
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&query))
        .map(|(index, _)| index)
        .collect()
}

/// Prompt for a filter substring, then let the user pick a match. Returns
/// the original entry index, or None when nothing matches.
pub fn filter_and_pick(listing: &Listing) -> Result<Option<usize>> {
    let query: String = Input::new()
        .with_prompt("Filter by name")
        .allow_empty(true)
        .interact_text()
        .map_err(map_dialoguer_err)?;

    let matches = filter_entries(listing, &query);
    if matches.is_empty() {
        println!("No entries match {query:?}.");
        return Ok(None);
    }

    let labels = entry_labels(listing);
    let match_labels: Vec<_> = matches.iter().map(|&i| labels[i].clone()).collect();

    let picked = Select::new()
        .with_prompt(format!("{} matches", matches.len()))
        .items(&match_labels)
        .default(0)
        .interact()
        .map_err(map_dialoguer_err)?;

    Ok(Some(matches[picked]))
}

/// Free-text prompt with a default.
pub fn input_with_default(prompt: &str, default: &str) -> Result<String> {
    Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()
        .map_err(map_dialoguer_err)
}

/// Yes/no confirmation.
pub fn confirm(question: &str, default: bool) -> Result<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(default)
        .interact()
        .map_err(map_dialoguer_err)
}

/// Pick one of several installed players.
pub fn select_player(players: &[String]) -> Result<String> {
    let selection = Select::new()
        .with_prompt("Select a media player")
        .items(players)
        .default(0)
        .interact()
        .map_err(map_dialoguer_err)?;
    Ok(players[selection].clone())
}
