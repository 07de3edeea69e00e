//! File downloads with progress reporting.

use std::fs;
use std::io;
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::fetch::{Credentials, Fetcher};
use crate::listing::FileRef;

/// Download one file into `dest_dir`, returning the number of bytes written.
///
/// The progress bar is sized from `Content-Length` when the server reports
/// one, and degrades to a spinner otherwise.
pub fn download_file(
    fetcher: &Fetcher,
    file: &FileRef,
    dest_dir: &Path,
    credentials: Option<&Credentials>,
) -> Result<u64> {
    let response = fetcher.get(&file.url, credentials)?;

    fs::create_dir_all(dest_dir)?;
    let target = dest_dir.join(&file.name);

    let bar = progress_bar(file, response.content_length());
    let mut reader = bar.wrap_read(response);
    let mut output = fs::File::create(&target)?;

    let written = io::copy(&mut reader, &mut output)?;
    bar.finish_and_clear();

    tracing::debug!("downloaded {} ({} bytes) to {:?}", file.name, written, target);
    Ok(written)
}

/// Download every file in the list, returning the number that succeeded.
///
/// A failed file is reported and skipped; it does not abort the batch.
pub fn download_all(
    fetcher: &Fetcher,
    files: &[FileRef],
    dest_dir: &Path,
    credentials: Option<&Credentials>,
) -> usize {
    if files.is_empty() {
        println!("No files to download in this directory.");
        return 0;
    }

    println!(
        "Downloading {} files to {}...",
        files.len(),
        dest_dir.display()
    );

    let mut succeeded = 0;
    for (index, file) in files.iter().enumerate() {
        match download_file(fetcher, file, dest_dir, credentials) {
            Ok(_) => {
                succeeded += 1;
                println!(
                    "  [{}/{}] {} {}",
                    index + 1,
                    files.len(),
                    console::style("✓").green(),
                    file.name
                );
            }
            Err(e) => {
                tracing::warn!("download of {} failed: {}", file.name, e);
                println!(
                    "  [{}/{}] {} {} ({})",
                    index + 1,
                    files.len(),
                    console::style("✗").red(),
                    file.name,
                    e
                );
            }
        }
    }

    println!(
        "Download complete: {}/{} files succeeded.",
        succeeded,
        files.len()
    );
    succeeded
}

fn progress_bar(file: &FileRef, content_length: Option<u64>) -> ProgressBar {
    let bar = match content_length.or(file.size) {
        Some(total) => {
            let bar = ProgressBar::new(total);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{msg} {bar:32} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                    .unwrap(),
            );
            bar
        }
        None => {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{msg} {spinner} {bytes} ({bytes_per_sec})")
                    .unwrap(),
            );
            bar
        }
    };
    bar.set_message(file.name.clone());
    bar
}
