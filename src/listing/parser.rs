//! Directory-index HTML parsing.
//!
//! The index layout is fixed: entry names live in `<td class="fb-n">` cells
//! as anchor elements. Parsing is pure and never fails; a document without
//! the expected structure yields only the synthetic parent entry.

use scraper::{Html, Selector};
use url::Url;

use super::model::{FileRef, FolderRef, Listing};

/// Class marker of the name column in the index table.
const NAME_CELL_SELECTOR: &str = "td.fb-n";

/// Parse a directory-index page into its (folders, files) listing.
///
/// A synthetic ".." entry pointing one level up is always the first folder.
/// Anchors whose `href` starts with `..` are skipped (the parent is already
/// synthesized), anchors without an `href` are ignored, and every kept href
/// is resolved against `base`. A trailing `/` classifies the target as a
/// folder. Document order is preserved.
pub fn parse(base: &Url, html: &[u8]) -> Listing {
    let mut listing = Listing::default();
    listing.folders.push(FolderRef {
        name: "..".to_string(),
        url: parent_url(base),
    });

    let (Ok(cells), Ok(anchors)) = (
        Selector::parse(NAME_CELL_SELECTOR),
        Selector::parse("a"),
    ) else {
        return listing;
    };

    let document = Html::parse_document(&String::from_utf8_lossy(html));
    for cell in document.select(&cells) {
        for anchor in cell.select(&anchors) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            if href.starts_with("..") {
                continue;
            }
            let Ok(resolved) = base.join(href) else {
                tracing::debug!("skipping unresolvable href {:?}", href);
                continue;
            };

            let name = anchor.text().collect::<String>();
            if href.ends_with('/') {
                listing.folders.push(FolderRef {
                    name,
                    url: resolved.into(),
                });
            } else {
                listing.files.push(FileRef {
                    name,
                    url: resolved.into(),
                    size: None,
                });
            }
        }
    }

    listing
}

/// URL one level above `base`. Falls back to `base` itself if the join is
/// impossible (cannot-be-a-base URLs).
fn parent_url(base: &Url) -> String {
    base.join("..")
        .map(String::from)
        .unwrap_or_else(|_| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://h/a/b/").unwrap()
    }

    fn cell(inner: &str) -> String {
        format!("<table><tr><td class=\"fb-n\">{inner}</td></tr></table>")
    }

    #[test]
    fn synthesizes_parent_entry_first() {
        let listing = parse(&base(), b"<html></html>");
        assert_eq!(listing.folders[0].name, "..");
        assert_eq!(listing.folders[0].url, "http://h/a/");
    }

    #[test]
    fn empty_document_yields_only_parent() {
        let listing = parse(&base(), b"");
        assert_eq!(listing.folders.len(), 1);
        assert!(listing.files.is_empty());
    }

    #[test]
    fn relative_href_resolves_against_base() {
        let html = cell(r#"<a href="c/d.mp4">d.mp4</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].url, "http://h/a/b/c/d.mp4");
        assert_eq!(listing.files[0].name, "d.mp4");
    }

    #[test]
    fn trailing_slash_classifies_as_folder() {
        let html = cell(r#"<a href="c/">c</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.folders.len(), 2);
        assert_eq!(listing.folders[1].url, "http://h/a/b/c/");
        assert!(listing.files.is_empty());
    }

    #[test]
    fn parent_href_is_not_duplicated() {
        let html = cell(r#"<a href="../">up</a><a href="..">up</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.folders.len(), 1);
        assert_eq!(listing.folders[0].name, "..");
    }

    #[test]
    fn absolute_path_href_resolves_from_root() {
        let html = cell(r#"<a href="/top/">top</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.folders[1].url, "http://h/top/");
    }

    #[test]
    fn already_absolute_href_is_kept() {
        let html = cell(r#"<a href="http://other/x.avi">x</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.files[0].url, "http://other/x.avi");
    }

    #[test]
    fn query_and_fragment_are_preserved() {
        let html = cell(r#"<a href="c/d.mp4?dl=1#part">d</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.files[0].url, "http://h/a/b/c/d.mp4?dl=1#part");
    }

    #[test]
    fn anchor_without_href_is_skipped() {
        let html = cell(r#"<a>nameless</a><a href="keep.txt">keep</a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "keep");
    }

    #[test]
    fn empty_anchor_text_yields_empty_name() {
        let html = cell(r#"<a href="blank.txt"></a>"#);
        let listing = parse(&base(), html.as_bytes());

        assert_eq!(listing.files[0].name, "");
    }

    #[test]
    fn cells_without_marker_class_are_ignored() {
        let html = r#"<table><tr><td class="fb-s"><a href="skip.txt">s</a></td></tr></table>"#;
        let listing = parse(&base(), html.as_bytes());

        assert!(listing.files.is_empty());
        assert_eq!(listing.folders.len(), 1);
    }

    #[test]
    fn document_order_is_preserved() {
        let html = format!(
            "{}{}",
            cell(r#"<a href="b.txt">b</a><a href="z/">z</a>"#),
            cell(r#"<a href="a.txt">a</a><a href="m/">m</a>"#)
        );
        let listing = parse(&base(), html.as_bytes());

        let file_names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
        let folder_names: Vec<_> = listing.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(file_names, vec!["b", "a"]);
        assert_eq!(folder_names, vec!["..", "z", "m"]);
    }

    #[test]
    fn parsing_is_deterministic() {
        let html = cell(r#"<a href="c/">c</a><a href="d.mp4">d</a>"#);
        let first = parse(&base(), html.as_bytes());
        let second = parse(&base(), html.as_bytes());
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_html_degrades_instead_of_failing() {
        let html = b"<td class=\"fb-n\"><a href=\"ok.txt\">ok</td></a><<<";
        let listing = parse(&base(), html);

        assert_eq!(listing.files.len(), 1);
    }
}
