//! Drive file-id extraction from program page HTML.
//!
//! Curriculum PDFs are linked as `https://drive.google.com/file/d/<id>/view`
//! (sometimes relative, sometimes with extra query parameters). Only the
//! `<id>` segment is kept.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

/// Matches `/file/d/<id>/` anywhere in an href.
static DRIVE_FILE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/file/d/([a-zA-Z0-9_-]+)/").expect("drive file regex")
});

static LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("link selector"));

/// Collect every Drive file id referenced by a hyperlink in `html`.
pub fn extract_drive_ids(html: &str) -> BTreeSet<String> {
    let doc = Html::parse_document(html);
    let mut ids = BTreeSet::new();

    for el in doc.select(&LINK_SEL) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if let Some(caps) = DRIVE_FILE_RE.captures(href) {
            ids.insert(caps[1].to_string());
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_ids_from_fixture() {
        let html = std::fs::read_to_string("../../../fixtures/html/program_page.html")
            .expect("read fixture");
        let ids = extract_drive_ids(&html);

        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["1AbCdEf_plan-2025", "1ZyXwV_electives"]);
    }

    #[test]
    fn duplicates_collapse() {
        let html = r#"<a href="https://drive.google.com/file/d/abc/view">plan</a>
            <a href="https://drive.google.com/file/d/abc/view?usp=sharing">same plan</a>"#;
        assert_eq!(extract_drive_ids(html).len(), 1);
    }

    #[test]
    fn relative_links_match() {
        let html = r#"<a href="/file/d/rel_Id-9/preview">x</a>"#;
        let ids = extract_drive_ids(html);
        assert!(ids.contains("rel_Id-9"));
    }

    #[test]
    fn ignores_non_drive_links_and_text() {
        let html = r#"<p>/file/d/not-a-link/</p>
            <a href="https://drive.google.com/drive/folders/xyz">folder</a>
            <a href="https://drive.google.com/file/d/noslash">no trailing slash</a>
            <a>no href</a>"#;
        assert!(extract_drive_ids(html).is_empty());
    }
}
