//! Extraction for sources with known title/link selectors.

use std::collections::HashSet;

use scraper::Html;
use supscout_core::Candidate;

use super::links::{element_text, normalize_link};
use crate::registry::FieldHint;

/// At most this many listings are taken from a hinted source.
pub const MAX_HINTED_LISTINGS: usize = 5;

/// Titles and links are gathered independently across all hint pairs,
/// deduplicated by first occurrence, then zipped by position. A pair whose
/// link is missing or not absolute `http(s)` is dropped, never back-filled.
pub(super) fn extract(document: &Html, hints: &[FieldHint], source: &str) -> Vec<Candidate> {
    let mut titles: Vec<String> = Vec::new();
    let mut links: Vec<String> = Vec::new();

    for hint in hints {
        titles.extend(document.select(&hint.title).map(element_text));
        links.extend(
            document
                .select(&hint.link)
                .map(|el| el.value().attr("href").unwrap_or("").trim().to_string()),
        );
    }

    let titles = dedup_non_empty(titles);
    let links = dedup_non_empty(links);

    let take = titles.len().min(MAX_HINTED_LISTINGS);
    titles
        .into_iter()
        .take(take)
        .enumerate()
        .filter_map(|(i, title)| {
            let link = normalize_link(links.get(i)?)?;
            Some(Candidate {
                title,
                link,
                source: source.to_string(),
            })
        })
        .collect()
}

fn dedup_non_empty(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hint(title: &str, link: &str) -> FieldHint {
        FieldHint::parse("test", title, link).expect("valid selectors")
    }

    #[test]
    fn pairs_titles_and_links_by_position() {
        let html = Html::parse_document(
            r#"
            <div class="company-name"><a href="https://a.test/1">Alpha Factory</a></div>
            <div class="company-name"><a href="//b.test/2">Beta Works</a></div>
            "#,
        );
        let out = extract(&html, &[hint(".company-name a", ".company-name a")], "MIC");
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].title, "Alpha Factory");
        assert_eq!(out[0].link, "https://a.test/1");
        assert_eq!(out[1].link, "https://b.test/2");
        assert!(out.iter().all(|c| c.source == "MIC"));
    }

    #[test]
    fn caps_at_five_listings() {
        let rows: String = (0..8)
            .map(|i| format!(r#"<h3 class="t"><a href="https://x.test/{i}">Row {i}</a></h3>"#))
            .collect();
        let html = Html::parse_document(&rows);
        let out = extract(&html, &[hint("h3.t a", "h3.t a")], "Baidu");
        assert_eq!(out.len(), MAX_HINTED_LISTINGS);
        assert_eq!(out[4].title, "Row 4");
    }

    #[test]
    fn relative_link_drops_the_pair_without_substitution() {
        let html = Html::parse_document(
            r#"
            <div class="title"><a href="/local/1">Relative One</a></div>
            <div class="title"><a href="https://x.test/2">Absolute Two</a></div>
            "#,
        );
        let out = extract(&html, &[hint(".title a", ".title a")], "YiwuGo");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "Absolute Two");
        assert_eq!(out[0].link, "https://x.test/2");
    }

    #[test]
    fn duplicate_titles_and_links_collapse_independently() {
        let html = Html::parse_document(
            r#"
            <div class="item-title"><a href="https://x.test/1">Same Name</a></div>
            <div class="item-title"><a href="https://x.test/1">Same Name</a></div>
            <div class="item-title"><a href="https://x.test/2">Other Name</a></div>
            "#,
        );
        let out = extract(&html, &[hint(".item-title a", ".item-title a")], "DHgate");
        assert_eq!(out.len(), 2);
        assert_eq!(out[1].title, "Other Name");
        assert_eq!(out[1].link, "https://x.test/2");
    }

    #[test]
    fn title_without_matching_link_is_dropped() {
        // Title selector matches a container without an anchor.
        let html = Html::parse_document(
            r#"<div class="organic-gallery-title">Lonely Title</div>"#,
        );
        let out = extract(
            &html,
            &[hint(".organic-gallery-title", ".organic-gallery-title a")],
            "Alibaba",
        );
        assert!(out.is_empty());
    }
}
