//! Link and text cleanup shared by the extraction strategies.

use scraper::ElementRef;

/// Normalize a scraped `href` into an absolute `http(s)` URL.
///
/// Protocol-relative links (`//host/x`) gain an `https:` prefix. Anything
/// that still does not start with `http` afterwards (relative paths,
/// `javascript:`, `mailto:`, fragments) is rejected.
pub(crate) fn normalize_link(href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let link = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    link.starts_with("http").then_some(link)
}

/// Visible text of an element with whitespace runs collapsed to one space.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate to at most `max_chars` characters (not bytes).
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
