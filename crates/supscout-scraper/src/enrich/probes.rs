//! Best-effort contact and trade field extraction.
//!
//! Each field owns an ordered list of [`Probe`]s; the first probe that
//! yields a non-empty value wins. Fields never depend on one another, so a
//! page with a phone number but no email still gets its phone number.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use supscout_core::Contacts;
use url::Url;

use crate::extract::links::truncate_chars;

const MAX_CERTIFICATES: usize = 10;
const MAX_REGION_CHARS: usize = 140;

/// A page parsed once and shared by every probe.
pub(crate) struct PageView<'a> {
    markup: &'a str,
    text: String,
    document: Html,
}

impl<'a> PageView<'a> {
    pub(crate) fn parse(markup: &'a str) -> Self {
        let document = Html::parse_document(markup);
        let text = document.root_element().text().collect::<String>();
        Self {
            markup,
            text,
            document,
        }
    }
}

/// One way of finding a field value.
pub(crate) enum Probe {
    /// Capture group of the first regex match in the visible text.
    Text(Regex, usize),
    /// Capture group of the first regex match in the raw markup.
    Markup(Regex, usize),
    /// Attribute of the first element matching the selector.
    Attr(Selector, &'static str),
    /// First anchor `href` the filter accepts, as transformed by it.
    Anchor(fn(&str) -> Option<String>),
}

impl Probe {
    fn run(&self, page: &PageView<'_>) -> Option<String> {
        let raw = match self {
            Probe::Text(re, group) => capture(re, &page.text, *group),
            Probe::Markup(re, group) => capture(re, page.markup, *group),
            Probe::Attr(selector, attr) => page
                .document
                .select(selector)
                .find_map(|el| el.value().attr(attr))
                .map(str::to_string),
            Probe::Anchor(filter) => page
                .document
                .select(&ANCHOR)
                .filter_map(|el| el.value().attr("href"))
                .find_map(|href| filter(href.trim())),
        }?;
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

fn capture(re: &Regex, haystack: &str, group: usize) -> Option<String> {
    re.captures(haystack)
        .and_then(|caps| caps.get(group))
        .map(|m| m.as_str().to_string())
}

/// Run probes in order and keep the first hit.
fn first_hit(probes: &[Probe], page: &PageView<'_>) -> Option<String> {
    probes.iter().find_map(|probe| probe.run(page))
}

fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("valid field regex")
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid field selector")
}

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a[href]"));

/// Ordered probes per field.
pub(crate) struct FieldProbes {
    phone: Vec<Probe>,
    email: Vec<Probe>,
    whatsapp: Vec<Probe>,
    telegram: Vec<Probe>,
    wechat: Vec<Probe>,
    region: Vec<Probe>,
    moq: Vec<Probe>,
    price: Vec<Probe>,
    image: Vec<Probe>,
}

static PROBES: LazyLock<FieldProbes> = LazyLock::new(|| FieldProbes {
    phone: vec![Probe::Text(regex(r"(\+?\d[\d\-\s()]{6,}\d)"), 1)],
    email: vec![
        Probe::Text(regex(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}"), 0),
        Probe::Anchor(mailto_address),
    ],
    whatsapp: vec![
        Probe::Markup(
            regex(r"(?i)(?:wa\.me/|whatsapp(?:\.com)?/send\?phone=)(\+?\d[\d\-]{5,})"),
            1,
        ),
        Probe::Anchor(|href| {
            (href.contains("wa.me") || href.contains("whatsapp")).then(|| href.to_string())
        }),
    ],
    telegram: vec![
        Probe::Markup(regex(r"(?i)(?:t\.me/|telegram\.me/)([A-Za-z0-9_]{3,})"), 1),
        Probe::Anchor(|href| {
            (href.contains("t.me") || href.contains("telegram")).then(|| href.to_string())
        }),
    ],
    wechat: vec![Probe::Markup(
        regex(r#"(?i)(?:weixin\.qq\.com|wxid|wechat|微信)[^\s'"<>]{0,40}"#),
        0,
    )],
    region: vec![Probe::Text(
        regex(r"(?i)(province|city|регион|所在地|所在省|address)[:\s\-–]*([A-Za-zА-Яа-я0-9\-\s,]+)"),
        2,
    )],
    moq: vec![Probe::Text(
        regex(r"(?i)(?:MOQ|минимальный заказ|минимальный объём)[^\d]{0,10}([0-9,.\s]+)"),
        1,
    )],
    price: vec![Probe::Text(
        regex(r"(?i)(?:price|цена)[^\d]{0,10}([\d$€£.,\s/]+)"),
        1,
    )],
    image: vec![
        Probe::Attr(selector(r#"meta[property="og:image"]"#), "content"),
        Probe::Attr(selector(r#"meta[name="og:image"]"#), "content"),
        Probe::Attr(selector("img[src]"), "src"),
    ],
});

// Keywords may run into digits or CJK text ("ISO9001", "CE认证") but not into
// another Latin letter ("price", "certified").
static CERTIFICATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    regex(
        r"(?i)(?-u:\b)(ISO|CE|RoHS|BSCI|FCC|UL|CSA|GMP|HACCP|REACH|FDA)(?:[^A-Za-z]|$)|(сертификат|certificate)",
    )
});

fn mailto_address(href: &str) -> Option<String> {
    let rest = href.strip_prefix("mailto:")?;
    let address = rest.split('?').next().unwrap_or("");
    (!address.is_empty()).then(|| address.to_string())
}

/// Distinct certificate keywords (case-insensitive) in first-seen order,
/// joined with `"; "`; at most ten.
fn certificates(markup: &str) -> Option<String> {
    let mut seen = HashSet::new();
    let found: Vec<&str> = CERTIFICATE_RE
        .captures_iter(markup)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str())
        .filter(|kw| seen.insert(kw.to_lowercase()))
        .take(MAX_CERTIFICATES)
        .collect();
    (!found.is_empty()).then(|| found.join("; "))
}

/// Resolve an image reference against the page URL.
fn absolutize(base: &str, raw: &str) -> String {
    if raw.starts_with("//") {
        return format!("https:{raw}");
    }
    if Url::parse(raw).is_ok() {
        return raw.to_string();
    }
    Url::parse(base)
        .and_then(|base| base.join(raw))
        .map_or_else(|_| raw.to_string(), |url| url.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract every contact/trade field from a candidate page.
///
/// `website` is always set to `page_url`; every other field is `None` when
/// the page offers no match, and all of them are `None` for empty markup.
#[must_use]
pub fn extract_contacts(markup: &str, page_url: &str) -> Contacts {
    let mut contacts = Contacts {
        website: Some(page_url.to_string()),
        ..Contacts::default()
    };
    if markup.trim().is_empty() {
        return contacts;
    }

    let page = PageView::parse(markup);
    let probes = &*PROBES;

    contacts.phone = first_hit(&probes.phone, &page);
    contacts.email = first_hit(&probes.email, &page);
    contacts.whatsapp = first_hit(&probes.whatsapp, &page);
    contacts.telegram = first_hit(&probes.telegram, &page);
    contacts.wechat = first_hit(&probes.wechat, &page);
    contacts.region = first_hit(&probes.region, &page)
        .map(|region| truncate_chars(&collapse_whitespace(&region), MAX_REGION_CHARS));
    contacts.moq = first_hit(&probes.moq, &page);
    contacts.price = first_hit(&probes.price, &page);
    contacts.certificates = certificates(markup);
    contacts.image_link = first_hit(&probes.image, &page).map(|raw| absolutize(page_url, &raw));
    contacts
}
