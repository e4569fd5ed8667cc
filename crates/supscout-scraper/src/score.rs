//! Weighted trust rating.

use std::sync::LazyLock;

use regex::Regex;
use supscout_core::Contacts;
use url::Url;

const WEIGHT_REPUTATION: f64 = 0.25;
const WEIGHT_CERTIFICATES: f64 = 0.20;
const WEIGHT_MANUFACTURER: f64 = 0.20;
const WEIGHT_PRICE_MOQ: f64 = 0.15;
const WEIGHT_LEGAL: f64 = 0.10;
const WEIGHT_EXPORT: f64 = 0.10;

/// Hosts of B2B directories and company registries whose listings are
/// considered reputable. Matched as a substring of the host.
const REPUTABLE_HOSTS: &[&str] = &[
    "alibaba.com",
    "made-in-china.com",
    "globalsources.com",
    "hktdc.com",
    "thomasnet.com",
    "kompass.com",
    "qcc.com",
    "tianyancha.com",
];

static LEGAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)ICP|备案|license|营业执照|统一社会信用代码").expect("valid legal regex")
});
static EXPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)export|出口|海外|国际").expect("valid export regex"));

/// Per-signal sub-scores, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustSignals {
    pub reputation: f64,
    pub certificates: f64,
    pub manufacturer_confidence: f64,
    pub price_and_moq: f64,
    pub legal_markers: f64,
    pub export_markers: f64,
}

impl TrustSignals {
    /// Derive signals for one supplier page.
    #[must_use]
    pub fn from_page(
        markup: &str,
        contacts: &Contacts,
        website: &str,
        manufacturer_confidence: f64,
    ) -> Self {
        Self {
            reputation: reputation(website),
            certificates: if contacts.has_certificates() { 1.0 } else { 0.2 },
            manufacturer_confidence,
            price_and_moq: if contacts.has_price_and_moq() { 0.7 } else { 0.4 },
            legal_markers: if LEGAL_RE.is_match(markup) { 0.8 } else { 0.4 },
            export_markers: if EXPORT_RE.is_match(markup) { 0.7 } else { 0.4 },
        }
    }

    /// Weighted sum scaled to `0..=100` and rounded to the nearest integer.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn rating(&self) -> u8 {
        let weighted = self.reputation * WEIGHT_REPUTATION
            + self.certificates * WEIGHT_CERTIFICATES
            + self.manufacturer_confidence * WEIGHT_MANUFACTURER
            + self.price_and_moq * WEIGHT_PRICE_MOQ
            + self.legal_markers * WEIGHT_LEGAL
            + self.export_markers * WEIGHT_EXPORT;
        // Snap float noise first so an exact half (34.5) always rounds up.
        let percent = (weighted * 100.0 * 1e6).round() / 1e6;
        // clamped to 0..=100 so the cast is lossless
        percent.round().clamp(0.0, 100.0) as u8
    }
}

/// 1.0 for a reputable directory host, 0.5 for anything else including
/// unparseable URLs.
#[must_use]
pub fn reputation(website: &str) -> f64 {
    let Some(host) = Url::parse(website)
        .ok()
        .and_then(|url| url.host_str().map(str::to_lowercase))
    else {
        return 0.5;
    };
    if REPUTABLE_HOSTS.iter().any(|known| host.contains(known)) {
        1.0
    } else {
        0.5
    }
}
