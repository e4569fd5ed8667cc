//! Rejection rules applied before a candidate is enriched.

use std::sync::LazyLock;

use regex::Regex;

/// Logistics and shipping vocabulary (lowercase) marking a listing or page
/// as a freight intermediary rather than a supplier.
const BANNED_TERMS: &[&str] = &[
    "shipping",
    "delivery",
    "logistics",
    "philippines",
    "物流",
    "доставка",
    "стоимость доставки",
    "логистика",
    "филиппины",
];

/// Candidates whose page scores below this are dropped.
pub const MIN_MANUFACTURER_CONFIDENCE: f64 = 0.3;

/// Confidence assigned when the page could not be fetched or was empty.
const EMPTY_PAGE_CONFIDENCE: f64 = 0.2;

static FACTORY_RE: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII boundaries so English terms written against CJK text still count.
    Regex::new(r"(?i)(?-u:\b)(?:factory|manufacturer)(?-u:\b)|我们的工厂|生产线|工厂")
        .expect("valid factory regex")
});
static TRADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)trading company").expect("valid trading regex"));
static SCALE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)production line|sq\.? m|employees|workshop").expect("valid scale regex")
});

/// `true` when `text` mentions any banned logistics term (case-insensitive).
#[must_use]
pub fn is_banned(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let lower = text.to_lowercase();
    BANNED_TERMS.iter().any(|term| lower.contains(term))
}

/// Heuristic `[0, 1]` estimate that `markup` describes an actual
/// manufacturer rather than a trading intermediary.
///
/// Empty markup scores 0.2. Otherwise: +0.6 for factory/manufacturer
/// vocabulary, -0.4 for "trading company", +0.2 for production-scale
/// vocabulary, clamped to `[0, 1]`.
#[must_use]
pub fn manufacturer_confidence(markup: &str) -> f64 {
    if markup.is_empty() {
        return EMPTY_PAGE_CONFIDENCE;
    }
    let mut points = 0.0_f64;
    if FACTORY_RE.is_match(markup) {
        points += 0.6;
    }
    if TRADING_RE.is_match(markup) {
        points -= 0.4;
    }
    if SCALE_RE.is_match(markup) {
        points += 0.2;
    }
    points.clamp(0.0, 1.0)
}
