//! Duplicate collapsing and top-N selection.

use std::collections::HashSet;

use supscout_core::EnrichedSupplier;
use url::Url;

/// Number of suppliers kept after ranking.
pub const TOP_N: usize = 5;

const MAX_KEY_NAME_CHARS: usize = 40;

/// Identity of a supplier for duplicate detection: the website's
/// `host[:port]` (or `-` when unparseable) plus the lowercased
/// alphanumeric characters of the company name, first forty only.
#[must_use]
pub fn identity_key(supplier: &EnrichedSupplier) -> String {
    let host = Url::parse(&supplier.website)
        .ok()
        .and_then(|url| {
            url.host_str().map(|host| match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            })
        })
        .unwrap_or_else(|| "-".to_string());

    let name: String = supplier
        .company_name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .take(MAX_KEY_NAME_CHARS)
        .collect();

    format!("{host}|{name}")
}

/// Collapse duplicates (first occurrence wins), order by rating descending
/// with ties keeping their input order, and keep the best [`TOP_N`].
#[must_use]
pub fn rank_top(suppliers: Vec<EnrichedSupplier>) -> Vec<EnrichedSupplier> {
    let mut seen = HashSet::new();
    let mut unique: Vec<EnrichedSupplier> = suppliers
        .into_iter()
        .filter(|supplier| seen.insert(identity_key(supplier)))
        .collect();

    // sort_by is stable
    unique.sort_by(|a, b| b.rating.cmp(&a.rating));
    unique.truncate(TOP_N);
    unique
}

#[cfg(test)]
mod tests {
    use supscout_core::Contacts;

    use super::*;

    fn supplier(name: &str, website: &str, rating: u8) -> EnrichedSupplier {
        EnrichedSupplier {
            company_name: name.to_string(),
            region: None,
            product: name.to_string(),
            price: None,
            moq: None,
            certificates: None,
            contacts: Contacts::default(),
            rating,
            source: "Alibaba".to_string(),
            website: website.to_string(),
            image_link: None,
        }
    }

    #[test]
    fn key_ignores_case_and_punctuation() {
        let a = supplier("Foshan Panel Co., Ltd.", "https://maker.test/a", 50);
        let b = supplier("FOSHAN panel co ltd", "https://maker.test/b", 60);
        assert_eq!(identity_key(&a), identity_key(&b));
        assert_eq!(identity_key(&a), "maker.test|foshanpanelcoltd");
    }

    #[test]
    fn key_keeps_port_and_unicode_letters() {
        let s = supplier("Завод Панелей №1", "http://127.0.0.1:8080/x", 10);
        assert_eq!(identity_key(&s), "127.0.0.1:8080|заводпанелей1");
    }

    #[test]
    fn key_falls_back_to_dash_host() {
        let s = supplier("Acme", "not a url", 10);
        assert_eq!(identity_key(&s), "-|acme");
    }

    #[test]
    fn key_name_truncated_to_forty() {
        let s = supplier(&"a".repeat(60), "https://x.test/", 10);
        assert_eq!(identity_key(&s), format!("x.test|{}", "a".repeat(40)));
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let ranked = rank_top(vec![
            supplier("Acme", "https://x.test/1", 40),
            supplier("ACME", "https://x.test/2", 90),
        ]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rating, 40);
    }

    #[test]
    fn sorted_by_rating_with_stable_ties() {
        let ranked = rank_top(vec![
            supplier("A", "https://a.test/", 50),
            supplier("B", "https://b.test/", 70),
            supplier("C", "https://c.test/", 50),
        ]);
        let names: Vec<&str> = ranked.iter().map(|s| s.company_name.as_str()).collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn keeps_at_most_five() {
        let input = (0..8)
            .map(|i| supplier(&format!("S{i}"), &format!("https://s{i}.test/"), i * 10))
            .collect();
        let ranked = rank_top(input);
        assert_eq!(ranked.len(), TOP_N);
        assert_eq!(ranked[0].rating, 70);
        assert_eq!(ranked[4].rating, 30);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(rank_top(Vec::new()).is_empty());
    }
}
