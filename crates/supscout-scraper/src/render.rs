//! HTML card rendering for the ranked suppliers.

use std::fmt::Write as _;

use supscout_core::{Contacts, EnrichedSupplier};

/// Line placed between consecutive cards.
pub const SEPARATOR: &str = "────────────────────────────";

const RANK_BADGES: [&str; 5] = ["🥇", "🥈", "🥉", "4️⃣", "5️⃣"];

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape_html(href), escape_html(label))
}

/// Contact channels joined with `" | "`, or `None` when there are none.
///
/// Order: WeChat, WhatsApp, Telegram, Email, Phone, Website. Messaging
/// handles and phone numbers become clickable deep links.
#[must_use]
pub fn contacts_html(contacts: &Contacts) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(wechat) = &contacts.wechat {
        parts.push(format!("WeChat: {}", escape_html(wechat)));
    }
    if let Some(whatsapp) = &contacts.whatsapp {
        let href = if whatsapp.starts_with("http://") || whatsapp.starts_with("https://") {
            whatsapp.clone()
        } else {
            format!("https://wa.me/{}", digits(whatsapp))
        };
        parts.push(format!("WhatsApp: {}", link(&href, whatsapp)));
    }
    if let Some(telegram) = &contacts.telegram {
        let href = if telegram.starts_with("http://") || telegram.starts_with("https://") {
            telegram.clone()
        } else {
            format!("https://t.me/{}", telegram.trim_start_matches('@'))
        };
        parts.push(format!("Telegram: {}", link(&href, telegram)));
    }
    if let Some(email) = &contacts.email {
        parts.push(format!("Email: {}", link(&format!("mailto:{email}"), email)));
    }
    if let Some(phone) = &contacts.phone {
        let href = format!("tel:{}", digits(phone));
        parts.push(format!("Phone: {}", link(&href, phone)));
    }
    if let Some(website) = &contacts.website {
        parts.push(format!("Website: {}", link(website, website)));
    }

    (!parts.is_empty()).then(|| parts.join(" | "))
}

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// One supplier card. `index` is zero-based; positions past the fifth
/// fall back to a numeric badge.
#[must_use]
pub fn card_html(index: usize, supplier: &EnrichedSupplier) -> String {
    let position = index + 1;
    let badge = RANK_BADGES
        .get(index)
        .map_or_else(|| format!("{position}."), |badge| (*badge).to_string());

    let mut card = format!(
        "{badge} <b>TOP {position} — {}</b><br/>\n",
        escape_html(&supplier.company_name)
    );

    let mut row = |label: &str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            // Writing into a String cannot fail.
            let _ = writeln!(card, "<div><b>{label}</b> {value}</div>");
        }
    };

    let text = |value: &Option<String>| value.as_deref().map(escape_html);
    row("🌍 Регион:", text(&supplier.region));
    row("🏷️ Продукт:", Some(escape_html(&supplier.product)));
    row("💰 Цена:", text(&supplier.price));
    row("📦 MOQ:", text(&supplier.moq));
    row("🧾 Сертификаты:", text(&supplier.certificates));
    row("📞 Контакты:", contacts_html(&supplier.contacts));
    row("🧠 Рейтинг:", Some(format!("{} / 100", supplier.rating)));
    row("🔗 Источник:", Some(source_html(supplier)));

    if let Some(image) = supplier.image_link.as_deref().filter(|i| !i.is_empty()) {
        let _ = writeln!(
            card,
            "<div><a href=\"{}\" target=\"_blank\">Image</a></div>",
            escape_html(image)
        );
    }

    card.trim_end().to_string()
}

fn source_html(supplier: &EnrichedSupplier) -> String {
    let source = if supplier.source.is_empty() {
        "-"
    } else {
        supplier.source.as_str()
    };
    if supplier.website.is_empty() {
        escape_html(source)
    } else {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(&supplier.website),
            escape_html(source)
        )
    }
}

/// Render ranked suppliers as cards separated by [`SEPARATOR`].
///
/// Returns `None` for an empty list so callers can answer "no content".
#[must_use]
pub fn render_cards(suppliers: &[EnrichedSupplier]) -> Option<String> {
    if suppliers.is_empty() {
        return None;
    }
    let cards: Vec<String> = suppliers
        .iter()
        .enumerate()
        .map(|(index, supplier)| card_html(index, supplier))
        .collect();
    Some(cards.join(&format!("\n\n{SEPARATOR}\n\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn supplier(name: &str, rating: u8) -> EnrichedSupplier {
        EnrichedSupplier {
            company_name: name.to_string(),
            region: Some("Guangdong".to_string()),
            product: name.to_string(),
            price: None,
            moq: Some("500".to_string()),
            certificates: None,
            contacts: Contacts {
                email: Some("sales@maker.test".to_string()),
                website: Some("https://maker.test/p".to_string()),
                ..Contacts::default()
            },
            rating,
            source: "Made-in-China".to_string(),
            website: "https://maker.test/p".to_string(),
            image_link: None,
        }
    }

    #[test]
    fn two_cards_single_separator_no_trailing() {
        let html = render_cards(&[supplier("Alpha", 80), supplier("Beta", 60)]).expect("cards");
        assert_eq!(html.matches(SEPARATOR).count(), 1);
        assert!(!html.trim_end().ends_with(SEPARATOR));
        assert!(html.starts_with("🥇 <b>TOP 1 — Alpha</b>"));
        assert!(html.contains("🥈 <b>TOP 2 — Beta</b>"));
    }

    #[test]
    fn no_suppliers_renders_nothing() {
        assert_eq!(render_cards(&[]), None);
    }

    #[test]
    fn card_rows_and_missing_fields() {
        let card = card_html(0, &supplier("Alpha", 77));
        assert!(card.contains("<div><b>🌍 Регион:</b> Guangdong</div>"));
        assert!(card.contains("<div><b>📦 MOQ:</b> 500</div>"));
        assert!(card.contains("<div><b>🧠 Рейтинг:</b> 77 / 100</div>"));
        assert!(card.contains(
            "<a href=\"https://maker.test/p\" target=\"_blank\" rel=\"noopener\">Made-in-China</a>"
        ));
        assert!(!card.contains("Цена"));
        assert!(!card.contains("Image"));
    }

    #[test]
    fn markup_in_scraped_text_is_escaped() {
        let card = card_html(0, &supplier("<script>x</script> & Co", 50));
        assert!(card.contains("&lt;script&gt;x&lt;/script&gt; &amp; Co"));
        assert!(!card.contains("<script>"));
    }

    #[test]
    fn contact_links_in_fixed_order() {
        let contacts = Contacts {
            wechat: Some("wxid_panel".to_string()),
            whatsapp: Some("+86 138-0000-1111".to_string()),
            telegram: Some("panel_sales".to_string()),
            email: Some("a@b.cn".to_string()),
            phone: Some("+86 (757) 8123-4567".to_string()),
            website: Some("https://b.cn/".to_string()),
            ..Contacts::default()
        };
        let html = contacts_html(&contacts).expect("contacts");
        let parts: Vec<&str> = html.split(" | ").collect();
        assert_eq!(parts.len(), 6);
        assert_eq!(parts[0], "WeChat: wxid_panel");
        assert!(parts[1].contains("href=\"https://wa.me/8613800001111\""));
        assert!(parts[2].contains("href=\"https://t.me/panel_sales\""));
        assert!(parts[3].contains("href=\"mailto:a@b.cn\""));
        assert!(parts[4].contains("href=\"tel:8675781234567\""));
        assert!(parts[5].starts_with("Website: "));
    }

    #[test]
    fn whatsapp_url_kept_verbatim() {
        let contacts = Contacts {
            whatsapp: Some("https://api.whatsapp.com/message/ABC".to_string()),
            ..Contacts::default()
        };
        let html = contacts_html(&contacts).expect("contacts");
        assert!(html.contains("href=\"https://api.whatsapp.com/message/ABC\""));
    }

    #[test]
    fn empty_contacts_produce_no_row() {
        assert_eq!(contacts_html(&Contacts::default()), None);
    }

    #[test]
    fn image_row_when_present() {
        let mut s = supplier("Alpha", 50);
        s.image_link = Some("https://cdn.test/a.jpg".to_string());
        assert!(card_html(0, &s)
            .ends_with("<div><a href=\"https://cdn.test/a.jpg\" target=\"_blank\">Image</a></div>"));
    }
}
