//! Post-purchase confirmation
//!
//! Builds the "continue in Telegram" deep link from the persisted
//! last-order summary. No summary, no link — the view degrades to a plain
//! thank-you page.

use std::path::Path;

use crate::checkout::LastOrderSummary;

/// Deep link to the seller's Telegram with a pre-filled message, or `None`
/// when no readable summary is stored.
pub fn telegram_deep_link(seller_handle: &str, summary_path: &Path) -> Option<String> {
    let summary = LastOrderSummary::load(summary_path)?;
    build_link(seller_handle, &summary)
}

fn build_link(seller_handle: &str, summary: &LastOrderSummary) -> Option<String> {
    let items = summary
        .items
        .iter()
        .map(|item| format!("{} × {}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ");

    let text = format!(
        "Здравствуйте! Я оформил заказ {} ({}) на сумму {}. Меня зовут {}.",
        summary.order_number,
        items,
        shared::util::format_amount(summary.total),
        summary.customer_name,
    );

    let handle = seller_handle.trim_start_matches('@');
    let url = reqwest::Url::parse_with_params(
        &format!("https://t.me/{handle}"),
        &[("text", text.as_str())],
    )
    .ok()?;
    Some(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::SummaryItem;

    fn sample_summary() -> LastOrderSummary {
        LastOrderSummary {
            order_number: "FL-20260307-A3K9".into(),
            customer_name: "Иван Петров".into(),
            phone: "+79991234567".into(),
            items: vec![SummaryItem {
                name: "Tulip Red Princess".into(),
                quantity: 2,
                price: 4500,
            }],
            total: 9000,
            comment: String::new(),
        }
    }

    #[test]
    fn link_targets_seller_and_encodes_message() {
        let link = build_link("@bloom_shop", &sample_summary()).unwrap();
        assert!(link.starts_with("https://t.me/bloom_shop?text="));
        assert!(link.contains("FL-20260307-A3K9"));
        // Spaces and Cyrillic must be percent-encoded
        assert!(!link.contains(' '));
    }

    #[test]
    fn no_summary_means_no_link() {
        let dir = tempfile::tempdir().unwrap();
        assert!(telegram_deep_link("@bloom_shop", &dir.path().join("last-order.json")).is_none());
    }

    #[test]
    fn stored_summary_produces_link() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last-order.json");
        sample_summary().save(&path).unwrap();

        let link = telegram_deep_link("bloom_shop", &path).unwrap();
        assert!(link.contains("t.me/bloom_shop"));
    }
}
