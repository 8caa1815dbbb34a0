//! Telegram notification channel
//!
//! Posts a Markdown summary of the order to the Bot API `sendMessage`
//! endpoint. Fully best-effort: anything short of a 2xx is recorded as a
//! failure and swallowed by the dispatcher.

use serde::Serialize;
use shared::util::format_amount;

use super::ChannelOutcome;
use crate::db::models::{TelegramSettings, order::OrderFull};

const API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    parse_mode: &'static str,
}

/// Best-effort order notification
pub async fn send_order_telegram(
    http: &reqwest::Client,
    config: &TelegramSettings,
    order: &OrderFull,
) -> ChannelOutcome {
    if config.bot_token.is_empty() || config.chat_id.is_empty() {
        return ChannelOutcome::Skipped("telegram credentials not configured");
    }
    if !config.enabled {
        return ChannelOutcome::Skipped("telegram channel disabled");
    }

    let url = format!("{API_BASE}/bot{}/sendMessage", config.bot_token);
    let body = SendMessage {
        chat_id: &config.chat_id,
        text: build_order_message(order),
        parse_mode: "Markdown",
    };

    match http.post(&url).json(&body).send().await {
        Ok(response) if response.status().is_success() => ChannelOutcome::Sent,
        Ok(response) => {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            ChannelOutcome::Failed(format!("sendMessage returned {status}: {detail}"))
        }
        Err(e) => ChannelOutcome::Failed(e.to_string()),
    }
}

/// Markdown message: order number, customer, itemized lines with computed
/// subtotals, total, optional comment.
pub fn build_order_message(order: &OrderFull) -> String {
    let header = &order.order;

    let items_list = order
        .items
        .iter()
        .map(|item| {
            format!(
                "• {} × {} — {}",
                item.name,
                item.quantity,
                format_amount(item.line_total())
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut message = format!(
        "🌷 *Новый заказ {}*\n\n👤 Клиент: {}\n📱 Телефон: {}\n\n📦 *Состав заказа:*\n{}\n\n💰 *Итого: {}*",
        header.order_number,
        header.customer_name,
        header.phone,
        items_list,
        format_amount(header.total_amount)
    );
    if let Some(ref comment) = header.comment {
        message.push_str(&format!("\n\n💬 Комментарий: {comment}"));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::order::{Order, OrderItem};
    use shared::OrderStatus;
    use surrealdb::RecordId;

    fn sample_order(comment: Option<&str>) -> OrderFull {
        OrderFull {
            order: Order {
                id: Some(RecordId::from_table_key("order", "o1")),
                order_number: "FL-20260307-A3K9".into(),
                customer_name: "Иван Петров".into(),
                phone: "+79991234567".into(),
                email: None,
                address: None,
                comment: comment.map(Into::into),
                total_amount: 17_000,
                status: OrderStatus::New,
                created_at: 0,
            },
            items: vec![
                OrderItem {
                    id: None,
                    order: RecordId::from_table_key("order", "o1"),
                    product: RecordId::from_table_key("product", "p1"),
                    name: "Tulip Red Princess".into(),
                    color: "Red".into(),
                    quantity: 2,
                    price: 4500,
                },
                OrderItem {
                    id: None,
                    order: RecordId::from_table_key("order", "o1"),
                    product: RecordId::from_table_key("product", "p2"),
                    name: "Мимоза весенняя".into(),
                    color: "Жёлтый".into(),
                    quantity: 2,
                    price: 4000,
                },
            ],
        }
    }

    #[test]
    fn message_lists_lines_with_subtotals() {
        let text = build_order_message(&sample_order(None));
        assert!(text.contains("*Новый заказ FL-20260307-A3K9*"));
        assert!(text.contains("• Tulip Red Princess × 2 — 90 ₽"));
        assert!(text.contains("• Мимоза весенняя × 2 — 80 ₽"));
        assert!(text.contains("*Итого: 170 ₽*"));
        assert!(!text.contains("Комментарий"));
    }

    #[test]
    fn comment_is_appended_when_present() {
        let text = build_order_message(&sample_order(Some("позвонить заранее")));
        assert!(text.ends_with("💬 Комментарий: позвонить заранее"));
    }

    #[tokio::test]
    async fn missing_credentials_skip_without_network() {
        let http = reqwest::Client::new();
        let outcome =
            send_order_telegram(&http, &TelegramSettings::default(), &sample_order(None)).await;
        assert_eq!(
            outcome,
            ChannelOutcome::Skipped("telegram credentials not configured")
        );
    }
}
