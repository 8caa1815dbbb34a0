//! Email notification channel
//!
//! Renders the order notification as HTML and ships it through the relay
//! configured in the settings store. Used by the best-effort order path and
//! by the admin test-send (which, unlike the order path, propagates
//! failures).

use std::time::Duration;

use chrono::TimeZone;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use shared::util::format_amount;

use super::ChannelOutcome;
use crate::db::models::{EmailSettings, order::OrderFull};

/// SMTP connect/send budget — a dead relay must not hold a checkout hostage
const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Best-effort order notification. Missing/disabled config is a silent
/// skip; a send failure is recorded and swallowed.
pub async fn send_order_email(
    config: Option<&EmailSettings>,
    order: &OrderFull,
) -> ChannelOutcome {
    let Some(config) = config else {
        return ChannelOutcome::Skipped("email settings not configured");
    };
    if !config.enabled {
        return ChannelOutcome::Skipped("email channel disabled");
    }
    if config.admin_email.is_empty() || config.smtp_host.is_empty() {
        return ChannelOutcome::Skipped("email settings incomplete");
    }

    let subject = format!("🌷 Новый заказ {}", order.order.order_number);
    let html = render_order_html(order);

    match send_mail(config, &config.admin_email, &subject, html).await {
        Ok(()) => ChannelOutcome::Sent,
        Err(e) => ChannelOutcome::Failed(e.to_string()),
    }
}

/// Deliver one HTML mail through the configured relay
pub async fn send_mail(
    config: &EmailSettings,
    to: &str,
    subject: &str,
    html: String,
) -> Result<(), EmailError> {
    let from_email = if config.from_email.is_empty() {
        &config.smtp_user
    } else {
        &config.from_email
    };
    let from: Mailbox = if config.from_name.is_empty() {
        from_email.parse()?
    } else {
        format!("{} <{}>", config.from_name, from_email).parse()?
    };

    let message = Message::builder()
        .from(from)
        .to(to.parse()?)
        .subject(subject)
        .header(ContentType::TEXT_HTML)
        .body(html)?;

    let port = config.port();
    // Port 465 is implicit TLS, everything else negotiates STARTTLS
    let builder = if port == 465 {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
    };
    let transport = builder
        .port(port)
        .credentials(Credentials::new(
            config.smtp_user.clone(),
            config.smtp_password.clone(),
        ))
        .timeout(Some(SMTP_TIMEOUT))
        .build();

    transport.send(message).await?;
    Ok(())
}

/// Admin notification body: order number + timestamp, customer contacts,
/// optional comment, itemized table, grand total.
pub fn render_order_html(order: &OrderFull) -> String {
    let header = &order.order;
    let placed_at = chrono::Utc
        .timestamp_millis_opt(header.created_at)
        .single()
        .map(|dt| dt.format("%d.%m.%Y %H:%M UTC").to_string())
        .unwrap_or_default();

    let mut out = String::with_capacity(2048);
    out.push_str(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">",
    );
    out.push_str("<h1 style=\"color: #ec4899;\">🌷 Новый заказ</h1>");
    out.push_str(&format!(
        "<p><strong>Заказ {}</strong><br>{}</p>",
        escape(&header.order_number),
        placed_at
    ));

    out.push_str("<h3>Клиент</h3><table>");
    out.push_str(&format!(
        "<tr><td>Имя:</td><td>{}</td></tr>",
        escape(&header.customer_name)
    ));
    out.push_str(&format!(
        "<tr><td>Телефон:</td><td>{}</td></tr>",
        escape(&header.phone)
    ));
    if let Some(ref email) = header.email {
        out.push_str(&format!("<tr><td>Email:</td><td>{}</td></tr>", escape(email)));
    }
    if let Some(ref address) = header.address {
        out.push_str(&format!(
            "<tr><td>Адрес:</td><td>{}</td></tr>",
            escape(address)
        ));
    }
    out.push_str("</table>");

    if let Some(ref comment) = header.comment {
        out.push_str(&format!(
            "<h3>Комментарий</h3><p>{}</p>",
            escape(comment)
        ));
    }

    out.push_str("<h3>Товары</h3><table style=\"width: 100%; border-collapse: collapse;\">");
    out.push_str("<tr><th align=\"left\">Товар</th><th>Кол-во</th><th align=\"right\">Сумма</th></tr>");
    for item in &order.items {
        out.push_str(&format!(
            "<tr><td>{} ({})</td><td align=\"center\">{} шт.</td><td align=\"right\">{}</td></tr>",
            escape(&item.name),
            escape(&item.color),
            item.quantity,
            format_amount(item.line_total())
        ));
    }
    out.push_str(&format!(
        "<tr><td colspan=\"2\"><strong>Итого:</strong></td><td align=\"right\"><strong>{}</strong></td></tr>",
        format_amount(header.total_amount)
    ));
    out.push_str("</table></div>");
    out
}

/// Fixed body for the admin test-send
pub fn render_test_html() -> String {
    let now = chrono::Utc::now().format("%d.%m.%Y %H:%M UTC");
    format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h1 style=\"color: #ec4899;\">🌷 Bloom</h1>\
         <p>Это тестовое письмо для проверки настроек email-рассылки.</p>\
         <p>Если вы видите это письмо — настройки работают корректно!</p>\
         <p style=\"color: #888; font-size: 12px;\">Время отправки: {now}</p>\
         </div>"
    )
}

/// Minimal HTML escape for customer-supplied text
fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::order::{Order, OrderItem};
    use shared::OrderStatus;
    use surrealdb::RecordId;

    fn sample_order() -> OrderFull {
        OrderFull {
            order: Order {
                id: Some(RecordId::from_table_key("order", "o1")),
                order_number: "FL-20260307-A3K9".into(),
                customer_name: "Иван Петров".into(),
                phone: "+79991234567".into(),
                email: Some("ivan@example.com".into()),
                address: None,
                comment: Some("до 18:00 <срочно>".into()),
                total_amount: 9000,
                status: OrderStatus::New,
                created_at: 1_767_225_600_000,
            },
            items: vec![OrderItem {
                id: Some(RecordId::from_table_key("order_item", "i1")),
                order: RecordId::from_table_key("order", "o1"),
                product: RecordId::from_table_key("product", "p1"),
                name: "Tulip Red Princess".into(),
                color: "Red".into(),
                quantity: 2,
                price: 4500,
            }],
        }
    }

    #[test]
    fn html_contains_order_facts() {
        let html = render_order_html(&sample_order());
        assert!(html.contains("FL-20260307-A3K9"));
        assert!(html.contains("Иван Петров"));
        assert!(html.contains("+79991234567"));
        assert!(html.contains("Tulip Red Princess"));
        assert!(html.contains("2 шт."));
        assert!(html.contains("90 ₽"));
    }

    #[test]
    fn customer_text_is_escaped() {
        let html = render_order_html(&sample_order());
        assert!(html.contains("&lt;срочно&gt;"));
        assert!(!html.contains("<срочно>"));
    }

    #[tokio::test]
    async fn unconfigured_channel_is_skipped_silently() {
        let outcome = send_order_email(None, &sample_order()).await;
        assert!(matches!(outcome, ChannelOutcome::Skipped(_)));

        let disabled = EmailSettings {
            enabled: false,
            smtp_host: "smtp.example.com".into(),
            admin_email: "shop@example.com".into(),
            ..Default::default()
        };
        let outcome = send_order_email(Some(&disabled), &sample_order()).await;
        assert!(matches!(outcome, ChannelOutcome::Skipped(_)));

        let no_host = EmailSettings {
            enabled: true,
            admin_email: "shop@example.com".into(),
            ..Default::default()
        };
        let outcome = send_order_email(Some(&no_host), &sample_order()).await;
        assert!(matches!(outcome, ChannelOutcome::Skipped(_)));
    }
}
