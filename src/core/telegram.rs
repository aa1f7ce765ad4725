use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::models::account::Account;
use crate::core::models::spend::Spend;

const API_BASE: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

/// Markdown alert body for a spend transition.
pub fn spend_alert_text(account: &Account, spend: Spend) -> String {
    format!(
        "🚀 Business Manager: *{}*\nAd Account: *{}* started spending! 💰\nTotal Spend Today: ${}",
        account.business_name, account.name, spend
    )
}

/// Send one Markdown message to the configured chat. Fire and forget from
/// the caller's point of view: failures are reported but never retried.
pub async fn send_message(
    client: &reqwest::Client,
    bot_token: &str,
    chat_id: &str,
    text: &str,
) -> Result<()> {
    let url = format!("{}/bot{}/sendMessage", API_BASE, bot_token);
    let response = client
        .post(&url)
        .json(&SendMessageRequest {
            chat_id,
            text,
            parse_mode: "Markdown",
        })
        .send()
        .await
        .context("Failed to send Telegram request")?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("HTTP {} from Telegram: {}", status.as_u16(), body);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: "act_1".into(),
            name: "Main Account".into(),
            business_name: "Acme BM".into(),
            access_token: "tok".into(),
        }
    }

    #[test]
    fn alert_text_mentions_business_account_and_amount() {
        let text = spend_alert_text(&account(), Spend::parse("12.50").unwrap());
        assert!(text.contains("*Acme BM*"));
        assert!(text.contains("*Main Account*"));
        assert!(text.contains("$12.50"));
    }

    #[test]
    fn request_body_shape() {
        let request = SendMessageRequest {
            chat_id: "-100123",
            text: "hello",
            parse_mode: "Markdown",
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chat_id"], "-100123");
        assert_eq!(json["text"], "hello");
        assert_eq!(json["parse_mode"], "Markdown");
    }
}
