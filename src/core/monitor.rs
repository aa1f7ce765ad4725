use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::time::MissedTickBehavior;

use crate::core::config::AppConfig;
use crate::core::detector::TransitionDetector;
use crate::core::directory;
use crate::core::graph;
use crate::core::models::account::Account;
use crate::core::telegram;

/// Resolve the account directory once, then sweep it forever: first sweep
/// immediately, then every poll interval. Ticks that elapse while a sweep is
/// still running are skipped, so sweeps never overlap and the detector stays
/// exclusively owned by this loop.
pub async fn run(config: &AppConfig) -> Result<()> {
    let tokens = config.access_tokens();
    if tokens.is_empty() {
        anyhow::bail!("No access tokens configured (see `spendwatch config init`)");
    }
    let bot_token = config
        .telegram_bot_token()
        .context("No Telegram bot token configured")?;
    let chat_id = config
        .telegram_chat_id()
        .context("No Telegram chat id configured")?;

    let client = reqwest::Client::new();
    let version = config.settings.graph_api_version.as_str();

    let accounts = directory::resolve_accounts(&client, version, &tokens).await;
    if accounts.is_empty() {
        tracing::warn!("No ad accounts discovered; nothing will be polled");
    }

    let mut detector = TransitionDetector::new();
    let delay = Duration::from_millis(config.settings.account_delay_ms);
    let mut ticker =
        tokio::time::interval(Duration::from_secs(config.settings.poll_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        sweep(
            &client,
            version,
            &accounts,
            delay,
            &mut detector,
            &bot_token,
            &chat_id,
        )
        .await;
    }
}

/// One sequential pass over every account. Every failure class is per-item:
/// logged, skipped, never aborting the rest of the sweep.
async fn sweep(
    client: &reqwest::Client,
    version: &str,
    accounts: &[Account],
    delay: Duration,
    detector: &mut TransitionDetector,
    bot_token: &str,
    chat_id: &str,
) {
    let today = Utc::now().date_naive();
    tracing::debug!("Sweep started for {} ({} accounts)", today, accounts.len());

    for account in accounts {
        tokio::time::sleep(delay).await;

        let spend = match graph::fetch_daily_spend(
            client,
            version,
            &account.id,
            &account.access_token,
            today,
        )
        .await
        {
            Ok(Some(spend)) => spend,
            Ok(None) => {
                tracing::warn!("No spend data available for {}, skipping", account.name);
                continue;
            }
            Err(e) => {
                tracing::error!("API error for {}: {:#}", account.name, e);
                continue;
            }
        };

        tracing::info!(
            "[{}] Ad Account {}: Today's Spend: ${}",
            account.business_name,
            account.name,
            spend
        );

        if detector.observe(&account.id, spend) {
            let text = telegram::spend_alert_text(account, spend);
            match telegram::send_message(client, bot_token, chat_id, &text).await {
                Ok(()) => tracing::info!("Telegram alert sent for {}", account.name),
                Err(e) => {
                    // State already updated; the alert is simply dropped.
                    tracing::error!("Telegram delivery failed for {}: {:#}", account.name, e);
                }
            }
        }
    }
}
