use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::core::config::AppConfig;
use crate::core::directory;
use crate::core::graph;
use crate::core::models::spend::Spend;

#[derive(Serialize)]
struct SpendReport<'a> {
    account_id: &'a str,
    account: &'a str,
    business: &'a str,
    /// Two-decimal amount, or null when the API had no rows for today.
    spend: Option<Spend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// One paced pass over every account, printing today's spend without
/// touching any alert state. Useful for checking tokens and rate limits.
pub async fn run(json: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let tokens = config.access_tokens();
    if tokens.is_empty() {
        eprintln!("No access tokens configured. Run `spendwatch config init` first.");
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    let version = config.settings.graph_api_version.as_str();
    let accounts = directory::resolve_accounts(&client, version, &tokens).await;
    let delay = Duration::from_millis(config.settings.account_delay_ms);
    let today = Utc::now().date_naive();

    let mut reports: Vec<(usize, Option<Spend>, Option<String>)> = Vec::new();
    for (i, account) in accounts.iter().enumerate() {
        tokio::time::sleep(delay).await;
        match graph::fetch_daily_spend(&client, version, &account.id, &account.access_token, today)
            .await
        {
            Ok(spend) => reports.push((i, spend, None)),
            Err(e) => reports.push((i, None, Some(format!("{:#}", e)))),
        }
    }

    if json {
        let payload: Vec<SpendReport> = reports
            .iter()
            .map(|(i, spend, error)| SpendReport {
                account_id: &accounts[*i].id,
                account: &accounts[*i].name,
                business: &accounts[*i].business_name,
                spend: *spend,
                error: error.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No ad accounts discovered.");
        return Ok(());
    }

    println!("Today's spend ({})", today);
    for (i, spend, error) in &reports {
        let account = &accounts[*i];
        let line = match (spend, error) {
            (Some(spend), _) => format!("${}", spend).green().to_string(),
            (None, None) => "no data".dimmed().to_string(),
            (None, Some(e)) => format!("error: {}", e).red().to_string(),
        };
        println!(
            " [{}] {}: {}",
            account.business_name.bold(),
            account.name,
            line
        );
    }
    Ok(())
}
