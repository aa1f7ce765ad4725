use anyhow::Result;
use colored::Colorize;

use crate::core::config::AppConfig;
use crate::core::directory;

/// Resolve the directory once and print what would be monitored.
pub async fn run(json: bool) -> Result<()> {
    let config = AppConfig::load()?;
    let tokens = config.access_tokens();
    if tokens.is_empty() {
        eprintln!("No access tokens configured. Run `spendwatch config init` first.");
        std::process::exit(1);
    }

    let client = reqwest::Client::new();
    let accounts = directory::resolve_accounts(
        &client,
        &config.settings.graph_api_version,
        &tokens,
    )
    .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&accounts)?);
        return Ok(());
    }

    if accounts.is_empty() {
        println!("No ad accounts discovered.");
        return Ok(());
    }

    let mut current_business: Option<&str> = None;
    for account in &accounts {
        if current_business != Some(account.business_name.as_str()) {
            println!(" {}", account.business_name.bold());
            current_business = Some(account.business_name.as_str());
        }
        println!("   {} ({})", account.name, account.id.dimmed());
    }
    println!(
        "\n{} account(s) across {} token(s)",
        accounts.len(),
        tokens.len()
    );
    Ok(())
}
