use anyhow::Result;

use crate::core::config::AppConfig;
use crate::core::monitor;

pub async fn run() -> Result<()> {
    let config = AppConfig::load()?;

    let issues = config.validate();
    if !issues.is_empty() {
        eprintln!("Config issues:");
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        eprintln!("Run `spendwatch config init` to generate a starter config.");
        std::process::exit(1);
    }

    tracing::info!(
        "Starting monitor: {}s interval, {}ms account delay, Graph API {}",
        config.settings.poll_interval_secs,
        config.settings.account_delay_ms,
        config.settings.graph_api_version
    );
    monitor::run(&config).await
}
