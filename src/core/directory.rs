use crate::core::graph;
use crate::core::models::account::{Account, BusinessManager};

fn accounts_for(bm: &BusinessManager, entries: Vec<graph::AdAccountEntry>) -> Vec<Account> {
    entries
        .into_iter()
        .map(|entry| Account {
            id: entry.id,
            name: entry.name,
            business_name: bm.name.clone(),
            access_token: bm.access_token.clone(),
        })
        .collect()
}

/// Resolve the Business Managers reachable from a set of access tokens.
///
/// A token that fails to list its businesses contributes nothing; the
/// remaining tokens are still queried.
pub async fn resolve_business_managers(
    client: &reqwest::Client,
    version: &str,
    access_tokens: &[String],
) -> Vec<BusinessManager> {
    let mut managers = Vec::new();
    for token in access_tokens {
        match graph::list_businesses(client, version, token).await {
            Ok(entries) => {
                for entry in entries {
                    managers.push(BusinessManager {
                        id: entry.id,
                        name: entry.name,
                        access_token: token.clone(),
                    });
                }
            }
            Err(e) => {
                tracing::error!("Error fetching Business Managers: {:#}", e);
            }
        }
    }
    tracing::info!("Business Managers loaded: {}", managers.len());
    for bm in &managers {
        tracing::debug!("Business Manager {} ({})", bm.name, bm.id);
    }
    managers
}

/// Build the flat account directory: every ad account owned by every
/// reachable Business Manager, in discovery order (token order, then
/// business order, then account order). No cross-token deduplication.
///
/// Per-business failures are logged and that business contributes zero
/// accounts. An empty directory is a valid result.
pub async fn resolve_accounts(
    client: &reqwest::Client,
    version: &str,
    access_tokens: &[String],
) -> Vec<Account> {
    let managers = resolve_business_managers(client, version, access_tokens).await;

    let mut accounts = Vec::new();
    for bm in &managers {
        match graph::list_owned_ad_accounts(client, version, &bm.id, &bm.access_token).await {
            Ok(entries) => {
                accounts.extend(accounts_for(bm, entries));
            }
            Err(e) => {
                tracing::error!("Error fetching ad accounts for {}: {:#}", bm.name, e);
            }
        }
    }

    tracing::info!("Account directory resolved: {} account(s)", accounts.len());
    accounts
}
