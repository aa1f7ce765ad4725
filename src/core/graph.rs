use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::models::spend::Spend;

const GRAPH_BASE: &str = "https://graph.facebook.com";
const DEFAULT_VERSION: &str = "v22.0";

pub fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

/// The Graph API wraps every listing in a `data` array.
#[derive(Deserialize)]
struct GraphList<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct BusinessEntry {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdAccountEntry {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
struct InsightRow {
    spend: Option<String>,
}

fn insights_time_range(day: NaiveDate) -> String {
    format!(r#"{{"since":"{day}","until":"{day}"}}"#)
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
    what: &str,
) -> Result<T> {
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Failed to send {} request", what))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("HTTP {} from {}: {}", status.as_u16(), what, body);
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", what))
}

/// List the Business Managers visible to an access token.
pub async fn list_businesses(
    client: &reqwest::Client,
    version: &str,
    access_token: &str,
) -> Result<Vec<BusinessEntry>> {
    let url = format!("{}/{}/me/businesses", GRAPH_BASE, version);
    let list: GraphList<BusinessEntry> = get_json(
        client,
        &url,
        &[("fields", "id,name"), ("access_token", access_token)],
        "business listing",
    )
    .await?;
    Ok(list.data)
}

/// List the ad accounts owned by one Business Manager.
pub async fn list_owned_ad_accounts(
    client: &reqwest::Client,
    version: &str,
    business_id: &str,
    access_token: &str,
) -> Result<Vec<AdAccountEntry>> {
    let url = format!("{}/{}/{}/owned_ad_accounts", GRAPH_BASE, version, business_id);
    let list: GraphList<AdAccountEntry> = get_json(
        client,
        &url,
        &[("fields", "id,name"), ("access_token", access_token)],
        "ad account listing",
    )
    .await?;
    Ok(list.data)
}

/// Fetch an account's cumulative spend for one calendar day.
///
/// Returns `None` when the insights endpoint has no rows for the day, which
/// is distinct from a genuine zero: callers must skip the account without
/// touching its tracked state. A present row with no `spend` field counts
/// as "0".
pub async fn fetch_daily_spend(
    client: &reqwest::Client,
    version: &str,
    account_id: &str,
    access_token: &str,
    day: NaiveDate,
) -> Result<Option<Spend>> {
    let url = format!("{}/{}/{}/insights", GRAPH_BASE, version, account_id);
    let time_range = insights_time_range(day);
    let list: GraphList<InsightRow> = get_json(
        client,
        &url,
        &[
            ("fields", "spend"),
            ("time_range", time_range.as_str()),
            ("access_token", access_token),
        ],
        "insights",
    )
    .await?;

    let Some(row) = list.data.first() else {
        return Ok(None);
    };
    let raw = row.spend.as_deref().unwrap_or("0");
    let spend = Spend::parse(raw)
        .with_context(|| format!("Unparseable spend amount for {}", account_id))?;
    Ok(Some(spend))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_covers_single_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(
            insights_time_range(day),
            r#"{"since":"2025-03-14","until":"2025-03-14"}"#
        );
    }

    #[test]
    fn deserialize_business_listing() {
        let json = r#"{"data":[{"id":"123","name":"Acme BM"},{"id":"456","name":"Side BM"}]}"#;
        let list: GraphList<BusinessEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data.len(), 2);
        assert_eq!(list.data[0].id, "123");
        assert_eq!(list.data[1].name, "Side BM");
    }

    #[test]
    fn deserialize_ad_account_listing() {
        let json = r#"{"data":[{"id":"act_789","name":"Main Account"}]}"#;
        let list: GraphList<AdAccountEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data[0].id, "act_789");
        assert_eq!(list.data[0].name, "Main Account");
    }

    #[test]
    fn deserialize_empty_listing() {
        let json = r#"{"data":[]}"#;
        let list: GraphList<BusinessEntry> = serde_json::from_str(json).unwrap();
        assert!(list.data.is_empty());
    }

    #[test]
    fn deserialize_listing_without_data_field() {
        let list: GraphList<BusinessEntry> = serde_json::from_str("{}").unwrap();
        assert!(list.data.is_empty());
    }

    #[test]
    fn deserialize_insight_row() {
        let json = r#"{"data":[{"spend":"12.50","date_start":"2025-03-14","date_stop":"2025-03-14"}]}"#;
        let list: GraphList<InsightRow> = serde_json::from_str(json).unwrap();
        assert_eq!(list.data[0].spend.as_deref(), Some("12.50"));
    }

    #[test]
    fn deserialize_insight_row_without_spend() {
        let json = r#"{"data":[{"date_start":"2025-03-14"}]}"#;
        let list: GraphList<InsightRow> = serde_json::from_str(json).unwrap();
        assert!(list.data[0].spend.is_none());
    }
}
