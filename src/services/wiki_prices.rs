use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// The mapping payload is a few MB but statically served
const MAPPING_TIMEOUT: Duration = Duration::from_secs(20);
/// The latest endpoint aggregates live data and can be slow under load
const LATEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("mapping contained no usable entries")]
    EmptyMapping,
}

/// One item from the mapping endpoint. Both fields are optional because
/// the payload occasionally carries placeholder entries; incomplete ones
/// are filtered out rather than failing the whole fetch.
#[derive(Debug, Deserialize)]
struct MappingEntry {
    id: Option<i64>,
    name: Option<String>,
}

/// Latest buy/sell prices for one item. Either side can be null when the
/// item has never traded in that direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceQuote {
    pub high: Option<i64>,
    pub low: Option<i64>,
}

/// Response shape of the latest endpoint: item ids (as strings) to quotes
#[derive(Debug, Deserialize)]
pub struct LatestSnapshot {
    pub data: HashMap<String, PriceQuote>,
}

#[derive(Clone)]
pub struct WikiPricesService {
    client: Client,
    base_url: String,
}

impl WikiPricesService {
    pub fn new(base_url: String, user_agent: &str) -> Result<Self, reqwest::Error> {
        // The wiki blocks clients without a descriptive User-Agent
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch the item id to name mapping, dropping incomplete entries.
    /// A payload with no usable entries at all is an error: without names
    /// every snapshot entry would be dropped as unmapped.
    pub async fn fetch_mapping(&self) -> Result<HashMap<i64, String>, FetchError> {
        let url = format!("{}/mapping", self.base_url);
        tracing::info!("Fetching item mapping from {}", url);

        let body = self.get_text(&url, MAPPING_TIMEOUT).await?;
        let entries: Vec<MappingEntry> = serde_json::from_str(&body)?;
        let mapping = build_mapping(entries);
        if mapping.is_empty() {
            return Err(FetchError::EmptyMapping);
        }
        Ok(mapping)
    }

    /// Fetch the latest price snapshot for all tradeable items.
    pub async fn fetch_latest(&self) -> Result<LatestSnapshot, FetchError> {
        let url = format!("{}/latest", self.base_url);
        tracing::info!("Fetching latest prices from {}", url);

        let body = self.get_text(&url, LATEST_TIMEOUT).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // Body is decoded separately from the transfer so that malformed JSON
    // surfaces as Decode rather than Network.
    async fn get_text(&self, url: &str, timeout: Duration) -> Result<String, FetchError> {
        let response = self.client.get(url).timeout(timeout).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        Ok(response.text().await?)
    }
}

fn build_mapping(entries: Vec<MappingEntry>) -> HashMap<i64, String> {
    entries
        .into_iter()
        .filter_map(|entry| match (entry.id, entry.name) {
            (Some(id), Some(name)) => Some((id, name)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapping_keeps_only_complete_entries() {
        let raw = r#"[
            {"id": 2, "name": "Cannonball", "members": true, "limit": 11000},
            {"id": 6, "examine": "Fourth age armour."},
            {"name": "Ghostly hood"},
            {"id": 4151, "name": "Abyssal whip", "value": 120001}
        ]"#;

        let entries: Vec<MappingEntry> = serde_json::from_str(raw).unwrap();
        let mapping = build_mapping(entries);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.get(&2).map(String::as_str), Some("Cannonball"));
        assert_eq!(mapping.get(&4151).map(String::as_str), Some("Abyssal whip"));
        assert!(!mapping.contains_key(&6));
    }

    #[test]
    fn snapshot_decodes_null_and_missing_prices() {
        let raw = r#"{"data": {
            "2": {"high": 200, "highTime": 1700000000, "low": 180, "lowTime": 1700000050},
            "5": {"high": null, "low": 10},
            "10": {"low": 44}
        }}"#;

        let snapshot: LatestSnapshot = serde_json::from_str(raw).unwrap();

        assert_eq!(snapshot.data.len(), 3);
        assert_eq!(
            snapshot.data["2"],
            PriceQuote {
                high: Some(200),
                low: Some(180)
            }
        );
        assert_eq!(
            snapshot.data["5"],
            PriceQuote {
                high: None,
                low: Some(10)
            }
        );
        assert_eq!(
            snapshot.data["10"],
            PriceQuote {
                high: None,
                low: Some(44)
            }
        );
    }

    #[test]
    fn mapping_with_no_usable_entries_is_empty() {
        let entries: Vec<MappingEntry> = serde_json::from_str(r#"[{"id": 1}, {}]"#).unwrap();
        assert!(build_mapping(entries).is_empty());
    }
}
