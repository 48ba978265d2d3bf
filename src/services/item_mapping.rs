use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::wiki_prices::{FetchError, WikiPricesService};

/// Item id to display name table, fetched once at startup and optionally
/// refreshed on an interval. A failed refresh keeps the previous table so
/// a flaky mapping endpoint cannot take the collector down mid-run.
#[derive(Debug)]
pub struct ItemMapping {
    names: HashMap<i64, String>,
    loaded_at: Instant,
    refresh_interval: Option<Duration>,
}

impl ItemMapping {
    /// Initial load. Errors here are fatal to the caller: without names
    /// there is nothing meaningful to store.
    pub async fn load(
        service: &WikiPricesService,
        refresh_interval: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let names = service.fetch_mapping().await?;
        Ok(Self {
            names,
            loaded_at: Instant::now(),
            refresh_interval,
        })
    }

    pub fn resolve(&self, item_id: i64) -> Option<&str> {
        self.names.get(&item_id).map(String::as_str)
    }

    pub fn names(&self) -> &HashMap<i64, String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reload the table when the configured interval has elapsed. Unlike
    /// the initial load a failure is logged and the stale table kept.
    pub async fn ensure_fresh(&mut self, service: &WikiPricesService) {
        let Some(interval) = self.refresh_interval else {
            return;
        };
        if self.loaded_at.elapsed() < interval {
            return;
        }

        match self.reload(service).await {
            Ok(()) => tracing::info!("Item mapping refreshed, {} items", self.names.len()),
            Err(e) => tracing::warn!("Item mapping refresh failed, keeping previous table: {}", e),
        }
    }

    pub async fn reload(&mut self, service: &WikiPricesService) -> Result<(), FetchError> {
        self.names = service.fetch_mapping().await?;
        self.loaded_at = Instant::now();
        Ok(())
    }
}
