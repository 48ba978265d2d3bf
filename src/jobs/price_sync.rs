use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::models::price_record::PriceRecord;
use crate::services::item_mapping::ItemMapping;
use crate::services::price_store;
use crate::services::wiki_prices::{FetchError, LatestSnapshot, WikiPricesService};

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("snapshot fetch failed: {0}")]
    Snapshot(#[source] FetchError),
    #[error("price upsert failed: {0}")]
    Store(#[from] sea_orm::DbErr),
}

/// Entries excluded from a cycle, by reason. Exclusion is routine (the
/// snapshot covers ids the mapping does not, and thin markets trade on
/// one side only), so these are reported per cycle instead of per item.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropStats {
    /// Snapshot ids absent from the mapping, or not numeric at all
    pub unmapped: usize,
    /// Mapped items where high or low was null
    pub partial_price: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CycleSummary {
    pub stored: u64,
    pub dropped: DropStats,
    pub fetch_timestamp: i64,
}

/// Fetch one snapshot, normalize it against the mapping and upsert the
/// result. The fetch timestamp is taken once, after the snapshot arrives,
/// so every record of the cycle carries the same value.
pub async fn run_cycle(
    db: &DatabaseConnection,
    service: &WikiPricesService,
    mapping: &ItemMapping,
) -> Result<CycleSummary, CycleError> {
    let snapshot = service.fetch_latest().await.map_err(CycleError::Snapshot)?;
    let fetch_timestamp = Utc::now().timestamp();

    let (records, dropped) = normalize_snapshot(&snapshot, mapping.names(), fetch_timestamp);
    let stored = price_store::replace_latest_prices(db, &records).await?;

    Ok(CycleSummary {
        stored,
        dropped,
        fetch_timestamp,
    })
}

/// Join the snapshot against the name mapping. Items without a mapping
/// entry or with a missing price side are dropped and counted.
pub fn normalize_snapshot(
    snapshot: &LatestSnapshot,
    names: &HashMap<i64, String>,
    fetch_timestamp: i64,
) -> (Vec<PriceRecord>, DropStats) {
    let mut records = Vec::with_capacity(snapshot.data.len());
    let mut dropped = DropStats::default();

    for (raw_id, quote) in &snapshot.data {
        let item_id = match raw_id.parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                dropped.unmapped += 1;
                continue;
            }
        };

        let Some(item_name) = names.get(&item_id) else {
            dropped.unmapped += 1;
            continue;
        };

        let (Some(high), Some(low)) = (quote.high, quote.low) else {
            dropped.partial_price += 1;
            continue;
        };

        records.push(PriceRecord {
            fetch_timestamp,
            item_name: item_name.clone(),
            item_id,
            high_price: high,
            low_price: low,
        });
    }

    (records, dropped)
}

/// Collector loop: cycle, sleep, repeat until Ctrl+C. A failed cycle is
/// logged and skipped; the sleep runs regardless of how long the cycle
/// took, so consecutive fetches stay at least `poll_interval` apart.
pub async fn run(
    db: DatabaseConnection,
    service: WikiPricesService,
    mapping: ItemMapping,
    poll_interval: Duration,
) {
    let ctrl_c = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    run_until(db, service, mapping, poll_interval, ctrl_c).await;
}

/// Same loop with an explicit shutdown future. The future is pinned once
/// and polled across the whole loop, so a signal that arrives while a
/// cycle is in flight still stops the loop at the next checkpoint.
pub async fn run_until(
    db: DatabaseConnection,
    service: WikiPricesService,
    mut mapping: ItemMapping,
    poll_interval: Duration,
    shutdown: impl Future<Output = ()>,
) {
    tracing::info!(
        "Starting price sync loop, polling every {}s",
        poll_interval.as_secs()
    );
    tokio::pin!(shutdown);

    loop {
        mapping.ensure_fresh(&service).await;

        match run_cycle(&db, &service, &mapping).await {
            Ok(summary) => {
                tracing::info!(
                    "Stored {} prices at {} ({} unmapped, {} missing a price side)",
                    summary.stored,
                    summary.fetch_timestamp,
                    summary.dropped.unmapped,
                    summary.dropped.partial_price
                );
            }
            Err(e) => {
                tracing::error!("Price sync cycle failed, will retry next cycle: {}", e);
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(poll_interval) => {}
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, stopping price sync");
                break;
            }
        }
    }
}
