use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, TransactionTrait};

use crate::entities::{exchange, prelude::Exchange};
use crate::models::price_record::PriceRecord;

/// SQLite caps bind parameters per statement; 500 rows of five columns
/// stays well under the limit.
const INSERT_CHUNK: usize = 500;

/// Upsert a whole cycle's records in one transaction, keyed on item_id.
/// Existing rows are overwritten in place, so the table always holds at
/// most one row per item. Returns the number of rows written.
///
/// An empty batch is a no-op and does not open a transaction.
pub async fn replace_latest_prices(
    db: &DatabaseConnection,
    records: &[PriceRecord],
) -> Result<u64, DbErr> {
    if records.is_empty() {
        return Ok(0);
    }

    let txn = db.begin().await?;
    let mut written = 0;

    for chunk in records.chunks(INSERT_CHUNK) {
        let rows = chunk.iter().map(|record| exchange::ActiveModel {
            fetch_timestamp: Set(record.fetch_timestamp),
            item_name: Set(record.item_name.clone()),
            item_id: Set(record.item_id),
            high_price: Set(Some(record.high_price)),
            low_price: Set(Some(record.low_price)),
            ..Default::default()
        });

        written += Exchange::insert_many(rows)
            .on_conflict(
                OnConflict::column(exchange::Column::ItemId)
                    .update_columns([
                        exchange::Column::FetchTimestamp,
                        exchange::Column::ItemName,
                        exchange::Column::HighPrice,
                        exchange::Column::LowPrice,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&txn)
            .await?;
    }

    txn.commit().await?;
    Ok(written)
}
