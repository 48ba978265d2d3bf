use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use osrs_price_tracker::models::price_record::PriceRecord;

/// Set up an in-memory SQLite database with the schema applied.
/// The pool is pinned to a single connection because every pooled
/// connection would otherwise get its own private in-memory database.
pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);

    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Shorthand for building seed records in tests
#[allow(dead_code)]
pub fn record(
    item_name: &str,
    item_id: i64,
    high_price: i64,
    low_price: i64,
    fetch_timestamp: i64,
) -> PriceRecord {
    PriceRecord {
        fetch_timestamp,
        item_name: item_name.to_string(),
        item_id,
        high_price,
        low_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_setup_test_db() {
        let db = setup_test_db().await;
        assert!(db.is_ok(), "Test database connection should succeed");
    }
}
