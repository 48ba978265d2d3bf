use sea_orm_migration::MigratorTrait;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use osrs_price_tracker::config::Config;
use osrs_price_tracker::db;
use osrs_price_tracker::jobs::price_sync;
use osrs_price_tracker::services::item_mapping::ItemMapping;
use osrs_price_tracker::services::wiki_prices::WikiPricesService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Connect to database and run migrations
    tracing::info!("Connecting to database at {}", config.database_url);
    let db = db::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    migration::Migrator::up(&db, None).await?;

    let service = WikiPricesService::new(config.prices_base_url.clone(), &config.user_agent)?;

    // Load the item mapping once up front. Without names every snapshot
    // entry would be dropped, so a failure here ends the process.
    let mapping = match ItemMapping::load(&service, config.mapping_refresh).await {
        Ok(mapping) => mapping,
        Err(e) => {
            tracing::error!("Initial item mapping fetch failed: {}", e);
            return Err(e.into());
        }
    };
    tracing::info!("Mapped {} items", mapping.len());

    price_sync::run(db, service, mapping, config.poll_interval).await;

    tracing::info!("Collector stopped");
    Ok(())
}
