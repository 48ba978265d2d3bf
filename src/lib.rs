// src/lib.rs

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

pub mod config;
pub mod db;

pub mod entities {
    pub mod prelude;
    pub mod exchange;
}

pub mod services {
    pub mod item_mapping;
    pub mod price_store;
    pub mod wiki_prices;
}

pub mod jobs {
    pub mod price_sync;
}

pub mod models {
    pub mod listing;
    pub mod price_record;
}

pub mod handlers {
    pub mod listing;
}
