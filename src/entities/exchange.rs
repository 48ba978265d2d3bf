//! SeaORM Entity for the exchange table
//!
//! Holds the latest observed Grand Exchange price per item. Rows are
//! keyed on the in-game item id; each collector cycle overwrites them
//! in place rather than appending history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exchange")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unix seconds at which the snapshot holding this row was normalized
    pub fetch_timestamp: i64,
    /// Human-readable item name from the mapping endpoint
    pub item_name: String,
    /// In-game item id
    #[sea_orm(unique)]
    pub item_id: i64,
    /// Most recent instant-buy price in gp
    pub high_price: Option<i64>,
    /// Most recent instant-sell price in gp
    pub low_price: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
