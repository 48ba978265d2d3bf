/// One normalized price observation, ready to persist. Only fully priced,
/// name-resolved items become records; everything else is dropped during
/// normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    /// Unix seconds shared by every record of the same cycle
    pub fetch_timestamp: i64,
    pub item_name: String,
    pub item_id: i64,
    pub high_price: i64,
    pub low_price: i64,
}
