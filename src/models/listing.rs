use chrono::{DateTime, Local};

use crate::entities::exchange;

/// Wall-clock format used everywhere on the listing page
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the rendered listing, timestamp already formatted for
/// display in the server's local timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub item_name: String,
    pub high_price: Option<i64>,
    pub low_price: Option<i64>,
    pub fetched_at: String,
}

impl From<exchange::Model> for ListingRow {
    fn from(model: exchange::Model) -> Self {
        Self {
            item_name: model.item_name,
            high_price: model.high_price,
            low_price: model.low_price,
            fetched_at: format_timestamp(model.fetch_timestamp),
        }
    }
}

/// Render Unix seconds as local wall-clock time. Values chrono cannot
/// represent render as a marker instead.
pub fn format_timestamp(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(utc) => utc.with_timezone(&Local).format(TIME_FORMAT).to_string(),
        None => format!("invalid timestamp {}", secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn formatted_timestamp_round_trips_through_the_display_format() {
        let formatted = format_timestamp(1723700000);
        assert!(NaiveDateTime::parse_from_str(&formatted, TIME_FORMAT).is_ok());
    }

    #[test]
    fn out_of_range_timestamp_renders_a_marker() {
        assert_eq!(
            format_timestamp(i64::MAX),
            format!("invalid timestamp {}", i64::MAX)
        );
    }

    #[test]
    fn listing_row_carries_model_fields() {
        let row = ListingRow::from(exchange::Model {
            id: 1,
            fetch_timestamp: 1723700000,
            item_name: "Cannonball".to_string(),
            item_id: 2,
            high_price: Some(200),
            low_price: Some(180),
        });

        assert_eq!(row.item_name, "Cannonball");
        assert_eq!(row.high_price, Some(200));
        assert_eq!(row.low_price, Some(180));
        assert!(NaiveDateTime::parse_from_str(&row.fetched_at, TIME_FORMAT).is_ok());
    }
}
