use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use chrono::Local;
use sea_orm::{EntityTrait, QueryOrder};

use crate::AppState;
use crate::entities::{exchange, prelude::Exchange};
use crate::models::listing::{ListingRow, TIME_FORMAT};

/// GET / - the full price table, sorted by item name.
///
/// Reads straight from the database on every request; the collector
/// keeps the table small (one row per item) so no caching or paging
/// is involved.
pub async fn get_listing(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let models = Exchange::find()
        .order_by_asc(exchange::Column::ItemName)
        .all(&state.db)
        .await
        .map_err(|e| {
            tracing::error!("Listing query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("database error: {}", e),
            )
        })?;

    let rows: Vec<ListingRow> = models.into_iter().map(ListingRow::from).collect();
    let generated_at = Local::now().format(TIME_FORMAT).to_string();

    Ok(Html(render_listing(&rows, &generated_at)))
}

/// Build the whole page as a string. The table is tiny (a few thousand
/// rows at most) so templating machinery is not worth the weight here.
pub fn render_listing(rows: &[ListingRow], generated_at: &str) -> String {
    let mut page = String::with_capacity(256 + rows.len() * 128);

    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    page.push_str("<meta charset=\"utf-8\">\n");
    page.push_str("<title>OSRS Grand Exchange Prices</title>\n");
    page.push_str(
        "<style>\n\
         table { border-collapse: collapse; }\n\
         th, td { border: 1px solid #999; padding: 4px 8px; }\n\
         td.price { text-align: right; }\n\
         </style>\n",
    );
    page.push_str("</head>\n<body>\n");
    page.push_str("<h1>OSRS Grand Exchange Prices</h1>\n");
    page.push_str(&format!(
        "<p>Page generated at {}. Prices refresh roughly every five minutes.</p>\n",
        escape_html(generated_at)
    ));

    page.push_str("<table>\n<thead>\n<tr>");
    page.push_str("<th>Item</th><th>High price</th><th>Low price</th><th>Last fetched</th>");
    page.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        page.push_str(&format!(
            "<tr><td>{}</td><td class=\"price\">{}</td><td class=\"price\">{}</td><td>{}</td></tr>\n",
            escape_html(&row.item_name),
            format_price(row.high_price),
            format_price(row.low_price),
            escape_html(&row.fetched_at),
        ));
    }

    page.push_str("</tbody>\n</table>\n");

    if rows.is_empty() {
        page.push_str("<p>No prices collected yet. Is the collector running?</p>\n");
    }

    page.push_str("</body>\n</html>\n");
    page
}

// The collector never stores null prices, but the schema allows them
fn format_price(price: Option<i64>) -> String {
    match price {
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
