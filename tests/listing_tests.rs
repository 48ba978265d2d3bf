mod common;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    routing::get,
};
use http_body_util::BodyExt;
use sea_orm::DatabaseConnection;
use tower::ServiceExt;

use osrs_price_tracker::handlers::listing;
use osrs_price_tracker::models::listing::TIME_FORMAT;
use osrs_price_tracker::services::price_store::replace_latest_prices;
use osrs_price_tracker::AppState;

use crate::common::{record, setup_test_db};

fn build_app(db: DatabaseConnection) -> Router {
    Router::new()
        .route("/", get(listing::get_listing))
        .with_state(AppState { db })
}

async fn get_page(app: Router) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn page_lists_items_sorted_by_name() {
    let db = setup_test_db().await.unwrap();
    // Insert out of alphabetical order
    replace_latest_prices(
        &db,
        &[
            record("Zulrah's scales", 12934, 150, 140, 1723700000),
            record("Cannonball", 2, 200, 180, 1723700000),
            record("Abyssal whip", 4151, 1_500_000, 1_450_000, 1723700000),
        ],
    )
    .await
    .unwrap();

    let (status, body) = get_page(build_app(db)).await;

    assert_eq!(status, StatusCode::OK);

    let whip = body.find("Abyssal whip").expect("whip row missing");
    let cannonball = body.find("Cannonball").expect("cannonball row missing");
    // Apostrophe is escaped in the rendered page
    let scales = body.find("Zulrah&#39;s scales").expect("scales row missing");
    assert!(whip < cannonball);
    assert!(cannonball < scales);
}

#[tokio::test]
async fn page_renders_local_wall_clock_timestamps() {
    let db = setup_test_db().await.unwrap();
    replace_latest_prices(&db, &[record("Cannonball", 2, 200, 180, 1723700000)])
        .await
        .unwrap();

    let (status, body) = get_page(build_app(db)).await;

    assert_eq!(status, StatusCode::OK);

    let expected = chrono::DateTime::from_timestamp(1723700000, 0)
        .unwrap()
        .with_timezone(&chrono::Local)
        .format(TIME_FORMAT)
        .to_string();
    assert!(
        body.contains(&expected),
        "page does not contain {:?}",
        expected
    );
}

#[tokio::test]
async fn page_shows_prices_for_each_row() {
    let db = setup_test_db().await.unwrap();
    replace_latest_prices(&db, &[record("Cannonball", 2, 200, 180, 1723700000)])
        .await
        .unwrap();

    let (_, body) = get_page(build_app(db)).await;

    assert!(body.contains("<td class=\"price\">200</td>"));
    assert!(body.contains("<td class=\"price\">180</td>"));
}

#[tokio::test]
async fn empty_store_renders_a_page_with_a_hint() {
    let db = setup_test_db().await.unwrap();

    let (status, body) = get_page(build_app(db)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No prices collected yet"));
}

#[tokio::test]
async fn page_is_served_as_html() {
    let db = setup_test_db().await.unwrap();

    let response = build_app(db)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}
