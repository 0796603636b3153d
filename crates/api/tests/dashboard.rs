use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tower::ServiceExt;

use api::{router, AppState};
use common::{Currency, Pair};
use feed::{fetch_price_table, InMemorySource, LookbackWindow};
use strength::{compute_log_returns, StrengthModel};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
}

/// Five trading days, three currencies, no gaps and no outlier moves.
async fn app() -> Router {
    let currencies: Vec<Currency> = ["AAA", "BBB", "CCC"]
        .iter()
        .map(|c| Currency::new(c).unwrap())
        .collect();
    let pairs = Pair::universe(&currencies);
    let dates: Vec<NaiveDate> = (2..=6).map(d).collect();

    // Each currency's value in a common numeraire; pair prices are cross rates.
    let value = |c: &Currency, i: usize| match c.code() {
        "AAA" => 1.0,
        "BBB" => 1.0 + 0.01 * i as f64,
        _ => 2.0 - 0.02 * i as f64,
    };
    let source = InMemorySource::from_fn(&pairs, &dates, |p, i| {
        value(&p.base, i) / value(&p.quote, i)
    });

    let window = LookbackWindow { start: d(1), end: d(30) };
    let prices = fetch_price_table(&source, &pairs, window, 4).await.unwrap();
    assert_eq!(prices.len(), 5);

    let returns = compute_log_returns(&prices).unwrap();
    let model = StrengthModel::new(returns, &currencies).unwrap();
    router(AppState::new(model, 20).unwrap())
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn five_day_history_gives_four_slider_positions() {
    let (status, layout) = get(app().await, "/api/layout").await;
    assert_eq!(status, StatusCode::OK);

    let slider = &layout["slider"];
    assert_eq!(slider["min"], 0);
    assert_eq!(slider["max"], 3);
    assert_eq!(slider["value"], serde_json::json!([0, 3]));
    assert_eq!(slider["allow_cross"], false);
    assert_eq!(slider["tooltip"]["always_visible"], true);
    assert_eq!(slider["labels"].as_array().unwrap().len(), 4);
    assert_eq!(slider["marks"]["3"], "2024");
    assert_eq!(layout["heading"], "Currency Relative Strength (Last 20 Years)");
}

#[tokio::test]
async fn full_range_figure_has_one_trace_per_currency_starting_at_zero() {
    let (status, fig) = get(app().await, "/api/figure?start=0&end=3").await;
    assert_eq!(status, StatusCode::OK);

    let traces = fig["data"].as_array().unwrap();
    assert_eq!(traces.len(), 3);
    for (trace, name) in traces.iter().zip(["AAA", "BBB", "CCC"]) {
        assert_eq!(trace["name"], name);
        assert_eq!(trace["x"].as_array().unwrap().len(), 4);
        assert_eq!(trace["y"][0].as_f64(), Some(0.0));
    }
    assert_eq!(
        fig["layout"]["title"]["text"],
        "Currency Strength: Cumulative Change from 2024-09-03 to 2024-09-06"
    );
}

#[tokio::test]
async fn figure_defaults_to_full_range() {
    let (_, explicit) = get(app().await, "/api/figure?start=0&end=3").await;
    let (status, default) = get(app().await, "/api/figure").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(explicit, default);
}

#[tokio::test]
async fn single_point_range_is_flat() {
    let (status, fig) = get(app().await, "/api/figure?start=2&end=2").await;
    assert_eq!(status, StatusCode::OK);
    for trace in fig["data"].as_array().unwrap() {
        assert_eq!(trace["y"], serde_json::json!([0.0]));
        assert_eq!(trace["x"], serde_json::json!(["2024-09-05"]));
    }
}

#[tokio::test]
async fn crossed_or_out_of_range_handles_are_bad_requests() {
    for uri in ["/api/figure?start=3&end=1", "/api/figure?start=0&end=4"] {
        let (status, body) = get(app().await, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].as_str().unwrap().contains("Invalid range"));
    }
}

#[tokio::test]
async fn healthz_reports_loaded_history() {
    let (status, body) = get(app().await, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["trading_days"], 4);
    assert_eq!(body["first_date"], "2024-09-03");
    assert_eq!(body["last_date"], "2024-09-06");
}

#[tokio::test]
async fn index_page_is_embedded() {
    let resp = app()
        .await
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("strength-graph"));
    assert!(html.contains("date-slider"));
}

#[tokio::test]
async fn unknown_asset_is_not_found() {
    let resp = app()
        .await
        .oneshot(Request::builder().uri("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
