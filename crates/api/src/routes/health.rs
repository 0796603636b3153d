use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn health_router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}

/// Health check endpoint. Reports the size of the loaded history.
async fn healthz(State(state): State<AppState>) -> Json<Value> {
    let dates = state.model.dates();
    Json(json!({
        "status": "ok",
        "trading_days": dates.len(),
        "first_date": dates.first(),
        "last_date": dates.last(),
        "currencies": state.model.currencies(),
    }))
}
