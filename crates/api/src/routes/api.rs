use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::{chart::Figure, error::ApiError, slider::SliderSpec, AppState};

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/layout", get(get_layout))
        .route("/api/figure", get(get_figure))
}

// ─── Layout ───────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PageLayout {
    title: &'static str,
    heading: String,
    slider: SliderSpec,
}

async fn get_layout(State(state): State<AppState>) -> Json<PageLayout> {
    Json(PageLayout {
        title: crate::PAGE_TITLE,
        heading: format!(
            "{} (Last {} Years)",
            crate::PAGE_TITLE,
            state.lookback_years
        ),
        slider: state.slider.as_ref().clone(),
    })
}

// ─── Figure ───────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FigureQuery {
    start: Option<usize>,
    end: Option<usize>,
}

/// Recompute the chart for one slider position. Runs synchronously on the
/// serving thread; every committed slider change is one full recompute.
async fn get_figure(
    State(state): State<AppState>,
    Query(q): Query<FigureQuery>,
) -> Result<Json<Figure>, ApiError> {
    let start = q.start.unwrap_or(state.slider.min);
    let end = q.end.unwrap_or(state.slider.max);

    let window = state.model.window(start, end)?;
    Ok(Json(Figure::from_window(&window)))
}
