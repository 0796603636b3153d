pub mod chart;
mod error;
pub mod routes;
pub mod slider;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::info;

use common::Result;
use strength::StrengthModel;

pub use chart::Figure;
pub use error::ApiError;
pub use slider::SliderSpec;

/// Browser tab title and the stem of the page heading.
pub const PAGE_TITLE: &str = "Currency Relative Strength";

/// Shared application state injected into every route handler.
///
/// Everything here is built once at startup and never mutated, so handlers
/// share it without locks.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<StrengthModel>,
    pub slider: Arc<SliderSpec>,
    pub lookback_years: u32,
}

impl AppState {
    pub fn new(model: StrengthModel, lookback_years: u32) -> Result<Self> {
        let slider = SliderSpec::from_dates(model.dates())?;
        Ok(Self {
            model: Arc::new(model),
            slider: Arc::new(slider),
            lookback_years,
        })
    }
}

/// All dashboard routes with tracing and compression layers applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_router())
        .merge(routes::health_router())
        .merge(routes::static_router())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve the dashboard until the process exits.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Dashboard listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
