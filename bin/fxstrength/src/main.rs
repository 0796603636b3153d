use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use common::{Config, Pair};
use feed::{fetch_price_table, LookbackWindow, YahooClient};
use strength::{compute_log_returns, StrengthModel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env().context("invalid configuration")?;
    let pairs = Pair::universe(&cfg.currencies);
    info!(
        currencies = cfg.currencies.len(),
        pairs = pairs.len(),
        years = cfg.lookback_years,
        "FX strength dashboard starting"
    );

    // ── Price history ─────────────────────────────────────────────────────────
    let today = chrono::Local::now().date_naive();
    let window = LookbackWindow::ending_today(cfg.lookback_years, cfg.end_lag_days, today)?;
    let client = YahooClient::new()?;
    let prices = fetch_price_table(&client, &pairs, window, cfg.fetch_concurrency)
        .await
        .context("failed to load price history")?;

    // ── Strength model ────────────────────────────────────────────────────────
    let returns = compute_log_returns(&prices)?;
    let model = StrengthModel::new(returns, &cfg.currencies)
        .context("no usable trading days in the price history")?;
    let strength = model.full_strength()?;
    info!(
        trading_days = strength.len(),
        first = ?strength.dates().first(),
        last = ?strength.dates().last(),
        "Strength history ready"
    );

    // ── Dashboard ─────────────────────────────────────────────────────────────
    let state = api::AppState::new(model, cfg.lookback_years)?;
    api::serve(state, cfg.bind_addr())
        .await
        .context("dashboard server failed")?;
    Ok(())
}
