use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::{Currency, Error, Result};

/// Runtime configuration loaded from environment variables at startup.
///
/// Every variable is optional. With none set the dashboard charts the default
/// nine currencies over the last 20 years on `127.0.0.1:8050`.
#[derive(Debug, Clone)]
pub struct Config {
    // Dashboard
    pub dashboard_host: IpAddr,
    pub dashboard_port: u16,

    // Data
    pub currencies: Vec<Currency>,
    pub lookback_years: u32,
    /// Days dropped from the end of the window so a partial latest session
    /// is never fetched.
    pub end_lag_days: u32,
    /// Maximum provider requests in flight during the startup fetch.
    pub fetch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dashboard_host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            dashboard_port: 8050,
            currencies: Currency::defaults(),
            lookback_years: 20,
            end_lag_days: 2,
            fetch_concurrency: 8,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    /// Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // ignore error if .env not present
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let currencies = match lookup("FX_CURRENCIES") {
            Some(raw) => parse_currencies(&raw)?,
            None => defaults.currencies,
        };

        let cfg = Config {
            dashboard_host: parse_or("DASHBOARD_HOST", &lookup, defaults.dashboard_host)?,
            dashboard_port: parse_or("DASHBOARD_PORT", &lookup, defaults.dashboard_port)?,
            currencies,
            lookback_years: parse_or("FX_LOOKBACK_YEARS", &lookup, defaults.lookback_years)?,
            end_lag_days: parse_or("FX_END_LAG_DAYS", &lookup, defaults.end_lag_days)?,
            fetch_concurrency: parse_or(
                "FX_FETCH_CONCURRENCY",
                &lookup,
                defaults.fetch_concurrency,
            )?,
        };

        if cfg.lookback_years == 0 {
            return Err(Error::Config("FX_LOOKBACK_YEARS must be at least 1".into()));
        }
        if cfg.fetch_concurrency == 0 {
            return Err(Error::Config("FX_FETCH_CONCURRENCY must be at least 1".into()));
        }
        Ok(cfg)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.dashboard_host, self.dashboard_port)
    }
}

fn parse_currencies(raw: &str) -> Result<Vec<Currency>> {
    let currencies = raw
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(Currency::new)
        .collect::<Result<Vec<_>>>()?;

    if currencies.len() < 2 {
        return Err(Error::Config(format!(
            "FX_CURRENCIES needs at least two currencies, got '{raw}'"
        )));
    }
    Ok(currencies)
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("{key}='{raw}' is invalid: {e}"))),
        None => Ok(default),
    }
}
