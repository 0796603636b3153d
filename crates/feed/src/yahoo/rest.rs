use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use chrono_tz::Tz;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use common::{Close, Error, Pair, PriceSource, Result};

const BASE_URL: &str = "https://query2.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance v8 chart API client. No API key required.
pub struct YahooClient {
    base_url: Url,
    http: Client,
}

impl YahooClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at another host serving the same chart API.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid provider URL '{base_url}': {e}")))?;
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { base_url, http })
    }

    /// Chart URL for one symbol. `end` is exclusive, so the last second
    /// requested is midnight at the start of `end`.
    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("provider URL '{}' cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);

        let period1 = start.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        let period2 = end.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
        url.query_pairs_mut()
            .append_pair("period1", &period1.to_string())
            .append_pair("period2", &period2.to_string())
            .append_pair("interval", "1d")
            .append_pair("events", "history");
        Ok(url)
    }
}

#[async_trait]
impl PriceSource for YahooClient {
    async fn fetch_closes(
        &self,
        pair: &Pair,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Close>> {
        let symbol = pair.symbol();
        let url = self.chart_url(&symbol, start, end)?;
        debug!(%symbol, %start, %end, "Fetching daily closes");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| Error::Http(e.to_string()))?;

        if !status.is_success() {
            // Yahoo reports unknown symbols as 404 with a JSON error body
            let message = serde_json::from_str::<ChartResponse>(&body)
                .ok()
                .and_then(|r| r.chart.error)
                .map(|e| format!("HTTP {status}: {}", e.description))
                .unwrap_or_else(|| format!("HTTP {status}: {body}"));
            return Err(Error::Provider { symbol, message });
        }

        let resp: ChartResponse = serde_json::from_str(&body)?;
        let closes = parse_chart(&symbol, resp)?;
        debug!(%symbol, rows = closes.len(), "Fetched daily closes");
        Ok(closes)
    }
}

/// Turn a chart response into dated closes.
///
/// Bar timestamps mark the session open in the instrument's exchange time
/// zone. Each one is converted in that zone before taking the calendar date,
/// so bars keep their session date across daylight-saving changes.
fn parse_chart(symbol: &str, resp: ChartResponse) -> Result<Vec<Close>> {
    let provider_err = |message: String| Error::Provider {
        symbol: symbol.to_string(),
        message,
    };

    let data = match (resp.chart.result, resp.chart.error) {
        (_, Some(err)) => return Err(provider_err(format!("{}: {}", err.code, err.description))),
        (Some(result), None) => result
            .into_iter()
            .next()
            .ok_or_else(|| provider_err("result array is empty".into()))?,
        (None, None) => return Err(provider_err("empty result with no error".into())),
    };

    let zone = data.meta.map(SessionZone::from_meta).unwrap_or_default();
    // A symbol with no trading days in range has neither timestamps nor quotes
    let timestamps = data.timestamp.unwrap_or_default();
    let closes = data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut out: Vec<Close> = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let date = DateTime::from_timestamp(ts, 0)
            .and_then(|dt| zone.session_date(dt))
            .ok_or_else(|| provider_err(format!("invalid timestamp: {ts}")))?;
        let close = closes.get(i).copied().flatten();

        // The live session can appear twice on the final day; keep the later bar
        match out.last_mut() {
            Some(last) if last.date == date => last.close = close.or(last.close),
            Some(last) if last.date > date => {
                return Err(provider_err(format!("timestamps out of order at {date}")))
            }
            _ => out.push(Close { date, close }),
        }
    }
    Ok(out)
}

/// Time zone used to date bars. The named exchange zone is preferred;
/// `gmtoffset` is only the offset in force when the response was built.
#[derive(Debug, Clone, Copy)]
enum SessionZone {
    Named(Tz),
    Fixed(i64),
}

impl Default for SessionZone {
    fn default() -> Self {
        SessionZone::Fixed(0)
    }
}

impl SessionZone {
    fn from_meta(meta: ChartMeta) -> Self {
        match meta
            .exchange_timezone_name
            .as_deref()
            .and_then(|name| name.parse::<Tz>().ok())
        {
            Some(tz) => SessionZone::Named(tz),
            None => SessionZone::Fixed(meta.gmtoffset.unwrap_or(0)),
        }
    }

    fn session_date(self, instant: DateTime<Utc>) -> Option<NaiveDate> {
        match self {
            SessionZone::Named(tz) => Some(instant.with_timezone(&tz).date_naive()),
            SessionZone::Fixed(secs) => {
                let offset = FixedOffset::east_opt(i32::try_from(secs).ok()?)?;
                Some(instant.with_timezone(&offset).date_naive())
            }
        }
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    gmtoffset: Option<i64>,
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}
