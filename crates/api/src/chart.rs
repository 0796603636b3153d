//! Plotly figure for a strength window.
//!
//! The browser renders the JSON produced here with Plotly.js as-is, so field
//! names follow Plotly's figure schema.

use chrono::NaiveDate;
use serde::Serialize;

use strength::Window;

const X_AXIS_TITLE: &str = "Date";
const Y_AXIS_TITLE: &str = "Cumulative Change (Relative to Start Date)";
const GRID_COLOR: &str = "#EBF0F8";

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

/// One line per currency.
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub title: Text,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub paper_bgcolor: &'static str,
    pub plot_bgcolor: &'static str,
    pub hovermode: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: Text,
    pub gridcolor: &'static str,
    pub zerolinecolor: &'static str,
    pub automargin: bool,
}

impl Axis {
    fn titled(title: &str) -> Self {
        Self {
            title: Text { text: title.to_string() },
            gridcolor: GRID_COLOR,
            zerolinecolor: GRID_COLOR,
            automargin: true,
        }
    }
}

/// Chart title naming the literal window bounds.
pub fn window_title(start: NaiveDate, end: NaiveDate) -> String {
    format!("Currency Strength: Cumulative Change from {start} to {end}")
}

impl Figure {
    pub fn from_window(window: &Window) -> Self {
        let table = &window.cumulative;
        let x = table.dates().to_vec();

        let data = table
            .columns()
            .iter()
            .enumerate()
            .map(|(i, currency)| Trace {
                kind: "scatter",
                mode: "lines",
                name: currency.to_string(),
                x: x.clone(),
                y: table.column(i).collect(),
            })
            .collect();

        Self {
            data,
            layout: Layout {
                title: Text {
                    text: window_title(window.start, window.end),
                },
                xaxis: Axis::titled(X_AXIS_TITLE),
                yaxis: Axis::titled(Y_AXIS_TITLE),
                paper_bgcolor: "white",
                plot_bgcolor: "white",
                hovermode: "x unified",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use common::{Currency, StrengthTable};
    use serde_json::json;

    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 4, day).unwrap()
    }

    #[test]
    fn one_trace_per_currency_with_dated_points() {
        let columns = vec![Currency::new("EUR").unwrap(), Currency::new("JPY").unwrap()];
        let cumulative = StrengthTable::from_rows(
            columns,
            vec![(d(1), vec![0.0, 0.0]), (d(2), vec![0.5, -0.25])],
        )
        .unwrap();
        let window = Window {
            start: d(1),
            end: d(2),
            cumulative,
        };

        let fig = serde_json::to_value(Figure::from_window(&window)).unwrap();

        assert_eq!(
            fig["data"][1],
            json!({
                "type": "scatter",
                "mode": "lines",
                "name": "JPY",
                "x": ["2019-04-01", "2019-04-02"],
                "y": [0.0, -0.25],
            })
        );
        assert_eq!(
            fig["layout"]["title"]["text"],
            "Currency Strength: Cumulative Change from 2019-04-01 to 2019-04-02"
        );
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Date");
        assert_eq!(fig["layout"]["yaxis"]["title"]["text"], Y_AXIS_TITLE);
    }
}
