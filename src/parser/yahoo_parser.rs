// Yahoo Finance chart payload parsing
use crate::model::{ParserError, RawBar};
use crate::utils::timestamp_to_date;
use serde::Deserialize;

pub trait Parser {
    fn parse(&self, payload: &str) -> Result<Vec<RawBar>, ParserError>;
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Default)]
pub struct YahooChartParser;

impl YahooChartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Parser for YahooChartParser {
    /// Decodes a chart response into raw daily bars, one per timestamp.
    fn parse(&self, payload: &str) -> Result<Vec<RawBar>, ParserError> {
        let response: ChartResponse = serde_json::from_str(payload)?;

        if let Some(err) = response.chart.error {
            let message = match err.description {
                Some(desc) => format!("{}: {}", err.code, desc),
                None => err.code,
            };
            return Err(ParserError::Provider(message));
        }

        let result = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ParserError::MissingField("chart.result".into()))?;

        // Empty range: Yahoo omits the timestamp array entirely.
        if result.timestamp.is_empty() {
            return Ok(Vec::new());
        }

        let gmt_offset = result.meta.map(|m| m.gmtoffset).unwrap_or(0);
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .ok_or_else(|| ParserError::MissingField("indicators.quote".into()))?;

        if closes.len() != result.timestamp.len() {
            return Err(ParserError::LengthMismatch {
                timestamps: result.timestamp.len(),
                closes: closes.len(),
            });
        }

        result
            .timestamp
            .iter()
            .zip(closes)
            .map(|(&ts, close)| {
                let date = timestamp_to_date(ts, gmt_offset)
                    .ok_or_else(|| ParserError::MissingField(format!("valid timestamp ({ts})")))?;
                Ok(RawBar { date, close })
            })
            .collect()
    }
}
