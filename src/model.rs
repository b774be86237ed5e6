// Core structs: PriceBar, PriceSeries, SignalRow, CrossoverAlert and the error types
use chrono::{Days, NaiveDate};
use thiserror::Error;

/// One trading day: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Bar as it comes out of the provider payload, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBar {
    pub date: NaiveDate,
    pub close: Option<f64>,
}

/// Chronologically ordered daily bars of a single symbol.
///
/// Dates are strictly increasing and every close is positive and finite.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self, SeriesError> {
        for (index, bar) in bars.iter().enumerate() {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(SeriesError::InvalidClose {
                    date: bar.date,
                    close: bar.close,
                });
            }
            if index > 0 && bars[index - 1].date >= bar.date {
                return Err(SeriesError::UnorderedDates {
                    previous: bars[index - 1].date,
                    current: bar.date,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }
}

/// Smoothed values aligned with a `PriceSeries`; `None` marks insufficient history.
pub type SmoothedSeries = Vec<Option<f64>>;

/// One position of the analysed series with both moving averages attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalRow {
    pub date: NaiveDate,
    pub close: f64,
    pub short: Option<f64>,
    pub long: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverState {
    NoCross,
    BullishCross,
    BearishCross,
}

impl CrossoverState {
    pub fn is_cross(self) -> bool {
        !matches!(self, CrossoverState::NoCross)
    }
}

/// Everything a notifier needs to describe a detected crossover.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverAlert {
    pub state: CrossoverState,
    pub symbol: String,
    pub date: NaiveDate,
    pub close: f64,
    pub short_sma: f64,
    pub long_sma: f64,
    pub short_window: usize,
    pub long_window: usize,
}

/// Parameters of a single series fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub symbol: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub min_bars: usize,
}

impl SeriesRequest {
    /// Request ending `today` that reaches back `lookback_days` plus two long
    /// windows of calendar days, so the long average is warmed up.
    pub fn lookback(
        symbol: impl Into<String>,
        today: NaiveDate,
        lookback_days: u64,
        long_window: usize,
    ) -> Self {
        let span = lookback_days.saturating_add((long_window as u64).saturating_mul(2));
        Self {
            symbol: symbol.into(),
            start: today.checked_sub_days(Days::new(span)).unwrap_or(NaiveDate::MIN),
            end: today,
            min_bars: long_window,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SmoothingError {
    #[error("invalid window {window} for series of length {len}")]
    InvalidWindow { window: usize, len: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("dates out of order: {current} does not follow {previous}")]
    UnorderedDates {
        previous: NaiveDate,
        current: NaiveDate,
    },
    #[error("invalid close {close} on {date}")]
    InvalidClose { date: NaiveDate, close: f64 },
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("malformed chart payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("{timestamps} timestamps but {closes} closes")]
    LengthMismatch { timestamps: usize, closes: usize },
}

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("http error: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("unexpected response status {status}")]
    InvalidResponse { status: u16 },
    #[error("no data for {symbol}")]
    NoData { symbol: String },
    #[error("insufficient history: need {required} bars, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },
    #[error(transparent)]
    Parse(#[from] ParserError),
    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl LoaderError {
    /// Failures worth another attempt: transport errors, throttling and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            LoaderError::Http(_) | LoaderError::Timeout => true,
            LoaderError::InvalidResponse { status } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for LoaderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LoaderError::Timeout
        } else {
            LoaderError::Http(e.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("api error: {0}")]
    ApiError(String),
    #[error("notification timed out")]
    Timeout,
    #[error("api responded with status {status}")]
    Unreachable { status: u16 },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Load(#[from] LoaderError),
    #[error("smoothing failed: {0}")]
    Smooth(#[from] SmoothingError),
    #[error("notification failed: {0}")]
    Notify(#[from] NotifyError),
}
