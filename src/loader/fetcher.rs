use crate::config::ProviderConfig;
use crate::loader::traits::SeriesLoader;
use crate::model::{LoaderError, ParserError, PriceSeries, SeriesRequest};
use crate::normalizer::normalize_bars;
use crate::parser::{Parser, YahooChartParser};
use crate::utils::date_to_timestamp;

use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

const SECONDS_PER_DAY: i64 = 86_400;
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Daily bars from the Yahoo Finance chart API.
pub struct YahooLoader {
    client: Client,
    parser: YahooChartParser,
    base_url: String,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl YahooLoader {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, LoaderError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) SmaSniperBot/0.1")
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            parser: YahooChartParser::new(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            max_retries: cfg.max_retries,
            retry_base_delay: Duration::from_millis(cfg.retry_base_delay_ms),
        })
    }

    fn build_url(&self, req: &SeriesRequest) -> String {
        format!("{}/v8/finance/chart/{}", self.base_url, req.symbol.to_uppercase())
    }

    async fn fetch_once(&self, req: &SeriesRequest) -> Result<String, LoaderError> {
        let url = self.build_url(req);
        let period1 = date_to_timestamp(req.start);
        // period2 is exclusive, include the end date itself
        let period2 = date_to_timestamp(req.end) + SECONDS_PER_DAY;

        let response = self
            .client
            .get(&url)
            .query(&[
                ("period1", period1.to_string()),
                ("period2", period2.to_string()),
                ("interval", "1d".to_string()),
                ("events", "history".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LoaderError::NoData {
                symbol: req.symbol.clone(),
            });
        }
        if !status.is_success() {
            return Err(LoaderError::InvalidResponse {
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }

    /// Retries transient failures with jittered exponential backoff.
    async fn fetch_with_retry(&self, req: &SeriesRequest) -> Result<String, LoaderError> {
        let backoff = ExponentialBuilder::default()
            .with_min_delay(self.retry_base_delay)
            .with_max_delay(MAX_RETRY_DELAY)
            .with_max_times(self.max_retries as usize)
            .with_jitter();

        (|| self.fetch_once(req))
            .retry(backoff)
            .sleep(sleep)
            .when(LoaderError::is_transient)
            .notify(|e: &LoaderError, delay: Duration| {
                warn!("Fetch for {} failed ({}), retrying in {:?}", req.symbol, e, delay);
            })
            .await
    }
}

#[async_trait::async_trait]
impl SeriesLoader for YahooLoader {
    async fn load(&self, req: &SeriesRequest) -> Result<PriceSeries, LoaderError> {
        info!(
            "Fetching daily bars for {} ({} .. {})",
            req.symbol, req.start, req.end
        );
        let payload = self.fetch_with_retry(req).await?;
        let raw = match self.parser.parse(&payload) {
            Ok(raw) => raw,
            Err(ParserError::Provider(reason)) => {
                warn!("Provider reported an error for {}: {}", req.symbol, reason);
                return Err(LoaderError::NoData {
                    symbol: req.symbol.clone(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let bars = normalize_bars(raw);

        if bars.is_empty() {
            return Err(LoaderError::NoData {
                symbol: req.symbol.clone(),
            });
        }
        if bars.len() < req.min_bars {
            return Err(LoaderError::InsufficientHistory {
                required: req.min_bars,
                actual: bars.len(),
            });
        }

        info!("Received {} bars for {}", bars.len(), req.symbol);
        Ok(PriceSeries::new(req.symbol.clone(), bars)?)
    }
}
