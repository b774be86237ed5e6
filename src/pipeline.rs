use crate::analyzer::{Analyzer, CrossoverAnalyzer};
use crate::config::AppConfig;
use crate::loader::SeriesLoader;
use crate::model::{CrossoverAlert, CrossoverState, PipelineError, SeriesRequest};
use crate::notifier::Notifier;
use chrono::NaiveDate;
use tracing::info;

/// Number of trailing rows written to the log after each analysis.
const TAIL_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub state: CrossoverState,
    pub alert: Option<CrossoverAlert>,
    pub notified: bool,
}

/// Loads the configured symbol, looks for a crossover on the latest bar and
/// notifies when one is found.
pub async fn process_symbol(
    config: &AppConfig,
    loader: &dyn SeriesLoader,
    notifier: &dyn Notifier,
    today: NaiveDate,
) -> Result<RunOutcome, PipelineError> {
    info!("Processing symbol: {}", config.symbol);
    let request = SeriesRequest::lookback(
        config.symbol.clone(),
        today,
        config.lookback_days,
        config.long_window,
    );

    let series = loader.load(&request).await?;
    info!("Analyzing {} bars for {}", series.len(), series.symbol());

    let analysis =
        CrossoverAnalyzer::new().analyze(&series, config.short_window, config.long_window)?;

    info!("Last {} rows:", TAIL_ROWS);
    for row in analysis.tail(TAIL_ROWS) {
        info!(
            "{} | close {:.2} | SMA{} {} | SMA{} {}",
            row.date,
            row.close,
            config.short_window,
            fmt_sma(row.short),
            config.long_window,
            fmt_sma(row.long),
        );
    }

    let Some(alert) = analysis.alert(series.symbol()) else {
        info!("No SMA crossover detected for {} today.", config.symbol);
        if analysis.tail(2).first().is_none_or(|row| row.long.is_none()) {
            info!("Not enough smoothed history to compare the last two bars");
        }
        return Ok(RunOutcome {
            state: analysis.state,
            alert: None,
            notified: false,
        });
    };

    info!("{:?} detected for {} on {}", alert.state, alert.symbol, alert.date);
    notifier.notify(&alert).await?;
    info!("Alert delivered for {}", alert.symbol);

    Ok(RunOutcome {
        state: alert.state,
        alert: Some(alert),
        notified: true,
    })
}

fn fmt_sma(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::model::{LoaderError, NotifyError, PriceBar, PriceSeries};
    use chrono::Days;
    use std::sync::Mutex;

    struct FixedLoader {
        closes: Vec<f64>,
        requests: Mutex<Vec<SeriesRequest>>,
    }

    impl FixedLoader {
        fn new(closes: &[f64]) -> Self {
            Self {
                closes: closes.to_vec(),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl SeriesLoader for FixedLoader {
        async fn load(&self, req: &SeriesRequest) -> Result<PriceSeries, LoaderError> {
            self.requests.lock().unwrap().push(req.clone());
            if self.closes.len() < req.min_bars {
                return Err(LoaderError::InsufficientHistory {
                    required: req.min_bars,
                    actual: self.closes.len(),
                });
            }
            let start = req.end - Days::new(self.closes.len() as u64 - 1);
            let bars = self
                .closes
                .iter()
                .enumerate()
                .map(|(i, &close)| PriceBar {
                    date: start + Days::new(i as u64),
                    close,
                })
                .collect();
            Ok(PriceSeries::new(req.symbol.clone(), bars)?)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<CrossoverAlert>>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, alert: &CrossoverAlert) -> Result<(), NotifyError> {
            if self.fail {
                return Err(NotifyError::Unreachable { status: 502 });
            }
            self.sent.lock().unwrap().push(alert.clone());
            Ok(())
        }
    }

    fn config(short: usize, long: usize) -> AppConfig {
        AppConfig {
            symbol: "MSFT".into(),
            short_window: short,
            long_window: long,
            lookback_days: 30,
            provider: ProviderConfig::default(),
            telegram: None,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
    }

    #[tokio::test]
    async fn bullish_cross_is_notified_once() {
        let loader = FixedLoader::new(&[10.0, 9.0, 8.0, 7.0, 11.0]);
        let notifier = RecordingNotifier::default();

        let outcome = process_symbol(&config(2, 4), &loader, &notifier, today())
            .await
            .unwrap();

        assert_eq!(outcome.state, CrossoverState::BullishCross);
        assert!(outcome.notified);
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].symbol, "MSFT");
        assert_eq!(sent[0].close, 11.0);
        assert_eq!(sent[0].date, today());
        assert_eq!(Some(sent[0].clone()), outcome.alert);
    }

    #[tokio::test]
    async fn no_cross_skips_notifier() {
        let loader = FixedLoader::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let notifier = RecordingNotifier::default();

        let outcome = process_symbol(&config(2, 3), &loader, &notifier, today())
            .await
            .unwrap();

        assert_eq!(outcome.state, CrossoverState::NoCross);
        assert!(!outcome.notified);
        assert!(outcome.alert.is_none());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn request_spans_lookback_and_warmup() {
        let loader = FixedLoader::new(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let notifier = RecordingNotifier::default();
        process_symbol(&config(2, 3), &loader, &notifier, today())
            .await
            .unwrap();

        let requests = loader.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].symbol, "MSFT");
        assert_eq!(requests[0].end, today());
        assert_eq!(requests[0].start, today() - Days::new(36));
        assert_eq!(requests[0].min_bars, 3);
    }

    #[tokio::test]
    async fn short_history_never_reaches_the_core() {
        let loader = FixedLoader::new(&[1.0, 2.0]);
        let notifier = RecordingNotifier::default();

        let err = process_symbol(&config(2, 3), &loader, &notifier, today())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Load(LoaderError::InsufficientHistory { required: 3, actual: 2 })
        ));
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_reported() {
        let loader = FixedLoader::new(&[7.0, 8.0, 9.0, 10.0, 6.0]);
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };

        let err = process_symbol(&config(2, 4), &loader, &notifier, today())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Notify(NotifyError::Unreachable { status: 502 })
        ));
    }
}
