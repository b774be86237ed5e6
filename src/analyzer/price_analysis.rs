use crate::analyzer::crossover::detect;
use crate::analyzer::moving_average::smooth;
use crate::model::{CrossoverAlert, CrossoverState, PriceSeries, SignalRow, SmoothingError};

/// Trait defining the interface for a crossover analyzer.
pub trait Analyzer {
    fn analyze(
        &self,
        series: &PriceSeries,
        short_window: usize,
        long_window: usize,
    ) -> Result<CrossoverAnalysis, SmoothingError>;
}

/// Short/long simple moving average crossover analyzer. Stateless.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrossoverAnalyzer;

impl CrossoverAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Analyzer for CrossoverAnalyzer {
    /// Smooths the closes with both windows and classifies the last step.
    fn analyze(
        &self,
        series: &PriceSeries,
        short_window: usize,
        long_window: usize,
    ) -> Result<CrossoverAnalysis, SmoothingError> {
        let short = smooth(series, short_window)?;
        let long = smooth(series, long_window)?;
        let state = detect(&short, &long);

        let rows = series
            .bars()
            .iter()
            .zip(short.iter().zip(long.iter()))
            .map(|(bar, (&short, &long))| SignalRow {
                date: bar.date,
                close: bar.close,
                short,
                long,
            })
            .collect();

        Ok(CrossoverAnalysis {
            state,
            short_window,
            long_window,
            rows,
        })
    }
}

/// Result of one analysis run.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossoverAnalysis {
    pub state: CrossoverState,
    pub short_window: usize,
    pub long_window: usize,
    /// Bars with both moving averages, aligned by position.
    pub rows: Vec<SignalRow>,
}

impl CrossoverAnalysis {
    pub fn latest(&self) -> Option<&SignalRow> {
        self.rows.last()
    }

    /// The last `n` rows (all of them if fewer).
    pub fn tail(&self, n: usize) -> &[SignalRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }

    /// Alert payload for a detected cross, `None` for `NoCross`.
    pub fn alert(&self, symbol: &str) -> Option<CrossoverAlert> {
        if !self.state.is_cross() {
            return None;
        }
        let latest = self.latest()?;
        Some(CrossoverAlert {
            state: self.state,
            symbol: symbol.to_string(),
            date: latest.date,
            close: latest.close,
            short_sma: latest.short?,
            long_sma: latest.long?,
            short_window: self.short_window,
            long_window: self.long_window,
        })
    }
}
