use crate::model::{PriceSeries, SmoothedSeries, SmoothingError};

/// Simple moving average of the closing prices of `series`.
///
/// The output has one entry per bar. Entry `i` is `Some(mean)` of the closes at
/// `[i + 1 - window ..= i]` once `i >= window - 1`, and `None` before that.
pub fn smooth(series: &PriceSeries, window: usize) -> Result<SmoothedSeries, SmoothingError> {
    smooth_values(&series.closes(), window)
}

/// Same as [`smooth`] over a bare slice of values.
pub fn smooth_values(data: &[f64], window: usize) -> Result<SmoothedSeries, SmoothingError> {
    if window == 0 || window > data.len() {
        return Err(SmoothingError::InvalidWindow {
            window,
            len: data.len(),
        });
    }

    let mut result: SmoothedSeries = vec![None; window - 1];
    result.extend(
        data.windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    Ok(result)
}
