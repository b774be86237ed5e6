use crate::model::{PriceBar, RawBar};
use tracing::debug;

/// Turns raw provider bars into clean, date-ordered bars with one entry per day.
///
/// Missing or unusable closes are dropped. When a date appears twice the later
/// observation wins (the provider appends a live quote for the current session).
pub fn normalize_bars(raw: Vec<RawBar>) -> Vec<PriceBar> {
    let total = raw.len();
    let mut bars: Vec<PriceBar> = raw.into_iter().filter_map(normalize_bar).collect();

    // stable: equal dates keep provider order
    bars.sort_by_key(|b| b.date);

    bars.dedup_by(|next, kept| {
        if next.date == kept.date {
            *kept = *next;
            true
        } else {
            false
        }
    });

    if bars.len() != total {
        debug!("Normalized {} raw bars into {}", total, bars.len());
    }
    bars
}

fn normalize_bar(raw: RawBar) -> Option<PriceBar> {
    let close = raw.close?;
    if !close.is_finite() || close <= 0.0 {
        return None;
    }
    Some(PriceBar {
        date: raw.date,
        close,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(day: u32, close: Option<f64>) -> RawBar {
        RawBar {
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            close,
        }
    }

    #[test]
    fn drops_unusable_closes() {
        let bars = normalize_bars(vec![
            raw(3, Some(10.0)),
            raw(4, None),
            raw(5, Some(0.0)),
            raw(6, Some(f64::NAN)),
            raw(7, Some(11.0)),
        ]);
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![10.0, 11.0]);
    }

    #[test]
    fn sorts_and_keeps_last_duplicate() {
        let bars = normalize_bars(vec![
            raw(5, Some(12.0)),
            raw(3, Some(10.0)),
            raw(5, Some(12.5)),
            raw(4, Some(11.0)),
        ]);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 10.0);
        assert_eq!(bars[1].close, 11.0);
        assert_eq!(bars[2].close, 12.5);
    }
}
