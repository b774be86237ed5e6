// Alert text rendering
use crate::model::{CrossoverAlert, CrossoverState};

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    /// Subject and body as a single chat message.
    pub fn to_text(&self) -> String {
        format!("{}\n\n{}", self.subject, self.body)
    }
}

/// Subject and body for a cross. `None` for `NoCross`, which has nothing to announce.
pub fn render(alert: &CrossoverAlert) -> Option<AlertMessage> {
    let (emoji, label, direction, trend) = match alert.state {
        CrossoverState::BullishCross => ("📈", "BULLISH", "above", "upward"),
        CrossoverState::BearishCross => ("📉", "BEARISH", "below", "downward"),
        CrossoverState::NoCross => return None,
    };

    let subject = format!(
        "{} {} CROSS ALERT: {} {}D SMA crossed {} {}D SMA!",
        emoji, label, alert.symbol, alert.short_window, direction, alert.long_window
    );

    let body = format!(
        "A {} crossover was detected for {} on {}.\n\
         The {}-day SMA crossed {} the {}-day SMA.\n\n\
         Close: ${:.2}\n\
         {}-day SMA: ${:.2}\n\
         {}-day SMA: ${:.2}\n\n\
         This may indicate a potential {} trend.\n\
         Always do your own analysis before trading.",
        label.to_lowercase(),
        alert.symbol,
        alert.date,
        alert.short_window,
        direction,
        alert.long_window,
        alert.close,
        alert.short_window,
        alert.short_sma,
        alert.long_window,
        alert.long_sma,
        trend,
    );

    Some(AlertMessage { subject, body })
}
