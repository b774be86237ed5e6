pub mod message;
pub mod telegram;

use crate::model::{CrossoverAlert, NotifyError};
use tracing::{info, warn};

pub use telegram::TelegramNotifier;

/// Delivers crossover alerts. Failures are returned, never panicked.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, alert: &CrossoverAlert) -> Result<(), NotifyError>;
}

/// Writes alerts to the log only. Used when no delivery channel is configured.
pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, alert: &CrossoverAlert) -> Result<(), NotifyError> {
        match message::render(alert) {
            Some(message) => info!("🔔 {}\n{}", message.subject, message.body),
            None => warn!("No crossover for {}, nothing to log", alert.symbol),
        }
        Ok(())
    }
}
