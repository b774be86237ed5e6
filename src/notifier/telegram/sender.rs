// notifier/telegram/sender.rs

use crate::model::{CrossoverAlert, NotifyError};
use crate::notifier::message::render;
use crate::notifier::telegram::TelegramNotifier;
use tokio::time::timeout;
use tracing::{info, warn};

/// Sends a plain text message through `sendMessage`.
pub async fn send_text(notifier: &TelegramNotifier, text: &str) -> Result<(), NotifyError> {
    let url = notifier.method_url("sendMessage");
    let params = [
        ("chat_id", notifier.chat_id.to_string()),
        ("text", text.to_string()),
    ];

    let response = match timeout(
        notifier.send_timeout,
        notifier.client.post(&url).form(&params).send(),
    )
    .await
    {
        Ok(Ok(resp)) => resp,
        Ok(Err(e)) => {
            warn!("❌ Telegram send() failed: {}", e);
            return Err(NotifyError::ApiError(format!("Send failed: {}", e)));
        }
        Err(_) => {
            warn!("⏳ Telegram send() timed out");
            return Err(NotifyError::Timeout);
        }
    };

    let status = response.status();
    let body = response.text().await.unwrap_or_else(|_| "unknown".into());
    if !status.is_success() {
        warn!("❌ Telegram API responded [{}]: {}", status, body);
        return Err(NotifyError::Unreachable {
            status: status.as_u16(),
        });
    }
    info!("✅ Telegram response [{}]: {}", status, body);
    Ok(())
}

/// Renders and sends a crossover alert.
pub async fn send_alert(
    notifier: &TelegramNotifier,
    alert: &CrossoverAlert,
) -> Result<(), NotifyError> {
    let Some(message) = render(alert).map(|m| m.to_text()) else {
        warn!("No crossover for {}, nothing to send", alert.symbol);
        return Ok(());
    };
    info!("📤 Sending Telegram message:\n{}", message);
    send_text(notifier, &message).await
}
