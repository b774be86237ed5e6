pub mod sender;

use crate::model::{CrossoverAlert, NotifyError};
use crate::notifier::Notifier;
use reqwest::Client;
use std::time::Duration;

pub struct TelegramNotifier {
    pub bot_token: String,
    pub chat_id: i64,
    pub api_base_url: String,
    pub client: Client,
    pub send_timeout: Duration,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: i64, api_base_url: &str) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| NotifyError::ApiError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            bot_token,
            chat_id,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            client,
            send_timeout: Duration::from_secs(10),
        })
    }

    pub(crate) fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base_url, self.bot_token, method)
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, alert: &CrossoverAlert) -> Result<(), NotifyError> {
        sender::send_alert(self, alert).await
    }
}
