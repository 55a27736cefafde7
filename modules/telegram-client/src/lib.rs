pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{ParseMode, SendMessage};

use std::time::Duration;

use types::ApiResponse;

const BASE_URL: &str = "https://api.telegram.org";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TelegramClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_timeout(token, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            token: token.to_string(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Send one message. Succeeds only on a 2xx status with `ok: true`.
    pub async fn send_message(&self, message: &SendMessage) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);

        let resp = self.client.post(&url).json(message).send().await?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(TelegramError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: ApiResponse = serde_json::from_str(&body)?;
        if !api_resp.ok {
            return Err(TelegramError::Rejected(
                api_resp.description.unwrap_or_else(|| "ok=false".to_string()),
            ));
        }

        tracing::debug!(chat_id = %message.chat_id, chars = message.text.chars().count(), "Telegram message sent");
        Ok(())
    }
}
