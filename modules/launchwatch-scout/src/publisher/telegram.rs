use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use launchwatch_common::AnalyzedProduct;
use telegram_client::{SendMessage, TelegramClient};

use super::format::{format_product, pack_messages};
use crate::traits::{ChannelPublisher, PublishReport};

/// Posts products to a Telegram channel, best effort per message.
pub struct TelegramPublisher {
    client: TelegramClient,
    channel_id: String,
}

impl TelegramPublisher {
    pub fn new(bot_token: &str, channel_id: &str) -> Result<Self> {
        let client = TelegramClient::new(bot_token).context("Failed to build Telegram client")?;
        Ok(Self::with_client(client, channel_id))
    }

    pub fn with_client(client: TelegramClient, channel_id: &str) -> Self {
        Self {
            client,
            channel_id: channel_id.to_string(),
        }
    }
}

#[async_trait]
impl ChannelPublisher for TelegramPublisher {
    async fn publish(&self, products: &[AnalyzedProduct]) -> PublishReport {
        let mut report = PublishReport::default();
        if products.is_empty() {
            info!("No products to publish");
            return report;
        }

        let messages = pack_messages(products.iter().map(format_product));
        let total = messages.len();

        for (i, text) in messages.into_iter().enumerate() {
            let message = SendMessage::markdown_v2(&self.channel_id, text);
            match self.client.send_message(&message).await {
                Ok(()) => report.messages_sent += 1,
                Err(e) => {
                    warn!(index = i, total, error = %e, "Failed to send Telegram message");
                    report.messages_failed += 1;
                }
            }
        }

        info!(
            products = products.len(),
            sent = report.messages_sent,
            failed = report.messages_failed,
            "Published to Telegram"
        );
        report
    }
}
