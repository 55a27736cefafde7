use async_trait::async_trait;
use tracing::info;

use launchwatch_common::AnalyzedProduct;

use super::format::{format_product, pack_messages};
use crate::traits::{ChannelPublisher, PublishReport};

/// Dry-run publisher. Builds the messages and logs them instead of sending.
pub struct NoopPublisher;

#[async_trait]
impl ChannelPublisher for NoopPublisher {
    async fn publish(&self, products: &[AnalyzedProduct]) -> PublishReport {
        if products.is_empty() {
            info!("No products to publish");
            return PublishReport::default();
        }

        let messages = pack_messages(products.iter().map(format_product));
        for (i, message) in messages.iter().enumerate() {
            info!(index = i, chars = message.chars().count(), "Dry run message:\n{message}");
        }
        PublishReport {
            messages_skipped: messages.len() as u32,
            ..Default::default()
        }
    }
}
