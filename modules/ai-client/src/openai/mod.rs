mod client;
pub(crate) mod schema;
pub(crate) mod types;

pub use schema::StructuredOutput;

use std::time::Duration;

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::util::strip_code_blocks;
use client::{OpenAiClient, OPENAI_API_URL};

const STRUCTURED_RESPONSE_NAME: &str = "structured_response";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// =============================================================================
// OpenAi Agent
// =============================================================================

#[derive(Clone)]
pub struct OpenAi {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl OpenAi {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> Result<OpenAiClient> {
        let base_url = self.base_url.as_deref().unwrap_or(OPENAI_API_URL);
        OpenAiClient::new(&self.api_key, base_url, self.timeout)
    }

    /// Type-safe structured output extraction against the configured model.
    pub async fn extract<T: StructuredOutput>(
        &self,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Result<T> {
        let request = types::StructuredRequest {
            model: self.model.clone(),
            messages: vec![
                types::WireMessage::system(system_prompt),
                types::WireMessage::user(user_prompt),
            ],
            temperature: types::supports_temperature(&self.model).then_some(0.0),
            response_format: types::ResponseFormat::strict_schema(
                STRUCTURED_RESPONSE_NAME,
                T::openai_schema(),
            ),
        };

        debug!(type_name = %T::type_name(), model = %self.model, "OpenAI structured extraction");

        let json_str = self.client()?.structured_output(&request).await?;

        serde_json::from_str(strip_code_blocks(&json_str))
            .map_err(|e| anyhow!("Failed to deserialize response: {}", e))
    }
}
