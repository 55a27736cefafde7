mod client;
pub(crate) mod types;

use std::time::Duration;

use anyhow::{anyhow, Result};
use base64::Engine;
use tracing::debug;

use crate::openai::StructuredOutput;
use client::{ClaudeClient, ANTHROPIC_API_URL};
use types::*;

const STRUCTURED_TOOL_NAME: &str = "structured_response";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// =============================================================================
// Claude Agent
// =============================================================================

#[derive(Clone)]
pub struct Claude {
    api_key: String,
    pub(crate) model: String,
    base_url: Option<String>,
    max_tokens: u32,
    timeout: Duration,
}

impl Claude {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn client(&self) -> Result<ClaudeClient> {
        let base_url = self.base_url.as_deref().unwrap_or(ANTHROPIC_API_URL);
        ClaudeClient::new(&self.api_key, base_url, self.timeout)
    }

    /// Send one image to Claude vision and force the reply into `T`'s schema.
    ///
    /// Structured output is obtained by offering a single tool whose input
    /// schema is `T`'s JSON schema and forcing the model to call it. Replies
    /// without a tool call, or whose tool input does not deserialize into `T`,
    /// are errors.
    pub async fn extract_from_image<T: StructuredOutput>(
        &self,
        system_prompt: impl Into<String>,
        image: &[u8],
        mime_type: &str,
        instruction: impl Into<String>,
    ) -> Result<T> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(image);
        let source = ImageSource::base64(mime_type, encoded);

        let mut request = ChatRequest::new(&self.model)
            .system(system_prompt)
            .message(WireMessage::user_with_image(source, instruction))
            .max_tokens(self.max_tokens)
            .temperature(0.0)
            .tool(ToolDefinitionWire {
                name: STRUCTURED_TOOL_NAME.to_string(),
                description: "Record the structured data extracted from the image.".to_string(),
                input_schema: T::tool_schema(),
            });
        request.tool_choice = Some(serde_json::json!({
            "type": "tool",
            "name": STRUCTURED_TOOL_NAME,
        }));

        debug!(
            type_name = %T::type_name(),
            image_bytes = image.len(),
            "Claude vision structured extraction"
        );

        let response = self.client()?.chat(&request).await?;

        let input = response
            .tool_input()
            .ok_or_else(|| anyhow!("No structured output in Claude response"))?;

        serde_json::from_value(input.clone())
            .map_err(|e| anyhow!("Failed to deserialize response: {}", e))
    }
}
