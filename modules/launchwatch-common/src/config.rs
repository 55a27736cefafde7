use anyhow::{anyhow, Context, Result};

const DEFAULT_BROWSERLESS_URL: &str = "http://localhost:3000";
const DEFAULT_EXTRACTION_MODEL: &str = "claude-haiku-4-5-20251001";
const DEFAULT_FILTER_MODEL: &str = "gpt-5-mini";
const DEFAULT_PRODUCT_QUOTA: usize = 3;
const DEFAULT_CANDIDATE_LIMIT: u32 = 20;

/// Run configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Discovery feed
    pub product_hunt_token: String,

    // AI providers
    pub anthropic_api_key: String,
    pub openai_api_key: String,
    pub extraction_model: String,
    pub filter_model: String,

    // Publishing
    pub telegram_bot_token: Option<String>,
    pub telegram_channel_id: Option<String>,

    // Browser (Browserless for page capture)
    pub browserless_url: String,
    pub browserless_token: Option<String>,

    // Selection
    pub product_quota: usize,
    pub candidate_limit: u32,

    pub debug: bool,
}

impl Config {
    /// Read the process environment. The binary loads `.env` before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            get(key).ok_or_else(|| anyhow!("{key} environment variable is required"))
        };

        let product_quota = match get("PRODUCT_QUOTA") {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("PRODUCT_QUOTA must be a positive integer, got {v:?}"))?,
            None => DEFAULT_PRODUCT_QUOTA,
        };
        if product_quota == 0 {
            return Err(anyhow!("PRODUCT_QUOTA must be at least 1"));
        }

        let candidate_limit = match get("CANDIDATE_LIMIT") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .with_context(|| format!("CANDIDATE_LIMIT must be a positive integer, got {v:?}"))?,
            None => DEFAULT_CANDIDATE_LIMIT,
        };

        Ok(Self {
            product_hunt_token: required("PRODUCT_HUNT_TOKEN")?,
            anthropic_api_key: required("ANTHROPIC_API_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
            extraction_model: get("EXTRACTION_MODEL")
                .unwrap_or_else(|| DEFAULT_EXTRACTION_MODEL.to_string()),
            filter_model: get("FILTER_MODEL").unwrap_or_else(|| DEFAULT_FILTER_MODEL.to_string()),
            telegram_bot_token: get("TELEGRAM_BOT_TOKEN"),
            telegram_channel_id: get("TELEGRAM_CHANNEL_ID"),
            browserless_url: get("BROWSERLESS_URL")
                .unwrap_or_else(|| DEFAULT_BROWSERLESS_URL.to_string()),
            browserless_token: get("BROWSERLESS_TOKEN"),
            product_quota,
            candidate_limit,
            debug: get("DEBUG").map(|v| parse_flag(&v)).unwrap_or(false),
        })
    }

    /// Bot token and channel id, both required when actually publishing.
    pub fn telegram(&self) -> Result<(&str, &str)> {
        let token = self
            .telegram_bot_token
            .as_deref()
            .ok_or_else(|| anyhow!("TELEGRAM_BOT_TOKEN environment variable is required"))?;
        let channel = self
            .telegram_channel_id
            .as_deref()
            .ok_or_else(|| anyhow!("TELEGRAM_CHANNEL_ID environment variable is required"))?;
        Ok((token, channel))
    }

    pub fn log_redacted(&self) {
        fn preview(val: &str) -> String {
            let head: String = val.chars().take(5).collect();
            format!("{}...({} chars)", head, val.chars().count())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) => preview(v),
                None => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  PRODUCT_HUNT_TOKEN: {}", preview(&self.product_hunt_token));
        tracing::info!("  ANTHROPIC_API_KEY: {}", preview(&self.anthropic_api_key));
        tracing::info!("  OPENAI_API_KEY: {}", preview(&self.openai_api_key));
        tracing::info!("  TELEGRAM_BOT_TOKEN: {}", preview_opt(&self.telegram_bot_token));
        tracing::info!(
            "  TELEGRAM_CHANNEL_ID: {}",
            self.telegram_channel_id.as_deref().unwrap_or("<not set>")
        );
        tracing::info!("  BROWSERLESS_URL: {}", self.browserless_url);
        tracing::info!("  BROWSERLESS_TOKEN: {}", preview_opt(&self.browserless_token));
        tracing::info!(
            extraction_model = %self.extraction_model,
            filter_model = %self.filter_model,
            quota = self.product_quota,
            candidate_limit = self.candidate_limit,
            "  Run parameters"
        );
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
