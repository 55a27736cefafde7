use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{info, warn};

use ai_client::truncate_to_char_boundary;
use browserless_client::{resolve_redirects, BrowserlessClient, ScreenshotRequest};

use crate::traits::PageRenderer;

const PAGE_LOAD_TIMEOUT_MS: u64 = 30_000;
const SETTLE_TIMEOUT_MS: u64 = 5_000;
const LATE_CONTENT_WAIT_MS: u64 = 2_000;
/// Whole-call budget: page load, settle and late-content waits, plus transfer slack.
const RENDER_CALL_TIMEOUT: Duration = Duration::from_secs(60);

const READY_STATE_PREDICATE: &str = "() => document.readyState === 'complete'";
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";
const STEALTH_ARGS: &[&str] = &["--disable-blink-features=AutomationControlled"];

const LOG_URL_CHARS: usize = 80;

/// Full-page PNG captures through a Browserless instance.
pub struct BrowserlessRenderer {
    client: BrowserlessClient,
}

impl BrowserlessRenderer {
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let client = BrowserlessClient::new(base_url, token, RENDER_CALL_TIMEOUT)
            .context("Failed to build Browserless client")?
            .with_launch_args(STEALTH_ARGS.iter().copied());
        Ok(Self { client })
    }

    fn request_for(url: &str) -> ScreenshotRequest {
        ScreenshotRequest::full_page_png(url, PAGE_LOAD_TIMEOUT_MS)
            .settle_on(READY_STATE_PREDICATE, SETTLE_TIMEOUT_MS)
            .extra_wait(LATE_CONTENT_WAIT_MS)
            .viewport(1920, 1080)
            .user_agent(USER_AGENT)
    }
}

#[async_trait]
impl PageRenderer for BrowserlessRenderer {
    async fn render(&self, url: &str) -> Option<Vec<u8>> {
        let target = resolve_redirects(url).await;
        let log_url = truncate_to_char_boundary(&target, LOG_URL_CHARS);

        match self.client.screenshot(&Self::request_for(&target)).await {
            Ok(bytes) => {
                info!(url = log_url, bytes = bytes.len(), "Captured page screenshot");
                Some(bytes)
            }
            Err(e) => {
                warn!(url = log_url, error = %e, "Screenshot failed");
                None
            }
        }
    }
}
