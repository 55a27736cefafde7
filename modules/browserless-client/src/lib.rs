pub mod error;
pub mod types;

pub use error::{BrowserlessError, Result};
pub use types::{GotoOptions, ScreenshotOptions, ScreenshotRequest, Viewport, WaitForFunction};

use std::time::Duration;

use tracing::debug;

const REDIRECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BrowserlessClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    launch_args: Vec<String>,
}

impl BrowserlessClient {
    /// `timeout` bounds a whole screenshot call, so it must exceed the page budget.
    pub fn new(base_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
            launch_args: Vec::new(),
        })
    }

    /// Chrome flags passed through the `launch` query parameter.
    pub fn with_launch_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.launch_args = args.into_iter().map(Into::into).collect();
        self
    }

    fn query(&self) -> Result<Vec<(&'static str, String)>> {
        let mut query = Vec::new();
        if let Some(ref token) = self.token {
            query.push(("token", token.clone()));
        }
        if !self.launch_args.is_empty() {
            let launch = serde_json::json!({ "args": self.launch_args });
            query.push(("launch", serde_json::to_string(&launch)?));
        }
        Ok(query)
    }

    /// Capture a screenshot via the Browserless /screenshot endpoint.
    ///
    /// Returns the raw image bytes. An empty body is treated as an error.
    pub async fn screenshot(&self, request: &ScreenshotRequest) -> Result<Vec<u8>> {
        let endpoint = format!("{}/screenshot", self.base_url);

        let resp = self
            .client
            .post(&endpoint)
            .query(&self.query()?)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(BrowserlessError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.is_empty() {
            return Err(BrowserlessError::EmptyBody(request.url.clone()));
        }

        debug!(bytes = bytes.len(), "Browserless screenshot received");
        Ok(bytes.to_vec())
    }
}

/// Follow HTTP redirects with a plain GET and return the final URL.
///
/// Any failure yields the input unchanged so the caller can still try it.
pub async fn resolve_redirects(url: &str) -> String {
    let client = match reqwest::Client::builder()
        .timeout(REDIRECT_TIMEOUT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
    {
        Ok(c) => c,
        Err(_) => return url.to_string(),
    };

    match client.get(url).send().await {
        Ok(resp) => resp.url().to_string(),
        Err(e) => {
            debug!(error = %e, "Redirect resolution failed, using original URL");
            url.to_string()
        }
    }
}
