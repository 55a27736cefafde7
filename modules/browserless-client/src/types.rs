use serde::Serialize;

/// Body of a Browserless `/screenshot` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotRequest {
    pub url: String,
    pub options: ScreenshotOptions,
    pub goto_options: GotoOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_function: Option<WaitForFunction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_for_timeout: Option<u64>,
    pub viewport: Viewport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Keep going when a wait step times out instead of failing the capture.
    pub best_attempt: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenshotOptions {
    pub full_page: bool,
    #[serde(rename = "type")]
    pub image_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GotoOptions {
    pub wait_until: String,
    /// Milliseconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaitForFunction {
    #[serde(rename = "fn")]
    pub function: String,
    /// Milliseconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl ScreenshotRequest {
    /// Full-page PNG capture that waits for `DOMContentLoaded` only.
    pub fn full_page_png(url: impl Into<String>, navigation_timeout_ms: u64) -> Self {
        Self {
            url: url.into(),
            options: ScreenshotOptions {
                full_page: true,
                image_type: "png".to_string(),
            },
            goto_options: GotoOptions {
                wait_until: "domcontentloaded".to_string(),
                timeout: navigation_timeout_ms,
            },
            wait_for_function: None,
            wait_for_timeout: None,
            viewport: Viewport {
                width: 1920,
                height: 1080,
            },
            user_agent: None,
            best_attempt: false,
        }
    }

    /// Best-effort wait for a JS predicate; a timeout does not fail the capture.
    pub fn settle_on(mut self, predicate: impl Into<String>, timeout_ms: u64) -> Self {
        self.wait_for_function = Some(WaitForFunction {
            function: predicate.into(),
            timeout: timeout_ms,
        });
        self.best_attempt = true;
        self
    }

    pub fn extra_wait(mut self, ms: u64) -> Self {
        self.wait_for_timeout = Some(ms);
        self
    }

    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = Viewport { width, height };
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }
}
