use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use ai_client::Claude;
use launchwatch_common::{BusinessProblem, LaunchwatchError};

use crate::capture::fit_for_vision;
use crate::traits::ProblemExtractor;

const MAX_TOKENS: u32 = 1024;

const INSTRUCTION: &str = "Analyze this landing page screenshot. Identify the primary customer, \
the core job they are trying to get done, their main pain, and the success metric for this business.";

const SYSTEM_PROMPT: &str = r#"You are a product analyst. You receive a screenshot of a product's landing page and describe the business problem the product addresses.

Fill four fields:
- primary_customer: who buys or uses this. Be concrete about role, team, or company type.
- core_job: the one job the customer hires the product to do.
- main_pain: the one pain that makes the job hard today.
- success_metric: the measurable outcome the customer gets. It must be a result on the customer's side (more, faster, fewer, reduced), never a feature, plan, or price.

success_metric examples:
- Good: "Book 50% more sales meetings", "Cut weekly reporting from 4 hours to 30 minutes"
- Bad: "3 booking pages included", "$9 one-time payment", "Access to premium templates"

Rules:
- Use only what is visible in the screenshot. Do not invent facts.
- Keep each field to one or two professional, concise sentences.

Example (invoice automation tool):
- primary_customer: Finance teams at mid-sized companies processing hundreds of supplier invoices a month.
- core_job: Capture, approve, and pay supplier invoices.
- main_pain: Manual data entry and email approval chains delay payments and cause late fees.
- success_metric: Process invoices in one day instead of a week with near-zero late fees."#;

/// Reads a `BusinessProblem` off a landing page screenshot with Claude vision.
pub struct VisionProblemExtractor {
    claude: Claude,
}

impl VisionProblemExtractor {
    pub fn new(anthropic_api_key: &str, model: &str) -> Self {
        Self::with_claude(Claude::new(anthropic_api_key, model))
    }

    pub fn with_claude(claude: Claude) -> Self {
        Self {
            claude: claude.with_max_tokens(MAX_TOKENS),
        }
    }
}

#[async_trait]
impl ProblemExtractor for VisionProblemExtractor {
    async fn extract(&self, image: &[u8]) -> Result<BusinessProblem> {
        if image.is_empty() {
            return Err(LaunchwatchError::Extraction("screenshot is empty".to_string()).into());
        }

        let image = fit_for_vision(image).map_err(|e| LaunchwatchError::Extraction(format!("{e:#}")))?;

        let problem: BusinessProblem = self
            .claude
            .extract_from_image(SYSTEM_PROMPT, &image, image_media_type(&image), INSTRUCTION)
            .await
            .context("Vision extraction failed")?;

        problem.validate()?;
        debug!(customer = %problem.primary_customer, model = self.claude.model(), "Extracted business problem");
        Ok(problem)
    }
}

/// Media type from magic bytes. Browserless returns PNG unless told otherwise.
fn image_media_type(image: &[u8]) -> &'static str {
    match image {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        _ => "image/png",
    }
}
