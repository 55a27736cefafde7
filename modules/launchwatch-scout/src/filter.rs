use anyhow::{Context, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ai_client::OpenAi;
use launchwatch_common::{AnalyzedProduct, FilterDecision};

use crate::traits::ProductFilter;

const SYSTEM_PROMPT: &str = r#"You screen newly launched software products for a channel about AI-native businesses.

Admit a product only if ALL three requirements hold:

1. AI is core to the product.
   Pass when the description shows AI or LLM driven functionality: "AI" anywhere (AI-powered, AI-generated, AI agents), a copilot, autonomous agents, generating content (text, images, video, emails, campaigns), or analyzing data to produce recommendations, insights, or coaching.
   Fail when it is plain recording, timers, templates, calendars, data visualization, or rule-based automation.

2. It solves a real problem.
   Pass for productivity, business, finance, health, marketing, sales, software development, or content creation problems.
   Fail for trivial, novelty, or imaginary problems.

3. It could plausibly reach $10K+ monthly recurring revenue.
   Pass for B2B SaaS, consumer subscriptions, marketing and sales tools, developer tools, fintech, health and fitness, content creation.
   Fail when the market is tiny (under a hundred potential customers) or nobody would pay.

Start from passed = true and set it to false as soon as one requirement fails.
Give a one or two sentence reason naming the requirements that passed or failed."#;

/// Model answer for one product.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FilterVerdict {
    /// True only if the product meets every requirement.
    pub passed: bool,
    /// One or two sentences on which requirements were met or missed.
    pub reason: String,
}

#[derive(Serialize)]
struct FilterInput<'a> {
    name: &'a str,
    product_url: &'a str,
    origin_url: &'a str,
    primary_customer: &'a str,
    core_job: &'a str,
    main_pain: &'a str,
    success_metric: &'a str,
}

impl<'a> From<&'a AnalyzedProduct> for FilterInput<'a> {
    fn from(p: &'a AnalyzedProduct) -> Self {
        Self {
            name: &p.name,
            product_url: &p.product_url,
            origin_url: &p.origin_url,
            primary_customer: &p.problem.primary_customer,
            core_job: &p.problem.core_job,
            main_pain: &p.problem.main_pain,
            success_metric: &p.problem.success_metric,
        }
    }
}

/// Admission check backed by an OpenAI structured-output call.
pub struct LlmProductFilter {
    openai: OpenAi,
}

impl LlmProductFilter {
    pub fn new(openai_api_key: &str, model: &str) -> Self {
        Self::with_openai(OpenAi::new(openai_api_key, model))
    }

    pub fn with_openai(openai: OpenAi) -> Self {
        Self { openai }
    }
}

#[async_trait]
impl ProductFilter for LlmProductFilter {
    async fn decide(&self, product: &AnalyzedProduct) -> Result<FilterDecision> {
        let user_prompt = serde_json::to_string(&FilterInput::from(product))?;

        let verdict: FilterVerdict = self
            .openai
            .extract(SYSTEM_PROMPT, user_prompt)
            .await
            .context("Filter call failed")?;

        debug!(
            product = %product.name,
            passed = verdict.passed,
            reason = %verdict.reason,
            "Filter verdict"
        );

        Ok(FilterDecision {
            admitted: verdict.passed,
            reason: verdict.reason,
        })
    }
}
