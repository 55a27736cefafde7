use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LaunchwatchError;

// --- Candidate ---

/// A launch as reported by the discovery feed, before any analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub tagline: String,
    /// Empty when the feed has no description.
    pub description: String,
    pub votes: i64,
    /// Canonical listing page on the discovery site.
    pub listing_url: String,
    /// Where the product itself lives. May be a redirecting tracking link.
    pub website_url: String,
    pub thumbnail_url: Option<String>,
    pub topics: Vec<String>,
}

// --- BusinessProblem ---

/// Four-field description of the customer problem a product addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BusinessProblem {
    /// Who specifically experiences this problem. Be concrete about role, company size, or situation.
    #[schemars(length(min = 1, max = 512))]
    pub primary_customer: String,

    /// What job the customer is trying to get done, in their own terms.
    #[schemars(length(min = 1, max = 512))]
    pub core_job: String,

    /// The most painful part of getting that job done today, without this product.
    #[schemars(length(min = 1, max = 512))]
    pub main_pain: String,

    /// A measurable outcome on the customer's side that shows the problem is solved
    /// (e.g. "hours spent on weekly reporting", not "user engagement with the app").
    #[schemars(length(min = 1, max = 512))]
    pub success_metric: String,
}

impl BusinessProblem {
    pub const MAX_FIELD_CHARS: usize = 512;

    /// Enforce that every field is non-blank and within the length bound.
    pub fn validate(&self) -> Result<(), LaunchwatchError> {
        for (field, value) in self.fields() {
            if value.trim().is_empty() {
                return Err(LaunchwatchError::Validation(format!("{field} is empty")));
            }
            let chars = value.chars().count();
            if chars > Self::MAX_FIELD_CHARS {
                return Err(LaunchwatchError::Validation(format!(
                    "{field} is {chars} characters (max {})",
                    Self::MAX_FIELD_CHARS
                )));
            }
        }
        Ok(())
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("primary_customer", &self.primary_customer),
            ("core_job", &self.core_job),
            ("main_pain", &self.main_pain),
            ("success_metric", &self.success_metric),
        ]
    }
}

// --- AnalyzedProduct ---

/// A candidate whose page was captured and whose problem was extracted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedProduct {
    /// Listing page on the discovery site. Identity for de-duplication.
    pub origin_url: String,
    pub product_url: String,
    pub name: String,
    pub problem: BusinessProblem,
}

impl AnalyzedProduct {
    pub fn new(candidate: &Candidate, problem: BusinessProblem) -> Self {
        Self {
            origin_url: candidate.listing_url.clone(),
            product_url: candidate.website_url.clone(),
            name: candidate.name.clone(),
            problem,
        }
    }
}

// --- FilterDecision ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterDecision {
    pub admitted: bool,
    /// Diagnostic only. Never shown to channel readers.
    pub reason: String,
}

impl FilterDecision {
    pub fn admit(reason: impl Into<String>) -> Self {
        Self {
            admitted: true,
            reason: reason.into(),
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            admitted: false,
            reason: reason.into(),
        }
    }
}
