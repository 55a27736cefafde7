// Trait abstractions for the research pipeline's external dependencies.
//
// One trait per boundary so the orchestration loop can be driven entirely
// by the mocks in `testing`: no network, no browser, no model calls.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use launchwatch_common::{AnalyzedProduct, BusinessProblem, Candidate, FilterDecision};

// ---------------------------------------------------------------------------
// CandidateSource
// ---------------------------------------------------------------------------

#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Launches in `[after, before)`, most popular first, at most `limit`.
    async fn candidates(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Candidate>>;
}

// ---------------------------------------------------------------------------
// PageRenderer
// ---------------------------------------------------------------------------

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Full-page capture of `url`. `None` on any failure, which is logged
    /// by the implementation.
    async fn render(&self, url: &str) -> Option<Vec<u8>>;
}

// ---------------------------------------------------------------------------
// ProblemExtractor
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ProblemExtractor: Send + Sync {
    /// Read a validated `BusinessProblem` off a page capture.
    async fn extract(&self, image: &[u8]) -> Result<BusinessProblem>;
}

// ---------------------------------------------------------------------------
// ProductFilter
// ---------------------------------------------------------------------------

#[async_trait]
pub trait ProductFilter: Send + Sync {
    async fn decide(&self, product: &AnalyzedProduct) -> Result<FilterDecision>;
}

// ---------------------------------------------------------------------------
// ChannelPublisher
// ---------------------------------------------------------------------------

/// Outcome of one publish call. Publishing never fails as a whole.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PublishReport {
    pub messages_sent: u32,
    pub messages_failed: u32,
    /// Messages built but deliberately not sent (dry run).
    pub messages_skipped: u32,
}

#[async_trait]
pub trait ChannelPublisher: Send + Sync {
    async fn publish(&self, products: &[AnalyzedProduct]) -> PublishReport;
}
