// Test mocks for the research pipeline.
//
// One mock per trait boundary, each recording its calls so tests can assert
// on how far the loop got:
// - MockSource (CandidateSource): fixed candidate list or a fatal error
// - MockRenderer (PageRenderer): "captures" are the URL bytes; misses per URL
// - MockExtractor (ProblemExtractor): problem derived from the capture; failures per URL
// - MockFilter (ProductFilter): admits by product name; errors per name
// - RecordingPublisher (ChannelPublisher): keeps every published list
//
// Plus `candidate(n)` for building numbered candidates.

use std::collections::HashSet;
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use launchwatch_common::{AnalyzedProduct, BusinessProblem, Candidate, FilterDecision};

use crate::traits::{
    CandidateSource, ChannelPublisher, PageRenderer, ProblemExtractor, ProductFilter, PublishReport,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Candidate `n`: name `c{n}`, website `https://c{n}.example.com`.
pub fn candidate(n: u32) -> Candidate {
    Candidate {
        id: n.to_string(),
        name: format!("c{n}"),
        tagline: format!("Tagline for c{n}"),
        description: String::new(),
        votes: 1000 - i64::from(n),
        listing_url: format!("https://www.producthunt.com/posts/c{n}"),
        website_url: website(n),
        thumbnail_url: None,
        topics: Vec::new(),
    }
}

pub fn website(n: u32) -> String {
    format!("https://c{n}.example.com")
}

pub fn names(products: &[AnalyzedProduct]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// MockSource
// ---------------------------------------------------------------------------

pub struct MockSource {
    result: std::result::Result<Vec<Candidate>, String>,
    calls: Mutex<Vec<(DateTime<Utc>, DateTime<Utc>, u32)>>,
}

impl MockSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            result: Ok(candidates),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(DateTime<Utc>, DateTime<Utc>, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CandidateSource for MockSource {
    async fn candidates(
        &self,
        after: DateTime<Utc>,
        before: DateTime<Utc>,
        limit: u32,
    ) -> Result<Vec<Candidate>> {
        self.calls.lock().unwrap().push((after, before, limit));
        match &self.result {
            Ok(candidates) => Ok(candidates.iter().take(limit as usize).cloned().collect()),
            Err(message) => bail!("MockSource: {message}"),
        }
    }
}

// ---------------------------------------------------------------------------
// MockRenderer
// ---------------------------------------------------------------------------

/// Succeeds for every URL unless told otherwise. The capture is the URL's bytes.
pub struct MockRenderer {
    misses: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            misses: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn miss_on(mut self, url: &str) -> Self {
        self.misses.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageRenderer for MockRenderer {
    async fn render(&self, url: &str) -> Option<Vec<u8>> {
        self.calls.lock().unwrap().push(url.to_string());
        if self.misses.contains(url) {
            None
        } else {
            Some(url.as_bytes().to_vec())
        }
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Reads the URL back out of a `MockRenderer` capture and describes it.
pub struct MockExtractor {
    failures: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self {
            failures: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_on(mut self, url: &str) -> Self {
        self.failures.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProblemExtractor for MockExtractor {
    async fn extract(&self, image: &[u8]) -> Result<BusinessProblem> {
        let url = String::from_utf8_lossy(image).to_string();
        self.calls.lock().unwrap().push(url.clone());
        if self.failures.contains(&url) {
            bail!("MockExtractor: no structured output for {url}");
        }
        Ok(BusinessProblem {
            primary_customer: format!("Customers of {url}"),
            core_job: "Get the job done".to_string(),
            main_pain: "It takes too long".to_string(),
            success_metric: "Hours saved per week".to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// MockFilter
// ---------------------------------------------------------------------------

/// Rejects everything except names registered with `admit`.
pub struct MockFilter {
    admitted: HashSet<String>,
    errors: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockFilter {
    pub fn new() -> Self {
        Self {
            admitted: HashSet::new(),
            errors: HashSet::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn admit(mut self, name: &str) -> Self {
        self.admitted.insert(name.to_string());
        self
    }

    pub fn error_on(mut self, name: &str) -> Self {
        self.errors.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductFilter for MockFilter {
    async fn decide(&self, product: &AnalyzedProduct) -> Result<FilterDecision> {
        self.calls.lock().unwrap().push(product.name.clone());
        if self.errors.contains(&product.name) {
            bail!("MockFilter: model timeout for {}", product.name);
        }
        if self.admitted.contains(&product.name) {
            Ok(FilterDecision::admit("meets all requirements"))
        } else {
            Ok(FilterDecision::reject("no AI indicators"))
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingPublisher
// ---------------------------------------------------------------------------

pub struct RecordingPublisher {
    published: Mutex<Vec<Vec<AnalyzedProduct>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }

    /// Every list passed to `publish`, in call order.
    pub fn published(&self) -> Vec<Vec<AnalyzedProduct>> {
        self.published.lock().unwrap().clone()
    }
}

impl Default for RecordingPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelPublisher for RecordingPublisher {
    async fn publish(&self, products: &[AnalyzedProduct]) -> PublishReport {
        self.published.lock().unwrap().push(products.to_vec());
        PublishReport {
            messages_sent: u32::from(!products.is_empty()),
            ..Default::default()
        }
    }
}
