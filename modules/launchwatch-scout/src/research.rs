use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use tracing::{info, warn};

use ai_client::truncate_to_char_boundary;
use launchwatch_common::{AnalyzedProduct, Candidate};

use crate::selection::Selection;
use crate::stats::RunStats;
use crate::traits::{CandidateSource, ChannelPublisher, PageRenderer, ProblemExtractor, ProductFilter};

const LOG_URL_CHARS: usize = 80;

/// `[date 00:00 UTC, date+1 00:00 UTC)`.
pub fn launch_window(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

/// One daily research run: fetch, analyze, filter, select, publish.
pub struct ProductResearch {
    source: Arc<dyn CandidateSource>,
    renderer: Arc<dyn PageRenderer>,
    extractor: Arc<dyn ProblemExtractor>,
    filter: Arc<dyn ProductFilter>,
    publisher: Arc<dyn ChannelPublisher>,
    quota: usize,
    candidate_limit: u32,
}

impl ProductResearch {
    pub fn new(
        source: Arc<dyn CandidateSource>,
        renderer: Arc<dyn PageRenderer>,
        extractor: Arc<dyn ProblemExtractor>,
        filter: Arc<dyn ProductFilter>,
        publisher: Arc<dyn ChannelPublisher>,
        quota: usize,
        candidate_limit: u32,
    ) -> Self {
        Self {
            source,
            renderer,
            extractor,
            filter,
            publisher,
            quota,
            candidate_limit,
        }
    }

    /// Only a candidate-source failure is an error. Everything per item is
    /// logged, counted, and skipped.
    pub async fn run(&self, date: NaiveDate) -> Result<RunStats> {
        let mut stats = RunStats::default();
        let (after, before) = launch_window(date);

        info!(%date, quota = self.quota, limit = self.candidate_limit, "Starting research run");

        let candidates = self
            .source
            .candidates(after, before, self.candidate_limit)
            .await
            .context("Candidate source failed")?;
        stats.candidates_fetched = candidates.len() as u32;

        let mut selection = Selection::new(self.quota);

        for candidate in &candidates {
            if selection.is_full() {
                info!(admitted = selection.admitted_count(), "Quota reached, stopping early");
                break;
            }
            stats.candidates_examined += 1;

            let Some(product) = self.analyze(candidate, &mut stats).await else {
                continue;
            };
            selection.record_analyzed(&product);

            match self.filter.decide(&product).await {
                Ok(decision) if decision.admitted => {
                    info!(product = %product.name, "Product admitted");
                    stats.admitted += 1;
                    selection.admit(product);
                }
                Ok(_) => {
                    info!(product = %product.name, "Product rejected by filter");
                    stats.rejected += 1;
                }
                Err(e) => {
                    warn!(product = %product.name, error = %e, "Filter failed, treating as rejected");
                    stats.filter_errors += 1;
                }
            }
        }

        let outcome = selection.finish();
        stats.backfilled = outcome.backfilled as u32;
        stats.published = outcome.products.len() as u32;
        if outcome.backfilled > 0 {
            info!(
                admitted = outcome.admitted,
                backfilled = outcome.backfilled,
                "Backfilled from top analyzed products"
            );
        }

        let report = self.publisher.publish(&outcome.products).await;
        stats.messages_sent = report.messages_sent;
        stats.messages_failed = report.messages_failed;
        stats.messages_skipped = report.messages_skipped;

        Ok(stats)
    }

    /// Render then extract. `None` when either step fails.
    async fn analyze(&self, candidate: &Candidate, stats: &mut RunStats) -> Option<AnalyzedProduct> {
        let url = truncate_to_char_boundary(&candidate.website_url, LOG_URL_CHARS);

        let Some(image) = self.renderer.render(&candidate.website_url).await else {
            warn!(name = %candidate.name, url, "No screenshot, skipping candidate");
            stats.render_misses += 1;
            return None;
        };

        match self.extractor.extract(&image).await {
            Ok(problem) => Some(AnalyzedProduct::new(candidate, problem)),
            Err(e) => {
                warn!(name = %candidate.name, url, error = %e, "Extraction failed, skipping candidate");
                stats.extraction_failures += 1;
                None
            }
        }
    }
}
