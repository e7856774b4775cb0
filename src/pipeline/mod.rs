//! # Batch Orchestrator
//!
//! Drives source units through the readers, one at a time, and owns the
//! resilience policy of a batch:
//!
//! - every page fetch is retried up to the retry budget
//! - a politeness delay follows every attempt
//! - a run of consecutive failed pages opens the circuit breaker and ends the batch
//! - the accumulated records are checkpointed every `checkpoint_interval` recordings
//! - a final snapshot is always attempted, even after an interrupt or a panic
//!
//! Nothing escapes a batch as an error. Per-unit failures end up in
//! [`BatchStats`] and the way the batch ended in [`StopReason`].

mod config;

pub use config::{PipelineConfig, PipelineConfigBuilder};

use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use indicatif::ProgressBar;
use rig::completion::CompletionModel;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::crawler::{CrawlerConfig, FetchError, PageFetcher};
use crate::error::{Error, Result};
use crate::insight::InsightGenerator;
use crate::question::Question;
use crate::reader::{document, html};
use crate::storage::Storage;
use crate::text::normalize;

/// Why a batch stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Every source unit was processed
    Exhausted,
    /// Too many consecutive units failed
    CircuitOpen,
    /// The shutdown signal fired
    Interrupted,
    /// The batch loop panicked
    Aborted,
}

/// Counters collected during a batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub processed: usize,
    pub recorded: usize,
    pub fetch_failures: usize,
    pub parse_failures: usize,
    pub insights: usize,
    pub checkpoints: usize,
}

/// Result of a batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Records accumulated in source order
    pub questions: Vec<Question>,
    pub stats: BatchStats,
    pub stop: StopReason,
    /// Whether the final snapshot was written
    pub saved: bool,
}

/// Accumulated state of one batch
struct Batch<'a> {
    storage: &'a Storage,
    checkpoint_interval: usize,
    questions: Vec<Question>,
    stats: BatchStats,
    consecutive_failures: u32,
}

impl<'a> Batch<'a> {
    fn new(storage: &'a Storage, checkpoint_interval: usize) -> Self {
        Self {
            storage,
            checkpoint_interval,
            questions: Vec::new(),
            stats: BatchStats::default(),
            consecutive_failures: 0,
        }
    }

    /// Append a completed record, checkpointing on every interval boundary
    async fn record(&mut self, question: Question) {
        self.questions.push(question);
        self.stats.recorded += 1;
        self.consecutive_failures = 0;

        if self.checkpoint_interval > 0 && self.questions.len() % self.checkpoint_interval == 0 {
            self.checkpoint().await;
        }
    }

    /// Count a failed unit and return the current failure streak
    fn fail(&mut self) -> u32 {
        self.consecutive_failures += 1;
        self.consecutive_failures
    }

    async fn checkpoint(&mut self) {
        match self.storage.save(&self.questions).await {
            Ok(()) => {
                self.stats.checkpoints += 1;
                info!(
                    "Checkpoint: saved {} questions to {}",
                    self.questions.len(),
                    self.storage.path().display()
                );
            }
            Err(e) => error!("Checkpoint failed: {}", e),
        }
    }
}

/// Sequential scraping pipeline
pub struct Pipeline<M: CompletionModel> {
    config: PipelineConfig,
    fetcher: PageFetcher,
    storage: Storage,
    insight: Option<InsightGenerator<M>>,
    progress: ProgressBar,
}

impl<M: CompletionModel> Pipeline<M> {
    /// Create a pipeline fetching with default headers and the configured timeout
    pub fn new(config: PipelineConfig, storage: Storage) -> Result<Self> {
        let crawler = CrawlerConfig::builder()
            .request_timeout(config.request_timeout)
            .build();
        Self::with_crawler(config, &crawler, storage)
    }

    /// Create a pipeline with an explicit crawler configuration
    pub fn with_crawler(
        config: PipelineConfig,
        crawler: &CrawlerConfig,
        storage: Storage,
    ) -> Result<Self> {
        Ok(Self {
            config,
            fetcher: PageFetcher::new(crawler)?,
            storage,
            insight: None,
            progress: ProgressBar::hidden(),
        })
    }

    /// Attach an insight generator, used while `insight_enabled` is set
    pub fn with_insight(mut self, generator: InsightGenerator<M>) -> Self {
        self.insight = Some(generator);
        self
    }

    /// Report progress on the given bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Scrape every link until done, the breaker opens, or Ctrl-C is pressed
    pub async fn run_links(&self, links: &[Url]) -> BatchOutcome {
        self.run_links_until(links, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Scrape every link until done, the breaker opens, or `shutdown` resolves
    #[instrument(skip_all, fields(links = links.len()))]
    pub async fn run_links_until<F>(&self, links: &[Url], shutdown: F) -> BatchOutcome
    where
        F: Future<Output = ()>,
    {
        info!("Starting batch of {} links", links.len());
        self.progress.set_length(links.len() as u64);

        let mut batch = Batch::new(&self.storage, self.config.checkpoint_interval);
        let stop = {
            let drive = AssertUnwindSafe(self.drive_links(links, &mut batch)).catch_unwind();
            tokio::select! {
                result = drive => result.unwrap_or_else(|_| {
                    error!("Batch loop panicked, saving what was collected");
                    StopReason::Aborted
                }),
                _ = shutdown => {
                    warn!("Interrupted, saving what was collected");
                    StopReason::Interrupted
                }
            }
        };

        self.finish(batch, stop).await
    }

    /// Record every question block of an extracted document
    #[instrument(skip_all)]
    pub async fn run_document(&self, full_text: &str) -> BatchOutcome {
        let blocks = document::split_blocks(&normalize(full_text)).len();
        let extractions = document::read(full_text);
        info!(
            "Extracted {} questions from {} blocks",
            extractions.len(),
            blocks
        );

        let mut batch = Batch::new(&self.storage, self.config.checkpoint_interval);
        batch.stats.processed = blocks;
        batch.stats.parse_failures = blocks - extractions.len();
        for raw in extractions {
            batch.record(Question::from(raw)).await;
        }

        self.finish(batch, StopReason::Exhausted).await
    }

    async fn drive_links(&self, links: &[Url], batch: &mut Batch<'_>) -> StopReason {
        let threshold = self.config.circuit_breaker_threshold;

        for (index, link) in links.iter().enumerate() {
            self.progress.set_message(link.to_string());
            batch.stats.processed += 1;

            match self.process_link(link, &mut batch.stats).await {
                Ok(question) => {
                    debug!(link = index + 1, "Recorded {}", link);
                    batch.record(question).await;
                }
                Err(e) => {
                    match &e {
                        Error::Fetch(_) => batch.stats.fetch_failures += 1,
                        _ => batch.stats.parse_failures += 1,
                    }
                    warn!(link = index + 1, "Skipping {}: {}", link, e);

                    let streak = batch.fail();
                    if threshold > 0 && streak >= threshold {
                        error!(
                            "Stopping after {} consecutive failures, last at {}",
                            streak, link
                        );
                        self.progress.inc(1);
                        return StopReason::CircuitOpen;
                    }
                }
            }
            self.progress.inc(1);
        }

        StopReason::Exhausted
    }

    /// Fetch, read and enrich one page
    async fn process_link(&self, link: &Url, stats: &mut BatchStats) -> Result<Question> {
        let markup = self.fetch_with_retry(link).await?;
        let question = Question::from(html::read(&markup)?);
        Ok(self.enrich(question, stats).await)
    }

    async fn fetch_with_retry(&self, link: &Url) -> std::result::Result<String, FetchError> {
        let budget = self.config.retry_budget.max(1);
        let mut attempt = 1;
        loop {
            let result = self.fetcher.fetch(link).await;
            tokio::time::sleep(self.config.politeness_delay).await;

            match result {
                Ok(markup) => return Ok(markup),
                Err(e) if attempt < budget => {
                    warn!(attempt, "Fetch of {} failed, retrying: {}", link, e);
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Attach an insight when enabled; failures leave the question as is
    async fn enrich(&self, question: Question, stats: &mut BatchStats) -> Question {
        let generator = match &self.insight {
            Some(generator) if self.config.insight_enabled => generator,
            _ => return question,
        };

        match generator.generate(&question).await {
            Ok(insight) => {
                stats.insights += 1;
                question.with_insight(Some(insight))
            }
            Err(e) => {
                warn!("Insight generation failed: {}", e);
                question
            }
        }
    }

    /// Persist the final snapshot; failure is logged, never raised
    async fn finish(&self, batch: Batch<'_>, stop: StopReason) -> BatchOutcome {
        let saved = match self.storage.save(&batch.questions).await {
            Ok(()) => {
                info!(
                    "Saved {} questions to {}",
                    batch.questions.len(),
                    self.storage.path().display()
                );
                true
            }
            Err(e) => {
                error!("Final save failed: {}", e);
                false
            }
        };
        self.progress.finish_and_clear();

        info!(
            stop = ?stop,
            processed = batch.stats.processed,
            recorded = batch.stats.recorded,
            fetch_failures = batch.stats.fetch_failures,
            parse_failures = batch.stats.parse_failures,
            "Batch finished"
        );

        BatchOutcome {
            questions: batch.questions,
            stats: batch.stats,
            stop,
            saved,
        }
    }
}
