//! # Quizforge CLI Application
//!
//! Command-line front end of the question extraction pipeline.
//!
//! ## Key Components
//!
//! - CLI argument parsing with clap
//! - Subcommands:
//!   - `scrape`: fetch every question page linked from a CSV export
//!   - `convert`: cut the questions out of a PDF or text document
//!
//! Both subcommands write the collected questions as one JSON snapshot.

mod telemetry;

use anyhow::anyhow;
use clap::{Args, CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use quizforge::crawler::CrawlerConfig;
use quizforge::insight::InsightGenerator;
use quizforge::model::{self, GeminiModel};
use quizforge::pipeline::{BatchOutcome, Pipeline, PipelineConfig};
use quizforge::storage::Storage;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{instrument, warn};

#[derive(Parser)]
#[command(author, version, about = "Extract exam questions into a JSON question bank", long_about = None)]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scrape the question pages linked from a CSV file
    Scrape(ScrapeArgs),

    /// Convert a PDF or text document of questions to JSON
    Convert(ConvertArgs),
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// CSV file with page links in its third column
    #[arg(required = true)]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "questions.json")]
    output: PathBuf,

    /// Fetch attempts per page
    #[arg(short, long, default_value = "3")]
    retries: u32,

    /// Delay between failed attempts in milliseconds
    #[arg(long, default_value = "2000")]
    retry_delay_ms: u64,

    /// Delay after every request in milliseconds
    #[arg(short, long, default_value = "2000")]
    delay_ms: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value = "10")]
    timeout_secs: u64,

    /// Save a checkpoint every N recorded questions (0 disables)
    #[arg(long, default_value = "10")]
    checkpoint_every: usize,

    /// Stop after N consecutive failed pages (0 disables)
    #[arg(long, default_value = "5")]
    max_failures: u32,

    /// Do not request AI explanations
    #[arg(long)]
    no_insight: bool,

    /// Gemini model used for explanations
    #[arg(short, long, default_value = model::DEFAULT_MODEL)]
    model: String,

    /// Override the browser User-Agent sent with every request
    #[arg(long)]
    user_agent: Option<String>,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// PDF or plain-text document
    #[arg(required = true)]
    input: PathBuf,

    /// Output JSON file
    #[arg(short, long, default_value = "questions.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _telemetry = telemetry::init(cli.log_file.as_deref())?;

    match cli.command {
        Some(Commands::Scrape(args)) => scrape_command(args).await?,
        Some(Commands::Convert(args)) => convert_command(args).await?,
        None => Cli::command().print_help()?,
    }

    Ok(())
}

#[instrument]
async fn scrape_command(args: ScrapeArgs) -> anyhow::Result<()> {
    let links = quizforge::crawler::read_links(&args.input)?;
    println!("Found {} links in {}", links.len(), args.input.display());

    let config = PipelineConfig::builder()
        .retry_budget(args.retries)
        .retry_delay(Duration::from_millis(args.retry_delay_ms))
        .politeness_delay(Duration::from_millis(args.delay_ms))
        .request_timeout(Duration::from_secs(args.timeout_secs))
        .checkpoint_interval(args.checkpoint_every)
        .circuit_breaker_threshold(args.max_failures)
        .insight_enabled(!args.no_insight)
        .build();

    let mut crawler = CrawlerConfig::builder().request_timeout(config.request_timeout);
    if let Some(user_agent) = args.user_agent {
        crawler = crawler.user_agent(user_agent);
    }

    let mut pipeline: Pipeline<GeminiModel> =
        Pipeline::with_crawler(config, &crawler.build(), Storage::at(&args.output))?;

    if pipeline.config().insight_enabled {
        match model::gemini_from_env(&args.model, model::DEFAULT_REQUESTS_PER_MINUTE) {
            Some(gemini) => pipeline = pipeline.with_insight(InsightGenerator::new(gemini)),
            None => warn!("{} is not set, AI insights are disabled", model::API_KEY_VAR),
        }
    }

    let progress_bar = ProgressBar::new(links.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({eta}) {msg}")?
            .progress_chars("##-"),
    );

    let start_time = std::time::Instant::now();
    let outcome = pipeline.with_progress(progress_bar).run_links(&links).await;
    report(&outcome, &args.output);
    println!("Finished in {:.2?}", start_time.elapsed());

    ensure_saved(&outcome, &args.output)
}

#[instrument]
async fn convert_command(args: ConvertArgs) -> anyhow::Result<()> {
    let text = quizforge::reader::extract::document_text(&args.input).await?;

    let pipeline: Pipeline<GeminiModel> =
        Pipeline::new(PipelineConfig::default(), Storage::at(&args.output))?;
    let outcome = pipeline.run_document(&text).await;
    report(&outcome, &args.output);

    ensure_saved(&outcome, &args.output)
}

fn report(outcome: &BatchOutcome, output: &std::path::Path) {
    let stats = &outcome.stats;
    println!("Stopped: {:?}", outcome.stop);
    println!(
        "Recorded {} of {} units ({} fetch failures, {} parse failures)",
        stats.recorded, stats.processed, stats.fetch_failures, stats.parse_failures
    );
    if stats.insights > 0 {
        println!("Generated {} AI explanations", stats.insights);
    }
    if outcome.saved {
        println!(
            "Saved {} questions to {}",
            outcome.questions.len(),
            output.display()
        );
    }
}

fn ensure_saved(outcome: &BatchOutcome, output: &std::path::Path) -> anyhow::Result<()> {
    if outcome.saved {
        Ok(())
    } else {
        Err(anyhow!(
            "could not save {} questions to {}",
            outcome.questions.len(),
            output.display()
        ))
    }
}
