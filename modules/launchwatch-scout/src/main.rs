use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use launchwatch_common::Config;
use launchwatch_scout::extractor::VisionProblemExtractor;
use launchwatch_scout::filter::LlmProductFilter;
use launchwatch_scout::publisher::{NoopPublisher, TelegramPublisher};
use launchwatch_scout::renderer::BrowserlessRenderer;
use launchwatch_scout::sources::ProductHuntSource;
use launchwatch_scout::traits::ChannelPublisher;
use launchwatch_scout::ProductResearch;
use producthunt_client::ProductHuntClient;

#[derive(Parser)]
#[command(name = "launchwatch", about = "Research yesterday's launches and post the best AI products")]
struct Cli {
    /// Launch day to research (YYYY-MM-DD). Defaults to the previous UTC day.
    #[arg(long, env = "TARGET_DATE")]
    date: Option<NaiveDate>,

    /// Build messages and log them instead of sending to Telegram.
    #[arg(long)]
    dry_run: bool,

    /// Verbose logging with source locations.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = Config::from_env()?;

    init_tracing(cli.debug || config.debug)?;
    info!("Launchwatch starting...");
    config.log_redacted();

    let date = match cli.date {
        Some(date) => date,
        None => Utc::now()
            .date_naive()
            .pred_opt()
            .context("No previous day for today's date")?,
    };

    let publisher: Arc<dyn ChannelPublisher> = if cli.dry_run {
        info!("Dry run: messages will be logged, not sent");
        Arc::new(NoopPublisher)
    } else {
        let (token, channel) = config.telegram()?;
        Arc::new(TelegramPublisher::new(token, channel)?)
    };

    let research = ProductResearch::new(
        Arc::new(ProductHuntSource::new(ProductHuntClient::new(
            config.product_hunt_token.clone(),
        ))),
        Arc::new(BrowserlessRenderer::new(
            &config.browserless_url,
            config.browserless_token.as_deref(),
        )?),
        Arc::new(VisionProblemExtractor::new(
            &config.anthropic_api_key,
            &config.extraction_model,
        )),
        Arc::new(LlmProductFilter::new(
            &config.openai_api_key,
            &config.filter_model,
        )),
        publisher,
        config.product_quota,
        config.candidate_limit,
    );

    let stats = research.run(date).await?;
    info!("Research run complete. {stats}");

    Ok(())
}

fn init_tracing(debug: bool) -> Result<()> {
    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::from_default_env().add_directive(format!("launchwatch={level}").parse()?);

    if debug {
        tracing_subscriber::fmt()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
    Ok(())
}
