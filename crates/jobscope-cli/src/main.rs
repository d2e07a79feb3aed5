use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jobscope_client::chart::{ReportLayout, render_svg_file};
use jobscope_client::store::{load_csv, save_csv};
use jobscope_client::{HtmlListingExtractor, ReqwestFetcher};
use jobscope_core::sample::sample_listings;
use jobscope_core::throttle::{ThrottleConfig, ThrottledFetcher};
use jobscope_core::{
    AggregateReport, NormalizedJobRecord, Normalizer, ReportLimits, ScrapeConfig, ScrapeService,
};

#[derive(Parser)]
#[command(name = "jobscope", version, about = "Job listing scraper and market analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape search result pages from a job portal and analyze them
    Scrape {
        /// Base URL of the job portal (search pages live under /search)
        #[arg(short, long, env = "JOBSCOPE_BASE_URL")]
        base_url: String,

        /// Search query
        #[arg(short, long, env = "JOBSCOPE_QUERY", default_value = "data analyst")]
        query: String,

        /// Number of result pages to fetch
        #[arg(short, long, env = "JOBSCOPE_PAGES", default_value_t = 5)]
        pages: u32,

        /// Fixed delay between page requests, in seconds
        #[arg(long, env = "JOBSCOPE_DELAY_SECS", default_value_t = 2)]
        delay_secs: u64,

        /// Maximum random jitter added to the delay, in milliseconds (0 disables)
        #[arg(long, env = "JOBSCOPE_JITTER_MS", default_value_t = 1000)]
        jitter_ms: u64,

        /// Per-request timeout, in seconds
        #[arg(long, env = "JOBSCOPE_TIMEOUT_SECS", default_value_t = 10)]
        timeout_secs: u64,

        /// Where to save the scraped records (CSV)
        #[arg(short, long, default_value = "scraped_jobs.csv")]
        output: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Analyze a CSV file saved by a previous run
    Analyze {
        /// CSV file written by `scrape` or `demo`
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Analyze the built-in sample listings
    Demo {
        /// Where to save the normalized sample records (CSV)
        #[arg(short, long, default_value = "demo_jobs_data.csv")]
        output: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },
}

#[derive(Args)]
struct ReportArgs {
    /// Where to write the chart report (SVG)
    #[arg(long, env = "JOBSCOPE_CHART", default_value = "job_analysis_report.svg")]
    chart: PathBuf,

    /// Skip rendering the chart report
    #[arg(long, default_value_t = false)]
    no_chart: bool,

    /// Number of entries in the top companies table
    #[arg(long, default_value_t = 6)]
    top_companies: usize,

    /// Also print the report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("jobscope=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape {
            base_url,
            query,
            pages,
            delay_secs,
            jitter_ms,
            timeout_secs,
            output,
            report,
        } => {
            let config = ScrapeConfig::new(&base_url, &query, pages)
                .context("Invalid scrape target")?
                .with_timeout(Duration::from_secs(timeout_secs))
                .with_throttle(
                    ThrottleConfig::new(Duration::from_secs(delay_secs))
                        .with_jitter(Duration::from_millis(jitter_ms)),
                );
            cmd_scrape(&config, &output, &report).await?;
        }
        Commands::Analyze { input, report } => {
            let records = load_csv(&input)
                .with_context(|| format!("Failed to load records from {}", input.display()))?;
            finish_run(&records, &report)?;
        }
        Commands::Demo { output, report } => {
            cmd_demo(&output, &report)?;
        }
    }

    Ok(())
}

async fn cmd_scrape(config: &ScrapeConfig, output: &Path, report: &ReportArgs) -> Result<()> {
    let fetcher = ReqwestFetcher::with_timeout(config.timeout)
        .context("Failed to create HTTP client")?;
    let fetcher = ThrottledFetcher::new(fetcher, config.throttle.clone());
    let extractor = HtmlListingExtractor::new().context("Failed to build listing extractor")?;

    let service = ScrapeService::new(fetcher, extractor, Normalizer::default());
    let outcome = service.scrape(config).await?;

    if outcome.records.is_empty() {
        println!("No jobs were scraped. Please check the website structure and selectors.");
    }

    save_csv(output, &outcome.records)
        .with_context(|| format!("Failed to save records to {}", output.display()))?;
    println!("Data saved to {}", output.display());

    finish_run(&outcome.records, report)
}

fn cmd_demo(output: &Path, report: &ReportArgs) -> Result<()> {
    tracing::info!("Running demo with sample job data");

    let normalizer = Normalizer::default();
    let records: Vec<NormalizedJobRecord> = sample_listings()
        .iter()
        .map(|fields| normalizer.normalize(fields))
        .collect();

    save_csv(output, &records)
        .with_context(|| format!("Failed to save records to {}", output.display()))?;
    println!("Data saved to {}", output.display());

    finish_run(&records, report)
}

/// Aggregate, print the summary and render the chart report.
fn finish_run(records: &[NormalizedJobRecord], args: &ReportArgs) -> Result<()> {
    let limits = ReportLimits {
        companies: args.top_companies,
        ..ReportLimits::default()
    };
    let report = AggregateReport::from_records(records, limits);

    println!();
    println!("{report}");

    if args.json {
        println!("{}", report.to_json()?);
    }

    if !args.no_chart {
        render_svg_file(&args.chart, &ReportLayout::from_report(&report))
            .with_context(|| format!("Failed to render chart to {}", args.chart.display()))?;
        println!("Chart report saved to {}", args.chart.display());
    }

    Ok(())
}
