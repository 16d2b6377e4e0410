//! pdf-harvest main entry point
//!
//! This is the command-line interface for the section PDF crawler and its
//! two companion utilities.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pdf_harvest::config::{load_config_with_hash, validate, Config, CrawlTarget};
use pdf_harvest::crawler::{CancelFlag, Coordinator};
use pdf_harvest::dedupe::{dedupe_folder, DEFAULT_DUPES_DIR};
use pdf_harvest::extract::extract_folder;
use pdf_harvest::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// pdf-harvest: collect every PDF from one section of a website
///
/// The crawler walks the pages under a path prefix breadth-first, downloads
/// each linked PDF once, and writes a CSV manifest plus a zip archive.
#[derive(Parser, Debug)]
#[command(name = "pdf-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Scoped section crawler for PDF documents", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl a site section and download its PDFs
    Crawl(CrawlArgs),

    /// Split a folder of PDFs into unique files and duplicates by content hash
    Dedupe(DedupeArgs),

    /// Convert a folder of PDFs into text files
    ExtractText(ExtractArgs),
}

#[derive(Args, Debug)]
struct CrawlArgs {
    /// Start page for crawling
    #[arg(long, value_name = "URL")]
    start_url: String,

    /// Only crawl pages whose path starts with this, e.g. /consumers-corner
    #[arg(long, value_name = "PREFIX")]
    scope_path: String,

    /// Output folder
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Max HTML pages to crawl in this section [default: 250]
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Delay between requests in seconds [default: 0.8]
    #[arg(long, value_name = "SECS")]
    sleep: Option<f64>,

    /// ZIP file name (inside the output folder) [default: section_pdfs.zip]
    #[arg(long, value_name = "NAME")]
    zip_name: Option<String>,

    /// Match the scope path on whole path segments only
    #[arg(long)]
    segment_scope: bool,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DedupeArgs {
    /// Input folder containing PDFs (scanned recursively)
    #[arg(long = "in", value_name = "DIR")]
    input: PathBuf,

    /// Output folder for unique PDFs
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Folder name for duplicates, created inside the output folder
    #[arg(long, value_name = "NAME", default_value = DEFAULT_DUPES_DIR)]
    dupes: String,
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Folder containing PDFs
    #[arg(long = "in", value_name = "DIR")]
    input: PathBuf,

    /// Output folder for TXT files
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// Also convert PDFs in subfolders
    #[arg(long)]
    recursive: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Crawl(args) => handle_crawl(args).await,
        Command::Dedupe(args) => handle_dedupe(args).await,
        Command::ExtractText(args) => handle_extract(args).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("pdf_harvest=info,warn"),
            1 => EnvFilter::new("pdf_harvest=debug,info"),
            2 => EnvFilter::new("pdf_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Builds the effective configuration: file values first, then CLI flags
fn resolve_config(args: &CrawlArgs) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = args.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(sleep) = args.sleep {
        config.crawler.delay_seconds = sleep;
    }
    if let Some(zip_name) = &args.zip_name {
        config.output.archive_name = zip_name.clone();
    }
    if args.segment_scope {
        config.crawler.segment_scope = true;
    }

    validate(&config).context("Invalid crawl settings")?;
    Ok(config)
}

/// Handles the crawl subcommand
async fn handle_crawl(args: CrawlArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;

    // Fails before any network activity on a bad start URL
    let target = CrawlTarget::from_config(&args.start_url, &args.scope_path, &config.crawler)?;

    let cancel = CancelFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, stopping after the current request");
            on_interrupt.cancel();
        }
    });

    let report = Coordinator::new(config, target, &args.out)?
        .with_cancel_flag(cancel)
        .run()
        .await?;

    print_report(&report);
    Ok(())
}

/// Handles the dedupe subcommand
async fn handle_dedupe(args: DedupeArgs) -> anyhow::Result<()> {
    let DedupeArgs { input, out, dupes } = args;
    let out_display = out.display().to_string();

    let report =
        tokio::task::spawn_blocking(move || dedupe_folder(&input, &out, &dupes)).await??;

    println!("PDFs found: {}", report.scanned);
    println!("Unique: {}", report.unique);
    println!("Duplicates: {}", report.duplicates);
    if report.skipped > 0 {
        println!("Skipped: {}", report.skipped);
    }
    println!("Output: {}", out_display);
    Ok(())
}

/// Handles the extract-text subcommand
async fn handle_extract(args: ExtractArgs) -> anyhow::Result<()> {
    let ExtractArgs {
        input,
        out,
        recursive,
    } = args;
    let out_display = out.display().to_string();

    let report =
        tokio::task::spawn_blocking(move || extract_folder(&input, &out, recursive)).await??;

    println!(
        "TXT written to {}: {} files ({} without text, {} failed)",
        out_display, report.processed, report.no_text, report.failed
    );
    Ok(())
}
