//! Bookscrape main entry point
//!
//! Command-line interface for the books.toscrape.com catalog scraper.

use anyhow::Context;
use bookscrape::config::load_config_or_default;
use bookscrape::{Book, Runner, RunStats};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;

/// Bookscrape: a catalog scraper for books.toscrape.com
///
/// Extracts title, prices, stock, rating, description, and cover image for
/// every book in a category (or the whole site) and writes the records as
/// CSV rows, optionally downloading cover images.
#[derive(Parser, Debug)]
#[command(name = "bookscrape")]
#[command(version = "1.0.0")]
#[command(about = "Scrape the demo bookstore catalog into CSV", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Download cover images alongside CSV rows
    #[arg(short = 'i', long)]
    images: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the categories available on the site
    Categories,

    /// Extract a single book from its detail page URL
    Single {
        /// Detail page URL
        url: String,
    },

    /// Extract every book in one category
    Category {
        /// Category name as shown by `categories` (case-insensitive)
        name: String,
    },

    /// Extract every book in every category
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;

    // CLI flags override the config file.
    if let Some(output) = &cli.output {
        config.output.directory = output.display().to_string();
    }
    if cli.images {
        config.output.download_images = true;
    }

    tracing::info!("Target site: {}", config.site.base_url);

    let mut runner = Runner::new(&config)?;

    // Ctrl-C requests a stop after the current item; nothing partial is
    // persisted.
    let cancel = runner.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current item");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    let result = run_command(cli.command, &mut runner).await;

    // Join detached image downloads even when the command failed partway;
    // records already persisted keep their images.
    runner.finish().await;

    result
}

async fn run_command(command: Command, runner: &mut Runner) -> anyhow::Result<()> {
    match command {
        Command::Categories => {
            let categories = runner.categories().await?;
            println!("{} categories:", categories.len());
            for category in &categories {
                println!("  {}", category.name);
            }
        }
        Command::Single { url } => {
            let book = runner.scrape_single(&url).await?;
            print_book(&book);
        }
        Command::Category { name } => {
            let stats = runner.scrape_category(&name).await?;
            print_stats(&stats);
        }
        Command::All => {
            let stats = runner.scrape_all().await?;
            print_stats(&stats);
        }
    }
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookscrape=info,warn"),
            1 => EnvFilter::new("bookscrape=debug,info"),
            2 => EnvFilter::new("bookscrape=trace,debug"),
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

fn print_book(book: &Book) {
    println!("Title:        {}", book.title);
    println!("UPC:          {}", book.universal_product_code);
    println!("Price (incl): £{}", book.price_including_tax);
    println!("Price (excl): £{}", book.price_excluding_tax);
    println!("Available:    {}", book.number_available);
    println!("Category:     {}", book.category);
    println!("Rating:       {}", book.review_rating);
    if !book.image_url.is_empty() {
        println!("Image:        {}", book.image_url);
    }
}

fn print_stats(stats: &RunStats) {
    println!(
        "Done: {} records, {} malformed pages skipped, {} fetch failures",
        stats.records, stats.failures, stats.skipped_fetches
    );
}
