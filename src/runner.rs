//! Batch orchestration: categories → item URLs → records → persistence
//!
//! The runner composes the directory extractor, paginator, and detail
//! extractor into the three batch operations the CLI exposes (single item,
//! one category, whole site). The pipeline is strictly sequential — one
//! fetch in flight — with image downloads as detached side tasks joined
//! before exit. A cancellation flag is checked between items, so stopping
//! never drops a partially persisted record.

use crate::config::Config;
use crate::fetch::build_http_client;
use crate::model::{Book, Category, CSV_HEADERS};
use crate::output::{append_rows, sanitize_filename, spawn_image_download};
use crate::scrape::{collect_item_urls, extract_book, list_categories};
use crate::url::listing_url;
use crate::{Result, ScrapeError};
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use url::Url;

/// Counters for one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Records extracted and persisted
    pub records: usize,
    /// Detail pages that failed extraction (malformed markup)
    pub failures: usize,
    /// Items skipped because the fetch itself failed
    pub skipped_fetches: usize,
}

impl RunStats {
    fn absorb(&mut self, other: RunStats) {
        self.records += other.records;
        self.failures += other.failures;
        self.skipped_fetches += other.skipped_fetches;
    }
}

/// Batch orchestrator
pub struct Runner {
    client: Client,
    site_root: Url,
    output_dir: PathBuf,
    download_images: bool,
    cancel: Arc<AtomicBool>,
    image_tasks: Vec<JoinHandle<()>>,
}

impl Runner {
    /// Builds a runner from configuration: one HTTP client for the whole run
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.fetcher)?;
        let site_root = Url::parse(&config.site.base_url)?;

        Ok(Self {
            client,
            site_root,
            output_dir: PathBuf::from(&config.output.directory),
            download_images: config.output.download_images,
            cancel: Arc::new(AtomicBool::new(false)),
            image_tasks: Vec::new(),
        })
    }

    /// Shared flag that requests a stop after the current item completes
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Fetches the category directory from the landing page
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let categories = list_categories(&self.client, &self.site_root).await?;
        if categories.is_empty() {
            return Err(ScrapeError::NoCategories);
        }
        Ok(categories)
    }

    /// Extracts one item by URL and persists it to `single_book.csv`
    pub async fn scrape_single(&mut self, item_url: &str) -> Result<Book> {
        let url = Url::parse(item_url)?;
        tracing::info!("Extracting {}", url);

        let book = extract_book(&self.client, &url, &self.site_root).await?;

        let out_dir = self.output_dir.clone();
        let csv_path = out_dir.join("single_book.csv");
        self.persist(&book, &csv_path, &out_dir)?;

        tracing::info!("Saved record to {}", csv_path.display());
        Ok(book)
    }

    /// Processes one category selected by name (case-insensitive)
    pub async fn scrape_category(&mut self, name: &str) -> Result<RunStats> {
        let categories = self.categories().await?;
        let wanted = name.trim().to_lowercase();

        let Some(category) = categories.iter().find(|c| c.name == wanted).cloned() else {
            let available: Vec<&str> = categories.iter().map(|c| c.name.as_str()).collect();
            tracing::info!("Available categories: {}", available.join(", "));
            return Err(ScrapeError::UnknownCategory {
                name: name.to_string(),
            });
        };

        self.run_category(&category).await
    }

    /// Processes every category in directory order
    pub async fn scrape_all(&mut self) -> Result<RunStats> {
        let categories = self.categories().await?;
        tracing::info!("Found {} categories", categories.len());

        let mut stats = RunStats::default();
        for category in &categories {
            if self.cancelled() {
                tracing::info!("Cancellation requested, stopping before '{}'", category.name);
                break;
            }
            stats.absorb(self.run_category(category).await?);
        }
        Ok(stats)
    }

    /// Runs the full pipeline for one category: paginate, extract, persist
    ///
    /// A category with zero discovered items is not an error; the run
    /// continues with zero rows persisted for it.
    pub async fn run_category(&mut self, category: &Category) -> Result<RunStats> {
        tracing::info!("Paginating category '{}'", category.name);

        let first_page = listing_url(&self.site_root, &category.listing_url)?;
        let item_urls = collect_item_urls(&self.client, &first_page).await;

        if item_urls.is_empty() {
            tracing::info!("Category '{}' has no items", category.name);
            return Ok(RunStats::default());
        }
        tracing::info!("Category '{}': {} items", category.name, item_urls.len());

        let category_dir = self.output_dir.join(category.safe_name());
        let csv_path = category_dir.join(format!("{}.csv", category.safe_name()));

        let mut stats = RunStats::default();
        for (index, item_url) in item_urls.iter().enumerate() {
            if self.cancelled() {
                tracing::info!(
                    "Cancellation requested, stopping '{}' after {} of {} items",
                    category.name,
                    index,
                    item_urls.len()
                );
                break;
            }

            tracing::debug!("Item {}/{}: {}", index + 1, item_urls.len(), item_url);

            match extract_book(&self.client, item_url, &self.site_root).await {
                Ok(book) => {
                    self.persist(&book, &csv_path, &category_dir)?;
                    stats.records += 1;
                }
                Err(ScrapeError::Extract { url, source }) => {
                    tracing::warn!("Skipping malformed page {}: {}", url, source);
                    stats.failures += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", item_url, e);
                    stats.skipped_fetches += 1;
                }
            }

            if (index + 1) % 10 == 0 {
                tracing::info!(
                    "Progress: {}/{} items in '{}'",
                    index + 1,
                    item_urls.len(),
                    category.name
                );
            }
        }

        tracing::info!(
            "Category '{}' done: {} records, {} failures, {} skipped",
            category.name,
            stats.records,
            stats.failures,
            stats.skipped_fetches
        );
        Ok(stats)
    }

    /// Appends one record to its CSV and, when enabled, detaches an image
    /// download under `<dir>/images/`.
    fn persist(&mut self, book: &Book, csv_path: &Path, dir: &Path) -> Result<()> {
        append_rows(csv_path, &CSV_HEADERS, &[book.to_row()])?;

        if self.download_images && !book.image_url.is_empty() {
            match Url::parse(&book.image_url) {
                Ok(image_url) => {
                    let filename = format!("{}.jpg", sanitize_filename(&book.title));
                    let path = dir.join("images").join(filename);
                    self.image_tasks.push(spawn_image_download(
                        self.client.clone(),
                        image_url,
                        path,
                    ));
                }
                Err(e) => {
                    tracing::warn!("Bad image URL {:?}: {}", book.image_url, e);
                }
            }
        }

        Ok(())
    }

    /// Waits for outstanding image downloads; call once before exit
    pub async fn finish(self) {
        if self.image_tasks.is_empty() {
            return;
        }
        tracing::info!("Waiting for {} image downloads", self.image_tasks.len());
        for task in self.image_tasks {
            if let Err(e) = task.await {
                tracing::warn!("Image download task panicked: {}", e);
            }
        }
    }
}
