//! Google Scholar client: page source + extractor.
//!
//! NOTE: Google Scholar has no public API. Fetching result pages is scraping
//! and may violate Google's Terms of Service. Use at your own risk; this crate
//! makes one request per call and never retries.

use scraper::Html;

use crate::config::ScholarConfig;
use crate::extract::{BatchOutcome, ExtractError, ScholarExtractor};
use crate::models::{CitationRecord, SearchQuery};
use crate::sources::{FetchError, PageSource};

/// Errors from a fetch-and-extract run
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// The page could not be loaded
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The page did not have the expected structure
    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Fetches Scholar result pages and turns them into citation records
#[derive(Debug, Clone)]
pub struct ScholarClient<S> {
    source: S,
    extractor: ScholarExtractor,
    config: ScholarConfig,
}

impl<S: PageSource> ScholarClient<S> {
    /// Create a client that reads pages from `source`
    pub fn new(source: S, config: ScholarConfig) -> Result<Self, ExtractError> {
        let extractor = ScholarExtractor::new(config.base_url.clone())?;
        Ok(Self {
            source,
            extractor,
            config,
        })
    }

    /// The extractor used on fetched pages
    pub fn extractor(&self) -> &ScholarExtractor {
        &self.extractor
    }

    /// Site configuration in use
    pub fn config(&self) -> &ScholarConfig {
        &self.config
    }

    /// Results-page URL for `query`, using the configured language when the query has none
    pub fn query_url(&self, query: &SearchQuery) -> String {
        let mut query = query.clone();
        if query.language.is_none() {
            query.language = self.config.language.clone();
        }
        query.to_url(&self.config.base_url, &self.config.search_path)
    }

    /// Fetch `location` and extract every result, failing on the first bad block
    pub async fn fetch_records(&self, location: &str) -> Result<Vec<CitationRecord>, ScrapeError> {
        let html = self.source.fetch(location).await?;
        let records = self.extractor.extract_html(&html)?;
        tracing::info!(
            "Extracted {} records from {} ({})",
            records.len(),
            location,
            self.source.name()
        );
        Ok(records)
    }

    /// Fetch `location` and extract every result that can be extracted
    pub async fn fetch_records_lossy(&self, location: &str) -> Result<BatchOutcome, ScrapeError> {
        let html = self.source.fetch(location).await?;
        let outcome = self.extractor.extract_html_lossy(&html);
        tracing::info!(
            "Extracted {} records from {} ({} skipped)",
            outcome.records.len(),
            location,
            outcome.failures.len()
        );
        Ok(outcome)
    }

    /// Fetch the page for `query` and extract its results
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<CitationRecord>, ScrapeError> {
        let url = self.query_url(query);
        self.fetch_records(&url).await
    }

    /// Fetch the configured default query page and extract its results
    pub async fn default_records(&self) -> Result<Vec<CitationRecord>, ScrapeError> {
        let url = self.config.default_query_url.clone();
        self.fetch_records(&url).await
    }

    /// Fetch `location` and return the title of every result block that has one
    pub async fn titles(&self, location: &str) -> Result<Vec<String>, ScrapeError> {
        let html = self.source.fetch(location).await?;
        let document = Html::parse_document(&html);
        Ok(self
            .extractor
            .results(&document)
            .into_iter()
            .filter_map(|block| self.extractor.title(block))
            .collect())
    }
}
