//! Record extraction from result blocks.

use scraper::{ElementRef, Html};

use super::locator::find_results;
use super::numbers::parse_int;
use super::query::query_parameters;
use super::tree::{ResultTemplate, TemplateSelectors, TreeQuery};
use super::ExtractError;
use crate::models::CitationRecord;

/// Query parameter of the citation listing URL that identifies the cited paper
const CITES_PARAM: &str = "cites";

/// Turns Google Scholar result blocks into [`CitationRecord`]s.
///
/// The extractor is immutable and holds no per-page state, so one instance
/// can serve any number of pages.
#[derive(Debug, Clone)]
pub struct ScholarExtractor {
    base_url: String,
    selectors: TemplateSelectors,
}

/// A block that could not be extracted in lossy mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    /// Zero-based position of the block in the page
    pub index: usize,
    pub error: ExtractError,
}

/// Result of a best-effort batch extraction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Records of every block that extracted cleanly, in page order
    pub records: Vec<CitationRecord>,
    /// Blocks that were skipped, in page order
    pub failures: Vec<BlockFailure>,
}

impl BatchOutcome {
    /// Whether every block produced a record
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl ScholarExtractor {
    /// Create an extractor for the default Scholar layout.
    ///
    /// `base_url` is the scheme and host that relative citation links are
    /// appended to, e.g. `https://scholar.google.com`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ExtractError> {
        Self::with_template(base_url, &ResultTemplate::default())
    }

    /// Create an extractor for a custom set of structural markers
    pub fn with_template(
        base_url: impl Into<String>,
        template: &ResultTemplate,
    ) -> Result<Self, ExtractError> {
        Ok(Self {
            base_url: base_url.into(),
            selectors: TemplateSelectors::compile(template)?,
        })
    }

    /// Base origin used for citation listing URLs
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Locate the result blocks of a parsed page
    pub fn results<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        find_results(document, &self.selectors)
    }

    /// Title text of a result block, if it has a title link
    pub fn title(&self, block: ElementRef<'_>) -> Option<String> {
        block.find_first(&self.selectors.title).map(element_text)
    }

    /// Extract one record from a result block
    pub fn extract_record(&self, block: ElementRef<'_>) -> Result<CitationRecord, ExtractError> {
        let selectors = &self.selectors;

        let title_elem = block.find_first(&selectors.title).ok_or_else(|| {
            ExtractError::Structure(format!("missing title link ({})", selectors.title.css()))
        })?;
        let title = element_text(title_elem);
        if title.trim().is_empty() {
            return Err(ExtractError::Structure("title link has no text".to_string()));
        }
        let link = required_href(title_elem, "title link")?;

        let byline = block.find_first(&selectors.byline).ok_or_else(|| {
            ExtractError::Structure(format!(
                "missing author/venue line ({})",
                selectors.byline.css()
            ))
        })?;

        let position = selectors.citations_link_position;
        let citations_elem = block
            .find_nth(&selectors.action_links, position)
            .ok_or_else(|| {
                ExtractError::Structure(format!(
                    "expected at least {} action links ({}) in result {:?}",
                    position + 1,
                    selectors.action_links.css(),
                    title
                ))
            })?;

        // Hrefs on the action row are site-relative; plain concatenation is
        // all the listing URL needs.
        let citations_url = format!(
            "{}{}",
            self.base_url,
            required_href(citations_elem, "citation link")?
        );
        let id = query_parameters(&citations_url)?.remove(CITES_PARAM);

        let year = parse_int(&element_text(byline))?;
        let citations = parse_int(&element_text(citations_elem))?;

        Ok(CitationRecord {
            title,
            link,
            year,
            citations,
            citations_url,
            id,
        })
    }

    /// Extract every block in order, stopping at the first failure
    pub fn extract_records<'a, I>(&self, blocks: I) -> Result<Vec<CitationRecord>, ExtractError>
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| {
                self.extract_record(block).map_err(|e| {
                    tracing::debug!("Result block {} failed: {}", index, e);
                    e
                })
            })
            .collect()
    }

    /// Extract every block in order, collecting failures instead of stopping
    pub fn extract_records_lossy<'a, I>(&self, blocks: I) -> BatchOutcome
    where
        I: IntoIterator<Item = ElementRef<'a>>,
    {
        let mut outcome = BatchOutcome::default();

        for (index, block) in blocks.into_iter().enumerate() {
            match self.extract_record(block) {
                Ok(record) => outcome.records.push(record),
                Err(error) => {
                    tracing::warn!("Skipping result block {}: {}", index, error);
                    outcome.failures.push(BlockFailure { index, error });
                }
            }
        }

        outcome
    }

    /// Parse `html` and extract every result, stopping at the first failure
    pub fn extract_html(&self, html: &str) -> Result<Vec<CitationRecord>, ExtractError> {
        let document = Html::parse_document(html);
        self.extract_records(self.results(&document))
    }

    /// Parse `html` and extract every result that can be extracted
    pub fn extract_html_lossy(&self, html: &str) -> BatchOutcome {
        let document = Html::parse_document(html);
        self.extract_records_lossy(self.results(&document))
    }
}

fn element_text(elem: ElementRef<'_>) -> String {
    elem.text().collect()
}

fn required_href(elem: ElementRef<'_>, what: &str) -> Result<String, ExtractError> {
    elem.value()
        .attr("href")
        .map(str::to_string)
        .ok_or_else(|| ExtractError::Structure(format!("{} has no href", what)))
}
