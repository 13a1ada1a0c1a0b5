//! HTML-to-record extraction for Google Scholar result pages.
//!
//! The pipeline is synchronous and pure:
//!
//! 1. [`find_results`] locates every result block of a parsed page, in document order.
//! 2. [`ScholarExtractor::extract_record`] maps one block to a [`CitationRecord`].
//! 3. [`ScholarExtractor::extract_records`] maps all blocks, failing on the first bad one.
//!
//! Free-text fields go through two small normalizers: [`parse_int`] for the
//! "Cited by 375" / "..., 2014 - ..." strings and [`query_parameters`] for the
//! `cites` identifier carried in the citation listing URL.
//!
//! # Example
//!
//! ```rust
//! use scholar_cites::extract::ScholarExtractor;
//!
//! # fn example(html: &str) -> Result<(), scholar_cites::extract::ExtractError> {
//! let extractor = ScholarExtractor::new("https://scholar.google.com")?;
//! for record in extractor.extract_html(html)? {
//!     println!("{} ({}) cited by {}", record.title, record.year, record.citations);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`CitationRecord`]: crate::models::CitationRecord

mod locator;
mod numbers;
mod query;
mod record;
mod tree;

pub use locator::find_results;
pub use numbers::parse_int;
pub use query::{query_parameters, QueryParameters};
pub use record::{BatchOutcome, BlockFailure, ScholarExtractor};
pub use tree::{
    NamedSelector, ResultTemplate, TemplateSelectors, TreeQuery, CITATIONS_LINK_POSITION,
};

/// Errors that can occur while turning a result page into records
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// A URL could not be decomposed into its components
    #[error("Parse error: {0}")]
    Parse(String),

    /// A text field expected to carry an integer did not
    #[error("Format error: {0}")]
    Format(String),

    /// An expected element was missing from a result block
    #[error("Structure error: {0}")]
    Structure(String),

    /// A template marker could not be compiled into a CSS selector
    #[error("Invalid selector: {0}")]
    Selector(String),
}

impl From<url::ParseError> for ExtractError {
    fn from(err: url::ParseError) -> Self {
        ExtractError::Parse(err.to_string())
    }
}
