//! # scholar-cites
//!
//! Extracts citation records from Google Scholar search-result pages.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`extract`]: HTML-to-record pipeline (block location, field extraction, normalizers)
//! - [`models`]: Core data structures (CitationRecord, SearchQuery)
//! - [`sources`]: Page sources that supply raw HTML (HTTP, file)
//! - [`scholar`]: Client tying a page source to the extractor
//! - [`config`]: Configuration management

pub mod config;
pub mod extract;
pub mod models;
pub mod scholar;
pub mod sources;

// Re-export commonly used types
pub use extract::{ExtractError, ScholarExtractor};
pub use models::CitationRecord;
pub use scholar::{ScholarClient, ScrapeError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
