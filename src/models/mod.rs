//! Core data models for citation records and search requests.

mod record;
mod search;

pub use record::CitationRecord;
pub use search::SearchQuery;
