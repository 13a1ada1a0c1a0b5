//! Citation record extracted from one search result.

use serde::{Deserialize, Serialize};

/// One Google Scholar result, flattened
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CitationRecord {
    /// Visible text of the result's title link
    pub title: String,

    /// Target of the title link, as found in the page
    pub link: String,

    /// Publication year, from the author/venue line
    pub year: u64,

    /// Number of citing documents
    pub citations: u64,

    /// Scholar listing of the citing documents
    pub citations_url: String,

    /// Scholar cluster identifier (`cites` parameter of `citations_url`)
    pub id: Option<String>,
}

impl CitationRecord {
    /// Returns the cluster identifier, or an empty string when unknown
    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }
}

impl std::fmt::Display for CitationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - cited by {}",
            self.title, self.year, self.citations
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CitationRecord {
        CitationRecord {
            title: "Borg, omega, and kubernetes".to_string(),
            link: "https://ai.google/research/pubs/pub44843.pdf".to_string(),
            year: 2016,
            citations: 210,
            citations_url: "https://scholar.google.com/scholar?cites=3003686304824470147&as_sdt=2005&sciodt=1,5&hl=es".to_string(),
            id: Some("3003686304824470147".to_string()),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(
            record().to_string(),
            "Borg, omega, and kubernetes (2016) - cited by 210"
        );
    }

    #[test]
    fn test_id_or_empty() {
        let mut r = record();
        assert_eq!(r.id_or_empty(), "3003686304824470147");
        r.id = None;
        assert_eq!(r.id_or_empty(), "");
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["title"], "Borg, omega, and kubernetes");
        assert_eq!(value["year"], 2016);
        assert_eq!(value["citations"], 210);
        assert_eq!(value["id"], "3003686304824470147");

        let mut r = record();
        r.id = None;
        assert!(serde_json::to_value(r).unwrap()["id"].is_null());
    }
}
