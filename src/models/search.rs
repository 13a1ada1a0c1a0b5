//! Search request model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Main search query string
    pub query: String,

    /// Interface language (`hl`), which also sets the language of "Cited by"
    pub language: Option<String>,

    /// Only results published in or after this year (`as_ylo`)
    pub year_from: Option<u32>,

    /// Only results published in or before this year (`as_yhi`)
    pub year_to: Option<u32>,

    /// Additional raw query parameters, rendered in name order
    pub params: BTreeMap<String, String>,
}

impl SearchQuery {
    /// Create a new search query
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Set interface language
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set lower year bound
    pub fn year_from(mut self, year: u32) -> Self {
        self.year_from = Some(year);
        self
    }

    /// Set upper year bound
    pub fn year_to(mut self, year: u32) -> Self {
        self.year_to = Some(year);
        self
    }

    /// Add a raw query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Render the results-page URL for this query
    pub fn to_url(&self, base_url: &str, search_path: &str) -> String {
        let mut url = format!(
            "{}{}?q={}",
            base_url,
            search_path,
            urlencoding::encode(&self.query)
        );

        if let Some(ref language) = self.language {
            url.push_str(&format!("&hl={}", urlencoding::encode(language)));
        }
        if let Some(year) = self.year_from {
            url.push_str(&format!("&as_ylo={}", year));
        }
        if let Some(year) = self.year_to {
            url.push_str(&format!("&as_yhi={}", year));
        }
        for (key, value) in &self.params {
            url.push_str(&format!(
                "&{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            ));
        }

        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://scholar.google.com";

    #[test]
    fn test_plain_query_url() {
        let url = SearchQuery::new("kubernetes").to_url(BASE, "/scholar");
        assert_eq!(url, "https://scholar.google.com/scholar?q=kubernetes");
    }

    #[test]
    fn test_full_query_url() {
        let url = SearchQuery::new("container orchestration")
            .language("es")
            .year_from(2009)
            .year_to(2019)
            .param("as_sdt", "1,5")
            .to_url(BASE, "/scholar");

        assert_eq!(
            url,
            "https://scholar.google.com/scholar?q=container%20orchestration&hl=es&as_ylo=2009&as_yhi=2019&as_sdt=1%2C5"
        );
    }

    #[test]
    fn test_query_url_round_trips_through_parameters() {
        let url = SearchQuery::new("a&b=c")
            .language("en")
            .to_url(BASE, "/scholar");
        let params = crate::extract::query_parameters(&url).unwrap();
        assert_eq!(params.get("q").map(String::as_str), Some("a&b=c"));
        assert_eq!(params.get("hl").map(String::as_str), Some("en"));
    }
}
