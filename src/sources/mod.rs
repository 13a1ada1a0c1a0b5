//! Where result pages come from.
//!
//! The extraction core only ever sees HTML text. A [`PageSource`] is whatever
//! hands that text over: a live HTTP fetch ([`HttpPageSource`]) or a saved
//! page on disk ([`FilePageSource`]). Sources do not retry, rate limit or cache.
//!
//! # Implementing a New Source
//!
//! ```rust
//! use async_trait::async_trait;
//! use scholar_cites::sources::{FetchError, PageSource};
//!
//! #[derive(Debug)]
//! struct StaticPage(String);
//!
//! #[async_trait]
//! impl PageSource for StaticPage {
//!     fn name(&self) -> &str {
//!         "static"
//!     }
//!
//!     async fn fetch(&self, _location: &str) -> Result<String, FetchError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

mod file;
mod http;

pub use file::FilePageSource;
pub use http::HttpPageSource;

use async_trait::async_trait;

/// Supplies the raw HTML of a result page
#[async_trait]
pub trait PageSource: Send + Sync + std::fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Return the page found at `location` (a URL or a path, depending on the source)
    async fn fetch(&self, location: &str) -> Result<String, FetchError>;
}

/// Errors that can occur when loading a page
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network or HTTP transport error
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The location is not a usable URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}
