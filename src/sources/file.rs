//! Saved-page source, mostly for tests and offline runs.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{FetchError, PageSource};

/// Reads result pages from the local file system
#[derive(Debug, Clone, Default)]
pub struct FilePageSource {
    root: Option<PathBuf>,
}

impl FilePageSource {
    /// Resolve locations as given (absolute or relative to the working directory)
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Resolve relative locations against `root`
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let path = Path::new(location);
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[async_trait]
impl PageSource for FilePageSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self, location: &str) -> Result<String, FetchError> {
        let path = self.resolve(location);
        tracing::debug!("Reading {}", path.display());

        let bytes = tokio::fs::read(&path).await?;
        // Saved pages are not always clean UTF-8
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_with_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("page.html"), "<html>saved</html>").unwrap();

        let source = FilePageSource::with_root(dir.path());
        assert_eq!(source.fetch("page.html").await.unwrap(), "<html>saved</html>");

        let absolute = dir.path().join("page.html");
        let source = FilePageSource::new();
        assert_eq!(
            source.fetch(&absolute.to_string_lossy()).await.unwrap(),
            "<html>saved</html>"
        );
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = FilePageSource::new();
        let err = source.fetch("/nonexistent/page.html").await.unwrap_err();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
