//! Result block location.

use scraper::{ElementRef, Html};

use super::tree::{TemplateSelectors, TreeQuery};

/// Every result block of `document`, in document order.
///
/// A block must carry all of the template's block classes; a `gs_r` wrapper
/// without `gs_or gs_scl` (related searches, author profiles) is skipped.
/// A page without results gives an empty list.
pub fn find_results<'a>(document: &'a Html, selectors: &TemplateSelectors) -> Vec<ElementRef<'a>> {
    let blocks = document.find_all(&selectors.block);
    tracing::debug!("Found {} result blocks ({})", blocks.len(), selectors.block.css());
    blocks
}
