//! Structural markers of the result-page template and the lookups run against them.
//!
//! Everything the extractor knows about the Scholar markup lives in
//! [`ResultTemplate`]. The markers are compiled once into [`TemplateSelectors`]
//! and queried through [`TreeQuery`], which is the only place `scraper`
//! navigation happens.

use scraper::{ElementRef, Html, Selector};

use super::ExtractError;

/// Position of the "Cited by N" link among a result's action links.
///
/// The action row reads: save, cite, cited by, related articles, versions.
pub const CITATIONS_LINK_POSITION: usize = 2;

/// Named structural markers of a search-result page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTemplate {
    /// Tag of the element wrapping one result
    pub block_tag: String,

    /// Classes that must all be present on a result wrapper
    pub block_classes: Vec<String>,

    /// Tag path from the title heading down to the title link
    pub title_path: Vec<String>,

    /// Class of the author / venue / year line
    pub byline_class: String,

    /// Class of the action row under each result
    pub actions_class: String,

    /// Tag of the links that are direct children of the action row
    pub action_link_tag: String,

    /// Zero-based position of the citation link in the action row
    pub citations_link_position: usize,
}

impl Default for ResultTemplate {
    fn default() -> Self {
        Self {
            block_tag: "div".to_string(),
            block_classes: vec!["gs_r".to_string(), "gs_or".to_string(), "gs_scl".to_string()],
            title_path: vec!["h3".to_string(), "a".to_string()],
            byline_class: "gs_a".to_string(),
            actions_class: "gs_fl".to_string(),
            action_link_tag: "a".to_string(),
            citations_link_position: CITATIONS_LINK_POSITION,
        }
    }
}

impl ResultTemplate {
    fn block_css(&self) -> String {
        let classes: String = self.block_classes.iter().map(|c| format!(".{}", c)).collect();
        format!("{}{}", self.block_tag, classes)
    }

    fn title_css(&self) -> String {
        self.title_path.join(" > ")
    }

    fn byline_css(&self) -> String {
        format!(".{}", self.byline_class)
    }

    fn action_links_css(&self) -> String {
        format!(".{} > {}", self.actions_class, self.action_link_tag)
    }
}

/// A compiled selector together with the CSS it came from
#[derive(Debug, Clone)]
pub struct NamedSelector {
    css: String,
    selector: Selector,
}

impl NamedSelector {
    fn parse(css: String) -> Result<Self, ExtractError> {
        let selector = Selector::parse(&css)
            .map_err(|e| ExtractError::Selector(format!("{:?}: {}", css, e)))?;
        Ok(Self { css, selector })
    }

    /// CSS source of this selector, used in error messages
    pub fn css(&self) -> &str {
        &self.css
    }

    /// The compiled selector
    pub fn selector(&self) -> &Selector {
        &self.selector
    }
}

/// A [`ResultTemplate`] compiled into selectors
#[derive(Debug, Clone)]
pub struct TemplateSelectors {
    pub block: NamedSelector,
    pub title: NamedSelector,
    pub byline: NamedSelector,
    pub action_links: NamedSelector,
    pub citations_link_position: usize,
}

impl TemplateSelectors {
    /// Compile every marker of `template`
    pub fn compile(template: &ResultTemplate) -> Result<Self, ExtractError> {
        if template.block_classes.is_empty() {
            return Err(ExtractError::Selector(
                "result block marker needs at least one class".to_string(),
            ));
        }

        Ok(Self {
            block: NamedSelector::parse(template.block_css())?,
            title: NamedSelector::parse(template.title_css())?,
            byline: NamedSelector::parse(template.byline_css())?,
            action_links: NamedSelector::parse(template.action_links_css())?,
            citations_link_position: template.citations_link_position,
        })
    }
}

/// The three tree lookups extraction needs
pub trait TreeQuery<'a> {
    /// Every match, in document order
    fn find_all(&self, selector: &NamedSelector) -> Vec<ElementRef<'a>>;

    /// The first match in document order
    fn find_first(&self, selector: &NamedSelector) -> Option<ElementRef<'a>>;

    /// The match at zero-based position `n` in document order
    fn find_nth(&self, selector: &NamedSelector, n: usize) -> Option<ElementRef<'a>>;
}

impl<'a> TreeQuery<'a> for &'a Html {
    fn find_all(&self, selector: &NamedSelector) -> Vec<ElementRef<'a>> {
        (*self).select(selector.selector()).collect()
    }

    fn find_first(&self, selector: &NamedSelector) -> Option<ElementRef<'a>> {
        (*self).select(selector.selector()).next()
    }

    fn find_nth(&self, selector: &NamedSelector, n: usize) -> Option<ElementRef<'a>> {
        (*self).select(selector.selector()).nth(n)
    }
}

impl<'a> TreeQuery<'a> for ElementRef<'a> {
    fn find_all(&self, selector: &NamedSelector) -> Vec<ElementRef<'a>> {
        self.select(selector.selector()).collect()
    }

    fn find_first(&self, selector: &NamedSelector) -> Option<ElementRef<'a>> {
        self.select(selector.selector()).next()
    }

    fn find_nth(&self, selector: &NamedSelector, n: usize) -> Option<ElementRef<'a>> {
        self.select(selector.selector()).nth(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_css() {
        let template = ResultTemplate::default();
        assert_eq!(template.block_css(), "div.gs_r.gs_or.gs_scl");
        assert_eq!(template.title_css(), "h3 > a");
        assert_eq!(template.byline_css(), ".gs_a");
        assert_eq!(template.action_links_css(), ".gs_fl > a");
        assert_eq!(template.citations_link_position, 2);
    }

    #[test]
    fn test_compile_default_template() {
        let selectors = TemplateSelectors::compile(&ResultTemplate::default()).unwrap();
        assert_eq!(selectors.block.css(), "div.gs_r.gs_or.gs_scl");
        assert_eq!(selectors.citations_link_position, CITATIONS_LINK_POSITION);
    }

    #[test]
    fn test_compile_rejects_bad_markers() {
        let template = ResultTemplate {
            byline_class: "gs a!".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            TemplateSelectors::compile(&template),
            Err(ExtractError::Selector(_))
        ));

        let template = ResultTemplate {
            block_classes: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            TemplateSelectors::compile(&template),
            Err(ExtractError::Selector(_))
        ));
    }

    #[test]
    fn test_tree_queries() {
        let html = Html::parse_fragment(
            r#"<div class="gs_fl"><a>one</a><a>two</a><span><a>nested</a></span><a>three</a></div>"#,
        );
        let selectors = TemplateSelectors::compile(&ResultTemplate::default()).unwrap();
        let doc = &html;

        let links = doc.find_all(&selectors.action_links);
        assert_eq!(links.len(), 3);

        let first = doc.find_first(&selectors.action_links).unwrap();
        assert_eq!(first.text().collect::<String>(), "one");

        let third = doc.find_nth(&selectors.action_links, 2).unwrap();
        assert_eq!(third.text().collect::<String>(), "three");

        assert!(doc.find_nth(&selectors.action_links, 3).is_none());
    }
}
