//! Parsed page view shared by every check

use scraper::{ElementRef, Html, Selector};

/// A page parsed for rule evaluation
///
/// Parsing never fails: malformed markup is repaired best-effort by the
/// HTML5 tree builder and the recoverable errors are only counted. The raw
/// markup is kept alongside the tree for checks that pattern-match CSS.
#[derive(Debug)]
pub struct PageDocument {
    html: Html,
    raw: String,
}

impl PageDocument {
    /// Parses page markup into a queryable document
    ///
    /// # Examples
    ///
    /// ```
    /// use a11y_audit::rules::PageDocument;
    ///
    /// let doc = PageDocument::parse("<title> Home </title><p>unclosed");
    /// assert_eq!(doc.title(), Some("Home".to_string()));
    /// ```
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
            raw: markup.to_string(),
        }
    }

    /// The unparsed markup
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The `<html>` element; the tree builder always creates one
    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching a CSS selector, in document order
    ///
    /// An invalid selector matches nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Trimmed text of the first `<title>` element, if there is one
    pub fn title(&self) -> Option<String> {
        self.select("title")
            .first()
            .map(|t| t.text().collect::<String>().trim().to_string())
    }

    /// Number of recoverable parse errors the tree builder reported
    pub fn parse_error_count(&self) -> usize {
        self.html.errors.len()
    }
}
