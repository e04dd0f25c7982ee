//! Fetched Page Extraction
//!
//! Pulls the title and the content-region fragment out of a fetched
//! document.

use glide_dom::serialize;
use glide_html::parse;

/// Extraction failure. Routed to the full-reload fallback by the navigator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PageError {
    #[error("content region '{0}' not found in fetched document")]
    MissingRegion(String),
}

/// Title and content fragment of a fetched document.
#[derive(Debug, Clone, PartialEq)]
pub struct PageParts {
    pub title: String,
    pub fragment_html: String,
}

impl PageParts {
    /// Parse `html` and extract the parts the engine swaps in. A missing
    /// `<title>` is tolerated; a missing content region is not.
    pub fn from_html(html: &str, region_id: &str) -> Result<Self, PageError> {
        let doc = parse(html);
        let region = doc
            .element_by_id(region_id)
            .ok_or_else(|| PageError::MissingRegion(region_id.to_string()))?;
        Ok(Self {
            title: doc.title().unwrap_or_default(),
            fragment_html: serialize::inner_html(&doc, region),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_and_fragment() {
        let html = r#"<!DOCTYPE html>
            <html>
            <head><title>About</title></head>
            <body><div id="main-content"><h1>About</h1></div></body>
            </html>"#;

        let parts = PageParts::from_html(html, "main-content").unwrap();
        assert_eq!(parts.title, "About");
        assert_eq!(parts.fragment_html, "<h1>About</h1>");
    }

    #[test]
    fn test_missing_region_is_an_error() {
        let html = "<html><body><p>no region here</p></body></html>";
        assert!(matches!(
            PageParts::from_html(html, "main-content"),
            Err(PageError::MissingRegion(_))
        ));
    }

    #[test]
    fn test_missing_title_is_tolerated() {
        let html = r#"<body><div id="main-content">x</div></body>"#;
        let parts = PageParts::from_html(html, "main-content").unwrap();
        assert_eq!(parts.title, "");
    }
}
