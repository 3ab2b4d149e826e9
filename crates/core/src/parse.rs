//! HTML parsing and tree queries.
//!
//! This module provides the [`Document`] and [`Element`] types that the
//! extractor walks. Both wrap `scraper` and expose only what extraction
//! needs: descendant selection, element children and text content.
//!
//! # Example
//!
//! ```rust
//! use kereta_core::parse::Document;
//!
//! let html = r#"
//!     <div class="data-wrapper"><div class="name">ARGO LAWU</div></div>
//!     <div class="data-wrapper"><div class="name">TAKSAKA</div></div>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let wrappers = doc.select("div.data-wrapper").unwrap();
//! assert_eq!(wrappers.len(), 2);
//! assert_eq!(wrappers[1].text(), "TAKSAKA");
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{KeretaError, Result};

/// Compiles a CSS selector, mapping failures to [`KeretaError::HtmlParseError`].
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| KeretaError::HtmlParseError(format!("Invalid selector {:?}: {}", selector, e)))
}

/// Represents a parsed HTML document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// Parsing is lenient: malformed markup still yields a document.
    pub fn parse(html: &str) -> Result<Self> {
        Ok(Self { html: Html::parse_document(html) })
    }

    /// Selects elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`KeretaError::HtmlParseError`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.select_compiled(&sel))
    }

    /// Selects elements with an already compiled selector, in document order.
    pub fn select_compiled(&'_ self, selector: &Selector) -> Vec<Element<'_>> {
        self.html.select(selector).map(|el| Element { element: el }).collect()
    }
}

/// A single element of a parsed [`Document`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the concatenation of all text nodes within this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets the element children, skipping text and comment nodes.
    pub fn children(&self) -> Vec<Element<'a>> {
        self.element
            .children()
            .filter_map(ElementRef::wrap)
            .map(|el| Element { element: el })
            .collect()
    }

    /// Selects descendant elements using a CSS selector string.
    ///
    /// # Errors
    ///
    /// Returns [`KeretaError::HtmlParseError`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.select_compiled(&sel))
    }

    /// Selects descendant elements with an already compiled selector.
    pub fn select_compiled(&self, selector: &Selector) -> Vec<Element<'a>> {
        self.element.select(selector).map(|el| Element { element: el }).collect()
    }
}
