//! # svgscribe
//!
//! SVG text rendering into backend call trees.
//!
//! This library walks an SVG element tree, cascades inherited presentation
//! attributes, resolves `tref` references and font families, lays out text
//! runs, and records the drawing calls a 2-D backend would receive.
//!
//! ## Quick Start
//!
//! ```
//! use svgscribe::render_str;
//!
//! fn main() -> svgscribe::Result<()> {
//!     let result = render_str(r#"<svg><text x="10" y="20">Hello</text></svg>"#)?;
//!
//!     assert_eq!(result.plain_text(), "Hello");
//!     for (name, args) in result.flatten() {
//!         println!("{} {:?}", name, args);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Attribute cascade**: font, fill, anchor, spacing and `xml:space` inheritance
//! - **References**: `<tref>` content lookup through an identifier index
//! - **Font fallback**: generic families and a document-wide fallback family
//! - **Backend seam**: replay call trees through [`render::CallVisitor`]
//! - **JSON output**: serialize call trees with warnings and statistics

pub mod error;
pub mod font;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use font::{FontHandle, FontNotFound, FontRegistry};
pub use model::{Document, ElementNode, FontStyle, Node, Sizing, State, TextAnchor};
pub use render::{
    CallRecord, CallVisitor, JsonFormat, Operation, RenderOptions, RenderResult, RenderStats,
};

use std::path::Path;

/// Parse SVG text into a document with default options and the standard fonts.
///
/// # Example
///
/// ```
/// let doc = svgscribe::parse_str(r#"<svg height="200"><text id="t">hi</text></svg>"#).unwrap();
/// assert_eq!(doc.sizing().height, 200.0);
/// assert!(doc.references().contains("t"));
/// ```
pub fn parse_str(svg: &str) -> Result<Document> {
    Document::parse(svg, RenderOptions::default(), FontRegistry::standard())
}

/// Read and parse an SVG file with default options and the standard fonts.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let root = parser::parse_file(path)?;
    Ok(Document::new(
        root,
        RenderOptions::default(),
        FontRegistry::standard(),
    ))
}

/// Render SVG text with default options and the standard fonts.
pub fn render_str(svg: &str) -> Result<RenderResult> {
    Scribe::new().render_str(svg)
}

/// Render an SVG file with default options and the standard fonts.
///
/// # Example
///
/// ```no_run
/// let result = svgscribe::render_file("drawing.svg")?;
/// println!("{}", result.plain_text());
/// # Ok::<(), svgscribe::Error>(())
/// ```
pub fn render_file<P: AsRef<Path>>(path: P) -> Result<RenderResult> {
    Scribe::new().render_file(path)
}

/// Builder API for configuring a render.
///
/// # Example
///
/// ```
/// use svgscribe::Scribe;
///
/// let result = Scribe::new()
///     .with_bounds(800.0, 600.0)
///     .without_fallback_font()
///     .render_str(r#"<text font-family="Nope">hi</text>"#)?;
///
/// assert!(result.warnings[0].contains("is not a known font"));
/// # Ok::<(), svgscribe::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Scribe {
    render_options: RenderOptions,
    font_registry: FontRegistry,
}

impl Scribe {
    /// Create a new builder with default options and the standard fonts.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
            font_registry: FontRegistry::standard(),
        }
    }

    /// Replace all render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Set the available drawing area.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.render_options = self.render_options.with_bounds(width, height);
        self
    }

    /// Set the fallback font family.
    pub fn with_fallback_font(mut self, family: impl Into<String>) -> Self {
        self.render_options = self.render_options.with_fallback_font(family);
        self
    }

    /// Disable the fallback font family.
    pub fn without_fallback_font(mut self) -> Self {
        self.render_options = self.render_options.without_fallback_font();
        self
    }

    /// Replace the font registry.
    pub fn with_font_registry(mut self, registry: FontRegistry) -> Self {
        self.font_registry = registry;
        self
    }

    /// Install one font style.
    pub fn with_font(
        mut self,
        family: impl Into<String>,
        style: FontStyle,
        handle: Option<FontHandle>,
    ) -> Self {
        self.font_registry.install(family, style, handle);
        self
    }

    /// Enable or disable warnings for unknown tags.
    pub fn with_unknown_element_warnings(mut self, warn: bool) -> Self {
        self.render_options = self.render_options.with_unknown_element_warnings(warn);
        self
    }

    /// Parse SVG text into a document.
    pub fn parse_str(&self, svg: &str) -> Result<Document> {
        self.validate()?;
        Document::parse(svg, self.render_options.clone(), self.font_registry.clone())
    }

    /// Read and parse an SVG file into a document.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<Document> {
        self.validate()?;
        let root = parser::parse_file(path)?;
        Ok(Document::new(
            root,
            self.render_options.clone(),
            self.font_registry.clone(),
        ))
    }

    /// Parse and render SVG text.
    pub fn render_str(&self, svg: &str) -> Result<RenderResult> {
        let mut doc = self.parse_str(svg)?;
        Ok(doc.render())
    }

    /// Read, parse and render an SVG file.
    pub fn render_file<P: AsRef<Path>>(&self, path: P) -> Result<RenderResult> {
        let mut doc = self.parse_file(path)?;
        Ok(doc.render())
    }

    fn validate(&self) -> Result<()> {
        let [width, height] = self.render_options.bounds;
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidDimensions(format!(
                "bounds must be positive, got {}x{}",
                width, height
            )));
        }
        let size = self.render_options.default_font_size;
        if !size.is_finite() || size <= 0.0 {
            return Err(Error::InvalidDimensions(format!(
                "default font size must be positive, got {}",
                size
            )));
        }
        Ok(())
    }
}

impl Default for Scribe {
    fn default() -> Self {
        Self::new()
    }
}
