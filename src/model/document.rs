//! Document-level types.

use super::{ElementNode, ReferenceIndex, Sizing};
use crate::error::Result;
use crate::font::FontRegistry;
use crate::render::{self, RenderOptions, RenderResult};

/// An SVG document ready to render.
///
/// Owns the element tree, its identifier index, sizing, the font catalog,
/// and the warnings of the most recent render pass.
#[derive(Debug, Clone)]
pub struct Document {
    root: ElementNode,
    sizing: Sizing,
    references: ReferenceIndex,
    font_registry: FontRegistry,
    options: RenderOptions,
    warnings: Vec<String>,
}

impl Document {
    /// Create a document from an already-parsed tree.
    ///
    /// The reference index is built here, once, before any render pass.
    pub fn new(root: ElementNode, options: RenderOptions, font_registry: FontRegistry) -> Self {
        let sizing = Sizing::compute(&root, options.bounds);
        let references = ReferenceIndex::build(&root);
        Self {
            root,
            sizing,
            references,
            font_registry,
            options,
            warnings: Vec::new(),
        }
    }

    /// Parse SVG text and create a document from it.
    pub fn parse(svg: &str, options: RenderOptions, font_registry: FontRegistry) -> Result<Self> {
        let root = crate::parser::parse_str(svg)?;
        Ok(Self::new(root, options, font_registry))
    }

    /// The root element.
    pub fn root(&self) -> &ElementNode {
        &self.root
    }

    /// Output dimensions.
    pub fn sizing(&self) -> &Sizing {
        &self.sizing
    }

    /// Identifier index over the tree.
    pub fn references(&self) -> &ReferenceIndex {
        &self.references
    }

    /// Look up an element by identifier.
    pub fn element_by_id(&self, id: &str) -> Option<&ElementNode> {
        self.references.resolve(&self.root, id)
    }

    /// Installed fonts.
    pub fn font_registry(&self) -> &FontRegistry {
        &self.font_registry
    }

    /// Installed fonts, for changes between render passes.
    pub fn font_registry_mut(&mut self) -> &mut FontRegistry {
        &mut self.font_registry
    }

    /// Render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Warnings from the most recent render pass.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Run a render pass over the whole tree.
    ///
    /// Each pass starts from a clean warnings list, so rendering twice
    /// yields identical results.
    pub fn render(&mut self) -> RenderResult {
        let result = render::render_document(self);
        self.warnings = result.warnings.clone();
        result
    }
}
