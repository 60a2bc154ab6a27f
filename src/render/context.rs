//! Per-pass render context.

use super::calls::{CallRecord, Operation};
use super::result::{RenderResult, RenderStats};
use crate::font::{font_candidates, FontNotFound};
use crate::model::{Document, ElementNode, Sizing, State};

/// Shared inputs and accumulated output of one render pass.
///
/// The document is borrowed read-only; warnings and statistics start empty
/// for every pass.
#[derive(Debug)]
pub struct RenderContext<'a> {
    document: &'a Document,
    warnings: Vec<String>,
    pub(crate) stats: RenderStats,
}

impl<'a> RenderContext<'a> {
    /// Start a pass over `document`.
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            warnings: Vec::new(),
            stats: RenderStats::new(),
        }
    }

    /// The document being rendered.
    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Output dimensions.
    pub fn sizing(&self) -> &'a Sizing {
        self.document.sizing()
    }

    /// Warnings raised so far.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Statistics so far.
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Append a warning.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{}", message);
        self.warnings.push(message);
    }

    /// Resolve an element's font to a `font` call.
    ///
    /// Returns `None` and records a warning when no candidate is installed
    /// at the requested style.
    pub fn resolve_font(&mut self, state: &State) -> Option<Operation> {
        let options = self.document.options();
        let candidates = font_candidates(
            &state.font_family,
            &options.generic_families,
            options.fallback_font_family.as_deref(),
        );
        let style = state.font_style();

        match self.document.font_registry().resolve(&candidates, style) {
            Some(font) => {
                self.stats.fonts_resolved += 1;
                Some(Operation::Font {
                    family: font.family.to_string(),
                    style: font.style,
                })
            }
            None => {
                self.stats.fonts_missing += 1;
                let err = FontNotFound {
                    requested: state.font_family.join(", "),
                    style,
                };
                self.warn(err.to_string());
                None
            }
        }
    }

    /// Look up a `tref`-style reference target.
    pub fn resolve_reference(&mut self, id: &str) -> Option<&'a ElementNode> {
        let target = self.document.element_by_id(id);
        if target.is_some() {
            self.stats.references_resolved += 1;
        } else {
            self.stats.references_missing += 1;
            log::debug!("Reference '#{}' not found; ignoring", id);
        }
        target
    }

    /// Finish the pass.
    pub fn finish(self, calls: Vec<CallRecord>) -> RenderResult {
        RenderResult::new(calls, self.warnings, self.stats)
    }
}
