//! Render result with warnings and statistics.

use super::calls::CallRecord;
use super::visitor::{replay, CallVisitor, FlattenVisitor, FlatCall, TextCollector};
use serde::Serialize;

/// Result of one render pass: the call tree, warnings, and statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderResult {
    /// Top-level backend calls in order
    pub calls: Vec<CallRecord>,

    /// Warnings in the order they were raised
    pub warnings: Vec<String>,

    /// Render statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(calls: Vec<CallRecord>, warnings: Vec<String>, stats: RenderStats) -> Self {
        Self {
            calls,
            warnings,
            stats,
        }
    }

    /// Total number of calls in the tree.
    pub fn call_count(&self) -> usize {
        self.calls.iter().map(CallRecord::count).sum()
    }

    /// Walk the call tree with a visitor.
    pub fn replay<V: CallVisitor + ?Sized>(&self, visitor: &mut V) {
        replay(&self.calls, visitor);
    }

    /// Depth-first `(name, args)` list of every call.
    pub fn flatten(&self) -> Vec<FlatCall> {
        let mut visitor = FlattenVisitor::new();
        self.replay(&mut visitor);
        visitor.into_calls()
    }

    /// Drawn strings, one line per `draw_text` call.
    pub fn plain_text(&self) -> String {
        let mut collector = TextCollector::new();
        self.replay(&mut collector);
        collector.into_lines().join("\n")
    }

    /// Check if any warnings were raised.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Statistics collected during a render pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Elements and text components visited
    pub elements_processed: u32,

    /// `draw_text` calls emitted
    pub text_runs: u32,

    /// Font lookups that found an installed font
    pub fonts_resolved: u32,

    /// Font lookups that found nothing
    pub fonts_missing: u32,

    /// `tref` targets found in the reference index
    pub references_resolved: u32,

    /// `tref` targets missing from the reference index
    pub references_missing: u32,

    /// Elements skipped as unsupported or unknown
    pub elements_skipped: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }
}
