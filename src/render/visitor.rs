//! Visitor seam for consuming a call tree.
//!
//! A drawing backend implements [`CallVisitor`] and receives the recorded
//! calls through [`replay`], exactly in the order and nesting they were
//! emitted. Scoped calls (`fill`, `font`, `character_spacing`, ...) get a
//! matching `leave_call` after their children.
//!
//! # Example
//!
//! ```
//! use svgscribe::render::visitor::{CallVisitor, VisitorAction};
//! use svgscribe::render::CallRecord;
//!
//! struct CountDraws(usize);
//!
//! impl CallVisitor for CountDraws {
//!     fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
//!         if call.name() == "draw_text" {
//!             self.0 += 1;
//!         }
//!         VisitorAction::Continue
//!     }
//! }
//! ```

use super::calls::{CallRecord, CallValue, Operation};

/// Action returned by [`CallVisitor::enter_call`] to steer the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisitorAction {
    /// Visit the children of this call.
    #[default]
    Continue,

    /// Do not descend into this call's children.
    SkipChildren,

    /// End the walk.
    Stop,
}

impl VisitorAction {
    /// Check if this action skips the children.
    pub fn should_skip(&self) -> bool {
        matches!(self, VisitorAction::SkipChildren)
    }

    /// Check if this action ends the walk.
    pub fn should_stop(&self) -> bool {
        matches!(self, VisitorAction::Stop)
    }
}

/// Receiver of replayed backend calls.
///
/// All methods have no-op defaults.
pub trait CallVisitor {
    /// Called before a call's children are visited.
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        let _ = call;
        VisitorAction::Continue
    }

    /// Called after a call's children, unless the walk was stopped.
    fn leave_call(&mut self, call: &CallRecord) {
        let _ = call;
    }
}

/// Walk `calls` depth-first. Returns `false` if a visitor stopped the walk.
pub fn replay<V: CallVisitor + ?Sized>(calls: &[CallRecord], visitor: &mut V) -> bool {
    for call in calls {
        match visitor.enter_call(call) {
            VisitorAction::Stop => return false,
            VisitorAction::SkipChildren => {}
            VisitorAction::Continue => {
                if !replay(&call.children, visitor) {
                    return false;
                }
            }
        }
        visitor.leave_call(call);
    }
    true
}

/// A call without its children, as produced by [`FlattenVisitor`].
pub type FlatCall = (&'static str, Vec<CallValue>);

/// Collects every call as `(name, args)` in depth-first order.
#[derive(Debug, Clone, Default)]
pub struct FlattenVisitor {
    calls: Vec<FlatCall>,
}

impl FlattenVisitor {
    /// Create an empty visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collected calls.
    pub fn calls(&self) -> &[FlatCall] {
        &self.calls
    }

    /// Take the collected calls.
    pub fn into_calls(self) -> Vec<FlatCall> {
        self.calls
    }
}

impl CallVisitor for FlattenVisitor {
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        self.calls.push((call.name(), call.operation.args()));
        VisitorAction::Continue
    }
}

/// Collects the strings of `draw_text` calls.
#[derive(Debug, Clone, Default)]
pub struct TextCollector {
    lines: Vec<String>,
}

impl TextCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the collected strings.
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl CallVisitor for TextCollector {
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        if let Operation::DrawText { text, .. } = &call.operation {
            self.lines.push(text.clone());
        }
        VisitorAction::Continue
    }
}

/// Chains multiple visitors.
///
/// Every visitor sees every entered call. The first non-`Continue` action
/// in chain order decides how the walk proceeds.
#[derive(Default)]
pub struct CompositeVisitor<'a> {
    visitors: Vec<Box<dyn CallVisitor + 'a>>,
}

impl<'a> CompositeVisitor<'a> {
    /// Create a new composite visitor.
    pub fn new() -> Self {
        Self {
            visitors: Vec::new(),
        }
    }

    /// Add a visitor to the chain.
    pub fn with_visitor<V: CallVisitor + 'a>(mut self, visitor: V) -> Self {
        self.visitors.push(Box::new(visitor));
        self
    }

    /// Number of chained visitors.
    pub fn len(&self) -> usize {
        self.visitors.len()
    }

    /// Check if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }
}

impl CallVisitor for CompositeVisitor<'_> {
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        let mut result = VisitorAction::Continue;
        for visitor in &mut self.visitors {
            let action = visitor.enter_call(call);
            if result == VisitorAction::Continue {
                result = action;
            }
        }
        result
    }

    fn leave_call(&mut self, call: &CallRecord) {
        for visitor in &mut self.visitors {
            visitor.leave_call(call);
        }
    }
}

impl<V: CallVisitor + ?Sized> CallVisitor for &mut V {
    fn enter_call(&mut self, call: &CallRecord) -> VisitorAction {
        (**self).enter_call(call)
    }

    fn leave_call(&mut self, call: &CallRecord) {
        (**self).leave_call(call)
    }
}
