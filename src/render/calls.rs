//! Backend call records and the per-element call emitter.
//!
//! A render pass produces a tree of [`CallRecord`]s. Each record is one
//! backend operation; its children are the operations performed inside the
//! scope it opens (a fill, a font, a text group, ...).

use crate::model::{FontStyle, TextAnchor};
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Options of a `draw_text` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOptions {
    /// Font size in points
    pub size: f64,
    /// Font style
    pub style: FontStyle,
    /// Anchor of `at` relative to the text
    pub text_anchor: TextAnchor,
    /// Baseline position in backend space (bottom-left origin)
    pub at: [f64; 2],
}

/// A backend operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Set the fill color for the enclosed calls
    FillColor(String),
    /// Fill the enclosed drawing
    Fill,
    /// Select a font for the enclosed calls
    Font {
        /// Registered family name
        family: String,
        /// Style to select
        style: FontStyle,
    },
    /// Shared text-rendering context for the runs of one text element
    TextGroup,
    /// Extra space between characters for the enclosed calls
    CharacterSpacing(f64),
    /// Draw one run of text
    DrawText {
        /// Text to draw
        text: String,
        /// Size, style, anchor and position
        options: TextOptions,
    },
}

/// A positional argument or option value in the generic call protocol.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CallValue {
    /// A number
    Number(f64),
    /// A string or symbolic name
    String(String),
    /// A coordinate pair
    Point([f64; 2]),
}

impl From<f64> for CallValue {
    fn from(value: f64) -> Self {
        CallValue::Number(value)
    }
}

impl From<&str> for CallValue {
    fn from(value: &str) -> Self {
        CallValue::String(value.to_string())
    }
}

impl From<String> for CallValue {
    fn from(value: String) -> Self {
        CallValue::String(value)
    }
}

impl Operation {
    /// Protocol name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FillColor(_) => "fill_color",
            Operation::Fill => "fill",
            Operation::Font { .. } => "font",
            Operation::TextGroup => "text_group",
            Operation::CharacterSpacing(_) => "character_spacing",
            Operation::DrawText { .. } => "draw_text",
        }
    }

    /// Positional arguments.
    pub fn args(&self) -> Vec<CallValue> {
        match self {
            Operation::FillColor(hex) => vec![hex.as_str().into()],
            Operation::Fill | Operation::TextGroup => Vec::new(),
            Operation::Font { family, .. } => vec![family.as_str().into()],
            Operation::CharacterSpacing(spacing) => vec![(*spacing).into()],
            Operation::DrawText { text, .. } => vec![text.as_str().into()],
        }
    }

    /// Named options.
    pub fn options(&self) -> BTreeMap<&'static str, CallValue> {
        let mut options = BTreeMap::new();
        match self {
            Operation::Font { style, .. } => {
                options.insert("style", style.as_str().into());
            }
            Operation::DrawText { options: opts, .. } => {
                options.insert("size", opts.size.into());
                options.insert("style", opts.style.as_str().into());
                options.insert("text_anchor", opts.text_anchor.as_str().into());
                options.insert("at", CallValue::Point(opts.at));
            }
            _ => {}
        }
        options
    }
}

/// One recorded backend call and the calls made inside its scope.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// The operation
    pub operation: Operation,
    /// Calls nested inside this one, in order
    pub children: Vec<CallRecord>,
}

impl CallRecord {
    /// Create a record with no children.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            children: Vec::new(),
        }
    }

    /// Builder: set the nested calls.
    pub fn with_children(mut self, children: Vec<CallRecord>) -> Self {
        self.children = children;
        self
    }

    /// Protocol name of the operation.
    pub fn name(&self) -> &'static str {
        self.operation.name()
    }

    /// Number of records in this subtree, including this one.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(CallRecord::count).sum::<usize>()
    }
}

impl Serialize for CallRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CallRecord", 4)?;
        state.serialize_field("name", self.operation.name())?;
        state.serialize_field("args", &self.operation.args())?;
        state.serialize_field("options", &self.operation.options())?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

/// Call emitter for one element.
///
/// Calls are appended at the current insertion point. Entering a call moves
/// the insertion point into that call's children for the rest of the
/// element's processing, so every later call lands inside its scope.
#[derive(Debug, Clone, Default)]
pub struct ElementCalls {
    base: Vec<CallRecord>,
    path: Vec<usize>,
}

impl ElementCalls {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    fn current_mut(&mut self) -> &mut Vec<CallRecord> {
        let mut list = &mut self.base;
        for &i in &self.path {
            list = &mut list[i].children;
        }
        list
    }

    /// Append a call at the insertion point.
    pub fn add_call(&mut self, operation: Operation) {
        log::trace!("add_call {}", operation.name());
        self.current_mut().push(CallRecord::new(operation));
    }

    /// Append a call and move the insertion point inside it.
    pub fn add_call_and_enter(&mut self, operation: Operation) {
        log::trace!("add_call_and_enter {}", operation.name());
        let list = self.current_mut();
        list.push(CallRecord::new(operation));
        let index = list.len() - 1;
        self.path.push(index);
    }

    /// Append already-built records (a child element's calls) at the insertion point.
    pub fn append(&mut self, records: Vec<CallRecord>) {
        if !records.is_empty() {
            self.current_mut().extend(records);
        }
    }

    /// Calls at the current insertion point.
    pub fn calls(&self) -> &[CallRecord] {
        let mut list = &self.base;
        for &i in &self.path {
            list = &list[i].children;
        }
        list
    }

    /// All calls of the element, from the outermost scope.
    pub fn base_calls(&self) -> &[CallRecord] {
        &self.base
    }

    /// Check whether nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Take the outermost call list.
    pub fn into_calls(self) -> Vec<CallRecord> {
        self.base
    }
}
