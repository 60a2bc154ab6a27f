//! Rendering of documents into backend call trees.

mod calls;
mod context;
mod element;
mod json;
mod options;
mod result;
mod text;
pub mod visitor;
mod whitespace;

pub use calls::{CallRecord, CallValue, ElementCalls, Operation, TextOptions};
pub use context::RenderContext;
pub use element::{process_element, render_document, ElementKind};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, DEFAULT_BOUNDS};
pub use result::{RenderResult, RenderStats};
pub use visitor::{
    replay, CallVisitor, CompositeVisitor, FlatCall, FlattenVisitor, TextCollector, VisitorAction,
};
pub use whitespace::{normalize as normalize_whitespace, WhitespaceTracker};
