//! Document model types.
//!
//! This module defines the input element tree, the inherited presentation
//! state that cascades through it, the identifier index used for
//! references, and the document that ties them together for a render pass.

mod color;
mod document;
mod node;
mod reference;
mod sizing;
mod state;

pub use color::{Color, Paint};
pub use document::Document;
pub use node::{Attributes, ElementNode, Node};
pub use reference::{fragment_id, ReferenceIndex};
pub use sizing::{parse_bounds, Sizing, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use state::{FontSlant, FontStyle, FontWeight, State, TextAnchor, XmlSpace};
