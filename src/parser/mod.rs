//! SVG input parsing.
//!
//! Turns markup into the element tree consumed by the renderer, and holds
//! the parsers for raw attribute values shared by the model and renderer.

mod svg;
pub mod values;

pub use svg::{parse_file, parse_str};
