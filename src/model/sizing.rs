//! Document dimensions.

use super::ElementNode;
use crate::parser::values::{parse_length_list, parse_number, Length};
use serde::{Deserialize, Serialize};

/// SVG default width when the root carries none.
pub const DEFAULT_WIDTH: f64 = 300.0;

/// SVG default height when the root carries none.
pub const DEFAULT_HEIGHT: f64 = 150.0;

/// Font size used to resolve `em` lengths on the root element.
const ROOT_FONT_SIZE: f64 = 16.0;

/// Resolved output size of a document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sizing {
    /// Output width in points
    pub width: f64,

    /// Output height in points; text baselines are flipped against this
    pub height: f64,

    /// `viewBox` as `[min-x, min-y, width, height]`, if declared
    pub view_box: Option<[f64; 4]>,
}

impl Sizing {
    /// Compute sizing from the root element and the available bounds.
    ///
    /// Explicit `width`/`height` win (percentages resolve against `bounds`),
    /// then the `viewBox` size, then the SVG defaults of 300 by 150.
    pub fn compute(root: &ElementNode, bounds: [f64; 2]) -> Self {
        let view_box = root.attribute("viewBox").and_then(parse_view_box);

        let width = dimension(root.attribute("width"), bounds[0])
            .or(view_box.map(|vb| vb[2]))
            .unwrap_or(DEFAULT_WIDTH);
        let height = dimension(root.attribute("height"), bounds[1])
            .or(view_box.map(|vb| vb[3]))
            .unwrap_or(DEFAULT_HEIGHT);

        log::debug!("Document sized to {}x{}", width, height);
        Self {
            width,
            height,
            view_box,
        }
    }

    /// Convert an SVG y coordinate (top-left origin) to backend space
    /// (bottom-left origin).
    pub fn flip_y(&self, y: f64) -> f64 {
        self.height - y
    }
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            view_box: None,
        }
    }
}

fn dimension(value: Option<&str>, reference: f64) -> Option<f64> {
    let length = Length::parse(value?)?;
    let resolved = length.resolve(ROOT_FONT_SIZE, reference);
    (resolved > 0.0).then_some(resolved)
}

fn parse_view_box(value: &str) -> Option<[f64; 4]> {
    let parts = parse_length_list(value)?;
    let numbers: Vec<f64> = parts
        .into_iter()
        .map(|length| match length {
            Length::Points(v) => Some(v),
            _ => None,
        })
        .collect::<Option<_>>()?;
    match numbers.as_slice() {
        [x, y, w, h] if *w > 0.0 && *h > 0.0 => Some([*x, *y, *w, *h]),
        _ => None,
    }
}

/// Parse `"WxH"` or `"W,H"` bounds, as given on a command line.
pub fn parse_bounds(value: &str) -> Option<[f64; 2]> {
    let (w, h) = value
        .split_once(|c: char| c == 'x' || c == 'X' || c == ',')
        .map(|(w, h)| (w.trim(), h.trim()))?;
    let w = parse_number(w)?;
    let h = parse_number(h)?;
    (w > 0.0 && h > 0.0).then_some([w, h])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_attributes() {
        let sizing = Sizing::compute(&ElementNode::new("svg"), [800.0, 600.0]);
        assert_eq!(sizing.width, 300.0);
        assert_eq!(sizing.height, 150.0);
        assert_eq!(sizing.flip_y(14.0), 136.0);
    }

    #[test]
    fn test_explicit_dimensions() {
        let root = ElementNode::new("svg")
            .with_attribute("width", "2in")
            .with_attribute("height", "50%");
        let sizing = Sizing::compute(&root, [800.0, 600.0]);
        assert_eq!(sizing.width, 144.0);
        assert_eq!(sizing.height, 300.0);
    }

    #[test]
    fn test_view_box_fallback() {
        let root = ElementNode::new("svg").with_attribute("viewBox", "0 0 400, 200");
        let sizing = Sizing::compute(&root, [800.0, 600.0]);
        assert_eq!(sizing.width, 400.0);
        assert_eq!(sizing.height, 200.0);
        assert_eq!(sizing.view_box, Some([0.0, 0.0, 400.0, 200.0]));
    }

    #[test]
    fn test_invalid_dimensions_ignored() {
        let root = ElementNode::new("svg")
            .with_attribute("width", "-5")
            .with_attribute("height", "tall")
            .with_attribute("viewBox", "0 0 0 10");
        let sizing = Sizing::compute(&root, [800.0, 600.0]);
        assert_eq!(sizing, Sizing::default());
    }

    #[test]
    fn test_parse_bounds() {
        assert_eq!(parse_bounds("800x600"), Some([800.0, 600.0]));
        assert_eq!(parse_bounds("612, 792"), Some([612.0, 792.0]));
        assert_eq!(parse_bounds("0x10"), None);
        assert_eq!(parse_bounds("wide"), None);
    }
}
