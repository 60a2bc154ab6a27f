//! Inherited presentation state and its cascade.
//!
//! A [`State`] is an immutable value. Each element derives its own from the
//! parent's with [`State::derive`]; attributes the element does not set are
//! carried over unchanged.

use super::{Attributes, Color, Paint};
use crate::parser::values::{is_inherit, parse_font_family, parse_font_size, Length};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Font style as requested from the font registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Upright, regular weight
    Normal,
    /// Upright, bold weight
    Bold,
    /// Slanted, regular weight
    Italic,
    /// Slanted, bold weight
    BoldItalic,
}

impl FontStyle {
    /// All styles in registry order.
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Normal,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    /// Combine weight and slant.
    pub fn from_parts(weight: FontWeight, slant: FontSlant) -> Self {
        match (weight, slant) {
            (FontWeight::Normal, FontSlant::Normal) => FontStyle::Normal,
            (FontWeight::Bold, FontSlant::Normal) => FontStyle::Bold,
            (FontWeight::Normal, FontSlant::Italic) => FontStyle::Italic,
            (FontWeight::Bold, FontSlant::Italic) => FontStyle::BoldItalic,
        }
    }

    /// Backend name of the style.
    pub fn as_str(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold_italic",
        }
    }
}

impl fmt::Display for FontStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font weight, reduced to what the style enum can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Weights below 600
    #[default]
    Normal,
    /// Weights of 600 and above
    Bold,
}

impl FontWeight {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" | "lighter" => Some(FontWeight::Normal),
            "bold" | "bolder" => Some(FontWeight::Bold),
            other => {
                let numeric: u16 = other.parse().ok()?;
                if numeric >= 600 {
                    Some(FontWeight::Bold)
                } else {
                    Some(FontWeight::Normal)
                }
            }
        }
    }
}

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSlant {
    /// Upright
    #[default]
    Normal,
    /// Italic or oblique
    Italic,
}

impl FontSlant {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "normal" => Some(FontSlant::Normal),
            "italic" | "oblique" => Some(FontSlant::Italic),
            _ => None,
        }
    }
}

/// Horizontal alignment of a text run relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    /// Text starts at the anchor
    #[default]
    Start,
    /// Text is centered on the anchor
    Middle,
    /// Text ends at the anchor
    End,
}

impl TextAnchor {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "start" => Some(TextAnchor::Start),
            "middle" => Some(TextAnchor::Middle),
            "end" => Some(TextAnchor::End),
            _ => None,
        }
    }

    /// Backend name of the anchor.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Whitespace handling mode from `xml:space`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XmlSpace {
    /// Collapse runs of whitespace and trim
    #[default]
    Default,
    /// Turn tabs and newlines into spaces, keep everything else
    Preserve,
}

impl XmlSpace {
    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "default" => Some(XmlSpace::Default),
            "preserve" => Some(XmlSpace::Preserve),
            _ => None,
        }
    }
}

/// Inherited presentation properties of one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Font size in points
    pub font_size: f64,

    /// Font family candidates, most preferred first
    pub font_family: Vec<String>,

    /// Font weight
    pub font_weight: FontWeight,

    /// Font slant
    pub font_slant: FontSlant,

    /// Text anchor
    pub text_anchor: TextAnchor,

    /// Fill paint
    pub fill: Paint,

    /// The `color` property, used by `currentColor`
    pub color: Color,

    /// Extra spacing between characters, in points
    pub letter_spacing: f64,

    /// Whitespace handling
    pub xml_space: XmlSpace,
}

impl State {
    /// The initial state of a document.
    pub fn initial(font_family: &str, font_size: f64) -> Self {
        Self {
            font_size,
            font_family: parse_font_family(font_family),
            font_weight: FontWeight::Normal,
            font_slant: FontSlant::Normal,
            text_anchor: TextAnchor::Start,
            fill: Paint::Color(Color::BLACK),
            color: Color::BLACK,
            letter_spacing: 0.0,
            xml_space: XmlSpace::Default,
        }
    }

    /// Combined font style.
    pub fn font_style(&self) -> FontStyle {
        FontStyle::from_parts(self.font_weight, self.font_slant)
    }

    /// The color text is filled with, or `None` when fill is `none`.
    pub fn fill_color(&self) -> Option<Color> {
        self.fill.resolve(self.color)
    }

    /// Derive a child's state from this one and the child's own attributes.
    ///
    /// `attributes` must already have inline `style` declarations merged in.
    /// Unset, `inherit`, and unparseable values keep the parent's value.
    pub fn derive(&self, attributes: &Attributes) -> State {
        let mut state = self.clone();
        let own = |name: &str| {
            attributes
                .get(name)
                .map(String::as_str)
                .filter(|value| !is_inherit(value))
        };

        if let Some(size) = own("font-size").and_then(|v| parse_font_size(v, self.font_size)) {
            state.font_size = size;
        }
        if let Some(family) = own("font-family").map(parse_font_family) {
            if !family.is_empty() {
                state.font_family = family;
            }
        }
        if let Some(weight) = own("font-weight").and_then(FontWeight::parse) {
            state.font_weight = weight;
        }
        if let Some(slant) = own("font-style").and_then(FontSlant::parse) {
            state.font_slant = slant;
        }
        if let Some(anchor) = own("text-anchor").and_then(TextAnchor::parse) {
            state.text_anchor = anchor;
        }
        if let Some(color) = own("color").and_then(Color::parse) {
            state.color = color;
        }
        if let Some(fill) = own("fill").and_then(Paint::parse) {
            state.fill = fill;
        }
        if let Some(spacing) = own("letter-spacing").and_then(|v| parse_spacing(v, &state)) {
            state.letter_spacing = spacing;
        }
        if let Some(space) = own("xml:space").and_then(XmlSpace::parse) {
            state.xml_space = space;
        }

        state
    }
}

fn parse_spacing(value: &str, state: &State) -> Option<f64> {
    if value.trim().eq_ignore_ascii_case("normal") {
        return Some(0.0);
    }
    match Length::parse(value)? {
        Length::Percent(_) => None,
        length => Some(length.resolve(state.font_size, state.font_size)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_unset_attributes_inherit() {
        let parent = State::initial("sans-serif", 16.0).derive(&attrs(&[
            ("text-anchor", "middle"),
            ("font-size", "12"),
        ]));
        let child = parent.derive(&Attributes::new());
        assert_eq!(child, parent);
        assert_eq!(child.font_size, 12.0);
        assert_eq!(child.text_anchor, TextAnchor::Middle);
    }

    #[test]
    fn test_derive_does_not_touch_parent() {
        let parent = State::initial("sans-serif", 16.0);
        let before = parent.clone();
        let child = parent.derive(&attrs(&[("fill", "red"), ("font-size", "30")]));
        assert_eq!(parent, before);
        assert_eq!(child.fill, Paint::Color(Color::rgb(255, 0, 0)));
        assert_eq!(child.font_size, 30.0);
    }

    #[test]
    fn test_inherit_keyword_and_garbage() {
        let parent = State::initial("serif", 10.0);
        let child = parent.derive(&attrs(&[
            ("font-size", "inherit"),
            ("text-anchor", "sideways"),
            ("fill", "not-a-color"),
        ]));
        assert_eq!(child, parent);
    }

    #[test]
    fn test_weight_and_slant_combine() {
        let bold = State::initial("serif", 10.0).derive(&attrs(&[("font-weight", "700")]));
        assert_eq!(bold.font_style(), FontStyle::Bold);

        let both = bold.derive(&attrs(&[("font-style", "oblique")]));
        assert_eq!(both.font_style(), FontStyle::BoldItalic);

        let italic = both.derive(&attrs(&[("font-weight", "normal")]));
        assert_eq!(italic.font_style(), FontStyle::Italic);
    }

    #[test]
    fn test_relative_font_size() {
        let state = State::initial("serif", 10.0).derive(&attrs(&[("font-size", "2em")]));
        assert_eq!(state.font_size, 20.0);
    }

    #[test]
    fn test_letter_spacing() {
        let state = State::initial("serif", 10.0);
        assert_eq!(state.letter_spacing, 0.0);

        let spaced = state.derive(&attrs(&[("letter-spacing", "5")]));
        assert_eq!(spaced.letter_spacing, 5.0);

        let reset = spaced.derive(&attrs(&[("letter-spacing", "normal")]));
        assert_eq!(reset.letter_spacing, 0.0);

        let em = state.derive(&attrs(&[("letter-spacing", "0.5em")]));
        assert_eq!(em.letter_spacing, 5.0);
    }

    #[test]
    fn test_current_color_fill() {
        let state = State::initial("serif", 10.0)
            .derive(&attrs(&[("color", "blue"), ("fill", "currentColor")]));
        assert_eq!(state.fill_color(), Some(Color::rgb(0, 0, 255)));

        let none = state.derive(&attrs(&[("fill", "none")]));
        assert_eq!(none.fill_color(), None);
    }

    #[test]
    fn test_xml_space() {
        let state = State::initial("serif", 10.0);
        assert_eq!(state.xml_space, XmlSpace::Default);
        let preserved = state.derive(&attrs(&[("xml:space", "preserve")]));
        assert_eq!(preserved.xml_space, XmlSpace::Preserve);
        assert_eq!(preserved.derive(&Attributes::new()).xml_space, XmlSpace::Preserve);
    }

    #[test]
    fn test_font_style_names() {
        assert_eq!(FontStyle::BoldItalic.to_string(), "bold_italic");
        assert_eq!(TextAnchor::Middle.as_str(), "middle");
    }
}
