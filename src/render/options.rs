//! Rendering options and configuration.

use crate::font::DEFAULT_GENERIC_FAMILIES;
use crate::model::State;
use std::collections::BTreeMap;

/// US Letter in points, the default drawing area.
pub const DEFAULT_BOUNDS: [f64; 2] = [612.0, 792.0];

/// Options for a render pass.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Available drawing area `[width, height]` in points
    pub bounds: [f64; 2],

    /// Family tried after every element's own candidates
    pub fallback_font_family: Option<String>,

    /// Generic CSS family name to configured family
    pub generic_families: BTreeMap<String, String>,

    /// `font-family` of the initial state
    pub default_font_family: String,

    /// `font-size` of the initial state, in points
    pub default_font_size: f64,

    /// Append a warning for tags the renderer does not know
    pub warn_unknown_elements: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the available drawing area.
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.bounds = [width, height];
        self
    }

    /// Set the fallback font family.
    pub fn with_fallback_font(mut self, family: impl Into<String>) -> Self {
        self.fallback_font_family = Some(family.into());
        self
    }

    /// Disable the fallback font family.
    pub fn without_fallback_font(mut self) -> Self {
        self.fallback_font_family = None;
        self
    }

    /// Map a generic family name (e.g. `monospace`) to an installed family.
    pub fn with_generic_family(
        mut self,
        generic: impl Into<String>,
        family: impl Into<String>,
    ) -> Self {
        self.generic_families.insert(generic.into(), family.into());
        self
    }

    /// Set the initial font family.
    pub fn with_default_font_family(mut self, family: impl Into<String>) -> Self {
        self.default_font_family = family.into();
        self
    }

    /// Set the initial font size.
    pub fn with_default_font_size(mut self, size: f64) -> Self {
        self.default_font_size = size;
        self
    }

    /// Enable or disable warnings for unknown tags.
    pub fn with_unknown_element_warnings(mut self, warn: bool) -> Self {
        self.warn_unknown_elements = warn;
        self
    }

    /// The state the root element derives from.
    pub fn initial_state(&self) -> State {
        State::initial(&self.default_font_family, self.default_font_size)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            bounds: DEFAULT_BOUNDS,
            fallback_font_family: Some("Times-Roman".to_string()),
            generic_families: DEFAULT_GENERIC_FAMILIES
                .iter()
                .map(|(generic, family)| (generic.to_string(), family.to_string()))
                .collect(),
            default_font_family: "sans-serif".to_string(),
            default_font_size: 16.0,
            warn_unknown_elements: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_bounds(800.0, 600.0)
            .with_fallback_font("Courier")
            .with_generic_family("monospace", "Menlo")
            .with_default_font_size(12.0);

        assert_eq!(options.bounds, [800.0, 600.0]);
        assert_eq!(options.fallback_font_family.as_deref(), Some("Courier"));
        assert_eq!(
            options.generic_families.get("monospace").map(String::as_str),
            Some("Menlo")
        );
        assert_eq!(options.initial_state().font_size, 12.0);
    }

    #[test]
    fn test_default_options() {
        let options = RenderOptions::default();
        assert_eq!(options.bounds, DEFAULT_BOUNDS);
        assert_eq!(options.fallback_font_family.as_deref(), Some("Times-Roman"));
        assert_eq!(options.generic_families.len(), 5);
        assert!(options.warn_unknown_elements);

        let state = options.initial_state();
        assert_eq!(state.font_family, vec!["sans-serif"]);
        assert_eq!(state.font_size, 16.0);
    }

    #[test]
    fn test_without_fallback() {
        let options = RenderOptions::new().without_fallback_font();
        assert!(options.fallback_font_family.is_none());
    }
}
