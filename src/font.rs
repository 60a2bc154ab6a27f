//! Installed-font catalog and family resolution.
//!
//! The registry maps a family name to the styles installed for it. A style
//! may be declared without a usable handle (`None`), which lookups treat as
//! unavailable. Family names match case-sensitively and exactly.
//!
//! # Example
//!
//! ```
//! use svgscribe::font::{FontHandle, FontRegistry};
//! use svgscribe::model::FontStyle;
//!
//! let mut registry = FontRegistry::new();
//! registry.install("Courier", FontStyle::Normal, Some(FontHandle::Builtin));
//!
//! let candidates = vec!["Courier".to_string()];
//! let font = registry.resolve(&candidates, FontStyle::Normal).unwrap();
//! assert_eq!(font.family, "Courier");
//! ```

use crate::model::FontStyle;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use thiserror::Error;

/// Where the backend finds an installed font.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum FontHandle {
    /// A font the backend provides without a file (standard 14 PDF fonts)
    Builtin,
    /// A font file on disk
    File(PathBuf),
}

/// A successful registry lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFont<'a> {
    /// Family name as registered
    pub family: &'a str,
    /// Style that was matched
    pub style: FontStyle,
    /// Installed handle
    pub handle: &'a FontHandle,
}

/// No candidate family yielded a usable font.
///
/// The display text is the warning appended to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Font family '{requested}' style '{style}' is not a known font, and the fallback font could not be found.")]
pub struct FontNotFound {
    /// The family list as requested by the element
    pub requested: String,
    /// Requested style
    pub style: FontStyle,
}

/// Catalog of installed fonts.
#[derive(Debug, Clone, Default)]
pub struct FontRegistry {
    installed: HashMap<String, BTreeMap<FontStyle, Option<FontHandle>>>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the standard PDF fonts the backend always provides.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for family in ["Courier", "Helvetica", "Times-Roman"] {
            for style in FontStyle::ALL {
                registry.install(family, style, Some(FontHandle::Builtin));
            }
        }
        for family in ["Symbol", "ZapfDingbats"] {
            registry.install(family, FontStyle::Normal, Some(FontHandle::Builtin));
        }
        registry
    }

    /// Register one style of a family. `None` declares it without a usable handle.
    pub fn install(
        &mut self,
        family: impl Into<String>,
        style: FontStyle,
        handle: Option<FontHandle>,
    ) {
        self.installed
            .entry(family.into())
            .or_default()
            .insert(style, handle);
    }

    /// Builder form of [`FontRegistry::install`].
    pub fn with_font(
        mut self,
        family: impl Into<String>,
        style: FontStyle,
        handle: Option<FontHandle>,
    ) -> Self {
        self.install(family, style, handle);
        self
    }

    /// Remove a family entirely. Returns whether it was present.
    pub fn remove_family(&mut self, family: &str) -> bool {
        self.installed.remove(family).is_some()
    }

    /// Check whether a family is registered.
    pub fn contains_family(&self, family: &str) -> bool {
        self.installed.contains_key(family)
    }

    /// Registered family names, sorted.
    pub fn families(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.installed.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Look up one family at one style.
    pub fn lookup(&self, family: &str, style: FontStyle) -> Option<ResolvedFont<'_>> {
        let (name, styles) = self.installed.get_key_value(family)?;
        let handle = styles.get(&style)?.as_ref()?;
        Some(ResolvedFont {
            family: name,
            style,
            handle,
        })
    }

    /// Try `candidates` in order and return the first family with a usable
    /// entry for exactly `style`.
    pub fn resolve(&self, candidates: &[String], style: FontStyle) -> Option<ResolvedFont<'_>> {
        candidates.iter().find_map(|family| {
            let found = self.lookup(family, style);
            if found.is_none() && self.contains_family(family) {
                log::debug!("Font family '{}' has no usable '{}' style", family, style);
            }
            found
        })
    }
}

/// Generic CSS family names and the families they stand for by default.
pub const DEFAULT_GENERIC_FAMILIES: [(&str, &str); 5] = [
    ("serif", "Times-Roman"),
    ("sans-serif", "Helvetica"),
    ("cursive", "Times-Roman"),
    ("fantasy", "Times-Roman"),
    ("monospace", "Courier"),
];

/// Build the ordered candidate chain for a `font-family` list.
///
/// Generic names are replaced by their configured family, then the
/// document-wide fallback is appended. Duplicates are kept only once.
pub fn font_candidates(
    families: &[String],
    generic: &BTreeMap<String, String>,
    fallback: Option<&str>,
) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(families.len() + 1);
    let mapped = families
        .iter()
        .map(|name| generic.get(name).unwrap_or(name).as_str())
        .chain(fallback);
    for name in mapped {
        if !out.iter().any(|existing| existing == name) {
            out.push(name.to_string());
        }
    }
    out
}
