//! Whitespace normalization for text runs under `xml:space`.

use crate::model::XmlSpace;
use crate::parser::values::XML_WHITESPACE;
use regex::Regex;
use std::sync::OnceLock;

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\r\n]+").expect("whitespace pattern is valid"))
}

/// Normalize one run of character data in isolation.
///
/// `preserve` turns each newline and tab into one space and keeps every
/// other character. `default` collapses runs of XML whitespace (space,
/// tab, CR, LF) and trims both ends; other Unicode spaces are content.
pub fn normalize(text: &str, mode: XmlSpace) -> String {
    match mode {
        XmlSpace::Preserve => text.replace(['\n', '\t'], " "),
        XmlSpace::Default => whitespace_regex().replace_all(text, " ")
            .trim_matches(XML_WHITESPACE)
            .to_string(),
    }
}

/// Normalizes the runs of one text element in document order.
///
/// In default mode a run's leading space is dropped when the text emitted
/// before it already ended in a space, or when nothing was emitted yet.
#[derive(Debug, Clone)]
pub struct WhitespaceTracker {
    ends_with_space: bool,
}

impl Default for WhitespaceTracker {
    fn default() -> Self {
        Self {
            ends_with_space: true,
        }
    }
}

impl WhitespaceTracker {
    /// Start a new text element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize the next run.
    pub fn next_run(&mut self, text: &str, mode: XmlSpace) -> String {
        let run = match mode {
            XmlSpace::Preserve => normalize(text, mode),
            XmlSpace::Default => {
                let collapsed = whitespace_regex().replace_all(text, " ");
                if self.ends_with_space {
                    collapsed.trim_start_matches(' ').to_string()
                } else {
                    collapsed.into_owned()
                }
            }
        };
        if !run.is_empty() {
            self.ends_with_space = run.ends_with(' ');
        }
        run
    }
}
