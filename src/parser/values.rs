//! Parsers for raw attribute values: lengths, lists, font properties, inline styles.

use regex::Regex;
use std::sync::OnceLock;

/// Points per inch; user units and pixels map 1:1 onto points.
const POINTS_PER_INCH: f64 = 72.0;

/// A parsed length, before resolution against font size or a reference length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute length in points
    Points(f64),
    /// Multiple of the current font size
    Em(f64),
    /// Multiple of half the current font size
    Ex(f64),
    /// Percentage of a reference length
    Percent(f64),
}

impl Length {
    /// Parse `<number><unit>?`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = length_regex().captures(value)?;
        let number: f64 = caps.get(1)?.as_str().parse().ok()?;
        if !number.is_finite() {
            return None;
        }

        let unit = caps.get(2).map(|m| m.as_str().to_ascii_lowercase());
        let length = match unit.as_deref() {
            None | Some("px") | Some("pt") => Length::Points(number),
            Some("in") => Length::Points(number * POINTS_PER_INCH),
            Some("cm") => Length::Points(number * POINTS_PER_INCH / 2.54),
            Some("mm") => Length::Points(number * POINTS_PER_INCH / 25.4),
            Some("pc") => Length::Points(number * 12.0),
            Some("em") => Length::Em(number),
            Some("ex") => Length::Ex(number),
            Some("%") => Length::Percent(number),
            Some(_) => return None,
        };
        Some(length)
    }

    /// Resolve to points.
    pub fn resolve(self, font_size: f64, reference: f64) -> f64 {
        match self {
            Length::Points(v) => v,
            Length::Em(v) => v * font_size,
            Length::Ex(v) => v * font_size / 2.0,
            Length::Percent(v) => v * reference / 100.0,
        }
    }
}

/// Characters XML treats as whitespace.
pub(crate) const XML_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

fn length_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[ \t\r\n]*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)[ \t\r\n]*([A-Za-z]+|%)?[ \t\r\n]*$",
        )
        .expect("length pattern is valid")
    })
}

fn list_separator_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[ \t\r\n]*,[ \t\r\n]*|[ \t\r\n]+").expect("list separator pattern is valid")
    })
}

/// Parse a whitespace or comma separated list of lengths.
///
/// Returns `None` if any entry is malformed.
pub fn parse_length_list(value: &str) -> Option<Vec<Length>> {
    let trimmed = value.trim_matches(XML_WHITESPACE);
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    list_separator_regex()
        .split(trimmed)
        .map(Length::parse)
        .collect()
}

/// Parse a plain number.
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split a `font-family` value into candidate names.
///
/// Names are trimmed and unquoted; empty entries are dropped.
pub fn parse_font_family(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|name| name.trim().trim_matches(|c| c == '"' || c == '\''))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Resolve a `font-size` value against the parent's size.
pub fn parse_font_size(value: &str, parent: f64) -> Option<f64> {
    let keyword = value.trim().to_ascii_lowercase();
    let size = match keyword.as_str() {
        "xx-small" => 9.0,
        "x-small" => 10.0,
        "small" => 13.0,
        "medium" => 16.0,
        "large" => 18.0,
        "x-large" => 24.0,
        "xx-large" => 32.0,
        "larger" => parent * 1.2,
        "smaller" => parent / 1.2,
        _ => match Length::parse(&keyword)? {
            Length::Percent(v) => parent * v / 100.0,
            length => length.resolve(parent, parent),
        },
    };
    (size >= 0.0).then_some(size)
}

/// Split an inline `style` attribute into `(property, value)` declarations.
///
/// Property names are lower-cased; `!important` markers are dropped.
pub fn parse_style_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name, value.to_string()))
            }
        })
        .collect()
}

/// Check whether a cascaded attribute value means "use the parent's value".
pub fn is_inherit(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("inherit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_units() {
        assert_eq!(Length::parse("50"), Some(Length::Points(50.0)));
        assert_eq!(Length::parse(" 12.5px "), Some(Length::Points(12.5)));
        assert_eq!(Length::parse("1in"), Some(Length::Points(72.0)));
        assert_eq!(Length::parse("2pc"), Some(Length::Points(24.0)));
        assert_eq!(Length::parse("-.5em"), Some(Length::Em(-0.5)));
        assert_eq!(Length::parse("50%"), Some(Length::Percent(50.0)));
        assert_eq!(Length::parse("1e2"), Some(Length::Points(100.0)));
        assert_eq!(Length::parse("abc"), None);
        assert_eq!(Length::parse("10furlongs"), None);
        assert_eq!(Length::parse(""), None);
    }

    #[test]
    fn test_length_resolve() {
        assert_eq!(Length::Em(2.0).resolve(16.0, 0.0), 32.0);
        assert_eq!(Length::Ex(1.0).resolve(16.0, 0.0), 8.0);
        assert_eq!(Length::Percent(25.0).resolve(16.0, 200.0), 50.0);
        let cm = Length::parse("2.54cm").unwrap().resolve(16.0, 0.0);
        assert!((cm - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_list() {
        assert_eq!(
            parse_length_list("10 20,30 , 40"),
            Some(vec![
                Length::Points(10.0),
                Length::Points(20.0),
                Length::Points(30.0),
                Length::Points(40.0),
            ])
        );
        assert_eq!(parse_length_list(""), Some(vec![]));
        assert_eq!(parse_length_list("10 x"), None);
        assert_eq!(
            parse_length_list("\n\t10\r\n20 "),
            Some(vec![Length::Points(10.0), Length::Points(20.0)])
        );
        assert_eq!(parse_length_list("10\u{a0}20"), None);
    }

    #[test]
    fn test_font_family() {
        assert_eq!(
            parse_font_family("'Open Sans', \"Helvetica\" ,monospace,"),
            vec!["Open Sans", "Helvetica", "monospace"]
        );
        assert_eq!(parse_font_family("does not exist"), vec!["does not exist"]);
        assert!(parse_font_family(" , ").is_empty());
    }

    #[test]
    fn test_font_size() {
        assert_eq!(parse_font_size("12", 16.0), Some(12.0));
        assert_eq!(parse_font_size("medium", 10.0), Some(16.0));
        assert_eq!(parse_font_size("2em", 10.0), Some(20.0));
        assert_eq!(parse_font_size("150%", 10.0), Some(15.0));
        assert_eq!(parse_font_size("-3", 10.0), None);
        assert_eq!(parse_font_size("big", 10.0), None);
    }

    #[test]
    fn test_style_declarations() {
        let decls = parse_style_declarations("Fill: red; font-size:12px !important;;bogus");
        assert_eq!(
            decls,
            vec![
                ("fill".to_string(), "red".to_string()),
                ("font-size".to_string(), "12px".to_string()),
            ]
        );
    }
}
