//! Text layout and emission.
//!
//! A `<text>` element is processed in two steps. Layout walks the element
//! and its `tspan`/`tref` components in document order: it cascades state,
//! resolves fonts, normalizes whitespace across all runs, and assigns each
//! chunk of text its baseline position. Emission then turns the laid-out
//! component tree into scoped backend calls.

use super::calls::{ElementCalls, Operation, TextOptions};
use super::context::RenderContext;
use super::element::own_fill_color;
use super::result::RenderStats;
use super::whitespace::WhitespaceTracker;
use crate::model::{fragment_id, ElementNode, Node, Sizing, State, XmlSpace};
use crate::parser::values::parse_length_list;

/// A run of text drawn at one position.
#[derive(Debug, Clone, PartialEq)]
struct Chunk {
    text: String,
    at: [f64; 2],
    collapse: bool,
}

#[derive(Debug, Clone)]
enum Part {
    Chunk(Chunk),
    Component(Component),
}

/// The element itself or one of its `tspan`/`tref` descendants.
#[derive(Debug, Clone)]
struct Component {
    state: State,
    fill_color: Option<String>,
    font: Option<Operation>,
    parts: Vec<Part>,
}

/// Current text position in SVG user space.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    x: f64,
    y: f64,
}

/// Per-character position lists of one component.
///
/// Entries are indexed by the characters of the component and all of its
/// descendants, in document order.
#[derive(Debug, Default)]
struct Positions {
    x: Vec<f64>,
    y: Vec<f64>,
    dx: Vec<f64>,
    dy: Vec<f64>,
    consumed: usize,
}

impl Positions {
    fn from_element(element: &ElementNode, state: &State, sizing: &Sizing) -> Self {
        let list = |name: &str, reference: f64| -> Vec<f64> {
            element
                .attribute(name)
                .and_then(parse_length_list)
                .map(|lengths| {
                    lengths
                        .into_iter()
                        .map(|length| length.resolve(state.font_size, reference))
                        .collect()
                })
                .unwrap_or_default()
        };

        Self {
            x: list("x", sizing.width),
            y: list("y", sizing.height),
            dx: list("dx", sizing.width),
            dy: list("dy", sizing.height),
            consumed: 0,
        }
    }
}

/// Position adjustments for one character.
#[derive(Debug, Default, PartialEq)]
struct Placement {
    x: Option<f64>,
    y: Option<f64>,
    dx: Option<f64>,
    dy: Option<f64>,
}

impl Placement {
    fn is_empty(&self) -> bool {
        *self == Placement::default()
    }
}

struct Layout<'c, 'a> {
    ctx: &'c mut RenderContext<'a>,
    whitespace: WhitespaceTracker,
    cursor: Cursor,
    /// Position lists of the components currently open, outermost first
    positions: Vec<Positions>,
}

impl<'c, 'a> Layout<'c, 'a> {
    fn new(ctx: &'c mut RenderContext<'a>) -> Self {
        Self {
            ctx,
            whitespace: WhitespaceTracker::new(),
            cursor: Cursor::default(),
            positions: Vec::new(),
        }
    }

    fn component(&mut self, element: &ElementNode, parent_state: &State) -> Option<Component> {
        if element.is_display_none() {
            log::debug!("Skipping hidden <{}>", element.tag);
            return None;
        }

        let target = if element.tag == "tref" {
            let href = element
                .attribute("xlink:href")
                .or_else(|| element.attribute("href"))
                .and_then(fragment_id);
            let Some(id) = href else {
                log::debug!("<tref> without a usable href; ignoring");
                return None;
            };
            Some(self.ctx.resolve_reference(id)?)
        } else {
            None
        };

        let attributes = element.presentation_attributes();
        let state = parent_state.derive(&attributes);
        if state.fill_color().is_none() {
            log::debug!("<{}> has no fill; skipping", element.tag);
            return None;
        }
        self.ctx.stats.elements_processed += 1;

        let fill_color = own_fill_color(&attributes, &state);
        let font = self.ctx.resolve_font(&state);
        let positions = Positions::from_element(element, &state, self.ctx.sizing());

        let mut component = Component {
            state,
            fill_color,
            font,
            parts: Vec::new(),
        };

        self.positions.push(positions);
        if let Some(target) = target {
            self.run(&mut component, &target.text_content());
        } else {
            self.children(&mut component, element);
        }
        self.positions.pop();

        Some(component)
    }

    fn children(&mut self, component: &mut Component, element: &ElementNode) {
        for child in &element.children {
            match child {
                Node::Text { value } => self.run(component, value),
                Node::Element(child) if child.tag == "tspan" || child.tag == "tref" => {
                    let nested = self.component(child, &component.state);
                    if let Some(nested) = nested.filter(|nested| !nested.parts.is_empty()) {
                        component.parts.push(Part::Component(nested));
                    }
                }
                Node::Element(child) => {
                    log::debug!("Tag '{}' inside text; ignoring", child.tag);
                    self.ctx.stats.elements_skipped += 1;
                }
            }
        }
    }

    /// Take the next character's adjustments from the open components.
    ///
    /// Every open component consumes one entry; the innermost component
    /// with an entry at its index wins for each coordinate.
    fn next_placement(&mut self) -> Placement {
        let mut placement = Placement::default();
        for positions in self.positions.iter_mut().rev() {
            let index = positions.consumed;
            positions.consumed += 1;
            placement.x = placement.x.or_else(|| positions.x.get(index).copied());
            placement.y = placement.y.or_else(|| positions.y.get(index).copied());
            placement.dx = placement.dx.or_else(|| positions.dx.get(index).copied());
            placement.dy = placement.dy.or_else(|| positions.dy.get(index).copied());
        }
        placement
    }

    fn run(&mut self, component: &mut Component, raw: &str) {
        let mode = component.state.xml_space;
        let text = self.whitespace.next_run(raw, mode);
        if text.is_empty() {
            return;
        }

        let collapse = mode == XmlSpace::Default;
        let sizing = self.ctx.sizing();
        let mut current = String::new();
        let mut at = [self.cursor.x, sizing.flip_y(self.cursor.y)];

        for ch in text.chars() {
            let placement = self.next_placement();
            if !placement.is_empty() {
                if !current.is_empty() {
                    component.parts.push(Part::Chunk(Chunk {
                        text: std::mem::take(&mut current),
                        at,
                        collapse,
                    }));
                }
                self.cursor.x = placement.x.unwrap_or(self.cursor.x) + placement.dx.unwrap_or(0.0);
                self.cursor.y = placement.y.unwrap_or(self.cursor.y) + placement.dy.unwrap_or(0.0);
                at = [self.cursor.x, sizing.flip_y(self.cursor.y)];
            }
            current.push(ch);
        }

        component.parts.push(Part::Chunk(Chunk {
            text: current,
            at,
            collapse,
        }));
    }
}

/// Drop the trailing space of the last collapsed chunk, along with any
/// chunks and nested components left empty after it. Returns whether a
/// chunk with text was found.
fn trim_trailing_space(parts: &mut Vec<Part>) -> bool {
    while let Some(last) = parts.last_mut() {
        let found = match last {
            Part::Chunk(chunk) => {
                if chunk.collapse && chunk.text.ends_with(' ') {
                    chunk.text.pop();
                }
                !chunk.text.is_empty()
            }
            Part::Component(component) => trim_trailing_space(&mut component.parts),
        };
        if found {
            return true;
        }
        parts.pop();
    }
    false
}

fn emit(component: Component, calls: &mut ElementCalls, outermost: bool, stats: &mut RenderStats) {
    let Component {
        state,
        fill_color,
        font,
        parts,
    } = component;

    if let Some(hex) = fill_color {
        calls.add_call_and_enter(Operation::FillColor(hex));
    }
    calls.add_call_and_enter(Operation::Fill);
    if let Some(font) = font {
        calls.add_call(font);
    }
    if outermost {
        calls.add_call_and_enter(Operation::TextGroup);
    }
    calls.add_call_and_enter(Operation::CharacterSpacing(state.letter_spacing));

    for part in parts {
        match part {
            Part::Chunk(chunk) => {
                stats.text_runs += 1;
                calls.add_call(Operation::DrawText {
                    text: chunk.text,
                    options: TextOptions {
                        size: state.font_size,
                        style: state.font_style(),
                        text_anchor: state.text_anchor,
                        at: chunk.at,
                    },
                });
            }
            Part::Component(child) => {
                let mut child_calls = ElementCalls::new();
                emit(child, &mut child_calls, false, stats);
                calls.append(child_calls.into_calls());
            }
        }
    }
}

/// Lay out a `<text>` element and emit its calls into `calls`.
///
/// On return the insertion point of `calls` is inside the element's
/// `character_spacing` scope.
pub(crate) fn process_text(
    ctx: &mut RenderContext<'_>,
    element: &ElementNode,
    parent_state: &State,
    calls: &mut ElementCalls,
) {
    let component = {
        let mut layout = Layout::new(ctx);
        layout.component(element, parent_state)
    };
    let Some(mut component) = component else {
        return;
    };
    trim_trailing_space(&mut component.parts);
    emit(component, calls, true, &mut ctx.stats);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontRegistry;
    use crate::model::{Document, FontStyle, TextAnchor};
    use crate::render::{CallRecord, RenderOptions};

    fn document(svg: &str) -> Document {
        Document::parse(
            svg,
            RenderOptions::default().with_bounds(800.0, 600.0),
            FontRegistry::standard(),
        )
        .unwrap()
    }

    fn texts(calls: &[CallRecord]) -> Vec<(String, [f64; 2])> {
        let mut out = Vec::new();
        for call in calls {
            if let Operation::DrawText { text, options } = &call.operation {
                out.push((text.clone(), options.at));
            }
            out.extend(texts(&call.children));
        }
        out
    }

    fn process(doc: &Document) -> ElementCalls {
        let mut ctx = RenderContext::new(doc);
        let mut calls = ElementCalls::new();
        let state = doc.options().initial_state();
        process_text(&mut ctx, doc.root(), &state, &mut calls);
        calls
    }

    #[test]
    fn test_insertion_point_inside_spacing_scope() {
        let doc = document("<text>hello</text>");
        let calls = process(&doc);
        assert_eq!(
            calls.calls(),
            &[CallRecord::new(Operation::DrawText {
                text: "hello".into(),
                options: TextOptions {
                    size: 16.0,
                    style: FontStyle::Normal,
                    text_anchor: TextAnchor::Start,
                    at: [0.0, 150.0],
                },
            })]
        );
    }

    #[test]
    fn test_runs_share_whitespace_state() {
        let doc = document("<text> Hello <tspan> big </tspan> world </text>");
        let calls = process(&doc);
        let drawn: Vec<String> = texts(calls.base_calls()).into_iter().map(|(t, _)| t).collect();
        assert_eq!(drawn, vec!["Hello ", "big ", "world"]);
    }

    #[test]
    fn test_trailing_space_only_run_dropped() {
        let doc = document("<text>Hello<tspan>  </tspan></text>");
        let calls = process(&doc);
        let drawn: Vec<String> = texts(calls.base_calls()).into_iter().map(|(t, _)| t).collect();
        assert_eq!(drawn, vec!["Hello"]);
    }

    #[test]
    fn test_trailing_empty_tspan_emits_no_scopes() {
        let doc = document(r#"<text>Hello<tspan fill="red">  </tspan></text>"#);
        let calls = process(&doc);
        assert_eq!(calls.calls().len(), 1);
        assert!(matches!(calls.calls()[0].operation, Operation::DrawText { .. }));

        let doc = document("<text>a<tspan></tspan>b</text>");
        let calls = process(&doc);
        assert!(calls
            .calls()
            .iter()
            .all(|call| matches!(call.operation, Operation::DrawText { .. })));
    }

    #[test]
    fn test_parent_positions_reach_tspan_characters() {
        let doc = document(r#"<text x="10 20 30" y="5">a<tspan>b</tspan>c</text>"#);
        let calls = process(&doc);
        assert_eq!(
            texts(calls.base_calls()),
            vec![
                ("a".to_string(), [10.0, 145.0]),
                ("b".to_string(), [20.0, 145.0]),
                ("c".to_string(), [30.0, 145.0])
            ]
        );
    }

    #[test]
    fn test_own_positions_override_parent_entries() {
        let doc = document(r#"<text x="10 20 30 40">a<tspan x="100">bc</tspan>d</text>"#);
        let calls = process(&doc);
        assert_eq!(
            texts(calls.base_calls()),
            vec![
                ("a".to_string(), [10.0, 150.0]),
                ("b".to_string(), [100.0, 150.0]),
                ("c".to_string(), [30.0, 150.0]),
                ("d".to_string(), [40.0, 150.0])
            ]
        );
    }

    #[test]
    fn test_offset_lists_apply_per_character() {
        let doc = document(r#"<text x="10" dx="1 2">ab</text>"#);
        let calls = process(&doc);
        assert_eq!(
            texts(calls.base_calls()),
            vec![("a".to_string(), [11.0, 150.0]), ("b".to_string(), [13.0, 150.0])]
        );
    }

    #[test]
    fn test_position_lists_split_chunks() {
        let doc = document(r#"<text x="10 20" y="30">ab c</text>"#);
        let calls = process(&doc);
        assert_eq!(
            texts(calls.base_calls()),
            vec![
                ("a".to_string(), [10.0, 120.0]),
                ("b c".to_string(), [20.0, 120.0])
            ]
        );
    }

    #[test]
    fn test_tspan_position_and_offsets() {
        let doc = document(
            r#"<text x="10" y="20">a<tspan dx="5" dy="-5">b</tspan><tspan x="100">c</tspan></text>"#,
        );
        let calls = process(&doc);
        assert_eq!(
            texts(calls.base_calls()),
            vec![
                ("a".to_string(), [10.0, 130.0]),
                ("b".to_string(), [15.0, 135.0]),
                ("c".to_string(), [100.0, 135.0])
            ]
        );
    }

    #[test]
    fn test_percentage_position() {
        let doc = document(r#"<text x="50%" y="10%">p</text>"#);
        let calls = process(&doc);
        assert_eq!(texts(calls.base_calls()), vec![("p".to_string(), [150.0, 135.0])]);
    }

    #[test]
    fn test_fill_none_component_skipped() {
        let doc = document(r#"<text>shown<tspan fill="none">hidden</tspan></text>"#);
        let calls = process(&doc);
        let drawn: Vec<String> = texts(calls.base_calls()).into_iter().map(|(t, _)| t).collect();
        assert_eq!(drawn, vec!["shown"]);

        let doc = document(r#"<text fill="none">hidden</text>"#);
        assert!(process(&doc).is_empty());
    }

    #[test]
    fn test_tspan_scopes() {
        let doc = document(r#"<text>a<tspan fill="red" font-weight="bold">b</tspan></text>"#);
        let calls = process(&doc);
        let spacing = calls.calls();
        assert_eq!(spacing.len(), 2);
        let tspan = &spacing[1];
        assert_eq!(tspan.operation, Operation::FillColor("ff0000".into()));
        assert_eq!(tspan.children[0].operation, Operation::Fill);
        assert_eq!(
            tspan.children[0].children[0].operation,
            Operation::Font {
                family: "Helvetica".into(),
                style: FontStyle::Bold
            }
        );
        assert_eq!(
            tspan.children[0].children[1].operation,
            Operation::CharacterSpacing(0.0)
        );
    }
}
