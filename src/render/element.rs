//! Element processing: per-kind behavior and the document walk.

use super::calls::{ElementCalls, Operation};
use super::context::RenderContext;
use super::result::RenderResult;
use super::text::process_text;
use crate::model::{Attributes, Document, ElementNode, Paint, State};
use crate::parser::values::is_inherit;

/// How an element takes part in rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Groups children and passes state down
    Container,
    /// A `<text>` element
    Text,
    /// A `tspan` or `tref`; only meaningful inside a text element
    TextComponent,
    /// Definitions and metadata, never drawn directly
    NotRendered,
    /// Known graphics this renderer does not draw
    Unsupported,
    /// Anything else
    Unknown,
}

impl ElementKind {
    /// Classify an element by tag name.
    pub fn of(tag: &str) -> Self {
        match tag {
            "svg" | "g" | "a" | "switch" => ElementKind::Container,
            "text" => ElementKind::Text,
            "tspan" | "tref" => ElementKind::TextComponent,
            "defs" | "symbol" | "title" | "desc" | "metadata" | "style" => {
                ElementKind::NotRendered
            }
            "rect" | "path" | "circle" | "ellipse" | "line" | "polyline" | "polygon" | "image"
            | "use" | "linearGradient" | "radialGradient" | "stop" | "clipPath" | "mask"
            | "pattern" | "marker" | "filter" => ElementKind::Unsupported,
            _ => ElementKind::Unknown,
        }
    }
}

/// Hex color of a `fill_color` scope opened by an element's own `fill`.
///
/// Only an explicit color (or `currentColor`) opens a scope; `none` and
/// inherited fills do not.
pub(crate) fn own_fill_color(attributes: &Attributes, state: &State) -> Option<String> {
    let own = attributes
        .get("fill")
        .filter(|value| !is_inherit(value))
        .and_then(|value| Paint::parse(value))?;
    if own == Paint::None {
        return None;
    }
    state.fill_color().map(|color| color.to_hex())
}

/// Process one element and its subtree.
///
/// `parent_state` is the state the element inherits from. The returned
/// emitter holds every call the subtree produced.
pub fn process_element(
    ctx: &mut RenderContext<'_>,
    element: &ElementNode,
    parent_state: &State,
) -> ElementCalls {
    let mut calls = ElementCalls::new();
    if element.is_display_none() {
        log::debug!("Skipping hidden <{}>", element.tag);
        return calls;
    }

    match ElementKind::of(&element.tag) {
        ElementKind::Container => process_container(ctx, element, parent_state, &mut calls),
        ElementKind::Text => process_text(ctx, element, parent_state, &mut calls),
        ElementKind::TextComponent => {
            log::debug!("<{}> outside a text element; ignoring", element.tag);
            ctx.stats.elements_skipped += 1;
        }
        ElementKind::NotRendered => {
            log::debug!("<{}> is not rendered", element.tag);
        }
        ElementKind::Unsupported => {
            log::debug!("<{}> is not supported; skipping", element.tag);
            ctx.stats.elements_skipped += 1;
        }
        ElementKind::Unknown => {
            ctx.stats.elements_skipped += 1;
            if ctx.document().options().warn_unknown_elements {
                ctx.warn(format!("Unknown tag '{}'; ignoring", element.tag));
            } else {
                log::debug!("Unknown tag '{}'; ignoring", element.tag);
            }
        }
    }

    calls
}

fn process_container(
    ctx: &mut RenderContext<'_>,
    element: &ElementNode,
    parent_state: &State,
    calls: &mut ElementCalls,
) {
    ctx.stats.elements_processed += 1;
    let attributes = element.presentation_attributes();
    let state = parent_state.derive(&attributes);

    if let Some(hex) = own_fill_color(&attributes, &state) {
        calls.add_call_and_enter(Operation::FillColor(hex));
    }

    for child in element.elements() {
        let child_calls = process_element(ctx, child, &state);
        calls.append(child_calls.into_calls());
    }
}

/// Run a full render pass over a document.
///
/// The root establishes the initial state and, unless its own `fill` opens
/// a color scope, a default fill color scope around everything else. A
/// root that is not an `<svg>` is then processed by its own kind.
pub fn render_document(document: &Document) -> RenderResult {
    let mut ctx = RenderContext::new(document);
    let root = document.root();
    let state = document.options().initial_state();
    let mut calls = ElementCalls::new();

    log::debug!(
        "Rendering <{}> with {} elements",
        root.tag,
        root.element_count()
    );

    if root.is_display_none() {
        return ctx.finish(calls.into_calls());
    }

    let attributes = root.presentation_attributes();
    let root_state = state.derive(&attributes);
    if own_fill_color(&attributes, &root_state).is_none() {
        if let Some(color) = root_state.fill_color() {
            calls.add_call_and_enter(Operation::FillColor(color.to_hex()));
        }
    }

    let root_calls = process_element(&mut ctx, root, &state);
    calls.append(root_calls.into_calls());

    ctx.finish(calls.into_calls())
}
