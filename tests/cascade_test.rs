//! Integration tests for the attribute cascade, sizing and references.

use svgscribe::model::{Attributes, Color, FontStyle, Paint, State, TextAnchor, XmlSpace};
use svgscribe::render::{Operation, RenderOptions};
use svgscribe::{parse_str, FontRegistry, Scribe};

fn attrs(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_child_overrides_only_what_it_sets() {
    let root = RenderOptions::default().initial_state();
    let parent = root.derive(&attrs(&[
        ("font-family", "Courier, monospace"),
        ("font-size", "20"),
        ("text-anchor", "end"),
        ("fill", "#00ff00"),
        ("letter-spacing", "2"),
        ("xml:space", "preserve"),
    ]));
    let child = parent.derive(&attrs(&[("font-style", "italic")]));

    let expected = State {
        font_slant: child.font_slant,
        ..parent.clone()
    };
    assert_eq!(child, expected);
    assert_eq!(child.font_style(), FontStyle::Italic);
    assert_eq!(child.font_family, vec!["Courier", "monospace"]);
    assert_eq!(child.text_anchor, TextAnchor::End);
    assert_eq!(child.fill, Paint::Color(Color::rgb(0, 255, 0)));
    assert_eq!(child.letter_spacing, 2.0);
    assert_eq!(child.xml_space, XmlSpace::Preserve);
}

#[test]
fn test_siblings_do_not_leak_state() {
    let mut doc = parse_str(
        r#"<svg><text font-size="30" fill="red">a</text><text>b</text></svg>"#,
    )
    .unwrap();
    let result = doc.render();

    let json = svgscribe::render::to_json(&result, svgscribe::JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""size":30.0"#));
    assert!(json.contains(r#""size":16.0"#));

    let texts = &result.calls[0].children;
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0].operation, Operation::FillColor("ff0000".into()));
    assert_eq!(texts[1].operation, Operation::Fill);
}

#[test]
fn test_style_attribute_overrides_presentation_attribute() {
    let result = Scribe::new()
        .render_str(r#"<svg><text fill="green" style="fill: blue; font-weight: bold">x</text></svg>"#)
        .unwrap();
    let text = &result.calls[0].children[0];
    assert_eq!(text.operation, Operation::FillColor("0000ff".into()));
    assert_eq!(
        text.children[0].children[0].operation,
        Operation::Font {
            family: "Helvetica".into(),
            style: FontStyle::Bold,
        }
    );
}

#[test]
fn test_current_color_fill() {
    let result = Scribe::new()
        .render_str(r#"<svg color="purple"><g fill="currentColor"><text>x</text></g></svg>"#)
        .unwrap();
    let group = &result.calls[0].children[0];
    assert_eq!(group.operation, Operation::FillColor("800080".into()));
}

#[test]
fn test_document_sizing() {
    let doc = parse_str(r#"<svg width="2in" height="50%"/>"#).unwrap();
    assert_eq!(doc.sizing().width, 144.0);
    assert_eq!(doc.sizing().height, 396.0);

    let doc = parse_str(r#"<svg viewBox="0 0 400 200"/>"#).unwrap();
    assert_eq!(doc.sizing().width, 400.0);
    assert_eq!(doc.sizing().height, 200.0);

    let doc = parse_str("<svg/>").unwrap();
    assert_eq!((doc.sizing().width, doc.sizing().height), (300.0, 150.0));
}

#[test]
fn test_y_flip_uses_document_height() {
    let result = Scribe::new()
        .render_str(r#"<svg height="500"><text y="100">x</text></svg>"#)
        .unwrap();
    let json = svgscribe::render::to_json(&result, svgscribe::JsonFormat::Compact).unwrap();
    assert!(json.contains(r#""at":[0.0,400.0]"#));
}

#[test]
fn test_reference_index_first_id_wins() {
    let doc = svgscribe::Document::parse(
        r#"<svg><g id="dup"><text id="inner">one</text></g><text id="dup">two</text></svg>"#,
        RenderOptions::default(),
        FontRegistry::standard(),
    )
    .unwrap();

    assert_eq!(doc.references().len(), 2);
    assert_eq!(doc.references().ids(), vec!["dup", "inner"]);
    assert_eq!(doc.element_by_id("dup").map(|e| e.tag.as_str()), Some("g"));
    assert_eq!(
        doc.element_by_id("inner").map(|e| e.text_content()),
        Some("one".to_string())
    );
}

#[test]
fn test_display_none_hides_text() {
    let result = Scribe::new()
        .render_str(r#"<svg><text style="display:none">hidden</text><text>shown</text></svg>"#)
        .unwrap();
    assert_eq!(result.plain_text(), "shown");
}
