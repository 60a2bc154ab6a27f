//! Conversion from SVG markup to the element tree.

use crate::error::{Error, Result};
use crate::model::{ElementNode, Node};
use std::path::Path;

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";
const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Parse SVG markup into an element tree rooted at the document element.
pub fn parse_str(svg: &str) -> Result<ElementNode> {
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..roxmltree::ParsingOptions::default()
    };
    let doc = roxmltree::Document::parse_with_options(svg, options)?;
    let root = doc.root_element();
    if root.tag_name().name().is_empty() {
        return Err(Error::EmptyDocument);
    }
    Ok(convert(root))
}

/// Read and parse an SVG file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ElementNode> {
    let svg = std::fs::read_to_string(path)?;
    parse_str(&svg)
}

fn convert(node: roxmltree::Node<'_, '_>) -> ElementNode {
    let mut element = ElementNode::new(node.tag_name().name());

    for attr in node.attributes() {
        let name = match attr.namespace() {
            Some(XML_NAMESPACE) => format!("xml:{}", attr.name()),
            Some(XLINK_NAMESPACE) => format!("xlink:{}", attr.name()),
            _ => attr.name().to_string(),
        };
        element.attributes.insert(name, attr.value().to_string());
    }

    for child in node.children() {
        if child.is_element() {
            element.children.push(Node::Element(convert(child)));
        } else if child.is_text() {
            if let Some(text) = child.text() {
                element.children.push(Node::text(text));
            }
        }
    }

    element
}
