//! Parsed element tree types.

use crate::parser::values::parse_style_declarations;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Attribute name to raw string value.
pub type Attributes = BTreeMap<String, String>;

/// A child of an element: either a nested element or a run of character data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// A nested element
    Element(ElementNode),

    /// Character data, exactly as it appeared in the source
    Text {
        /// Raw text content
        value: String,
    },
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text { .. } => None,
        }
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

/// A single element of the input tree.
///
/// Immutable once built; the tree is owned top-down through `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    /// Local tag name (e.g. `text`, `g`)
    pub tag: String,

    /// Attributes by name; namespaced attributes keep their prefix (`xml:space`)
    pub attributes: Attributes,

    /// Children in document order
    pub children: Vec<Node>,
}

impl ElementNode {
    /// Create an element with no attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Builder: set an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder: append a child element.
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Builder: append a text child.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::text(text));
        self
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Get the element identifier, if any.
    pub fn id(&self) -> Option<&str> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    /// Attributes with inline `style` declarations merged over presentation
    /// attributes of the same name.
    pub fn presentation_attributes(&self) -> Cow<'_, Attributes> {
        let Some(style) = self.attribute("style") else {
            return Cow::Borrowed(&self.attributes);
        };
        let mut merged = self.attributes.clone();
        merged.extend(parse_style_declarations(style));
        Cow::Owned(merged)
    }

    /// Whether `display="none"` removes this element from rendering.
    pub fn is_display_none(&self) -> bool {
        self.presentation_attributes()
            .get("display")
            .is_some_and(|v| v.trim() == "none")
    }

    /// Iterate over child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &ElementNode> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenation of all descendant character data in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Count this element and all descendant elements.
    pub fn element_count(&self) -> usize {
        1 + self.elements().map(ElementNode::element_count).sum::<usize>()
    }
}

fn collect_text(element: &ElementNode, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text { value } => out.push_str(value),
            Node::Element(child) => collect_text(child, out),
        }
    }
}
