//! Identifier index for cross-element references.

use super::ElementNode;
use std::collections::HashMap;

/// Maps element identifiers to their position in the tree.
///
/// Built once by a pre-order scan before rendering. Entries are child-index
/// paths from the root, so the index never borrows the tree it describes.
/// The first element carrying an identifier wins.
#[derive(Debug, Clone, Default)]
pub struct ReferenceIndex {
    paths: HashMap<String, Vec<usize>>,
}

impl ReferenceIndex {
    /// Scan `root` and index every element with an `id`.
    pub fn build(root: &ElementNode) -> Self {
        let mut index = Self::default();
        let mut path = Vec::new();
        index.scan(root, &mut path);
        log::debug!("Reference index built with {} identifiers", index.len());
        index
    }

    fn scan(&mut self, element: &ElementNode, path: &mut Vec<usize>) {
        if let Some(id) = element.id() {
            self.paths
                .entry(id.to_string())
                .or_insert_with(|| path.clone());
        }

        for (i, child) in element.children.iter().enumerate() {
            if let Some(child) = child.as_element() {
                path.push(i);
                self.scan(child, path);
                path.pop();
            }
        }
    }

    /// Look up `id` in the tree rooted at `root`.
    ///
    /// `root` must be the element the index was built from.
    pub fn resolve<'a>(&self, root: &'a ElementNode, id: &str) -> Option<&'a ElementNode> {
        let path = self.paths.get(id)?;
        let mut element = root;
        for &i in path {
            element = element.children.get(i)?.as_element()?;
        }
        Some(element)
    }

    /// Check whether an identifier is indexed.
    pub fn contains(&self, id: &str) -> bool {
        self.paths.contains_key(id)
    }

    /// Number of indexed identifiers.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Indexed identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.paths.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

/// Extract the identifier from an `href`-style reference (`#id`).
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> ElementNode {
        ElementNode::new("svg")
            .with_child(
                ElementNode::new("defs").with_child(
                    ElementNode::new("text")
                        .with_attribute("id", "ref")
                        .with_text("first"),
                ),
            )
            .with_text("\n")
            .with_child(
                ElementNode::new("g").with_child(
                    ElementNode::new("text")
                        .with_attribute("id", "ref")
                        .with_text("second"),
                ),
            )
    }

    #[test]
    fn test_resolve_nested() {
        let root = tree();
        let index = ReferenceIndex::build(&root);

        let target = index.resolve(&root, "ref").unwrap();
        assert_eq!(target.text_content(), "first");
    }

    #[test]
    fn test_first_identifier_wins() {
        let root = tree();
        let index = ReferenceIndex::build(&root);
        assert_eq!(index.len(), 1);
        assert_eq!(index.ids(), vec!["ref"]);
    }

    #[test]
    fn test_missing_identifier() {
        let root = tree();
        let index = ReferenceIndex::build(&root);
        assert!(index.resolve(&root, "nope").is_none());
        assert!(!index.contains("nope"));
    }

    #[test]
    fn test_root_can_be_referenced() {
        let root = ElementNode::new("svg").with_attribute("id", "top");
        let index = ReferenceIndex::build(&root);
        assert_eq!(index.resolve(&root, "top").map(|e| e.tag.as_str()), Some("svg"));
    }

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#ref"), Some("ref"));
        assert_eq!(fragment_id(" #ref "), Some("ref"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("other.svg#ref"), None);
    }
}
