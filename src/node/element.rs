//! Element type - tagged nodes with attributes and children
//!
//! The core building block of the target tree.

use smallvec::SmallVec;

use crate::attr::{Attrs, AttrsExt};

use super::{Children, Node, collect_text};

// =============================================================================
// Element
// =============================================================================

/// Tagged element with attributes and children
#[derive(Debug, Clone, Default)]
pub struct Element {
    /// Tag name
    pub tag: String,
    /// Element attributes (keys unique)
    pub attrs: Attrs,
    /// Child nodes
    pub children: Children,
}

impl Element {
    /// Create an element with no attributes or children
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: SmallVec::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder
    // ─────────────────────────────────────────────────────────────────────────

    /// Set an attribute (builder style)
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set_attr(name, value);
        self
    }

    /// Set the `id` attribute
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Set the `class` attribute
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child node
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append a text child
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::text(content));
        self
    }

    /// Append several children
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attribute access
    // ─────────────────────────────────────────────────────────────────────────

    /// Get attribute value by name
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs.get_attr(name)
    }

    /// Set attribute value (update if exists, add if not)
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set_attr(name, value);
    }

    /// Remove attribute by name, returning the old value if it existed
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attrs.remove_attr(name)
    }

    /// Check if attribute exists
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.has_attr(name)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Other helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Check if element has no children
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of direct children (all node types)
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Get text content of this element (concatenated from all text nodes)
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        collect_text(&self.children, &mut result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_basics() {
        let elem = Element::new("div");
        assert_eq!(elem.tag, "div");
        assert!(elem.is_empty());
        assert_eq!(elem.child_count(), 0);
    }

    #[test]
    fn test_element_builder() {
        let elem = Element::new("div")
            .with_id("main")
            .with_class("container")
            .attr("data-foo", "bar")
            .child(Element::new("span"))
            .text("Hello");

        assert_eq!(elem.get_attr("id"), Some("main"));
        assert_eq!(elem.get_attr("class"), Some("container"));
        assert_eq!(elem.get_attr("data-foo"), Some("bar"));
        assert_eq!(elem.child_count(), 2);
        assert_eq!(elem.text_content(), "Hello");
    }

    #[test]
    fn test_element_attrs() {
        let mut elem = Element::new("input");
        elem.set_attr("type", "text");
        assert!(elem.has_attr("type"));
        assert_eq!(elem.remove_attr("type").as_deref(), Some("text"));
        assert!(!elem.has_attr("type"));
    }
}
