//! Attribute system for element nodes
//!
//! Attributes are kept as an ordered `Vec<(String, String)>`:
//! - keys are unique
//! - order is irrelevant for equality but drives diff application order

/// Element attributes as ordered key-value pairs
pub type Attrs = Vec<(String, String)>;

/// Extension trait for attribute operations on Attrs
pub trait AttrsExt {
    /// Get an attribute value by name
    fn get_attr(&self, name: &str) -> Option<&str>;

    /// Check if an attribute exists
    fn has_attr(&self, name: &str) -> bool;

    /// Set an attribute value (update in place, or append if new)
    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>);

    /// Remove an attribute by name, returning the old value if present
    fn remove_attr(&mut self, name: &str) -> Option<String>;
}

impl AttrsExt for Attrs {
    fn get_attr(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_attr(&self, name: &str) -> bool {
        self.iter().any(|(k, _)| k == name)
    }

    fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(attr) = self.iter_mut().find(|(k, _)| k == &name) {
            attr.1 = value;
        } else {
            self.push((name, value));
        }
    }

    fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.iter()
            .position(|(k, _)| k == name)
            .map(|pos| self.remove(pos).1)
    }
}

/// Order-insensitive attribute set comparison.
///
/// Relies on key uniqueness: equal length plus every pair of `a` present in `b`.
pub fn attrs_equal(a: &[(String, String)], b: &[(String, String)]) -> bool {
    a.len() == b.len()
        && a.iter().all(|(k, v)| {
            b.iter()
                .find(|(bk, _)| bk == k)
                .is_some_and(|(_, bv)| bv == v)
        })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attrs {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_attrs_operations() {
        let mut attrs: Attrs = Vec::new();

        // Set
        attrs.set_attr("id", "main");
        attrs.set_attr("class", "container");
        assert_eq!(attrs.len(), 2);

        // Get
        assert_eq!(attrs.get_attr("id"), Some("main"));
        assert_eq!(attrs.get_attr("href"), None);

        // Update keeps position
        attrs.set_attr("id", "other");
        assert_eq!(attrs[0], ("id".to_string(), "other".to_string()));
        assert_eq!(attrs[1].0, "class");
        assert_eq!(attrs.get_attr("id"), Some("other"));

        // Remove
        assert_eq!(attrs.remove_attr("id").as_deref(), Some("other"));
        assert!(!attrs.has_attr("id"));
        assert_eq!(attrs.remove_attr("id"), None);
    }

    #[test]
    fn test_attrs_equal_ignores_order() {
        let a = attrs(&[("class", "a"), ("id", "x")]);
        let b = attrs(&[("id", "x"), ("class", "a")]);
        assert!(attrs_equal(&a, &b));

        let c = attrs(&[("id", "x"), ("class", "b")]);
        assert!(!attrs_equal(&a, &c));

        let d = attrs(&[("id", "x")]);
        assert!(!attrs_equal(&a, &d));
        assert!(attrs_equal(&[], &[]));
    }
}
