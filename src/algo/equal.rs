//! Structural equality
//!
//! Deep, order-sensitive comparison over anything implementing [`NodeView`]:
//! - same variant
//! - text: identical content
//! - element: same tag, same attribute set (order ignored), pairwise-equal children
//! - fragment: pairwise-equal children
//!
//! Pure and iterative; the pending pairs live on an inline stack, so shallow
//! trees compare without allocating and deep ones cannot overflow the call
//! stack.

use smallvec::SmallVec;

use crate::attr::attrs_equal;
use crate::node::{NodeKind, NodeView};

/// Structural equality between two nodes, possibly from different trees
pub fn equal<'a, 'b, A, B>(a: A, b: B) -> bool
where
    A: NodeView<'a>,
    B: NodeView<'b>,
{
    let mut pending: SmallVec<[(A, B); 16]> = SmallVec::new();
    pending.push((a, b));

    while let Some((a, b)) = pending.pop() {
        if a.kind() != b.kind() {
            return false;
        }
        let same = match a.kind() {
            NodeKind::Text => a.text() == b.text(),
            NodeKind::Element => a.tag() == b.tag() && attrs_equal(a.attrs(), b.attrs()),
            NodeKind::Fragment => true,
        };
        if !same || a.child_count() != b.child_count() {
            return false;
        }
        pending.extend(a.children().zip(b.children()));
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::LiveTree;
    use crate::node::{Element, Node};

    fn card(title: &str) -> Node {
        Element::new("div")
            .with_class("card")
            .attr("data-id", "1")
            .child(Element::new("h2").text(title))
            .into()
    }

    #[test]
    fn test_equal_values() {
        assert!(equal(&card("a"), &card("a")));
        assert!(!equal(&card("a"), &card("b")));
        assert!(!equal(&Node::text("a"), &Node::element("a")));
        assert!(equal(&Node::fragment([]), &Node::fragment([])));
        assert!(!equal(
            &Node::fragment([Node::text("x")]),
            &Node::fragment([Node::text("x"), Node::text("x")])
        ));
    }

    #[test]
    fn test_attribute_order_ignored_child_order_not() {
        let a: Node = Element::new("p").attr("a", "1").attr("b", "2").into();
        let b: Node = Element::new("p").attr("b", "2").attr("a", "1").into();
        assert!(equal(&a, &b));

        let c: Node = Element::new("p").text("x").text("y").into();
        let d: Node = Element::new("p").text("y").text("x").into();
        assert!(!equal(&c, &d));
    }

    #[test]
    fn test_live_against_value() {
        let mut tree = LiveTree::new();
        let id = tree.mount(tree.document(), &card("a")).unwrap();
        let live = tree.get(id).unwrap();
        assert!(equal(live, &card("a")));
        assert!(!equal(live, &card("b")));
        assert!(equal(&card("a"), live));
        assert!(equal(live, live));
    }
}
