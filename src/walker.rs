//! Depth-first enumeration of parent → child edges.
//!
//! Both traversal orders use an explicit stack, so arbitrarily deep maps
//! never recurse. Leaves are never expanded and contribute no edges.

use indexmap::map::Values;

use crate::mindmap::{MindmapDocument, MindmapNode, NodeId};

/// One parent → child relation, borrowed from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge<'a> {
    pub parent_id: &'a NodeId,
    pub parent_label: &'a str,
    pub child_id: &'a NodeId,
    pub child_label: &'a str,
}

impl<'a> Edge<'a> {
    fn new(parent: &'a MindmapNode, child: &'a MindmapNode) -> Self {
        Self {
            parent_id: &parent.id,
            parent_label: &parent.title,
            child_id: &child.id,
            child_label: &child.title,
        }
    }
}

/// Order in which edges are emitted.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Pop one node, emit all of its child edges, push the children.
    /// Later siblings (and later roots) are expanded first.
    #[default]
    Stack,
    /// Classic pre-order: each child's subtree is finished before the
    /// next sibling, in declaration order.
    #[value(name = "preorder")]
    PreOrder,
}

type Children<'a> = Values<'a, String, MindmapNode>;

/// Lazy edge iterator returned by [`walk`].
pub struct Walk<'a> {
    inner: Frontier<'a>,
}

enum Frontier<'a> {
    Stack {
        pending: Vec<&'a MindmapNode>,
        expanding: Option<(&'a MindmapNode, Children<'a>)>,
    },
    PreOrder {
        frames: Vec<(&'a MindmapNode, Children<'a>)>,
    },
}

/// Walk every root of `doc`, yielding one [`Edge`] per parent-child pair.
pub fn walk(doc: &MindmapDocument, order: TraversalOrder) -> Walk<'_> {
    let inner = match order {
        TraversalOrder::Stack => Frontier::Stack {
            pending: doc.roots().collect(),
            expanding: None,
        },
        TraversalOrder::PreOrder => Frontier::PreOrder {
            // Top of the stack is the first declared root.
            frames: doc
                .roots()
                .rev()
                .map(|root| (root, root.children.values()))
                .collect(),
        },
    };
    Walk { inner }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Edge<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            Frontier::Stack { pending, expanding } => loop {
                if let Some((parent, children)) = expanding.as_mut() {
                    if let Some(child) = children.next() {
                        pending.push(child);
                        return Some(Edge::new(*parent, child));
                    }
                }
                *expanding = None;
                let node = pending.pop()?;
                if !node.is_leaf() {
                    *expanding = Some((node, node.children.values()));
                }
            },
            Frontier::PreOrder { frames } => loop {
                let frame = frames.last_mut()?;
                let parent = frame.0;
                match frame.1.next() {
                    Some(child) => {
                        frames.push((child, child.children.values()));
                        return Some(Edge::new(parent, child));
                    }
                    None => {
                        frames.pop();
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: i64, title: &str) -> MindmapNode {
        MindmapNode::new(id, title)
    }

    fn pairs(doc: &MindmapDocument, order: TraversalOrder) -> Vec<(String, String)> {
        walk(doc, order)
            .map(|e| (e.parent_label.to_string(), e.child_label.to_string()))
            .collect()
    }

    fn pair(parent: &str, child: &str) -> (String, String) {
        (parent.to_string(), child.to_string())
    }

    /// root
    /// ├── a
    /// │   ├── a1
    /// │   └── a2
    /// └── b
    ///     └── b1
    fn sample() -> MindmapDocument {
        MindmapDocument::new([leaf(1, "root")
            .with_child(
                leaf(2, "a")
                    .with_child(leaf(4, "a1"))
                    .with_child(leaf(5, "a2")),
            )
            .with_child(leaf(3, "b").with_child(leaf(6, "b1")))])
    }

    #[test]
    fn test_empty_document_yields_no_edges() {
        let doc = MindmapDocument::default();
        assert_eq!(walk(&doc, TraversalOrder::Stack).count(), 0);
        assert_eq!(walk(&doc, TraversalOrder::PreOrder).count(), 0);
    }

    #[test]
    fn test_single_chain_is_in_document_order() {
        let doc = MindmapDocument::new([
            leaf(1, "root").with_child(leaf(2, "child").with_child(leaf(3, "grandchild")))
        ]);
        let expected = vec![pair("root", "child"), pair("child", "grandchild")];
        assert_eq!(pairs(&doc, TraversalOrder::Stack), expected);
        assert_eq!(pairs(&doc, TraversalOrder::PreOrder), expected);
    }

    #[test]
    fn test_stack_order_emits_siblings_then_expands_last_first() {
        assert_eq!(
            pairs(&sample(), TraversalOrder::Stack),
            vec![
                pair("root", "a"),
                pair("root", "b"),
                pair("b", "b1"),
                pair("a", "a1"),
                pair("a", "a2"),
            ]
        );
    }

    #[test]
    fn test_preorder_finishes_each_subtree_before_next_sibling() {
        assert_eq!(
            pairs(&sample(), TraversalOrder::PreOrder),
            vec![
                pair("root", "a"),
                pair("a", "a1"),
                pair("a", "a2"),
                pair("root", "b"),
                pair("b", "b1"),
            ]
        );
    }

    #[test]
    fn test_stack_order_expands_last_root_first() {
        let doc = MindmapDocument::new([
            leaf(1, "first").with_child(leaf(3, "f1")),
            leaf(2, "second").with_child(leaf(4, "s1")),
        ]);
        assert_eq!(
            pairs(&doc, TraversalOrder::Stack),
            vec![pair("second", "s1"), pair("first", "f1")]
        );
        assert_eq!(
            pairs(&doc, TraversalOrder::PreOrder),
            vec![pair("first", "f1"), pair("second", "s1")]
        );
    }

    #[test]
    fn test_leaf_roots_contribute_nothing() {
        let doc = MindmapDocument::new([leaf(1, "solo"), leaf(2, "other")]);
        assert_eq!(walk(&doc, TraversalOrder::Stack).count(), 0);
    }

    #[test]
    fn test_edges_carry_ids_and_labels() {
        let doc = MindmapDocument::new([
            MindmapNode::new("root", "Main idea").with_child(MindmapNode::new(7, "Detail [x]"))
        ]);
        let edge = walk(&doc, TraversalOrder::Stack).next().unwrap();
        assert_eq!(edge.parent_id, &NodeId::from("root"));
        assert_eq!(edge.parent_label, "Main idea");
        assert_eq!(edge.child_id, &NodeId::Int(7));
        assert_eq!(edge.child_label, "Detail [x]");
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut node = leaf(100_000, "bottom");
        for id in (0..100_000).rev() {
            node = leaf(id, "n").with_child(node);
        }
        let doc = MindmapDocument::new([node]);
        assert_eq!(walk(&doc, TraversalOrder::Stack).count(), 100_000);
        assert_eq!(walk(&doc, TraversalOrder::PreOrder).count(), 100_000);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_node() -> impl Strategy<Value = MindmapNode> {
            let leaf = (0..1000i64, "[a-z ]{0,8}").prop_map(|(id, t)| MindmapNode::new(id, t));
            leaf.prop_recursive(4, 64, 5, |inner| {
                (0..1000i64, "[a-z ]{0,8}", prop::collection::vec(inner, 0..5)).prop_map(
                    |(id, t, kids)| {
                        kids.into_iter()
                            .fold(MindmapNode::new(id, t), MindmapNode::with_child)
                    },
                )
            })
        }

        fn arb_doc() -> impl Strategy<Value = MindmapDocument> {
            prop::collection::vec(arb_node(), 0..4).prop_map(MindmapDocument::new)
        }

        proptest! {
            #[test]
            fn every_non_root_node_is_a_child_exactly_once(doc in arb_doc()) {
                let roots = doc.ideas.len();
                for order in [TraversalOrder::Stack, TraversalOrder::PreOrder] {
                    prop_assert_eq!(walk(&doc, order).count(), doc.node_count() - roots);
                }
            }

            #[test]
            fn both_orders_emit_the_same_edge_set(doc in arb_doc()) {
                let mut stack = pairs(&doc, TraversalOrder::Stack);
                let mut pre = pairs(&doc, TraversalOrder::PreOrder);
                stack.sort();
                pre.sort();
                prop_assert_eq!(stack, pre);
            }

            #[test]
            fn walking_is_deterministic(doc in arb_doc()) {
                prop_assert_eq!(
                    pairs(&doc, TraversalOrder::Stack),
                    pairs(&doc, TraversalOrder::Stack)
                );
            }
        }
    }
}
