//! Recursive descent helpers for the tree visitors.
//!
//! These walk a node's child elements in document order and dispatch each
//! one. A tree visitor that overrides a visit method calls back into
//! `walk_element*` to continue below the handled node; not calling it
//! prunes the subtree.

use crate::node::Node;
use crate::visitor::{accept_tree, accept_tree_void, TreeVisitor, TreeVisitorVoid};

pub fn walk_element<'t, D, V: TreeVisitor<'t, D>>(visitor: &mut V, node: Node<'t>, data: &mut D) {
    for child in node.child_elements() {
        accept_tree(visitor, child, data);
    }
}

pub fn walk_element_void<'t, V: TreeVisitorVoid<'t>>(visitor: &mut V, node: Node<'t>) {
    for child in node.child_elements() {
        accept_tree_void(visitor, child);
    }
}
