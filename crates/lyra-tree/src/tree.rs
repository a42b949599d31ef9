//! Arena storage for tagged trees.
//!
//! Every node is a fixed-size record: a kind tag, a text range, and four
//! index links (parent, first child, both siblings). `NodeId::NONE` stands
//! for "no link". The tree owns the source text; node text is a slice of it.

use serde::{Deserialize, Serialize};

use crate::{SyntaxKind, TokenSet};

/// Index of a node within a [`SyntaxTree`] arena.
///
/// Serializable because stubs carry a back-reference to the node they were
/// computed from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Half-open byte range `[start, end)` into the tree's source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    #[inline]
    pub fn new(start: u32, end: u32) -> TextRange {
        debug_assert!(start <= end);
        TextRange { start, end }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains_offset(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    #[inline]
    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Fixed-size node record stored in the arena.
#[derive(Clone, Copy, Debug)]
pub(crate) struct RawNode {
    pub(crate) kind: SyntaxKind,
    pub(crate) range: TextRange,
    pub(crate) parent: NodeId,
    pub(crate) first_child: NodeId,
    pub(crate) next_sibling: NodeId,
    pub(crate) prev_sibling: NodeId,
}

/// Arena-backed tagged tree over one source unit.
///
/// Read-only once built; structural edits are expressed as new source text
/// for the host to reparse (see the facade's edit module).
#[derive(Debug)]
pub struct SyntaxTree {
    pub(crate) text: String,
    pub(crate) nodes: Vec<RawNode>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Complete source text of the unit this tree was built from.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    fn get(&self, id: NodeId) -> Option<&RawNode> {
        if id.is_none() {
            None
        } else {
            self.nodes.get(id.0 as usize)
        }
    }

    /// Kind tag of a node. Panics on a dangling id: ids are only minted by
    /// this tree's builder, so a miss is an internal-consistency bug.
    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.get(id).expect("dangling NodeId").kind
    }

    #[inline]
    pub fn range(&self, id: NodeId) -> TextRange {
        self.get(id).expect("dangling NodeId").range
    }

    /// Source text covered by a node.
    #[inline]
    pub fn text_of(&self, id: NodeId) -> &str {
        let range = self.range(id);
        &self.text[range.start as usize..range.end as usize]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.parent)
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.first_child)
    }

    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.next_sibling)
    }

    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> NodeId {
        self.get(id).map_or(NodeId::NONE, |n| n.prev_sibling)
    }

    pub fn last_child(&self, id: NodeId) -> NodeId {
        let mut child = self.first_child(id);
        if child.is_none() {
            return NodeId::NONE;
        }
        loop {
            let next = self.next_sibling(child);
            if next.is_none() {
                return child;
            }
            child = next;
        }
    }

    /// Children of a node in document order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// First direct child with the given kind.
    pub fn find_child_by_kind(&self, id: NodeId, kind: SyntaxKind) -> NodeId {
        self.children(id)
            .find(|&c| self.kind(c) == kind)
            .unwrap_or(NodeId::NONE)
    }

    /// First direct child whose kind is in the given set.
    pub fn find_child_in(&self, id: NodeId, set: &TokenSet) -> NodeId {
        self.children(id)
            .find(|&c| set.contains(self.kind(c)))
            .unwrap_or(NodeId::NONE)
    }
}

/// Iterator over a node's children, document order.
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.next.is_none() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}
