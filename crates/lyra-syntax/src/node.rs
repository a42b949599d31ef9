//! The generic facade node and the primitive structural queries.
//!
//! Every typed wrapper in this crate is built from the handful of queries
//! defined here: find-first-child-by-kind, find-first-child-castable-to-a
//! family, find-all-children, and scan-forward-from-an-anchor. Accessors
//! documented as optional return `None` on malformed input; `required`
//! converts a grammar-guaranteed child into a panic on violation.

use lyra_tree::{NodeId, SyntaxKind, SyntaxTree, TextRange, TokenSet};

/// A view of one node in a [`SyntaxTree`].
///
/// Does not own the tree; cheap to copy and recreate. The node's kind is
/// always the underlying tagged-tree kind.
#[derive(Clone, Copy, Debug)]
pub struct Node<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl<'t> Node<'t> {
    pub fn new(tree: &'t SyntaxTree, id: NodeId) -> Node<'t> {
        debug_assert!(id.is_some(), "Node over NodeId::NONE");
        Node { tree, id }
    }

    /// The root node of a tree.
    pub fn root(tree: &'t SyntaxTree) -> Node<'t> {
        Node::new(tree, tree.root())
    }

    #[inline]
    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.tree.kind(self.id)
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.tree.range(self.id)
    }

    #[inline]
    pub fn text(&self) -> &'t str {
        self.tree.text_of(self.id)
    }

    pub fn parent(&self) -> Option<Node<'t>> {
        let parent = self.tree.parent(self.id);
        parent.is_some().then(|| Node::new(self.tree, parent))
    }

    pub fn next_sibling(&self) -> Option<Node<'t>> {
        let id = self.tree.next_sibling(self.id);
        id.is_some().then(|| Node::new(self.tree, id))
    }

    pub fn prev_sibling(&self) -> Option<Node<'t>> {
        let id = self.tree.prev_sibling(self.id);
        id.is_some().then(|| Node::new(self.tree, id))
    }

    pub fn next_sibling_skipping_trivia(&self) -> Option<Node<'t>> {
        let mut next = self.next_sibling();
        while let Some(n) = next {
            if !n.kind().is_trivia() {
                return Some(n);
            }
            next = n.next_sibling();
        }
        None
    }

    pub fn prev_sibling_skipping_trivia(&self) -> Option<Node<'t>> {
        let mut prev = self.prev_sibling();
        while let Some(n) = prev {
            if !n.kind().is_trivia() {
                return Some(n);
            }
            prev = n.prev_sibling();
        }
        None
    }

    /// All children, trivia included, document order.
    pub fn children(&self) -> NodeChildren<'t> {
        NodeChildren {
            tree: self.tree,
            next: self.tree.first_child(self.id),
        }
    }

    /// Composite children only: the nodes a visitor descends into.
    /// Tokens and trivia are navigation-level details, not elements.
    pub fn child_elements(&self) -> impl Iterator<Item = Node<'t>> {
        self.children()
            .filter(|n| !n.kind().is_token() && !n.kind().is_trivia())
    }

    /// First child with the given kind.
    pub fn find_child_by_kind(&self, kind: SyntaxKind) -> Option<Node<'t>> {
        self.children().find(|n| n.kind() == kind)
    }

    /// First child whose kind is in the set.
    pub fn find_child_in(&self, set: TokenSet) -> Option<Node<'t>> {
        self.children().find(|n| set.contains(n.kind()))
    }

    /// First child that casts into a facade family, e.g.
    /// `node.find_child_map(Expr::cast)`.
    pub fn find_child_map<T>(&self, f: impl Fn(Node<'t>) -> Option<T>) -> Option<T> {
        self.children().find_map(f)
    }

    /// All children with the given kind, document order.
    pub fn children_of_kind(&self, kind: SyntaxKind) -> Vec<Node<'t>> {
        self.children().filter(|n| n.kind() == kind).collect()
    }

    /// All children castable into a family, document order.
    pub fn children_map<T>(&self, f: impl Fn(Node<'t>) -> Option<T>) -> Vec<T> {
        self.children().filter_map(f).collect()
    }

    /// Scan forward through the siblings *after* `anchor` (a direct child of
    /// `self`) for the first node castable by `f`.
    ///
    /// The grammar places some values after a marker token rather than as a
    /// positional child - "the expression following the operation
    /// reference", "the initializer following `=`" - and this is the one
    /// query those accessors need.
    pub fn find_after<T>(&self, anchor: Node<'t>, f: impl Fn(Node<'t>) -> Option<T>) -> Option<T> {
        debug_assert_eq!(anchor.parent().map(|p| p.id), Some(self.id));
        let mut current = anchor.next_sibling();
        while let Some(node) = current {
            if let Some(found) = f(node) {
                return Some(found);
            }
            current = node.next_sibling();
        }
        None
    }

    /// Nearest ancestor with the given kind.
    pub fn parent_of_kind(&self, kind: SyntaxKind) -> Option<Node<'t>> {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.kind() == kind {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }

    /// First expression among the siblings after `anchor`.
    pub fn expression_after(&self, anchor: Node<'t>) -> Option<crate::expr::Expr<'t>> {
        self.find_after(anchor, crate::expr::Expr::cast)
    }

    /// Whether this node sits in a statement position: directly inside a
    /// block or a when entry, or as the body of a control structure.
    pub fn is_statement(&self) -> bool {
        let Some(parent) = self.parent() else {
            return false;
        };
        if is_statement_container(parent.kind()) {
            return true;
        }
        self.is_control_structure_body(parent)
    }

    fn is_control_structure_body(&self, parent: Node<'t>) -> bool {
        if self.kind().is_token() || self.kind().is_trivia() {
            return false;
        }
        match parent.kind() {
            // Both branches of an if, and loop bodies, sit past the header's
            // closing paren.
            SyntaxKind::IfExpression
            | SyntaxKind::WhileExpression
            | SyntaxKind::ForExpression => parent
                .find_child_by_kind(SyntaxKind::RPar)
                .is_some_and(|rpar| self.range().start >= rpar.range().end),
            SyntaxKind::DoWhileExpression => parent
                .find_child_by_kind(SyntaxKind::WhileKeyword)
                .is_some_and(|kw| self.range().end <= kw.range().start),
            _ => false,
        }
    }
}

/// Kinds whose direct children are statements.
pub(crate) fn is_statement_container(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::Block | SyntaxKind::WhenEntry)
}

/// Iterator over a node's children.
pub struct NodeChildren<'t> {
    tree: &'t SyntaxTree,
    next: NodeId,
}

impl<'t> Iterator for NodeChildren<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.next.is_none() {
            return None;
        }
        let node = Node::new(self.tree, self.next);
        self.next = self.tree.next_sibling(self.next);
        Some(node)
    }
}

/// Unwrap a child the grammar guarantees for syntactically complete trees.
///
/// A `None` here means the tagged tree violated its contract, which is an
/// internal bug rather than a user-facing error, so this panics.
#[track_caller]
pub(crate) fn required<T>(value: Option<T>, invariant: &str) -> T {
    match value {
        Some(v) => v,
        None => panic!("syntax contract violated: missing required {invariant}"),
    }
}

/// Wrapper-type boilerplate: a `Copy` newtype over [`Node`] plus the
/// kind-checked `cast` constructor.
macro_rules! node_wrapper {
    ($(#[$meta:meta])* $name:ident, $pattern:pat) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<'t>(pub(crate) crate::node::Node<'t>);

        impl<'t> $name<'t> {
            pub fn cast(node: crate::node::Node<'t>) -> Option<Self> {
                if matches!(node.kind(), $pattern) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            pub(crate) fn from_node(node: crate::node::Node<'t>) -> Self {
                debug_assert!(matches!(node.kind(), $pattern));
                Self(node)
            }

            #[inline]
            pub fn node(&self) -> crate::node::Node<'t> {
                self.0
            }

            #[inline]
            pub fn kind(&self) -> lyra_tree::SyntaxKind {
                self.0.kind()
            }

            #[inline]
            pub fn text(&self) -> &'t str {
                self.0.text()
            }

            #[inline]
            pub fn range(&self) -> lyra_tree::TextRange {
                self.0.range()
            }
        }

        impl<'t> From<$name<'t>> for crate::node::Node<'t> {
            fn from(wrapper: $name<'t>) -> crate::node::Node<'t> {
                wrapper.0
            }
        }
    };
}

pub(crate) use node_wrapper;
