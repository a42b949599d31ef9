//! Typed facade over the Lyra tagged tree.
//!
//! The parser (an external collaborator) produces a generic
//! [`lyra_tree::SyntaxTree`]: kind tags, text ranges, child/sibling/parent
//! links. This crate turns that into a statically-typed surface:
//!
//! - [`Element`] - the closed registry mapping every node kind to its
//!   typed wrapper (unknown kinds degrade to the generic [`Node`])
//! - wrapper types per kind (`BinaryExpr`, `Class`, `Property`, ...) with
//!   grammar-aware accessors built from a small set of structural queries
//! - [`stub::DeclStub`] - a serializable shadow of a declaration's
//!   indexable attributes; declaration wrappers answer the stubbed subset
//!   without touching the tree
//! - the visitor families ([`Visitor`], [`VisitorVoid`], [`TreeVisitor`],
//!   [`TreeVisitorVoid`]) with the supertype fallback chain
//! - precedence, deparenthesization, structural matching, and the
//!   parenthesization-preserving replace edit
//!
//! Everything here is a read-only view; wrappers are `Copy` and may be
//! recreated freely for the same underlying node.

pub mod clauses;
pub mod decl;
pub mod edit;
pub mod expr;
pub mod matching;
pub mod node;
pub mod precedence;
pub mod registry;
pub mod stub;
pub mod ty;
pub mod visitor;
pub mod walk;

pub use clauses::*;
pub use decl::*;
pub use edit::{needs_parentheses, replace_expression};
pub use expr::*;
pub use matching::{
    deparenthesize, deparenthesize_once, expressions_match, safe_deparenthesize,
};
pub use node::Node;
pub use precedence::{expression_priority, Precedence};
pub use registry::{Element, SyntaxKindExt};
pub use stub::{Backing, DeclStub, ModifierFlags, StubFlags};
pub use ty::*;
pub use visitor::{
    accept, accept_tree, accept_tree_void, accept_void, TreeVisitor, TreeVisitorVoid, Visitor,
    VisitorVoid,
};

pub use lyra_tree::{Checkpoint, NodeId, SyntaxKind, SyntaxTree, TextRange, TokenSet, TreeBuilder};
