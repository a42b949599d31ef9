//! Generic tagged syntax tree for the Lyra front end.
//!
//! This crate is the untyped substrate the typed facade (`lyra-syntax`) is
//! built on:
//! - `SyntaxKind` - the closed enumeration of token and node kinds
//! - `SyntaxTree` - arena-backed node storage with index links
//! - `TreeBuilder` - the interface a parser uses to produce trees
//!
//! Nodes are stored contiguously and referenced by `NodeId`. Parent and
//! sibling links are plain indices into the arena, never owning pointers,
//! so back-references cannot form cycles.

mod builder;
mod kind;
mod token_set;
mod tree;

pub use builder::{Checkpoint, TreeBuilder};
pub use kind::SyntaxKind;
pub use token_set::TokenSet;
pub use tree::{NodeId, SyntaxTree, TextRange};
