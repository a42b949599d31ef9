//! Stub shadow representation of declarations.
//!
//! A [`DeclStub`] is a small serializable record holding the indexable
//! attributes of one declaration: kind, name, modifier word, and a fixed set
//! of boolean facts. An external indexer computes stubs from parsed trees via
//! [`DeclStub::from_declaration`], persists them, and later answers queries
//! from the stubs alone. Declaration wrappers are dual-backed (see
//! [`Backing`]): the schema-covered accessors answer from the stub without
//! touching a tree, everything else resolves the stub's back-reference.

use lyra_tree::{NodeId, SyntaxKind, SyntaxTree};
use serde::{Deserialize, Serialize};

use crate::clauses::ModifierList;
use crate::decl::{Decl, DeclarationWithBody};
use crate::node::Node;

/// Modifier keywords collapsed into one word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierFlags(u16);

bitflags::bitflags! {
    impl ModifierFlags: u16 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const INTERNAL = 1 << 2;
        const PROTECTED = 1 << 3;
        const ABSTRACT = 1 << 4;
        const FINAL = 1 << 5;
        const OPEN = 1 << 6;
        const OVERRIDE = 1 << 7;
        const INLINE = 1 << 8;
        const CONST = 1 << 9;
        const COMPANION = 1 << 10;
    }
}

impl ModifierFlags {
    pub fn from_keyword(keyword: SyntaxKind) -> Option<ModifierFlags> {
        let flag = match keyword {
            SyntaxKind::PublicKeyword => ModifierFlags::PUBLIC,
            SyntaxKind::PrivateKeyword => ModifierFlags::PRIVATE,
            SyntaxKind::InternalKeyword => ModifierFlags::INTERNAL,
            SyntaxKind::ProtectedKeyword => ModifierFlags::PROTECTED,
            SyntaxKind::AbstractKeyword => ModifierFlags::ABSTRACT,
            SyntaxKind::FinalKeyword => ModifierFlags::FINAL,
            SyntaxKind::OpenKeyword => ModifierFlags::OPEN,
            SyntaxKind::OverrideKeyword => ModifierFlags::OVERRIDE,
            SyntaxKind::InlineKeyword => ModifierFlags::INLINE,
            SyntaxKind::ConstKeyword => ModifierFlags::CONST,
            SyntaxKind::CompanionKeyword => ModifierFlags::COMPANION,
            _ => return None,
        };
        Some(flag)
    }

    pub fn from_modifier_list(list: &ModifierList<'_>) -> ModifierFlags {
        list.modifier_keywords()
            .into_iter()
            .filter_map(ModifierFlags::from_keyword)
            .collect()
    }
}

/// Kind-specific boolean facts in the stub schema. The schema is closed:
/// an attribute outside this list is not answerable from a stub.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StubFlags(u16);

bitflags::bitflags! {
    impl StubFlags: u16 {
        /// Declared directly in a source file.
        const TOP_LEVEL = 1 << 0;
        /// `var` rather than `val` (property, parameter).
        const MUTABLE = 1 << 1;
        /// Property has an `= initializer`.
        const HAS_INITIALIZER = 1 << 2;
        /// Parameter has an `= default`.
        const HAS_DEFAULT_VALUE = 1 << 3;
        /// Constructor parameter written with `val`/`var`.
        const VAL_OR_VAR = 1 << 4;
        /// `interface` rather than `class`.
        const INTERFACE = 1 << 5;
        /// `enum class`.
        const ENUM_CLASS = 1 << 6;
        /// Companion object.
        const COMPANION = 1 << 7;
        /// Function or accessor body is a block, not `= expr`.
        const BLOCK_BODY = 1 << 8;
        /// Has any body at all.
        const HAS_BODY = 1 << 9;
    }
}

/// Serializable shadow of one declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclStub {
    kind: SyntaxKind,
    name: Option<String>,
    modifiers: ModifierFlags,
    flags: StubFlags,
    /// Back-reference into the tree the stub was computed from; `None` once
    /// detached (e.g. deserialized without its tree).
    node: Option<NodeId>,
}

impl DeclStub {
    /// Compute the stub for a tree-backed declaration.
    pub fn from_declaration(decl: &Decl<'_>) -> DeclStub {
        let node = decl.node();
        let mut flags = StubFlags::empty();
        if node.parent().is_some_and(|p| p.kind() == SyntaxKind::SourceFile) {
            flags |= StubFlags::TOP_LEVEL;
        }
        match decl {
            Decl::Class(class) => {
                flags.set(StubFlags::INTERFACE, class.is_interface());
                flags.set(StubFlags::ENUM_CLASS, class.is_enum());
                flags.set(StubFlags::HAS_BODY, class.body().is_some());
            }
            Decl::Object(object) => {
                flags.set(StubFlags::COMPANION, object.is_companion());
                flags.set(StubFlags::HAS_BODY, object.body().is_some());
            }
            Decl::Function(fun) => {
                flags.set(StubFlags::BLOCK_BODY, fun.has_block_body());
                flags.set(StubFlags::HAS_BODY, fun.body_expression().is_some());
            }
            Decl::Property(property) => {
                flags.set(StubFlags::MUTABLE, property.is_var());
                flags.set(StubFlags::HAS_INITIALIZER, property.initializer().is_some());
            }
            Decl::PropertyAccessor(accessor) => {
                flags.set(StubFlags::BLOCK_BODY, accessor.has_block_body());
                flags.set(StubFlags::HAS_BODY, accessor.body_expression().is_some());
            }
            Decl::Parameter(parameter) => {
                flags.set(StubFlags::VAL_OR_VAR, parameter.has_val_or_var());
                flags.set(StubFlags::MUTABLE, parameter.is_mutable());
                flags.set(StubFlags::HAS_DEFAULT_VALUE, parameter.default_value().is_some());
            }
            Decl::SecondaryConstructor(ctor) => {
                flags.set(StubFlags::HAS_BODY, ctor.body().is_some());
            }
            Decl::ClassInitializer(init) => {
                flags.set(StubFlags::HAS_BODY, init.body().is_some());
            }
            Decl::TypeAlias(_)
            | Decl::Destructuring(_)
            | Decl::DestructuringEntry(_)
            | Decl::TypeParameter(_)
            | Decl::EnumEntry(_)
            | Decl::PrimaryConstructor(_) => {}
        }
        DeclStub {
            kind: node.kind(),
            name: decl.name().map(str::to_owned),
            modifiers: decl.modifiers(),
            flags,
            node: Some(node.id()),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn modifiers(&self) -> ModifierFlags {
        self.modifiers
    }

    #[inline]
    pub fn flags(&self) -> StubFlags {
        self.flags
    }

    #[inline]
    pub fn has_flag(&self, flag: StubFlags) -> bool {
        self.flags.contains(flag)
    }

    /// Drop the back-reference, as a persisted-then-reloaded stub would.
    pub fn detach(&mut self) {
        self.node = None;
    }

    /// Follow the back-reference into `tree`. `None` for detached stubs.
    pub fn resolve_to_tree<'t>(&self, tree: &'t SyntaxTree) -> Option<Node<'t>> {
        let node = Node::new(tree, self.node?);
        debug_assert_eq!(node.kind(), self.kind, "stub back-reference kind mismatch");
        Some(node)
    }

    /// A stub-backed declaration wrapper. `tree` may be absent; the wrapper
    /// then answers only the schema subset. `None` if the stub's kind is not
    /// a declaration kind (a corrupt record).
    pub fn declaration<'t>(&'t self, tree: Option<&'t SyntaxTree>) -> Option<Decl<'t>> {
        Decl::from_stub(self, tree)
    }
}

/// What a declaration wrapper is built over.
#[derive(Clone, Copy, Debug)]
pub enum Backing<'t> {
    Tree(Node<'t>),
    Stub {
        stub: &'t DeclStub,
        tree: Option<&'t SyntaxTree>,
    },
}

impl<'t> Backing<'t> {
    /// The underlying tree node, following the stub back-reference when
    /// stub-backed. `None` for a detached stub.
    pub fn tree_node(&self) -> Option<Node<'t>> {
        match self {
            Backing::Tree(node) => Some(*node),
            Backing::Stub { stub, tree } => tree.and_then(|t| stub.resolve_to_tree(t)),
        }
    }

    pub fn stub(&self) -> Option<&'t DeclStub> {
        match self {
            Backing::Tree(_) => None,
            Backing::Stub { stub, .. } => Some(stub),
        }
    }
}

impl PartialEq for Backing<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Backing::Tree(a), Backing::Tree(b)) => a == b,
            (Backing::Stub { stub: a, .. }, Backing::Stub { stub: b, .. }) => std::ptr::eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Backing<'_> {}
