//! Declaration wrappers, the `Decl` family, and the capability traits.
//!
//! Declaration wrappers differ from every other wrapper in one way: they are
//! built over a [`Backing`], so the same type serves a parsed tree and a
//! stub record. Schema-covered accessors (see [`crate::stub`]) answer from
//! the stub without resolving the tree; everything else goes through
//! [`Backing::tree_node`] and degrades to `None`/empty on a detached stub.

use lyra_tree::SyntaxKind;

use crate::clauses::{
    AnnotationEntry, ClassBody, ModifierList, SuperTypeList, SuperTypeListEntry,
    TypeParameterList, ValueArgument, ValueArgumentList,
};
use crate::expr::{BlockExpr, Expr};
use crate::node::{node_wrapper, required, Node};
use crate::stub::{Backing, DeclStub, ModifierFlags, StubFlags};
use crate::ty::TypeReference;

node_wrapper!(
    /// `(a: T, b: U = default)`.
    ParameterList,
    SyntaxKind::ValueParameterList
);

impl<'t> ParameterList<'t> {
    pub fn parameters(&self) -> Vec<Parameter<'t>> {
        self.0.children_map(Parameter::cast)
    }
}

macro_rules! decl_wrapper {
    ($(#[$meta:meta])* $name:ident, $pattern:pat) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub struct $name<'t>(pub(crate) Backing<'t>);

        impl<'t> $name<'t> {
            pub fn cast(node: Node<'t>) -> Option<Self> {
                matches!(node.kind(), $pattern).then(|| Self(Backing::Tree(node)))
            }

            pub(crate) fn from_node(node: Node<'t>) -> Self {
                Self(Backing::Tree(node))
            }

            /// The underlying tree node; `None` for a detached stub.
            pub fn tree_node(&self) -> Option<Node<'t>> {
                self.0.tree_node()
            }

            /// The underlying tree node. Panics when stub-backed without a
            /// tree; use [`Self::tree_node`] when that is a reachable state.
            pub fn node(&self) -> Node<'t> {
                required(self.0.tree_node(), "tree backing for declaration")
            }

            pub fn kind(&self) -> SyntaxKind {
                match &self.0 {
                    Backing::Tree(node) => node.kind(),
                    Backing::Stub { stub, .. } => stub.kind(),
                }
            }

            pub fn stub(&self) -> Option<&'t DeclStub> {
                self.0.stub()
            }

            pub fn is_stub_backed(&self) -> bool {
                self.0.stub().is_some()
            }

            fn schema_flag(&self, flag: StubFlags, tree_query: impl FnOnce(Node<'t>) -> bool) -> bool {
                match self.0.stub() {
                    Some(stub) => stub.has_flag(flag),
                    None => self.tree_node().is_some_and(tree_query),
                }
            }
        }
    };
}

decl_wrapper!(
    /// `class C ...` / `interface I ...` / `enum class E ...`.
    Class,
    SyntaxKind::Class
);
decl_wrapper!(
    /// `object O ...`, named or part of an object literal.
    ObjectDecl,
    SyntaxKind::ObjectDeclaration
);
decl_wrapper!(
    /// `fun f(...) ...`.
    Fun,
    SyntaxKind::Fun
);
decl_wrapper!(
    /// `val x = ...` / `var x = ...`.
    Property,
    SyntaxKind::Property
);
decl_wrapper!(
    /// A `get`/`set` accessor of a property.
    PropertyAccessor,
    SyntaxKind::PropertyAccessor
);
decl_wrapper!(TypeAlias, SyntaxKind::TypeAlias);
decl_wrapper!(
    /// `val (a, b) = pair`.
    DestructuringDecl,
    SyntaxKind::DestructuringDeclaration
);
decl_wrapper!(DestructuringEntry, SyntaxKind::DestructuringDeclarationEntry);
decl_wrapper!(
    /// A value parameter of a function, constructor, lambda, or catch
    /// clause.
    Parameter,
    SyntaxKind::ValueParameter
);
decl_wrapper!(TypeParameter, SyntaxKind::TypeParameter);
decl_wrapper!(EnumEntry, SyntaxKind::EnumEntry);
decl_wrapper!(PrimaryConstructor, SyntaxKind::PrimaryConstructor);
decl_wrapper!(SecondaryConstructor, SyntaxKind::SecondaryConstructor);
decl_wrapper!(
    /// `init { ... }`.
    ClassInitializer,
    SyntaxKind::ClassInitializer
);

/// The Declaration family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decl<'t> {
    Class(Class<'t>),
    Object(ObjectDecl<'t>),
    Function(Fun<'t>),
    Property(Property<'t>),
    PropertyAccessor(PropertyAccessor<'t>),
    TypeAlias(TypeAlias<'t>),
    Destructuring(DestructuringDecl<'t>),
    DestructuringEntry(DestructuringEntry<'t>),
    Parameter(Parameter<'t>),
    TypeParameter(TypeParameter<'t>),
    EnumEntry(EnumEntry<'t>),
    PrimaryConstructor(PrimaryConstructor<'t>),
    SecondaryConstructor(SecondaryConstructor<'t>),
    ClassInitializer(ClassInitializer<'t>),
}

impl<'t> Decl<'t> {
    pub fn cast(node: Node<'t>) -> Option<Decl<'t>> {
        Decl::from_backing(node.kind(), Backing::Tree(node))
    }

    pub(crate) fn from_stub(
        stub: &'t DeclStub,
        tree: Option<&'t lyra_tree::SyntaxTree>,
    ) -> Option<Decl<'t>> {
        Decl::from_backing(stub.kind(), Backing::Stub { stub, tree })
    }

    fn from_backing(kind: SyntaxKind, backing: Backing<'t>) -> Option<Decl<'t>> {
        let decl = match kind {
            SyntaxKind::Class => Decl::Class(Class(backing)),
            SyntaxKind::ObjectDeclaration => Decl::Object(ObjectDecl(backing)),
            SyntaxKind::Fun => Decl::Function(Fun(backing)),
            SyntaxKind::Property => Decl::Property(Property(backing)),
            SyntaxKind::PropertyAccessor => Decl::PropertyAccessor(PropertyAccessor(backing)),
            SyntaxKind::TypeAlias => Decl::TypeAlias(TypeAlias(backing)),
            SyntaxKind::DestructuringDeclaration => {
                Decl::Destructuring(DestructuringDecl(backing))
            }
            SyntaxKind::DestructuringDeclarationEntry => {
                Decl::DestructuringEntry(DestructuringEntry(backing))
            }
            SyntaxKind::ValueParameter => Decl::Parameter(Parameter(backing)),
            SyntaxKind::TypeParameter => Decl::TypeParameter(TypeParameter(backing)),
            SyntaxKind::EnumEntry => Decl::EnumEntry(EnumEntry(backing)),
            SyntaxKind::PrimaryConstructor => Decl::PrimaryConstructor(PrimaryConstructor(backing)),
            SyntaxKind::SecondaryConstructor => {
                Decl::SecondaryConstructor(SecondaryConstructor(backing))
            }
            SyntaxKind::ClassInitializer => Decl::ClassInitializer(ClassInitializer(backing)),
            _ => return None,
        };
        Some(decl)
    }

    fn backing(&self) -> &Backing<'t> {
        match self {
            Decl::Class(it) => &it.0,
            Decl::Object(it) => &it.0,
            Decl::Function(it) => &it.0,
            Decl::Property(it) => &it.0,
            Decl::PropertyAccessor(it) => &it.0,
            Decl::TypeAlias(it) => &it.0,
            Decl::Destructuring(it) => &it.0,
            Decl::DestructuringEntry(it) => &it.0,
            Decl::Parameter(it) => &it.0,
            Decl::TypeParameter(it) => &it.0,
            Decl::EnumEntry(it) => &it.0,
            Decl::PrimaryConstructor(it) => &it.0,
            Decl::SecondaryConstructor(it) => &it.0,
            Decl::ClassInitializer(it) => &it.0,
        }
    }

    pub fn tree_node(&self) -> Option<Node<'t>> {
        self.backing().tree_node()
    }

    /// Panics when stub-backed without a tree, like the per-kind `node()`.
    pub fn node(&self) -> Node<'t> {
        required(self.tree_node(), "tree backing for declaration")
    }

    pub fn kind(&self) -> SyntaxKind {
        match self.backing() {
            Backing::Tree(node) => node.kind(),
            Backing::Stub { stub, .. } => stub.kind(),
        }
    }

    pub fn is_stub_backed(&self) -> bool {
        self.backing().stub().is_some()
    }

    pub fn name(&self) -> Option<&'t str> {
        match self {
            Decl::Class(it) => it.name(),
            Decl::Object(it) => it.name(),
            Decl::Function(it) => it.name(),
            Decl::Property(it) => it.name(),
            Decl::PropertyAccessor(it) => it.name(),
            Decl::TypeAlias(it) => it.name(),
            Decl::DestructuringEntry(it) => it.name(),
            Decl::Parameter(it) => it.name(),
            Decl::TypeParameter(it) => it.name(),
            Decl::EnumEntry(it) => it.name(),
            Decl::Destructuring(_)
            | Decl::PrimaryConstructor(_)
            | Decl::SecondaryConstructor(_)
            | Decl::ClassInitializer(_) => None,
        }
    }

    pub fn modifiers(&self) -> ModifierFlags {
        match self {
            Decl::Class(it) => it.modifiers(),
            Decl::Object(it) => it.modifiers(),
            Decl::Function(it) => it.modifiers(),
            Decl::Property(it) => it.modifiers(),
            Decl::PropertyAccessor(it) => it.modifiers(),
            Decl::TypeAlias(it) => it.modifiers(),
            Decl::Parameter(it) => it.modifiers(),
            Decl::EnumEntry(it) => it.modifiers(),
            Decl::PrimaryConstructor(it) => it.modifiers(),
            Decl::SecondaryConstructor(it) => it.modifiers(),
            Decl::Destructuring(_)
            | Decl::DestructuringEntry(_)
            | Decl::TypeParameter(_)
            | Decl::ClassInitializer(_) => ModifierFlags::empty(),
        }
    }

    pub fn is_top_level(&self) -> bool {
        match self.backing() {
            Backing::Stub { stub, .. } => stub.has_flag(StubFlags::TOP_LEVEL),
            Backing::Tree(node) => node
                .parent()
                .is_some_and(|p| p.kind() == SyntaxKind::SourceFile),
        }
    }
}

// =============================================================================
// Capability traits
// =============================================================================

/// Declarations that introduce a name.
pub trait NamedDeclaration<'t> {
    fn name(&self) -> Option<&'t str>;
}

macro_rules! impl_named_declaration {
    ($($name:ident),+ $(,)?) => {$(
        impl<'t> NamedDeclaration<'t> for $name<'t> {
            fn name(&self) -> Option<&'t str> {
                match self.0.stub() {
                    Some(stub) => stub.name(),
                    None => self
                        .tree_node()?
                        .find_child_by_kind(SyntaxKind::Identifier)
                        .map(|n| n.text()),
                }
            }
        }
    )+};
}

impl_named_declaration!(
    Class,
    ObjectDecl,
    Fun,
    Property,
    PropertyAccessor,
    TypeAlias,
    DestructuringEntry,
    Parameter,
    TypeParameter,
    EnumEntry,
);

/// Declarations that can carry a modifier list.
pub trait ModifierListOwner<'t> {
    fn modifier_list(&self) -> Option<ModifierList<'t>>;

    fn modifiers(&self) -> ModifierFlags {
        self.modifier_list()
            .map(|list| ModifierFlags::from_modifier_list(&list))
            .unwrap_or_else(ModifierFlags::empty)
    }

    fn has_modifier(&self, keyword: SyntaxKind) -> bool {
        ModifierFlags::from_keyword(keyword)
            .is_some_and(|flag| self.modifiers().contains(flag))
    }

    fn annotation_entries(&self) -> Vec<AnnotationEntry<'t>> {
        self.modifier_list()
            .map(|list| list.annotation_entries())
            .unwrap_or_default()
    }
}

macro_rules! impl_modifier_list_owner {
    ($($name:ident),+ $(,)?) => {$(
        impl<'t> ModifierListOwner<'t> for $name<'t> {
            fn modifier_list(&self) -> Option<ModifierList<'t>> {
                self.tree_node()?.find_child_map(ModifierList::cast)
            }

            fn modifiers(&self) -> ModifierFlags {
                match self.0.stub() {
                    Some(stub) => stub.modifiers(),
                    None => self
                        .modifier_list()
                        .map(|list| ModifierFlags::from_modifier_list(&list))
                        .unwrap_or_else(ModifierFlags::empty),
                }
            }
        }
    )+};
}

impl_modifier_list_owner!(
    Class,
    ObjectDecl,
    Fun,
    Property,
    PropertyAccessor,
    TypeAlias,
    Parameter,
    EnumEntry,
    PrimaryConstructor,
    SecondaryConstructor,
);

/// Declarations with a body: a block, or an `= expression` form.
pub trait DeclarationWithBody<'t> {
    /// The block body, when the body is a block.
    fn body_block(&self) -> Option<BlockExpr<'t>>;

    /// The body in either form: the block, or the expression after `=`.
    fn body_expression(&self) -> Option<Expr<'t>>;

    fn has_block_body(&self) -> bool;

    fn has_body(&self) -> bool {
        self.body_expression().is_some()
    }
}

macro_rules! impl_declaration_with_body {
    ($($name:ident),+ $(,)?) => {$(
        impl<'t> DeclarationWithBody<'t> for $name<'t> {
            fn body_block(&self) -> Option<BlockExpr<'t>> {
                self.tree_node()?.find_child_map(BlockExpr::cast)
            }

            fn body_expression(&self) -> Option<Expr<'t>> {
                if let Some(block) = self.body_block() {
                    return Some(Expr::Block(block));
                }
                let node = self.tree_node()?;
                let eq = node.find_child_by_kind(SyntaxKind::Eq)?;
                node.find_after(eq, Expr::cast)
            }

            fn has_block_body(&self) -> bool {
                self.schema_flag(StubFlags::BLOCK_BODY, |n| {
                    n.find_child_map(BlockExpr::cast).is_some()
                })
            }

            fn has_body(&self) -> bool {
                self.schema_flag(StubFlags::HAS_BODY, |_| self.body_expression().is_some())
            }
        }
    )+};
}

impl_declaration_with_body!(Fun, PropertyAccessor, SecondaryConstructor, ClassInitializer);

/// Things invoked with a value-argument list.
pub trait CallLike<'t> {
    fn value_argument_list(&self) -> Option<ValueArgumentList<'t>>;

    fn value_arguments(&self) -> Vec<ValueArgument<'t>> {
        self.value_argument_list()
            .map(|list| list.arguments())
            .unwrap_or_default()
    }
}

impl<'t> CallLike<'t> for crate::expr::CallExpr<'t> {
    fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        crate::expr::CallExpr::value_argument_list(self)
    }
}

impl<'t> CallLike<'t> for crate::clauses::SuperTypeCallEntry<'t> {
    fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        crate::clauses::SuperTypeCallEntry::value_argument_list(self)
    }
}

impl<'t> CallLike<'t> for AnnotationEntry<'t> {
    fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        AnnotationEntry::value_argument_list(self)
    }
}

impl<'t> CallLike<'t> for EnumEntry<'t> {
    fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.tree_node()?.find_child_map(ValueArgumentList::cast)
    }
}

// =============================================================================
// Class-like declarations
// =============================================================================

/// Classes and objects share their shape; several utilities want either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassLikeDecl<'t> {
    Class(Class<'t>),
    Object(ObjectDecl<'t>),
}

impl<'t> ClassLikeDecl<'t> {
    pub fn cast(node: Node<'t>) -> Option<ClassLikeDecl<'t>> {
        match node.kind() {
            SyntaxKind::Class => Some(ClassLikeDecl::Class(Class(Backing::Tree(node)))),
            SyntaxKind::ObjectDeclaration => {
                Some(ClassLikeDecl::Object(ObjectDecl(Backing::Tree(node))))
            }
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            ClassLikeDecl::Class(it) => it.node(),
            ClassLikeDecl::Object(it) => it.node(),
        }
    }

    pub fn name(&self) -> Option<&'t str> {
        match self {
            ClassLikeDecl::Class(it) => it.name(),
            ClassLikeDecl::Object(it) => it.name(),
        }
    }

    pub fn body(&self) -> Option<ClassBody<'t>> {
        match self {
            ClassLikeDecl::Class(it) => it.body(),
            ClassLikeDecl::Object(it) => it.body(),
        }
    }

    pub fn declarations(&self) -> Vec<Decl<'t>> {
        self.body().map(|b| b.declarations()).unwrap_or_default()
    }
}

impl<'t> Class<'t> {
    pub fn body(&self) -> Option<ClassBody<'t>> {
        self.tree_node()?.find_child_map(ClassBody::cast)
    }

    pub fn declarations(&self) -> Vec<Decl<'t>> {
        self.body().map(|b| b.declarations()).unwrap_or_default()
    }

    pub fn is_interface(&self) -> bool {
        self.schema_flag(StubFlags::INTERFACE, |n| {
            n.find_child_by_kind(SyntaxKind::InterfaceKeyword).is_some()
        })
    }

    pub fn is_enum(&self) -> bool {
        self.schema_flag(StubFlags::ENUM_CLASS, |n| {
            n.find_child_by_kind(SyntaxKind::EnumKeyword).is_some()
        })
    }

    pub fn primary_constructor(&self) -> Option<PrimaryConstructor<'t>> {
        self.tree_node()?.find_child_map(PrimaryConstructor::cast)
    }

    pub fn type_parameter_list(&self) -> Option<TypeParameterList<'t>> {
        self.tree_node()?.find_child_map(TypeParameterList::cast)
    }

    pub fn type_parameters(&self) -> Vec<TypeParameter<'t>> {
        self.type_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    pub fn super_type_list(&self) -> Option<SuperTypeList<'t>> {
        self.tree_node()?.find_child_map(SuperTypeList::cast)
    }

    pub fn super_type_entries(&self) -> Vec<SuperTypeListEntry<'t>> {
        self.super_type_list()
            .map(|list| list.entries())
            .unwrap_or_default()
    }

    pub fn enum_entries(&self) -> Vec<EnumEntry<'t>> {
        self.body().map(|b| b.enum_entries()).unwrap_or_default()
    }
}

impl<'t> ObjectDecl<'t> {
    pub fn body(&self) -> Option<ClassBody<'t>> {
        self.tree_node()?.find_child_map(ClassBody::cast)
    }

    pub fn declarations(&self) -> Vec<Decl<'t>> {
        self.body().map(|b| b.declarations()).unwrap_or_default()
    }

    pub fn is_companion(&self) -> bool {
        match self.0.stub() {
            Some(stub) => stub.has_flag(StubFlags::COMPANION),
            None => self.modifiers().contains(ModifierFlags::COMPANION),
        }
    }

    pub fn super_type_list(&self) -> Option<SuperTypeList<'t>> {
        self.tree_node()?.find_child_map(SuperTypeList::cast)
    }

    pub fn super_type_entries(&self) -> Vec<SuperTypeListEntry<'t>> {
        self.super_type_list()
            .map(|list| list.entries())
            .unwrap_or_default()
    }

    /// Whether this object is the anonymous object of an object literal.
    pub fn is_object_literal(&self) -> bool {
        self.tree_node()
            .and_then(|n| n.parent())
            .is_some_and(|p| p.kind() == SyntaxKind::ObjectLiteralExpression)
    }
}

// =============================================================================
// Functions, properties, parameters
// =============================================================================

impl<'t> Fun<'t> {
    pub fn value_parameter_list(&self) -> Option<ParameterList<'t>> {
        self.tree_node()?.find_child_map(ParameterList::cast)
    }

    pub fn value_parameters(&self) -> Vec<Parameter<'t>> {
        self.value_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    pub fn type_parameter_list(&self) -> Option<TypeParameterList<'t>> {
        self.tree_node()?.find_child_map(TypeParameterList::cast)
    }

    pub fn type_parameters(&self) -> Vec<TypeParameter<'t>> {
        self.type_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    /// The receiver type of an extension function, `T` in `fun T.f()`.
    pub fn receiver_type(&self) -> Option<TypeReference<'t>> {
        let node = self.tree_node()?;
        let dot = node.find_child_by_kind(SyntaxKind::Dot)?;
        let receiver = node.find_child_map(TypeReference::cast)?;
        (receiver.range().start < dot.range().start).then_some(receiver)
    }

    /// The declared return type after the colon.
    pub fn return_type(&self) -> Option<TypeReference<'t>> {
        let node = self.tree_node()?;
        let colon = node.find_child_by_kind(SyntaxKind::Colon)?;
        node.find_after(colon, TypeReference::cast)
    }

    pub fn is_local(&self) -> bool {
        self.tree_node()
            .and_then(|n| n.parent())
            .is_some_and(|p| crate::node::is_statement_container(p.kind()))
    }
}

impl<'t> Property<'t> {
    pub fn is_var(&self) -> bool {
        self.schema_flag(StubFlags::MUTABLE, |n| {
            n.find_child_by_kind(SyntaxKind::VarKeyword).is_some()
        })
    }

    pub fn has_initializer(&self) -> bool {
        match self.0.stub() {
            Some(stub) => stub.has_flag(StubFlags::HAS_INITIALIZER),
            None => self.initializer().is_some(),
        }
    }

    /// The initializer after `=`.
    pub fn initializer(&self) -> Option<Expr<'t>> {
        let node = self.tree_node()?;
        let eq = node.find_child_by_kind(SyntaxKind::Eq)?;
        node.find_after(eq, Expr::cast)
    }

    /// The declared type after the colon.
    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        let node = self.tree_node()?;
        let colon = node.find_child_by_kind(SyntaxKind::Colon)?;
        node.find_after(colon, TypeReference::cast)
    }

    pub fn accessors(&self) -> Vec<PropertyAccessor<'t>> {
        self.tree_node()
            .map(|n| n.children_map(PropertyAccessor::cast))
            .unwrap_or_default()
    }

    pub fn getter(&self) -> Option<PropertyAccessor<'t>> {
        self.accessors().into_iter().find(|a| a.is_getter())
    }

    pub fn setter(&self) -> Option<PropertyAccessor<'t>> {
        self.accessors().into_iter().find(|a| a.is_setter())
    }

    pub fn is_top_level(&self) -> bool {
        self.schema_flag(StubFlags::TOP_LEVEL, |n| {
            n.parent().is_some_and(|p| p.kind() == SyntaxKind::SourceFile)
        })
    }

    pub fn is_local(&self) -> bool {
        self.tree_node()
            .and_then(|n| n.parent())
            .is_some_and(|p| crate::node::is_statement_container(p.kind()))
    }
}

impl<'t> PropertyAccessor<'t> {
    pub fn is_getter(&self) -> bool {
        self.name() == Some("get")
    }

    pub fn is_setter(&self) -> bool {
        self.name() == Some("set")
    }

    pub fn value_parameter_list(&self) -> Option<ParameterList<'t>> {
        self.tree_node()?.find_child_map(ParameterList::cast)
    }
}

impl<'t> TypeAlias<'t> {
    /// The aliased type after `=`.
    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        let node = self.tree_node()?;
        let eq = node.find_child_by_kind(SyntaxKind::Eq)?;
        node.find_after(eq, TypeReference::cast)
    }
}

impl<'t> DestructuringDecl<'t> {
    pub fn entries(&self) -> Vec<DestructuringEntry<'t>> {
        self.tree_node()
            .map(|n| n.children_map(DestructuringEntry::cast))
            .unwrap_or_default()
    }

    pub fn is_var(&self) -> bool {
        self.schema_flag(StubFlags::MUTABLE, |n| {
            n.find_child_by_kind(SyntaxKind::VarKeyword).is_some()
        })
    }

    pub fn initializer(&self) -> Option<Expr<'t>> {
        let node = self.tree_node()?;
        let eq = node.find_child_by_kind(SyntaxKind::Eq)?;
        node.find_after(eq, Expr::cast)
    }
}

impl<'t> Parameter<'t> {
    /// Whether a constructor parameter is written `val x` / `var x`.
    pub fn has_val_or_var(&self) -> bool {
        self.schema_flag(StubFlags::VAL_OR_VAR, |n| {
            n.find_child_by_kind(SyntaxKind::ValKeyword).is_some()
                || n.find_child_by_kind(SyntaxKind::VarKeyword).is_some()
        })
    }

    pub fn is_mutable(&self) -> bool {
        self.schema_flag(StubFlags::MUTABLE, |n| {
            n.find_child_by_kind(SyntaxKind::VarKeyword).is_some()
        })
    }

    pub fn has_default_value(&self) -> bool {
        match self.0.stub() {
            Some(stub) => stub.has_flag(StubFlags::HAS_DEFAULT_VALUE),
            None => self.default_value().is_some(),
        }
    }

    /// The default value after `=`.
    pub fn default_value(&self) -> Option<Expr<'t>> {
        let node = self.tree_node()?;
        let eq = node.find_child_by_kind(SyntaxKind::Eq)?;
        node.find_after(eq, Expr::cast)
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.tree_node()?.find_child_map(TypeReference::cast)
    }
}

impl<'t> TypeParameter<'t> {
    /// The upper bound after the colon, `T : Bound`.
    pub fn extends_bound(&self) -> Option<TypeReference<'t>> {
        self.tree_node()?.find_child_map(TypeReference::cast)
    }
}

impl<'t> EnumEntry<'t> {
    pub fn body(&self) -> Option<ClassBody<'t>> {
        self.tree_node()?.find_child_map(ClassBody::cast)
    }
}

impl<'t> PrimaryConstructor<'t> {
    pub fn value_parameter_list(&self) -> Option<ParameterList<'t>> {
        self.tree_node()?.find_child_map(ParameterList::cast)
    }

    pub fn value_parameters(&self) -> Vec<Parameter<'t>> {
        self.value_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }
}

impl<'t> SecondaryConstructor<'t> {
    pub fn value_parameter_list(&self) -> Option<ParameterList<'t>> {
        self.tree_node()?.find_child_map(ParameterList::cast)
    }

    pub fn value_parameters(&self) -> Vec<Parameter<'t>> {
        self.value_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    pub fn body(&self) -> Option<BlockExpr<'t>> {
        self.tree_node()?.find_child_map(BlockExpr::cast)
    }
}

impl<'t> ClassInitializer<'t> {
    pub fn body(&self) -> Option<BlockExpr<'t>> {
        self.tree_node()?.find_child_map(BlockExpr::cast)
    }
}

/// The outermost enclosing class or object of a node, `None` at top level.
pub fn outermost_class_or_object<'t>(node: Node<'t>) -> Option<ClassLikeDecl<'t>> {
    let mut outermost = None;
    let mut current = node.parent();
    while let Some(n) = current {
        if let Some(class_like) = ClassLikeDecl::cast(n) {
            outermost = Some(class_like);
        }
        current = n.parent();
    }
    outermost
}

macro_rules! impl_into_decl {
    ($($wrapper:ident => $variant:ident,)+) => {$(
        impl<'t> From<$wrapper<'t>> for Decl<'t> {
            fn from(it: $wrapper<'t>) -> Decl<'t> {
                Decl::$variant(it)
            }
        }
    )+};
}

impl_into_decl! {
    Class => Class,
    ObjectDecl => Object,
    Fun => Function,
    Property => Property,
    PropertyAccessor => PropertyAccessor,
    TypeAlias => TypeAlias,
    DestructuringDecl => Destructuring,
    DestructuringEntry => DestructuringEntry,
    Parameter => Parameter,
    TypeParameter => TypeParameter,
    EnumEntry => EnumEntry,
    PrimaryConstructor => PrimaryConstructor,
    SecondaryConstructor => SecondaryConstructor,
    ClassInitializer => ClassInitializer,
}

impl<'t> From<Decl<'t>> for Node<'t> {
    /// Panics for a detached stub backing, like [`Decl::node`].
    fn from(it: Decl<'t>) -> Node<'t> {
        it.node()
    }
}
