//! Type element wrappers: the `TypeElem` family.

use lyra_tree::SyntaxKind;

use crate::clauses::TypeProjection;
use crate::decl::ParameterList;
use crate::expr::RefExpr;
use crate::node::{node_wrapper, required, Node};

node_wrapper!(
    /// A type position in a declaration: `: T`, return types, receiver
    /// types. Wraps exactly one type element.
    TypeReference,
    SyntaxKind::TypeReference
);
node_wrapper!(
    /// A (possibly qualified) named type with optional type arguments,
    /// `a.b.List<T>`.
    UserType,
    SyntaxKind::UserType
);
node_wrapper!(
    /// `(P1, P2) -> R`, with an optional receiver: `T.(P) -> R`.
    FunctionType,
    SyntaxKind::FunctionType
);
node_wrapper!(
    /// `T?`.
    NullableType,
    SyntaxKind::NullableType
);

/// The type element family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeElem<'t> {
    User(UserType<'t>),
    Function(FunctionType<'t>),
    Nullable(NullableType<'t>),
}

impl<'t> TypeElem<'t> {
    pub fn cast(node: Node<'t>) -> Option<TypeElem<'t>> {
        match node.kind() {
            SyntaxKind::UserType => Some(TypeElem::User(UserType(node))),
            SyntaxKind::FunctionType => Some(TypeElem::Function(FunctionType(node))),
            SyntaxKind::NullableType => Some(TypeElem::Nullable(NullableType(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            TypeElem::User(it) => it.node(),
            TypeElem::Function(it) => it.node(),
            TypeElem::Nullable(it) => it.node(),
        }
    }
}

impl<'t> TypeReference<'t> {
    /// The wrapped type element; absent when the user stopped after `:`.
    pub fn type_element(&self) -> Option<TypeElem<'t>> {
        self.0.find_child_map(TypeElem::cast)
    }

    /// Whether the referenced type is syntactically nullable.
    pub fn is_nullable(&self) -> bool {
        matches!(self.type_element(), Some(TypeElem::Nullable(_)))
    }
}

impl<'t> UserType<'t> {
    /// The qualifier, `a.b` in `a.b.List<T>`.
    pub fn qualifier(&self) -> Option<UserType<'t>> {
        self.0.find_child_map(UserType::cast)
    }

    /// The rightmost name.
    pub fn reference_expression(&self) -> Option<RefExpr<'t>> {
        self.0.find_child_map(RefExpr::cast)
    }

    pub fn referenced_name(&self) -> Option<&'t str> {
        self.reference_expression().map(|r| r.referenced_name())
    }

    pub fn type_argument_list(&self) -> Option<Node<'t>> {
        self.0.find_child_by_kind(SyntaxKind::TypeArgumentList)
    }

    pub fn type_arguments(&self) -> Vec<TypeProjection<'t>> {
        self.type_argument_list()
            .map(|list| list.children_map(TypeProjection::cast))
            .unwrap_or_default()
    }
}

impl<'t> FunctionType<'t> {
    /// The receiver type before the dot, `T` in `T.(P) -> R`.
    pub fn receiver_type(&self) -> Option<TypeReference<'t>> {
        let receiver = self.0.find_child_map(TypeReference::cast)?;
        let arrow = self.0.find_child_by_kind(SyntaxKind::Arrow)?;
        (receiver.range().start < arrow.range().start).then_some(receiver)
    }

    pub fn parameter_list(&self) -> Option<ParameterList<'t>> {
        self.0.find_child_map(ParameterList::cast)
    }

    /// The type after the arrow.
    pub fn return_type(&self) -> Option<TypeReference<'t>> {
        let arrow = self.0.find_child_by_kind(SyntaxKind::Arrow)?;
        self.0.find_after(arrow, TypeReference::cast)
    }
}

impl<'t> NullableType<'t> {
    pub fn inner_type(&self) -> TypeElem<'t> {
        required(self.0.find_child_map(TypeElem::cast), "inner element of nullable type")
    }
}

impl<'t> From<UserType<'t>> for TypeElem<'t> {
    fn from(it: UserType<'t>) -> TypeElem<'t> {
        TypeElem::User(it)
    }
}

impl<'t> From<FunctionType<'t>> for TypeElem<'t> {
    fn from(it: FunctionType<'t>) -> TypeElem<'t> {
        TypeElem::Function(it)
    }
}

impl<'t> From<NullableType<'t>> for TypeElem<'t> {
    fn from(it: NullableType<'t>) -> TypeElem<'t> {
        TypeElem::Nullable(it)
    }
}

impl<'t> From<TypeElem<'t>> for Node<'t> {
    fn from(it: TypeElem<'t>) -> Node<'t> {
        it.node()
    }
}
