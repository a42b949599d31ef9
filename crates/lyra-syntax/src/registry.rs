//! The node kind registry: one total mapping from kind tags to typed
//! wrappers.
//!
//! [`Element::new`] is the only place in the crate that decides which facade
//! constructor a kind gets. It never fails: kinds without a dedicated
//! wrapper, error-recovery nodes, and raw tokens all yield
//! [`Element::Other`], which still supports the full generic [`Node`]
//! surface. The same table drives the visitor dispatch in
//! [`crate::visitor`], so adding a kind here is the whole registration.

use lyra_tree::{SyntaxKind, TokenSet};

use crate::clauses::*;
use crate::decl::*;
use crate::expr::*;
use crate::node::Node;
use crate::ty::*;

/// One entry per facade constructor: `(kind pattern, variant, wrapper type,
/// visit method)`. Shared between the `Element` definition below and the
/// visitor dispatch functions.
macro_rules! for_each_element {
    ($callback:ident) => {
        $callback! {
            // Expressions
            (SyntaxKind::BinaryExpression, Binary, BinaryExpr, visit_binary_expression),
            (SyntaxKind::BinaryWithType, BinaryWithType, BinaryWithTypeExpr, visit_binary_with_type),
            (SyntaxKind::IsExpression, Is, IsExpr, visit_is_expression),
            (SyntaxKind::PrefixExpression, Prefix, PrefixExpr, visit_prefix_expression),
            (SyntaxKind::PostfixExpression, Postfix, PostfixExpr, visit_postfix_expression),
            (SyntaxKind::ParenthesizedExpression, Paren, ParenExpr, visit_parenthesized_expression),
            (SyntaxKind::LabeledExpression, Labeled, LabeledExpr, visit_labeled_expression),
            (SyntaxKind::AnnotatedExpression, Annotated, AnnotatedExpr, visit_annotated_expression),
            (SyntaxKind::ReferenceExpression, Ref, RefExpr, visit_reference_expression),
            (SyntaxKind::OperationReference, OperationRef, OperationRef, visit_operation_reference),
            (SyntaxKind::CallExpression, Call, CallExpr, visit_call_expression),
            (SyntaxKind::ArrayAccessExpression, ArrayAccess, ArrayAccessExpr, visit_array_access_expression),
            (SyntaxKind::DotQualifiedExpression, DotQualified, DotQualifiedExpr, visit_dot_qualified_expression),
            (SyntaxKind::SafeAccessExpression, SafeAccess, SafeAccessExpr, visit_safe_access_expression),
            (SyntaxKind::CallableReferenceExpression, CallableRef, CallableRefExpr, visit_callable_reference_expression),
            (SyntaxKind::ClassLiteralExpression, ClassLiteral, ClassLiteralExpr, visit_class_literal_expression),
            (SyntaxKind::ObjectLiteralExpression, ObjectLiteral, ObjectLiteralExpr, visit_object_literal_expression),
            (SyntaxKind::CollectionLiteralExpression, CollectionLiteral, CollectionLiteralExpr, visit_collection_literal_expression),
            (SyntaxKind::LambdaExpression, Lambda, LambdaExpr, visit_lambda_expression),
            (SyntaxKind::FunctionLiteral, FunctionLiteral, FunctionLiteral, visit_function_literal),
            (SyntaxKind::ThisExpression, This, ThisExpr, visit_this_expression),
            (SyntaxKind::SuperExpression, Super, SuperExpr, visit_super_expression),
            (SyntaxKind::ReturnExpression, Return, ReturnExpr, visit_return_expression),
            (SyntaxKind::ThrowExpression, Throw, ThrowExpr, visit_throw_expression),
            (SyntaxKind::BreakExpression, Break, BreakExpr, visit_break_expression),
            (SyntaxKind::ContinueExpression, Continue, ContinueExpr, visit_continue_expression),
            (
                SyntaxKind::IntegerConstant
                    | SyntaxKind::FloatConstant
                    | SyntaxKind::BooleanConstant
                    | SyntaxKind::CharacterConstant
                    | SyntaxKind::NullConstant,
                Constant,
                ConstantExpr,
                visit_constant_expression
            ),
            (SyntaxKind::StringTemplate, StringTemplate, StringTemplateExpr, visit_string_template_expression),
            (SyntaxKind::Block, Block, BlockExpr, visit_block_expression),
            (SyntaxKind::IfExpression, If, IfExpr, visit_if_expression),
            (SyntaxKind::WhenExpression, When, WhenExpr, visit_when_expression),
            (SyntaxKind::ForExpression, For, ForExpr, visit_for_expression),
            (SyntaxKind::WhileExpression, While, WhileExpr, visit_while_expression),
            (SyntaxKind::DoWhileExpression, DoWhile, DoWhileExpr, visit_do_while_expression),
            (SyntaxKind::TryExpression, Try, TryExpr, visit_try_expression),
            // Declarations
            (SyntaxKind::Class, Class, Class, visit_class),
            (SyntaxKind::ObjectDeclaration, Object, ObjectDecl, visit_object_declaration),
            (SyntaxKind::Fun, Function, Fun, visit_named_function),
            (SyntaxKind::Property, Property, Property, visit_property),
            (SyntaxKind::PropertyAccessor, PropertyAccessor, PropertyAccessor, visit_property_accessor),
            (SyntaxKind::TypeAlias, TypeAlias, TypeAlias, visit_type_alias),
            (SyntaxKind::DestructuringDeclaration, Destructuring, DestructuringDecl, visit_destructuring_declaration),
            (SyntaxKind::DestructuringDeclarationEntry, DestructuringEntry, DestructuringEntry, visit_destructuring_declaration_entry),
            (SyntaxKind::ValueParameter, Parameter, Parameter, visit_parameter),
            (SyntaxKind::TypeParameter, TypeParameter, TypeParameter, visit_type_parameter),
            (SyntaxKind::EnumEntry, EnumEntry, EnumEntry, visit_enum_entry),
            (SyntaxKind::PrimaryConstructor, PrimaryConstructor, PrimaryConstructor, visit_primary_constructor),
            (SyntaxKind::SecondaryConstructor, SecondaryConstructor, SecondaryConstructor, visit_secondary_constructor),
            (SyntaxKind::ClassInitializer, ClassInitializer, ClassInitializer, visit_class_initializer),
            // Type elements
            (SyntaxKind::TypeReference, TypeReference, TypeReference, visit_type_reference),
            (SyntaxKind::UserType, UserType, UserType, visit_user_type),
            (SyntaxKind::FunctionType, FunctionType, FunctionType, visit_function_type),
            (SyntaxKind::NullableType, NullableType, NullableType, visit_nullable_type),
            // File structure and clauses
            (SyntaxKind::SourceFile, SourceFile, SourceFile, visit_source_file),
            (SyntaxKind::PackageDirective, PackageDirective, PackageDirective, visit_package_directive),
            (SyntaxKind::ImportList, ImportList, ImportList, visit_import_list),
            (SyntaxKind::ImportDirective, ImportDirective, ImportDirective, visit_import_directive),
            (SyntaxKind::ImportAlias, ImportAlias, ImportAlias, visit_import_alias),
            (SyntaxKind::ClassBody, ClassBody, ClassBody, visit_class_body),
            (SyntaxKind::ModifierList, ModifierList, ModifierList, visit_modifier_list),
            (SyntaxKind::AnnotationEntry, AnnotationEntry, AnnotationEntry, visit_annotation_entry),
            (SyntaxKind::ValueParameterList, ParameterList, ParameterList, visit_parameter_list),
            (SyntaxKind::ValueArgumentList, ValueArgumentList, ValueArgumentList, visit_value_argument_list),
            (SyntaxKind::ValueArgument, ValueArgument, ValueArgument, visit_value_argument),
            (SyntaxKind::TypeParameterList, TypeParameterList, TypeParameterList, visit_type_parameter_list),
            (SyntaxKind::TypeProjection, TypeProjection, TypeProjection, visit_type_projection),
            (SyntaxKind::SuperTypeList, SuperTypeList, SuperTypeList, visit_super_type_list),
            (SyntaxKind::SuperTypeEntry, SuperTypeEntry, SuperTypeEntry, visit_super_type_entry),
            (SyntaxKind::SuperTypeCallEntry, SuperTypeCallEntry, SuperTypeCallEntry, visit_super_type_call_entry),
            (SyntaxKind::ConstructorCallee, ConstructorCallee, ConstructorCallee, visit_constructor_callee),
            (SyntaxKind::WhenEntry, WhenEntry, WhenEntry, visit_when_entry),
            (SyntaxKind::WhenConditionWithExpression, WhenConditionWithExpression, WhenConditionWithExpression, visit_when_condition_with_expression),
            (SyntaxKind::WhenConditionInRange, WhenConditionInRange, WhenConditionInRange, visit_when_condition_in_range),
            (SyntaxKind::WhenConditionIsPattern, WhenConditionIsPattern, WhenConditionIsPattern, visit_when_condition_is_pattern),
            (SyntaxKind::CatchClause, CatchClause, CatchClause, visit_catch_clause),
            (SyntaxKind::FinallySection, FinallySection, FinallySection, visit_finally_section),
            (SyntaxKind::Label, Label, Label, visit_label),
            (SyntaxKind::LiteralStringTemplateEntry, LiteralTemplateEntry, LiteralTemplateEntry, visit_literal_template_entry),
            (SyntaxKind::EscapeStringTemplateEntry, EscapeTemplateEntry, EscapeTemplateEntry, visit_escape_template_entry),
            (SyntaxKind::ShortStringTemplateEntry, ShortTemplateEntry, ShortTemplateEntry, visit_short_template_entry),
            (SyntaxKind::LongStringTemplateEntry, LongTemplateEntry, LongTemplateEntry, visit_long_template_entry),
        }
    };
}

pub(crate) use for_each_element;

macro_rules! define_element {
    ($(($pattern:pat, $variant:ident, $wrapper:ident, $visit:ident),)+) => {
        /// Closed union over every typed wrapper.
        ///
        /// `TypeConstraintList`/`TypeConstraint`, `TypeArgumentList`, error
        /// nodes, and tokens have no dedicated wrapper and surface as
        /// [`Element::Other`].
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum Element<'t> {
            $($variant($wrapper<'t>),)+
            Other(Node<'t>),
        }

        impl<'t> Element<'t> {
            /// Total: every node gets exactly one element.
            pub fn new(node: Node<'t>) -> Element<'t> {
                match node.kind() {
                    $($pattern => Element::$variant($wrapper::from_node(node)),)+
                    _ => Element::Other(node),
                }
            }

            /// The generic view back. The element's kind always equals the
            /// underlying node's kind.
            pub fn node(&self) -> Node<'t> {
                match self {
                    $(Element::$variant(it) => it.node(),)+
                    Element::Other(node) => *node,
                }
            }

            #[inline]
            pub fn kind(&self) -> SyntaxKind {
                self.node().kind()
            }
        }
    };
}

for_each_element!(define_element);

/// Composite kinds of the Expression family.
pub const EXPRESSIONS: TokenSet = TokenSet::new(&[
    SyntaxKind::BinaryExpression,
    SyntaxKind::BinaryWithType,
    SyntaxKind::IsExpression,
    SyntaxKind::PrefixExpression,
    SyntaxKind::PostfixExpression,
    SyntaxKind::ParenthesizedExpression,
    SyntaxKind::LabeledExpression,
    SyntaxKind::AnnotatedExpression,
    SyntaxKind::ReferenceExpression,
    SyntaxKind::OperationReference,
    SyntaxKind::CallExpression,
    SyntaxKind::ArrayAccessExpression,
    SyntaxKind::DotQualifiedExpression,
    SyntaxKind::SafeAccessExpression,
    SyntaxKind::CallableReferenceExpression,
    SyntaxKind::ClassLiteralExpression,
    SyntaxKind::ObjectLiteralExpression,
    SyntaxKind::CollectionLiteralExpression,
    SyntaxKind::LambdaExpression,
    SyntaxKind::FunctionLiteral,
    SyntaxKind::ThisExpression,
    SyntaxKind::SuperExpression,
    SyntaxKind::ReturnExpression,
    SyntaxKind::ThrowExpression,
    SyntaxKind::BreakExpression,
    SyntaxKind::ContinueExpression,
    SyntaxKind::IntegerConstant,
    SyntaxKind::FloatConstant,
    SyntaxKind::BooleanConstant,
    SyntaxKind::CharacterConstant,
    SyntaxKind::NullConstant,
    SyntaxKind::StringTemplate,
    SyntaxKind::Block,
    SyntaxKind::IfExpression,
    SyntaxKind::WhenExpression,
    SyntaxKind::ForExpression,
    SyntaxKind::WhileExpression,
    SyntaxKind::DoWhileExpression,
    SyntaxKind::TryExpression,
]);

/// Kinds of the Declaration family.
pub const DECLARATIONS: TokenSet = TokenSet::new(&[
    SyntaxKind::Class,
    SyntaxKind::ObjectDeclaration,
    SyntaxKind::Fun,
    SyntaxKind::Property,
    SyntaxKind::PropertyAccessor,
    SyntaxKind::TypeAlias,
    SyntaxKind::DestructuringDeclaration,
    SyntaxKind::DestructuringDeclarationEntry,
    SyntaxKind::ValueParameter,
    SyntaxKind::TypeParameter,
    SyntaxKind::EnumEntry,
    SyntaxKind::PrimaryConstructor,
    SyntaxKind::SecondaryConstructor,
    SyntaxKind::ClassInitializer,
]);

/// Kinds of the type element family.
pub const TYPE_ELEMENTS: TokenSet = TokenSet::new(&[
    SyntaxKind::UserType,
    SyntaxKind::FunctionType,
    SyntaxKind::NullableType,
]);

/// Pattern positions: when conditions and destructuring entries.
pub const PATTERNS: TokenSet = TokenSet::new(&[
    SyntaxKind::WhenConditionWithExpression,
    SyntaxKind::WhenConditionInRange,
    SyntaxKind::WhenConditionIsPattern,
    SyntaxKind::DestructuringDeclarationEntry,
]);

/// Kinds whose direct children sit in statement positions.
pub const STATEMENT_BEARING: TokenSet =
    TokenSet::new(&[SyntaxKind::Block, SyntaxKind::WhenEntry]);

/// Family predicates on raw kinds.
pub trait SyntaxKindExt {
    fn is_expression_kind(self) -> bool;
    fn is_declaration_kind(self) -> bool;
    fn is_type_element_kind(self) -> bool;
    fn is_pattern_kind(self) -> bool;
}

impl SyntaxKindExt for SyntaxKind {
    fn is_expression_kind(self) -> bool {
        EXPRESSIONS.contains(self)
    }

    fn is_declaration_kind(self) -> bool {
        DECLARATIONS.contains(self)
    }

    fn is_type_element_kind(self) -> bool {
        TYPE_ELEMENTS.contains(self)
    }

    fn is_pattern_kind(self) -> bool {
        PATTERNS.contains(self)
    }
}
