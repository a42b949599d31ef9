//! The visitor families and their dispatch.
//!
//! Every visit method defaults to forwarding to its syntactic supertype:
//! specific kind, then grammar sub-family (`visit_unary_expression`,
//! `visit_qualified_expression`, ...), then family
//! (`visit_expression`/`visit_declaration`/`visit_type_element`), then
//! `visit_element`. A visitor overrides the most general method it cares
//! about and receives everything below it.
//!
//! - [`Visitor`] returns a value and threads caller context; `visit_element`
//!   is the one required method.
//! - [`VisitorVoid`] terminates in a no-op `visit_element`.
//! - [`TreeVisitor`] / [`TreeVisitorVoid`] terminate in a `visit_element`
//!   that descends into child elements ([`crate::walk::walk_element`]).
//!   Overriding a method without calling the walk helper prunes that
//!   subtree.
//!
//! There is no cancellation primitive: visitors thread a stop flag through
//! their data argument, or unwind with a sentinel panic caught at the call
//! site.

use crate::clauses::*;
use crate::decl::*;
use crate::expr::*;
use crate::node::Node;
use crate::registry::{for_each_element, Element};
use crate::ty::*;
use crate::walk;

/// One entry per visit method except the terminal `visit_element`:
/// `(method, parameter type, fallback method)`. The fallback's parameter
/// type drives the `into` conversion, so the chain is checked by the
/// compiler.
macro_rules! for_each_visit_method {
    ($callback:ident) => {
        $callback! {
            // Expressions
            (visit_binary_expression, BinaryExpr, visit_expression),
            (visit_binary_with_type, BinaryWithTypeExpr, visit_expression),
            (visit_is_expression, IsExpr, visit_expression),
            (visit_prefix_expression, PrefixExpr, visit_unary_expression),
            (visit_postfix_expression, PostfixExpr, visit_unary_expression),
            (visit_parenthesized_expression, ParenExpr, visit_expression),
            (visit_labeled_expression, LabeledExpr, visit_expression_with_label),
            (visit_annotated_expression, AnnotatedExpr, visit_expression),
            (visit_reference_expression, RefExpr, visit_expression),
            (visit_operation_reference, OperationRef, visit_expression),
            (visit_call_expression, CallExpr, visit_expression),
            (visit_array_access_expression, ArrayAccessExpr, visit_expression),
            (visit_dot_qualified_expression, DotQualifiedExpr, visit_qualified_expression),
            (visit_safe_access_expression, SafeAccessExpr, visit_qualified_expression),
            (visit_callable_reference_expression, CallableRefExpr, visit_expression),
            (visit_class_literal_expression, ClassLiteralExpr, visit_expression),
            (visit_object_literal_expression, ObjectLiteralExpr, visit_expression),
            (visit_collection_literal_expression, CollectionLiteralExpr, visit_expression),
            (visit_lambda_expression, LambdaExpr, visit_expression),
            (visit_function_literal, FunctionLiteral, visit_expression),
            (visit_this_expression, ThisExpr, visit_expression_with_label),
            (visit_super_expression, SuperExpr, visit_expression_with_label),
            (visit_return_expression, ReturnExpr, visit_expression_with_label),
            (visit_throw_expression, ThrowExpr, visit_expression),
            (visit_break_expression, BreakExpr, visit_expression_with_label),
            (visit_continue_expression, ContinueExpr, visit_expression_with_label),
            (visit_constant_expression, ConstantExpr, visit_expression),
            (visit_string_template_expression, StringTemplateExpr, visit_expression),
            (visit_block_expression, BlockExpr, visit_expression),
            (visit_if_expression, IfExpr, visit_expression),
            (visit_when_expression, WhenExpr, visit_expression),
            (visit_for_expression, ForExpr, visit_loop_expression),
            (visit_while_expression, WhileExpr, visit_loop_expression),
            (visit_do_while_expression, DoWhileExpr, visit_loop_expression),
            (visit_try_expression, TryExpr, visit_expression),
            // Expression sub-families
            (visit_unary_expression, UnaryExpr, visit_expression),
            (visit_qualified_expression, QualifiedExpr, visit_expression),
            (visit_loop_expression, LoopExpr, visit_expression),
            (visit_expression_with_label, ExprWithLabel, visit_expression),
            // Declarations
            (visit_class, Class, visit_declaration),
            (visit_object_declaration, ObjectDecl, visit_declaration),
            (visit_named_function, Fun, visit_declaration),
            (visit_property, Property, visit_declaration),
            (visit_property_accessor, PropertyAccessor, visit_declaration),
            (visit_type_alias, TypeAlias, visit_declaration),
            (visit_destructuring_declaration, DestructuringDecl, visit_declaration),
            (visit_destructuring_declaration_entry, DestructuringEntry, visit_declaration),
            (visit_parameter, Parameter, visit_declaration),
            (visit_type_parameter, TypeParameter, visit_declaration),
            (visit_enum_entry, EnumEntry, visit_declaration),
            (visit_primary_constructor, PrimaryConstructor, visit_declaration),
            (visit_secondary_constructor, SecondaryConstructor, visit_declaration),
            (visit_class_initializer, ClassInitializer, visit_declaration),
            // Type elements
            (visit_user_type, UserType, visit_type_element),
            (visit_function_type, FunctionType, visit_type_element),
            (visit_nullable_type, NullableType, visit_type_element),
            (visit_type_reference, TypeReference, visit_element),
            // When conditions and template entries
            (visit_when_condition_with_expression, WhenConditionWithExpression, visit_when_condition),
            (visit_when_condition_in_range, WhenConditionInRange, visit_when_condition),
            (visit_when_condition_is_pattern, WhenConditionIsPattern, visit_when_condition),
            (visit_literal_template_entry, LiteralTemplateEntry, visit_template_entry),
            (visit_escape_template_entry, EscapeTemplateEntry, visit_template_entry),
            (visit_short_template_entry, ShortTemplateEntry, visit_template_entry),
            (visit_long_template_entry, LongTemplateEntry, visit_template_entry),
            // File structure and clauses
            (visit_source_file, SourceFile, visit_element),
            (visit_package_directive, PackageDirective, visit_element),
            (visit_import_list, ImportList, visit_element),
            (visit_import_directive, ImportDirective, visit_element),
            (visit_import_alias, ImportAlias, visit_element),
            (visit_class_body, ClassBody, visit_element),
            (visit_modifier_list, ModifierList, visit_element),
            (visit_annotation_entry, AnnotationEntry, visit_element),
            (visit_parameter_list, ParameterList, visit_element),
            (visit_value_argument_list, ValueArgumentList, visit_element),
            (visit_value_argument, ValueArgument, visit_element),
            (visit_type_parameter_list, TypeParameterList, visit_element),
            (visit_type_projection, TypeProjection, visit_element),
            (visit_super_type_list, SuperTypeList, visit_element),
            (visit_super_type_entry, SuperTypeEntry, visit_element),
            (visit_super_type_call_entry, SuperTypeCallEntry, visit_element),
            (visit_constructor_callee, ConstructorCallee, visit_element),
            (visit_when_entry, WhenEntry, visit_element),
            (visit_catch_clause, CatchClause, visit_element),
            (visit_finally_section, FinallySection, visit_element),
            (visit_label, Label, visit_element),
            // Families
            (visit_expression, Expr, visit_element),
            (visit_declaration, Decl, visit_element),
            (visit_type_element, TypeElem, visit_element),
            (visit_when_condition, WhenCondition, visit_element),
            (visit_template_entry, TemplateEntry, visit_element),
        }
    };
}

macro_rules! visitor_defaults {
    ($(($method:ident, $ty:ident, $fallback:ident)),+ $(,)?) => {$(
        fn $method(&mut self, item: $ty<'t>, data: &mut D) -> R {
            self.$fallback(item.into(), data)
        }
    )+};
}

/// Value-returning visitor with caller context.
pub trait Visitor<'t, R, D> {
    /// Terminal fallback; the only required method.
    fn visit_element(&mut self, node: Node<'t>, data: &mut D) -> R;

    for_each_visit_method!(visitor_defaults);
}

macro_rules! visitor_void_defaults {
    ($(($method:ident, $ty:ident, $fallback:ident)),+ $(,)?) => {$(
        fn $method(&mut self, item: $ty<'t>) {
            self.$fallback(item.into());
        }
    )+};
}

/// Side-effecting visitor; the terminal fallback does nothing.
pub trait VisitorVoid<'t> {
    fn visit_element(&mut self, _node: Node<'t>) {}

    for_each_visit_method!(visitor_void_defaults);
}

macro_rules! tree_visitor_defaults {
    ($(($method:ident, $ty:ident, $fallback:ident)),+ $(,)?) => {$(
        fn $method(&mut self, item: $ty<'t>, data: &mut D)
        where
            Self: Sized,
        {
            self.$fallback(item.into(), data);
        }
    )+};
}

/// Recursive visitor with caller context: unhandled nodes are descended
/// into rather than skipped.
pub trait TreeVisitor<'t, D> {
    fn visit_element(&mut self, node: Node<'t>, data: &mut D)
    where
        Self: Sized,
    {
        walk::walk_element(self, node, data);
    }

    for_each_visit_method!(tree_visitor_defaults);
}

macro_rules! tree_visitor_void_defaults {
    ($(($method:ident, $ty:ident, $fallback:ident)),+ $(,)?) => {$(
        fn $method(&mut self, item: $ty<'t>)
        where
            Self: Sized,
        {
            self.$fallback(item.into());
        }
    )+};
}

/// Recursive side-effecting visitor.
pub trait TreeVisitorVoid<'t> {
    fn visit_element(&mut self, node: Node<'t>)
    where
        Self: Sized,
    {
        walk::walk_element_void(self, node);
    }

    for_each_visit_method!(tree_visitor_void_defaults);
}

macro_rules! define_dispatch {
    ($(($pattern:pat, $variant:ident, $wrapper:ident, $visit:ident)),+ $(,)?) => {
        /// Dispatch one node to the visit method for its kind.
        pub fn accept<'t, R, D, V: Visitor<'t, R, D>>(
            visitor: &mut V,
            node: Node<'t>,
            data: &mut D,
        ) -> R {
            match Element::new(node) {
                $(Element::$variant(it) => visitor.$visit(it, data),)+
                Element::Other(other) => visitor.visit_element(other, data),
            }
        }

        pub fn accept_void<'t, V: VisitorVoid<'t>>(visitor: &mut V, node: Node<'t>) {
            match Element::new(node) {
                $(Element::$variant(it) => visitor.$visit(it),)+
                Element::Other(other) => visitor.visit_element(other),
            }
        }

        pub fn accept_tree<'t, D, V: TreeVisitor<'t, D>>(
            visitor: &mut V,
            node: Node<'t>,
            data: &mut D,
        ) {
            match Element::new(node) {
                $(Element::$variant(it) => visitor.$visit(it, data),)+
                Element::Other(other) => visitor.visit_element(other, data),
            }
        }

        pub fn accept_tree_void<'t, V: TreeVisitorVoid<'t>>(visitor: &mut V, node: Node<'t>) {
            match Element::new(node) {
                $(Element::$variant(it) => visitor.$visit(it),)+
                Element::Other(other) => visitor.visit_element(other),
            }
        }
    };
}

for_each_element!(define_dispatch);

impl<'t> Node<'t> {
    pub fn accept<R, D, V: Visitor<'t, R, D>>(&self, visitor: &mut V, data: &mut D) -> R {
        accept(visitor, *self, data)
    }

    pub fn accept_void<V: VisitorVoid<'t>>(&self, visitor: &mut V) {
        accept_void(visitor, *self)
    }

    pub fn accept_tree<D, V: TreeVisitor<'t, D>>(&self, visitor: &mut V, data: &mut D) {
        accept_tree(visitor, *self, data)
    }

    pub fn accept_tree_void<V: TreeVisitorVoid<'t>>(&self, visitor: &mut V) {
        accept_tree_void(visitor, *self)
    }

    /// Dispatch each child element, not the node itself.
    pub fn accept_children_void<V: VisitorVoid<'t>>(&self, visitor: &mut V) {
        for child in self.child_elements() {
            accept_void(visitor, child);
        }
    }
}
