//! File structure, declaration parts, and control-flow clause wrappers.

use lyra_tree::{SyntaxKind, SyntaxTree};

use crate::decl::{Decl, EnumEntry, Parameter};
use crate::expr::{BlockExpr, Expr, OperationRef, RefExpr};
use crate::node::{node_wrapper, required, Node};
use crate::ty::{TypeReference, UserType};

node_wrapper!(SourceFile, SyntaxKind::SourceFile);
node_wrapper!(PackageDirective, SyntaxKind::PackageDirective);
node_wrapper!(ImportList, SyntaxKind::ImportList);
node_wrapper!(ImportDirective, SyntaxKind::ImportDirective);
node_wrapper!(ImportAlias, SyntaxKind::ImportAlias);
node_wrapper!(ClassBody, SyntaxKind::ClassBody);
node_wrapper!(ModifierList, SyntaxKind::ModifierList);
node_wrapper!(
    /// `@Name` or `@Name(args)`.
    AnnotationEntry,
    SyntaxKind::AnnotationEntry
);
node_wrapper!(ValueArgumentList, SyntaxKind::ValueArgumentList);
node_wrapper!(ValueArgument, SyntaxKind::ValueArgument);
node_wrapper!(TypeParameterList, SyntaxKind::TypeParameterList);
node_wrapper!(TypeProjection, SyntaxKind::TypeProjection);
node_wrapper!(SuperTypeList, SyntaxKind::SuperTypeList);
node_wrapper!(
    /// `: Base` without a constructor call.
    SuperTypeEntry,
    SyntaxKind::SuperTypeEntry
);
node_wrapper!(
    /// `: Base(args)`.
    SuperTypeCallEntry,
    SyntaxKind::SuperTypeCallEntry
);
node_wrapper!(ConstructorCallee, SyntaxKind::ConstructorCallee);
node_wrapper!(WhenEntry, SyntaxKind::WhenEntry);
node_wrapper!(CatchClause, SyntaxKind::CatchClause);
node_wrapper!(FinallySection, SyntaxKind::FinallySection);
node_wrapper!(
    /// A label definition or reference, `loop@` / `@loop`.
    Label,
    SyntaxKind::Label
);

impl<'t> SourceFile<'t> {
    /// Root wrapper over a whole tree; panics if the root is not a file.
    pub fn of(tree: &'t SyntaxTree) -> SourceFile<'t> {
        required(SourceFile::cast(Node::root(tree)), "source file root")
    }

    pub fn package_directive(&self) -> Option<PackageDirective<'t>> {
        self.0.find_child_map(PackageDirective::cast)
    }

    pub fn import_list(&self) -> Option<ImportList<'t>> {
        self.0.find_child_map(ImportList::cast)
    }

    pub fn import_directives(&self) -> Vec<ImportDirective<'t>> {
        self.import_list()
            .map(|list| list.imports())
            .unwrap_or_default()
    }

    /// Top-level declarations, document order.
    pub fn declarations(&self) -> Vec<Decl<'t>> {
        self.0.children_map(Decl::cast)
    }
}

impl<'t> PackageDirective<'t> {
    /// The dotted package path as written, empty for a bare `package`.
    pub fn qualified_name(&self) -> String {
        self.0
            .children()
            .filter(|n| {
                matches!(
                    n.kind(),
                    SyntaxKind::ReferenceExpression | SyntaxKind::DotQualifiedExpression
                )
            })
            .map(|n| n.text())
            .collect()
    }
}

impl<'t> ImportList<'t> {
    pub fn imports(&self) -> Vec<ImportDirective<'t>> {
        self.0.children_map(ImportDirective::cast)
    }
}

impl<'t> ImportDirective<'t> {
    /// The imported reference: a simple name or a dot-qualified chain.
    pub fn imported_reference(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    /// `import a.b.*`
    pub fn is_all_under(&self) -> bool {
        self.0.find_child_by_kind(SyntaxKind::Mul).is_some()
    }

    pub fn alias(&self) -> Option<ImportAlias<'t>> {
        self.0.find_child_map(ImportAlias::cast)
    }

    pub fn alias_name(&self) -> Option<&'t str> {
        self.alias().and_then(|a| a.name())
    }
}

impl<'t> ImportAlias<'t> {
    pub fn name(&self) -> Option<&'t str> {
        self.0
            .find_child_by_kind(SyntaxKind::Identifier)
            .map(|n| n.text())
    }
}

impl<'t> ClassBody<'t> {
    pub fn declarations(&self) -> Vec<Decl<'t>> {
        self.0.children_map(Decl::cast)
    }

    pub fn enum_entries(&self) -> Vec<EnumEntry<'t>> {
        self.0.children_map(EnumEntry::cast)
    }
}

impl<'t> ModifierList<'t> {
    pub fn has_modifier(&self, keyword: SyntaxKind) -> bool {
        debug_assert!(keyword.is_modifier_keyword() || keyword == SyntaxKind::CompanionKeyword);
        self.0.find_child_by_kind(keyword).is_some()
    }

    /// Modifier keyword tokens present, document order.
    pub fn modifier_keywords(&self) -> Vec<SyntaxKind> {
        self.0
            .children()
            .map(|n| n.kind())
            .filter(|k| k.is_modifier_keyword() || *k == SyntaxKind::CompanionKeyword)
            .collect()
    }

    pub fn annotation_entries(&self) -> Vec<AnnotationEntry<'t>> {
        self.0.children_map(AnnotationEntry::cast)
    }
}

impl<'t> AnnotationEntry<'t> {
    /// The annotation's type, `Name` in `@Name(args)`.
    pub fn user_type(&self) -> Option<UserType<'t>> {
        self.0.find_child_map(UserType::cast)
    }

    pub fn short_name(&self) -> Option<&'t str> {
        self.user_type().and_then(|t| t.referenced_name())
    }

    pub fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.0.find_child_map(ValueArgumentList::cast)
    }
}

impl<'t> ValueArgumentList<'t> {
    pub fn arguments(&self) -> Vec<ValueArgument<'t>> {
        self.0.children_map(ValueArgument::cast)
    }
}

impl<'t> ValueArgument<'t> {
    pub fn is_named(&self) -> bool {
        self.0.find_child_by_kind(SyntaxKind::Eq).is_some()
    }

    /// The argument name, `x` in `x = value`.
    pub fn argument_name(&self) -> Option<RefExpr<'t>> {
        let eq = self.0.find_child_by_kind(SyntaxKind::Eq)?;
        let name = self.0.find_child_map(RefExpr::cast)?;
        (name.range().start < eq.range().start).then_some(name)
    }

    pub fn argument_expression(&self) -> Option<Expr<'t>> {
        match self.0.find_child_by_kind(SyntaxKind::Eq) {
            Some(eq) => self.0.find_after(eq, Expr::cast),
            None => self.0.find_child_map(Expr::cast),
        }
    }
}

impl<'t> TypeParameterList<'t> {
    pub fn parameters(&self) -> Vec<crate::decl::TypeParameter<'t>> {
        self.0.children_map(crate::decl::TypeParameter::cast)
    }
}

impl<'t> TypeProjection<'t> {
    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }

    /// `*` in `List<*>`.
    pub fn is_star(&self) -> bool {
        self.0.find_child_by_kind(SyntaxKind::Mul).is_some()
    }
}

impl<'t> SuperTypeList<'t> {
    pub fn entries(&self) -> Vec<SuperTypeListEntry<'t>> {
        self.0.children_map(SuperTypeListEntry::cast)
    }
}

/// Either form of a supertype list entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuperTypeListEntry<'t> {
    Entry(SuperTypeEntry<'t>),
    CallEntry(SuperTypeCallEntry<'t>),
}

impl<'t> SuperTypeListEntry<'t> {
    pub fn cast(node: Node<'t>) -> Option<SuperTypeListEntry<'t>> {
        match node.kind() {
            SyntaxKind::SuperTypeEntry => Some(SuperTypeListEntry::Entry(SuperTypeEntry(node))),
            SyntaxKind::SuperTypeCallEntry => {
                Some(SuperTypeListEntry::CallEntry(SuperTypeCallEntry(node)))
            }
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            SuperTypeListEntry::Entry(it) => it.node(),
            SuperTypeListEntry::CallEntry(it) => it.node(),
        }
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        match self {
            SuperTypeListEntry::Entry(it) => it.type_reference(),
            SuperTypeListEntry::CallEntry(it) => it.type_reference(),
        }
    }
}

impl<'t> SuperTypeEntry<'t> {
    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }
}

impl<'t> SuperTypeCallEntry<'t> {
    pub fn constructor_callee(&self) -> Option<ConstructorCallee<'t>> {
        self.0.find_child_map(ConstructorCallee::cast)
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.constructor_callee()
            .and_then(|callee| callee.type_reference())
    }

    pub fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.0.find_child_map(ValueArgumentList::cast)
    }
}

impl<'t> ConstructorCallee<'t> {
    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }
}

impl<'t> WhenEntry<'t> {
    pub fn is_else(&self) -> bool {
        self.0.find_child_by_kind(SyntaxKind::ElseKeyword).is_some()
    }

    pub fn conditions(&self) -> Vec<WhenCondition<'t>> {
        self.0.children_map(WhenCondition::cast)
    }

    /// The entry body after the arrow.
    pub fn expression(&self) -> Option<Expr<'t>> {
        let arrow = self.0.find_child_by_kind(SyntaxKind::Arrow)?;
        self.0.find_after(arrow, Expr::cast)
    }
}

node_wrapper!(
    /// A plain expression condition of a when entry.
    WhenConditionWithExpression,
    SyntaxKind::WhenConditionWithExpression
);
node_wrapper!(
    /// `in range` / `!in range`.
    WhenConditionInRange,
    SyntaxKind::WhenConditionInRange
);
node_wrapper!(
    /// `is T` / `!is T`.
    WhenConditionIsPattern,
    SyntaxKind::WhenConditionIsPattern
);

/// The when-condition family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WhenCondition<'t> {
    WithExpression(WhenConditionWithExpression<'t>),
    InRange(WhenConditionInRange<'t>),
    IsPattern(WhenConditionIsPattern<'t>),
}

impl<'t> WhenCondition<'t> {
    pub fn cast(node: Node<'t>) -> Option<WhenCondition<'t>> {
        match node.kind() {
            SyntaxKind::WhenConditionWithExpression => {
                Some(WhenCondition::WithExpression(WhenConditionWithExpression(node)))
            }
            SyntaxKind::WhenConditionInRange => {
                Some(WhenCondition::InRange(WhenConditionInRange(node)))
            }
            SyntaxKind::WhenConditionIsPattern => {
                Some(WhenCondition::IsPattern(WhenConditionIsPattern(node)))
            }
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            WhenCondition::WithExpression(it) => it.node(),
            WhenCondition::InRange(it) => it.node(),
            WhenCondition::IsPattern(it) => it.node(),
        }
    }
}

impl<'t> WhenConditionWithExpression<'t> {
    pub fn expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> WhenConditionInRange<'t> {
    pub fn operation(&self) -> Option<OperationRef<'t>> {
        self.0.find_child_map(OperationRef::cast)
    }

    pub fn is_negated(&self) -> bool {
        self.operation()
            .and_then(|op| op.operation_token())
            == Some(SyntaxKind::NotIn)
    }

    pub fn range_expression(&self) -> Option<Expr<'t>> {
        let op = self.operation()?;
        self.0.find_after(op.node(), Expr::cast)
    }
}

impl<'t> WhenConditionIsPattern<'t> {
    pub fn is_negated(&self) -> bool {
        self.0.find_child_by_kind(SyntaxKind::NotIs).is_some()
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }
}

impl<'t> CatchClause<'t> {
    pub fn catch_parameter(&self) -> Option<Parameter<'t>> {
        self.0.find_child_map(Parameter::cast)
    }

    pub fn catch_body(&self) -> Option<BlockExpr<'t>> {
        self.0.find_child_map(BlockExpr::cast)
    }
}

impl<'t> FinallySection<'t> {
    pub fn final_expression(&self) -> Option<BlockExpr<'t>> {
        self.0.find_child_map(BlockExpr::cast)
    }
}

impl<'t> Label<'t> {
    /// The label name without the `@` sign.
    pub fn name(&self) -> Option<&'t str> {
        self.0
            .find_child_by_kind(SyntaxKind::Identifier)
            .map(|n| n.text())
    }
}

// =============================================================================
// String template entries
// =============================================================================

node_wrapper!(
    /// A run of literal characters inside a template.
    LiteralTemplateEntry,
    SyntaxKind::LiteralStringTemplateEntry
);
node_wrapper!(
    /// `\n` and friends.
    EscapeTemplateEntry,
    SyntaxKind::EscapeStringTemplateEntry
);
node_wrapper!(
    /// `$name`.
    ShortTemplateEntry,
    SyntaxKind::ShortStringTemplateEntry
);
node_wrapper!(
    /// `${expr}`.
    LongTemplateEntry,
    SyntaxKind::LongStringTemplateEntry
);

/// The template-entry family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateEntry<'t> {
    Literal(LiteralTemplateEntry<'t>),
    Escape(EscapeTemplateEntry<'t>),
    Short(ShortTemplateEntry<'t>),
    Long(LongTemplateEntry<'t>),
}

impl<'t> TemplateEntry<'t> {
    pub fn cast(node: Node<'t>) -> Option<TemplateEntry<'t>> {
        match node.kind() {
            SyntaxKind::LiteralStringTemplateEntry => {
                Some(TemplateEntry::Literal(LiteralTemplateEntry(node)))
            }
            SyntaxKind::EscapeStringTemplateEntry => {
                Some(TemplateEntry::Escape(EscapeTemplateEntry(node)))
            }
            SyntaxKind::ShortStringTemplateEntry => {
                Some(TemplateEntry::Short(ShortTemplateEntry(node)))
            }
            SyntaxKind::LongStringTemplateEntry => {
                Some(TemplateEntry::Long(LongTemplateEntry(node)))
            }
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            TemplateEntry::Literal(it) => it.node(),
            TemplateEntry::Escape(it) => it.node(),
            TemplateEntry::Short(it) => it.node(),
            TemplateEntry::Long(it) => it.node(),
        }
    }

    /// The interpolated expression of a `$name` or `${expr}` entry.
    pub fn expression(&self) -> Option<Expr<'t>> {
        match self {
            TemplateEntry::Short(it) => it.expression(),
            TemplateEntry::Long(it) => it.expression(),
            _ => None,
        }
    }
}

impl<'t> ShortTemplateEntry<'t> {
    pub fn expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> LongTemplateEntry<'t> {
    pub fn expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

// =============================================================================
// Pattern family and conversions
// =============================================================================

/// Pattern positions: when-entry conditions and destructuring entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern<'t> {
    Condition(WhenCondition<'t>),
    DestructuringEntry(crate::decl::DestructuringEntry<'t>),
}

impl<'t> Pattern<'t> {
    pub fn cast(node: Node<'t>) -> Option<Pattern<'t>> {
        if let Some(condition) = WhenCondition::cast(node) {
            return Some(Pattern::Condition(condition));
        }
        crate::decl::DestructuringEntry::cast(node).map(Pattern::DestructuringEntry)
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            Pattern::Condition(it) => it.node(),
            Pattern::DestructuringEntry(it) => it.node(),
        }
    }
}

impl<'t> From<WhenConditionWithExpression<'t>> for WhenCondition<'t> {
    fn from(it: WhenConditionWithExpression<'t>) -> WhenCondition<'t> {
        WhenCondition::WithExpression(it)
    }
}

impl<'t> From<WhenConditionInRange<'t>> for WhenCondition<'t> {
    fn from(it: WhenConditionInRange<'t>) -> WhenCondition<'t> {
        WhenCondition::InRange(it)
    }
}

impl<'t> From<WhenConditionIsPattern<'t>> for WhenCondition<'t> {
    fn from(it: WhenConditionIsPattern<'t>) -> WhenCondition<'t> {
        WhenCondition::IsPattern(it)
    }
}

impl<'t> From<WhenCondition<'t>> for Node<'t> {
    fn from(it: WhenCondition<'t>) -> Node<'t> {
        it.node()
    }
}

impl<'t> From<LiteralTemplateEntry<'t>> for TemplateEntry<'t> {
    fn from(it: LiteralTemplateEntry<'t>) -> TemplateEntry<'t> {
        TemplateEntry::Literal(it)
    }
}

impl<'t> From<EscapeTemplateEntry<'t>> for TemplateEntry<'t> {
    fn from(it: EscapeTemplateEntry<'t>) -> TemplateEntry<'t> {
        TemplateEntry::Escape(it)
    }
}

impl<'t> From<ShortTemplateEntry<'t>> for TemplateEntry<'t> {
    fn from(it: ShortTemplateEntry<'t>) -> TemplateEntry<'t> {
        TemplateEntry::Short(it)
    }
}

impl<'t> From<LongTemplateEntry<'t>> for TemplateEntry<'t> {
    fn from(it: LongTemplateEntry<'t>) -> TemplateEntry<'t> {
        TemplateEntry::Long(it)
    }
}

impl<'t> From<TemplateEntry<'t>> for Node<'t> {
    fn from(it: TemplateEntry<'t>) -> Node<'t> {
        it.node()
    }
}
