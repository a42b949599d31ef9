//! Expression wrappers and the `Expr` family.
//!
//! Accessors follow one rule: anything the grammar guarantees is `required`
//! (panics on contract violation), anything that may be missing after error
//! recovery returns `Option`.

use lyra_tree::SyntaxKind;

use crate::clauses::{
    CatchClause, FinallySection, Label, TemplateEntry, ValueArgument, ValueArgumentList, WhenEntry,
};
use crate::decl::{Decl, DestructuringDecl, ObjectDecl, Parameter, ParameterList};
use crate::node::{node_wrapper, required, Node};
use crate::ty::TypeReference;

node_wrapper!(
    /// `a + b`, `x = y`, `a in b` - two operands around an operation
    /// reference.
    BinaryExpr,
    SyntaxKind::BinaryExpression
);
node_wrapper!(
    /// `x as T` / `x as? T`.
    BinaryWithTypeExpr,
    SyntaxKind::BinaryWithType
);
node_wrapper!(
    /// `x is T` / `x !is T`.
    IsExpr,
    SyntaxKind::IsExpression
);
node_wrapper!(PrefixExpr, SyntaxKind::PrefixExpression);
node_wrapper!(PostfixExpr, SyntaxKind::PostfixExpression);
node_wrapper!(ParenExpr, SyntaxKind::ParenthesizedExpression);
node_wrapper!(LabeledExpr, SyntaxKind::LabeledExpression);
node_wrapper!(AnnotatedExpr, SyntaxKind::AnnotatedExpression);
node_wrapper!(
    /// A simple name usage.
    RefExpr,
    SyntaxKind::ReferenceExpression
);
node_wrapper!(
    /// The operation sign of an operation expression, e.g. the `+` of
    /// `a + b`. A reference expression in its own right.
    OperationRef,
    SyntaxKind::OperationReference
);
node_wrapper!(CallExpr, SyntaxKind::CallExpression);
node_wrapper!(ArrayAccessExpr, SyntaxKind::ArrayAccessExpression);
node_wrapper!(DotQualifiedExpr, SyntaxKind::DotQualifiedExpression);
node_wrapper!(SafeAccessExpr, SyntaxKind::SafeAccessExpression);
node_wrapper!(
    /// `receiver::name`.
    CallableRefExpr,
    SyntaxKind::CallableReferenceExpression
);
node_wrapper!(
    /// `T::class`.
    ClassLiteralExpr,
    SyntaxKind::ClassLiteralExpression
);
node_wrapper!(ObjectLiteralExpr, SyntaxKind::ObjectLiteralExpression);
node_wrapper!(CollectionLiteralExpr, SyntaxKind::CollectionLiteralExpression);
node_wrapper!(LambdaExpr, SyntaxKind::LambdaExpression);
node_wrapper!(
    /// The `{ params -> body }` inside a lambda expression.
    FunctionLiteral,
    SyntaxKind::FunctionLiteral
);
node_wrapper!(ThisExpr, SyntaxKind::ThisExpression);
node_wrapper!(SuperExpr, SyntaxKind::SuperExpression);
node_wrapper!(ReturnExpr, SyntaxKind::ReturnExpression);
node_wrapper!(ThrowExpr, SyntaxKind::ThrowExpression);
node_wrapper!(BreakExpr, SyntaxKind::BreakExpression);
node_wrapper!(ContinueExpr, SyntaxKind::ContinueExpression);
node_wrapper!(
    /// Literal constants: integer, float, boolean, character, `null`.
    ConstantExpr,
    SyntaxKind::IntegerConstant
        | SyntaxKind::FloatConstant
        | SyntaxKind::BooleanConstant
        | SyntaxKind::CharacterConstant
        | SyntaxKind::NullConstant
);
node_wrapper!(StringTemplateExpr, SyntaxKind::StringTemplate);
node_wrapper!(BlockExpr, SyntaxKind::Block);
node_wrapper!(IfExpr, SyntaxKind::IfExpression);
node_wrapper!(WhenExpr, SyntaxKind::WhenExpression);
node_wrapper!(ForExpr, SyntaxKind::ForExpression);
node_wrapper!(WhileExpr, SyntaxKind::WhileExpression);
node_wrapper!(DoWhileExpr, SyntaxKind::DoWhileExpression);
node_wrapper!(TryExpr, SyntaxKind::TryExpression);

/// The Expression family.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expr<'t> {
    Binary(BinaryExpr<'t>),
    BinaryWithType(BinaryWithTypeExpr<'t>),
    Is(IsExpr<'t>),
    Prefix(PrefixExpr<'t>),
    Postfix(PostfixExpr<'t>),
    Paren(ParenExpr<'t>),
    Labeled(LabeledExpr<'t>),
    Annotated(AnnotatedExpr<'t>),
    Ref(RefExpr<'t>),
    OperationRef(OperationRef<'t>),
    Call(CallExpr<'t>),
    ArrayAccess(ArrayAccessExpr<'t>),
    DotQualified(DotQualifiedExpr<'t>),
    SafeAccess(SafeAccessExpr<'t>),
    CallableRef(CallableRefExpr<'t>),
    ClassLiteral(ClassLiteralExpr<'t>),
    ObjectLiteral(ObjectLiteralExpr<'t>),
    CollectionLiteral(CollectionLiteralExpr<'t>),
    Lambda(LambdaExpr<'t>),
    FunctionLiteral(FunctionLiteral<'t>),
    This(ThisExpr<'t>),
    Super(SuperExpr<'t>),
    Return(ReturnExpr<'t>),
    Throw(ThrowExpr<'t>),
    Break(BreakExpr<'t>),
    Continue(ContinueExpr<'t>),
    Constant(ConstantExpr<'t>),
    StringTemplate(StringTemplateExpr<'t>),
    Block(BlockExpr<'t>),
    If(IfExpr<'t>),
    When(WhenExpr<'t>),
    For(ForExpr<'t>),
    While(WhileExpr<'t>),
    DoWhile(DoWhileExpr<'t>),
    Try(TryExpr<'t>),
}

impl<'t> Expr<'t> {
    pub fn cast(node: Node<'t>) -> Option<Expr<'t>> {
        let expr = match node.kind() {
            SyntaxKind::BinaryExpression => Expr::Binary(BinaryExpr(node)),
            SyntaxKind::BinaryWithType => Expr::BinaryWithType(BinaryWithTypeExpr(node)),
            SyntaxKind::IsExpression => Expr::Is(IsExpr(node)),
            SyntaxKind::PrefixExpression => Expr::Prefix(PrefixExpr(node)),
            SyntaxKind::PostfixExpression => Expr::Postfix(PostfixExpr(node)),
            SyntaxKind::ParenthesizedExpression => Expr::Paren(ParenExpr(node)),
            SyntaxKind::LabeledExpression => Expr::Labeled(LabeledExpr(node)),
            SyntaxKind::AnnotatedExpression => Expr::Annotated(AnnotatedExpr(node)),
            SyntaxKind::ReferenceExpression => Expr::Ref(RefExpr(node)),
            SyntaxKind::OperationReference => Expr::OperationRef(OperationRef(node)),
            SyntaxKind::CallExpression => Expr::Call(CallExpr(node)),
            SyntaxKind::ArrayAccessExpression => Expr::ArrayAccess(ArrayAccessExpr(node)),
            SyntaxKind::DotQualifiedExpression => Expr::DotQualified(DotQualifiedExpr(node)),
            SyntaxKind::SafeAccessExpression => Expr::SafeAccess(SafeAccessExpr(node)),
            SyntaxKind::CallableReferenceExpression => Expr::CallableRef(CallableRefExpr(node)),
            SyntaxKind::ClassLiteralExpression => Expr::ClassLiteral(ClassLiteralExpr(node)),
            SyntaxKind::ObjectLiteralExpression => Expr::ObjectLiteral(ObjectLiteralExpr(node)),
            SyntaxKind::CollectionLiteralExpression => {
                Expr::CollectionLiteral(CollectionLiteralExpr(node))
            }
            SyntaxKind::LambdaExpression => Expr::Lambda(LambdaExpr(node)),
            SyntaxKind::FunctionLiteral => Expr::FunctionLiteral(FunctionLiteral(node)),
            SyntaxKind::ThisExpression => Expr::This(ThisExpr(node)),
            SyntaxKind::SuperExpression => Expr::Super(SuperExpr(node)),
            SyntaxKind::ReturnExpression => Expr::Return(ReturnExpr(node)),
            SyntaxKind::ThrowExpression => Expr::Throw(ThrowExpr(node)),
            SyntaxKind::BreakExpression => Expr::Break(BreakExpr(node)),
            SyntaxKind::ContinueExpression => Expr::Continue(ContinueExpr(node)),
            SyntaxKind::IntegerConstant
            | SyntaxKind::FloatConstant
            | SyntaxKind::BooleanConstant
            | SyntaxKind::CharacterConstant
            | SyntaxKind::NullConstant => Expr::Constant(ConstantExpr(node)),
            SyntaxKind::StringTemplate => Expr::StringTemplate(StringTemplateExpr(node)),
            SyntaxKind::Block => Expr::Block(BlockExpr(node)),
            SyntaxKind::IfExpression => Expr::If(IfExpr(node)),
            SyntaxKind::WhenExpression => Expr::When(WhenExpr(node)),
            SyntaxKind::ForExpression => Expr::For(ForExpr(node)),
            SyntaxKind::WhileExpression => Expr::While(WhileExpr(node)),
            SyntaxKind::DoWhileExpression => Expr::DoWhile(DoWhileExpr(node)),
            SyntaxKind::TryExpression => Expr::Try(TryExpr(node)),
            _ => return None,
        };
        Some(expr)
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            Expr::Binary(it) => it.node(),
            Expr::BinaryWithType(it) => it.node(),
            Expr::Is(it) => it.node(),
            Expr::Prefix(it) => it.node(),
            Expr::Postfix(it) => it.node(),
            Expr::Paren(it) => it.node(),
            Expr::Labeled(it) => it.node(),
            Expr::Annotated(it) => it.node(),
            Expr::Ref(it) => it.node(),
            Expr::OperationRef(it) => it.node(),
            Expr::Call(it) => it.node(),
            Expr::ArrayAccess(it) => it.node(),
            Expr::DotQualified(it) => it.node(),
            Expr::SafeAccess(it) => it.node(),
            Expr::CallableRef(it) => it.node(),
            Expr::ClassLiteral(it) => it.node(),
            Expr::ObjectLiteral(it) => it.node(),
            Expr::CollectionLiteral(it) => it.node(),
            Expr::Lambda(it) => it.node(),
            Expr::FunctionLiteral(it) => it.node(),
            Expr::This(it) => it.node(),
            Expr::Super(it) => it.node(),
            Expr::Return(it) => it.node(),
            Expr::Throw(it) => it.node(),
            Expr::Break(it) => it.node(),
            Expr::Continue(it) => it.node(),
            Expr::Constant(it) => it.node(),
            Expr::StringTemplate(it) => it.node(),
            Expr::Block(it) => it.node(),
            Expr::If(it) => it.node(),
            Expr::When(it) => it.node(),
            Expr::For(it) => it.node(),
            Expr::While(it) => it.node(),
            Expr::DoWhile(it) => it.node(),
            Expr::Try(it) => it.node(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.node().kind()
    }

    #[inline]
    pub fn text(&self) -> &'t str {
        self.node().text()
    }

    /// The expression's parent, if it is itself an expression.
    pub fn parent_expression(&self) -> Option<Expr<'t>> {
        self.node().parent().and_then(Expr::cast)
    }
}

/// A statement position holds either an expression or a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Statement<'t> {
    Declaration(Decl<'t>),
    Expression(Expr<'t>),
}

impl<'t> Statement<'t> {
    pub fn cast(node: Node<'t>) -> Option<Statement<'t>> {
        if let Some(decl) = Decl::cast(node) {
            return Some(Statement::Declaration(decl));
        }
        Expr::cast(node).map(Statement::Expression)
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            Statement::Declaration(d) => d.node(),
            Statement::Expression(e) => e.node(),
        }
    }
}

// =============================================================================
// Grammar sub-families used by the visitor fallback chain
// =============================================================================

/// Prefix and postfix expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryExpr<'t> {
    Prefix(PrefixExpr<'t>),
    Postfix(PostfixExpr<'t>),
}

impl<'t> UnaryExpr<'t> {
    pub fn cast(node: Node<'t>) -> Option<UnaryExpr<'t>> {
        match node.kind() {
            SyntaxKind::PrefixExpression => Some(UnaryExpr::Prefix(PrefixExpr(node))),
            SyntaxKind::PostfixExpression => Some(UnaryExpr::Postfix(PostfixExpr(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            UnaryExpr::Prefix(it) => it.node(),
            UnaryExpr::Postfix(it) => it.node(),
        }
    }

    pub fn operation(&self) -> OperationRef<'t> {
        match self {
            UnaryExpr::Prefix(it) => it.operation(),
            UnaryExpr::Postfix(it) => it.operation(),
        }
    }

    pub fn base_expression(&self) -> Option<Expr<'t>> {
        match self {
            UnaryExpr::Prefix(it) => it.base_expression(),
            UnaryExpr::Postfix(it) => it.base_expression(),
        }
    }
}

/// `a.b` and `a?.b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QualifiedExpr<'t> {
    Dot(DotQualifiedExpr<'t>),
    Safe(SafeAccessExpr<'t>),
}

impl<'t> QualifiedExpr<'t> {
    pub fn cast(node: Node<'t>) -> Option<QualifiedExpr<'t>> {
        match node.kind() {
            SyntaxKind::DotQualifiedExpression => Some(QualifiedExpr::Dot(DotQualifiedExpr(node))),
            SyntaxKind::SafeAccessExpression => Some(QualifiedExpr::Safe(SafeAccessExpr(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            QualifiedExpr::Dot(it) => it.node(),
            QualifiedExpr::Safe(it) => it.node(),
        }
    }

    /// The operation sign: `Dot` or `SafeAccess`.
    pub fn operation_kind(&self) -> SyntaxKind {
        match self {
            QualifiedExpr::Dot(_) => SyntaxKind::Dot,
            QualifiedExpr::Safe(_) => SyntaxKind::SafeAccess,
        }
    }

    pub fn receiver(&self) -> Expr<'t> {
        required(
            self.node().find_child_map(Expr::cast),
            "receiver of qualified expression",
        )
    }

    /// The selector after the dot; absent under error recovery.
    pub fn selector(&self) -> Option<Expr<'t>> {
        let node = self.node();
        let op = node.find_child_by_kind(match self {
            QualifiedExpr::Dot(_) => SyntaxKind::Dot,
            QualifiedExpr::Safe(_) => SyntaxKind::SafeAccess,
        })?;
        node.find_after(op, Expr::cast)
    }
}

/// `for`, `while`, `do-while`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopExpr<'t> {
    For(ForExpr<'t>),
    While(WhileExpr<'t>),
    DoWhile(DoWhileExpr<'t>),
}

impl<'t> LoopExpr<'t> {
    pub fn cast(node: Node<'t>) -> Option<LoopExpr<'t>> {
        match node.kind() {
            SyntaxKind::ForExpression => Some(LoopExpr::For(ForExpr(node))),
            SyntaxKind::WhileExpression => Some(LoopExpr::While(WhileExpr(node))),
            SyntaxKind::DoWhileExpression => Some(LoopExpr::DoWhile(DoWhileExpr(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            LoopExpr::For(it) => it.node(),
            LoopExpr::While(it) => it.node(),
            LoopExpr::DoWhile(it) => it.node(),
        }
    }

    pub fn body(&self) -> Option<Expr<'t>> {
        match self {
            LoopExpr::For(it) => it.body(),
            LoopExpr::While(it) => it.body(),
            LoopExpr::DoWhile(it) => it.body(),
        }
    }
}

/// Expressions that may carry a label: `return@f`, `break@loop`,
/// `this@outer`, and the labeled expression itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExprWithLabel<'t> {
    Return(ReturnExpr<'t>),
    Break(BreakExpr<'t>),
    Continue(ContinueExpr<'t>),
    This(ThisExpr<'t>),
    Super(SuperExpr<'t>),
    Labeled(LabeledExpr<'t>),
}

impl<'t> ExprWithLabel<'t> {
    pub fn cast(node: Node<'t>) -> Option<ExprWithLabel<'t>> {
        match node.kind() {
            SyntaxKind::ReturnExpression => Some(ExprWithLabel::Return(ReturnExpr(node))),
            SyntaxKind::BreakExpression => Some(ExprWithLabel::Break(BreakExpr(node))),
            SyntaxKind::ContinueExpression => Some(ExprWithLabel::Continue(ContinueExpr(node))),
            SyntaxKind::ThisExpression => Some(ExprWithLabel::This(ThisExpr(node))),
            SyntaxKind::SuperExpression => Some(ExprWithLabel::Super(SuperExpr(node))),
            SyntaxKind::LabeledExpression => Some(ExprWithLabel::Labeled(LabeledExpr(node))),
            _ => None,
        }
    }

    pub fn node(&self) -> Node<'t> {
        match self {
            ExprWithLabel::Return(it) => it.node(),
            ExprWithLabel::Break(it) => it.node(),
            ExprWithLabel::Continue(it) => it.node(),
            ExprWithLabel::This(it) => it.node(),
            ExprWithLabel::Super(it) => it.node(),
            ExprWithLabel::Labeled(it) => it.node(),
        }
    }

    pub fn target_label(&self) -> Option<Label<'t>> {
        self.node().find_child_map(Label::cast)
    }

    pub fn label_name(&self) -> Option<&'t str> {
        self.target_label().and_then(|l| l.name())
    }
}

// =============================================================================
// Per-kind accessors
// =============================================================================

impl<'t> OperationRef<'t> {
    /// Kind of the operation sign token, `Identifier` for named infix calls.
    pub fn operation_token(&self) -> Option<SyntaxKind> {
        self.0
            .children()
            .map(|n| n.kind())
            .find(|k| !k.is_trivia())
    }

    pub fn referenced_name(&self) -> &'t str {
        self.text()
    }
}

impl<'t> RefExpr<'t> {
    pub fn referenced_name(&self) -> &'t str {
        self.text()
    }
}

impl<'t> BinaryExpr<'t> {
    /// Left operand. The parser always materializes one, even when it has to
    /// insert an error node.
    pub fn left(&self) -> Expr<'t> {
        required(self.0.find_child_map(Expr::cast), "left operand of binary expression")
    }

    pub fn operation(&self) -> OperationRef<'t> {
        required(
            self.0.find_child_map(OperationRef::cast),
            "operation reference of binary expression",
        )
    }

    pub fn operation_token(&self) -> Option<SyntaxKind> {
        self.operation().operation_token()
    }

    /// Right operand: the first expression after the operation sign. Absent
    /// if the user has not typed it yet.
    pub fn right(&self) -> Option<Expr<'t>> {
        self.0.find_after(self.operation().node(), Expr::cast)
    }
}

impl<'t> BinaryWithTypeExpr<'t> {
    pub fn left(&self) -> Expr<'t> {
        required(self.0.find_child_map(Expr::cast), "operand of cast expression")
    }

    pub fn operation(&self) -> OperationRef<'t> {
        required(
            self.0.find_child_map(OperationRef::cast),
            "operation reference of cast expression",
        )
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }

    pub fn is_safe_cast(&self) -> bool {
        self.operation().operation_token() == Some(SyntaxKind::AsSafe)
    }

    pub fn is_unsafe_cast(&self) -> bool {
        self.operation().operation_token() == Some(SyntaxKind::AsKeyword)
    }

    pub fn is_cast(&self) -> bool {
        self.is_safe_cast() || self.is_unsafe_cast()
    }
}

impl<'t> IsExpr<'t> {
    pub fn subject(&self) -> Expr<'t> {
        required(self.0.find_child_map(Expr::cast), "subject of is-expression")
    }

    pub fn operation(&self) -> OperationRef<'t> {
        required(
            self.0.find_child_map(OperationRef::cast),
            "operation reference of is-expression",
        )
    }

    pub fn type_reference(&self) -> Option<TypeReference<'t>> {
        self.0.find_child_map(TypeReference::cast)
    }

    pub fn is_negated(&self) -> bool {
        self.operation().operation_token() == Some(SyntaxKind::NotIs)
    }
}

impl<'t> PrefixExpr<'t> {
    pub fn operation(&self) -> OperationRef<'t> {
        required(
            self.0.find_child_map(OperationRef::cast),
            "operation reference of prefix expression",
        )
    }

    pub fn base_expression(&self) -> Option<Expr<'t>> {
        self.0.find_after(self.operation().node(), Expr::cast)
    }
}

impl<'t> PostfixExpr<'t> {
    pub fn operation(&self) -> OperationRef<'t> {
        required(
            self.0.find_child_map(OperationRef::cast),
            "operation reference of postfix expression",
        )
    }

    pub fn base_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> ParenExpr<'t> {
    /// The wrapped expression; `None` for `()` left by error recovery.
    pub fn inner_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> LabeledExpr<'t> {
    pub fn label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }

    pub fn label_name(&self) -> Option<&'t str> {
        self.label().and_then(|l| l.name())
    }

    pub fn base_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> AnnotatedExpr<'t> {
    pub fn base_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> CallExpr<'t> {
    pub fn callee(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn value_argument_list(&self) -> Option<ValueArgumentList<'t>> {
        self.0.find_child_map(ValueArgumentList::cast)
    }

    pub fn value_arguments(&self) -> Vec<ValueArgument<'t>> {
        self.value_argument_list()
            .map(|list| list.arguments())
            .unwrap_or_default()
    }

    /// A trailing lambda argument after the argument list, if any.
    pub fn trailing_lambda(&self) -> Option<LambdaExpr<'t>> {
        self.0.find_child_map(LambdaExpr::cast)
    }

    pub fn type_argument_list(&self) -> Option<Node<'t>> {
        self.0.find_child_by_kind(SyntaxKind::TypeArgumentList)
    }
}

impl<'t> ArrayAccessExpr<'t> {
    pub fn array_expression(&self) -> Expr<'t> {
        required(self.0.find_child_map(Expr::cast), "array of array access")
    }

    /// Index expressions between the brackets, document order.
    pub fn index_expressions(&self) -> Vec<Expr<'t>> {
        let array = self.array_expression().node();
        self.0
            .children()
            .skip_while(|n| *n != array)
            .skip(1)
            .filter_map(Expr::cast)
            .collect()
    }
}

impl<'t> DotQualifiedExpr<'t> {
    pub fn receiver(&self) -> Expr<'t> {
        QualifiedExpr::Dot(*self).receiver()
    }

    pub fn selector(&self) -> Option<Expr<'t>> {
        QualifiedExpr::Dot(*self).selector()
    }
}

impl<'t> SafeAccessExpr<'t> {
    pub fn receiver(&self) -> Expr<'t> {
        QualifiedExpr::Safe(*self).receiver()
    }

    pub fn selector(&self) -> Option<Expr<'t>> {
        QualifiedExpr::Safe(*self).selector()
    }
}

impl<'t> CallableRefExpr<'t> {
    pub fn receiver_expression(&self) -> Option<Expr<'t>> {
        let colon_colon = self.0.find_child_by_kind(SyntaxKind::ColonColon)?;
        let receiver = self.0.find_child_map(Expr::cast)?;
        // Only an expression before the `::` is a receiver.
        (receiver.node().range().start < colon_colon.range().start).then_some(receiver)
    }

    pub fn callable_reference(&self) -> Option<RefExpr<'t>> {
        let colon_colon = self.0.find_child_by_kind(SyntaxKind::ColonColon)?;
        self.0.find_after(colon_colon, RefExpr::cast)
    }
}

impl<'t> ClassLiteralExpr<'t> {
    pub fn receiver_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> ObjectLiteralExpr<'t> {
    pub fn object_declaration(&self) -> ObjectDecl<'t> {
        required(
            self.0.find_child_map(ObjectDecl::cast),
            "object declaration of object literal",
        )
    }
}

impl<'t> CollectionLiteralExpr<'t> {
    pub fn inner_expressions(&self) -> Vec<Expr<'t>> {
        self.0.children_map(Expr::cast)
    }
}

impl<'t> LambdaExpr<'t> {
    pub fn function_literal(&self) -> FunctionLiteral<'t> {
        required(
            self.0.find_child_map(FunctionLiteral::cast),
            "function literal of lambda",
        )
    }

    pub fn body_expression(&self) -> Option<BlockExpr<'t>> {
        self.function_literal().body_expression()
    }

    pub fn value_parameters(&self) -> Vec<Parameter<'t>> {
        self.function_literal().value_parameters()
    }
}

impl<'t> FunctionLiteral<'t> {
    pub fn value_parameter_list(&self) -> Option<ParameterList<'t>> {
        self.0.find_child_map(ParameterList::cast)
    }

    pub fn value_parameters(&self) -> Vec<Parameter<'t>> {
        self.value_parameter_list()
            .map(|list| list.parameters())
            .unwrap_or_default()
    }

    pub fn body_expression(&self) -> Option<BlockExpr<'t>> {
        self.0.find_child_map(BlockExpr::cast)
    }
}

impl<'t> ThisExpr<'t> {
    pub fn target_label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }
}

impl<'t> SuperExpr<'t> {
    pub fn target_label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }
}

impl<'t> ReturnExpr<'t> {
    pub fn returned_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn target_label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }
}

impl<'t> ThrowExpr<'t> {
    pub fn thrown_expression(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }
}

impl<'t> BreakExpr<'t> {
    pub fn target_label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }
}

impl<'t> ContinueExpr<'t> {
    pub fn target_label(&self) -> Option<Label<'t>> {
        self.0.find_child_map(Label::cast)
    }
}

impl<'t> ConstantExpr<'t> {
    pub fn is_null(&self) -> bool {
        self.kind() == SyntaxKind::NullConstant
    }

    pub fn is_boolean(&self) -> bool {
        self.kind() == SyntaxKind::BooleanConstant
    }

    pub fn is_true(&self) -> bool {
        self.is_boolean() && self.0.find_child_by_kind(SyntaxKind::TrueKeyword).is_some()
    }

    pub fn is_false(&self) -> bool {
        self.is_boolean() && self.0.find_child_by_kind(SyntaxKind::FalseKeyword).is_some()
    }
}

impl<'t> StringTemplateExpr<'t> {
    pub fn entries(&self) -> Vec<TemplateEntry<'t>> {
        self.0.children_map(TemplateEntry::cast)
    }
}

impl<'t> BlockExpr<'t> {
    /// Statements in document order: expressions and declarations alike.
    pub fn statements(&self) -> Vec<Statement<'t>> {
        self.0.children_map(Statement::cast)
    }

    pub fn last_statement(&self) -> Option<Statement<'t>> {
        self.statements().pop()
    }
}

impl<'t> IfExpr<'t> {
    pub fn condition(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<Expr<'t>> {
        let rpar = self.0.find_child_by_kind(SyntaxKind::RPar)?;
        self.0.find_after(rpar, Expr::cast)
    }

    pub fn else_branch(&self) -> Option<Expr<'t>> {
        let else_kw = self.0.find_child_by_kind(SyntaxKind::ElseKeyword)?;
        self.0.find_after(else_kw, Expr::cast)
    }
}

impl<'t> WhenExpr<'t> {
    /// The scrutinee between the parentheses; `when { ... }` has none.
    pub fn subject(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn entries(&self) -> Vec<WhenEntry<'t>> {
        self.0.children_map(WhenEntry::cast)
    }

    /// Original behavior: a well-formed exhaustive `when` has exactly one
    /// else entry.
    pub fn has_single_else(&self) -> bool {
        self.entries().iter().filter(|e| e.is_else()).count() == 1
    }
}

impl<'t> ForExpr<'t> {
    pub fn loop_parameter(&self) -> Option<Parameter<'t>> {
        self.0.find_child_map(Parameter::cast)
    }

    pub fn destructuring_declaration(&self) -> Option<DestructuringDecl<'t>> {
        self.0.find_child_map(DestructuringDecl::cast)
    }

    /// The iterated expression after `in`.
    pub fn loop_range(&self) -> Option<Expr<'t>> {
        let in_kw = self.0.find_child_by_kind(SyntaxKind::InKeyword)?;
        self.0.find_after(in_kw, Expr::cast)
    }

    pub fn body(&self) -> Option<Expr<'t>> {
        let rpar = self.0.find_child_by_kind(SyntaxKind::RPar)?;
        self.0.find_after(rpar, Expr::cast)
    }
}

impl<'t> WhileExpr<'t> {
    pub fn condition(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Expr<'t>> {
        let rpar = self.0.find_child_by_kind(SyntaxKind::RPar)?;
        self.0.find_after(rpar, Expr::cast)
    }
}

impl<'t> DoWhileExpr<'t> {
    pub fn body(&self) -> Option<Expr<'t>> {
        self.0.find_child_map(Expr::cast)
    }

    pub fn condition(&self) -> Option<Expr<'t>> {
        let lpar = self.0.find_child_by_kind(SyntaxKind::LPar)?;
        self.0.find_after(lpar, Expr::cast)
    }
}

impl<'t> TryExpr<'t> {
    pub fn try_block(&self) -> BlockExpr<'t> {
        required(self.0.find_child_map(BlockExpr::cast), "try block")
    }

    pub fn catch_clauses(&self) -> Vec<CatchClause<'t>> {
        self.0.children_map(CatchClause::cast)
    }

    pub fn finally_block(&self) -> Option<FinallySection<'t>> {
        self.0.find_child_map(FinallySection::cast)
    }
}

// =============================================================================
// Expression predicates carried over from the original tree utilities
// =============================================================================

/// `a = b` or any augmented assignment.
pub fn is_assignment(expr: &Expr<'_>) -> bool {
    let Expr::Binary(binary) = expr else {
        return false;
    };
    matches!(
        binary.operation_token(),
        Some(
            SyntaxKind::Eq
                | SyntaxKind::PlusEq
                | SyntaxKind::MinusEq
                | SyntaxKind::MultEq
                | SyntaxKind::DivEq
                | SyntaxKind::PercEq
        )
    )
}

/// Plain `a = b` only.
pub fn is_ordinary_assignment(expr: &Expr<'_>) -> bool {
    matches!(expr, Expr::Binary(binary) if binary.operation_token() == Some(SyntaxKind::Eq))
}

/// True when the expression, after unwrapping parentheses, is the `null`
/// constant.
pub fn is_null_constant(expr: Expr<'_>) -> bool {
    matches!(
        crate::matching::deparenthesize(expr),
        Some(Expr::Constant(c)) if c.is_null()
    )
}

pub fn is_true_constant(expr: Expr<'_>) -> bool {
    matches!(expr, Expr::Constant(c) if c.is_true())
}

pub fn is_false_constant(expr: Expr<'_>) -> bool {
    matches!(expr, Expr::Constant(c) if c.is_false())
}

/// Whether `expr` is the receiver side of an enclosing dot-qualified chain.
pub fn is_lhs_of_dot(expr: &Expr<'_>) -> bool {
    let Some(parent) = expr.node().parent() else {
        return false;
    };
    let Some(QualifiedExpr::Dot(dot)) = QualifiedExpr::cast(parent) else {
        return false;
    };
    if dot.receiver().node() == expr.node() {
        return true;
    }
    is_lhs_of_dot(&Expr::DotQualified(dot))
}

/// A block's last statement expression, or the expression itself when it is
/// not a block. Used when a body position accepts either form.
pub fn expression_or_last_statement_in_block<'t>(expr: Expr<'t>) -> Option<Expr<'t>> {
    match expr {
        Expr::Block(block) => match block.last_statement()? {
            Statement::Expression(e) => Some(e),
            Statement::Declaration(_) => None,
        },
        other => Some(other),
    }
}

// =============================================================================
// Conversions used by the visitor fallback chain
// =============================================================================

macro_rules! impl_into_expr {
    ($($wrapper:ident => $variant:ident,)+) => {$(
        impl<'t> From<$wrapper<'t>> for Expr<'t> {
            fn from(it: $wrapper<'t>) -> Expr<'t> {
                Expr::$variant(it)
            }
        }
    )+};
}

impl_into_expr! {
    BinaryExpr => Binary,
    BinaryWithTypeExpr => BinaryWithType,
    IsExpr => Is,
    PrefixExpr => Prefix,
    PostfixExpr => Postfix,
    ParenExpr => Paren,
    LabeledExpr => Labeled,
    AnnotatedExpr => Annotated,
    RefExpr => Ref,
    OperationRef => OperationRef,
    CallExpr => Call,
    ArrayAccessExpr => ArrayAccess,
    DotQualifiedExpr => DotQualified,
    SafeAccessExpr => SafeAccess,
    CallableRefExpr => CallableRef,
    ClassLiteralExpr => ClassLiteral,
    ObjectLiteralExpr => ObjectLiteral,
    CollectionLiteralExpr => CollectionLiteral,
    LambdaExpr => Lambda,
    FunctionLiteral => FunctionLiteral,
    ThisExpr => This,
    SuperExpr => Super,
    ReturnExpr => Return,
    ThrowExpr => Throw,
    BreakExpr => Break,
    ContinueExpr => Continue,
    ConstantExpr => Constant,
    StringTemplateExpr => StringTemplate,
    BlockExpr => Block,
    IfExpr => If,
    WhenExpr => When,
    ForExpr => For,
    WhileExpr => While,
    DoWhileExpr => DoWhile,
    TryExpr => Try,
}

impl<'t> From<PrefixExpr<'t>> for UnaryExpr<'t> {
    fn from(it: PrefixExpr<'t>) -> UnaryExpr<'t> {
        UnaryExpr::Prefix(it)
    }
}

impl<'t> From<PostfixExpr<'t>> for UnaryExpr<'t> {
    fn from(it: PostfixExpr<'t>) -> UnaryExpr<'t> {
        UnaryExpr::Postfix(it)
    }
}

impl<'t> From<DotQualifiedExpr<'t>> for QualifiedExpr<'t> {
    fn from(it: DotQualifiedExpr<'t>) -> QualifiedExpr<'t> {
        QualifiedExpr::Dot(it)
    }
}

impl<'t> From<SafeAccessExpr<'t>> for QualifiedExpr<'t> {
    fn from(it: SafeAccessExpr<'t>) -> QualifiedExpr<'t> {
        QualifiedExpr::Safe(it)
    }
}

impl<'t> From<ForExpr<'t>> for LoopExpr<'t> {
    fn from(it: ForExpr<'t>) -> LoopExpr<'t> {
        LoopExpr::For(it)
    }
}

impl<'t> From<WhileExpr<'t>> for LoopExpr<'t> {
    fn from(it: WhileExpr<'t>) -> LoopExpr<'t> {
        LoopExpr::While(it)
    }
}

impl<'t> From<DoWhileExpr<'t>> for LoopExpr<'t> {
    fn from(it: DoWhileExpr<'t>) -> LoopExpr<'t> {
        LoopExpr::DoWhile(it)
    }
}

impl<'t> From<ReturnExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: ReturnExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::Return(it)
    }
}

impl<'t> From<BreakExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: BreakExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::Break(it)
    }
}

impl<'t> From<ContinueExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: ContinueExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::Continue(it)
    }
}

impl<'t> From<ThisExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: ThisExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::This(it)
    }
}

impl<'t> From<SuperExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: SuperExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::Super(it)
    }
}

impl<'t> From<LabeledExpr<'t>> for ExprWithLabel<'t> {
    fn from(it: LabeledExpr<'t>) -> ExprWithLabel<'t> {
        ExprWithLabel::Labeled(it)
    }
}

impl<'t> From<UnaryExpr<'t>> for Expr<'t> {
    fn from(it: UnaryExpr<'t>) -> Expr<'t> {
        match it {
            UnaryExpr::Prefix(e) => Expr::Prefix(e),
            UnaryExpr::Postfix(e) => Expr::Postfix(e),
        }
    }
}

impl<'t> From<QualifiedExpr<'t>> for Expr<'t> {
    fn from(it: QualifiedExpr<'t>) -> Expr<'t> {
        match it {
            QualifiedExpr::Dot(e) => Expr::DotQualified(e),
            QualifiedExpr::Safe(e) => Expr::SafeAccess(e),
        }
    }
}

impl<'t> From<LoopExpr<'t>> for Expr<'t> {
    fn from(it: LoopExpr<'t>) -> Expr<'t> {
        match it {
            LoopExpr::For(e) => Expr::For(e),
            LoopExpr::While(e) => Expr::While(e),
            LoopExpr::DoWhile(e) => Expr::DoWhile(e),
        }
    }
}

impl<'t> From<ExprWithLabel<'t>> for Expr<'t> {
    fn from(it: ExprWithLabel<'t>) -> Expr<'t> {
        match it {
            ExprWithLabel::Return(e) => Expr::Return(e),
            ExprWithLabel::Break(e) => Expr::Break(e),
            ExprWithLabel::Continue(e) => Expr::Continue(e),
            ExprWithLabel::This(e) => Expr::This(e),
            ExprWithLabel::Super(e) => Expr::Super(e),
            ExprWithLabel::Labeled(e) => Expr::Labeled(e),
        }
    }
}

impl<'t> From<Expr<'t>> for Node<'t> {
    fn from(it: Expr<'t>) -> Node<'t> {
        it.node()
    }
}
