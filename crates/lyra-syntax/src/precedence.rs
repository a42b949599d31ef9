//! Operator precedence and expression priority classification.
//!
//! Levels use the parser's table, inverted into "larger is weaker": the
//! strongest-binding forms (postfix) are level 0 and assignment is the
//! weakest operator level. Two sentinels sit outside the table: [`ATOMIC`]
//! for forms that never need protection (literals, names, bracketed
//! constructs), and [`STATEMENT`] for declarations and statement
//! expressions, which are weaker than any operator.

use lyra_tree::SyntaxKind;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::expr::Expr;

/// Operator levels, strongest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i8)]
pub enum Precedence {
    Postfix,
    Prefix,
    As,
    Multiplicative,
    Additive,
    Range,
    NamedInfix,
    Elvis,
    InOrIs,
    Comparison,
    Equality,
    Conjunction,
    Disjunction,
    Assignment,
}

/// Forms that bind tighter than any operator and never need parentheses.
pub const ATOMIC: i8 = -1;

/// Declarations and statement expressions: weaker than any operator. Also
/// the degradation level for unknown operators.
pub const STATEMENT: i8 = Precedence::Assignment as i8 + 1;

impl Precedence {
    #[inline]
    pub fn level(self) -> i8 {
        self as i8
    }
}

/// Operator token to level, built once on first use.
static OPERATOR_LEVELS: Lazy<FxHashMap<SyntaxKind, i8>> = Lazy::new(|| {
    let groups: &[(Precedence, &[SyntaxKind])] = &[
        (Precedence::As, &[SyntaxKind::AsKeyword, SyntaxKind::AsSafe]),
        (
            Precedence::Multiplicative,
            &[SyntaxKind::Mul, SyntaxKind::Div, SyntaxKind::Perc],
        ),
        (Precedence::Additive, &[SyntaxKind::Plus, SyntaxKind::Minus]),
        (Precedence::Range, &[SyntaxKind::Range]),
        // A plain identifier in operator position is a named infix call.
        (Precedence::NamedInfix, &[SyntaxKind::Identifier]),
        (Precedence::Elvis, &[SyntaxKind::Elvis]),
        (
            Precedence::InOrIs,
            &[
                SyntaxKind::InKeyword,
                SyntaxKind::NotIn,
                SyntaxKind::IsKeyword,
                SyntaxKind::NotIs,
            ],
        ),
        (
            Precedence::Comparison,
            &[
                SyntaxKind::Lt,
                SyntaxKind::Gt,
                SyntaxKind::LtEq,
                SyntaxKind::GtEq,
            ],
        ),
        (
            Precedence::Equality,
            &[
                SyntaxKind::EqEq,
                SyntaxKind::ExclEq,
                SyntaxKind::EqEqEq,
                SyntaxKind::ExclEqEqEq,
            ],
        ),
        (Precedence::Conjunction, &[SyntaxKind::AndAnd]),
        (Precedence::Disjunction, &[SyntaxKind::OrOr]),
        (
            Precedence::Assignment,
            &[
                SyntaxKind::Eq,
                SyntaxKind::PlusEq,
                SyntaxKind::MinusEq,
                SyntaxKind::MultEq,
                SyntaxKind::DivEq,
                SyntaxKind::PercEq,
            ],
        ),
    ];
    let mut map = FxHashMap::default();
    for (precedence, kinds) in groups {
        for kind in *kinds {
            map.insert(*kind, precedence.level());
        }
    }
    map
});

/// Level of an operator token; `None` for kinds that are not operators.
pub fn operator_level(kind: SyntaxKind) -> Option<i8> {
    OPERATOR_LEVELS.get(&kind).copied()
}

/// Classify an expression by the binding strength of its outermost form.
pub fn expression_priority(expr: &Expr<'_>) -> i8 {
    match expr {
        Expr::Postfix(_)
        | Expr::DotQualified(_)
        | Expr::SafeAccess(_)
        | Expr::Call(_)
        | Expr::ArrayAccess(_)
        | Expr::CallableRef(_)
        | Expr::ClassLiteral(_) => Precedence::Postfix.level(),
        Expr::Prefix(_) | Expr::Labeled(_) | Expr::Annotated(_) => Precedence::Prefix.level(),
        // An if in expression position protects itself like an assignment.
        Expr::If(_) => Precedence::Assignment.level(),
        Expr::Block(_) | Expr::For(_) | Expr::While(_) | Expr::DoWhile(_) => STATEMENT,
        Expr::BinaryWithType(_) => Precedence::As.level(),
        Expr::Is(_) => Precedence::InOrIs.level(),
        Expr::Binary(binary) => {
            let operation = binary.operation();
            match operation.operation_token().and_then(operator_level) {
                Some(level) => level,
                None => {
                    tracing::error!(
                        operation = operation.text(),
                        "no precedence for operation, degrading to weakest"
                    );
                    STATEMENT
                }
            }
        }
        _ => ATOMIC,
    }
}
