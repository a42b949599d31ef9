//! The parenthesization-preserving replace edit.
//!
//! The tree is immutable; replacing an expression produces new source text
//! for the host to reparse. The one piece of intelligence is deciding
//! whether the replacement must be wrapped in parentheses to keep the
//! parent's parse shape.

use lyra_tree::SyntaxKind;

use crate::expr::Expr;
use crate::precedence::expression_priority;

/// Whether `replacement` needs parentheses in the slot `target` occupies.
///
/// The rule compares the replacement's priority with the priority of the
/// target's parent: a weaker-binding replacement inside a tighter parent is
/// wrapped. At equal priority the right operand of a binary parent is
/// wrapped (operators associate left), except in `&&`/`||` chains where
/// associativity cannot change the result shape; nested same-sign prefix
/// expressions (`-(-x)`, `+(+x)`) are wrapped to avoid `--x`/`++x`.
pub fn needs_parentheses(replacement: &Expr<'_>, target: &Expr<'_>) -> bool {
    if matches!(replacement, Expr::Paren(_)) {
        return false;
    }
    let Some(parent) = target.node().parent() else {
        return false;
    };
    if parent.kind() == SyntaxKind::ParenthesizedExpression {
        return false;
    }
    let Some(parent_expr) = Expr::cast(parent) else {
        return false;
    };
    let inner = expression_priority(replacement);
    let outer = expression_priority(&parent_expr);
    if inner == outer {
        if let Expr::Binary(parent_binary) = parent_expr {
            if let Expr::Binary(inner_binary) = replacement {
                if matches!(
                    inner_binary.operation_token(),
                    Some(SyntaxKind::AndAnd | SyntaxKind::OrOr)
                ) {
                    return false;
                }
            }
            return parent_binary
                .right()
                .is_some_and(|right| right.node() == target.node());
        }
        if let (Expr::Prefix(parent_prefix), Expr::Prefix(inner_prefix)) =
            (&parent_expr, replacement)
        {
            let parent_op = parent_prefix.operation().operation_token();
            return parent_op == inner_prefix.operation().operation_token()
                && matches!(
                    parent_op,
                    Some(
                        SyntaxKind::Plus
                            | SyntaxKind::Minus
                            | SyntaxKind::PlusPlus
                            | SyntaxKind::MinusMinus
                    )
                );
        }
        return false;
    }
    inner > outer
}

/// Source text of `target`'s tree with `replacement`'s text spliced over
/// `target`'s range, parenthesized when [`needs_parentheses`] says so.
/// The caller hands the result to the host for reparsing.
pub fn replace_expression(target: &Expr<'_>, replacement: &Expr<'_>) -> String {
    let node = target.node();
    let source = node.tree().text();
    let range = node.range();
    let spliced = replacement.text();

    let mut out = String::with_capacity(source.len() + spliced.len() + 2);
    out.push_str(&source[..range.start as usize]);
    if needs_parentheses(replacement, target) {
        out.push('(');
        out.push_str(spliced);
        out.push(')');
    } else {
        out.push_str(spliced);
    }
    out.push_str(&source[range.end as usize..]);
    out
}
