//! Deparenthesization and structural expression matching.

use crate::expr::Expr;
use crate::node::Node;

/// Unwrap one transparent layer: parentheses, a label, or (unless
/// `keep_annotations`) an annotated expression. Non-transparent expressions
/// come back unchanged. `None` when the wrapper is empty, e.g. `()` left by
/// error recovery.
pub fn deparenthesize_once<'t>(expr: Expr<'t>, keep_annotations: bool) -> Option<Expr<'t>> {
    match expr {
        Expr::Paren(paren) => paren.inner_expression(),
        Expr::Labeled(labeled) => labeled.base_expression(),
        Expr::Annotated(annotated) if !keep_annotations => annotated.base_expression(),
        other => Some(other),
    }
}

/// Unwrap transparent layers to a fixpoint. Idempotent.
pub fn deparenthesize<'t>(expr: Expr<'t>) -> Option<Expr<'t>> {
    let mut current = expr;
    loop {
        let next = deparenthesize_once(current, false)?;
        if next.node() == current.node() {
            return Some(next);
        }
        current = next;
    }
}

/// Like [`deparenthesize`], but an empty wrapper yields the input instead
/// of `None`.
pub fn safe_deparenthesize<'t>(expr: Expr<'t>) -> Expr<'t> {
    deparenthesize(expr).unwrap_or(expr)
}

/// Structural equality of two expressions, transparent to parentheses,
/// labels, annotations, and whitespace.
pub fn expressions_match(a: Expr<'_>, b: Expr<'_>) -> bool {
    if a.node() == b.node() {
        return true;
    }
    let a = safe_deparenthesize(a);
    let b = safe_deparenthesize(b);
    if a.node().kind() != b.node().kind() {
        return false;
    }
    match (a, b) {
        (Expr::Binary(x), Expr::Binary(y)) => {
            x.operation_token() == y.operation_token()
                && expressions_match(x.left(), y.left())
                && options_match(x.right(), y.right())
        }
        (Expr::Prefix(x), Expr::Prefix(y)) => {
            x.operation().operation_token() == y.operation().operation_token()
                && options_match(x.base_expression(), y.base_expression())
        }
        (Expr::Postfix(x), Expr::Postfix(y)) => {
            x.operation().operation_token() == y.operation().operation_token()
                && options_match(x.base_expression(), y.base_expression())
        }
        (Expr::BinaryWithType(x), Expr::BinaryWithType(y)) => {
            x.operation().operation_token() == y.operation().operation_token()
                && expressions_match(x.left(), y.left())
                && nodes_text_match(
                    x.type_reference().map(|t| t.node()),
                    y.type_reference().map(|t| t.node()),
                )
        }
        (Expr::Is(x), Expr::Is(y)) => {
            x.is_negated() == y.is_negated()
                && expressions_match(x.subject(), y.subject())
                && nodes_text_match(
                    x.type_reference().map(|t| t.node()),
                    y.type_reference().map(|t| t.node()),
                )
        }
        (Expr::DotQualified(x), Expr::DotQualified(y)) => {
            expressions_match(x.receiver(), y.receiver())
                && options_match(x.selector(), y.selector())
        }
        (Expr::SafeAccess(x), Expr::SafeAccess(y)) => {
            expressions_match(x.receiver(), y.receiver())
                && options_match(x.selector(), y.selector())
        }
        (Expr::Call(x), Expr::Call(y)) => {
            if !options_match(x.callee(), y.callee()) {
                return false;
            }
            let xs = x.value_arguments();
            let ys = y.value_arguments();
            xs.len() == ys.len()
                && xs.iter().zip(&ys).all(|(xa, ya)| {
                    options_match(xa.argument_expression(), ya.argument_expression())
                })
        }
        (Expr::ArrayAccess(x), Expr::ArrayAccess(y)) => {
            if !expressions_match(x.array_expression(), y.array_expression()) {
                return false;
            }
            let xs = x.index_expressions();
            let ys = y.index_expressions();
            xs.len() == ys.len()
                && xs.iter().zip(&ys).all(|(xi, yi)| expressions_match(*xi, *yi))
        }
        (Expr::Ref(x), Expr::Ref(y)) => x.referenced_name() == y.referenced_name(),
        (Expr::Constant(x), Expr::Constant(y)) => x.text() == y.text(),
        // Everything else compares whitespace-insensitively by text.
        _ => texts_match(a.node(), b.node()),
    }
}

fn options_match(a: Option<Expr<'_>>, b: Option<Expr<'_>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => expressions_match(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn nodes_text_match(a: Option<Node<'_>>, b: Option<Node<'_>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => texts_match(a, b),
        (None, None) => true,
        _ => false,
    }
}

fn texts_match(a: Node<'_>, b: Node<'_>) -> bool {
    fn significant(s: &str) -> impl Iterator<Item = char> + '_ {
        s.chars().filter(|c| !c.is_whitespace())
    }
    significant(a.text()).eq(significant(b.text()))
}
