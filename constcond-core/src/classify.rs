//! Constant-foldability classification of expression trees.
//!
//! The classifier answers one question: is this expression built entirely
//! from literal constants? An expression qualifies when every leaf reachable
//! through binary, unary, and short-circuit boolean composition is a literal.
//! Any other expression shape (a path, a call, a field access, ...) makes the
//! whole tree non-constant, no matter how deeply it is buried.
//!
//! Classification is a pure structural fold: the answer for a node depends
//! only on its own shape and the answers for its direct children, never on
//! sibling, parent, or global context.

use syn::{BinOp, Expr};

use crate::error::{ConstcondError, ConstcondResult};

/// Maximum tree depth the classifier will walk.
///
/// Parsed source is generator-controlled input in the general case, so the
/// recursion is capped rather than trusted to terminate at a sane depth.
/// Trees deeper than this classify as non-constant through [`is_all_constant`]
/// and as [`ConstcondError::MalformedTree`] through [`classify_strict`].
pub const MAX_CLASSIFY_DEPTH: usize = 512;

/// Short-circuit boolean operator kind (`&&` or `||`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BoolOpKind {
    And,
    Or,
}

/// The closed set of shapes the classifier distinguishes.
///
/// Every `syn::Expr` variant maps onto exactly one of these five cases;
/// `Other` is the explicit catch-all so that newly added expression shapes
/// classify as non-constant instead of falling through silently.
enum ExprShape<'a> {
    /// A literal constant (number, string, bool, char, byte string).
    Literal,
    /// Arithmetic/comparison/bitwise operator over two operands.
    Binary(&'a Expr, &'a Expr),
    /// Unary operator (`!`, `-`, `*`) over one operand.
    Unary(&'a Expr),
    /// A `&&`/`||` chain, flattened into its ordered operands (arity >= 2).
    Bool(Vec<&'a Expr>),
    /// Anything else: variables, calls, indexing, `let` conditions, blocks...
    Other,
}

/// Strips parentheses and invisible groups.
///
/// Grouping carries no semantics of its own, so `(true)` must classify
/// exactly like `true`.
fn unwrap_groups(mut expr: &Expr) -> &Expr {
    loop {
        match expr {
            Expr::Paren(paren) => expr = &paren.expr,
            Expr::Group(group) => expr = &group.expr,
            _ => return expr,
        }
    }
}

fn bool_op_kind(op: &BinOp) -> Option<BoolOpKind> {
    match op {
        BinOp::And(_) => Some(BoolOpKind::And),
        BinOp::Or(_) => Some(BoolOpKind::Or),
        _ => None,
    }
}

/// Flattens a same-operator `&&`/`||` chain into its operand sequence.
///
/// `a && b && c` parses as `(a && b) && c`; the flattened sequence is
/// `[a, b, c]`. Operands using the *other* boolean operator stay intact as
/// single operands and classify recursively on their own.
fn flatten_bool_chain<'a>(expr: &'a Expr, kind: BoolOpKind, values: &mut Vec<&'a Expr>) {
    let expr = unwrap_groups(expr);
    if let Expr::Binary(bin) = expr {
        if bool_op_kind(&bin.op) == Some(kind) {
            flatten_bool_chain(&bin.left, kind, values);
            flatten_bool_chain(&bin.right, kind, values);
            return;
        }
    }
    values.push(expr);
}

fn shape(expr: &Expr) -> ExprShape<'_> {
    match unwrap_groups(expr) {
        Expr::Lit(_) => ExprShape::Literal,
        Expr::Binary(bin) => match bool_op_kind(&bin.op) {
            Some(kind) => {
                let mut values = Vec::new();
                flatten_bool_chain(&bin.left, kind, &mut values);
                flatten_bool_chain(&bin.right, kind, &mut values);
                ExprShape::Bool(values)
            }
            None => ExprShape::Binary(&bin.left, &bin.right),
        },
        Expr::Unary(unary) => ExprShape::Unary(&unary.expr),
        _ => ExprShape::Other,
    }
}

/// Structural fold over the shape tree. `None` means the depth cap was hit.
fn classify(expr: &Expr, depth: usize) -> Option<bool> {
    if depth >= MAX_CLASSIFY_DEPTH {
        return None;
    }
    match shape(expr) {
        ExprShape::Literal => Some(true),
        ExprShape::Binary(left, right) => {
            Some(classify(left, depth + 1)? && classify(right, depth + 1)?)
        }
        ExprShape::Unary(operand) => classify(operand, depth + 1),
        ExprShape::Bool(values) => {
            for value in values {
                if !classify(value, depth + 1)? {
                    return Some(false);
                }
            }
            Some(true)
        }
        ExprShape::Other => Some(false),
    }
}

/// Returns true iff every leaf of the expression tree is a literal constant.
///
/// Total over all expressions: never panics, never errors. Trees deeper than
/// [`MAX_CLASSIFY_DEPTH`] classify as non-constant, so over-deep input can
/// suppress a diagnostic but never fabricate one.
pub fn is_all_constant(expr: &Expr) -> bool {
    classify(expr, 0).unwrap_or(false)
}

/// Like [`is_all_constant`], but surfaces the depth cap as a typed error.
///
/// Intended for hosts that treat an over-deep tree as a malformed-input
/// signal rather than silently skipping it.
pub fn classify_strict(expr: &Expr) -> ConstcondResult<bool> {
    classify(expr, 0).ok_or(ConstcondError::MalformedTree {
        max_depth: MAX_CLASSIFY_DEPTH,
    })
}
