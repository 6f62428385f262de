//! Binary operators, assignments and the `checked` wrapper.

use super::operand_text;
use crate::context::TranslationContext;
use crate::formatting::{
    assign_symbol, binary_symbol, indented, is_multi_line, operand_needs_parens, unterminated,
    with_parens, without_parens,
};
use crate::ir::{AssignOp, BinaryOp, Expr, NodeKind, UnaryOp};
use crate::traits::{TranslateError, Translator};

/// Renders every binary operator as `(left OP right)`.
pub struct BinaryTranslator;

impl Translator for BinaryTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        BinaryOp::ALL.iter().map(|op| NodeKind::Binary(*op)).collect()
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Binary {
            op, left, right, ..
        } = expr
        else {
            return Err(ctx.invalid("expected a binary operator"));
        };
        let left = binary_operand(*op, left, false, ctx)?;
        let right = binary_operand(*op, right, true, ctx)?;
        let text = format!("({left} {} {right})", binary_symbol(*op));
        Ok(wrap_checked(expr, text, ctx))
    }
}

fn binary_operand<'a>(
    parent: BinaryOp,
    operand: &'a Expr,
    right_side: bool,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let text = operand_text(operand, ctx)?;
    Ok(match operand {
        Expr::Binary { op, .. } if !operand_needs_parens(parent, *op, right_side) => {
            without_parens(&text).to_string()
        }
        _ => text,
    })
}

/// Renders `target OP value` for plain and compound assignments.
pub struct AssignTranslator;

impl Translator for AssignTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        AssignOp::ALL.iter().map(|op| NodeKind::Assign(*op)).collect()
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Assign { op, target, value } = expr else {
            return Err(ctx.invalid("expected an assignment"));
        };
        let target = ctx.translate(target)?;
        let text = ctx.translate(value)?;
        let value_text = match value.as_ref() {
            Expr::Assign { .. } | Expr::Block { .. } => with_parens(unterminated(&text)),
            _ => ctx.strip_or_keep(text, value),
        };
        Ok(format!("{target} {} {value_text}", assign_symbol(*op)))
    }
}

/// Arithmetic and conversion nodes that share one `checked` context.
pub(crate) fn is_chain_link(expr: &Expr) -> bool {
    match expr {
        Expr::Binary { op, .. } => op.is_arithmetic(),
        Expr::Unary { op, .. } => {
            op.is_convert() || matches!(op, UnaryOp::Negate | UnaryOp::NegateChecked)
        }
        _ => false,
    }
}

fn chain_has_checked(expr: &Expr) -> bool {
    let nested = |child: &Expr| is_chain_link(child) && chain_has_checked(child);
    match expr {
        Expr::Binary {
            op, left, right, ..
        } => op.is_checked() || nested(left) || nested(right),
        Expr::Unary { op, operand, .. } => op.is_checked() || nested(operand),
        _ => false,
    }
}

fn takes_checked_wrapper(expr: &Expr) -> bool {
    matches!(
        expr.kind(),
        NodeKind::Binary(
            BinaryOp::Add
                | BinaryOp::AddChecked
                | BinaryOp::Multiply
                | BinaryOp::MultiplyChecked
                | BinaryOp::Subtract
                | BinaryOp::SubtractChecked
        ) | NodeKind::Unary(UnaryOp::Convert | UnaryOp::ConvertChecked)
    )
}

/// Wraps the outermost node of a checked arithmetic chain in `checked(...)`.
pub(crate) fn wrap_checked(expr: &Expr, text: String, ctx: &TranslationContext<'_>) -> String {
    if !takes_checked_wrapper(expr)
        || ctx.parent().is_some_and(is_chain_link)
        || !chain_has_checked(expr)
    {
        return text;
    }
    let inner = without_parens(&text);
    if is_multi_line(inner) {
        format!("checked\n{{\n{}\n}}", indented(inner, ctx.indent()))
    } else {
        format!("checked({inner})")
    }
}
