//! Built-in translators, one per node family.

mod binary;
mod block;
mod call;
mod conditional;
mod lambda;
mod leaf;
mod loops;
mod members;
mod unary;

pub use binary::{AssignTranslator, BinaryTranslator};
pub use block::BlockTranslator;
pub use call::CallTranslator;
pub use conditional::ConditionalTranslator;
pub use lambda::LambdaTranslator;
pub use leaf::{ConstantTranslator, DefaultTranslator, ExtensionTranslator, VariableTranslator};
pub use loops::LoopTranslator;
pub use members::{IndexTranslator, MemberTranslator, NewTranslator};
pub use unary::UnaryTranslator;

use crate::context::TranslationContext;
use crate::formatting::with_parens;
use crate::ir::{Expr, UnaryOp};
use crate::traits::{TranslateError, Translator};

/// Every built-in translator, in registration order.
pub fn standard() -> Vec<Box<dyn Translator>> {
    vec![
        Box::new(ConstantTranslator),
        Box::new(VariableTranslator),
        Box::new(DefaultTranslator),
        Box::new(ExtensionTranslator),
        Box::new(BinaryTranslator),
        Box::new(AssignTranslator),
        Box::new(UnaryTranslator),
        Box::new(ConditionalTranslator),
        Box::new(LoopTranslator),
        Box::new(BlockTranslator),
        Box::new(LambdaTranslator),
        Box::new(CallTranslator),
        Box::new(MemberTranslator),
        Box::new(IndexTranslator),
        Box::new(NewTranslator),
    ]
}

/// Whether `expr` must be parenthesized when it is the operand of a
/// prefix operator or the receiver of a member access.
fn needs_grouping(expr: &Expr) -> bool {
    match expr {
        Expr::Conditional { .. } | Expr::Assign { .. } | Expr::Lambda { .. } => true,
        Expr::Unary { op, .. } => !matches!(
            op,
            UnaryOp::ArrayLength
                | UnaryOp::TypeAs
                | UnaryOp::PostIncrementAssign
                | UnaryOp::PostDecrementAssign
        ),
        _ => false,
    }
}

/// Text of a member-access receiver: `(a + b).X`, `((int)x).Y`.
fn receiver_text<'a>(
    receiver: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let text = ctx.translate(receiver)?;
    Ok(if needs_grouping(receiver) {
        with_parens(&text)
    } else {
        text
    })
}

/// Text of an operand embedded in a larger expression.
fn operand_text<'a>(
    operand: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let text = ctx.translate(operand)?;
    Ok(match operand {
        Expr::Conditional { .. } | Expr::Assign { .. } | Expr::Lambda { .. } => with_parens(&text),
        _ => text,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::ir::Expr;
    use crate::{TranslationSettings, translate};

    pub fn render(expr: &Expr) -> String {
        translate(expr, &TranslationSettings::default()).expect("translation succeeds")
    }

    pub fn render_with(expr: &Expr, settings: &TranslationSettings) -> String {
        translate(expr, settings).expect("translation succeeds")
    }
}
