//! Loops and the jumps out of them.

use crate::context::TranslationContext;
use crate::ir::{Expr, Label, NodeKind};
use crate::traits::{TranslateError, Translator};
use std::sync::Arc;

/// Renders loops as `while (true)` plus `break`, `continue` and `return`.
pub struct LoopTranslator;

impl Translator for LoopTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![
            NodeKind::Loop,
            NodeKind::Break,
            NodeKind::Continue,
            NodeKind::Return,
        ]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        match expr {
            Expr::Loop { body, .. } => {
                let body = match body {
                    Some(body) => ctx.code_block(body)?.with_brackets(),
                    None => "\n{\n}".to_string(),
                };
                Ok(format!("while (true){body}"))
            }
            Expr::Break { target } => jump(ctx, target, "break", |labels| labels.0),
            Expr::Continue { target } => jump(ctx, target, "continue", |labels| labels.1),
            Expr::Return { value: None, .. } => Ok("return".to_string()),
            Expr::Return {
                value: Some(value), ..
            } => Ok(format!("return {}", ctx.translate(value)?)),
            _ => Err(ctx.invalid("expected a loop or jump")),
        }
    }
}

type LoopLabels<'a> = (Option<&'a Arc<Label>>, Option<&'a Arc<Label>>);

fn jump<'a>(
    ctx: &TranslationContext<'a>,
    target: &Arc<Label>,
    keyword: &str,
    label_of: impl Fn(LoopLabels<'a>) -> Option<&'a Arc<Label>>,
) -> Result<String, TranslateError> {
    let enclosed = ctx.ancestors().any(|ancestor| match ancestor {
        Expr::Loop {
            break_label,
            continue_label,
            ..
        } => label_of((break_label.as_ref(), continue_label.as_ref()))
            .is_some_and(|label| Arc::ptr_eq(label, target)),
        _ => false,
    });
    if enclosed {
        Ok(keyword.to_string())
    } else {
        Err(ctx.invalid(format!("{keyword} target is not an enclosing loop")))
    }
}
