//! Lambda expressions.

use crate::context::TranslationContext;
use crate::formatting::is_multi_line;
use crate::ir::{Expr, NodeKind};
use crate::traits::{TranslateError, Translator};

/// Renders `x => body`, `(a, b) => body` and braced statement bodies.
pub struct LambdaTranslator;

impl Translator for LambdaTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Lambda]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Lambda { params, body, .. } = expr else {
            return Err(ctx.invalid("expected a lambda"));
        };
        let names: Vec<String> = params.iter().map(|p| ctx.name_for(p)).collect();
        let params = match names.as_slice() {
            [single] => single.clone(),
            _ => format!("({})", names.join(", ")),
        };

        let body_text = match body.as_ref() {
            _ if body.is_empty() => " { }".to_string(),
            Expr::Block { .. } | Expr::Loop { .. } => ctx.code_block(body)?.with_brackets(),
            _ => {
                let text = ctx.translate(body)?;
                if is_multi_line(&text) && body.ty().is_void() {
                    ctx.code_block(body)?.with_brackets()
                } else {
                    format!(" {}", ctx.strip_or_keep(text, body))
                }
            }
        };
        Ok(format!("{params} =>{body_text}"))
    }
}
