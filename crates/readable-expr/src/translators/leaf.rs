//! Leaf nodes: constants, variables, defaults and extension nodes.

use crate::context::TranslationContext;
use crate::ir::{ConstantValue, Expr, NodeKind};
use crate::traits::{TranslateError, Translator};

/// Renders literals, `typeof(T)`, enum members and captured objects.
pub struct ConstantTranslator;

impl Translator for ConstantTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Constant]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Constant { value, .. } = expr else {
            return Err(ctx.invalid("expected a constant"));
        };
        Ok(match value {
            ConstantValue::Null => "null".to_string(),
            ConstantValue::Bool(value) => value.to_string(),
            ConstantValue::Int(value) => value.to_string(),
            ConstantValue::Long(value) => format!("{value}L"),
            ConstantValue::Float(value) => floating(*value, "float", 'f'),
            ConstantValue::Double(value) => floating(*value, "double", 'd'),
            ConstantValue::Decimal(digits) => format!("{digits}m"),
            ConstantValue::Char(c) => format!("'{}'", escape(&c.to_string(), '\'')),
            ConstantValue::String(text) => format!("\"{}\"", escape(text, '"')),
            ConstantValue::Type(ty) => format!("typeof({})", ctx.type_name(ty)),
            ConstantValue::Enum { ty, member } => format!("{}.{member}", ctx.type_name(ty)),
            ConstantValue::Captured(object) => ctx.captured_name(object),
        })
    }
}

fn floating<T>(value: T, keyword: &str, suffix: char) -> String
where
    T: Into<f64> + std::fmt::Display + Copy,
{
    let wide: f64 = value.into();
    if wide.is_nan() {
        format!("{keyword}.NaN")
    } else if wide == f64::INFINITY {
        format!("{keyword}.PositiveInfinity")
    } else if wide == f64::NEG_INFINITY {
        format!("{keyword}.NegativeInfinity")
    } else {
        format!("{value}{suffix}")
    }
}

fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

pub struct VariableTranslator;

impl Translator for VariableTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Variable]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        match expr {
            Expr::Variable(variable) => Ok(ctx.name_for(variable)),
            _ => Err(ctx.invalid("expected a variable")),
        }
    }
}

/// `default(T)`; the empty expression renders as nothing.
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Default]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        match expr {
            Expr::Default(ty) if ty.is_void() => Ok(String::new()),
            Expr::Default(ty) => Ok(format!("default({})", ctx.type_name(ty))),
            _ => Err(ctx.invalid("expected a default value")),
        }
    }
}

/// Delegates to the node's own renderer.
pub struct ExtensionTranslator;

impl Translator for ExtensionTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Extension]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        match expr {
            Expr::Extension(node) => node.as_ref().render(ctx),
            _ => Err(ctx.invalid("expected an extension node")),
        }
    }
}
