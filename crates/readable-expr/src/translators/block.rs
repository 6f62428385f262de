//! Statement sequences, local declarations and value-position blocks.

use crate::context::TranslationContext;
use crate::formatting::{indented, is_multi_line, terminated};
use crate::ir::{AssignOp, Expr, NodeKind, Type, Variable};
use crate::traits::{TranslateError, Translator};
use std::ptr;
use std::sync::Arc;

pub struct BlockTranslator;

/// Where a block sits relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Root, or the body of a block, loop or conditional branch.
    Statement,
    /// Body of a lambda that returns a value.
    LambdaBody,
    /// Operand, argument or assigned value.
    Value,
}

impl Translator for BlockTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Block]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Block {
            locals,
            statements,
            ty,
        } = expr
        else {
            return Err(ctx.invalid("expected a block"));
        };
        ctx.open_scope();
        let result = render_block(expr, locals, statements, ty, ctx);
        ctx.close_scope();
        result
    }
}

fn render_block<'a>(
    expr: &'a Expr,
    locals: &'a [Arc<Variable>],
    statements: &'a [Arc<Expr>],
    ty: &Type,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let position = position_of(expr, ctx);
    let statements: Vec<&'a Arc<Expr>> = statements.iter().filter(|s| !s.is_empty()).collect();
    let returns_last = match position {
        Position::Statement => false,
        Position::LambdaBody => statements.last().is_some_and(|s| !s.ty().is_void()),
        Position::Value => !ty.is_void() && statements.last().is_some_and(|s| !s.ty().is_void()),
    };

    let mut lines = Lines::default();
    let declarations = declarations(locals, &statements, ctx);
    if !declarations.is_empty() {
        lines.push(declarations.join("\n"), true);
    }

    let count = statements.len();
    for (i, statement) in statements.into_iter().enumerate() {
        let is_last = i + 1 == count;
        let text = ctx.translate(statement)?;
        if text.is_empty() {
            continue;
        }
        if is_last && returns_last {
            let value = match position {
                Position::Value => text,
                _ => ctx.strip_or_keep(text, statement),
            };
            lines.push_return(format!("return {value};"));
            continue;
        }
        let text = ctx.strip_or_keep(text, statement);
        let text = match declared_by(statement, locals) {
            Some(variable) if ctx.declare(variable) => format!("var {text}"),
            _ => text,
        };
        lines.push(terminated(&text), false);
    }

    let body = lines.finish();
    Ok(match position {
        Position::Value if body.is_empty() => "{\n}".to_string(),
        Position::Value => format!("{{\n{}\n}}", indented(&body, ctx.indent())),
        _ => body,
    })
}

fn position_of(expr: &Expr, ctx: &TranslationContext<'_>) -> Position {
    match ctx.parent() {
        None | Some(Expr::Block { .. }) | Some(Expr::Loop { .. }) => Position::Statement,
        Some(Expr::Lambda { ty, .. }) => match ty.delegate_result() {
            Some(result) if !result.is_void() => Position::LambdaBody,
            _ => Position::Statement,
        },
        Some(Expr::Conditional { test, .. }) if !ptr::eq(test.as_ref(), expr) => {
            Position::Statement
        }
        Some(_) => Position::Value,
    }
}

/// The block local a top-level plain assignment introduces, if any.
fn declared_by<'e>(statement: &'e Expr, locals: &[Arc<Variable>]) -> Option<&'e Arc<Variable>> {
    let Expr::Assign {
        op: AssignOp::Assign,
        target,
        ..
    } = statement
    else {
        return None;
    };
    let Expr::Variable(variable) = target.as_ref() else {
        return None;
    };
    locals
        .iter()
        .any(|local| Arc::ptr_eq(local, variable))
        .then_some(variable)
}

/// `Type name;` for each local that no top-level assignment introduces.
fn declarations(
    locals: &[Arc<Variable>],
    statements: &[&Arc<Expr>],
    ctx: &mut TranslationContext<'_>,
) -> Vec<String> {
    let mut out = Vec::new();
    for local in locals {
        let assigned = statements.iter().any(|statement| {
            declared_by(statement, locals).is_some_and(|variable| Arc::ptr_eq(variable, local))
        });
        if assigned || ctx.is_declared(local) {
            continue;
        }
        ctx.declare(local);
        let name = ctx.name_for(local);
        out.push(format!("{} {name};", ctx.type_name(&local.ty)));
    }
    out
}

/// Statement lines with blank lines around multi-line statements.
#[derive(Debug, Default)]
struct Lines {
    text: String,
    previous_spaced: bool,
}

impl Lines {
    fn push(&mut self, line: String, spaced: bool) {
        let spaced = spaced || is_multi_line(&line);
        if !self.text.is_empty() {
            self.text.push_str(if spaced || self.previous_spaced {
                "\n\n"
            } else {
                "\n"
            });
        }
        self.text.push_str(&line);
        self.previous_spaced = spaced;
    }

    /// The implicit return always stands apart from what precedes it.
    fn push_return(&mut self, line: String) {
        if !self.text.is_empty() {
            self.text.push_str("\n\n");
        }
        self.text.push_str(&line);
        self.previous_spaced = true;
    }

    fn finish(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{BinaryOp, Expr, MethodInfo, Type, Variable};
    use crate::translators::test_support::render;

    fn read() -> Expr {
        Expr::static_call(
            MethodInfo::static_method(Type::system("Console"), "Read").returns(Type::int()),
            std::iter::empty::<Expr>(),
        )
    }

    #[test]
    fn test_statements_are_terminated() {
        let i = Variable::new("i", Type::int());
        let block = Expr::block([
            Expr::assign(Expr::variable(&i), Expr::constant(1)),
            Expr::empty(),
            Expr::add(Expr::variable(&i), Expr::constant(2)),
        ]);
        assert_eq!(render(&block), "i = 1;\ni + 2;");
    }

    #[test]
    fn test_locals_are_declared_on_first_assignment() {
        let count = Variable::new("count", Type::int());
        let block = Expr::block_with_locals(
            &[count.clone()],
            [
                Expr::assign(Expr::variable(&count), read()),
                Expr::assign(Expr::variable(&count), Expr::constant(0)),
            ],
        );
        assert_eq!(render(&block), "var count = Console.Read();\ncount = 0;");
    }

    #[test]
    fn test_unassigned_locals_are_declared_up_front() {
        let total = Variable::new("total", Type::long());
        let call = Expr::static_call(
            MethodInfo::static_method(Type::named("", "Calculator"), "Sum")
                .out_param("result", Type::long()),
            [Expr::variable(&total)],
        );
        let block = Expr::void_block(&[total.clone()], [call]);
        assert_eq!(render(&block), "long total;\n\nCalculator.Sum(out total);");
    }

    #[test]
    fn test_sibling_blocks_each_declare_a_shared_local() {
        let flag = Variable::new("flag", Type::bool());
        let temp = Variable::new("temp", Type::int());
        let branch = || {
            let write = MethodInfo::static_method(Type::system("Console"), "WriteLine")
                .param("value", Type::int());
            Expr::void_block(
                &[temp.clone()],
                [
                    Expr::assign(Expr::variable(&temp), read()),
                    Expr::static_call(write, [Expr::variable(&temp)]),
                ],
            )
        };
        let text = render(&Expr::if_then_else(Expr::variable(&flag), branch(), branch()));
        assert_eq!(text.matches("var temp = Console.Read();").count(), 2);
        assert!(!text.contains("\n    temp = Console.Read();"));
    }

    #[test]
    fn test_nested_block_reuses_outer_declaration() {
        let flag = Variable::new("flag", Type::bool());
        let total = Variable::new("total", Type::int());
        let reset = Expr::void_block(
            &[total.clone()],
            [Expr::assign(Expr::variable(&total), Expr::constant(0))],
        );
        let outer = Expr::void_block(
            &[total.clone()],
            [
                Expr::assign(Expr::variable(&total), read()),
                Expr::if_then(Expr::variable(&flag), reset),
            ],
        );
        let text = render(&outer);
        assert_eq!(text.matches("var total").count(), 1);
        assert!(text.contains("total = 0;"));
    }

    #[test]
    fn test_block_in_value_position_returns_last_value() {
        let one = Variable::new("one", Type::int());
        let two = Variable::new("two", Type::int());
        let i = Variable::new("i", Type::int());
        let read = std::sync::Arc::new(read());
        let inner = Expr::block_with_locals(
            &[one.clone(), two.clone()],
            [
                Expr::assign(Expr::variable(&one), read.clone()),
                Expr::assign(Expr::variable(&two), read),
                Expr::add(Expr::variable(&one), Expr::variable(&two)),
            ],
        );
        let product = Expr::binary(BinaryOp::MultiplyChecked, inner, Expr::variable(&i));
        assert_eq!(
            render(&product),
            "checked\n{\n    {\n        var one = Console.Read();\n        var two = Console.Read();\n\n        return (one + two);\n    } * i\n}"
        );
    }

    #[test]
    fn test_lambda_block_body_returns_last_statement() {
        let x = Variable::new("x", Type::int());
        let body = Expr::block([
            Expr::assign(Expr::variable(&x), Expr::constant(3)),
            Expr::multiply(Expr::variable(&x), Expr::constant(2)),
        ]);
        let lambda = Expr::lambda(&[x.clone()], body);
        assert_eq!(
            render(&lambda),
            "x =>\n{\n    x = 3;\n\n    return x * 2;\n}"
        );
    }
}
