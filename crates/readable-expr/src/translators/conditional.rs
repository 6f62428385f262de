//! Conditionals: `if` statements, `if`/`else` chains and ternaries.

use crate::code_block::CodeBlock;
use crate::context::TranslationContext;
use crate::formatting::with_parens;
use crate::ir::{Expr, NodeKind};
use crate::traits::{TranslateError, Translator};

pub struct ConditionalTranslator;

/// Layout chosen for a conditional, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    NoElse,
    Ternary,
    ShortCircuit,
    ElseIf,
    IfElse,
}

impl Translator for ConditionalTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Conditional]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Conditional {
            test,
            if_true,
            if_false,
            ty,
        } = expr
        else {
            return Err(ctx.invalid("expected a conditional"));
        };

        let raw_test = ctx.translate(test)?;
        let if_true_block = ctx.code_block(if_true)?;
        if if_false.is_empty() && ty.is_void() {
            return Ok(if_statement(&raw_test, &if_true_block));
        }

        let if_false_block = ctx.code_block(if_false)?;
        let layout = if !ty.is_void()
            && if_true_block.is_single_statement()
            && if_false_block.is_single_statement()
        {
            Layout::Ternary
        } else if !if_true.ty().is_void() {
            Layout::ShortCircuit
        } else if matches!(if_false.as_ref(), Expr::Conditional { .. }) {
            Layout::ElseIf
        } else {
            Layout::IfElse
        };
        tracing::trace!(?layout, "conditional layout");

        let if_statement = if_statement(&raw_test, &if_true_block);
        Ok(match layout {
            Layout::Ternary => format!(
                "{raw_test} ? {} : {}",
                if_true_block.as_expression(),
                if_false_block.as_expression()
            ),
            Layout::ShortCircuit => {
                format!("{if_statement}\n\n{}", if_false_block.without_brackets())
            }
            Layout::ElseIf => format!("{if_statement}\nelse {}", if_false_block.as_expression()),
            Layout::IfElse | Layout::NoElse => {
                format!("{if_statement}\nelse{}", if_false_block.with_brackets())
            }
        })
    }
}

fn if_statement(test: &str, body: &CodeBlock) -> String {
    format!("if {}{}", with_parens(test), body.with_brackets())
}

#[cfg(test)]
mod tests {
    use crate::ir::{Expr, MethodInfo, Type, Variable};
    use crate::translators::test_support::render;
    use insta::assert_snapshot;

    fn call(name: &str) -> Expr {
        Expr::static_call(
            MethodInfo::static_method(Type::named("", "Program"), name),
            std::iter::empty::<Expr>(),
        )
    }

    #[test]
    fn test_if_without_else() {
        let x = Variable::new("x", Type::int());
        let test = Expr::greater_than(Expr::variable(&x), Expr::constant(2));
        let statement = Expr::if_then(test, call("Y"));
        assert_eq!(render(&statement), "if (x > 2)\n{\n    Program.Y();\n}");
    }

    #[test]
    fn test_ternary() {
        let x = Variable::new("x", Type::bool());
        let ternary = Expr::condition(
            Expr::variable(&x),
            Expr::constant(1),
            Expr::constant(2),
            Type::int(),
        );
        assert_snapshot!(render(&ternary), @"x ? 1 : 2");

        let y = Variable::new("y", Type::int());
        let compare = Expr::greater_than(Expr::variable(&y), Expr::constant(2));
        let ternary = Expr::condition(compare, Expr::constant(1), Expr::constant(2), Type::int());
        assert_snapshot!(render(&ternary), @"(y > 2) ? 1 : 2");
    }

    #[test]
    fn test_if_else() {
        let flag = Variable::new("flag", Type::bool());
        let statement = Expr::if_then_else(Expr::variable(&flag), call("Yes"), call("No"));
        assert_eq!(
            render(&statement),
            "if (flag)\n{\n    Program.Yes();\n}\nelse\n{\n    Program.No();\n}"
        );
    }

    #[test]
    fn test_else_if_chain() {
        let a = Variable::new("a", Type::bool());
        let b = Variable::new("b", Type::bool());
        let nested = Expr::if_then_else(Expr::variable(&b), call("Two"), call("Three"));
        let statement = Expr::if_then_else(Expr::variable(&a), call("One"), nested);
        assert_eq!(
            render(&statement),
            "if (a)\n{\n    Program.One();\n}\nelse if (b)\n{\n    Program.Two();\n}\nelse\n{\n    Program.Three();\n}"
        );
    }

    #[test]
    fn test_short_circuit_if() {
        let flag = Variable::new("flag", Type::bool());
        let value = Variable::new("value", Type::int());
        let if_true = Expr::block([
            call("Log"),
            Expr::assign(Expr::variable(&value), Expr::constant(1)),
        ]);
        let if_false = Expr::block([
            call("Reset"),
            Expr::assign(Expr::variable(&value), Expr::constant(2)),
        ]);
        let statement = Expr::if_then_else(Expr::variable(&flag), if_true, if_false);
        assert_eq!(
            render(&statement),
            "if (flag)\n{\n    Program.Log();\n    value = 1;\n}\n\nProgram.Reset();\nvalue = 2;"
        );
    }
}
