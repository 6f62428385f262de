//! Unary operators, conversions and increments.

use super::binary::wrap_checked;
use super::{needs_grouping, operand_text};
use crate::context::TranslationContext;
use crate::formatting::with_parens;
use crate::ir::{Expr, NodeKind, UnaryOp};
use crate::traits::{TranslateError, Translator};

pub struct UnaryTranslator;

impl Translator for UnaryTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        UnaryOp::ALL.iter().map(|op| NodeKind::Unary(*op)).collect()
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Unary { op, operand, ty } = expr else {
            return Err(ctx.invalid("expected a unary operator"));
        };
        let mut value = operand_text(operand, ctx)?;
        if needs_grouping(operand) {
            value = with_parens(&value);
        }

        let text = match op {
            UnaryOp::Negate | UnaryOp::NegateChecked => format!("-{value}"),
            UnaryOp::UnaryPlus => format!("+{value}"),
            UnaryOp::Not if operand.ty().is_integral() => format!("~{value}"),
            UnaryOp::Not => format!("!{value}"),
            UnaryOp::OnesComplement => format!("~{value}"),
            UnaryOp::Increment | UnaryOp::PreIncrementAssign => format!("++{value}"),
            UnaryOp::Decrement | UnaryOp::PreDecrementAssign => format!("--{value}"),
            UnaryOp::PostIncrementAssign => format!("{value}++"),
            UnaryOp::PostDecrementAssign => format!("{value}--"),
            UnaryOp::Convert | UnaryOp::ConvertChecked => {
                format!("({}){value}", ctx.type_name(ty))
            }
            UnaryOp::TypeAs => format!("({value} as {})", ctx.type_name(ty)),
            UnaryOp::ArrayLength => format!("{value}.Length"),
        };
        Ok(wrap_checked(expr, text, ctx))
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{BinaryOp, Expr, MethodInfo, Type, UnaryOp, Variable};
    use crate::translators::test_support::render;
    use insta::assert_snapshot;

    fn int_var(name: &str) -> std::sync::Arc<Variable> {
        Variable::new(name, Type::int())
    }

    #[test]
    fn test_increments_and_decrements() {
        let i = int_var("i");
        let render_op = |op| render(&Expr::unary(op, Expr::variable(&i)));
        assert_snapshot!(render_op(UnaryOp::Increment), @"++i");
        assert_snapshot!(render_op(UnaryOp::PreIncrementAssign), @"++i");
        assert_snapshot!(render_op(UnaryOp::PostIncrementAssign), @"i++");
        assert_snapshot!(render_op(UnaryOp::Decrement), @"--i");
        assert_snapshot!(render_op(UnaryOp::PreDecrementAssign), @"--i");
        assert_snapshot!(render_op(UnaryOp::PostDecrementAssign), @"i--");
    }

    #[test]
    fn test_not_depends_on_operand_type() {
        let flag = Variable::new("flag", Type::bool());
        assert_snapshot!(render(&Expr::not(Expr::variable(&flag))), @"!flag");

        let bits = int_var("bits");
        assert_snapshot!(render(&Expr::not(Expr::variable(&bits))), @"~bits");
    }

    #[test]
    fn test_conversions() {
        let d = Variable::new("d", Type::double());
        assert_snapshot!(render(&Expr::convert(Expr::variable(&d), Type::int())), @"(int)d");

        let o = Variable::new("o", Type::object());
        assert_snapshot!(
            render(&Expr::type_as(Expr::variable(&o), Type::string())),
            @"(o as string)"
        );

        let sum = Expr::add(Expr::variable(&d), Expr::constant(1.5));
        assert_snapshot!(render(&Expr::convert(sum, Type::int())), @"(int)(d + 1.5d)");
    }

    #[test]
    fn test_checked_conversion() {
        let l = Variable::new("l", Type::long());
        let convert = Expr::convert_checked(Expr::variable(&l), Type::int());
        assert_snapshot!(render(&convert), @"checked((int)l)");
    }

    #[test]
    fn test_array_length_and_negation() {
        let a = Variable::new("a", Type::array_of(Type::string()));
        let length = Expr::lambda(&[a.clone()], Expr::array_length(Expr::variable(&a)));
        assert_snapshot!(render(&length), @"a => a.Length");

        let i = int_var("i");
        let product = Expr::binary(BinaryOp::Multiply, Expr::variable(&i), Expr::constant(2));
        assert_snapshot!(render(&Expr::negate(product)), @"-(i * 2)");
    }

    #[test]
    fn test_negated_method_call() {
        let list = Variable::new(
            "l",
            Type::generic("System.Collections.Generic", "List", vec![Type::int()]),
        );
        let contains = MethodInfo::instance(Type::object(), "Contains")
            .param("item", Type::int())
            .returns(Type::bool());
        let call = Expr::call(Expr::variable(&list), contains, [Expr::constant(0)]);
        assert_snapshot!(render(&Expr::not(call)), @"!l.Contains(0)");
    }
}
