//! Member access, indexing and object creation.

use super::receiver_text;
use crate::context::TranslationContext;
use crate::formatting::{indented, is_multi_line};
use crate::ir::{Expr, NodeKind};
use crate::traits::{TranslateError, Translator};

/// Renders fields and properties: `subject.Member`, `Type.Member`.
pub struct MemberTranslator;

impl Translator for MemberTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Member]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Member { subject, member } = expr else {
            return Err(ctx.invalid("expected a member access"));
        };
        let subject = match subject {
            Some(subject) if !member.is_static => subject,
            _ => {
                let owner = ctx.type_name(&member.declaring_type);
                return Ok(format!("{owner}.{}", member.name));
            }
        };
        if let Some(object) = subject.captured_object() {
            return Ok(ctx.captured_member_name(object, &member.name));
        }
        Ok(format!("{}.{}", receiver_text(subject, ctx)?, member.name))
    }
}

/// Renders array, string and custom indexers as `subject[i, ...]`.
pub struct IndexTranslator;

impl Translator for IndexTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Index]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        let Expr::Index {
            subject, indices, ..
        } = expr
        else {
            return Err(ctx.invalid("expected an index access"));
        };
        if indices.is_empty() {
            return Err(ctx.invalid("index access has no indices"));
        }
        let subject = receiver_text(subject, ctx)?;
        let indices = ctx.translate_arguments(indices, None)?;
        Ok(format!("{subject}{}", ctx.argument_list(&indices, "[", "]")))
    }
}

/// Renders `new T(args)` and array initializers.
pub struct NewTranslator;

impl Translator for NewTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::New, NodeKind::NewArray]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        match expr {
            Expr::New {
                ty,
                constructor,
                args,
            } => {
                let params = constructor.as_ref().map(|c| c.params.as_slice());
                let args = ctx.translate_parameters(args, params)?;
                Ok(format!("new {}{args}", ctx.type_name(ty)))
            }
            Expr::NewArray { element, items } if items.is_empty() => {
                Ok(format!("new {}[0]", ctx.type_name(element)))
            }
            Expr::NewArray { element, items } => {
                let array = if items.iter().all(|item| item.ty() == *element) {
                    "new[]".to_string()
                } else {
                    format!("new {}[]", ctx.type_name(element))
                };
                let items = ctx.translate_arguments(items, None)?;
                let inline = items.join(", ");
                let fits = inline.len() <= ctx.settings().line_width;
                if fits && !items.iter().any(|item| is_multi_line(item)) {
                    return Ok(format!("{array} {{ {inline} }}"));
                }
                let lines: Vec<String> = items
                    .iter()
                    .map(|item| indented(item, ctx.indent()))
                    .collect();
                Ok(format!("{array}\n{{\n{}\n}}", lines.join(",\n")))
            }
            _ => Err(ctx.invalid("expected an object or array creation")),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{CapturedObject, Expr, MemberInfo, MethodInfo, Type, Variable};
    use crate::translators::test_support::render;
    use insta::assert_snapshot;

    #[test]
    fn test_instance_and_static_members() {
        let a = Variable::new("a", Type::string());
        let length = Expr::member(
            Expr::variable(&a),
            MemberInfo::new(Type::string(), "Length", Type::int()),
        );
        assert_snapshot!(render(&Expr::lambda(&[a.clone()], length)), @"a => a.Length");

        let comparer = Type::generic(
            "System.Collections.Generic",
            "EqualityComparer",
            vec![Type::int()],
        );
        let default = Expr::static_member(MemberInfo::static_member(
            comparer.clone(),
            "Default",
            comparer,
        ));
        assert_snapshot!(render(&default), @"EqualityComparer<int>.Default");
    }

    #[test]
    fn test_captured_members_have_no_receiver() {
        let closure = CapturedObject::new(Type::named("", "<>c__DisplayClass0_0"));
        let field = Expr::member(
            Expr::captured(&closure),
            MemberInfo::new(Type::named("", "<>c__DisplayClass0_0"), "_i", Type::int()),
        );
        assert_snapshot!(render(&field), @"_i");
    }

    #[test]
    fn test_index_access() {
        let str = Variable::new("str", Type::string());
        let first = Expr::index(Expr::variable(&str), [Expr::constant(0)], Type::char());
        assert_snapshot!(render(&first), @"str[0]");

        let items = Variable::new("items", Type::array_of(Type::int()));
        let item = Expr::array_index(Expr::variable(&items), Expr::constant(0i64));
        assert_snapshot!(render(&item), @"items[0L]");

        let empty = Expr::index(Expr::variable(&str), std::iter::empty::<Expr>(), Type::char());
        assert!(crate::translate(&empty, &Default::default()).is_err());
    }

    #[test]
    fn test_object_creation() {
        let converter = Type::named("Demo", "ValueConverter");
        let create = Expr::new_object(converter, std::iter::empty::<Expr>());
        assert_snapshot!(render(&create), @"new ValueConverter()");

        let builder = Type::named("System.Text", "StringBuilder");
        let ctor = MethodInfo::instance(builder.clone(), ".ctor").param("capacity", Type::int());
        let create = Expr::new_with(builder, ctor, [Expr::constant(16)]);
        assert_snapshot!(render(&create), @"new StringBuilder(16)");
    }

    #[test]
    fn test_array_creation() {
        let ints = Expr::new_array(Type::int(), [Expr::constant(1), Expr::constant(2)]);
        assert_snapshot!(render(&ints), @"new[] { 1, 2 }");

        let objects = Expr::new_array(Type::object(), [Expr::constant("a"), Expr::constant(1)]);
        assert_snapshot!(render(&objects), @r#"new object[] { "a", 1 }"#);

        let empty = Expr::new_array(Type::string(), std::iter::empty::<Expr>());
        assert_snapshot!(render(&empty), @"new string[0]");
    }
}
