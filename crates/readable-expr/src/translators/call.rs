//! Method calls and delegate invocations.
//!
//! A few call shapes read better as something other than `x.Method(args)`;
//! those are tried first, in order, and the first match renders the call.

use super::{operand_text, receiver_text};
use crate::context::TranslationContext;
use crate::formatting::with_parens;
use crate::ir::{Expr, MethodInfo, MethodKind, NodeKind, Parameter};
use crate::traits::{TranslateError, Translator};
use std::collections::HashSet;
use std::sync::Arc;

type Render =
    for<'a> fn(&'a Expr, &mut TranslationContext<'a>) -> Result<String, TranslateError>;

/// A call shape with its own surface form.
struct SpecialCase {
    applies: fn(&Expr) -> bool,
    render: Render,
}

static SPECIAL_CASES: &[SpecialCase] = &[
    SpecialCase {
        applies: is_invocation,
        render: invocation,
    },
    SpecialCase {
        applies: is_string_concat,
        render: string_concat,
    },
    SpecialCase {
        applies: is_indexed_accessor,
        render: indexed_accessor,
    },
];

/// Renders calls and invocations.
pub struct CallTranslator;

impl Translator for CallTranslator {
    fn kinds(&self) -> Vec<NodeKind> {
        vec![NodeKind::Call, NodeKind::Invoke]
    }

    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError> {
        if let Some(case) = SPECIAL_CASES.iter().find(|case| (case.applies)(expr)) {
            return (case.render)(expr, ctx);
        }
        method_call(expr, ctx)
    }
}

fn is_invocation(expr: &Expr) -> bool {
    matches!(expr, Expr::Invoke { .. })
}

fn invocation<'a>(
    expr: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let Expr::Invoke { target, args, .. } = expr else {
        return Err(ctx.invalid("expected a delegate invocation"));
    };
    let target_text = match target.as_ref() {
        Expr::Lambda { .. } => with_parens(&ctx.translate(target)?),
        _ => receiver_text(target, ctx)?,
    };
    let args = ctx.translate_parameters(args, None)?;
    Ok(format!("{target_text}.Invoke{args}"))
}

fn is_string_concat(expr: &Expr) -> bool {
    match expr {
        Expr::MethodCall {
            subject: None,
            method,
            ..
        } => method.name == "Concat" && method.declaring_type.is_string(),
        _ => false,
    }
}

fn is_parameterless_to_string(expr: &Expr) -> bool {
    match expr {
        Expr::MethodCall {
            subject: Some(_),
            method,
            args,
        } => method.name == "ToString" && args.is_empty(),
        _ => false,
    }
}

/// `string.Concat(a, b, c)` as `(a + b + c)`.
fn string_concat<'a>(
    expr: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let Expr::MethodCall { args, .. } = expr else {
        return Err(ctx.invalid("expected a string concatenation"));
    };
    let operands: &'a [Arc<Expr>] = match args.as_slice() {
        [single] => match single.as_ref() {
            Expr::NewArray { items, .. } => items.as_slice(),
            _ => args.as_slice(),
        },
        _ => args.as_slice(),
    };

    let mut texts = Vec::with_capacity(operands.len());
    for operand in operands {
        let operand = match operand.as_ref() {
            Expr::MethodCall {
                subject: Some(subject),
                ..
            } if is_parameterless_to_string(operand) => subject,
            _ => operand,
        };
        texts.push(operand_text(operand, ctx)?);
    }
    Ok(format!("({})", texts.join(" + ")))
}

fn is_indexed_accessor(expr: &Expr) -> bool {
    match expr {
        Expr::MethodCall { method, .. } => method
            .accessor
            .as_ref()
            .is_some_and(|accessor| accessor.index_params > 0),
        _ => false,
    }
}

/// `get_Item(i)` as `subject[i]` and `set_Item(i, v)` as `subject[i] = v`.
fn indexed_accessor<'a>(
    expr: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let Expr::MethodCall {
        subject,
        method,
        args,
    } = expr
    else {
        return Err(ctx.invalid("expected an indexer accessor call"));
    };
    let Some(subject) = subject else {
        return Err(ctx.invalid("indexer accessor has no subject"));
    };
    let is_setter = method.accessor.as_ref().is_some_and(|a| a.is_setter);
    let (indices, value) = match (is_setter, args.split_last()) {
        (true, Some((value, indices))) => (indices, Some(value)),
        (true, None) => return Err(ctx.invalid("indexer setter has no value argument")),
        (false, _) => (args.as_slice(), None),
    };
    if indices.is_empty() {
        return Err(ctx.invalid("indexer accessor has no index arguments"));
    }

    let receiver = receiver_text(subject, ctx)?;
    let texts = ctx.translate_arguments(indices, None)?;
    let indexer = format!("{receiver}{}", ctx.argument_list(&texts, "[", "]"));
    match value {
        Some(value) => {
            let text = ctx.translate(value)?;
            Ok(format!("{indexer} = {}", ctx.strip_or_keep(text, value)))
        }
        None => Ok(indexer),
    }
}

fn method_call<'a>(
    expr: &'a Expr,
    ctx: &mut TranslationContext<'a>,
) -> Result<String, TranslateError> {
    let Expr::MethodCall {
        subject,
        method,
        args,
    } = expr
    else {
        return Err(ctx.invalid("expected a method call"));
    };

    let (receiver, args, params): (Option<String>, &'a [Arc<Expr>], &'a [Parameter]) =
        match method.kind {
            MethodKind::Extension => {
                let Some((first, rest)) = args.split_first() else {
                    return Err(ctx.invalid("extension call has no receiver argument"));
                };
                let params = method.params.get(1..).unwrap_or_default();
                (Some(receiver_text(first, ctx)?), rest, params)
            }
            MethodKind::Static => (
                Some(ctx.type_name(&method.declaring_type)),
                args.as_slice(),
                method.params.as_slice(),
            ),
            MethodKind::Instance => match subject {
                Some(subject) if subject.is_captured() => {
                    (None, args.as_slice(), method.params.as_slice())
                }
                Some(subject) => (
                    Some(receiver_text(subject, ctx)?),
                    args.as_slice(),
                    method.params.as_slice(),
                ),
                None => return Err(ctx.invalid("instance call has no subject")),
            },
        };

    let generics = generic_arguments(method, ctx)?;
    let arguments = ctx.translate_parameters(args, Some(params))?;
    let call = format!("{}{generics}{arguments}", method.name);
    Ok(match receiver {
        Some(receiver) if ctx.is_part_of_method_call_chain(expr) => {
            format!("{receiver}\n{}.{call}", ctx.indent())
        }
        Some(receiver) => format!("{receiver}.{call}"),
        None => call,
    })
}

/// `<T1, T2>` unless every generic parameter can be inferred from the
/// declared parameter types.
fn generic_arguments(
    method: &MethodInfo,
    ctx: &TranslationContext<'_>,
) -> Result<String, TranslateError> {
    if !method.is_generic() {
        return Ok(String::new());
    }
    if method.generic_args.len() != method.generic_params.len() {
        return Err(ctx.invalid(format!(
            "{} type arguments supplied for {} generic parameters",
            method.generic_args.len(),
            method.generic_params.len()
        )));
    }
    if !ctx.settings().use_explicit_generic_parameters {
        let mut inferable = HashSet::new();
        for param in &method.params {
            param.ty.for_each_generic_param(&mut |name| {
                inferable.insert(name);
            });
        }
        if method
            .generic_params
            .iter()
            .all(|name| inferable.contains(name.as_str()))
        {
            return Ok(String::new());
        }
    }
    let args: Vec<String> = method.generic_args.iter().map(|t| ctx.type_name(t)).collect();
    Ok(format!("<{}>", args.join(", ")))
}

#[cfg(test)]
mod tests {
    use crate::TranslationSettings;
    use crate::ir::{Expr, MethodInfo, Type, Variable};
    use crate::translators::test_support::{render, render_with};
    use insta::assert_snapshot;

    fn helper() -> Type {
        Type::named("Demo", "Helper")
    }

    #[test]
    fn test_static_and_instance_calls() {
        let equals = MethodInfo::static_method(Type::object(), "ReferenceEquals")
            .param("objA", Type::object())
            .param("objB", Type::object())
            .returns(Type::bool());
        let call = Expr::static_call(equals, [Expr::constant(1), Expr::constant(2)]);
        assert_snapshot!(render(&Expr::lambda(&[], call)), @"() => object.ReferenceEquals(1, 2)");

        let o = Variable::new("o", Type::object());
        let to_string = MethodInfo::instance(Type::object(), "ToString").returns(Type::string());
        let call = Expr::call(Expr::variable(&o), to_string, std::iter::empty::<Expr>());
        assert_snapshot!(render(&Expr::lambda(&[o.clone()], call)), @"o => o.ToString()");
    }

    #[test]
    fn test_generic_arguments_are_elided_when_inferable() {
        let ip = Variable::new("ip", helper());
        let str = Variable::new("str", Type::string());
        let set_first = MethodInfo::instance(helper(), "SetFirst")
            .generic(&[("T", Type::string())])
            .param("value", Type::param("T"));
        let call = Expr::call(Expr::variable(&ip), set_first, [Expr::variable(&str)]);
        assert_snapshot!(render(&call), @"ip.SetFirst(str)");

        let explicit = TranslationSettings::default().with_explicit_generic_parameters();
        assert_snapshot!(render_with(&call, &explicit), @"ip.SetFirst<string>(str)");
    }

    #[test]
    fn test_generic_arguments_shown_when_not_inferable() {
        let ip = Variable::new("ip", helper());
        let get_first = MethodInfo::instance(helper(), "GetFirst")
            .generic(&[("T", Type::string())])
            .returns(Type::string());
        let call = Expr::call(Expr::variable(&ip), get_first, std::iter::empty::<Expr>());
        assert_snapshot!(render(&call), @"ip.GetFirst<string>()");
    }

    #[test]
    fn test_ref_and_out_arguments() {
        let ip = Variable::new("ip", helper());
        let value = Variable::new("value", Type::int());
        let try_get = MethodInfo::instance(helper(), "TryGet")
            .param("key", Type::int())
            .out_param("value", Type::int())
            .returns(Type::bool());
        let call = Expr::call(
            Expr::variable(&ip),
            try_get,
            [Expr::constant(1), Expr::variable(&value)],
        );
        assert_snapshot!(render(&call), @"ip.TryGet(1, out value)");

        let ref_get = MethodInfo::instance(helper(), "RefGet")
            .param("key", Type::int())
            .ref_param("value", Type::int());
        let call = Expr::call(
            Expr::variable(&ip),
            ref_get,
            [Expr::constant(3), Expr::variable(&value)],
        );
        assert_snapshot!(render(&call), @"ip.RefGet(3, ref value)");
    }

    #[test]
    fn test_argument_count_mismatch_is_rejected() {
        let ip = Variable::new("ip", helper());
        let method = MethodInfo::instance(helper(), "Run").param("x", Type::int());
        let call = Expr::call(Expr::variable(&ip), method, std::iter::empty::<Expr>());
        assert!(crate::translate(&call, &TranslationSettings::default()).is_err());
    }

    #[test]
    fn test_missing_type_arguments_are_rejected() {
        let mut create = MethodInfo::static_method(helper(), "Create").returns(Type::object());
        create.generic_params.push("T".to_string());
        let call = Expr::static_call(create, std::iter::empty::<Expr>());
        let err = crate::translate(&call, &TranslationSettings::default()).unwrap_err();
        assert!(matches!(err, crate::TranslateError::InvalidNodeShape { .. }));
    }

    #[test]
    fn test_extension_call_needs_receiver() {
        let any = MethodInfo::extension(Type::named("System.Linq", "Enumerable"), "Any")
            .returns(Type::bool());
        let call = Expr::static_call(any, std::iter::empty::<Expr>());
        assert!(crate::translate(&call, &TranslationSettings::default()).is_err());
    }

    #[test]
    fn test_string_concat() {
        let name = Variable::new("name", Type::string());
        let count = Variable::new("count", Type::int());
        let to_string = MethodInfo::instance(Type::int(), "ToString").returns(Type::string());
        let concat = MethodInfo::static_method(Type::string(), "Concat")
            .param("str0", Type::string())
            .param("str1", Type::string())
            .param("str2", Type::string())
            .returns(Type::string());
        let call = Expr::static_call(
            concat,
            [
                Expr::variable(&name),
                Expr::constant(": "),
                Expr::call(Expr::variable(&count), to_string, std::iter::empty::<Expr>()),
            ],
        );
        assert_snapshot!(render(&call), @r#"(name + ": " + count)"#);
    }

    #[test]
    fn test_indexer_accessors() {
        let p = Variable::new("p", helper());
        let index = Variable::new("index", Type::int());
        let get_item = MethodInfo::instance(helper(), "get_Item")
            .param("index", Type::int())
            .returns(Type::string())
            .getter_of("Item", 1);
        let get = Expr::call(Expr::variable(&p), get_item, [Expr::variable(&index)]);
        assert_snapshot!(render(&get), @"p[index]");

        let set_item = MethodInfo::instance(helper(), "set_Item")
            .param("index", Type::int())
            .param("value", Type::string())
            .setter_of("Item", 1);
        let set = Expr::call(
            Expr::variable(&p),
            set_item,
            [Expr::variable(&index), Expr::constant("x")],
        );
        assert_snapshot!(render(&set), @r#"p[index] = "x""#);
    }

    #[test]
    fn test_method_call_chain() {
        let builder_type = Type::named("System.Text", "StringBuilder");
        let sb = Variable::new("sb", builder_type.clone());
        let append = |subject: Expr, text: &str| {
            let method = MethodInfo::instance(builder_type.clone(), "Append")
                .param("value", Type::string())
                .returns(builder_type.clone());
            Expr::call(subject, method, [Expr::constant(text)])
        };
        let chain = append(append(append(Expr::variable(&sb), "a"), "b"), "c");
        assert_eq!(
            render(&chain),
            "sb.Append(\"a\")\n    .Append(\"b\")\n    .Append(\"c\")"
        );
    }

    #[test]
    fn test_invoke() {
        let x = Variable::new("x", Type::int());
        let square = Expr::lambda(&[x.clone()], Expr::multiply(Expr::variable(&x), Expr::variable(&x)));
        let invoke = Expr::invoke(square, [Expr::constant(3)]);
        assert_snapshot!(render(&invoke), @"(x => x * x).Invoke(3)");

        let action = Variable::new("action", Type::func(vec![], Type::Void));
        let invoke = Expr::invoke(Expr::variable(&action), std::iter::empty::<Expr>());
        assert_snapshot!(render(&invoke), @"action.Invoke()");
    }
}
