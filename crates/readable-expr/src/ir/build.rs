//! Constructor helpers for building trees in code.
//!
//! Result types are derived from the operands where the node kind allows it;
//! use the explicit-type constructors when the derived type is wrong.

use super::*;
use crate::traits::{Comment, ExtensionNode};
use std::sync::Arc;

type Node = Arc<Expr>;

fn nodes<I, E>(items: I) -> Vec<Node>
where
    I: IntoIterator<Item = E>,
    E: Into<Node>,
{
    items.into_iter().map(Into::into).collect()
}

impl Expr {
    pub fn constant(value: impl Into<ConstantValue>) -> Self {
        let value = value.into();
        let ty = value.ty();
        Expr::Constant { value, ty }
    }

    /// `null` of the given type.
    pub fn null(ty: Type) -> Self {
        Expr::Constant {
            value: ConstantValue::Null,
            ty,
        }
    }

    pub fn type_of(ty: Type) -> Self {
        Self::constant(ConstantValue::Type(ty))
    }

    pub fn enum_member(ty: Type, member: &str) -> Self {
        Self::constant(ConstantValue::Enum {
            ty,
            member: member.to_string(),
        })
    }

    /// A reference to an object captured by a closure.
    pub fn captured(object: &Arc<CapturedObject>) -> Self {
        Self::constant(ConstantValue::Captured(object.clone()))
    }

    pub fn variable(variable: &Arc<Variable>) -> Self {
        Expr::Variable(variable.clone())
    }

    pub fn binary(op: BinaryOp, left: impl Into<Node>, right: impl Into<Node>) -> Self {
        let (left, right) = (left.into(), right.into());
        let ty = if op.is_boolean() {
            Type::bool()
        } else if op == BinaryOp::Coalesce {
            right.ty()
        } else {
            left.ty()
        };
        Expr::Binary {
            op,
            left,
            right,
            ty,
        }
    }

    pub fn add(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::Add, left, right)
    }

    pub fn subtract(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::Subtract, left, right)
    }

    pub fn multiply(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::Multiply, left, right)
    }

    pub fn divide(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::Divide, left, right)
    }

    pub fn equal(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::Equal, left, right)
    }

    pub fn greater_than(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::GreaterThan, left, right)
    }

    pub fn less_than(left: impl Into<Node>, right: impl Into<Node>) -> Self {
        Self::binary(BinaryOp::LessThan, left, right)
    }

    /// A unary operator whose result type is the operand's type.
    pub fn unary(op: UnaryOp, operand: impl Into<Node>) -> Self {
        let operand = operand.into();
        let ty = match op {
            UnaryOp::ArrayLength => Type::int(),
            _ => operand.ty(),
        };
        Expr::Unary { op, operand, ty }
    }

    pub fn negate(operand: impl Into<Node>) -> Self {
        Self::unary(UnaryOp::Negate, operand)
    }

    pub fn not(operand: impl Into<Node>) -> Self {
        Self::unary(UnaryOp::Not, operand)
    }

    pub fn convert(operand: impl Into<Node>, ty: Type) -> Self {
        Expr::Unary {
            op: UnaryOp::Convert,
            operand: operand.into(),
            ty,
        }
    }

    pub fn convert_checked(operand: impl Into<Node>, ty: Type) -> Self {
        Expr::Unary {
            op: UnaryOp::ConvertChecked,
            operand: operand.into(),
            ty,
        }
    }

    pub fn type_as(operand: impl Into<Node>, ty: Type) -> Self {
        Expr::Unary {
            op: UnaryOp::TypeAs,
            operand: operand.into(),
            ty,
        }
    }

    pub fn array_length(array: impl Into<Node>) -> Self {
        Self::unary(UnaryOp::ArrayLength, array)
    }

    pub fn assign(target: impl Into<Node>, value: impl Into<Node>) -> Self {
        Self::assign_op(AssignOp::Assign, target, value)
    }

    pub fn assign_op(op: AssignOp, target: impl Into<Node>, value: impl Into<Node>) -> Self {
        Expr::Assign {
            op,
            target: target.into(),
            value: value.into(),
        }
    }

    /// `test ? if_true : if_false` (or the statement form, depending on `ty`).
    pub fn condition(
        test: impl Into<Node>,
        if_true: impl Into<Node>,
        if_false: impl Into<Node>,
        ty: Type,
    ) -> Self {
        Expr::Conditional {
            test: test.into(),
            if_true: if_true.into(),
            if_false: if_false.into(),
            ty,
        }
    }

    /// A conditional typed by its true branch.
    pub fn conditional(
        test: impl Into<Node>,
        if_true: impl Into<Node>,
        if_false: impl Into<Node>,
    ) -> Self {
        let if_true = if_true.into();
        let ty = if_true.ty();
        Self::condition(test, if_true, if_false, ty)
    }

    /// `if (test) { if_true }` with no else branch.
    pub fn if_then(test: impl Into<Node>, if_true: impl Into<Node>) -> Self {
        Self::condition(test, if_true, Expr::empty(), Type::Void)
    }

    pub fn if_then_else(
        test: impl Into<Node>,
        if_true: impl Into<Node>,
        if_false: impl Into<Node>,
    ) -> Self {
        Self::condition(test, if_true, if_false, Type::Void)
    }

    /// An instance call. Use [`Expr::static_call`] for static and extension methods.
    pub fn call<I, E>(subject: impl Into<Node>, method: MethodInfo, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::MethodCall {
            subject: Some(subject.into()),
            method: Arc::new(method),
            args: nodes(args),
        }
    }

    pub fn static_call<I, E>(method: MethodInfo, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::MethodCall {
            subject: None,
            method: Arc::new(method),
            args: nodes(args),
        }
    }

    /// Invokes a delegate; the result type comes from the delegate's type.
    pub fn invoke<I, E>(target: impl Into<Node>, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        let target = target.into();
        let ty = target.ty().delegate_result().unwrap_or_else(Type::object);
        Expr::Invoke {
            target,
            args: nodes(args),
            ty,
        }
    }

    pub fn new_object<I, E>(ty: Type, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::New {
            ty,
            constructor: None,
            args: nodes(args),
        }
    }

    /// `new T(args)` through a constructor whose signature carries parameter modifiers.
    pub fn new_with<I, E>(ty: Type, constructor: MethodInfo, args: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::New {
            ty,
            constructor: Some(Arc::new(constructor)),
            args: nodes(args),
        }
    }

    pub fn new_array<I, E>(element: Type, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::NewArray {
            element,
            items: nodes(items),
        }
    }

    pub fn member(subject: impl Into<Node>, member: MemberInfo) -> Self {
        Expr::Member {
            subject: Some(subject.into()),
            member,
        }
    }

    pub fn static_member(member: MemberInfo) -> Self {
        Expr::Member {
            subject: None,
            member,
        }
    }

    pub fn index<I, E>(subject: impl Into<Node>, indices: I, ty: Type) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::Index {
            subject: subject.into(),
            indices: nodes(indices),
            ty,
        }
    }

    /// `array[index]`, typed by the array's element type.
    pub fn array_index(array: impl Into<Node>, index: impl Into<Node>) -> Self {
        let array = array.into();
        let ty = match array.ty() {
            Type::Array { element, .. } => *element,
            _ => Type::object(),
        };
        Self::index(array, [index.into()], ty)
    }

    /// A lambda typed as `Func<..>`/`Action<..>` from its parameters and body.
    pub fn lambda(params: &[Arc<Variable>], body: impl Into<Node>) -> Self {
        let body = body.into();
        let ty = Type::func(params.iter().map(|p| p.ty.clone()).collect(), body.ty());
        Self::lambda_typed(params, body, ty)
    }

    pub fn lambda_typed(params: &[Arc<Variable>], body: impl Into<Node>, ty: Type) -> Self {
        Expr::Lambda {
            params: params.to_vec(),
            body: body.into(),
            ty,
        }
    }

    /// A block typed by its last statement.
    pub fn block<I, E>(statements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Self::block_with_locals(&[], statements)
    }

    pub fn block_with_locals<I, E>(locals: &[Arc<Variable>], statements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        let statements = nodes(statements);
        let ty = statements.last().map(|s| s.ty()).unwrap_or(Type::Void);
        Expr::Block {
            locals: locals.to_vec(),
            statements,
            ty,
        }
    }

    /// A block whose value is discarded.
    pub fn void_block<I, E>(locals: &[Arc<Variable>], statements: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Node>,
    {
        Expr::Block {
            locals: locals.to_vec(),
            statements: nodes(statements),
            ty: Type::Void,
        }
    }

    pub fn infinite_loop(body: impl Into<Node>) -> Self {
        Self::loop_with(Some(body.into()), None, None)
    }

    pub fn loop_with(
        body: Option<Node>,
        break_label: Option<&Arc<Label>>,
        continue_label: Option<&Arc<Label>>,
    ) -> Self {
        Expr::Loop {
            body,
            break_label: break_label.cloned(),
            continue_label: continue_label.cloned(),
        }
    }

    pub fn break_to(label: &Arc<Label>) -> Self {
        Expr::Break {
            target: label.clone(),
        }
    }

    pub fn continue_to(label: &Arc<Label>) -> Self {
        Expr::Continue {
            target: label.clone(),
        }
    }

    pub fn return_void() -> Self {
        Expr::Return {
            target: None,
            value: None,
        }
    }

    /// `return` out of the construct that owns `label`.
    pub fn return_to(label: &Arc<Label>) -> Self {
        Expr::Return {
            target: Some(label.clone()),
            value: None,
        }
    }

    pub fn return_value(value: impl Into<Node>) -> Self {
        Expr::Return {
            target: None,
            value: Some(value.into()),
        }
    }

    pub fn default_of(ty: Type) -> Self {
        Expr::Default(ty)
    }

    /// `default(void)`: renders as nothing.
    pub fn empty() -> Self {
        Expr::Default(Type::Void)
    }

    pub fn extension(node: impl ExtensionNode + 'static) -> Self {
        Expr::Extension(Arc::new(node))
    }

    /// A `// text` comment statement.
    pub fn comment(text: &str) -> Self {
        Self::extension(Comment::new(text))
    }
}
