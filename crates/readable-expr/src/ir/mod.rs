//! Expression tree model.
//!
//! An [`Expr`] is an immutable tagged union. Children are reference counted
//! so a caller can share one sub-node between several parents; the engine
//! never mutates a tree and never stores parent links on nodes.

mod build;
mod members;
mod ops;
mod types;

pub use members::{
    CapturedObject, Label, MemberInfo, MethodInfo, MethodKind, ParamModifier, Parameter,
    PropertyAccessor, Variable,
};
pub use ops::{AssignOp, BinaryOp, UnaryOp};
pub use types::{NamedType, Type, keyword_alias};

use crate::traits::ExtensionNode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The dispatch key of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Constant,
    Variable,
    Binary(BinaryOp),
    Unary(UnaryOp),
    Assign(AssignOp),
    Conditional,
    Call,
    Invoke,
    New,
    NewArray,
    Member,
    Index,
    Lambda,
    Block,
    Loop,
    Break,
    Continue,
    Return,
    Default,
    Extension,
}

impl NodeKind {
    /// Every kind, with one entry per operator.
    pub fn all() -> Vec<NodeKind> {
        let mut kinds = vec![
            NodeKind::Constant,
            NodeKind::Variable,
            NodeKind::Conditional,
            NodeKind::Call,
            NodeKind::Invoke,
            NodeKind::New,
            NodeKind::NewArray,
            NodeKind::Member,
            NodeKind::Index,
            NodeKind::Lambda,
            NodeKind::Block,
            NodeKind::Loop,
            NodeKind::Break,
            NodeKind::Continue,
            NodeKind::Return,
            NodeKind::Default,
            NodeKind::Extension,
        ];
        kinds.extend(BinaryOp::ALL.map(NodeKind::Binary));
        kinds.extend(UnaryOp::ALL.map(NodeKind::Unary));
        kinds.extend(AssignOp::ALL.map(NodeKind::Assign));
        kinds
    }
}

/// A constant value.
#[derive(Debug, Clone)]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Decimal literal digits, e.g. `"1.5"`.
    Decimal(String),
    Char(char),
    String(String),
    /// `typeof(T)`
    Type(Type),
    /// An enum member, rendered `Type.Member`.
    Enum { ty: Type, member: String },
    /// An object captured by a closure.
    Captured(Arc<CapturedObject>),
}

impl ConstantValue {
    /// The natural type of the value.
    pub fn ty(&self) -> Type {
        match self {
            ConstantValue::Null => Type::object(),
            ConstantValue::Bool(_) => Type::bool(),
            ConstantValue::Int(_) => Type::int(),
            ConstantValue::Long(_) => Type::long(),
            ConstantValue::Float(_) => Type::float(),
            ConstantValue::Double(_) => Type::double(),
            ConstantValue::Decimal(_) => Type::decimal(),
            ConstantValue::Char(_) => Type::char(),
            ConstantValue::String(_) => Type::string(),
            ConstantValue::Type(_) => Type::system("Type"),
            ConstantValue::Enum { ty, .. } => ty.clone(),
            ConstantValue::Captured(captured) => captured.ty.clone(),
        }
    }
}

impl From<bool> for ConstantValue {
    fn from(value: bool) -> Self {
        ConstantValue::Bool(value)
    }
}

impl From<i32> for ConstantValue {
    fn from(value: i32) -> Self {
        ConstantValue::Int(value)
    }
}

impl From<i64> for ConstantValue {
    fn from(value: i64) -> Self {
        ConstantValue::Long(value)
    }
}

impl From<f32> for ConstantValue {
    fn from(value: f32) -> Self {
        ConstantValue::Float(value)
    }
}

impl From<f64> for ConstantValue {
    fn from(value: f64) -> Self {
        ConstantValue::Double(value)
    }
}

impl From<char> for ConstantValue {
    fn from(value: char) -> Self {
        ConstantValue::Char(value)
    }
}

impl From<&str> for ConstantValue {
    fn from(value: &str) -> Self {
        ConstantValue::String(value.to_string())
    }
}

impl From<String> for ConstantValue {
    fn from(value: String) -> Self {
        ConstantValue::String(value)
    }
}

/// An expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    Constant {
        value: ConstantValue,
        ty: Type,
    },
    Variable(Arc<Variable>),
    Binary {
        op: BinaryOp,
        left: Arc<Expr>,
        right: Arc<Expr>,
        ty: Type,
    },
    Unary {
        op: UnaryOp,
        operand: Arc<Expr>,
        ty: Type,
    },
    Assign {
        op: AssignOp,
        target: Arc<Expr>,
        value: Arc<Expr>,
    },
    Conditional {
        test: Arc<Expr>,
        if_true: Arc<Expr>,
        if_false: Arc<Expr>,
        ty: Type,
    },
    MethodCall {
        /// Instance receiver; `None` for static and extension calls.
        subject: Option<Arc<Expr>>,
        method: Arc<MethodInfo>,
        args: Vec<Arc<Expr>>,
    },
    /// Delegate invocation.
    Invoke {
        target: Arc<Expr>,
        args: Vec<Arc<Expr>>,
        ty: Type,
    },
    New {
        ty: Type,
        constructor: Option<Arc<MethodInfo>>,
        args: Vec<Arc<Expr>>,
    },
    NewArray {
        element: Type,
        items: Vec<Arc<Expr>>,
    },
    Member {
        /// Instance receiver; `None` for static members.
        subject: Option<Arc<Expr>>,
        member: MemberInfo,
    },
    Index {
        subject: Arc<Expr>,
        indices: Vec<Arc<Expr>>,
        ty: Type,
    },
    Lambda {
        params: Vec<Arc<Variable>>,
        body: Arc<Expr>,
        /// Delegate type, e.g. `Func<int, int>`.
        ty: Type,
    },
    Block {
        locals: Vec<Arc<Variable>>,
        statements: Vec<Arc<Expr>>,
        ty: Type,
    },
    /// An infinite loop left through `break`/`return`.
    Loop {
        body: Option<Arc<Expr>>,
        break_label: Option<Arc<Label>>,
        continue_label: Option<Arc<Label>>,
    },
    Break {
        target: Arc<Label>,
    },
    Continue {
        target: Arc<Label>,
    },
    Return {
        target: Option<Arc<Label>>,
        value: Option<Arc<Expr>>,
    },
    /// `default(T)`; renders nothing when `T` is void.
    Default(Type),
    Extension(Arc<dyn ExtensionNode>),
}

impl Expr {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expr::Constant { .. } => NodeKind::Constant,
            Expr::Variable(_) => NodeKind::Variable,
            Expr::Binary { op, .. } => NodeKind::Binary(*op),
            Expr::Unary { op, .. } => NodeKind::Unary(*op),
            Expr::Assign { op, .. } => NodeKind::Assign(*op),
            Expr::Conditional { .. } => NodeKind::Conditional,
            Expr::MethodCall { .. } => NodeKind::Call,
            Expr::Invoke { .. } => NodeKind::Invoke,
            Expr::New { .. } => NodeKind::New,
            Expr::NewArray { .. } => NodeKind::NewArray,
            Expr::Member { .. } => NodeKind::Member,
            Expr::Index { .. } => NodeKind::Index,
            Expr::Lambda { .. } => NodeKind::Lambda,
            Expr::Block { .. } => NodeKind::Block,
            Expr::Loop { .. } => NodeKind::Loop,
            Expr::Break { .. } => NodeKind::Break,
            Expr::Continue { .. } => NodeKind::Continue,
            Expr::Return { .. } => NodeKind::Return,
            Expr::Default(_) => NodeKind::Default,
            Expr::Extension(_) => NodeKind::Extension,
        }
    }

    /// Static result type.
    pub fn ty(&self) -> Type {
        match self {
            Expr::Constant { ty, .. }
            | Expr::Binary { ty, .. }
            | Expr::Unary { ty, .. }
            | Expr::Conditional { ty, .. }
            | Expr::Invoke { ty, .. }
            | Expr::New { ty, .. }
            | Expr::Index { ty, .. }
            | Expr::Lambda { ty, .. }
            | Expr::Block { ty, .. }
            | Expr::Default(ty) => ty.clone(),
            Expr::Variable(variable) => variable.ty.clone(),
            Expr::Assign { target, .. } => target.ty(),
            Expr::MethodCall { method, .. } => method.return_type.clone(),
            Expr::NewArray { element, .. } => Type::array_of(element.clone()),
            Expr::Member { member, .. } => member.ty.clone(),
            Expr::Loop { break_label, .. } => break_label
                .as_ref()
                .map(|label| label.ty.clone())
                .unwrap_or(Type::Void),
            Expr::Break { .. } | Expr::Continue { .. } | Expr::Return { .. } => Type::Void,
            Expr::Extension(node) => node.ty(),
        }
    }

    /// Whether this is `default(void)`, the empty expression.
    pub fn is_empty(&self) -> bool {
        matches!(self, Expr::Default(ty) if ty.is_void())
    }

    /// The captured closure object this constant refers to, if any.
    pub fn captured_object(&self) -> Option<&Arc<CapturedObject>> {
        match self {
            Expr::Constant {
                value: ConstantValue::Captured(object),
                ..
            } => Some(object),
            _ => None,
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured_object().is_some()
    }

    /// Renders this tree with default settings.
    pub fn to_readable_string(&self) -> Result<String, crate::TranslateError> {
        crate::translate(self, &crate::TranslationSettings::default())
    }
}
