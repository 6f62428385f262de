//! Operator kinds.

use serde::{Deserialize, Serialize};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    AddChecked,
    Subtract,
    SubtractChecked,
    Multiply,
    MultiplyChecked,
    Divide,
    Modulo,
    Power,
    And,
    Or,
    ExclusiveOr,
    AndAlso,
    OrElse,
    LeftShift,
    RightShift,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    Coalesce,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 23] = [
        BinaryOp::Add,
        BinaryOp::AddChecked,
        BinaryOp::Subtract,
        BinaryOp::SubtractChecked,
        BinaryOp::Multiply,
        BinaryOp::MultiplyChecked,
        BinaryOp::Divide,
        BinaryOp::Modulo,
        BinaryOp::Power,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::ExclusiveOr,
        BinaryOp::AndAlso,
        BinaryOp::OrElse,
        BinaryOp::LeftShift,
        BinaryOp::RightShift,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::LessThan,
        BinaryOp::LessThanOrEqual,
        BinaryOp::GreaterThan,
        BinaryOp::GreaterThanOrEqual,
        BinaryOp::Coalesce,
    ];

    pub fn is_checked(self) -> bool {
        matches!(
            self,
            BinaryOp::AddChecked | BinaryOp::SubtractChecked | BinaryOp::MultiplyChecked
        )
    }

    /// The operator with any overflow check removed.
    pub fn unchecked(self) -> Self {
        match self {
            BinaryOp::AddChecked => BinaryOp::Add,
            BinaryOp::SubtractChecked => BinaryOp::Subtract,
            BinaryOp::MultiplyChecked => BinaryOp::Multiply,
            other => other,
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self.unchecked(),
            BinaryOp::Add
                | BinaryOp::Subtract
                | BinaryOp::Multiply
                | BinaryOp::Divide
                | BinaryOp::Modulo
                | BinaryOp::Power
        )
    }

    /// Comparison and logical operators produce `bool`.
    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::LessThan
                | BinaryOp::LessThanOrEqual
                | BinaryOp::GreaterThan
                | BinaryOp::GreaterThanOrEqual
                | BinaryOp::AndAlso
                | BinaryOp::OrElse
        )
    }
}

/// Assignment operators, plain and compound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignOp {
    Assign,
    AddAssign,
    AddAssignChecked,
    SubtractAssign,
    SubtractAssignChecked,
    MultiplyAssign,
    MultiplyAssignChecked,
    DivideAssign,
    ModuloAssign,
    PowerAssign,
    AndAssign,
    OrAssign,
    ExclusiveOrAssign,
    LeftShiftAssign,
    RightShiftAssign,
}

impl AssignOp {
    pub const ALL: [AssignOp; 15] = [
        AssignOp::Assign,
        AssignOp::AddAssign,
        AssignOp::AddAssignChecked,
        AssignOp::SubtractAssign,
        AssignOp::SubtractAssignChecked,
        AssignOp::MultiplyAssign,
        AssignOp::MultiplyAssignChecked,
        AssignOp::DivideAssign,
        AssignOp::ModuloAssign,
        AssignOp::PowerAssign,
        AssignOp::AndAssign,
        AssignOp::OrAssign,
        AssignOp::ExclusiveOrAssign,
        AssignOp::LeftShiftAssign,
        AssignOp::RightShiftAssign,
    ];
}

/// Unary operators, including conversions and increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    Negate,
    NegateChecked,
    UnaryPlus,
    Not,
    OnesComplement,
    Increment,
    Decrement,
    PreIncrementAssign,
    PreDecrementAssign,
    PostIncrementAssign,
    PostDecrementAssign,
    Convert,
    ConvertChecked,
    TypeAs,
    ArrayLength,
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 15] = [
        UnaryOp::Negate,
        UnaryOp::NegateChecked,
        UnaryOp::UnaryPlus,
        UnaryOp::Not,
        UnaryOp::OnesComplement,
        UnaryOp::Increment,
        UnaryOp::Decrement,
        UnaryOp::PreIncrementAssign,
        UnaryOp::PreDecrementAssign,
        UnaryOp::PostIncrementAssign,
        UnaryOp::PostDecrementAssign,
        UnaryOp::Convert,
        UnaryOp::ConvertChecked,
        UnaryOp::TypeAs,
        UnaryOp::ArrayLength,
    ];

    pub fn is_checked(self) -> bool {
        matches!(self, UnaryOp::NegateChecked | UnaryOp::ConvertChecked)
    }

    pub fn is_convert(self) -> bool {
        matches!(self, UnaryOp::Convert | UnaryOp::ConvertChecked)
    }
}
