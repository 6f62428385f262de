//! Text helpers shared by translators: indentation, parentheses, statement
//! termination, comments and the operator tables.

use crate::ir::{AssignOp, BinaryOp};

const TERMINATORS: [char; 4] = [';', '}', ':', ','];
const COMMENT: &str = "// ";

/// Prefixes every non-empty line of `text` with `indent`.
pub fn indented(text: &str, indent: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{indent}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn is_multi_line(text: &str) -> bool {
    text.contains('\n')
}

/// Whether `text` is wrapped in one pair of parentheses that match each
/// other, so `(a + b)` is a group but `(a + b).X()` and `(int)x` are not.
pub fn is_group(text: &str) -> bool {
    if !text.starts_with('(') || !text.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let last = text.len() - 1;
    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == last;
                }
            }
            _ => {}
        }
    }
    false
}

/// Removes one enclosing group, if there is one.
pub fn without_parens(text: &str) -> &str {
    if is_group(text) {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Wraps `text` in parentheses unless it is already a group.
pub fn with_parens(text: &str) -> String {
    if is_group(text) {
        text.to_string()
    } else {
        format!("({text})")
    }
}

pub fn is_comment(text: &str) -> bool {
    text.trim_start().starts_with(COMMENT)
}

/// Whether a statement needs no trailing `;`.
pub fn is_terminated(text: &str) -> bool {
    text.ends_with(&TERMINATORS[..]) || text.rsplit('\n').next().is_some_and(is_comment)
}

pub fn terminated(text: &str) -> String {
    if text.is_empty() || is_terminated(text) {
        text.to_string()
    } else {
        format!("{text};")
    }
}

pub fn unterminated(text: &str) -> &str {
    text.strip_suffix(';').unwrap_or(text)
}

/// Renders `text` as `//` comment lines.
pub fn as_comment(text: &str) -> String {
    let mut out = String::new();
    for (i, line) in text.trim().split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(COMMENT);
        out.push_str(line.trim_end());
    }
    out
}

pub fn binary_symbol(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add | BinaryOp::AddChecked => "+",
        BinaryOp::Subtract | BinaryOp::SubtractChecked => "-",
        BinaryOp::Multiply | BinaryOp::MultiplyChecked => "*",
        BinaryOp::Divide => "/",
        BinaryOp::Modulo => "%",
        BinaryOp::Power => "**",
        BinaryOp::And => "&",
        BinaryOp::Or => "|",
        BinaryOp::ExclusiveOr => "^",
        BinaryOp::AndAlso => "&&",
        BinaryOp::OrElse => "||",
        BinaryOp::LeftShift => "<<",
        BinaryOp::RightShift => ">>",
        BinaryOp::Equal => "==",
        BinaryOp::NotEqual => "!=",
        BinaryOp::LessThan => "<",
        BinaryOp::LessThanOrEqual => "<=",
        BinaryOp::GreaterThan => ">",
        BinaryOp::GreaterThanOrEqual => ">=",
        BinaryOp::Coalesce => "??",
    }
}

pub fn assign_symbol(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign | AssignOp::AddAssignChecked => "+=",
        AssignOp::SubtractAssign | AssignOp::SubtractAssignChecked => "-=",
        AssignOp::MultiplyAssign | AssignOp::MultiplyAssignChecked => "*=",
        AssignOp::DivideAssign => "/=",
        AssignOp::ModuloAssign => "%=",
        AssignOp::PowerAssign => "**=",
        AssignOp::AndAssign => "&=",
        AssignOp::OrAssign => "|=",
        AssignOp::ExclusiveOrAssign => "^=",
        AssignOp::LeftShiftAssign => "<<=",
        AssignOp::RightShiftAssign => ">>=",
    }
}

/// Binding strength; higher binds tighter.
pub fn precedence(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Power => 14,
        BinaryOp::Multiply | BinaryOp::MultiplyChecked | BinaryOp::Divide | BinaryOp::Modulo => 13,
        BinaryOp::Add | BinaryOp::AddChecked | BinaryOp::Subtract | BinaryOp::SubtractChecked => {
            12
        }
        BinaryOp::LeftShift | BinaryOp::RightShift => 11,
        BinaryOp::LessThan
        | BinaryOp::LessThanOrEqual
        | BinaryOp::GreaterThan
        | BinaryOp::GreaterThanOrEqual => 10,
        BinaryOp::Equal | BinaryOp::NotEqual => 9,
        BinaryOp::And => 8,
        BinaryOp::ExclusiveOr => 7,
        BinaryOp::Or => 6,
        BinaryOp::AndAlso => 5,
        BinaryOp::OrElse => 4,
        BinaryOp::Coalesce => 3,
    }
}

pub fn is_right_associative(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Power | BinaryOp::Coalesce)
}

/// Whether a binary operand keeps its parentheses inside a binary parent.
pub fn operand_needs_parens(parent: BinaryOp, child: BinaryOp, right_side: bool) -> bool {
    let (outer, inner) = (precedence(parent), precedence(child));
    if inner != outer {
        return inner < outer;
    }
    let same_op = parent.unchecked() == child.unchecked();
    !(same_op && right_side == is_right_associative(parent))
}
