//! Display names for variables and captured values.
//!
//! Explicit names are used as written. Unnamed variables and
//! compiler-synthesized identifiers (`<x>5__1`, `CS$<>8__locals1`) get a
//! generated name, unique within one translation call.

use crate::ir::{CapturedObject, Expr, Type, Variable, keyword_alias};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

const KEYWORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Whether `name` was generated by a compiler rather than written by a person.
pub fn is_synthesized(name: &str) -> bool {
    name.contains(['<', '>', '$'])
}

fn not_keyword(name: &str) -> String {
    if is_keyword(name) {
        format!("{name}Value")
    } else {
        name.to_string()
    }
}

/// Readable replacement for a synthesized identifier: the text inside the
/// first `<...>`, else the text after the last `__`.
pub fn surrogate(name: &str) -> Option<String> {
    if let Some(start) = name.find('<') {
        let rest = &name[start + 1..];
        if let Some(end) = rest.find('>') {
            let inner = &rest[..end];
            if !inner.is_empty() {
                return Some(not_keyword(inner));
            }
        }
    }
    let (_, tail) = name.rsplit_once("__")?;
    if tail.is_empty() {
        return None;
    }
    Some(not_keyword(tail))
}

fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn base_name(ty: &Type) -> String {
    match ty {
        Type::Void => "void".to_string(),
        Type::Named(named) => match keyword_alias(named) {
            Some(keyword) => keyword.to_string(),
            None => camel_case(&surrogate(&named.name).unwrap_or_else(|| named.name.clone())),
        },
        Type::Array { element, .. } => format!("{}Array", base_name(element)),
        Type::Nullable(inner) | Type::ByRef(inner) => base_name(inner),
        Type::GenericParam(name) => camel_case(name),
    }
}

/// Name derived from a type: `intValue`, `intArray`, `stringBuilder`.
pub fn type_derived_name(ty: &Type) -> String {
    not_keyword(&base_name(ty))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NameKey {
    Variable(*const Variable),
    Captured(*const CapturedObject),
    CapturedMember(*const CapturedObject, String),
}

/// Variable identity to display name, for one translation call.
#[derive(Debug, Default)]
pub struct NameTable {
    assigned: HashMap<NameKey, String>,
    taken: HashSet<String>,
}

impl NameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks every explicit name in the tree as taken, so generated names
    /// never shadow one that appears later in the output.
    pub fn reserve_names_in(&mut self, root: &Expr) {
        let mut stack = vec![root];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Variable(variable) => self.reserve(variable),
                Expr::Lambda { params, .. } => params.iter().for_each(|p| self.reserve(p)),
                Expr::Block { locals, .. } => locals.iter().for_each(|l| self.reserve(l)),
                Expr::Member {
                    subject: Some(subject),
                    member,
                } if subject.is_captured() && !is_synthesized(&member.name) => {
                    self.taken.insert(member.name.clone());
                }
                _ => {}
            }
            stack.extend(children(expr));
        }
    }

    fn reserve(&mut self, variable: &Variable) {
        if let Some(name) = variable.name.as_deref().filter(|n| !is_synthesized(n)) {
            self.taken.insert(name.to_string());
        }
    }

    pub fn variable_name(&mut self, variable: &Arc<Variable>) -> String {
        let key = NameKey::Variable(Arc::as_ptr(variable));
        if let Some(name) = self.assigned.get(&key) {
            return name.clone();
        }
        let name = match variable.name.as_deref() {
            Some(name) if !is_synthesized(name) => {
                self.taken.insert(name.to_string());
                name.to_string()
            }
            Some(name) => {
                let base = surrogate(name).unwrap_or_else(|| type_derived_name(&variable.ty));
                self.claim(&base)
            }
            None => self.claim(&type_derived_name(&variable.ty)),
        };
        self.assigned.insert(key, name.clone());
        name
    }

    /// Name of a captured object referenced on its own.
    pub fn captured_name(&mut self, object: &Arc<CapturedObject>) -> String {
        let key = NameKey::Captured(Arc::as_ptr(object));
        if let Some(name) = self.assigned.get(&key) {
            return name.clone();
        }
        let name = self.claim(&type_derived_name(&object.ty));
        self.assigned.insert(key, name.clone());
        name
    }

    /// Name of a field or property read from a captured object.
    pub fn captured_member_name(&mut self, object: &Arc<CapturedObject>, member: &str) -> String {
        if !is_synthesized(member) {
            return member.to_string();
        }
        let key = NameKey::CapturedMember(Arc::as_ptr(object), member.to_string());
        if let Some(name) = self.assigned.get(&key) {
            return name.clone();
        }
        let base = surrogate(member).unwrap_or_else(|| type_derived_name(&object.ty));
        let name = self.claim(&base);
        self.assigned.insert(key, name.clone());
        name
    }

    fn claim(&mut self, base: &str) -> String {
        if self.taken.insert(base.to_string()) {
            return base.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{base}{suffix}");
            if self.taken.insert(candidate.clone()) {
                tracing::debug!(base, name = %candidate, "renamed colliding generated name");
                return candidate;
            }
            suffix += 1;
        }
    }
}

/// Direct child nodes, in source order.
pub(crate) fn children(expr: &Expr) -> Vec<&Expr> {
    let mut out: Vec<&Expr> = Vec::new();
    match expr {
        Expr::Constant { .. }
        | Expr::Variable(_)
        | Expr::Break { .. }
        | Expr::Continue { .. }
        | Expr::Default(_)
        | Expr::Extension(_) => {}
        Expr::Binary { left, right, .. } => out.extend([left.as_ref(), right.as_ref()]),
        Expr::Unary { operand, .. } => out.push(operand),
        Expr::Assign { target, value, .. } => out.extend([target.as_ref(), value.as_ref()]),
        Expr::Conditional {
            test,
            if_true,
            if_false,
            ..
        } => out.extend([test.as_ref(), if_true.as_ref(), if_false.as_ref()]),
        Expr::MethodCall { subject, args, .. } => {
            out.extend(subject.as_deref());
            out.extend(args.iter().map(|a| a.as_ref()));
        }
        Expr::Invoke { target, args, .. } => {
            out.push(target);
            out.extend(args.iter().map(|a| a.as_ref()));
        }
        Expr::New { args, .. } => out.extend(args.iter().map(|a| a.as_ref())),
        Expr::NewArray { items, .. } => out.extend(items.iter().map(|a| a.as_ref())),
        Expr::Member { subject, .. } => out.extend(subject.as_deref()),
        Expr::Index {
            subject, indices, ..
        } => {
            out.push(subject);
            out.extend(indices.iter().map(|a| a.as_ref()));
        }
        Expr::Lambda { body, .. } => out.push(body),
        Expr::Block { statements, .. } => out.extend(statements.iter().map(|s| s.as_ref())),
        Expr::Loop { body, .. } => out.extend(body.as_deref()),
        Expr::Return { value, .. } => out.extend(value.as_deref()),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surrogates() {
        assert_eq!(surrogate("<x>5__1").as_deref(), Some("x"));
        assert_eq!(surrogate("CS$<>8__locals1").as_deref(), Some("locals1"));
        assert_eq!(surrogate("<>4__this").as_deref(), Some("thisValue"));
        assert_eq!(surrogate("<>c"), None);
    }

    #[test]
    fn test_type_derived_names() {
        assert_eq!(type_derived_name(&Type::int()), "intValue");
        assert_eq!(type_derived_name(&Type::array_of(Type::int())), "intArray");
        assert_eq!(
            type_derived_name(&Type::named("System.Text", "StringBuilder")),
            "stringBuilder"
        );
        assert_eq!(type_derived_name(&Type::nullable(Type::long())), "longValue");
    }

    #[test]
    fn test_generated_names_are_unique_and_stable() {
        let mut table = NameTable::new();
        let first = Variable::unnamed(Type::int());
        let second = Variable::unnamed(Type::int());
        assert_eq!(table.variable_name(&first), "intValue");
        assert_eq!(table.variable_name(&second), "intValue2");
        assert_eq!(table.variable_name(&first), "intValue");
    }

    #[test]
    fn test_generated_names_avoid_reserved_names() {
        let explicit = Variable::new("intValue", Type::int());
        let unnamed = Variable::unnamed(Type::int());
        let tree = Expr::add(Expr::variable(&unnamed), Expr::variable(&explicit));

        let mut table = NameTable::new();
        table.reserve_names_in(&tree);
        assert_eq!(table.variable_name(&unnamed), "intValue2");
        assert_eq!(table.variable_name(&explicit), "intValue");
    }

    #[test]
    fn test_synthesized_variable_names() {
        let mut table = NameTable::new();
        let hoisted = Variable::new("<x>5__1", Type::int());
        assert_eq!(table.variable_name(&hoisted), "x");

        let captured = CapturedObject::new(Type::named("", "<>c__DisplayClass0_0"));
        assert_eq!(table.captured_member_name(&captured, "comparator"), "comparator");
        assert_eq!(table.captured_member_name(&captured, "<>4__this"), "thisValue");
        assert_eq!(table.captured_name(&captured), "displayClass0_0");
    }
}
