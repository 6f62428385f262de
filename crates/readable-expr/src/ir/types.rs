//! Type descriptors.
//!
//! Every node carries a static result type. The engine only inspects types to
//! make layout decisions (void vs value, integral `Not`, generic inference)
//! and hands them to a [`NameResolver`](crate::NameResolver) for display.

use serde::{Deserialize, Serialize};

const SYSTEM: &str = "System";

/// A named, possibly generic, type such as `System.Collections.Generic.List<int>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamedType {
    /// Dotted namespace (e.g. `System.Text`). `None` for the global namespace.
    pub namespace: Option<String>,
    /// Simple name without any arity suffix (e.g. `List`).
    pub name: String,
    /// Type arguments of a constructed generic type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<Type>,
}

impl NamedType {
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }
}

/// A type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Void,
    Named(NamedType),
    /// `element[]`, `element[,]` for rank 2, and so on.
    Array { element: Box<Type>, rank: usize },
    /// `inner?`
    Nullable(Box<Type>),
    /// An open generic parameter such as `T` in a method definition.
    GenericParam(String),
    /// A by-reference parameter type (`ref`/`out` parameters).
    ByRef(Box<Type>),
}

impl Type {
    pub fn named(namespace: &str, name: &str) -> Self {
        Self::generic(namespace, name, Vec::new())
    }

    pub fn generic(namespace: &str, name: &str, args: Vec<Type>) -> Self {
        Type::Named(NamedType {
            namespace: (!namespace.is_empty()).then(|| namespace.to_string()),
            name: name.to_string(),
            args,
        })
    }

    pub fn system(name: &str) -> Self {
        Self::named(SYSTEM, name)
    }

    pub fn bool() -> Self {
        Self::system("Boolean")
    }

    pub fn char() -> Self {
        Self::system("Char")
    }

    pub fn int() -> Self {
        Self::system("Int32")
    }

    pub fn long() -> Self {
        Self::system("Int64")
    }

    pub fn float() -> Self {
        Self::system("Single")
    }

    pub fn double() -> Self {
        Self::system("Double")
    }

    pub fn decimal() -> Self {
        Self::system("Decimal")
    }

    pub fn string() -> Self {
        Self::system("String")
    }

    pub fn object() -> Self {
        Self::system("Object")
    }

    pub fn array_of(element: Type) -> Self {
        Type::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn nullable(inner: Type) -> Self {
        Type::Nullable(Box::new(inner))
    }

    pub fn param(name: &str) -> Self {
        Type::GenericParam(name.to_string())
    }

    pub fn by_ref(inner: Type) -> Self {
        Type::ByRef(Box::new(inner))
    }

    /// Delegate type for a lambda: `Func<params.., ret>`, or `Action<params..>`
    /// when `ret` is void.
    pub fn func(params: Vec<Type>, ret: Type) -> Self {
        if ret.is_void() {
            Self::generic(SYSTEM, "Action", params)
        } else {
            let mut args = params;
            args.push(ret);
            Self::generic(SYSTEM, "Func", args)
        }
    }

    pub fn is_void(&self) -> bool {
        match self {
            Type::Void => true,
            Type::Named(named) => named.is(SYSTEM, "Void"),
            _ => false,
        }
    }

    pub fn is_string(&self) -> bool {
        self.is_system("String")
    }

    pub fn is_integral(&self) -> bool {
        match self {
            Type::Named(named) if named.namespace.as_deref() == Some(SYSTEM) => matches!(
                named.name.as_str(),
                "Byte" | "SByte" | "Int16" | "UInt16" | "Int32" | "UInt32" | "Int64" | "UInt64"
            ),
            Type::Nullable(inner) => inner.is_integral(),
            _ => false,
        }
    }

    /// Delegate result type (`Func<.., TResult>` -> `TResult`, `Action<..>` -> void).
    pub fn delegate_result(&self) -> Option<Type> {
        let Type::Named(named) = self else {
            return None;
        };
        if named.is(SYSTEM, "Action") {
            return Some(Type::Void);
        }
        if named.is(SYSTEM, "Func") {
            return named.args.last().cloned();
        }
        None
    }

    fn is_system(&self, name: &str) -> bool {
        matches!(self, Type::Named(named) if named.is(SYSTEM, name))
    }

    /// Calls `visit` for every generic parameter that appears in this type,
    /// including inside constructed generics, arrays, nullables and by-ref
    /// wrappers.
    pub fn for_each_generic_param<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Type::GenericParam(name) => visit(name.as_str()),
            Type::Named(named) => {
                for arg in &named.args {
                    arg.for_each_generic_param(visit);
                }
            }
            Type::Array { element: inner, .. } | Type::Nullable(inner) | Type::ByRef(inner) => {
                inner.for_each_generic_param(visit)
            }
            Type::Void => {}
        }
    }
}

/// C# keyword for a `System` type, if it has one.
pub fn keyword_alias(named: &NamedType) -> Option<&'static str> {
    if named.namespace.as_deref() != Some(SYSTEM) || !named.args.is_empty() {
        return None;
    }
    let keyword = match named.name.as_str() {
        "Boolean" => "bool",
        "Byte" => "byte",
        "SByte" => "sbyte",
        "Char" => "char",
        "Decimal" => "decimal",
        "Double" => "double",
        "Single" => "float",
        "Int16" => "short",
        "UInt16" => "ushort",
        "Int32" => "int",
        "UInt32" => "uint",
        "Int64" => "long",
        "UInt64" => "ulong",
        "Object" => "object",
        "String" => "string",
        "Void" => "void",
        _ => return None,
    };
    Some(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_func_and_action_results() {
        let func = Type::func(vec![Type::int()], Type::string());
        assert_eq!(func.delegate_result(), Some(Type::string()));

        let action = Type::func(vec![Type::int()], Type::Void);
        assert_eq!(action.delegate_result(), Some(Type::Void));
    }

    #[test]
    fn test_generic_params_are_found_through_wrappers() {
        let ty = Type::by_ref(Type::generic(
            "System.Collections.Generic",
            "List",
            vec![Type::array_of(Type::param("T"))],
        ));
        let mut found = Vec::new();
        ty.for_each_generic_param(&mut |name| found.push(name));
        assert_eq!(found, vec!["T"]);
    }

    #[test]
    fn test_integral_types() {
        assert!(Type::int().is_integral());
        assert!(Type::nullable(Type::long()).is_integral());
        assert!(!Type::bool().is_integral());
        assert!(!Type::string().is_integral());
    }
}
