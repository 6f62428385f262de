//! Variables, labels and member signatures referenced by nodes.

use super::types::Type;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A parameter or block-local variable.
///
/// Identity is the `Arc` allocation: two `Variable`s with the same name are
/// still distinct variables.
#[derive(Debug)]
pub struct Variable {
    /// Declared name. `None` for unnamed variables.
    pub name: Option<String>,
    pub ty: Type,
}

impl Variable {
    pub fn new(name: &str, ty: Type) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.to_string()),
            ty,
        })
    }

    pub fn unnamed(ty: Type) -> Arc<Self> {
        Arc::new(Self { name: None, ty })
    }
}

/// A jump target for `break`, `continue` and `return`.
#[derive(Debug)]
pub struct Label {
    pub name: Option<String>,
    pub ty: Type,
}

impl Label {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            name: None,
            ty: Type::Void,
        })
    }

    pub fn named(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: Some(name.to_string()),
            ty: Type::Void,
        })
    }
}

/// An opaque object captured by a closure (a display class or `this`).
#[derive(Debug)]
pub struct CapturedObject {
    pub ty: Type,
}

impl CapturedObject {
    pub fn new(ty: Type) -> Arc<Self> {
        Arc::new(Self { ty })
    }
}

/// How an argument is passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamModifier {
    #[default]
    Value,
    Ref,
    Out,
    /// Variadic trailing array parameter.
    Params,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared type; may mention the method's generic parameters.
    pub ty: Type,
    #[serde(default)]
    pub modifier: ParamModifier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Instance,
    Static,
    /// Static method whose first argument is the syntactic receiver.
    Extension,
}

/// Marks a method as the get/set accessor of a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyAccessor {
    pub property: String,
    /// Number of index parameters; zero for ordinary properties.
    pub index_params: usize,
    pub is_setter: bool,
}

/// Method signature data: parameter modifiers and generic parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub declaring_type: Type,
    pub kind: MethodKind,
    pub params: Vec<Parameter>,
    pub return_type: Type,
    /// Generic parameter names of the method definition, e.g. `["TValue", "TResult"]`.
    #[serde(default)]
    pub generic_params: Vec<String>,
    /// Type arguments of this constructed method, parallel to `generic_params`.
    #[serde(default)]
    pub generic_args: Vec<Type>,
    #[serde(default)]
    pub accessor: Option<PropertyAccessor>,
}

impl MethodInfo {
    fn with_kind(declaring_type: Type, name: &str, kind: MethodKind) -> Self {
        Self {
            name: name.to_string(),
            declaring_type,
            kind,
            params: Vec::new(),
            return_type: Type::Void,
            generic_params: Vec::new(),
            generic_args: Vec::new(),
            accessor: None,
        }
    }

    pub fn instance(declaring_type: Type, name: &str) -> Self {
        Self::with_kind(declaring_type, name, MethodKind::Instance)
    }

    pub fn static_method(declaring_type: Type, name: &str) -> Self {
        Self::with_kind(declaring_type, name, MethodKind::Static)
    }

    pub fn extension(declaring_type: Type, name: &str) -> Self {
        Self::with_kind(declaring_type, name, MethodKind::Extension)
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.return_type = ty;
        self
    }

    fn push_param(mut self, name: &str, ty: Type, modifier: ParamModifier) -> Self {
        self.params.push(Parameter {
            name: name.to_string(),
            ty,
            modifier,
        });
        self
    }

    pub fn param(self, name: &str, ty: Type) -> Self {
        self.push_param(name, ty, ParamModifier::Value)
    }

    pub fn ref_param(self, name: &str, ty: Type) -> Self {
        self.push_param(name, Type::by_ref(ty), ParamModifier::Ref)
    }

    pub fn out_param(self, name: &str, ty: Type) -> Self {
        self.push_param(name, Type::by_ref(ty), ParamModifier::Out)
    }

    /// A `params T[]` parameter; `element` is the array element type.
    pub fn params_param(self, name: &str, element: Type) -> Self {
        self.push_param(name, Type::array_of(element), ParamModifier::Params)
    }

    /// Declares generic parameters together with the type arguments the
    /// method was constructed with.
    pub fn generic(mut self, params: &[(&str, Type)]) -> Self {
        for (name, arg) in params {
            self.generic_params.push(name.to_string());
            self.generic_args.push(arg.clone());
        }
        self
    }

    pub fn getter_of(mut self, property: &str, index_params: usize) -> Self {
        self.accessor = Some(PropertyAccessor {
            property: property.to_string(),
            index_params,
            is_setter: false,
        });
        self
    }

    pub fn setter_of(mut self, property: &str, index_params: usize) -> Self {
        self.accessor = Some(PropertyAccessor {
            property: property.to_string(),
            index_params,
            is_setter: true,
        });
        self
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }
}

/// A field or property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    pub declaring_type: Type,
    pub ty: Type,
    #[serde(default)]
    pub is_static: bool,
}

impl MemberInfo {
    pub fn new(declaring_type: Type, name: &str, ty: Type) -> Self {
        Self {
            name: name.to_string(),
            declaring_type,
            ty,
            is_static: false,
        }
    }

    pub fn static_member(declaring_type: Type, name: &str, ty: Type) -> Self {
        Self {
            is_static: true,
            ..Self::new(declaring_type, name, ty)
        }
    }
}
