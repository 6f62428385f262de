//! Default type-name resolver.

use crate::ir::{NamedType, Type, keyword_alias};
use crate::traits::NameResolver;

/// Renders types the way they are written in C# source: keyword aliases,
/// `List<int>`, `int[]`, `int?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FriendlyNames {
    /// Prefix named types with their namespace.
    pub fully_qualified: bool,
}

impl FriendlyNames {
    pub fn new(fully_qualified: bool) -> Self {
        Self { fully_qualified }
    }

    fn named(&self, named: &NamedType) -> String {
        if let Some(keyword) = keyword_alias(named) {
            return keyword.to_string();
        }
        if named.is("System", "Nullable") && named.args.len() == 1 {
            return format!("{}?", self.friendly_name(&named.args[0]));
        }
        let mut out = match (&named.namespace, self.fully_qualified) {
            (Some(namespace), true) => format!("{namespace}.{}", named.name),
            _ => named.name.clone(),
        };
        if !named.args.is_empty() {
            let args: Vec<String> = named.args.iter().map(|a| self.friendly_name(a)).collect();
            out.push('<');
            out.push_str(&args.join(", "));
            out.push('>');
        }
        out
    }
}

impl NameResolver for FriendlyNames {
    fn friendly_name(&self, ty: &Type) -> String {
        match ty {
            Type::Void => "void".to_string(),
            Type::Named(named) => self.named(named),
            Type::Array { element, rank } => format!(
                "{}[{}]",
                self.friendly_name(element),
                ",".repeat(rank.saturating_sub(1))
            ),
            Type::Nullable(inner) => format!("{}?", self.friendly_name(inner)),
            Type::GenericParam(name) => name.clone(),
            Type::ByRef(inner) => self.friendly_name(inner),
        }
    }
}
