//! Registry mapping node kinds to translators.

use crate::ir::NodeKind;
use crate::traits::Translator;
use crate::translators;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Built-in registry, built on first use.
static STANDARD: OnceLock<Registry> = OnceLock::new();

/// Immutable kind -> translator table.
#[derive(Default)]
pub struct Registry {
    translators: Vec<Box<dyn Translator>>,
    by_kind: HashMap<NodeKind, usize>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in registry covering every node kind.
    pub fn standard() -> &'static Registry {
        STANDARD.get_or_init(|| {
            let registry = translators::standard()
                .into_iter()
                .fold(Registry::new(), Registry::with_boxed);
            tracing::debug!(kinds = registry.by_kind.len(), "built standard translator registry");
            registry
        })
    }

    /// Add a translator. Kinds that already have a translator keep it.
    pub fn with(self, translator: impl Translator + 'static) -> Self {
        self.with_boxed(Box::new(translator))
    }

    pub fn with_boxed(mut self, translator: Box<dyn Translator>) -> Self {
        let index = self.translators.len();
        for kind in translator.kinds() {
            if self.by_kind.contains_key(&kind) {
                tracing::debug!(?kind, "kind already registered, keeping first translator");
                continue;
            }
            self.by_kind.insert(kind, index);
        }
        self.translators.push(translator);
        self
    }

    /// Translator registered for `kind`.
    pub fn get(&self, kind: NodeKind) -> Option<&dyn Translator> {
        let index = *self.by_kind.get(&kind)?;
        self.translators.get(index).map(|t| t.as_ref())
    }

    pub fn supports(&self, kind: NodeKind) -> bool {
        self.by_kind.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TranslationContext;
    use crate::ir::{BinaryOp, Expr};
    use crate::traits::TranslateError;

    struct Fixed(&'static str);

    impl Translator for Fixed {
        fn kinds(&self) -> Vec<NodeKind> {
            vec![NodeKind::Constant]
        }

        fn translate<'a>(
            &self,
            _expr: &'a Expr,
            _ctx: &mut TranslationContext<'a>,
        ) -> Result<String, TranslateError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_standard_registry_is_total() {
        let registry = Registry::standard();
        for kind in NodeKind::all() {
            assert!(registry.supports(kind), "no translator for {kind:?}");
        }
    }

    #[test]
    fn test_first_registration_wins() {
        let registry = Registry::new().with(Fixed("first")).with(Fixed("second"));
        let settings = crate::TranslationSettings::default();
        let resolver = crate::FriendlyNames::default();
        let expr = Expr::constant(1);
        let mut ctx = TranslationContext::new(&expr, &settings, &registry, &resolver);
        assert_eq!(ctx.translate(&expr).unwrap(), "first");
    }

    #[test]
    fn test_missing_kind_is_an_error() {
        let registry = Registry::new().with(Fixed("1"));
        let expr = Expr::binary(BinaryOp::Add, Expr::constant(1), Expr::constant(2));
        let settings = crate::TranslationSettings::default();
        let err = crate::translate_with(&expr, &settings, &registry, &crate::FriendlyNames::default())
            .unwrap_err();
        assert!(matches!(
            err,
            TranslateError::UnsupportedNodeKind(NodeKind::Binary(BinaryOp::Add))
        ));
    }
}
