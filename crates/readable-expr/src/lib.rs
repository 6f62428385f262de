//! Readable source text for expression trees.
//!
//! `readable-expr` renders an in-memory expression tree (constants,
//! operators, calls, conditionals, loops, lambdas, blocks) as the C# code a
//! person would have written, for use in debuggers and log output.
//!
//! # Architecture
//!
//! ```text
//! Expr tree ──> TranslationContext ──> Registry ──> Translator ──> String
//!  (ir/)         (context.rs)          (registry.rs) (translators/)
//!                  │
//!                  ├─ names, memo, ancestor stack
//!                  └─ NameResolver (names.rs) for type names
//! ```
//!
//! Each node kind has one [`Translator`]. Translators render their children
//! through the context, then combine the child text with the precedence,
//! bracing and termination rules in [`formatting`].
//!
//! # Example
//!
//! ```
//! use readable_expr::{Expr, TranslationSettings, Type, Variable, translate};
//!
//! let i = Variable::new("i", Type::int());
//! let double = Expr::lambda(&[i.clone()], Expr::multiply(Expr::variable(&i), Expr::constant(2)));
//!
//! let text = translate(&double, &TranslationSettings::default())?;
//! assert_eq!(text, "i => i * 2");
//! # Ok::<(), readable_expr::TranslateError>(())
//! ```
//!
//! # Extending
//!
//! Custom node kinds implement [`ExtensionNode`]; custom renderings for
//! built-in kinds go in a [`Registry`] passed to [`translate_with`]. The
//! first translator registered for a kind wins.

pub mod code_block;
pub mod context;
pub mod formatting;
pub mod ir;
pub mod names;
pub mod naming;
pub mod registry;
pub mod settings;
pub mod traits;
pub mod translators;

// Re-exports: tree model
pub use ir::{
    AssignOp, BinaryOp, CapturedObject, ConstantValue, Expr, Label, MemberInfo, MethodInfo,
    MethodKind, NamedType, NodeKind, ParamModifier, Parameter, PropertyAccessor, Type, UnaryOp,
    Variable,
};

// Re-exports: traits and errors
pub use traits::{Comment, ExtensionNode, NameResolver, TranslateError, Translator};

// Re-exports: engine
pub use code_block::CodeBlock;
pub use context::TranslationContext;
pub use names::FriendlyNames;
pub use registry::Registry;
#[cfg(feature = "config")]
pub use settings::ConfigError;
pub use settings::TranslationSettings;

/// Render `expr` with the built-in translators and type names.
pub fn translate(expr: &Expr, settings: &TranslationSettings) -> Result<String, TranslateError> {
    let resolver = FriendlyNames::new(settings.use_fully_qualified_type_names);
    translate_with(expr, settings, Registry::standard(), &resolver)
}

/// Render `expr` with a custom registry and type-name resolver.
pub fn translate_with(
    expr: &Expr,
    settings: &TranslationSettings,
    registry: &Registry,
    resolver: &dyn NameResolver,
) -> Result<String, TranslateError> {
    tracing::debug!(kind = ?expr.kind(), "translating expression tree");
    let mut ctx = TranslationContext::new(expr, settings, registry, resolver);
    ctx.translate(expr)
        .inspect_err(|err| tracing::debug!(%err, "translation failed"))
}
