//! Traits for node translators, type-name resolution and extension nodes.

use crate::context::TranslationContext;
use crate::formatting;
use crate::ir::{Expr, NodeKind, Type};
use std::fmt;

/// Error that can occur when translating a tree.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("no translator registered for {0:?} nodes")]
    UnsupportedNodeKind(NodeKind),

    #[error("invalid {kind:?} node: {reason}")]
    InvalidNodeShape { kind: NodeKind, reason: String },
}

/// A translator renders the node kinds it declares.
pub trait Translator: Send + Sync {
    /// Node kinds this translator handles.
    fn kinds(&self) -> Vec<NodeKind>;

    /// Render `expr`, translating children through `ctx`.
    fn translate<'a>(
        &self,
        expr: &'a Expr,
        ctx: &mut TranslationContext<'a>,
    ) -> Result<String, TranslateError>;
}

/// Resolves a type descriptor to the name shown in source text.
pub trait NameResolver: Send + Sync {
    fn friendly_name(&self, ty: &Type) -> String;
}

/// An opaque node kind supplied by the caller.
pub trait ExtensionNode: fmt::Debug + Send + Sync {
    /// Static result type of the node.
    fn ty(&self) -> Type;

    /// Render the node. Children owned by the extension can be rendered with
    /// [`TranslationContext::translate`].
    fn render<'a>(&'a self, ctx: &mut TranslationContext<'a>) -> Result<String, TranslateError>;
}

/// A `// text` comment statement.
#[derive(Debug, Clone)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ExtensionNode for Comment {
    fn ty(&self) -> Type {
        Type::Void
    }

    fn render<'a>(&'a self, _ctx: &mut TranslationContext<'a>) -> Result<String, TranslateError> {
        Ok(formatting::as_comment(&self.text))
    }
}
