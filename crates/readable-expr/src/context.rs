//! Per-call translation state.
//!
//! A [`TranslationContext`] lives for one top-level translation. It owns the
//! ancestor stack, the variable naming table and a memo of rendered nodes,
//! and it is the only way translators reach their children.

use crate::code_block::CodeBlock;
use crate::formatting::{indented, is_multi_line, without_parens};
use crate::ir::{
    BinaryOp, CapturedObject, Expr, MethodKind, NodeKind, ParamModifier, Parameter, Type,
    UnaryOp, Variable,
};
use crate::naming::NameTable;
use crate::registry::Registry;
use crate::settings::TranslationSettings;
use crate::traits::{NameResolver, TranslateError};
use std::collections::{HashMap, HashSet};
use std::ptr;
use std::sync::Arc;

/// Node identity plus parent identity.
type MemoKey = (*const Expr, *const Expr);

/// Receiver of a call for chaining purposes: the instance subject, or the
/// first argument of an extension call.
pub fn call_receiver(expr: &Expr) -> Option<&Expr> {
    match expr {
        Expr::MethodCall { method, args, .. } if method.kind == MethodKind::Extension => {
            args.first().map(|a| a.as_ref())
        }
        Expr::MethodCall { subject, .. } => subject.as_deref(),
        _ => None,
    }
}

fn is_call(expr: &Expr) -> bool {
    matches!(expr, Expr::MethodCall { .. })
}

pub struct TranslationContext<'a> {
    registry: &'a Registry,
    settings: &'a TranslationSettings,
    resolver: &'a dyn NameResolver,
    indent: String,
    ancestors: Vec<&'a Expr>,
    names: NameTable,
    memo: HashMap<MemoKey, String>,
    /// Locals declared so far, one set per open block scope.
    scopes: Vec<HashSet<*const Variable>>,
}

impl<'a> TranslationContext<'a> {
    pub fn new(
        root: &Expr,
        settings: &'a TranslationSettings,
        registry: &'a Registry,
        resolver: &'a dyn NameResolver,
    ) -> Self {
        let mut names = NameTable::new();
        names.reserve_names_in(root);
        Self {
            registry,
            settings,
            resolver,
            indent: settings.indent(),
            ancestors: Vec::new(),
            names,
            memo: HashMap::new(),
            scopes: vec![HashSet::new()],
        }
    }

    pub fn settings(&self) -> &TranslationSettings {
        self.settings
    }

    /// One indentation level.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// Translate `expr` with the translator registered for its kind.
    pub fn translate(&mut self, expr: &'a Expr) -> Result<String, TranslateError> {
        let parent = self.ancestors.last().map_or(ptr::null(), |p| *p as *const Expr);
        let key = (expr as *const Expr, parent);
        if let Some(text) = self.memo.get(&key) {
            return Ok(text.clone());
        }

        let kind = expr.kind();
        let registry = self.registry;
        let translator = registry
            .get(kind)
            .ok_or(TranslateError::UnsupportedNodeKind(kind))?;
        tracing::trace!(?kind, depth = self.ancestors.len(), "translating node");

        self.ancestors.push(expr);
        let result = translator.translate(expr, self);
        self.ancestors.pop();

        let text = result?;
        self.memo.insert(key, text.clone());
        Ok(text)
    }

    /// The node currently being translated.
    pub fn current(&self) -> Option<&'a Expr> {
        self.ancestors.last().copied()
    }

    /// Parent of the node currently being translated.
    pub fn parent(&self) -> Option<&'a Expr> {
        let len = self.ancestors.len();
        len.checked_sub(2).map(|i| self.ancestors[i])
    }

    /// Nearest ancestor of `expr`, if `expr` is on the current path.
    pub fn parent_of(&self, expr: &Expr) -> Option<&'a Expr> {
        let i = self.ancestors.iter().rposition(|a| ptr::eq(*a, expr))?;
        i.checked_sub(1).map(|p| self.ancestors[p])
    }

    /// Ancestors from the innermost outwards, including the current node.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Expr> + '_ {
        self.ancestors.iter().rev().copied()
    }

    /// Whether `expr` continues a fluent chain of at least three calls.
    pub fn is_part_of_method_call_chain(&self, expr: &Expr) -> bool {
        if !call_receiver(expr).is_some_and(is_call) {
            return false;
        }

        let mut length = 1;
        let mut link = expr;
        while let Some(receiver) = call_receiver(link).filter(|r| is_call(r)) {
            length += 1;
            link = receiver;
        }

        if let Some(mut i) = self.ancestors.iter().rposition(|a| ptr::eq(*a, expr)) {
            while i > 0
                && call_receiver(self.ancestors[i - 1])
                    .is_some_and(|r| ptr::eq(r, self.ancestors[i]))
            {
                length += 1;
                i -= 1;
            }
        }
        length >= 3
    }

    pub fn name_for(&mut self, variable: &Arc<Variable>) -> String {
        self.names.variable_name(variable)
    }

    pub fn captured_name(&mut self, object: &Arc<CapturedObject>) -> String {
        self.names.captured_name(object)
    }

    pub fn captured_member_name(&mut self, object: &Arc<CapturedObject>, member: &str) -> String {
        self.names.captured_member_name(object, member)
    }

    pub fn type_name(&self, ty: &Type) -> String {
        self.resolver.friendly_name(ty)
    }

    /// Opens a declaration scope; pair with [`Self::close_scope`].
    pub fn open_scope(&mut self) {
        self.scopes.push(HashSet::new());
    }

    /// Forgets the locals declared since the matching [`Self::open_scope`].
    pub fn close_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Records `variable` as declared in the innermost scope; returns false
    /// if an open scope already declares it.
    pub fn declare(&mut self, variable: &Arc<Variable>) -> bool {
        if self.is_declared(variable) {
            return false;
        }
        let key = Arc::as_ptr(variable);
        self.scopes.last_mut().is_some_and(|scope| scope.insert(key))
    }

    pub fn is_declared(&self, variable: &Arc<Variable>) -> bool {
        let key = Arc::as_ptr(variable);
        self.scopes.iter().any(|scope| scope.contains(&key))
    }

    /// Removes one enclosing pair of parentheses from a child's text unless
    /// the child is a kind that must keep them.
    pub fn strip_or_keep(&self, text: String, child: &Expr) -> String {
        if self.keeps_parentheses(child) {
            text
        } else {
            without_parens(&text).to_string()
        }
    }

    fn keeps_parentheses(&self, child: &Expr) -> bool {
        match child {
            Expr::Conditional { .. } | Expr::Lambda { .. } => true,
            Expr::MethodCall { .. } => self
                .ancestors
                .iter()
                .rev()
                .find(|a| !is_call(a))
                .is_some_and(|a| {
                    matches!(
                        a.kind(),
                        NodeKind::Binary(
                            BinaryOp::Add
                                | BinaryOp::AddChecked
                                | BinaryOp::Multiply
                                | BinaryOp::MultiplyChecked
                                | BinaryOp::Subtract
                                | BinaryOp::SubtractChecked
                        ) | NodeKind::Unary(UnaryOp::Convert | UnaryOp::ConvertChecked)
                    )
                }),
            Expr::Invoke { target, .. } => matches!(target.as_ref(), Expr::Lambda { .. }),
            _ => false,
        }
    }

    /// Translate a body for an `if`, loop or lambda.
    pub fn code_block(&mut self, expr: &'a Expr) -> Result<CodeBlock, TranslateError> {
        let text = self.translate(expr)?;
        let (text, single) = match expr {
            Expr::Block {
                locals, statements, ..
            } => {
                let count = statements.iter().filter(|s| !s.is_empty()).count();
                (text, count <= 1 && locals.is_empty())
            }
            _ => (self.strip_or_keep(text, expr), true),
        };
        Ok(CodeBlock::new(text, single, &self.indent))
    }

    /// Render call arguments as `(a, b)`, honouring parameter modifiers.
    /// Must be called from within a translator.
    pub fn translate_parameters(
        &mut self,
        args: &'a [Arc<Expr>],
        params: Option<&[Parameter]>,
    ) -> Result<String, TranslateError> {
        let texts = self.translate_arguments(args, params)?;
        Ok(self.argument_list(&texts, "(", ")"))
    }

    /// Render each argument; `params` arrays are flattened and `ref`/`out`
    /// modifiers prefixed.
    pub fn translate_arguments(
        &mut self,
        args: &'a [Arc<Expr>],
        params: Option<&[Parameter]>,
    ) -> Result<Vec<String>, TranslateError> {
        if let Some(params) = params {
            if params.len() != args.len() {
                return Err(self.invalid(format!(
                    "{} arguments supplied for {} parameters",
                    args.len(),
                    params.len()
                )));
            }
        }

        let mut texts = Vec::with_capacity(args.len());
        for (i, arg) in args.iter().enumerate() {
            let modifier = params.map_or(ParamModifier::Value, |p| p[i].modifier);
            match (modifier, arg.as_ref()) {
                (ParamModifier::Params, Expr::NewArray { items, .. }) => {
                    for item in items {
                        let text = self.translate(item)?;
                        texts.push(self.strip_or_keep(text, item));
                    }
                }
                (ParamModifier::Ref, _) => texts.push(format!("ref {}", self.translate(arg)?)),
                (ParamModifier::Out, _) => texts.push(format!("out {}", self.translate(arg)?)),
                _ => {
                    let text = self.translate(arg)?;
                    texts.push(self.strip_or_keep(text, arg));
                }
            }
        }
        Ok(texts)
    }

    /// Joins rendered arguments, one per line when they do not fit.
    pub fn argument_list(&self, args: &[String], open: &str, close: &str) -> String {
        let inline = args.join(", ");
        let multi_line = args.iter().filter(|a| is_multi_line(a)).count();
        if inline.len() <= self.settings.line_width && multi_line <= 1 {
            return format!("{open}{inline}{close}");
        }
        let lines: Vec<String> = args.iter().map(|a| indented(a, &self.indent)).collect();
        format!("{open}\n{}{close}", lines.join(",\n"))
    }

    /// An `InvalidNodeShape` error for the node being translated.
    pub fn invalid(&self, reason: impl Into<String>) -> TranslateError {
        let reason = reason.into();
        let kind = self.current().map_or(NodeKind::Extension, Expr::kind);
        tracing::debug!(?kind, %reason, "invalid node shape");
        TranslateError::InvalidNodeShape { kind, reason }
    }
}
