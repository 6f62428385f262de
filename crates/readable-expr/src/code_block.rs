//! A rendered body that can be laid out with or without braces.

use crate::formatting::{indented, terminated, unterminated};

/// A translated body of an `if`, loop or lambda.
#[derive(Debug, Clone)]
pub struct CodeBlock {
    body: String,
    is_single_statement: bool,
    indent: String,
}

impl CodeBlock {
    pub fn new(body: String, is_single_statement: bool, indent: &str) -> Self {
        Self {
            body,
            is_single_statement,
            indent: indent.to_string(),
        }
    }

    pub fn is_single_statement(&self) -> bool {
        self.is_single_statement
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// `\n{\n    body;\n}`, starting on a new line.
    pub fn with_brackets(&self) -> String {
        if self.body.is_empty() {
            return "\n{\n}".to_string();
        }
        format!(
            "\n{{\n{}\n}}",
            indented(&terminated(&self.body), &self.indent)
        )
    }

    /// The terminated statements, unindented.
    pub fn without_brackets(&self) -> String {
        terminated(&self.body)
    }

    /// The body as an expression, without a trailing `;`.
    pub fn as_expression(&self) -> String {
        unterminated(&self.body).to_string()
    }
}
