//! Translation settings.
//!
//! Example `readable.toml`:
//! ```toml
//! use_explicit_generic_parameters = true
//! line_width = 120
//! ```

use serde::{Deserialize, Serialize};

/// Options for one translation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    /// Always show generic method type arguments, even when they can be inferred.
    pub use_explicit_generic_parameters: bool,
    /// Show namespace-qualified type names.
    pub use_fully_qualified_type_names: bool,
    /// Argument lists longer than this are split one argument per line.
    pub line_width: usize,
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            use_explicit_generic_parameters: false,
            use_fully_qualified_type_names: false,
            line_width: 100,
            indent_width: 4,
        }
    }
}

impl TranslationSettings {
    pub fn with_explicit_generic_parameters(mut self) -> Self {
        self.use_explicit_generic_parameters = true;
        self
    }

    pub fn with_fully_qualified_type_names(mut self) -> Self {
        self.use_fully_qualified_type_names = true;
        self
    }

    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// One level of indentation.
    pub fn indent(&self) -> String {
        " ".repeat(self.indent_width)
    }

    /// Parse settings from TOML; missing keys keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Parse settings from JSON; missing keys keep their defaults.
    #[cfg(feature = "config")]
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Error that can occur when loading settings.
#[cfg(feature = "config")]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid TOML settings: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),
}
