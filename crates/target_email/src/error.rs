//! Error types for selector rewriting.

/// Result type alias for transform operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rewriting a single rule.
///
/// None of these abort a stylesheet pass: the offending rule is left as it
/// was and the error is reported as a [`Diagnostic`](crate::Diagnostic).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The selector text could not be parsed.
    #[error("invalid selector '{selector}' at {line}:{column}: {message}")]
    SelectorParse {
        selector: String,
        message: String,
        /// 1-based line within the selector text.
        line: u32,
        /// 1-based column within the selector text.
        column: u32,
    },

    /// A rewritten selector could not be printed back to text.
    #[error("failed to print selector '{selector}': {message}")]
    Print { selector: String, message: String },
}

impl Error {
    /// Create a selector parse error.
    pub fn selector_parse(
        selector: impl Into<String>,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::SelectorParse {
            selector: selector.into(),
            message: message.into(),
            line,
            column,
        }
    }

    /// Create a print error.
    pub fn print(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Print {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// The selector text the error refers to.
    pub fn selector(&self) -> &str {
        match self {
            Self::SelectorParse { selector, .. } | Self::Print { selector, .. } => selector,
        }
    }
}
