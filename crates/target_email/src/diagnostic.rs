//! Diagnostics reported by the transform.
//!
//! Nothing in the transform is fatal. Rules that cannot be rewritten are left
//! as they were and reported here instead.

use crate::error::Error;
use crate::stylesheet::SourceLocation;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    Warning,
    Information,
}

/// A labeled position in the input stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLabel {
    /// Optional label text (e.g. the offending selector).
    pub text: Option<String>,
    /// 1-based line number.
    pub line: u32,
    /// 0-based column number.
    pub column: u32,
}

impl DiagnosticLabel {
    pub fn new(text: Option<String>, location: SourceLocation) -> Self {
        Self {
            text,
            line: location.line,
            column: location.column,
        }
    }
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: DiagnosticSeverity,
    /// Human-readable message text.
    pub text: String,
    /// Optional hint for fixing the issue. Empty when there is none.
    pub hint: String,
    pub labels: Vec<DiagnosticLabel>,
}

impl Diagnostic {
    /// A rule whose selector was left unchanged because rewriting it failed.
    pub fn from_error(error: &Error, location: SourceLocation) -> Self {
        let hint = match error {
            Error::SelectorParse { .. } => {
                "the rule was emitted without the client-specific selector".to_string()
            }
            Error::Print { .. } => String::new(),
        };

        Self {
            severity: DiagnosticSeverity::Warning,
            text: error.to_string(),
            hint,
            labels: vec![DiagnosticLabel::new(
                Some(error.selector().to_string()),
                location,
            )],
        }
    }

    /// A client name with no known conversion.
    pub fn unsupported_client(client: &str, location: SourceLocation) -> Self {
        Self {
            severity: DiagnosticSeverity::Information,
            text: format!("unsupported client '{client}'"),
            hint: "the rules were emitted unconverted".to_string(),
            labels: vec![DiagnosticLabel::new(Some(client.to_string()), location)],
        }
    }

    /// An at-rule with no client names in its params.
    pub fn empty_client_list(at_rule_name: &str, location: SourceLocation) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            text: format!("@{at_rule_name} lists no clients"),
            hint: format!("add one or more comma-separated client names after @{at_rule_name}"),
            labels: vec![DiagnosticLabel::new(None, location)],
        }
    }
}
