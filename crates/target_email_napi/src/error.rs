use napi_derive::napi;

use target_email::{Diagnostic, DiagnosticLabel, DiagnosticSeverity};

#[napi(object, use_nullable = true)]
#[derive(Clone)]
pub struct TransformDiagnostic {
    pub severity: Severity,
    pub message: String,
    pub labels: Vec<DiagnosticSpan>,
    pub help_message: Option<String>,
}

impl TransformDiagnostic {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Vec<Self> {
        diagnostics.into_iter().map(Self::from).collect()
    }
}

impl From<Diagnostic> for TransformDiagnostic {
    fn from(diagnostic: Diagnostic) -> Self {
        let help_message = (!diagnostic.hint.is_empty()).then_some(diagnostic.hint);
        Self {
            severity: Severity::from(diagnostic.severity),
            message: diagnostic.text,
            labels: diagnostic
                .labels
                .into_iter()
                .map(DiagnosticSpan::from)
                .collect(),
            help_message,
        }
    }
}

#[napi(object, use_nullable = true)]
#[derive(Clone)]
pub struct DiagnosticSpan {
    pub message: Option<String>,
    /// 1-based line number in the source.
    pub line: u32,
    /// 0-based column number in the source.
    pub column: u32,
}

impl From<DiagnosticLabel> for DiagnosticSpan {
    fn from(label: DiagnosticLabel) -> Self {
        Self {
            message: label.text,
            line: label.line,
            column: label.column,
        }
    }
}

#[napi(string_enum)]
#[derive(Clone)]
pub enum Severity {
    Warning,
    Advice,
}

impl From<DiagnosticSeverity> for Severity {
    fn from(value: DiagnosticSeverity) -> Self {
        match value {
            DiagnosticSeverity::Warning => Self::Warning,
            DiagnosticSeverity::Information => Self::Advice,
        }
    }
}
