//! Target Email
//!
//! Expands `@client` at-rules into CSS that only applies in the named email
//! clients. Each client gets the hack its renderer responds to: a media query
//! (yahoo, webkit), a rewritten body anchor (aol, gmail) or a wrapper
//! ancestor (outlook-com, thunderbird).
//!
//! ```
//! use target_email::{TransformOptions, transform};
//!
//! let result = transform(
//!     "@client gmail, outlook-com { .cta { color: red; } }",
//!     &TransformOptions::default(),
//! );
//! assert_eq!(
//!     result.code,
//!     "u + .body .cta {\n  color: red;\n}\n\n[owa] .cta {\n  color: red;\n}\n"
//! );
//! ```

mod body_target;
mod client;
mod diagnostic;
mod error;
mod expand;
mod options;
pub mod selector;
pub mod stylesheet;

pub use body_target::{retarget_body, retarget_chain};
pub use client::{Client, Conversion};
pub use diagnostic::{Diagnostic, DiagnosticLabel, DiagnosticSeverity};
pub use error::{Error, Result};
pub use expand::{expand_stylesheet, split_clients};
pub use options::{DEFAULT_AT_RULE_NAME, DEFAULT_BODY_CLASS, TransformOptions};
pub use stylesheet::Stylesheet;

/// Output of [`transform`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
    /// The transformed stylesheet.
    pub code: String,
    /// Rules that could not be rewritten, unsupported clients and the like.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse `css`, expand every client at-rule and print the result.
pub fn transform(css: &str, options: &TransformOptions) -> TransformResult {
    let mut stylesheet = Stylesheet::parse(css);
    let diagnostics = expand_stylesheet(&mut stylesheet, options);

    TransformResult {
        code: stylesheet.to_css(),
        diagnostics,
    }
}
