//! Options for the `@client` transform.
//!
//! Mirrors the options of the original stylesheet plugin: `bodyClass` and
//! `comment`, plus the name of the at-rule to expand.

/// Default class treated as an alias for the `body` tag.
pub const DEFAULT_BODY_CLASS: &str = "body";

/// Default name of the at-rule that gets expanded (`@client`).
pub const DEFAULT_AT_RULE_NAME: &str = "client";

/// Options for the stylesheet transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOptions {
    /// Class treated as equivalent to the `body` tag when retargeting
    /// selectors. Email templates often wrap content in a `.body` element
    /// because clients strip or rename `<body>`.
    ///
    /// Defaults to `"body"`.
    pub body_class: String,

    /// Emit a comment before each expanded client naming the client, with a
    /// `: unsupported` suffix for unknown clients.
    ///
    /// Defaults to `false`.
    pub comment: bool,

    /// Name of the at-rule to expand, without the `@`.
    ///
    /// Defaults to `"client"`.
    pub at_rule_name: String,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            body_class: DEFAULT_BODY_CLASS.to_string(),
            comment: false,
            at_rule_name: DEFAULT_AT_RULE_NAME.to_string(),
        }
    }
}

impl TransformOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the body alias class. An empty string keeps the default.
    #[must_use]
    pub fn with_body_class(mut self, body_class: impl Into<String>) -> Self {
        let body_class = body_class.into();
        if !body_class.is_empty() {
            self.body_class = body_class;
        }
        self
    }

    /// Enable or disable diagnostic comments.
    #[must_use]
    pub fn with_comment(mut self, comment: bool) -> Self {
        self.comment = comment;
        self
    }

    /// Set the at-rule name to expand. An empty string keeps the default.
    #[must_use]
    pub fn with_at_rule_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.at_rule_name = name;
        }
        self
    }
}
