//! A small stylesheet tree.
//!
//! Rules and at-rules keep their preludes as raw text and declarations are
//! opaque `property: value` pairs. Only selectors and at-rule params are ever
//! rewritten, so nothing deeper than that is modelled.

mod parse;
mod print;

/// Position of a node in the source stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column number.
    pub column: u32,
}

/// A parsed stylesheet: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub nodes: Vec<Node>,
}

impl Stylesheet {
    /// Parse stylesheet text.
    ///
    /// Never fails. Stray tokens that form neither a rule nor a declaration
    /// are skipped with a warning.
    pub fn parse(css: &str) -> Self {
        parse::parse_stylesheet(css)
    }

    /// Print the tree back to CSS.
    pub fn to_css(&self) -> String {
        print::print_stylesheet(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Rule(Rule),
    AtRule(AtRule),
    Declaration(Declaration),
    Comment(Comment),
}

impl Node {
    /// Whether the node prints as a `{ ... }` block.
    pub fn is_block(&self) -> bool {
        match self {
            Self::Rule(_) => true,
            Self::AtRule(at_rule) => at_rule.nodes.is_some(),
            Self::Declaration(_) | Self::Comment(_) => false,
        }
    }
}

/// A style rule: `selector { nodes }`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub selector: String,
    pub nodes: Vec<Node>,
    pub location: SourceLocation,
}

impl Rule {
    pub fn new(selector: impl Into<String>, nodes: Vec<Node>) -> Self {
        Self {
            selector: selector.into(),
            nodes,
            location: SourceLocation::default(),
        }
    }
}

/// An at-rule: `@name params { nodes }`, or `@name params;` when `nodes` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtRule {
    pub name: String,
    pub params: String,
    pub nodes: Option<Vec<Node>>,
    pub location: SourceLocation,
}

impl AtRule {
    pub fn new(name: impl Into<String>, params: impl Into<String>, nodes: Option<Vec<Node>>) -> Self {
        Self {
            name: name.into(),
            params: params.into(),
            nodes,
            location: SourceLocation::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A `/* text */` comment. `text` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
}

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
