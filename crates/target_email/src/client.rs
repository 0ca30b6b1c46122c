//! Email clients and the conversion each one needs.
//!
//! Sources for the hacks:
//! - yahoo: <https://www.htmlemailcheck.com/knowledge-base/target-yahoo-mail-using-css-media-query/>
//! - webkit, outlook-com, thunderbird: <http://tabletrtd.com/email-client-targeting/>
//! - aol: <https://www.emailonacid.com/blog/article/email-development/css-targeting-for-aol-mail>
//! - gmail: <http://freshinbox.com/blog/targeting-new-gmail-css/>

use crate::body_target::retarget_body;
use crate::diagnostic::Diagnostic;
use crate::error::Result;
use crate::selector::add_wrapper;
use crate::stylesheet::{AtRule, Node, Rule};

/// An email client with a known targeting hack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Client {
    Yahoo,
    Webkit,
    Aol,
    Gmail,
    OutlookCom,
    Thunderbird,
}

/// How a client's copy of the at-rule is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// Turn the at-rule into `@media <query>`, leaving its rules untouched.
    Media(&'static str),
    /// Retarget the body anchor of every selector to this selector.
    RetargetBody(String),
    /// Prefix every selector with this ancestor selector.
    Wrap(&'static str),
}

impl Client {
    pub const ALL: [Self; 6] = [
        Self::Yahoo,
        Self::Webkit,
        Self::Aol,
        Self::Gmail,
        Self::OutlookCom,
        Self::Thunderbird,
    ];

    /// Look up a client by the name used in `@client` params. Case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "yahoo" => Some(Self::Yahoo),
            "webkit" => Some(Self::Webkit),
            "aol" => Some(Self::Aol),
            "gmail" => Some(Self::Gmail),
            "outlook-com" => Some(Self::OutlookCom),
            "thunderbird" => Some(Self::Thunderbird),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yahoo => "yahoo",
            Self::Webkit => "webkit",
            Self::Aol => "aol",
            Self::Gmail => "gmail",
            Self::OutlookCom => "outlook-com",
            Self::Thunderbird => "thunderbird",
        }
    }

    pub fn conversion(self, body_class: &str) -> Conversion {
        match self {
            Self::Yahoo => Conversion::Media("screen yahoo"),
            Self::Webkit => Conversion::Media("screen and (-webkit-min-device-pixel-ratio: 0)"),
            Self::Aol => Conversion::RetargetBody(format!("body[class~=\"aolmail_{body_class}\"]")),
            Self::Gmail => Conversion::RetargetBody(format!("u + .{body_class}")),
            Self::OutlookCom => Conversion::Wrap("[owa]"),
            Self::Thunderbird => Conversion::Wrap(".moz-text-html"),
        }
    }

    /// Convert this client's copy of the at-rule into the nodes that replace it.
    ///
    /// Media clients return the at-rule itself, renamed. Selector clients
    /// return the at-rule's children hoisted out of it, with every style rule
    /// rewritten. Rules whose selector cannot be rewritten are kept as they
    /// were and reported in `diagnostics`.
    pub fn convert(
        self,
        mut at_rule: AtRule,
        body_class: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<Node> {
        tracing::debug!(client = self.name(), "converting client rule");

        let rewrite: Box<dyn Fn(&str) -> Result<String> + '_> = match self.conversion(body_class) {
            Conversion::Media(query) => {
                at_rule.name = "media".to_string();
                at_rule.params = query.to_string();
                return vec![Node::AtRule(at_rule)];
            }
            Conversion::RetargetBody(replacement) => {
                Box::new(move |selector: &str| retarget_body(body_class, &replacement, selector))
            }
            Conversion::Wrap(wrapper) => Box::new(move |selector: &str| add_wrapper(wrapper, selector)),
        };

        let mut nodes = at_rule.nodes.unwrap_or_default();
        rewrite_rules(&mut nodes, &*rewrite, diagnostics);
        nodes
    }
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Rewrite the selector of every style rule in `nodes`, descending into
/// at-rule blocks but not into the children of style rules.
fn rewrite_rules(
    nodes: &mut [Node],
    rewrite: &dyn Fn(&str) -> Result<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for node in nodes {
        match node {
            Node::Rule(rule) => rewrite_rule(rule, rewrite, diagnostics),
            Node::AtRule(AtRule {
                nodes: Some(children),
                ..
            }) => rewrite_rules(children, rewrite, diagnostics),
            Node::AtRule(_) | Node::Declaration(_) | Node::Comment(_) => {}
        }
    }
}

fn rewrite_rule(
    rule: &mut Rule,
    rewrite: &dyn Fn(&str) -> Result<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match rewrite(&rule.selector) {
        Ok(selector) => {
            tracing::trace!(from = %rule.selector, to = %selector, "rewrote selector");
            rule.selector = selector;
        }
        Err(err) => {
            tracing::warn!(
                line = rule.location.line,
                column = rule.location.column,
                "leaving selector unchanged: {err}"
            );
            diagnostics.push(Diagnostic::from_error(&err, rule.location));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stylesheet::{Declaration, Stylesheet};

    fn client_rule(source: &str) -> AtRule {
        match Stylesheet::parse(source).nodes.into_iter().next() {
            Some(Node::AtRule(at_rule)) => at_rule,
            other => panic!("expected an at-rule, got {other:?}"),
        }
    }

    fn convert(client: Client, source: &str) -> String {
        let mut diagnostics = Vec::new();
        let nodes = client.convert(client_rule(source), "body", &mut diagnostics);
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
        Stylesheet { nodes }.to_css()
    }

    #[test]
    fn test_names_round_trip() {
        for client in Client::ALL {
            assert_eq!(Client::from_name(client.name()), Some(client));
            assert_eq!(client.to_string(), client.name());
        }
    }

    #[test]
    fn test_unknown_and_case_sensitive_names() {
        assert_eq!(Client::from_name("foo"), None);
        assert_eq!(Client::from_name("Gmail"), None);
        assert_eq!(Client::from_name("outlook"), None);
    }

    #[test]
    fn test_yahoo() {
        assert_eq!(
            convert(Client::Yahoo, "@client yahoo { p { margin: 0 } }"),
            "@media screen yahoo {\n  p {\n    margin: 0;\n  }\n}\n"
        );
    }

    #[test]
    fn test_webkit() {
        assert_eq!(
            convert(Client::Webkit, "@client webkit { p { margin: 0 } }"),
            "@media screen and (-webkit-min-device-pixel-ratio: 0) {\n  p {\n    margin: 0;\n  }\n}\n"
        );
    }

    #[test]
    fn test_aol() {
        assert_eq!(
            convert(Client::Aol, "@client aol { .cta { color: red } }"),
            "body[class~=\"aolmail_body\"] .cta {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_gmail() {
        assert_eq!(
            convert(Client::Gmail, "@client gmail { .cta { color: red } }"),
            "u + .body .cta {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_outlook_com() {
        assert_eq!(
            convert(Client::OutlookCom, "@client outlook-com { body .cta { color: red } }"),
            "[owa] body .cta {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_thunderbird() {
        assert_eq!(
            convert(Client::Thunderbird, "@client thunderbird { .a, .b { color: red } }"),
            ".moz-text-html .a, .moz-text-html .b {\n  color: red;\n}\n"
        );
    }

    #[test]
    fn test_hoists_every_rule_in_order() {
        assert_eq!(
            convert(Client::Gmail, "@client gmail { .a { color: red } .b { color: blue } }"),
            "u + .body .a {\n  color: red;\n}\n\nu + .body .b {\n  color: blue;\n}\n"
        );
    }

    #[test]
    fn test_nested_media_is_kept() {
        assert_eq!(
            convert(
                Client::Thunderbird,
                "@client thunderbird { @media (max-width: 600px) { .a { width: 100% } } }"
            ),
            "@media (max-width: 600px) {\n  .moz-text-html .a {\n    width: 100%;\n  }\n}\n"
        );
    }

    #[test]
    fn test_nested_style_rules_are_not_rewritten() {
        assert_eq!(
            convert(Client::OutlookCom, "@client outlook-com { .a { &:hover { color: red } } }"),
            "[owa] .a {\n  &:hover {\n    color: red;\n  }\n}\n"
        );
    }

    #[test]
    fn test_declarations_are_untouched() {
        let mut diagnostics = Vec::new();
        let nodes = Client::Aol.convert(
            client_rule("@client aol { .a { color: red !important; margin: 0 } }"),
            "body",
            &mut diagnostics,
        );
        let Node::Rule(rule) = &nodes[0] else {
            panic!("expected a rule");
        };
        assert_eq!(
            rule.nodes,
            vec![
                Node::Declaration(Declaration::new("color", "red !important")),
                Node::Declaration(Declaration::new("margin", "0")),
            ]
        );
    }

    #[test]
    fn test_invalid_selector_is_left_unchanged() {
        let mut diagnostics = Vec::new();
        let nodes = Client::Gmail.convert(
            client_rule("@client gmail { .a >> { color: red } .b { color: blue } }"),
            "body",
            &mut diagnostics,
        );
        assert_eq!(
            Stylesheet { nodes }.to_css(),
            ".a >> {\n  color: red;\n}\n\nu + .body .b {\n  color: blue;\n}\n"
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].labels[0].text.as_deref(), Some(".a >>"));
    }

    #[test]
    fn test_custom_body_class() {
        let mut diagnostics = Vec::new();
        let nodes = Client::Gmail.convert(
            client_rule("@client gmail { .wrapper .cta { color: red } }"),
            "wrapper",
            &mut diagnostics,
        );
        assert_eq!(Stylesheet { nodes }.to_css(), "u + .wrapper .cta {\n  color: red;\n}\n");
    }
}
