//! Expansion of `@client` at-rules.
//!
//! Every matching at-rule is replaced, in place, by one copy per listed
//! client, in the order the clients were listed. Each copy is converted by its
//! [`Client`] or, for unknown names, emitted unconverted.

use std::mem;

use crate::client::Client;
use crate::diagnostic::Diagnostic;
use crate::options::TransformOptions;
use crate::stylesheet::{AtRule, Comment, Node, Stylesheet};

/// Expand every client at-rule in `stylesheet`, returning the diagnostics
/// collected along the way.
///
/// Traversal is depth-first in document order, so at-rules nested inside
/// `@media` and friends are expanded too. A client at-rule nested inside
/// another one is expanded before its parent.
pub fn expand_stylesheet(stylesheet: &mut Stylesheet, options: &TransformOptions) -> Vec<Diagnostic> {
    let mut expander = Expander::new(options);
    let nodes = mem::take(&mut stylesheet.nodes);
    stylesheet.nodes = expander.expand_nodes(nodes);
    expander.diagnostics
}

/// Split an at-rule's params into client names.
///
/// Names are trimmed and kept in order, duplicates included. Empty entries
/// (from a trailing comma, say) are dropped.
pub fn split_clients(params: &str) -> Vec<&str> {
    params
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

struct Expander<'a> {
    options: &'a TransformOptions,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Expander<'a> {
    fn new(options: &'a TransformOptions) -> Self {
        Self {
            options,
            diagnostics: Vec::new(),
        }
    }

    fn expand_nodes(&mut self, nodes: Vec<Node>) -> Vec<Node> {
        let mut expanded = Vec::with_capacity(nodes.len());

        for node in nodes {
            match node {
                Node::AtRule(mut at_rule) => {
                    if let Some(children) = at_rule.nodes.take() {
                        at_rule.nodes = Some(self.expand_nodes(children));
                    }
                    if at_rule.name == self.options.at_rule_name {
                        expanded.extend(self.expand_at_rule(&at_rule));
                    } else {
                        expanded.push(Node::AtRule(at_rule));
                    }
                }
                Node::Rule(mut rule) => {
                    rule.nodes = self.expand_nodes(mem::take(&mut rule.nodes));
                    expanded.push(Node::Rule(rule));
                }
                node @ (Node::Declaration(_) | Node::Comment(_)) => expanded.push(node),
            }
        }

        expanded
    }

    /// Produce the nodes that replace one client at-rule.
    fn expand_at_rule(&mut self, original: &AtRule) -> Vec<Node> {
        let clients = split_clients(&original.params);
        tracing::debug!(
            line = original.location.line,
            clients = ?clients,
            "expanding @{}",
            original.name
        );

        if clients.is_empty() {
            self.diagnostics.push(Diagnostic::empty_client_list(
                &original.name,
                original.location,
            ));
            return Vec::new();
        }

        let mut expanded = Vec::new();

        for name in clients {
            let client = Client::from_name(name);

            if self.options.comment {
                expanded.push(Node::Comment(client_comment(name, client.is_some())));
            }

            let mut copy = original.clone();
            copy.params = name.to_string();

            match client {
                Some(client) => {
                    expanded.extend(client.convert(
                        copy,
                        &self.options.body_class,
                        &mut self.diagnostics,
                    ));
                }
                None => {
                    tracing::debug!(client = name, "unsupported client, passing through");
                    self.diagnostics
                        .push(Diagnostic::unsupported_client(name, original.location));
                    expanded.push(Node::AtRule(copy));
                }
            }
        }

        expanded
    }
}

fn client_comment(name: &str, supported: bool) -> Comment {
    if supported {
        Comment::new(name)
    } else {
        Comment::new(format!("{name}: unsupported"))
    }
}
