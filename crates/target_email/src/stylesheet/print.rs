use super::{Node, Stylesheet};

const INDENT: &str = "  ";

pub(super) fn print_stylesheet(stylesheet: &Stylesheet) -> String {
    let mut out = String::new();
    print_nodes(&stylesheet.nodes, 0, &mut out);
    out
}

fn print_nodes(nodes: &[Node], depth: usize, out: &mut String) {
    let mut previous: Option<&Node> = None;

    for node in nodes {
        // Blocks get a blank line around them, except directly after a comment
        // so that a comment stays attached to the rule it describes.
        if let Some(previous) = previous
            && (previous.is_block() || (node.is_block() && !matches!(previous, Node::Comment(_))))
        {
            out.push('\n');
        }
        print_node(node, depth, out);
        previous = Some(node);
    }
}

fn print_node(node: &Node, depth: usize, out: &mut String) {
    push_indent(depth, out);

    match node {
        Node::Rule(rule) => {
            out.push_str(&rule.selector);
            print_block(&rule.nodes, depth, out);
        }
        Node::AtRule(at_rule) => {
            out.push('@');
            out.push_str(&at_rule.name);
            if !at_rule.params.is_empty() {
                out.push(' ');
                out.push_str(&at_rule.params);
            }
            match &at_rule.nodes {
                Some(nodes) => print_block(nodes, depth, out),
                None => out.push_str(";\n"),
            }
        }
        Node::Declaration(declaration) => {
            out.push_str(&declaration.property);
            out.push_str(": ");
            out.push_str(&declaration.value);
            out.push_str(";\n");
        }
        Node::Comment(comment) => {
            out.push_str("/* ");
            out.push_str(&comment.text);
            out.push_str(" */\n");
        }
    }
}

fn print_block(nodes: &[Node], depth: usize, out: &mut String) {
    out.push_str(" {\n");
    print_nodes(nodes, depth + 1, out);
    push_indent(depth, out);
    out.push_str("}\n");
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}
