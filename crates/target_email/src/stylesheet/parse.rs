use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

use super::{AtRule, Comment, Declaration, Node, Rule, SourceLocation, Stylesheet};

/// How a rule prelude ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Block,
    Semicolon,
    End,
}

pub(super) fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    Stylesheet {
        nodes: parse_nodes(&mut parser),
    }
}

/// Parse a list of rules, at-rules, declarations and comments until the
/// input (or the enclosing block) is exhausted.
fn parse_nodes(parser: &mut Parser<'_, '_>) -> Vec<Node> {
    let mut nodes = Vec::new();

    loop {
        let state = parser.state();
        let location = current_location(parser);
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };

        match token {
            Token::WhiteSpace(_) | Token::CDO | Token::CDC => {}
            Token::Comment(text) => nodes.push(Node::Comment(Comment::new(text.trim()))),
            Token::AtKeyword(name) => {
                let (params, terminator) = scan_params(parser);
                let children = (terminator == Terminator::Block).then(|| parse_block(parser));
                nodes.push(Node::AtRule(AtRule {
                    name: name.to_string(),
                    params: params.trim().to_string(),
                    nodes: children,
                    location,
                }));
            }
            _ => {
                parser.reset(&state);
                let start = parser.position();
                let (prelude, terminator) = scan_prelude(parser, start);
                let prelude = prelude.trim();

                if terminator == Terminator::Block {
                    let children = parse_block(parser);
                    nodes.push(Node::Rule(Rule {
                        selector: prelude.to_string(),
                        nodes: children,
                        location,
                    }));
                } else if let Some(declaration) = parse_declaration(prelude) {
                    nodes.push(Node::Declaration(declaration));
                } else if !prelude.is_empty() {
                    tracing::warn!(
                        line = location.line,
                        column = location.column,
                        "skipping unrecognized CSS: {prelude}"
                    );
                }
            }
        }
    }

    nodes
}

/// Consume tokens up to the next top-level `;` or `{`, returning the raw text
/// between `start` and the terminator.
fn scan_prelude<'i>(parser: &mut Parser<'i, '_>, start: SourcePosition) -> (&'i str, Terminator) {
    loop {
        let end = parser.position();
        let terminator = match parser.next_including_whitespace_and_comments() {
            Ok(Token::Semicolon) => Some(Terminator::Semicolon),
            Ok(Token::CurlyBracketBlock) => Some(Terminator::Block),
            Ok(_) => None,
            Err(_) => Some(Terminator::End),
        };
        if let Some(terminator) = terminator {
            return (parser.slice(start..end), terminator);
        }
    }
}

/// Consume an at-rule prelude like [`scan_prelude`], but drop comments and
/// collapse runs of whitespace to a single space.
fn scan_params(parser: &mut Parser<'_, '_>) -> (String, Terminator) {
    let mut params = String::new();

    loop {
        let start = parser.position();
        let token = match parser.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return (params, Terminator::End),
        };

        match token {
            Token::Semicolon => return (params, Terminator::Semicolon),
            Token::CurlyBracketBlock => return (params, Terminator::Block),
            Token::Comment(_) => {}
            Token::WhiteSpace(_) => {
                if !params.ends_with(' ') {
                    params.push(' ');
                }
            }
            Token::Function(_) | Token::ParenthesisBlock | Token::SquareBracketBlock => {
                skip_block(parser);
                params.push_str(parser.slice_from(start));
            }
            _ => params.push_str(parser.slice_from(start)),
        }
    }
}

/// Consume the block that was just opened, contents included.
fn skip_block(parser: &mut Parser<'_, '_>) {
    let _ = parser.parse_nested_block(|block| {
        while block.next_including_whitespace_and_comments().is_ok() {}
        Ok::<_, ParseError<'_, ()>>(())
    });
}

/// Parse the contents of the `{ ... }` block that was just consumed.
fn parse_block(parser: &mut Parser<'_, '_>) -> Vec<Node> {
    parser
        .parse_nested_block(|block| Ok::<_, ParseError<'_, ()>>(parse_nodes(block)))
        .unwrap_or_default()
}

fn parse_declaration(text: &str) -> Option<Declaration> {
    let (property, value) = text.split_once(':')?;
    let property = property.trim();
    if property.is_empty() {
        return None;
    }
    Some(Declaration::new(property, value.trim()))
}

fn current_location(parser: &Parser<'_, '_>) -> SourceLocation {
    let location = parser.current_source_location();
    SourceLocation {
        line: location.line + 1,
        column: location.column.saturating_sub(1),
    }
}
