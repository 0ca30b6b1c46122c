//! Selector AST adapter and node rewrite primitives.
//!
//! Selectors are parsed with lightningcss. Each comma-separated selector is
//! exposed as a *chain*: its components flattened into parse (left-to-right)
//! order with combinators inline, e.g. `u + .body` becomes
//! `[LocalName(u), Combinator(NextSibling), Class(body)]`.
//!
//! lightningcss stores a selector's compounds in match order (rightmost
//! first), so flattening splits the raw slice on combinators and reverses the
//! compound order while leaving each compound's internal order alone.

use lightningcss::printer::PrinterOptions;
use lightningcss::selector::{Combinator, Component, Selector, SelectorList};
use lightningcss::stylesheet::ParserOptions;
use lightningcss::traits::{ParseWithOptions, ToCss};

use crate::error::{Error, Result};

/// One comma-separated selector, flattened to parse order.
pub type Chain<'i> = Vec<Component<'i>>;

/// A parsed selector list that can be taken apart into chains and printed
/// back.
pub struct SelectorAst<'i> {
    source: &'i str,
    list: SelectorList<'i>,
}

impl<'i> SelectorAst<'i> {
    /// Parse a selector list such as `.a > .b, p:hover`.
    pub fn parse(source: &'i str) -> Result<Self> {
        let list = SelectorList::parse_string_with_options(source, ParserOptions::default())
            .map_err(|err| {
                Error::selector_parse(
                    source,
                    format!("{:?}", err.kind),
                    err.location.line + 1,
                    err.location.column,
                )
            })?;
        Ok(Self { source, list })
    }

    /// Number of comma-separated selectors.
    pub fn len(&self) -> usize {
        self.list.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.0.is_empty()
    }

    /// All chains, in source order.
    pub fn chains(&self) -> Vec<Chain<'i>> {
        self.list.0.iter().map(flatten).collect()
    }

    /// The first chain, or an empty chain for an empty list.
    pub fn first_chain(&self) -> Chain<'i> {
        self.list.0.first().map(flatten).unwrap_or_default()
    }

    /// Replace the list's selectors with the given chains.
    pub fn set_chains(&mut self, chains: Vec<Chain<'i>>) {
        let selectors: Vec<Selector<'i>> = chains.into_iter().map(Selector::from).collect();
        self.list.0 = selectors.into();
    }

    /// Print the selector list.
    pub fn to_css(&self) -> Result<String> {
        self.list
            .to_css_string(PrinterOptions::default())
            .map_err(|err| Error::print(self.source, err.to_string()))
    }
}

/// Flatten a selector into parse order with combinators inline.
fn flatten<'i>(selector: &Selector<'i>) -> Chain<'i> {
    let raw = selector.iter_raw_match_order().as_slice();

    let combinators: Vec<Combinator> = selector
        .iter_raw_match_order()
        .rev()
        .filter_map(|c| c.as_combinator())
        .collect();

    let compounds: Vec<&[Component<'i>]> = raw.split(|c| c.is_combinator()).rev().collect();

    let mut chain = Vec::with_capacity(raw.len());
    for (i, compound) in compounds.iter().enumerate() {
        if i > 0
            && let Some(combinator) = combinators.get(i - 1)
        {
            chain.push(Component::Combinator(*combinator));
        }
        chain.extend(compound.iter().cloned());
    }

    chain
}

/// Whether the node is the `body` type selector.
pub fn is_body_tag(component: &Component<'_>) -> bool {
    match component {
        Component::LocalName(local) => {
            let name: &str = local.name.0.as_ref();
            name == "body"
        }
        _ => false,
    }
}

/// Whether the node is the class configured to stand in for `body`.
pub fn is_body_class(component: &Component<'_>, body_class: &str) -> bool {
    match component {
        Component::Class(class) => {
            let name: &str = class.0.as_ref();
            name == body_class
        }
        _ => false,
    }
}

/// Prefix every chain with `ancestor` and a descendant combinator.
///
/// One chain out per chain in; the original chains are not touched beyond
/// gaining the prefix.
pub fn wrap_with<'i>(ancestor: &[Component<'i>], chains: Vec<Chain<'i>>) -> Vec<Chain<'i>> {
    chains
        .into_iter()
        .map(|mut chain| {
            prepend_component(ancestor, &mut chain);
            chain
        })
        .collect()
}

/// Insert `prefix` followed by a descendant combinator at the head of `chain`.
pub fn prepend_component<'i>(prefix: &[Component<'i>], chain: &mut Chain<'i>) {
    if prefix.is_empty() {
        return;
    }
    let head = prefix
        .iter()
        .cloned()
        .chain(std::iter::once(Component::Combinator(Combinator::Descendant)));
    chain.splice(0..0, head);
}

/// Replace the nodes at `targets` with the nodes of `prefix`, keeping every
/// other node where it is.
///
/// `targets` are indices collected beforehand; they are applied back to front
/// so earlier indices stay valid while splicing.
pub fn replace_tagged_node<'i>(targets: &[usize], prefix: &[Component<'i>], chain: &mut Chain<'i>) {
    let mut targets = targets.to_vec();
    targets.sort_unstable();
    targets.dedup();

    for &index in targets.iter().rev() {
        if index < chain.len() {
            chain.splice(index..=index, prefix.iter().cloned());
        }
    }
}

/// Prefix each selector in `selector` with `wrapper` as an ancestor.
pub fn add_wrapper<'i>(wrapper: &'i str, selector: &'i str) -> Result<String> {
    let mut ast = SelectorAst::parse(selector)?;
    let ancestor = SelectorAst::parse(wrapper)?.first_chain();
    let chains = wrap_with(&ancestor, ast.chains());
    tracing::trace!(wrapper, selector, "wrapping selector");
    ast.set_chains(chains);
    ast.to_css()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(source: &str) -> String {
        SelectorAst::parse(source).unwrap().to_css().unwrap()
    }

    fn rebuilt(source: &str) -> String {
        let mut ast = SelectorAst::parse(source).unwrap();
        let chains = ast.chains();
        ast.set_chains(chains);
        ast.to_css().unwrap()
    }

    #[test]
    fn test_round_trip_simple() {
        assert_eq!(round_trip(".cta"), ".cta");
        assert_eq!(round_trip("p"), "p");
        assert_eq!(round_trip("#main a:hover"), "#main a:hover");
    }

    #[test]
    fn test_round_trip_canonical_whitespace() {
        assert_eq!(round_trip(".a>.b"), ".a > .b");
        assert_eq!(round_trip(".a,.b"), ".a, .b");
        assert_eq!(round_trip("a[href=x]"), "a[href=\"x\"]");
    }

    #[test]
    fn test_flatten_and_rebuild_preserves_selector() {
        for source in [
            ".cta",
            "u + .body .cta",
            "body[class~=\"aolmail_body\"] .cta",
            ".a > .b ~ .c",
            "table td.pad:first-child",
            ".a, .b > .c",
        ] {
            assert_eq!(rebuilt(source), source);
        }
    }

    #[test]
    fn test_flatten_order() {
        let ast = SelectorAst::parse("u + .body").unwrap();
        assert!(!ast.is_empty());
        assert_eq!(ast.len(), 1);
        let chain = ast.first_chain();
        assert_eq!(chain.len(), 3);
        assert!(matches!(&chain[0], Component::LocalName(_)));
        assert!(matches!(
            &chain[1],
            Component::Combinator(Combinator::NextSibling)
        ));
        assert!(is_body_class(&chain[2], "body"));
    }

    #[test]
    fn test_parse_error() {
        let err = SelectorAst::parse(".a >> {").err().unwrap();
        assert!(matches!(err, Error::SelectorParse { .. }));
        assert_eq!(err.selector(), ".a >> {");
    }

    #[test]
    fn test_body_predicates() {
        let ast = SelectorAst::parse("body.body").unwrap();
        let chain = ast.first_chain();
        assert!(is_body_tag(&chain[0]));
        assert!(!is_body_class(&chain[0], "body"));
        assert!(is_body_class(&chain[1], "body"));
        assert!(!is_body_tag(&chain[1]));
        assert!(!is_body_class(&chain[1], "wrapper"));
    }

    #[test]
    fn test_wrap_with_keeps_chain_count() {
        let mut ast = SelectorAst::parse(".a, .b .c, p").unwrap();
        let wrapper = SelectorAst::parse("[owa]").unwrap().first_chain();
        let chains = wrap_with(&wrapper, ast.chains());
        assert_eq!(chains.len(), 3);
        ast.set_chains(chains);
        assert_eq!(ast.len(), 3);
        assert_eq!(ast.to_css().unwrap(), "[owa] .a, [owa] .b .c, [owa] p");
    }

    #[test]
    fn test_prepend_component_keeps_order() {
        let source = "u + .body";
        let mut ast = SelectorAst::parse(".cta").unwrap();
        let prefix = SelectorAst::parse(source).unwrap().first_chain();
        let mut chain = ast.first_chain();
        prepend_component(&prefix, &mut chain);
        ast.set_chains(vec![chain]);
        assert_eq!(ast.to_css().unwrap(), "u + .body .cta");
    }

    #[test]
    fn test_replace_tagged_node_splices_in_place() {
        let mut ast = SelectorAst::parse("table .wrapper td").unwrap();
        let prefix = SelectorAst::parse("u + .body").unwrap().first_chain();
        let mut chain = ast.first_chain();
        let index = chain
            .iter()
            .position(|c| is_body_class(c, "wrapper"))
            .unwrap();
        replace_tagged_node(&[index], &prefix, &mut chain);
        ast.set_chains(vec![chain]);
        assert_eq!(ast.to_css().unwrap(), "table u + .body td");
    }

    #[test]
    fn test_add_wrapper() {
        assert_eq!(
            add_wrapper(".moz-text-html", ".a:hover, .b").unwrap(),
            ".moz-text-html .a:hover, .moz-text-html .b"
        );
    }

    #[test]
    fn test_add_wrapper_invalid_selector() {
        assert!(add_wrapper("[owa]", "..bad").is_err());
    }
}
