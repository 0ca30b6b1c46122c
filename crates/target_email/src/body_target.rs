//! Retargeting the `body` anchor of a selector.
//!
//! Webmail clients rewrite `<body>` into their own markup, so hacks that key
//! off the body have to either modify an existing body qualifier in place or
//! add one in front of the selector.

use lightningcss::selector::Component;
use smallvec::SmallVec;

use crate::error::Result;
use crate::selector::{
    Chain, SelectorAst, is_body_class, is_body_tag, prepend_component, replace_tagged_node,
};

/// Rewrite `selector` so its body anchor becomes `replacement`.
///
/// Per comma-separated selector: the first `body` type selector or
/// `.{body_class}` class (scanning left to right) is replaced by the nodes of
/// `replacement`. A selector without either gets `replacement` prepended as
/// an ancestor.
///
/// ```
/// use target_email::retarget_body;
///
/// assert_eq!(retarget_body("body", "u + .body", ".cta").unwrap(), "u + .body .cta");
/// assert_eq!(
///     retarget_body("wrapper", "u + .wrapper", ".wrapper .cta").unwrap(),
///     "u + .wrapper .cta"
/// );
/// ```
pub fn retarget_body<'i>(body_class: &str, replacement: &'i str, selector: &'i str) -> Result<String> {
    let mut ast = SelectorAst::parse(selector)?;
    let prefix = SelectorAst::parse(replacement)?.first_chain();

    let chains: Vec<Chain<'i>> = ast
        .chains()
        .into_iter()
        .map(|chain| retarget_chain(body_class, &prefix, chain))
        .collect();

    tracing::trace!(body_class, replacement, selector, "retargeting body");
    ast.set_chains(chains);
    ast.to_css()
}

/// Retarget a single chain.
///
/// The anchor is spliced out node by node, so an anchor preceded by other
/// nodes of its compound leaves them glued to the front of the replacement:
/// `.dark.body .a` becomes `.darku + .body .a`. Write the anchor first in its
/// compound (`.body.dark .a`) to keep the qualifier.
pub fn retarget_chain<'i>(body_class: &str, prefix: &[Component<'i>], mut chain: Chain<'i>) -> Chain<'i> {
    // Collect first and splice afterwards; one anchor per chain.
    let anchors: SmallVec<[usize; 1]> = chain
        .iter()
        .position(|node| is_body_tag(node) || is_body_class(node, body_class))
        .into_iter()
        .collect();

    if anchors.is_empty() {
        prepend_component(prefix, &mut chain);
    } else {
        replace_tagged_node(&anchors, prefix, &mut chain);
    }

    chain
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gmail(body_class: &str, selector: &str) -> String {
        let replacement = format!("u + .{body_class}");
        retarget_body(body_class, &replacement, selector).unwrap()
    }

    fn aol(body_class: &str, selector: &str) -> String {
        let replacement = format!("body[class~=\"aolmail_{body_class}\"]");
        retarget_body(body_class, &replacement, selector).unwrap()
    }

    #[test]
    fn test_prepends_without_anchor() {
        assert_eq!(gmail("body", ".cta"), "u + .body .cta");
        assert_eq!(gmail("body", "table td > a"), "u + .body table td > a");
    }

    #[test]
    fn test_replaces_body_tag() {
        assert_eq!(gmail("body", "body .cta"), "u + .body .cta");
        assert_eq!(aol("body", "body .cta"), "body[class~=\"aolmail_body\"] .cta");
    }

    #[test]
    fn test_replaces_body_class() {
        assert_eq!(
            aol("wrapper", ".wrapper .cta"),
            "body[class~=\"aolmail_wrapper\"] .cta"
        );
    }

    #[test]
    fn test_keeps_compound_around_body_tag() {
        assert_eq!(gmail("body", "body.dark .cta"), "u + .body.dark .cta");
    }

    #[test]
    fn test_anchor_after_compound_qualifier() {
        assert_eq!(gmail("body", ".dark.body .a"), ".darku + .body .a");
        assert_eq!(gmail("body", ".body.dark .a"), "u + .body.dark .a");
    }

    #[test]
    fn test_anchor_in_middle_of_chain() {
        assert_eq!(gmail("wrapper", "html .wrapper > td"), "html u + .wrapper > td");
    }

    #[test]
    fn test_only_first_anchor_is_replaced() {
        assert_eq!(gmail("body", "body .body .cta"), "u + .body .body .cta");
        assert_eq!(
            aol("body", ".body body .cta"),
            "body[class~=\"aolmail_body\"] body .cta"
        );
    }

    #[test]
    fn test_each_chain_is_independent() {
        assert_eq!(
            gmail("wrapper", ".wrapper .a, .b, body .c"),
            "u + .wrapper .a, u + .wrapper .b, u + .wrapper .c"
        );
    }

    #[test]
    fn test_chain_count_is_preserved() {
        let selector = ".a, .b > .c, body p, .body:hover";
        let output = gmail("body", selector);
        let before = SelectorAst::parse(selector).unwrap().len();
        let after = SelectorAst::parse(&output).unwrap().len();
        assert_eq!(before, after);
    }

    #[test]
    fn test_other_class_is_not_an_anchor() {
        assert_eq!(gmail("wrapper", ".body .cta"), "u + .wrapper .body .cta");
    }

    #[test]
    fn test_invalid_selector() {
        assert!(retarget_body("body", "u + .body", ".cta >").is_err());
    }
}
