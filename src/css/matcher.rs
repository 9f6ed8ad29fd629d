//! Right-to-left selector matching against the element tree.

use crate::css::model::*;
use crate::dom::node::{NodeData, NodeId};
use crate::dom::tree::Dom;

impl SelectorList {
    /// Whether any selector in the list matches `node`.
    pub fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(dom, node))
    }
}

impl Selector {
    /// Whether this selector matches `node`.
    ///
    /// Ancestor constraints may be satisfied by nodes outside any query scope,
    /// the same way `element.querySelector` behaves in a browser.
    pub fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        matches_compound(&self.subject, dom, node) && matches_ancestors(&self.ancestors, dom, node)
    }
}

/// Match the remaining `(combinator, compound)` chain leftward from `node`.
///
/// Descendant steps backtrack over every matching ancestor, so `div p` inside
/// `div > section > div > p` is found regardless of which `div` binds first.
fn matches_ancestors(chain: &[(Combinator, CompoundSelector)], dom: &Dom, node: NodeId) -> bool {
    let Some(((combinator, compound), rest)) = chain.split_first() else {
        return true;
    };
    match combinator {
        Combinator::Child => dom.parent(node).is_some_and(|parent| {
            matches_compound(compound, dom, parent) && matches_ancestors(rest, dom, parent)
        }),
        Combinator::Descendant => dom.ancestors(node).into_iter().any(|ancestor| {
            matches_compound(compound, dom, ancestor) && matches_ancestors(rest, dom, ancestor)
        }),
    }
}

/// Check whether a compound selector matches a single element.
fn matches_compound(compound: &CompoundSelector, dom: &Dom, node: NodeId) -> bool {
    let Some(data) = dom.get(node).filter(|d| d.is_element()) else {
        return false;
    };
    compound
        .components
        .iter()
        .all(|component| matches_component(component, dom, node, data))
}

fn matches_component(component: &SelectorComponent, dom: &Dom, node: NodeId, data: &NodeData) -> bool {
    match component {
        SelectorComponent::Type(name) => data.tag.eq_ignore_ascii_case(name),
        SelectorComponent::Universal => true,
        SelectorComponent::Class(name) => data.has_class(name),
        SelectorComponent::Id(name) => data.id.as_deref() == Some(name.as_str()),
        SelectorComponent::Attribute { name, value } => match (data.attribute(name), value) {
            (Some(actual), Some(expected)) => actual == *expected,
            (Some(_), None) => true,
            (None, _) => false,
        },
        SelectorComponent::PseudoClass(PseudoClass::FirstChild) => dom
            .parent(node)
            .is_some_and(|p| dom.element_children(p).first() == Some(&node)),
        SelectorComponent::PseudoClass(PseudoClass::LastChild) => dom
            .parent(node)
            .is_some_and(|p| dom.element_children(p).last() == Some(&node)),
        SelectorComponent::PseudoClass(PseudoClass::Disabled) => {
            data.attribute("disabled").is_some()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::css::parser::parse_selector_list;
    use crate::dom::node::{NodeData, NodeId};
    use crate::dom::tree::Dom;

    /// Build a test tree:
    /// ```text
    /// document
    /// └── div#app
    ///     ├── p#msg.lead        "hi"
    ///     ├── section
    ///     │   └── div.inner
    ///     │       └── p#deep
    ///     └── input#field[type=text][disabled]
    /// ```
    struct Fixture {
        dom: Dom,
        app: NodeId,
        msg: NodeId,
        inner: NodeId,
        deep: NodeId,
        field: NodeId,
    }

    fn build() -> Fixture {
        let mut dom = Dom::new();
        let doc = dom.insert(NodeData::document());
        let app = dom.insert_child(doc, NodeData::element("div").with_id("app")).unwrap();
        let msg = dom
            .insert_child(app, NodeData::element("p").with_id("msg").with_class("lead"))
            .unwrap();
        dom.insert_child(msg, NodeData::text("hi"));
        let section = dom.insert_child(app, NodeData::element("section")).unwrap();
        let inner = dom
            .insert_child(section, NodeData::element("div").with_class("inner"))
            .unwrap();
        let deep = dom
            .insert_child(inner, NodeData::element("p").with_id("deep"))
            .unwrap();
        let field = dom
            .insert_child(
                app,
                NodeData::element("input")
                    .with_id("field")
                    .with_attribute("type", "text")
                    .with_attribute("disabled", ""),
            )
            .unwrap();
        Fixture { dom, app, msg, inner, deep, field }
    }

    fn matches(f: &Fixture, selector: &str, node: NodeId) -> bool {
        parse_selector_list(selector).unwrap().matches(&f.dom, node)
    }

    #[test]
    fn match_non_ascii_and_hyphenated_names() {
        let mut dom = Dom::new();
        let doc = dom.insert(NodeData::document());
        let umlaut = dom
            .insert_child(doc, NodeData::element("div").with_id("ü").with_class("café"))
            .unwrap();
        let dashed = dom.insert_child(umlaut, NodeData::element("b").with_id("-x")).unwrap();
        let check = |selector: &str, node| parse_selector_list(selector).unwrap().matches(&dom, node);
        assert!(check("#ü", umlaut));
        assert!(check(".café", umlaut));
        assert!(check("div#ü.café > #-x", dashed));
        assert!(!check("#ü", dashed));
    }

    #[test]
    fn match_id_class_type() {
        let f = build();
        assert!(matches(&f, "#msg", f.msg));
        assert!(matches(&f, ".lead", f.msg));
        assert!(matches(&f, "p", f.msg));
        assert!(matches(&f, "P.lead#msg", f.msg));
        assert!(!matches(&f, "#msg", f.app));
    }

    #[test]
    fn universal_skips_non_elements() {
        let f = build();
        let text = f.dom.children(f.msg)[0];
        assert!(matches(&f, "*", f.msg));
        assert!(!matches(&f, "*", text));
    }

    #[test]
    fn child_combinator() {
        let f = build();
        assert!(matches(&f, "#app > p", f.msg));
        assert!(!matches(&f, "#app > p", f.deep));
    }

    #[test]
    fn descendant_combinator() {
        let f = build();
        assert!(matches(&f, "#app p", f.deep));
        assert!(matches(&f, "section p", f.deep));
        assert!(!matches(&f, "section p", f.msg));
    }

    #[test]
    fn descendant_backtracks_over_ancestors() {
        let f = build();
        // The nearest div ancestor (.inner) has no `#app` parent, but the outer one does.
        assert!(matches(&f, "#app > section div p", f.deep));
        assert!(matches(&f, "div > section p", f.deep));
    }

    #[test]
    fn attribute_selectors() {
        let f = build();
        assert!(matches(&f, "[type]", f.field));
        assert!(matches(&f, "input[type=text]", f.field));
        assert!(matches(&f, "input[type='text']", f.field));
        assert!(!matches(&f, "input[type=checkbox]", f.field));
        assert!(matches(&f, "[id=msg]", f.msg));
    }

    #[test]
    fn pseudo_classes() {
        let f = build();
        assert!(matches(&f, "p:first-child", f.msg));
        assert!(matches(&f, "input:last-child", f.field));
        assert!(matches(&f, ":disabled", f.field));
        assert!(!matches(&f, ":disabled", f.msg));
        assert!(matches(&f, ".inner:first-child", f.inner));
    }

    #[test]
    fn selector_list_matches_any() {
        let f = build();
        assert!(matches(&f, "#nope, #msg", f.msg));
        assert!(!matches(&f, "#nope, #other", f.msg));
    }
}
