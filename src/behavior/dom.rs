use std::fmt::Debug;

/// The slice of a document the page behaviors work against.
///
/// `Node` is an element handle; two handles compare equal when they point at
/// the same element. Implementations are expected to be cheap to call and to
/// swallow host failures (a missing element is `None`, not an error).
pub trait Dom {
    type Node: Clone + PartialEq + Debug;

    fn query_selector(&self, selector: &str) -> Option<Self::Node>;

    /// All matches in document order.
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Descendants of `node` in document order, `node` excluded.
    fn descendants(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Lowercase tag name.
    fn tag_name(&self, node: &Self::Node) -> String;

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;

    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;

    fn add_class(&self, node: &Self::Node, class: &str);

    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    fn active_element(&self) -> Option<Self::Node>;

    fn focus(&self, node: &Self::Node);

    /// Smooth scroll aligning the node's top edge with the viewport.
    fn scroll_into_view(&self, node: &Self::Node);

    /// The `lang` attribute of the root element, if set.
    fn document_language(&self) -> Option<String>;
}

/// Whether keyboard navigation can land on `node`.
///
/// Links need a destination, hidden inputs never count, and any element with
/// a non-negative `tabindex` is focusable regardless of its tag.
pub fn is_focusable<D: Dom>(dom: &D, node: &D::Node) -> bool {
    let by_tag = match dom.tag_name(node).as_str() {
        "a" => dom.attribute(node, "href").is_some(),
        "button" | "textarea" | "select" => true,
        "input" => !dom
            .attribute(node, "type")
            .is_some_and(|t| t.eq_ignore_ascii_case("hidden")),
        _ => false,
    };
    by_tag
        || dom
            .attribute(node, "tabindex")
            .and_then(|t| t.trim().parse::<i32>().ok())
            .is_some_and(|i| i >= 0)
}

pub fn focusable_descendants<D: Dom>(dom: &D, node: &D::Node) -> Vec<D::Node> {
    dom.descendants(node)
        .into_iter()
        .filter(|n| is_focusable(dom, n))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::testing::FakeDom;

    #[test]
    fn test_focusable_by_tag() {
        let dom = FakeDom::new();
        let root = dom.root();
        let link = dom.append(root, "a", &[("href", "/cv")]);
        let bare_link = dom.append(root, "a", &[]);
        let button = dom.append(root, "button", &[]);
        let input = dom.append(root, "input", &[("type", "text")]);
        let hidden = dom.append(root, "input", &[("type", "hidden")]);
        let div = dom.append(root, "div", &[]);

        assert!(is_focusable(&dom, &link));
        assert!(!is_focusable(&dom, &bare_link));
        assert!(is_focusable(&dom, &button));
        assert!(is_focusable(&dom, &input));
        assert!(!is_focusable(&dom, &hidden));
        assert!(!is_focusable(&dom, &div));
    }

    #[test]
    fn test_focusable_by_tabindex() {
        let dom = FakeDom::new();
        let root = dom.root();
        let zero = dom.append(root, "div", &[("tabindex", "0")]);
        let positive = dom.append(root, "span", &[("tabindex", "3")]);
        let negative = dom.append(root, "div", &[("tabindex", "-1")]);
        let garbage = dom.append(root, "div", &[("tabindex", "x")]);

        assert!(is_focusable(&dom, &zero));
        assert!(is_focusable(&dom, &positive));
        assert!(!is_focusable(&dom, &negative));
        assert!(!is_focusable(&dom, &garbage));
    }

    #[test]
    fn test_focusable_descendants_document_order() {
        let dom = FakeDom::new();
        let root = dom.root();
        let menu = dom.append(root, "ul", &[]);
        let li1 = dom.append(menu, "li", &[]);
        let li2 = dom.append(menu, "li", &[]);
        // appended out of order on purpose
        let second = dom.append(li2, "a", &[("href", "#b")]);
        let first = dom.append(li1, "a", &[("href", "#a")]);
        let outside = dom.append(root, "button", &[]);

        let found = focusable_descendants(&dom, &menu);
        assert_eq!(found, vec![first, second]);
        assert!(!found.contains(&outside));
    }
}
