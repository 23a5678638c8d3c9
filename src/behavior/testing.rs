//! In-memory doubles for the behavior tests.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
};

use super::{dom::Dom, lazy::ImageObserver, locale::Host, locale::PreferenceStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    parent: Option<usize>,
    children: Vec<usize>,
    attributes: BTreeMap<String, String>,
}

/// A tree of elements rooted at an `html` node.
///
/// Understands just enough selector syntax for the default config:
/// `.class`, `tag`, `tag[attr]`, `tag[attr="v"]` and `tag[attr^="v"]`.
#[derive(Debug)]
pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    active: RefCell<Option<usize>>,
    scrolled: RefCell<Vec<NodeId>>,
}

impl FakeDom {
    pub fn new() -> Self {
        let root = FakeNode {
            tag: "html".to_string(),
            ..Default::default()
        };
        Self {
            nodes: RefCell::new(vec![root]),
            active: RefCell::new(None),
            scrolled: RefCell::new(Vec::new()),
        }
    }

    pub fn with_lang(lang: &str) -> Self {
        let dom = Self::new();
        dom.set_attribute(&dom.root(), "lang", lang);
        dom
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn append(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = nodes.len();
        nodes.push(FakeNode {
            tag: tag.to_string(),
            parent: Some(parent.0),
            children: Vec::new(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        });
        nodes[parent.0].children.push(id);
        NodeId(id)
    }

    pub fn scrolled(&self) -> Vec<NodeId> {
        self.scrolled.borrow().clone()
    }

    fn preorder(&self, from: usize) -> Vec<usize> {
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id].children.iter().rev());
        }
        out
    }

    fn matches(&self, id: usize, selector: &str) -> bool {
        let nodes = self.nodes.borrow();
        let node = &nodes[id];
        if let Some(class) = selector.strip_prefix('.') {
            return node
                .attributes
                .get("class")
                .is_some_and(|c| c.split_whitespace().any(|x| x == class));
        }
        let (tag, cond) = match selector.find('[') {
            Some(i) => (&selector[..i], Some(&selector[i + 1..selector.len() - 1])),
            None => (selector, None),
        };
        if !tag.is_empty() && tag != node.tag {
            return false;
        }
        let unquote = |s: &str| s.trim_matches('"').to_string();
        match cond {
            None => true,
            Some(cond) => {
                if let Some((name, value)) = cond.split_once("^=") {
                    node.attributes
                        .get(name)
                        .is_some_and(|v| v.starts_with(&unquote(value)))
                } else if let Some((name, value)) = cond.split_once('=') {
                    node.attributes.get(name) == Some(&unquote(value))
                } else {
                    node.attributes.contains_key(cond)
                }
            }
        }
    }
}

impl Dom for FakeDom {
    type Node = NodeId;

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.preorder(0)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .map(NodeId)
            .collect()
    }

    fn descendants(&self, node: &NodeId) -> Vec<NodeId> {
        self.preorder(node.0).into_iter().skip(1).map(NodeId).collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let nodes = self.nodes.borrow();
        self.preorder(0)
            .into_iter()
            .find(|n| nodes[*n].attributes.get("id").is_some_and(|v| v == id))
            .map(NodeId)
    }

    fn tag_name(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].tag.clone()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|c| c.split_whitespace().any(|x| x == class))
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        if self.has_class(node, class) {
            return;
        }
        let classes = match self.attribute(node, "class") {
            Some(c) if !c.trim().is_empty() => format!("{} {}", c.trim(), class),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &classes);
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        if let Some(c) = self.attribute(node, "class") {
            let classes = c
                .split_whitespace()
                .filter(|x| *x != class)
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attribute(node, "class", &classes);
        }
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut cur = Some(node.0);
        while let Some(id) = cur {
            if id == ancestor.0 {
                return true;
            }
            cur = nodes[id].parent;
        }
        false
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.borrow().map(NodeId)
    }

    fn focus(&self, node: &NodeId) {
        *self.active.borrow_mut() = Some(node.0);
    }

    fn scroll_into_view(&self, node: &NodeId) {
        self.scrolled.borrow_mut().push(*node);
    }

    fn document_language(&self) -> Option<String> {
        self.attribute(&self.root(), "lang")
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    /// Reads work, writes are dropped (e.g. quota exceeded).
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Default::default()
        }
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.set(key, value);
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if !self.read_only {
            self.values
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }
    }
}

#[derive(Debug)]
pub struct FakeHost {
    language: Option<String>,
    pathname: String,
    redirects: RefCell<Vec<String>>,
}

impl FakeHost {
    pub fn new(language: &str, pathname: &str) -> Self {
        Self {
            language: Some(language.to_string()),
            pathname: pathname.to_string(),
            redirects: RefCell::new(Vec::new()),
        }
    }

    pub fn without_language(pathname: &str) -> Self {
        Self {
            language: None,
            pathname: pathname.to_string(),
            redirects: RefCell::new(Vec::new()),
        }
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.borrow().clone()
    }
}

impl Host for FakeHost {
    fn primary_language(&self) -> Option<String> {
        self.language.clone()
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }

    fn redirect(&self, path: &str) {
        self.redirects.borrow_mut().push(path.to_string());
    }
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    observed: RefCell<Vec<NodeId>>,
    unobserved: RefCell<Vec<NodeId>>,
}

impl RecordingObserver {
    pub fn observed(&self) -> Vec<NodeId> {
        self.observed.borrow().clone()
    }

    pub fn unobserved(&self) -> Vec<NodeId> {
        self.unobserved.borrow().clone()
    }
}

impl ImageObserver<NodeId> for RecordingObserver {
    fn observe(&self, node: &NodeId) {
        self.observed.borrow_mut().push(*node);
    }

    fn unobserve(&self, node: &NodeId) {
        self.observed.borrow_mut().retain(|n| n != node);
        self.unobserved.borrow_mut().push(*node);
    }
}
