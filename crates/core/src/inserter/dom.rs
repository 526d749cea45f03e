//! Page document access
//!
//! [`PageDom`] is the slice of the DOM the inserter needs. [`MemoryPage`] is
//! a small arena-backed document that implements it, with event listeners
//! that observe bubbling dispatch.

use std::collections::BTreeMap;

use serde::Serialize;

/// Handle to an element in a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

/// A synthetic DOM event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomEvent {
    pub kind:    String,
    pub bubbles: bool,
}

impl DomEvent {
    pub fn bubbling(kind: &str) -> Self {
        Self {
            kind:    kind.to_string(),
            bubbles: true,
        }
    }
}

pub trait PageDom {
    /// The element that currently has focus, if it is not the body
    fn active_element(&self) -> Option<NodeId>;

    /// Every element in document order
    fn elements(&self) -> Vec<NodeId>;

    /// Lower-case tag name
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Editable through `contenteditable`, on the element or inherited
    fn is_content_editable(&self, node: NodeId) -> bool;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn set_text_content(&mut self, node: NodeId, text: &str);

    fn focus(&mut self, node: NodeId);

    fn dispatch_event(&mut self, node: NodeId, event: &DomEvent);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag:          String,
    pub attributes:   BTreeMap<String, String>,
    pub value:        String,
    pub text_content: String,
    parent:           Option<NodeId>,
    children:         Vec<NodeId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag:          tag.to_ascii_lowercase(),
            attributes:   BTreeMap::new(),
            value:        String::new(),
            text_content: String::new(),
            parent:       None,
            children:     Vec::new(),
        }
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .insert(name.to_ascii_lowercase(), value.to_string());
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Listener {
    node: NodeId,
    kind: String,
    /// Targets of the events this listener has seen
    seen: Vec<NodeId>,
}

/// In-memory document rooted at a `body` element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryPage {
    nodes:     Vec<Element>,
    focused:   Option<NodeId>,
    listeners: Vec<Listener>,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            nodes:     vec![Element::new("body")],
            focused:   None,
            listeners: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append `element` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, mut element: Element) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(element);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }

    pub fn value(&self, node: NodeId) -> &str {
        self.nodes.get(node.0).map(|e| e.value.as_str()).unwrap_or("")
    }

    pub fn text_content(&self, node: NodeId) -> &str {
        self.nodes
            .get(node.0)
            .map(|e| e.text_content.as_str())
            .unwrap_or("")
    }

    /// Listen for `kind` events targeted at `node` or bubbling through it
    pub fn add_event_listener(&mut self, node: NodeId, kind: &str) -> ListenerId {
        self.listeners.push(Listener {
            node,
            kind: kind.to_string(),
            seen: Vec::new(),
        });
        ListenerId(self.listeners.len() - 1)
    }

    /// Event targets observed by a listener, oldest first
    pub fn observed(&self, listener: ListenerId) -> &[NodeId] {
        self.listeners
            .get(listener.0)
            .map(|l| l.seen.as_slice())
            .unwrap_or(&[])
    }

    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = vec![node];
        let mut current = node;
        while let Some(parent) = self.nodes.get(current.0).and_then(|e| e.parent) {
            path.push(parent);
            current = parent;
        }
        path
    }

    fn collect_preorder(&self, node: NodeId, out: &mut Vec<NodeId>) {
        out.push(node);
        if let Some(element) = self.nodes.get(node.0) {
            for child in &element.children {
                self.collect_preorder(*child, out);
            }
        }
    }
}

impl PageDom for MemoryPage {
    fn active_element(&self) -> Option<NodeId> {
        self.focused.filter(|node| *node != self.body())
    }

    fn elements(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        self.collect_preorder(self.body(), &mut out);
        out
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).map(|e| e.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.nodes
            .get(node.0)
            .and_then(|e| e.attributes.get(&name.to_ascii_lowercase()))
            .map(String::as_str)
    }

    fn is_content_editable(&self, node: NodeId) -> bool {
        for ancestor in self.ancestors_inclusive(node) {
            match self.attribute(ancestor, "contenteditable") {
                Some(v) if v.eq_ignore_ascii_case("false") => return false,
                Some(v) if v.is_empty()
                    || v.eq_ignore_ascii_case("true")
                    || v.eq_ignore_ascii_case("plaintext-only") =>
                {
                    return true
                },
                _ => {},
            }
        }
        false
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.nodes.get_mut(node.0) {
            element.value = value.to_string();
        }
    }

    fn set_text_content(&mut self, node: NodeId, text: &str) {
        let Some(element) = self.nodes.get_mut(node.0) else {
            return;
        };
        // Replacing text content drops the element's subtree
        for child in std::mem::take(&mut element.children) {
            if let Some(c) = self.nodes.get_mut(child.0) {
                c.parent = None;
            }
        }
        self.nodes[node.0].text_content = text.to_string();
    }

    fn focus(&mut self, node: NodeId) {
        if node.0 < self.nodes.len() {
            self.focused = Some(node);
        }
    }

    fn dispatch_event(&mut self, node: NodeId, event: &DomEvent) {
        let path = if event.bubbles {
            self.ancestors_inclusive(node)
        } else {
            vec![node]
        };

        for listener in self.listeners.iter_mut() {
            if listener.kind == event.kind && path.contains(&listener.node) {
                listener.seen.push(node);
            }
        }
    }
}
