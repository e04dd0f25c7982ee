//! Document Tree
//!
//! Arena-backed tree with id/tag/attribute queries, mutation, and
//! cross-document subtree adoption.

use crate::node::{ElementData, Node, NodeData, NodeId};

/// An HTML document.
///
/// Detached nodes keep their arena slot; queries only see nodes reachable
/// from the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create an empty document (root node only).
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
        }
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the arena, including detached ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Create a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.create(NodeData::Element(ElementData::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create(NodeData::Text(text.to_string()))
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Borrow a node mutably.
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Element data, if `id` is an element.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match &self.node(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable element data, if `id` is an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match &mut self.node_mut(id).data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Append a detached node to a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Insert a detached node directly after `sibling` under its parent.
    /// Falls back to appending when `sibling` is detached.
    pub fn insert_after(&mut self, sibling: NodeId, node: NodeId) {
        let Some(parent) = self.nodes[sibling.index()].parent else {
            return;
        };
        self.nodes[node.index()].parent = Some(parent);
        let children = &mut self.nodes[parent.index()].children;
        match children.iter().position(|&c| c == sibling) {
            Some(pos) => children.insert(pos + 1, node),
            None => children.push(node),
        }
    }

    /// Detach a node from its parent. The node keeps its subtree.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.index()].parent.take() else {
            return;
        };
        self.nodes[parent.index()].children.retain(|&c| c != id);
    }

    /// Detach every child of `parent`, leaving the node itself in place.
    pub fn clear_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.nodes[parent.index()].children);
        tracing::trace!(count = children.len(), "detached children");
        for child in children {
            self.nodes[child.index()].parent = None;
        }
    }

    /// Children of a node.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ancestor chain from `id` upward, including `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut cur = Some(id);
        while let Some(node) = cur {
            out.push(node);
            cur = self.node(node).parent;
        }
        out
    }

    /// Preorder descendants of `id`, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(id).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            for child in self.node(node).children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }

    /// First element with the given `id` attribute, searched document-wide.
    pub fn element_by_id(&self, id_value: &str) -> Option<NodeId> {
        self.descendants(NodeId::ROOT).into_iter().find(|n| {
            self.element(*n)
                .and_then(|el| el.attr("id"))
                .is_some_and(|v| v == id_value)
        })
    }

    /// Elements with the given tag under `scope`, in document order.
    pub fn elements_by_tag(&self, scope: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|el| el.tag == tag))
            .collect()
    }

    /// Elements carrying the given attribute under `scope`, in document order.
    pub fn elements_with_attr(&self, scope: NodeId, attr: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.element(*n).is_some_and(|el| el.has_attr(attr)))
            .collect()
    }

    /// Concatenated text of a subtree, including `id` itself.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeData::Text(t) = &self.node(id).data {
            out.push_str(t);
        }
        for node in self.descendants(id) {
            if let NodeData::Text(t) = &self.node(node).data {
                out.push_str(t);
            }
        }
        out
    }

    /// The `<title>` text, if the document has one.
    pub fn title(&self) -> Option<String> {
        let title = self
            .elements_by_tag(NodeId::ROOT, "title")
            .into_iter()
            .next()?;
        Some(self.text_content(title).trim().to_string())
    }

    /// Replace the `<title>` text. No-op when the document has no `<title>`.
    pub fn set_title(&mut self, title: &str) {
        if let Some(node) = self
            .elements_by_tag(NodeId::ROOT, "title")
            .into_iter()
            .next()
        {
            self.clear_children(node);
            let text = self.create_text(title);
            self.append_child(node, text);
        }
    }

    /// Deep-copy a subtree from another document under `parent`.
    /// Returns the id of the copied root.
    pub fn adopt_from(&mut self, src: &Document, src_node: NodeId, parent: NodeId) -> NodeId {
        let copy = self.create(src.node(src_node).data.clone());
        self.append_child(parent, copy);
        for &child in src.children(src_node) {
            self.adopt_from(src, child, copy);
        }
        copy
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
