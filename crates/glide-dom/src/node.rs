//! DOM Node Types
//!
//! Nodes are stored in an arena owned by `Document` and addressed by `NodeId`.

/// Index of a node within its document's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document root.
    pub const ROOT: NodeId = NodeId(0);

    /// Arena index of this node.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Parent node, `None` while detached.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Node payload.
    pub data: NodeData,
}

impl Node {
    /// Create a detached node.
    pub fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

/// Node payload.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// The document itself (root node only).
    Document,
    /// `<!DOCTYPE ...>`
    Doctype { name: String },
    /// An element with tag and attributes.
    Element(ElementData),
    /// A text node.
    Text(String),
    /// A comment node.
    Comment(String),
}

/// Element tag and attributes.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Lowercase local name ("a", "div", "script").
    pub tag: String,
    attrs: Vec<(String, String)>,
}

impl ElementData {
    /// Create element data with no attributes.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Check attribute presence (covers valueless attributes like `download`).
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(k, _)| k == name)
    }

    /// Set or replace an attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    /// All attributes in insertion order.
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    /// Check for a token in the `class` attribute.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    /// Add a class token if absent.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let merged = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {}", existing.trim(), class)
            }
            _ => class.to_string(),
        };
        self.set_attr("class", &merged);
    }

    /// Remove a class token if present.
    pub fn remove_class(&mut self, class: &str) {
        let Some(existing) = self.attr("class").map(str::to_string) else {
            return;
        };
        let kept: Vec<&str> = existing
            .split_whitespace()
            .filter(|t| *t != class)
            .collect();
        if kept.is_empty() {
            self.remove_attr("class");
        } else {
            let joined = kept.join(" ");
            self.set_attr("class", &joined);
        }
    }
}
