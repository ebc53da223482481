//! Output tree model
//!
//! An ordered, node-labeled tree built incrementally during traversal. A
//! node holds either a text value (leaf) or child nodes (container), never
//! both; the constructors enforce that split. Nodes are only ever added,
//! never removed or mutated after creation.

/// One node of the output tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create a container node: no text, zero or more children to come
    pub fn container(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Create a leaf node holding one converted text value
    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            children: Vec::new(),
        }
    }

    /// Node name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Leaf text, if this is a leaf
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child nodes in insertion order
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Whether this node has neither text nor children
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.children.is_empty()
    }

    /// Append a child node
    pub fn push_child(&mut self, child: Element) {
        debug_assert!(self.text.is_none(), "leaf nodes cannot have children");
        self.children.push(child);
    }

    /// Get or create the container child with the given name
    ///
    /// This is the memoization point for shared path prefixes: multiple
    /// rules contributing to the same sub-path reuse one container instead
    /// of creating duplicate siblings.
    pub fn ensure_child(&mut self, name: &str) -> &mut Element {
        let position = self
            .children
            .iter()
            .position(|c| c.name == name && c.text.is_none());
        match position {
            Some(i) => &mut self.children[i],
            None => {
                self.children.push(Element::container(name));
                self.children.last_mut().unwrap()
            }
        }
    }

    /// First child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given name, in order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }
}

/// A finished output tree with a single root node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    root: Element,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}
