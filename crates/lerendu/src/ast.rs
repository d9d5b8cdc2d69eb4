// Owned syntax trees
//
// A parser-independent tree that implements `SyntaxNode`, for callers that
// build or deserialize trees themselves.

use crate::traits::{NodeId, Point, SyntaxNode};
use serde::{Deserialize, Serialize};

/// Node description used to build a [`SyntaxTree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    /// Syntactic category
    pub kind: String,

    /// Start of the span
    pub start: Point,

    /// End of the span
    pub end: Point,

    /// Named (semantic) or anonymous (punctuation) node
    #[serde(default = "named_by_default")]
    pub named: bool,

    /// Children, each with the field name it occupies (if any)
    #[serde(default)]
    pub children: Vec<AstChild>,
}

/// Child slot of an [`AstNode`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstChild {
    /// Field name the grammar assigns to this slot
    #[serde(default)]
    pub field: Option<String>,

    /// The child itself
    pub node: AstNode,
}

fn named_by_default() -> bool {
    true
}

impl AstNode {
    /// Create a named node with no children
    pub fn new(kind: impl Into<String>, start: Point, end: Point) -> Self {
        Self {
            kind: kind.into(),
            start,
            end,
            named: true,
            children: Vec::new(),
        }
    }

    /// Mark the node as anonymous
    pub fn anonymous(mut self) -> Self {
        self.named = false;
        self
    }

    /// Append a child without a field name
    pub fn with_child(mut self, child: AstNode) -> Self {
        self.children.push(AstChild { field: None, node: child });
        self
    }

    /// Append a child occupying the given field
    pub fn with_field(mut self, field: impl Into<String>, child: AstNode) -> Self {
        self.children.push(AstChild {
            field: Some(field.into()),
            node: child,
        });
        self
    }

    /// Add a child node
    pub fn add_child(&mut self, field: Option<String>, child: AstNode) {
        self.children.push(AstChild { field, node: child });
    }

    /// Total number of nodes in this subtree
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(|c| c.node.len()).sum::<usize>()
    }

    /// Always false: a node counts itself
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
struct Slot {
    kind: String,
    start: Point,
    end: Point,
    named: bool,
    parent: Option<usize>,
    children: Vec<usize>,
    fields: Vec<Option<String>>,
}

/// Arena-backed immutable syntax tree.
///
/// Node ids are arena indices in pre-order, so the root is always `0`.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    slots: Vec<Slot>,
}

impl SyntaxTree {
    /// Flatten a node description into an arena
    pub fn new(root: AstNode) -> Self {
        let mut slots = Vec::new();
        let mut stack = vec![(root, None::<usize>, None::<String>)];

        while let Some((node, parent, field)) = stack.pop() {
            let index = slots.len();
            slots.push(Slot {
                kind: node.kind,
                start: node.start,
                end: node.end,
                named: node.named,
                parent,
                children: Vec::with_capacity(node.children.len()),
                fields: Vec::with_capacity(node.children.len()),
            });
            if let Some(p) = parent {
                slots[p].children.push(index);
                slots[p].fields.push(field);
            }
            for child in node.children.into_iter().rev() {
                stack.push((child.node, Some(index), child.field));
            }
        }

        Self { slots }
    }

    /// Root node handle
    pub fn root_node(&self) -> NodeRef<'_> {
        NodeRef { tree: self, index: 0 }
    }

    /// Handle for the node with the given id
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id < self.slots.len()).then_some(NodeRef { tree: self, index: id })
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false: a tree has a root
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl From<AstNode> for SyntaxTree {
    fn from(root: AstNode) -> Self {
        Self::new(root)
    }
}

/// Borrowed handle to a node of a [`SyntaxTree`]
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'tree> {
    tree: &'tree SyntaxTree,
    index: usize,
}

impl<'tree> NodeRef<'tree> {
    fn slot(&self) -> &'tree Slot {
        &self.tree.slots[self.index]
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for NodeRef<'_> {}

impl SyntaxNode for NodeRef<'_> {
    fn kind(&self) -> &str {
        &self.slot().kind
    }

    fn start_position(&self) -> Point {
        self.slot().start
    }

    fn end_position(&self) -> Point {
        self.slot().end
    }

    fn child_count(&self) -> usize {
        self.slot().children.len()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.slot().children.get(index).map(|&i| NodeRef {
            tree: self.tree,
            index: i,
        })
    }

    fn is_named(&self) -> bool {
        self.slot().named
    }

    fn id(&self) -> NodeId {
        self.index
    }

    fn parent(&self) -> Option<Self> {
        self.slot().parent.map(|i| NodeRef {
            tree: self.tree,
            index: i,
        })
    }

    fn field_name_for_child(&self, index: usize) -> Option<&str> {
        self.slot().fields.get(index)?.as_deref()
    }
}
