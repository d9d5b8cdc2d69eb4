// Core traits for tree rendering

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or parsing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A closing parenthesis appeared with no matching open parenthesis
    #[error("Unbalanced parenthesis at offset {offset}")]
    UnbalancedParens {
        /// Byte offset of the offending `)`
        offset: usize,
    },

    /// The input ended while parentheses were still open
    #[error("Input ended with {open} unclosed parenthesis(es)")]
    UnclosedParens {
        /// Number of parentheses left open
        open: usize,
    },

    /// The language is not supported
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// The grammar could not be installed into a parser
    #[error("Failed to load grammar: {0}")]
    Language(String),

    /// Failed to parse the source code
    #[error("Failed to parse source: {0}")]
    ParseFailed(String),

    /// Input/Output error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Opaque node identity, stable for the lifetime of the tree it came from.
pub type NodeId = usize;

/// Zero-based (row, column) position in source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Zero-based line
    pub row: usize,
    /// Zero-based column
    pub column: usize,
}

impl Point {
    /// Create a new point
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.column)
    }
}

/// Capabilities the renderer needs from a parser's syntax node.
///
/// Handles are expected to be cheap to clone (tree-sitter nodes are `Copy`,
/// owned trees hand out borrowed references), so children and parents are
/// returned by value.
pub trait SyntaxNode: Clone {
    /// Syntactic category of the node
    fn kind(&self) -> &str;

    /// Start of the node's span
    fn start_position(&self) -> Point;

    /// End of the node's span
    fn end_position(&self) -> Point;

    /// Number of children, named and unnamed
    fn child_count(&self) -> usize;

    /// The child at `index`, if any
    fn child(&self, index: usize) -> Option<Self>;

    /// Whether the grammar considers this node semantically significant
    fn is_named(&self) -> bool;

    /// Identity of the node
    fn id(&self) -> NodeId;

    /// Enclosing node, if any
    fn parent(&self) -> Option<Self>;

    /// Role name the grammar assigns to the child at `index`
    fn field_name_for_child(&self, index: usize) -> Option<&str>;

    /// Position of this node among its parent's children.
    ///
    /// Found by scanning the parent's children for a matching id.
    fn index_in_parent(&self) -> Option<usize> {
        let parent = self.parent()?;
        let id = self.id();
        (0..parent.child_count()).find(|&i| parent.child(i).is_some_and(|c| c.id() == id))
    }

    /// Field name this node occupies in its parent, if any
    fn field_name(&self) -> Option<String> {
        let index = self.index_in_parent()?;
        let parent = self.parent()?;
        parent.field_name_for_child(index).map(str::to_owned)
    }
}

#[cfg(feature = "parse")]
impl<'tree> SyntaxNode for tree_sitter::Node<'tree> {
    fn kind(&self) -> &str {
        tree_sitter::Node::kind(self)
    }

    fn start_position(&self) -> Point {
        let p = tree_sitter::Node::start_position(self);
        Point::new(p.row, p.column)
    }

    fn end_position(&self) -> Point {
        let p = tree_sitter::Node::end_position(self);
        Point::new(p.row, p.column)
    }

    fn child_count(&self) -> usize {
        tree_sitter::Node::child_count(self)
    }

    fn child(&self, index: usize) -> Option<Self> {
        tree_sitter::Node::child(self, index)
    }

    fn is_named(&self) -> bool {
        tree_sitter::Node::is_named(self)
    }

    fn id(&self) -> NodeId {
        tree_sitter::Node::id(self)
    }

    fn parent(&self) -> Option<Self> {
        tree_sitter::Node::parent(self)
    }

    fn field_name_for_child(&self, index: usize) -> Option<&str> {
        let index = u32::try_from(index).ok()?;
        tree_sitter::Node::field_name_for_child(self, index)
    }
}
