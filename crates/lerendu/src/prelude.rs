// Prelude module - common imports for convenience

pub use crate::ast::{AstChild, AstNode, NodeRef, SyntaxTree};
pub use crate::bracket::format_bracket_tree;
pub use crate::html::{escape_html, render_html};
pub use crate::record::FormatTree;
pub use crate::render::{
    format_node_tree_to_records, format_node_tree_to_records_field_aware,
    format_node_tree_to_records_named_field_aware, format_node_tree_to_string, render,
    render_records, render_text, OutputShape, RenderOptions, Rendered, Traversal,
};
pub use crate::shape::{parent_indices, record_at, record_by_id};
pub use crate::traits::{Error, NodeId, Point, Result, SyntaxNode};

#[cfg(feature = "parse")]
pub use crate::batch::{render_source, BatchRenderer, FileRendering};
#[cfg(feature = "parse")]
pub use crate::grammar::{parse_source, LanguageId};
