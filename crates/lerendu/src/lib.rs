// lerendu - Syntax Tree Renderer
//
// *Le Rendu* (The Rendering) - Indented, human-readable views of parse trees

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

//! Render parse trees as indented text, per-node records or HTML.
//!
//! Any parser's node type can be rendered once it implements
//! [`traits::SyntaxNode`]; tree-sitter nodes do so out of the box with the
//! `parse` feature.

/// Core traits, error type and positions.
pub mod traits;

/// Owned, parser-independent syntax trees.
pub mod ast;

/// Per-node display records.
pub mod record;

/// Configurable node-tree renderer.
pub mod render;

/// Doubled-parenthesis string formatter.
pub mod bracket;

/// HTML escaping and list rendering.
pub mod html;

/// Tree shape and position queries over records.
pub mod shape;

/// Lazy-loaded grammar registry.
#[cfg(feature = "parse")]
pub mod grammar;

/// Parallel rendering of source files.
#[cfg(feature = "parse")]
pub mod batch;

/// Re-exports of commonly used types.
pub mod prelude;
