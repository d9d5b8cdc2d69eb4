// Node-tree rendering
//
// One configurable renderer covering every output variant: flattened text or
// per-node records, with or without field-name annotations, with or without
// anonymous nodes.

use crate::record::{prefix_for, span_suffix, FormatTree, INDENT_UNIT};
use crate::traits::SyntaxNode;
use serde::{Deserialize, Serialize};

/// Shape of the rendered output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// One string, one line per node
    #[default]
    Text,
    /// One [`FormatTree`] per node
    Records,
}

/// How the tree is walked
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Traversal {
    /// Call-stack recursion, one frame per tree level
    #[default]
    Recursive,
    /// Explicit heap-allocated stack, for deep or untrusted trees
    Iterative,
}

/// Renderer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output shape
    pub shape: OutputShape,

    /// Prefix nodes that occupy a named field with `"<field>: "`
    pub show_field_names: bool,

    /// Skip anonymous nodes together with their subtrees
    pub hide_unnamed: bool,

    /// Traversal strategy
    pub traversal: Traversal,

    /// Indentation placed before the starting node
    pub indent: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            shape: OutputShape::Text,
            show_field_names: false,
            hide_unnamed: true,
            traversal: Traversal::Recursive,
            indent: String::new(),
        }
    }
}

impl RenderOptions {
    /// Named nodes as text, no field names
    pub fn plain_text() -> Self {
        Self::default()
    }

    /// Named nodes as records, no field names
    pub fn plain_records() -> Self {
        Self {
            shape: OutputShape::Records,
            ..Self::default()
        }
    }

    /// Records with field names, anonymous nodes shown unless `hide_unnamed`
    pub fn field_aware(hide_unnamed: bool) -> Self {
        Self {
            shape: OutputShape::Records,
            show_field_names: true,
            hide_unnamed,
            ..Self::default()
        }
    }

    /// Records with field names, named nodes only
    pub fn named_field_aware() -> Self {
        Self::field_aware(true)
    }

    /// Set the indentation of the starting node
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set the traversal strategy
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}

/// Output of [`render`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// Flattened text
    Text(String),
    /// Record sequence
    Records(Vec<FormatTree>),
}

impl Rendered {
    /// Flatten to text regardless of shape
    pub fn into_text(self) -> String {
        match self {
            Rendered::Text(text) => text,
            Rendered::Records(records) => records_to_text(&records),
        }
    }
}

/// Render `root` in the shape selected by `options.shape`
pub fn render<N: SyntaxNode>(root: &N, options: &RenderOptions) -> Rendered {
    match options.shape {
        OutputShape::Text => Rendered::Text(render_text(root, options)),
        OutputShape::Records => Rendered::Records(render_records(root, options)),
    }
}

/// Render `root` as one line per visited node
pub fn render_text<N: SyntaxNode>(root: &N, options: &RenderOptions) -> String {
    records_to_text(&render_records(root, options))
}

/// Render `root` as a pre-order sequence of records.
///
/// The starting node is always included. When field names are on and the
/// starting node has a parent, it is annotated with the field it occupies
/// there.
pub fn render_records<N: SyntaxNode>(root: &N, options: &RenderOptions) -> Vec<FormatTree> {
    let field = if options.show_field_names {
        root.field_name()
    } else {
        None
    };

    let mut out = Vec::new();
    match options.traversal {
        Traversal::Recursive => {
            visit(root, &options.indent, field.as_deref(), options, &mut out);
        }
        Traversal::Iterative => walk(root, field, options, &mut out),
    }

    tracing::debug!(
        root = root.kind(),
        records = out.len(),
        fields = options.show_field_names,
        hide_unnamed = options.hide_unnamed,
        "rendered syntax tree"
    );
    out
}

/// Join records into text, one newline-terminated line each
pub fn records_to_text(records: &[FormatTree]) -> String {
    let mut text = String::new();
    for record in records {
        text.push_str(&record.prefix);
        text.push_str(&record.name);
        text.push_str(&record.suffix);
        text.push('\n');
    }
    text
}

fn record_for<N: SyntaxNode>(node: &N, indent: &str, field: Option<&str>) -> FormatTree {
    let start = node.start_position();
    let end = node.end_position();
    FormatTree {
        id: node.id(),
        start_position: start,
        end_position: end,
        prefix: prefix_for(indent, field),
        name: node.kind().to_string(),
        suffix: span_suffix(start, end),
    }
}

fn keep<N: SyntaxNode>(child: &N, options: &RenderOptions) -> bool {
    !options.hide_unnamed || child.is_named()
}

fn visit<N: SyntaxNode>(
    node: &N,
    indent: &str,
    field: Option<&str>,
    options: &RenderOptions,
    out: &mut Vec<FormatTree>,
) {
    tracing::trace!(kind = node.kind(), index = out.len(), "visit");
    out.push(record_for(node, indent, field));

    let child_indent = format!("{}{}", indent, INDENT_UNIT);
    for i in 0..node.child_count() {
        let Some(child) = node.child(i) else {
            continue;
        };
        if !keep(&child, options) {
            continue;
        }
        let child_field = if options.show_field_names {
            node.field_name_for_child(i)
        } else {
            None
        };
        visit(&child, &child_indent, child_field, options, out);
    }
}

struct Frame<N> {
    node: N,
    depth: usize,
    field: Option<String>,
}

fn walk<N: SyntaxNode>(
    root: &N,
    field: Option<String>,
    options: &RenderOptions,
    out: &mut Vec<FormatTree>,
) {
    let mut stack = vec![Frame {
        node: root.clone(),
        depth: 0,
        field,
    }];

    while let Some(frame) = stack.pop() {
        let indent = format!("{}{}", options.indent, INDENT_UNIT.repeat(frame.depth));
        out.push(record_for(&frame.node, &indent, frame.field.as_deref()));

        // Reverse push so the leftmost child is popped first
        for i in (0..frame.node.child_count()).rev() {
            let Some(child) = frame.node.child(i) else {
                continue;
            };
            if !keep(&child, options) {
                continue;
            }
            let field = if options.show_field_names {
                frame.node.field_name_for_child(i).map(str::to_owned)
            } else {
                None
            };
            stack.push(Frame {
                node: child,
                depth: frame.depth + 1,
                field,
            });
        }
    }
}

/// Named nodes as text, one line per node, children indented two spaces.
pub fn format_node_tree_to_string<N: SyntaxNode>(node: &N, indent: &str) -> String {
    render_text(node, &RenderOptions::plain_text().with_indent(indent))
}

/// Named nodes as records, prefixes are plain indentation.
pub fn format_node_tree_to_records<N: SyntaxNode>(node: &N, indent: &str) -> Vec<FormatTree> {
    render_records(node, &RenderOptions::plain_records().with_indent(indent))
}

/// Records annotated with field names; anonymous nodes are kept unless
/// `hide_unnamed` is set.
///
/// There is no child-index argument. The starting node's field is looked up
/// from its position among its parent's children, so a subtree render labels
/// its first line the same way a full render would. A node without a parent
/// gets no label.
pub fn format_node_tree_to_records_field_aware<N: SyntaxNode>(
    node: &N,
    hide_unnamed: bool,
    indent: &str,
) -> Vec<FormatTree> {
    render_records(node, &RenderOptions::field_aware(hide_unnamed).with_indent(indent))
}

/// Records annotated with field names, named nodes only.
///
/// The starting node's field is resolved as in
/// [`format_node_tree_to_records_field_aware`].
pub fn format_node_tree_to_records_named_field_aware<N: SyntaxNode>(
    node: &N,
    indent: &str,
) -> Vec<FormatTree> {
    render_records(node, &RenderOptions::named_field_aware().with_indent(indent))
}
