// Queries over rendered record sequences

use crate::record::FormatTree;
use crate::traits::{NodeId, Point};

/// Rebuild the tree shape from record depths.
///
/// Entry `i` is the index of record `i`'s parent, `None` for records at the
/// outermost depth. A drop in depth closes every open record deeper than the
/// new one. Depths are measured below the first record's indentation.
pub fn parent_indices(records: &[FormatTree]) -> Vec<Option<usize>> {
    let base = base_indent(records);
    let mut open: Vec<(usize, usize)> = Vec::new();
    let mut parents = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let depth = record.depth_below(base);
        while open.last().is_some_and(|&(d, _)| d >= depth) {
            open.pop();
        }
        parents.push(open.last().map(|&(_, i)| i));
        open.push((depth, index));
    }

    parents
}

/// Deepest record whose span contains `point`
pub fn record_at(records: &[FormatTree], point: Point) -> Option<&FormatTree> {
    let base = base_indent(records);
    records
        .iter()
        .filter(|r| r.contains(point))
        .max_by_key(|r| r.depth_below(base))
}

fn base_indent(records: &[FormatTree]) -> &str {
    records.first().map_or("", FormatTree::indent)
}

/// Record rendered for the node with the given id
pub fn record_by_id(records: &[FormatTree], id: NodeId) -> Option<&FormatTree> {
    records.iter().find(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AstNode, SyntaxTree};
    use crate::render::{format_node_tree_to_records, format_node_tree_to_records_named_field_aware};
    use rstest::rstest;

    fn tree() -> SyntaxTree {
        let p = Point::new;
        AstNode::new("source_file", p(0, 0), p(3, 0))
            .with_child(
                AstNode::new("function_item", p(0, 0), p(2, 1))
                    .with_field("name", AstNode::new("identifier", p(0, 3), p(0, 7)))
                    .with_field(
                        "body",
                        AstNode::new("block", p(0, 10), p(2, 1))
                            .with_child(AstNode::new("call_expression", p(1, 4), p(1, 9))),
                    ),
            )
            .with_child(AstNode::new("line_comment", p(2, 2), p(2, 9)))
            .into()
    }

    #[test]
    fn test_parent_indices_follow_nesting() {
        let tree = tree();
        let records = format_node_tree_to_records(&tree.root_node(), "");
        assert_eq!(
            parent_indices(&records),
            vec![None, Some(0), Some(1), Some(1), Some(3), Some(0)]
        );
    }

    #[rstest]
    #[case("> ")]
    #[case("\t")]
    #[case("    ")]
    #[case("//")]
    fn test_parent_indices_with_initial_indent(#[case] indent: &str) {
        let tree = tree();
        let expected = vec![None, Some(0), Some(1), Some(1), Some(3), Some(0)];

        let records = format_node_tree_to_records(&tree.root_node(), indent);
        assert_eq!(parent_indices(&records), expected);

        let annotated = format_node_tree_to_records_named_field_aware(&tree.root_node(), indent);
        assert_eq!(parent_indices(&annotated), expected);
        assert_eq!(
            record_at(&records, Point::new(1, 5)).map(|r| r.name.as_str()),
            Some("call_expression")
        );
    }

    #[test]
    fn test_parent_indices_empty() {
        assert!(parent_indices(&[]).is_empty());
    }

    #[test]
    fn test_record_at_picks_deepest() {
        let tree = tree();
        let records = format_node_tree_to_records(&tree.root_node(), "");
        assert_eq!(
            record_at(&records, Point::new(1, 5)).map(|r| r.name.as_str()),
            Some("call_expression")
        );
        assert_eq!(
            record_at(&records, Point::new(0, 4)).map(|r| r.name.as_str()),
            Some("identifier")
        );
        assert_eq!(
            record_at(&records, Point::new(2, 5)).map(|r| r.name.as_str()),
            Some("line_comment")
        );
        assert!(record_at(&records, Point::new(5, 0)).is_none());
    }

    #[test]
    fn test_record_by_id() {
        let tree = tree();
        let records = format_node_tree_to_records(&tree.root_node(), "");
        assert_eq!(record_by_id(&records, 3).map(|r| r.name.as_str()), Some("block"));
        assert!(record_by_id(&records, 99).is_none());
    }
}
