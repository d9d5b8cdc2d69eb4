#![cfg(feature = "parse")]

use lerendu::prelude::*;

fn rust_tree(source: &str) -> tree_sitter::Tree {
    parse_source(LanguageId::Rust, source).expect("parse rust")
}

#[test]
fn plain_text_of_rust_function() {
    let tree = rust_tree("fn main() {}");
    let text = format_node_tree_to_string(&tree.root_node(), "");
    assert_eq!(
        text,
        "source_file [0, 0] - [0, 12]\n\
         \x20 function_item [0, 0] - [0, 12]\n\
         \x20   identifier [0, 3] - [0, 7]\n\
         \x20   parameters [0, 7] - [0, 9]\n\
         \x20   block [0, 10] - [0, 12]\n"
    );
}

#[test]
fn named_field_aware_rust_function() {
    let tree = rust_tree("fn main() {}");
    let records = format_node_tree_to_records_named_field_aware(&tree.root_node(), "");
    let lines: Vec<String> = records.iter().map(|r| format!("{}{}", r.prefix, r.name)).collect();
    assert_eq!(
        lines,
        vec![
            "source_file",
            "  function_item",
            "    name: identifier",
            "    parameters: parameters",
            "    body: block",
        ]
    );
}

#[test]
fn field_aware_shows_keywords_and_punctuation() {
    let tree = rust_tree("fn main() {}");
    let records = format_node_tree_to_records_field_aware(&tree.root_node(), false, "");
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["source_file", "function_item", "fn", "identifier", "parameters", "(", ")", "block", "{", "}"]
    );
    assert_eq!(records[2].prefix, "    ");
}

#[test]
fn record_ids_match_tree_sitter_ids() {
    let tree = rust_tree("fn main() {}");
    let root = tree.root_node();
    let records = format_node_tree_to_records(&root, "");
    assert_eq!(records[0].id, root.id());
    let function = root.named_child(0).unwrap();
    assert_eq!(records[1].id, function.id());
    assert_eq!(record_by_id(&records, function.id()).unwrap().name, "function_item");
}

#[test]
fn subtree_render_annotates_starting_node() {
    let tree = rust_tree("fn main() {}");
    let function = tree.root_node().named_child(0).unwrap();
    let body = function.child_by_field_name("body").unwrap();
    let records = format_node_tree_to_records_named_field_aware(&body, "");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].to_string(), "body: block [0, 10] - [0, 12]");
}

#[test]
fn record_at_finds_identifier() {
    let tree = rust_tree("fn main() {}");
    let records = format_node_tree_to_records(&tree.root_node(), "");
    let hit = record_at(&records, Point::new(0, 4)).unwrap();
    assert_eq!(hit.name, "identifier");
}

#[test]
fn iterative_matches_recursive_on_real_source() {
    let source = "struct Point { x: i32, y: i32 }\n\
                  impl Point {\n    fn norm(&self) -> i32 { self.x * self.x + self.y * self.y }\n}\n";
    let tree = rust_tree(source);
    for options in [
        RenderOptions::plain_records(),
        RenderOptions::field_aware(false),
        RenderOptions::named_field_aware(),
    ] {
        let recursive = render_records(&tree.root_node(), &options);
        let iterative = render_records(
            &tree.root_node(),
            &options.clone().with_traversal(Traversal::Iterative),
        );
        assert_eq!(recursive, iterative);
    }
}

#[test]
fn json_pairs_carry_key_and_value_fields() {
    let tree = parse_source(LanguageId::Json, "{\"a\": 1}").unwrap();
    let records = format_node_tree_to_records_named_field_aware(&tree.root_node(), "");
    assert!(records.iter().any(|r| r.field_name() == Some("key")));
    assert!(records.iter().any(|r| r.field_name() == Some("value") && r.name == "number"));
}

#[test]
fn html_view_of_rust_function() {
    let tree = rust_tree("fn main() {}");
    let records = format_node_tree_to_records_named_field_aware(&tree.root_node(), "");
    let html = render_html(&records);
    assert_eq!(html.matches("<li ").count(), records.len());
    assert!(html.contains("data-start=\"0:3\" data-end=\"0:7\""));
}
