//! Tests for the structure parser: nesting, ordering and whitespace handling

use rstest::rstest;
use treeline::util::testing;
use treeline::{parse, split_input, TreeArena};

/// Node names with nesting expressed as `parent/child` paths, in document order.
fn paths(tree: &TreeArena) -> Vec<String> {
    tree.iter()
        .filter(|(idx, _)| !tree.is_root(*idx))
        .map(|(idx, node)| {
            let mut segments: Vec<&str> = tree
                .ancestors(idx)
                .filter(|(a, _)| !tree.is_root(*a))
                .map(|(_, a)| a.data.name.as_str())
                .collect();
            segments.reverse();
            segments.push(node.data.name.as_str());
            segments.join("/")
        })
        .collect()
}

// ============================================================
// Empty input
// ============================================================

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n\n")]
#[case(" \t \r\n  \n")]
fn given_blank_input_when_parsing_then_returns_empty_root(#[case] input: &str) {
    testing::init_test_setup();
    let tree = parse(input).unwrap();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    let root = tree.get_node(tree.root()).unwrap();
    assert_eq!(root.data.name, ".");
}

// ============================================================
// Nesting
// ============================================================

#[test]
fn given_sample_outline_when_parsing_then_builds_expected_hierarchy() {
    let tree = parse("my-app\n  src\n    index.html\n  README.md").unwrap();
    assert_eq!(
        paths(&tree),
        vec!["my-app", "my-app/src", "my-app/src/index.html", "my-app/README.md"]
    );
    assert_eq!(tree.depth(), 3);
}

#[rstest]
#[case::deeper_nests("a\n  b\n    c", vec!["a", "a/b", "a/b/c"])]
#[case::equal_is_sibling("a\n  b\n  c", vec!["a", "a/b", "a/c"])]
#[case::dedent_closes("a\n  b\n    c\n  d", vec!["a", "a/b", "a/b/c", "a/d"])]
#[case::zero_indent_is_top_level("a\n  b\n    c\nd", vec!["a", "a/b", "a/b/c", "d"])]
#[case::partial_dedent("a\n    b\n  c", vec!["a", "a/b", "a/c"])]
#[case::indented_first_line("  a\nb", vec!["a", "b"])]
#[case::jump_two_levels("a\n      b\n  c", vec!["a", "a/b", "a/c"])]
fn given_indentation_when_parsing_then_nests_by_depth(
    #[case] input: &str,
    #[case] expected: Vec<&str>,
) {
    assert_eq!(paths(&parse(input).unwrap()), expected);
}

#[test]
fn given_many_siblings_when_parsing_then_keeps_input_order() {
    let tree = parse("root\n  zeta\n  alpha\n  mid\n  alpha").unwrap();
    let parent = tree.children(tree.root())[0];
    let names: Vec<_> = tree
        .children(parent)
        .iter()
        .map(|&idx| tree.get_node(idx).unwrap().data.name.as_str())
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid", "alpha"]);
}

#[test]
fn given_same_input_when_parsing_twice_then_trees_match() {
    let input = "a\n\tb\n  c\n- d\n    e";
    assert_eq!(paths(&parse(input).unwrap()), paths(&parse(input).unwrap()));
}

// ============================================================
// Whitespace and bullets
// ============================================================

#[test]
fn given_whitespace_only_lines_when_parsing_then_ignores_them() {
    let with_blanks = parse("a\n\n      \n  b\n\t\n  c\n").unwrap();
    let without = parse("a\n  b\n  c").unwrap();
    assert_eq!(paths(&with_blanks), paths(&without));
}

#[test]
fn given_crlf_line_endings_when_parsing_then_matches_lf() {
    let crlf = parse("a\r\n  b\r\n    c\r\n").unwrap();
    assert_eq!(paths(&crlf), vec!["a", "a/b", "a/b/c"]);
}

#[test]
fn given_markdown_bullets_when_parsing_then_strips_marker_without_adding_depth() {
    let tree = parse("- docs\n  - guide.md\n  - api.md\n- README.md").unwrap();
    assert_eq!(
        paths(&tree),
        vec!["docs", "docs/guide.md", "docs/api.md", "README.md"]
    );
    let entries = split_input("- docs\n  - guide.md").unwrap();
    assert_eq!(entries[0].indent_depth, 0);
    assert_eq!(entries[1].indent_depth, 2);
}

#[test]
fn given_trailing_and_internal_spaces_when_parsing_then_name_is_verbatim() {
    let tree = parse("my  dir  \n  file.txt ").unwrap();
    assert_eq!(paths(&tree), vec!["my  dir  ", "my  dir  /file.txt "]);
}

#[test]
fn given_tab_and_spaces_of_equal_count_when_parsing_then_treated_as_siblings() {
    // One tab and one space both count as depth 1.
    let tree = parse("a\n\tb\n c").unwrap();
    assert_eq!(paths(&tree), vec!["a", "a/b", "a/c"]);
}

#[test]
fn given_tab_then_two_spaces_when_parsing_then_counts_characters_not_columns() {
    let tree = parse("a\n\tb\n  c").unwrap();
    assert_eq!(paths(&tree), vec!["a", "a/b", "a/b/c"]);
    let entries = split_input("\tb\n  c").unwrap();
    assert_eq!(entries[0].indent_depth, 1);
    assert_eq!(entries[1].indent_depth, 2);
}

#[test]
fn given_parsed_nodes_when_inspecting_then_records_indent_depth() {
    let tree = parse("a\n   b").unwrap();
    let a = tree.children(tree.root())[0];
    let b = tree.children(a)[0];
    assert_eq!(tree.get_node(a).unwrap().data.indent_depth, 0);
    assert_eq!(tree.get_node(b).unwrap().data.indent_depth, 3);
    assert_eq!(tree.get_node(b).unwrap().parent, Some(a));
}
