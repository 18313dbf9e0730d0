use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::arena::TreeArena;

/// Conversion into a `termtree` view that shows the raw parse result
/// (names plus indent depths), independent of the render options.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn label(arena: &TreeArena, idx: Index) -> String {
            match arena.get_node(idx) {
                Some(node) if arena.is_root(idx) => node.data.name.clone(),
                Some(node) => format!("{:?} [indent {}]", node.data.name, node.data.indent_depth),
                None => String::new(),
            }
        }

        fn build_tree(arena: &TreeArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            for &child_idx in arena.children(node_idx) {
                let mut child_tree = Tree::new(label(arena, child_idx));
                build_tree(arena, child_idx, &mut child_tree);
                parent_tree.push(child_tree);
            }
        }

        let root_idx = self.root();
        let mut tree = Tree::new(label(self, root_idx));
        build_tree(self, root_idx, &mut tree);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn given_parsed_outline_when_converting_then_labels_carry_indent_depth() {
        let tree = parse("a\n\tb\n  c").unwrap();
        let view = tree.to_tree_string().to_string();
        assert!(view.starts_with(".\n"));
        assert!(view.contains("\"a\" [indent 0]"));
        assert!(view.contains("\"b\" [indent 1]"));
        assert!(view.contains("\"c\" [indent 2]"));
    }
}
