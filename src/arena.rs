use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

/// Name of the synthetic root every parsed outline hangs from.
pub const ROOT_NAME: &str = ".";

/// Data payload for tree nodes representing outline entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    /// Entry label exactly as typed, minus indentation and bullet
    pub name: String,
    /// Number of leading whitespace characters on the source line
    pub indent_depth: usize,
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    /// Outline entry data for this node
    pub data: NodeData,
    /// Index of parent node in the arena, None for the synthetic root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in input order
    pub children: Vec<Index>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based tree holding one parsed outline.
///
/// The arena owns every node; parent links are plain indices so upward
/// traversal never creates a second owner. The root is synthetic and always
/// present, so an empty outline is a root without children.
#[derive(Debug)]
pub struct TreeArena {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Index of the synthetic root node
    root: Index,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode {
            data: NodeData {
                name: ROOT_NAME.to_string(),
                indent_depth: 0,
            },
            parent: None,
            children: Vec::new(),
        });
        Self { arena, root }
    }

    /// Appends a node as the last child of `parent`.
    #[instrument(level = "trace", skip(self))]
    pub(crate) fn insert_node(&mut self, data: NodeData, parent: Index) -> Index {
        let node = TreeNode {
            data,
            parent: Some(parent),
            children: Vec::new(),
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent) = self.arena.get_mut(parent) {
            parent.children.push(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Index {
        self.root
    }

    pub fn is_root(&self, idx: Index) -> bool {
        idx == self.root
    }

    /// Child indices of `idx` in input order; empty for unknown indices.
    pub fn children(&self, idx: Index) -> &[Index] {
        self.get_node(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// True when `idx` is the final entry of its parent's children.
    /// The root has no parent and is never a last child.
    pub fn is_last_child(&self, idx: Index) -> bool {
        self.get_node(idx)
            .and_then(|node| node.parent)
            .and_then(|parent| self.get_node(parent))
            .and_then(|parent| parent.children.last())
            .is_some_and(|&last| last == idx)
    }

    /// Walks the parent chain of `idx`, nearest ancestor first, ending with the root.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            arena: self,
            next: self.get_node(idx).and_then(|node| node.parent),
        }
    }

    /// Pre-order traversal in document order, starting at the root.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    /// Number of outline entries, not counting the synthetic root.
    pub fn len(&self) -> usize {
        self.arena.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Deepest nesting level below the root; 0 for an empty outline.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root, 0)];

        while let Some((idx, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            for &child in self.children(idx) {
                stack.push((child, level + 1));
            }
        }

        max_depth
    }

    /// Collects the names of all entries without children, in document order.
    ///
    /// The root is not an entry, so an empty outline has no leaves.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<String> {
        self.iter()
            .filter(|(idx, node)| !self.is_root(*idx) && node.is_leaf())
            .map(|(_, node)| node.data.name.clone())
            .collect()
    }
}

pub struct Ancestors<'a> {
    arena: &'a TreeArena,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.arena.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}

pub struct TreeIterator<'a> {
    arena: &'a TreeArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a TreeArena) -> Self {
        Self {
            arena,
            stack: vec![arena.root()],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, indent_depth: usize) -> NodeData {
        NodeData {
            name: name.to_string(),
            indent_depth,
        }
    }

    // .
    // ├── a
    // │   └── b
    // └── c
    fn sample() -> (TreeArena, Index, Index, Index) {
        let mut tree = TreeArena::new();
        let root = tree.root();
        let a = tree.insert_node(entry("a", 0), root);
        let b = tree.insert_node(entry("b", 2), a);
        let c = tree.insert_node(entry("c", 0), root);
        (tree, a, b, c)
    }

    #[test]
    fn given_new_arena_when_inspecting_then_only_root_exists() {
        let tree = TreeArena::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.leaf_nodes().is_empty());
        let root = tree.get_node(tree.root()).unwrap();
        assert_eq!(root.data.name, ROOT_NAME);
        assert!(root.parent.is_none());
    }

    #[test]
    fn given_tree_when_iterating_then_yields_document_order() {
        let (tree, ..) = sample();
        let names: Vec<_> = tree.iter().map(|(_, n)| n.data.name.as_str()).collect();
        assert_eq!(names, vec![".", "a", "b", "c"]);
    }

    #[test]
    fn given_tree_when_checking_last_child_then_uses_sibling_position() {
        let (tree, a, b, c) = sample();
        assert!(!tree.is_last_child(a));
        assert!(tree.is_last_child(b));
        assert!(tree.is_last_child(c));
        assert!(!tree.is_last_child(tree.root()));
    }

    #[test]
    fn given_nested_node_when_walking_ancestors_then_ends_at_root() {
        let (tree, a, b, _) = sample();
        let chain: Vec<_> = tree.ancestors(b).map(|(idx, _)| idx).collect();
        assert_eq!(chain, vec![a, tree.root()]);
        assert_eq!(tree.ancestors(tree.root()).count(), 0);
    }

    #[test]
    fn given_tree_when_measuring_then_reports_depth_len_and_leaves() {
        let (tree, ..) = sample();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaf_nodes(), vec!["b".to_string(), "c".to_string()]);
    }
}
