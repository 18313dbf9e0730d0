//! Tree renderer: [`TreeArena`] to a directory-tree diagram.

use generational_arena::Index;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::arena::{TreeArena, TreeNode};
use crate::glyphs::{Charset, LineGlyphs};

/// Separator appended to directory names.
pub const DIR_SEPARATOR: char = '/';

/// Formatting switches for a single render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Glyph family for the connectors
    pub charset: Charset,
    /// Append `/` to entries that have children
    pub trailing_dir_slash: bool,
    /// Prefix every entry with the names of its ancestors
    pub full_path: bool,
    /// Emit the synthetic root as the first line
    pub root_dot: bool,
}

impl RenderOptions {
    pub const DEFAULT: Self = Self {
        charset: Charset::Unicode,
        trailing_dir_slash: false,
        full_path: false,
        root_dot: true,
    };
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub struct TreeRenderer<'a> {
    tree: &'a TreeArena,
    options: RenderOptions,
    glyphs: &'static LineGlyphs,
}

impl<'a> TreeRenderer<'a> {
    pub fn new(tree: &'a TreeArena, options: &RenderOptions) -> Self {
        Self {
            tree,
            options: *options,
            glyphs: options.charset.glyphs(),
        }
    }

    /// One line per node in document order, joined by `\n` without a trailing newline.
    #[instrument(level = "debug", skip(self), fields(entries = self.tree.len()))]
    pub fn render(&self) -> String {
        let lines: Vec<String> = self
            .tree
            .iter()
            .filter_map(|(idx, node)| self.line(idx, node))
            .collect();
        debug!("rendered {} lines", lines.len());
        lines.join("\n")
    }

    fn line(&self, idx: Index, node: &TreeNode) -> Option<String> {
        if self.tree.is_root(idx) {
            return self.options.root_dot.then(|| node.data.name.clone());
        }

        // Continuation glyphs for every ancestor below the root, nearest last.
        let mut chunks: Vec<&str> = self
            .tree
            .ancestors(idx)
            .filter(|(ancestor, _)| !self.tree.is_root(*ancestor))
            .map(|(ancestor, _)| {
                if self.tree.is_last_child(ancestor) {
                    self.glyphs.empty
                } else {
                    self.glyphs.directory
                }
            })
            .collect();
        chunks.reverse();

        chunks.push(if self.tree.is_last_child(idx) {
            self.glyphs.last_child
        } else {
            self.glyphs.child
        });

        let name = self.display_name(idx, node);
        let mut line = chunks.concat();
        line.push_str(&name);

        if self.options.root_dot {
            Some(line)
        } else {
            Some(strip_chars(&line, self.glyphs.width()).to_string())
        }
    }

    /// Name shown for `node`, honoring `trailing_dir_slash` and `full_path`.
    ///
    /// Ancestors are always slash-terminated in full-path mode; the synthetic
    /// root is not part of the path.
    fn display_name(&self, idx: Index, node: &TreeNode) -> String {
        let mut segments = vec![segment(node, self.options.trailing_dir_slash)];

        if self.options.full_path {
            segments.extend(
                self.tree
                    .ancestors(idx)
                    .filter(|(ancestor, _)| !self.tree.is_root(*ancestor))
                    .map(|(_, ancestor)| segment(ancestor, true)),
            );
            segments.reverse();
        }

        segments.concat()
    }
}

fn segment(node: &TreeNode, trailing_dir_slash: bool) -> String {
    let name = &node.data.name;
    if trailing_dir_slash && !node.is_leaf() && !ends_with_separator(name) {
        format!("{name}{DIR_SEPARATOR}")
    } else {
        name.clone()
    }
}

/// True when `name` already ends in a separator, ignoring trailing whitespace.
fn ends_with_separator(name: &str) -> bool {
    name.trim_end().ends_with(DIR_SEPARATOR)
}

fn strip_chars(s: &str, count: usize) -> &str {
    match s.char_indices().nth(count) {
        Some((offset, _)) => &s[offset..],
        None => "",
    }
}

/// Renders `tree` into a directory diagram.
pub fn render(tree: &TreeArena, options: &RenderOptions) -> String {
    TreeRenderer::new(tree, options).render()
}
