//! Structure parser: indented outline text to [`TreeArena`].
//!
//! Nesting is inferred from the number of leading whitespace characters on
//! each line. Tabs and spaces both count as one character and are never
//! normalized, so mixed indentation yields deterministic but possibly
//! surprising trees.

use generational_arena::Index;
use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::arena::{NodeData, TreeArena};
use crate::errors::{TreeError, TreeResult};

/// Leading whitespace, optionally followed by a markdown bullet (`- `).
/// Only the whitespace group counts towards the indent depth.
const PREFIX_PATTERN: &str = r"^(\s*)(?:-\s)?";

/// One non-blank outline line before nesting is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    /// 1-based line number in the source text
    pub line: usize,
    pub indent_depth: usize,
    pub name: String,
}

pub struct StructureParser {
    prefix_regex: Regex,
}

impl Default for StructureParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureParser {
    pub fn new() -> Self {
        Self {
            prefix_regex: Regex::new(PREFIX_PATTERN).expect("prefix pattern is a valid regex"),
        }
    }

    /// Splits `input` into flat entries, dropping blank and whitespace-only lines.
    ///
    /// Both `\n` and `\r` end a line, so CRLF input and lone carriage
    /// returns are handled alike.
    #[instrument(level = "debug", skip(self, input), fields(bytes = input.len()))]
    pub fn split_input(&self, input: &str) -> TreeResult<Vec<OutlineEntry>> {
        let mut entries = Vec::new();

        for (line_idx, raw_line) in input.split('\n').enumerate() {
            for segment in raw_line.split('\r') {
                if segment.chars().all(char::is_whitespace) {
                    continue;
                }
                entries.push(self.parse_line(line_idx + 1, segment)?);
            }
        }

        debug!("split {} outline entries", entries.len());
        Ok(entries)
    }

    fn parse_line(&self, line: usize, content: &str) -> TreeResult<OutlineEntry> {
        let caps = self
            .prefix_regex
            .captures(content)
            .ok_or_else(|| TreeError::StructuralParse {
                line,
                content: content.to_string(),
            })?;
        let (prefix, indent) = match (caps.get(0), caps.get(1)) {
            (Some(prefix), Some(indent)) => (prefix, indent),
            _ => {
                return Err(TreeError::StructuralParse {
                    line,
                    content: content.to_string(),
                })
            }
        };

        let entry = OutlineEntry {
            line,
            indent_depth: indent.as_str().chars().count(),
            name: content[prefix.end()..].to_string(),
        };
        trace!(line, depth = entry.indent_depth, name = %entry.name, "parsed line");
        Ok(entry)
    }

    /// Builds the tree from `input`.
    ///
    /// Each entry becomes the last child of the nearest preceding entry with a
    /// strictly smaller indent depth, or of the synthetic root if there is none.
    #[instrument(level = "debug", skip(self, input), fields(bytes = input.len()))]
    pub fn parse(&self, input: &str) -> TreeResult<TreeArena> {
        let entries = self.split_input(input)?;
        let mut tree = TreeArena::new();

        // The root carries no depth and is never popped.
        let mut path: Vec<(Index, Option<usize>)> = vec![(tree.root(), None)];

        for entry in entries {
            while let Some(&(_, Some(depth))) = path.last() {
                if depth < entry.indent_depth {
                    break;
                }
                path.pop();
            }

            let (parent, _) = *path.last().ok_or_else(|| {
                TreeError::InternalError(format!(
                    "ancestor stack lost the root at line {}",
                    entry.line
                ))
            })?;

            let depth = entry.indent_depth;
            let idx = tree.insert_node(
                NodeData {
                    name: entry.name,
                    indent_depth: depth,
                },
                parent,
            );
            path.push((idx, Some(depth)));
        }

        debug!(entries = tree.len(), depth = tree.depth(), "parsed outline");
        Ok(tree)
    }
}

/// Parses an indented outline into a tree rooted at the synthetic `.` node.
pub fn parse(input: &str) -> TreeResult<TreeArena> {
    StructureParser::new().parse(input)
}

/// Flat, un-nested view of the outline lines.
pub fn split_input(input: &str) -> TreeResult<Vec<OutlineEntry>> {
    StructureParser::new().split_input(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("src", 0, "src")]
    #[case("    src", 4, "src")]
    #[case("\t\tsrc", 2, "src")]
    #[case("- src", 0, "src")]
    #[case("  - src", 2, "src")]
    #[case("  -\tsrc", 2, "src")]
    #[case("  -src", 2, "-src")]
    #[case("  src  dir  ", 2, "src  dir  ")]
    #[case("  - - src", 2, "- src")]
    fn given_line_when_parsing_prefix_then_splits_depth_and_name(
        #[case] line: &str,
        #[case] depth: usize,
        #[case] name: &str,
    ) {
        let entry = StructureParser::new().parse_line(1, line).unwrap();
        assert_eq!(entry.indent_depth, depth);
        assert_eq!(entry.name, name);
    }

    #[test]
    fn given_blank_lines_when_splitting_then_keeps_source_line_numbers() {
        let entries = split_input("a\n\n   \n  b\r\nc").unwrap();
        let lines: Vec<_> = entries.iter().map(|e| (e.line, e.name.as_str())).collect();
        assert_eq!(lines, vec![(1, "a"), (4, "b"), (5, "c")]);
    }

    #[test]
    fn given_lone_carriage_return_when_splitting_then_ends_line() {
        let entries = split_input("a\r  b").unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(entries[1].indent_depth, 2);
    }
}
