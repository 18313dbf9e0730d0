//! Turn an indented outline of files and directories into a directory tree diagram.
//!
//! ```
//! use treeline::{parse, render, RenderOptions};
//!
//! let tree = parse("my-app\n  src\n    index.html\n  README.md")?;
//! assert_eq!(
//!     render(&tree, &RenderOptions::DEFAULT),
//!     ".\n└── my-app\n    ├── src\n    │   └── index.html\n    └── README.md"
//! );
//! # Ok::<_, treeline::TreeError>(())
//! ```

pub mod arena;
pub mod cli;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod glyphs;
pub mod parser;
pub mod render;
pub mod tree_traits;
pub mod util;

pub use arena::{NodeData, TreeArena, TreeNode, ROOT_NAME};
pub use errors::{TreeError, TreeResult};
pub use glyphs::{Charset, LineGlyphs};
pub use parser::{parse, split_input, OutlineEntry};
pub use render::{render, RenderOptions};
