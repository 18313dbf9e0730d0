use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::TreeError;

/// Connector strings drawn in front of each rendered entry.
///
/// All four strings of a set have the same width in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineGlyphs {
    /// Entry that has further siblings below it
    pub child: &'static str,
    /// Final entry of its parent
    pub last_child: &'static str,
    /// Continuation under an ancestor that still has siblings to draw
    pub directory: &'static str,
    /// Continuation under an ancestor that was a last child
    pub empty: &'static str,
}

impl LineGlyphs {
    /// Width of one connector in characters.
    pub fn width(&self) -> usize {
        self.child.chars().count()
    }
}

pub const ASCII_GLYPHS: LineGlyphs = LineGlyphs {
    child: "|-- ",
    last_child: "`-- ",
    directory: "|   ",
    empty: "    ",
};

pub const UNICODE_GLYPHS: LineGlyphs = LineGlyphs {
    child: "├── ",
    last_child: "└── ",
    directory: "│   ",
    empty: "    ",
};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    /// Plain dashes, pipes and backticks
    Ascii,
    /// Box-drawing characters
    #[default]
    #[serde(alias = "utf-8", alias = "utf8")]
    #[value(alias = "utf-8")]
    Unicode,
}

impl Charset {
    pub fn glyphs(self) -> &'static LineGlyphs {
        match self {
            Charset::Ascii => &ASCII_GLYPHS,
            Charset::Unicode => &UNICODE_GLYPHS,
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charset::Ascii => write!(f, "ascii"),
            Charset::Unicode => write!(f, "unicode"),
        }
    }
}

impl FromStr for Charset {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ascii" => Ok(Charset::Ascii),
            "unicode" | "utf-8" | "utf8" => Ok(Charset::Unicode),
            _ => Err(TreeError::UnknownCharset(s.to_string())),
        }
    }
}
