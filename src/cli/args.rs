//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

use crate::glyphs::Charset;
use crate::render::RenderOptions;

/// Turn an indented outline of files and directories into a tree diagram
#[derive(Parser, Debug)]
#[command(name = "treeline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: ./.treeline.toml if present)
    #[arg(long, global = true, env = "TREELINE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an outline as a tree
    Render {
        /// Outline file (default: stdin, "-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: RenderArgs,
    },

    /// Show the parsed structure with indent depths
    Inspect {
        /// Outline file (default: stdin, "-" for stdin)
        #[arg(value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
    },

    /// Render the built-in sample outline
    Sample {
        /// Print the sample outline instead of rendering it
        #[arg(long)]
        raw: bool,

        #[command(flatten)]
        options: RenderArgs,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show config file locations
    Path,
}

/// Render flags layered over the loaded settings.
#[derive(Args, Debug, Default, Clone)]
pub struct RenderArgs {
    /// Connector glyphs
    #[arg(long, value_enum)]
    pub charset: Option<Charset>,

    /// Append "/" to entries with children
    #[arg(long, overrides_with = "no_trailing_slash")]
    pub trailing_slash: bool,
    #[arg(long, overrides_with = "trailing_slash", hide = true)]
    pub no_trailing_slash: bool,

    /// Prefix entries with their ancestors' names
    #[arg(long, overrides_with = "no_full_path")]
    pub full_path: bool,
    #[arg(long, overrides_with = "full_path", hide = true)]
    pub no_full_path: bool,

    /// Draw the "." root line
    #[arg(long, overrides_with = "no_root_dot")]
    pub root_dot: bool,
    /// Omit the "." root line
    #[arg(long, overrides_with = "root_dot")]
    pub no_root_dot: bool,
}

fn flag(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl RenderArgs {
    /// Flags given on the command line win over `base`.
    pub fn apply(&self, base: RenderOptions) -> RenderOptions {
        RenderOptions {
            charset: self.charset.unwrap_or(base.charset),
            trailing_dir_slash: flag(self.trailing_slash, self.no_trailing_slash)
                .unwrap_or(base.trailing_dir_slash),
            full_path: flag(self.full_path, self.no_full_path).unwrap_or(base.full_path),
            root_dot: flag(self.root_dot, self.no_root_dot).unwrap_or(base.root_dot),
        }
    }
}
