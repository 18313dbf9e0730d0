use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, RenderArgs};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, local_config_path, Settings};
use crate::parser::parse;
use crate::render::{render, RenderOptions};
use crate::tree_traits::TreeNodeConvert;

/// Outline rendered by `treeline sample`.
pub const SAMPLE_OUTLINE: &str = "my-app
  src
    index.html
    main.ts
    main.scss
  build
    index.html
    main.js
    main.css
  .prettierrc.json
  .gitlab-ci.yml
  README.md
empty dir";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Render { file, options }) => _render(cli, file.as_deref(), options),
        Some(Commands::Inspect { file }) => _inspect(file.as_deref()),
        Some(Commands::Sample { raw, options }) => _sample(cli, *raw, options),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            _completion(*shell);
            Ok(())
        }
        None => Ok(()),
    }
}

/// Parses and renders `input`; blank input renders to an empty string.
pub fn render_text(input: &str, options: &RenderOptions) -> CliResult<String> {
    if input.trim().is_empty() {
        debug!("blank input, nothing to render");
        return Ok(String::new());
    }
    let tree = parse(input)?;
    Ok(render(&tree, options))
}

/// Reads the whole outline from `file`, or stdin for `None` and `-`.
pub fn read_input(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            std::fs::read_to_string(path).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| CliError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(buf)
        }
    }
}

fn effective_options(cli: &Cli, args: &RenderArgs) -> CliResult<RenderOptions> {
    let settings = Settings::load(cli.config.as_deref())?;
    let options = args.apply(settings.render);
    debug!(?options, "effective render options");
    Ok(options)
}

fn emit(text: &str) {
    if !text.is_empty() {
        output::info(text);
    }
}

#[instrument(skip(cli))]
fn _render(cli: &Cli, file: Option<&Path>, args: &RenderArgs) -> CliResult<()> {
    let options = effective_options(cli, args)?;
    let input = read_input(file)?;
    emit(&render_text(&input, &options)?);
    Ok(())
}

#[instrument]
fn _inspect(file: Option<&Path>) -> CliResult<()> {
    let input = read_input(file)?;
    let tree = parse(&input)?;

    output::header("Parsed structure");
    output::info(tree.to_tree_string().to_string().trim_end());
    output::header("Summary");
    output::field("entries", &tree.len());
    output::field("depth", &tree.depth());
    output::field("leaves", &tree.leaf_nodes().len());
    Ok(())
}

#[instrument(skip(cli))]
fn _sample(cli: &Cli, raw: bool, args: &RenderArgs) -> CliResult<()> {
    if raw {
        output::info(SAMPLE_OUTLINE);
        return Ok(());
    }
    let options = effective_options(cli, args)?;
    emit(&render_text(SAMPLE_OUTLINE, &options)?);
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(settings.to_toml()?.trim_end());
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            let describe = |path: Option<PathBuf>| match path {
                Some(p) if p.exists() => format!("{}", p.display()),
                Some(p) => format!("{} (not found)", p.display()),
                None => "unavailable".to_string(),
            };
            let local = match &cli.config {
                Some(path) => Some(path.clone()),
                None => std::env::current_dir().ok().map(|dir| local_config_path(&dir)),
            };
            output::field("global", &describe(global_config_path()));
            output::field("local", &describe(local));
        }
    }
    Ok(())
}

fn _completion(shell: Shell) {
    let mut cmd = Cli::command();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, "treeline", &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_blank_input_when_rendering_text_then_returns_empty() {
        assert_eq!(render_text("  \n\t\n", &RenderOptions::DEFAULT).unwrap(), "");
    }

    #[test]
    fn given_sample_outline_when_rendering_then_draws_both_top_level_entries() {
        let text = render_text(SAMPLE_OUTLINE, &RenderOptions::DEFAULT).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], ".");
        assert_eq!(lines[1], "├── my-app");
        assert_eq!(lines[2], "│   ├── src");
        assert_eq!(lines[12], "│   └── README.md");
        assert_eq!(lines[13], "└── empty dir");
    }

    #[test]
    fn given_missing_file_when_reading_input_then_reports_path() {
        let err = read_input(Some(Path::new("/nonexistent/outline.txt"))).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/outline.txt"));
    }
}
