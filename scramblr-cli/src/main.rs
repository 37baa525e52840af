use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use scramblr_core::{Config, OutputFormatter, ScramblrError, VersionResult};
use std::io::{self, IsTerminal};
use std::process;

mod cli;
mod errors;
mod interrupt;
mod logging;
mod naming;
mod plan;
mod shuffle;

use cli::{Cli, Commands, OutputFormat, PreviewArg};
use errors::CliError;
use shuffle::ShuffleArgs;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = interrupt::install_handler() {
        tracing::warn!("could not install Ctrl-C handler: {e}");
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };
    let config = config.unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        process::exit(2);
    });

    let use_color = !cli.no_color
        && config
            .defaults
            .use_color
            .unwrap_or_else(|| io::stdout().is_terminal());

    let result = match cli.command {
        Commands::Shuffle {
            directory,
            naming,
            journal,
            dry_run,
            output,
            quiet,
        } => naming::resolve(&naming, &config)
            .map_err(anyhow::Error::from)
            .and_then(|(prefix, naming)| {
                shuffle::handle_shuffle(ShuffleArgs {
                    directory,
                    prefix,
                    naming,
                    journal,
                    dry_run,
                    output,
                    quiet,
                    yes: cli.yes,
                    use_color,
                })
            }),

        Commands::Plan {
            directory,
            naming,
            preview,
            output,
            quiet,
        } => naming::resolve(&naming, &config)
            .map_err(anyhow::Error::from)
            .and_then(|(prefix, naming)| {
                plan::handle_plan(&directory, &prefix, naming, preview, use_color, output, quiet)
            }),

        Commands::Completions { shell, dir } => {
            let mut cmd = Cli::command();
            generate_completions(shell, &mut cmd, "scramblr", &dir)
        },

        Commands::Version { output } => handle_version(output),
    };

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(exit_code(&e));
        },
    }
}

/// 1 = some files failed to rename, 2 = invalid input, 3 = anything else.
fn exit_code(error: &anyhow::Error) -> i32 {
    for cause in error.chain() {
        if let Some(cli_error) = cause.downcast_ref::<CliError>() {
            return match cli_error {
                CliError::PartialFailure { .. } => 1,
                CliError::Usage(_) => 2,
            };
        }
        if let Some(ScramblrError::InvalidDirectory { .. }) = cause.downcast_ref::<ScramblrError>()
        {
            return 2;
        }
    }
    3
}

// Generate shell completions
pub fn generate_completions<G: clap_complete::Generator>(
    gen: G,
    cmd: &mut clap::Command,
    name: &str,
    out_dir: &std::path::Path,
) -> Result<()> {
    use clap_complete::generate_to;
    use std::fs;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let path = generate_to(gen, cmd, name, out_dir)?;
    println!("Generated completion file: {}", path.display());
    Ok(())
}

fn handle_version(output: OutputFormat) -> Result<()> {
    let version_result = VersionResult {
        name: "scramblr".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    println!("{}", version_result.format(output.into()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_generate_completions_bash() {
        let temp_dir = TempDir::new().unwrap();
        let mut cmd = Cli::command();

        generate_completions(Shell::Bash, &mut cmd, "scramblr", temp_dir.path()).unwrap();

        let content = std::fs::read_to_string(temp_dir.path().join("scramblr.bash")).unwrap();
        assert!(content.contains("complete"));
        assert!(content.contains("scramblr"));
    }

    #[test]
    fn test_generate_completions_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("nested").join("dir");
        let mut cmd = Cli::command();

        generate_completions(Shell::Zsh, &mut cmd, "scramblr", &nested_path).unwrap();

        let content = std::fs::read_to_string(nested_path.join("_scramblr")).unwrap();
        assert!(content.contains("#compdef"));
    }

    #[test]
    fn test_exit_codes() {
        let partial = anyhow::Error::from(CliError::PartialFailure { failed: 1, total: 3 });
        assert_eq!(exit_code(&partial), 1);

        let usage = anyhow::Error::from(CliError::Usage("bad".to_string()));
        assert_eq!(exit_code(&usage), 2);

        let invalid = anyhow::Error::from(ScramblrError::InvalidDirectory {
            path: PathBuf::from("/nope"),
            reason: "does not exist".to_string(),
        })
        .context("Failed to plan");
        assert_eq!(exit_code(&invalid), 2);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 3);
        assert_eq!(exit_code(&anyhow::Error::from(ScramblrError::AlreadyRunning)), 3);
    }
}
