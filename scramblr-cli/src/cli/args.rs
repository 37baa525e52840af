use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::{OutputFormat, PreviewArg};

/// Randomize image file names in a directory without collisions
#[derive(Parser, Debug)]
#[command(name = "scramblr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Assume yes for all prompts
    #[arg(short = 'y', long = "yes", global = true, env = "SCRAMBLR_YES")]
    pub yes: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Read defaults from this file instead of ./.scramblr.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// How new names are built
#[derive(Args, Debug, Clone)]
pub struct NamingArgs {
    /// Prefix for every new file name (default: "image_")
    #[arg(short = 'p', long, env = "SCRAMBLR_PREFIX")]
    pub prefix: Option<String>,

    /// First number to hand out
    #[arg(long, value_name = "N")]
    pub start: Option<usize>,

    /// Zero-pad numbers to this many digits
    #[arg(long, value_name = "WIDTH")]
    pub pad: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rename every image in DIR to {prefix}{n}{ext} in random order
    Shuffle {
        /// Directory containing the images
        directory: PathBuf,

        #[command(flatten)]
        naming: NamingArgs,

        /// Append every rename to this file (keep it outside DIR)
        #[arg(long, value_name = "PATH")]
        journal: Option<PathBuf>,

        /// Show the plan without renaming anything
        #[arg(long)]
        dry_run: bool,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress progress and summary output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Preview the renames for DIR without touching anything
    Plan {
        /// Directory containing the images
        directory: PathBuf,

        #[command(flatten)]
        naming: NamingArgs,

        /// Preview format
        #[arg(long, value_enum, default_value = "table")]
        preview: PreviewArg,

        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,

        /// Suppress summary output
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Directory to write the completion file into
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Show version information
    Version {
        /// Output format for machine consumption
        #[arg(long, value_enum, default_value = "summary")]
        output: OutputFormat,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_shuffle_with_naming() {
        let cli = Cli::try_parse_from([
            "scramblr", "shuffle", "photos", "--prefix", "img_", "--start", "1", "--pad", "3", "-y",
        ])
        .unwrap();

        assert!(cli.yes);
        match cli.command {
            Commands::Shuffle {
                directory, naming, ..
            } => {
                assert_eq!(directory, PathBuf::from("photos"));
                assert_eq!(naming.prefix.as_deref(), Some("img_"));
                assert_eq!(naming.start, Some(1));
                assert_eq!(naming.pad, Some(3));
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_shuffle_requires_directory() {
        assert!(Cli::try_parse_from(["scramblr", "shuffle"]).is_err());
    }
}
