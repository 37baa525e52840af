use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scramblr_core::{
    scan_directory, shuffle_operation, validate_directory, NamingOptions, OutputFormatter,
    ShuffleOptions,
};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crate::errors::CliError;
use crate::interrupt::RunActiveGuard;
use crate::{OutputFormat, PreviewArg};

pub struct ShuffleArgs {
    pub directory: PathBuf,
    pub prefix: String,
    pub naming: NamingOptions,
    pub journal: Option<PathBuf>,
    pub dry_run: bool,
    pub output: OutputFormat,
    pub quiet: bool,
    pub yes: bool,
    pub use_color: bool,
}

pub fn handle_shuffle(args: ShuffleArgs) -> Result<()> {
    if args.dry_run {
        return crate::plan::handle_plan(
            &args.directory,
            &args.prefix,
            args.naming,
            PreviewArg::Table,
            args.use_color,
            args.output,
            args.quiet,
        );
    }

    validate_directory(&args.directory)?;
    let count = scan_directory(&args.directory)
        .with_context(|| format!("Failed to scan {}", args.directory.display()))?
        .entries
        .len();

    if count == 0 && args.output == OutputFormat::Summary {
        if !args.quiet {
            println!("No compatible image files found");
        }
        return Ok(());
    }

    if count > 0 && !args.yes {
        if !io::stdin().is_terminal() {
            return Err(CliError::Usage(
                "Cannot prompt for confirmation in non-interactive mode. Use --yes.".to_string(),
            )
            .into());
        }
        if !confirm_with_input(count, &mut io::stdin().lock())? {
            println!("Operation cancelled.");
            return Ok(());
        }
    }

    let show_progress = !args.quiet && args.output == OutputFormat::Summary;
    let bar = if show_progress {
        let bar = ProgressBar::new(0);
        bar.set_style(progress_style());
        bar
    } else {
        ProgressBar::hidden()
    };

    let options = ShuffleOptions {
        naming: args.naming,
        journal: args.journal,
    };

    let result = {
        let _active = RunActiveGuard::activate();
        shuffle_operation(&args.directory, &args.prefix, &options, |current, total, name| {
            bar.set_length(total as u64);
            bar.set_position(current as u64);
            bar.set_message(name.to_string());
        })?
    };
    bar.finish_and_clear();

    match args.output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if !args.quiet || !result.is_success() {
                print!("{}", result.format_summary());
            }
        },
    }

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::PartialFailure {
            failed: result.total.saturating_sub(result.renamed),
            total: result.total,
        }
        .into())
    }
}

fn progress_style() -> ProgressStyle {
    match ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        Ok(style) => style.progress_chars("##-"),
        Err(_) => ProgressStyle::default_bar(),
    }
}

fn confirm_with_input<R: BufRead>(count: usize, reader: &mut R) -> Result<bool> {
    print!("Randomize {count} image files? This cannot be undone. [y/N]: ");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    reader
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
