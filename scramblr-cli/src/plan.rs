use anyhow::Result;
use scramblr_core::{plan_operation, NamingOptions, OutputFormatter};
use std::path::Path;

use crate::{OutputFormat, PreviewArg};

pub fn handle_plan(
    directory: &Path,
    prefix: &str,
    naming: NamingOptions,
    preview: PreviewArg,
    use_color: bool,
    output: OutputFormat,
    quiet: bool,
) -> Result<()> {
    // No preview for JSON output
    let preview = match output {
        OutputFormat::Json => None,
        OutputFormat::Summary => Some(preview.into()),
    };

    let (result, preview_output) = plan_operation(directory, prefix, &naming, preview, use_color)?;

    match output {
        OutputFormat::Json => {
            print!("{}", result.format_json());
        },
        OutputFormat::Summary => {
            if let Some(preview) = preview_output {
                println!("{preview}");
            }
            if !quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
