use scramblr_core::{Config, NamingOptions};

use crate::cli::NamingArgs;
use crate::errors::CliError;

/// Largest accepted first index.
pub const MAX_START_INDEX: usize = 1_000_000_000;
/// Widest accepted zero padding.
pub const MAX_PAD_WIDTH: usize = 32;

/// Merge command-line naming flags over the loaded config.
pub fn resolve(args: &NamingArgs, config: &Config) -> Result<(String, NamingOptions), CliError> {
    let prefix = match args.prefix.as_deref() {
        Some(prefix) if !prefix.is_empty() => prefix.to_string(),
        _ => config.defaults.prefix.clone(),
    };
    validate_prefix(&prefix)?;

    let defaults = config.naming();
    let naming = NamingOptions {
        start_index: args.start.unwrap_or(defaults.start_index),
        pad_width: args.pad.unwrap_or(defaults.pad_width),
    };
    validate_naming(&naming)?;

    Ok((prefix, naming))
}

fn validate_naming(naming: &NamingOptions) -> Result<(), CliError> {
    if naming.start_index > MAX_START_INDEX {
        return Err(CliError::Usage(format!(
            "invalid start index {}: must be at most {MAX_START_INDEX}",
            naming.start_index
        )));
    }
    if naming.pad_width > MAX_PAD_WIDTH {
        return Err(CliError::Usage(format!(
            "invalid pad width {}: must be at most {MAX_PAD_WIDTH}",
            naming.pad_width
        )));
    }
    Ok(())
}

/// A prefix becomes part of a file name, so it may not leave the directory.
pub fn validate_prefix(prefix: &str) -> Result<(), CliError> {
    if prefix.contains(['/', '\\', '\0']) {
        return Err(CliError::Usage(format!(
            "invalid prefix '{}': path separators are not allowed",
            prefix.escape_default()
        )));
    }
    if prefix == "." || prefix == ".." {
        return Err(CliError::Usage(format!("invalid prefix '{prefix}'")));
    }
    Ok(())
}
