use thiserror::Error;

/// Errors the CLI raises itself; they pick the process exit code.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("{failed} of {total} files could not be renamed")]
    PartialFailure { failed: usize, total: usize },
}
