use crate::coordinator::{channel, Coordinator, RunEvent, RunOutcome};
use crate::output::ShuffleResult;
use crate::plan::NamingOptions;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Options for a shuffle run
#[derive(Debug, Clone, Default)]
pub struct ShuffleOptions {
    pub naming: NamingOptions,
    /// Append every rename to this file
    pub journal: Option<PathBuf>,
}

/// Shuffle operation - runs the rename on a worker thread and drains its
/// events on the calling thread, handing each progress step to `on_progress`.
///
/// Returns an error only when the run could not start; partial failures are
/// part of the returned result.
pub fn shuffle_operation<F>(
    directory: &Path,
    prefix: &str,
    options: &ShuffleOptions,
    mut on_progress: F,
) -> Result<ShuffleResult>
where
    F: FnMut(usize, usize, &str),
{
    let mut coordinator = Coordinator::new().with_naming(options.naming);
    if let Some(journal) = &options.journal {
        coordinator = coordinator.with_journal(journal);
    }

    let (listener, events) = channel();
    let started = Instant::now();
    let handle = coordinator.start(directory, prefix, Arc::new(listener))?;

    let mut steps = None;
    for event in events.iter() {
        match event {
            RunEvent::Progress {
                current,
                total,
                file_name,
            } => {
                steps = Some(total);
                on_progress(current, total, &file_name);
            },
            _ => break,
        }
    }

    let outcome = handle.join();
    let total = match (&outcome, steps) {
        (_, Some(steps)) => steps / 2,
        (RunOutcome::Failed { renamed, details, .. }, None) => renamed + details.len(),
        (RunOutcome::Completed(renamed), None) => *renamed,
    };

    Ok(ShuffleResult::from_outcome(
        directory.display().to_string(),
        prefix.to_string(),
        total,
        &outcome,
        started.elapsed().as_millis(),
    ))
}
