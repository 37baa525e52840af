//! Runs the rename pipeline on a background thread.
//!
//! A [`Coordinator`] owns a single-run gate: while one run is in flight every
//! other `start` is turned away with `AlreadyRunning`. Notifications reach the
//! caller through a [`RunListener`], either implemented directly or through
//! the [`ChannelListener`] adapter.

use crate::engine::{Executor, FsRenamer, Phase, RenameFailure, Renamer};
use crate::error::{Result, ScramblrError};
use crate::journal::Journal;
use crate::plan::{plan_renames, NamingOptions};
use crate::scanner::{scan_directory, validate_directory};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCause {
    InvalidDirectory,
    AlreadyRunning,
    PartialRenameFailure,
    IoError,
}

impl fmt::Display for FailureCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::InvalidDirectory => "invalid directory",
            Self::AlreadyRunning => "a run is already in progress",
            Self::PartialRenameFailure => "some files could not be renamed",
            Self::IoError => "I/O error",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureDetail {
    pub file_name: String,
    pub message: String,
}

impl From<&RenameFailure> for FailureDetail {
    fn from(failure: &RenameFailure) -> Self {
        Self {
            file_name: failure.file_name.clone(),
            message: format!("{}: {}", failure.phase, failure.message),
        }
    }
}

/// Terminal result of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(usize),
    Failed {
        cause: FailureCause,
        renamed: usize,
        details: Vec<FailureDetail>,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn renamed(&self) -> usize {
        match self {
            Self::Completed(renamed) | Self::Failed { renamed, .. } => *renamed,
        }
    }

    fn failed(cause: FailureCause, file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Failed {
            cause,
            renamed: 0,
            details: vec![FailureDetail {
                file_name: file_name.into(),
                message: message.into(),
            }],
        }
    }

    fn notify(&self, listener: &dyn RunListener) {
        match self {
            Self::Completed(renamed) => listener.on_success(*renamed),
            Self::Failed { cause, details, .. } => listener.on_failure(*cause, details),
        }
    }
}

/// Receives notifications for a run. Methods are called from the worker
/// thread, except for failures reported synchronously by `start`.
pub trait RunListener: Send + Sync {
    fn on_progress(&self, current: usize, total: usize, file_name: &str);
    fn on_success(&self, total_renamed: usize);
    fn on_failure(&self, cause: FailureCause, details: &[FailureDetail]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Progress {
        current: usize,
        total: usize,
        file_name: String,
    },
    Succeeded(usize),
    Failed {
        cause: FailureCause,
        details: Vec<FailureDetail>,
    },
}

impl RunEvent {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }
}

/// Forwards every notification into an mpsc channel.
pub struct ChannelListener {
    sender: Sender<RunEvent>,
}

impl ChannelListener {
    fn send(&self, event: RunEvent) {
        // The receiver may have gone away; the run carries on regardless.
        let _ = self.sender.send(event);
    }
}

/// Create a listener together with the receiving end of its events.
pub fn channel() -> (ChannelListener, Receiver<RunEvent>) {
    let (sender, receiver) = mpsc::channel();
    (ChannelListener { sender }, receiver)
}

impl RunListener for ChannelListener {
    fn on_progress(&self, current: usize, total: usize, file_name: &str) {
        self.send(RunEvent::Progress {
            current,
            total,
            file_name: file_name.to_string(),
        });
    }

    fn on_success(&self, total_renamed: usize) {
        self.send(RunEvent::Succeeded(total_renamed));
    }

    fn on_failure(&self, cause: FailureCause, details: &[FailureDetail]) {
        self.send(RunEvent::Failed {
            cause,
            details: details.to_vec(),
        });
    }
}

/// Holds the coordinator's "running" flag for as long as it lives.
struct RunGate {
    flag: Arc<AtomicBool>,
}

impl RunGate {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for RunGate {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Handle to a run in progress.
pub struct RunHandle {
    thread: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Block until the run is over and return its outcome.
    pub fn join(self) -> RunOutcome {
        self.thread.join().unwrap_or_else(|_| {
            RunOutcome::failed(FailureCause::IoError, "", "rename worker panicked")
        })
    }
}

pub struct Coordinator {
    running: Arc<AtomicBool>,
    renamer: Arc<dyn Renamer>,
    naming: NamingOptions,
    journal: Option<PathBuf>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
            renamer: Arc::new(FsRenamer),
            naming: NamingOptions::default(),
            journal: None,
        }
    }

    pub fn with_naming(mut self, naming: NamingOptions) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(path.into());
        self
    }

    pub fn with_renamer(mut self, renamer: Arc<dyn Renamer>) -> Self {
        self.renamer = renamer;
        self
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Start renaming the images in `directory` on a background thread.
    ///
    /// Rejections (`AlreadyRunning`, `InvalidDirectory`) are reported to the
    /// listener before this returns and leave the filesystem untouched.
    pub fn start(
        &self,
        directory: impl AsRef<Path>,
        prefix: &str,
        listener: Arc<dyn RunListener>,
    ) -> Result<RunHandle> {
        let directory = directory.as_ref().to_path_buf();

        let Some(gate) = RunGate::acquire(&self.running) else {
            warn!(directory = %directory.display(), "rejected start: run already active");
            listener.on_failure(FailureCause::AlreadyRunning, &[]);
            return Err(ScramblrError::AlreadyRunning);
        };

        if let Err(e) = validate_directory(&directory) {
            drop(gate);
            warn!(error = %e, "rejected start");
            listener.on_failure(
                FailureCause::InvalidDirectory,
                &[FailureDetail {
                    file_name: directory.display().to_string(),
                    message: e.to_string(),
                }],
            );
            return Err(e);
        }

        let worker = Worker {
            directory: directory.clone(),
            prefix: prefix.to_string(),
            naming: self.naming,
            renamer: Arc::clone(&self.renamer),
            journal: self.journal.clone(),
        };
        let worker_listener = Arc::clone(&listener);

        let spawned = thread::Builder::new()
            .name("scramblr-worker".to_string())
            .spawn(move || worker.run(gate, worker_listener.as_ref()));

        match spawned {
            Ok(thread) => Ok(RunHandle { thread }),
            Err(e) => {
                // The closure (and the gate inside it) was dropped with the failed spawn.
                listener.on_failure(
                    FailureCause::IoError,
                    &[FailureDetail {
                        file_name: directory.display().to_string(),
                        message: format!("failed to start worker: {e}"),
                    }],
                );
                Err(ScramblrError::io(directory, e))
            },
        }
    }
}

struct Worker {
    directory: PathBuf,
    prefix: String,
    naming: NamingOptions,
    renamer: Arc<dyn Renamer>,
    journal: Option<PathBuf>,
}

impl Worker {
    fn run(self, gate: RunGate, listener: &dyn RunListener) -> RunOutcome {
        let renamed = Cell::new(0);
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.pipeline(listener, &renamed)))
            .unwrap_or_else(|_| RunOutcome::Failed {
                cause: FailureCause::IoError,
                renamed: renamed.get(),
                details: vec![FailureDetail {
                    file_name: self.directory.display().to_string(),
                    message: "rename worker panicked".to_string(),
                }],
            });

        drop(gate);
        info!(directory = %self.directory.display(), ?outcome, "run finished");
        outcome.notify(listener);
        outcome
    }

    /// `renamed` counts files that reached their final name so far.
    fn pipeline(&self, listener: &dyn RunListener, renamed: &Cell<usize>) -> RunOutcome {
        let listing = match scan_directory(&self.directory) {
            Ok(listing) => listing,
            Err(e) => {
                return RunOutcome::failed(
                    FailureCause::IoError,
                    self.directory.display().to_string(),
                    e.to_string(),
                );
            },
        };

        if listing.entries.is_empty() {
            return RunOutcome::Completed(0);
        }

        let plan = plan_renames(&listing, &self.prefix, &self.naming);

        let mut journal = self.journal.as_deref().and_then(|path| match Journal::open(path) {
            Ok(journal) => Some(journal),
            Err(e) => {
                warn!(error = %e, "continuing without journal");
                None
            },
        });

        let mut executor = Executor::new(self.renamer.as_ref());
        if let Some(journal) = journal.as_mut() {
            executor = executor.with_journal(journal);
        }

        let report = executor.run(&plan, |progress| {
            if progress.phase == Phase::Final {
                renamed.set(renamed.get() + 1);
            }
            listener.on_progress(progress.current, progress.total, &progress.file_name);
        });

        if report.is_complete() {
            RunOutcome::Completed(report.renamed)
        } else {
            RunOutcome::Failed {
                cause: FailureCause::PartialRenameFailure,
                renamed: report.renamed,
                details: report.failures.iter().map(FailureDetail::from).collect(),
            }
        }
    }
}
