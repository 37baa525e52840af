use crate::journal::Journal;
use crate::plan::RenamePlan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// The single filesystem primitive the engine relies on.
pub trait Renamer: Send + Sync {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Renames through `std::fs::rename`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsRenamer;

impl Renamer for FsRenamer {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Original name to temp name.
    Temporary,
    /// Temp name to final name.
    Final,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temporary => write!(f, "phase 1"),
            Self::Final => write!(f, "phase 2"),
        }
    }
}

/// Emitted after every successful rename.
///
/// `current` counts steps across both phases, so `total` is twice the number
/// of planned files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub phase: Phase,
    pub current: usize,
    pub total: usize,
    pub file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    pub phase: Phase,
    /// Original name of the file that failed.
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// Files that reached their final name.
    pub renamed: usize,
    pub total: usize,
    pub failures: Vec<RenameFailure>,
}

impl ExecutionReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Carries out a [`RenamePlan`] in two passes.
pub struct Executor<'a> {
    renamer: &'a dyn Renamer,
    journal: Option<&'a mut Journal>,
}

impl<'a> Executor<'a> {
    pub fn new(renamer: &'a dyn Renamer) -> Self {
        Self {
            renamer,
            journal: None,
        }
    }

    pub fn with_journal(mut self, journal: &'a mut Journal) -> Self {
        self.journal = Some(journal);
        self
    }

    /// Phase 1 parks every file under its temp name in enumeration order.
    /// Phase 2 moves parked files to their final names in plan order.
    ///
    /// A failed rename is recorded and the loop moves on. A file that could
    /// not be parked is skipped in phase 2 and keeps its original name.
    pub fn run<F>(mut self, plan: &RenamePlan, mut on_progress: F) -> ExecutionReport
    where
        F: FnMut(&Progress),
    {
        let total = plan.len() * 2;
        let mut report = ExecutionReport {
            total: plan.len(),
            ..ExecutionReport::default()
        };

        if plan.is_empty() {
            return report;
        }

        info!(
            directory = %plan.directory.display(),
            files = plan.len(),
            "starting rename"
        );

        let mut parked = vec![false; plan.len()];
        let mut step = 0;

        for (i, rename) in plan.renames.iter().enumerate() {
            step += 1;
            match self.move_file(Phase::Temporary, &rename.original, &rename.temp) {
                Ok(()) => {
                    parked[i] = true;
                    on_progress(&Progress {
                        phase: Phase::Temporary,
                        current: step,
                        total,
                        file_name: rename.original_name.clone(),
                    });
                },
                Err(message) => report.failures.push(RenameFailure {
                    phase: Phase::Temporary,
                    file_name: rename.original_name.clone(),
                    message,
                }),
            }
        }

        for &i in &plan.order {
            step += 1;
            if !parked[i] {
                continue;
            }

            let rename = &plan.renames[i];
            match self.move_file(Phase::Final, &rename.temp, &rename.target) {
                Ok(()) => {
                    report.renamed += 1;
                    on_progress(&Progress {
                        phase: Phase::Final,
                        current: step,
                        total,
                        file_name: rename.final_name.clone(),
                    });
                },
                Err(message) => report.failures.push(RenameFailure {
                    phase: Phase::Final,
                    file_name: rename.original_name.clone(),
                    message: format!("left as {}: {message}", rename.temp_name),
                }),
            }
        }

        info!(
            renamed = report.renamed,
            failed = report.failures.len(),
            "rename finished"
        );

        report
    }

    fn move_file(&mut self, phase: Phase, from: &Path, to: &Path) -> Result<(), String> {
        if fs::symlink_metadata(to).is_ok() {
            let message = format!("destination {} already exists", display_name(to));
            warn!(%phase, from = %from.display(), "{message}");
            return Err(message);
        }

        if let Err(e) = self.renamer.rename(from, to) {
            warn!(%phase, from = %from.display(), to = %to.display(), error = %e, "rename failed");
            return Err(e.to_string());
        }

        debug!(%phase, from = %from.display(), to = %to.display(), "renamed");

        if let Some(journal) = self.journal.as_deref_mut() {
            let line = format!("{phase}: {} -> {}", from.display(), to.display());
            if let Err(e) = journal.log(&line) {
                warn!(journal = %journal.path().display(), error = %e, "failed to write journal");
            }
        }

        Ok(())
    }
}

/// Execute `plan` against the real filesystem.
pub fn execute_plan<F>(plan: &RenamePlan, on_progress: F) -> ExecutionReport
where
    F: FnMut(&Progress),
{
    Executor::new(&FsRenamer).run(plan, on_progress)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}
