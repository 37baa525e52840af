use crate::coordinator::{FailureCause, FailureDetail, RunOutcome};
use crate::plan::RenamePlan;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a shuffle run
#[derive(Debug, Serialize, Deserialize)]
pub struct ShuffleResult {
    pub directory: String,
    pub prefix: String,
    pub total: usize,
    pub renamed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<FailureCause>,
    pub failures: Vec<FailureDetail>,
    pub duration_ms: u128,
}

impl ShuffleResult {
    pub fn from_outcome(
        directory: String,
        prefix: String,
        total: usize,
        outcome: &RunOutcome,
        duration_ms: u128,
    ) -> Self {
        let (cause, failures) = match outcome {
            RunOutcome::Completed(_) => (None, Vec::new()),
            RunOutcome::Failed { cause, details, .. } => (Some(*cause), details.clone()),
        };

        Self {
            directory,
            prefix,
            total,
            renamed: outcome.renamed(),
            cause,
            failures,
            duration_ms,
        }
    }

    pub fn is_success(&self) -> bool {
        self.cause.is_none()
    }
}

/// Result of a plan (dry-run) operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: String,
    pub prefix: String,
    pub files: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for ShuffleResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": self.is_success(),
            "operation": "shuffle",
            "directory": self.directory,
            "prefix": self.prefix,
            "cause": self.cause,
            "summary": {
                "total": self.total,
                "renamed": self.renamed,
                "failed": self.failures.len(),
                "duration_ms": self.duration_ms,
            },
            "failures": self.failures,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if let Some(cause) = self.cause {
            writeln!(output, "✗ Randomization failed: {cause}").unwrap();
            writeln!(output, "Renamed {} of {} files", self.renamed, self.total).unwrap();
            for failure in &self.failures {
                writeln!(output, "  {}: {}", failure.file_name, failure.message).unwrap();
            }
        } else {
            writeln!(
                output,
                "✓ Renamed {} files in {}",
                self.renamed, self.directory
            )
            .unwrap();
        }

        #[allow(clippy::cast_precision_loss)]
        let seconds = self.duration_ms as f64 / 1000.0;
        writeln!(output, "Completed in {seconds:.2}s").unwrap();

        output
    }
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "prefix": self.prefix,
            "dry_run": self.dry_run,
            "summary": {
                "files": self.files,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Scramblr plan: {} (prefix '{}')\n", self.directory, self.prefix);
        if self.files == 0 {
            output.push_str("No compatible image files found\n");
        } else {
            writeln!(output, "Renames: {} files", self.files).unwrap();
        }
        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}
