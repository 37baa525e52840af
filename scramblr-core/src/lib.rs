#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod journal;
pub mod operations;
pub mod output;
pub mod plan;
pub mod preview;
pub mod scanner;

pub use config::Config;
pub use coordinator::{
    channel, ChannelListener, Coordinator, FailureCause, FailureDetail, RunEvent, RunHandle,
    RunListener, RunOutcome,
};
pub use engine::{
    execute_plan, ExecutionReport, Executor, FsRenamer, Phase, Progress, RenameFailure, Renamer,
};
pub use error::ScramblrError;
pub use journal::Journal;
pub use operations::{plan_operation, shuffle_operation, ShuffleOptions};
pub use output::{
    OutputFormat, OutputFormatter, PlanResult, ShuffleResult, VersionResult,
};
pub use plan::{plan_directory, plan_renames, NamingOptions, PlannedRename, RenamePlan};
pub use preview::{render_plan, Preview};
pub use scanner::{
    image_extension, scan_directory, validate_directory, DirectoryListing, FileEntry,
    IMAGE_EXTENSIONS,
};
