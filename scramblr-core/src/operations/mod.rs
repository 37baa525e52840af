//! High-level operations that correspond to CLI commands
//!
//! These hold the behavior behind each scramblr command, separated from CLI
//! concerns like argument parsing, prompting and progress rendering.

pub mod plan;
pub mod shuffle;

pub use plan::plan_operation;
pub use shuffle::{shuffle_operation, ShuffleOptions};
