pub mod args;
pub mod types;

pub use args::{Cli, Commands, NamingArgs};
pub use types::{OutputFormat, PreviewArg};
