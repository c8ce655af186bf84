//! CLI command handlers for Figma Content.
//!
//! This module provides headless, scriptable access to the token engine for
//! automation, testing, and CI/CD integration.

pub mod add;
pub mod apply;
pub mod common;
pub mod config;
pub mod init;
pub mod list;
pub mod preview;
pub mod resolve;

// Re-export types used by main.rs and tests
pub use add::AddArgs;
pub use apply::ApplyArgs;
pub use common::{CliError, CliResult, ExitCode, GlobalOptions};
pub use config::ConfigArgs;
pub use init::InitArgs;
pub use list::ListArgs;
pub use preview::PreviewArgs;
pub use resolve::ResolveArgs;
