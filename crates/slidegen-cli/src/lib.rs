//! slidegen CLI - Command-line interface library
//!
//! - [`dispatch`]: table-driven command dispatcher built on `clap`
//! - [`app`]: the `slidegen` command table and its handlers
//! - [`logging`]: console + `slidegen.log` logger
//!
//! # Binary Usage
//!
//! ```bash
//! # Print the help text
//! slidegen
//!
//! # Generate a deck
//! slidegen generate --config report.json --output report.pptx
//!
//! # Generate with explicit settings
//! slidegen generate --config report.json --output report.pptx --settings team.toml
//! ```

pub mod app;
pub mod dispatch;
pub mod logging;

// Re-export main entry point and types
pub use app::{commands, dispatcher, exit_status, generate_command, run_cli, App};
pub use dispatch::{
    AppSpec, CommandSpec, DispatchError, Dispatcher, Invocation, ParamKind, ParamSpec, Value,
};
