//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations with the settings loaded once for
//! the whole run.

pub mod check;
pub mod dispatcher;
pub mod forge;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
