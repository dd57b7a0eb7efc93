//! Command-line interface and orchestration for steam-heat
//!
//! This module implements the CLI commands and drives the catalog pipeline
//! end to end: argument parsing, configuration, collection, and reporting.
//!
//! ## Commands
//!
//! - **collect**: Page through the bulk listing, enrich every game with its
//!   achievement completion average, rank by heat score, and write reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! Command-line flags on `collect` override values from the configuration file.

mod collect;
mod common;
mod host;
mod init;
mod progress_reporter;
mod run;
mod validate;

pub use collect::{CollectArgs, DEFAULT_CSV_FILE, process_collect};
pub use common::{ColorMode, LogLevel};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
