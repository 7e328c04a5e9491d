//! Logging utilities.
//!
//! Logger initialization lives here so binaries only need one call early in
//! `main`. Everything else in the crate logs through the `log` facade.

mod init;

pub use init::{init_logging, LoggingConfig};
