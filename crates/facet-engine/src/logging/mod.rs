//! Logging utilities.
//!
//! Centralizes logger initialization. All engine diagnostics, including GL
//! debug-callback output, go through the standard `log` facade; this module
//! only wires up the `env_logger` backend.

mod init;

pub use init::{init_logging, LoggingConfig};
