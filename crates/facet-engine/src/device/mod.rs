//! GL device + diagnostics.
//!
//! This module is responsible for:
//! - creating the window, GL display/config/context, and window surface
//! - loading the `glow` function table
//! - diagnostics: the debug message callback and error-queue draining

mod context;
pub mod debug;
mod init;

pub use context::GlDevice;
pub use debug::{checked, clear_errors, drain_errors, GlError};
pub use init::GlInit;
