//! Facet engine crate.
//!
//! This crate owns the platform + OpenGL runtime pieces used by the viewer
//! binary: context/device creation, shader program building, GL diagnostics,
//! mesh upload, and the window/event-loop runtime.

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod window;
