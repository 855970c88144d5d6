//! GPU rendering subsystem.
//!
//! Builds shader programs from split source bundles and owns static mesh
//! geometry. Everything here takes the GL function table explicitly; no
//! module relies on ambient global state.

mod mesh;
mod program;

pub use mesh::{Mesh, Vertex};
pub use program::{build_program, BuildReport, CompileDiagnostic, LinkedProgram};
