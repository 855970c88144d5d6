use anyhow::{anyhow, Result};
use facet_shader::{SourceBundle, StageKind};
use glow::HasContext;

// ── Diagnostics ───────────────────────────────────────────────────────────

/// Compiler output captured for a stage that failed to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileDiagnostic {
    pub stage: StageKind,
    /// Backend-supplied human-readable log text.
    pub log: String,
}

// ── Program handle ────────────────────────────────────────────────────────

/// A linked, executable program object.
///
/// The handle stays valid until [`delete`](Self::delete), which the owner of
/// the render loop calls exactly once at teardown.
#[derive(Debug)]
pub struct LinkedProgram {
    raw: glow::Program,
}

impl LinkedProgram {
    /// Makes this program the active rendering state.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe { gl.use_program(Some(self.raw)) };
    }

    /// Releases the program object.
    pub fn delete(self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.raw) };
    }
}

/// Everything the backend reported while building one program.
#[derive(Debug)]
pub struct BuildReport {
    /// The linked program, returned even when linking failed.
    pub program: LinkedProgram,

    /// Link status queried after linking. `false` means the program is most
    /// likely unusable; rendering with it is the caller's choice.
    pub link_ok: bool,

    /// Per-stage compile failures, in stage order.
    pub diagnostics: Vec<CompileDiagnostic>,
}

// ── Compiled stage ────────────────────────────────────────────────────────

/// One compiled stage object, alive only between compile and link.
///
/// `raw` is `None` when compilation failed. The shader object is deleted on
/// drop, so release happens on every exit path.
struct CompiledStage<'gl> {
    gl: &'gl glow::Context,
    raw: Option<glow::Shader>,
}

impl Drop for CompiledStage<'_> {
    fn drop(&mut self) {
        if let Some(shader) = self.raw.take() {
            unsafe { self.gl.delete_shader(shader) };
        }
    }
}

fn stage_gl_enum(kind: StageKind) -> u32 {
    match kind {
        StageKind::Vertex => glow::VERTEX_SHADER,
        StageKind::Fragment => glow::FRAGMENT_SHADER,
    }
}

fn compile_stage<'gl>(
    gl: &'gl glow::Context,
    kind: StageKind,
    source: &str,
    diagnostics: &mut Vec<CompileDiagnostic>,
) -> Result<CompiledStage<'gl>> {
    let shader = unsafe { gl.create_shader(stage_gl_enum(kind)) }
        .map_err(|e| anyhow!("failed to create {} shader object: {e}", kind.label()))?;

    unsafe {
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
    }

    if unsafe { gl.get_shader_compile_status(shader) } {
        return Ok(CompiledStage { gl, raw: Some(shader) });
    }

    let log = unsafe { gl.get_shader_info_log(shader) };
    log::error!("failed to compile {} shader:\n{}", kind.label(), log.trim_end());
    unsafe { gl.delete_shader(shader) };
    diagnostics.push(CompileDiagnostic { stage: kind, log });

    Ok(CompiledStage { gl, raw: None })
}

// ── Build ─────────────────────────────────────────────────────────────────

/// Compiles both stages of `bundle` and links them into one program.
///
/// Compile and link failures are logged and recorded in the report rather
/// than aborting the build: the program handle is returned even when
/// `link_ok` is false, and callers that need strict correctness check the
/// flag themselves. Both stages are always compiled, so a single build
/// surfaces every stage's errors at once. The `Err` arm is reserved for the
/// backend refusing to create shader or program objects at all.
pub fn build_program(gl: &glow::Context, bundle: &SourceBundle) -> Result<BuildReport> {
    let mut diagnostics = Vec::new();

    let stages = [
        compile_stage(gl, StageKind::Vertex, bundle.stage(StageKind::Vertex), &mut diagnostics)?,
        compile_stage(gl, StageKind::Fragment, bundle.stage(StageKind::Fragment), &mut diagnostics)?,
    ];

    let program = unsafe { gl.create_program() }
        .map_err(|e| anyhow!("failed to create program object: {e}"))?;

    // A stage that failed to compile has no handle to attach; the gap
    // surfaces as a link failure, not a crash.
    for stage in &stages {
        if let Some(shader) = stage.raw {
            unsafe { gl.attach_shader(program, shader) };
        }
    }

    unsafe { gl.link_program(program) };
    let link_ok = unsafe { gl.get_program_link_status(program) };
    if !link_ok {
        let log = unsafe { gl.get_program_info_log(program) };
        log::error!("failed to link program:\n{}", log.trim_end());
    }

    // Advisory check; the result lands in the info log, not in the report.
    unsafe { gl.validate_program(program) };
    let validate_log = unsafe { gl.get_program_info_log(program) };
    if !validate_log.trim().is_empty() {
        log::debug!("program validation: {}", validate_log.trim_end());
    }

    // Stage objects are single-use; detach so deletion (on drop, right after
    // this function returns its report) takes effect immediately.
    for stage in &stages {
        if let Some(shader) = stage.raw {
            unsafe { gl.detach_shader(program, shader) };
        }
    }

    Ok(BuildReport {
        program: LinkedProgram { raw: program },
        link_ok,
        diagnostics,
    })
}
