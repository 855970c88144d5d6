use anyhow::{Context, Result};
use glow::HasContext;

use facet_engine::core::{App, AppControl, FrameCtx};
use facet_engine::device::{checked, GlInit};
use facet_engine::logging::{init_logging, LoggingConfig};
use facet_engine::render::{build_program, LinkedProgram, Mesh, Vertex};
use facet_engine::window::{Runtime, RuntimeConfig};
use facet_shader::{split_file, SourceBundle};

/// Combined source loaded when no path is given on the command line.
const DEFAULT_SHADER_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/res/shaders/basic.shader");

const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.5, -0.5),
    Vertex::new(0.5, 0.5),
    Vertex::new(-0.5, 0.5),
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Renders one static quad with the program built from the source bundle.
struct Viewer {
    bundle: SourceBundle,
    program: Option<LinkedProgram>,
    mesh: Option<Mesh>,
}

impl Viewer {
    fn new(bundle: SourceBundle) -> Self {
        Self {
            bundle,
            program: None,
            mesh: None,
        }
    }
}

impl App for Viewer {
    fn init(&mut self, gl: &glow::Context) -> Result<()> {
        let report = build_program(gl, &self.bundle)?;
        if !report.link_ok {
            // Diagnostics were already logged; keep running and render with
            // the broken program rather than abort a shader-editing session.
            log::warn!(
                "program failed to link ({} stage diagnostic(s)); output will be undefined",
                report.diagnostics.len()
            );
        }
        report.program.bind(gl);

        let mesh = Mesh::upload(gl, &QUAD_VERTICES, &QUAD_INDICES)?;

        self.program = Some(report.program);
        self.mesh = Some(mesh);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let gl = ctx.gl;

        unsafe { gl.clear(glow::COLOR_BUFFER_BIT) };

        if let Some(mesh) = &self.mesh {
            checked(gl, "mesh.draw", || mesh.draw(gl));
        }

        AppControl::Continue
    }

    fn on_exit(&mut self, gl: &glow::Context) {
        if let Some(mesh) = self.mesh.take() {
            mesh.delete(gl);
        }
        if let Some(program) = self.program.take() {
            program.delete(gl);
        }
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SHADER_PATH.to_string());

    let bundle =
        split_file(&path).with_context(|| format!("cannot load combined shader source {path}"))?;
    log::info!(
        "loaded {path}: vertex {} bytes, fragment {} bytes",
        bundle.vertex.len(),
        bundle.fragment.len()
    );

    let config = RuntimeConfig {
        title: "facet viewer".to_string(),
        ..Default::default()
    };

    Runtime::run(config, GlInit::default(), Viewer::new(bundle))
}
