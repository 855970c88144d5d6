use anyhow::Result;
use winit::dpi::PhysicalSize;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Per-frame context passed to [`App::on_frame`].
pub struct FrameCtx<'a> {
    pub gl: &'a glow::Context,

    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
}

/// Application contract implemented by the viewer layer.
pub trait App {
    /// Called once after the GL context is created and made current.
    ///
    /// GPU resources (programs, meshes) are created here. An error aborts
    /// startup and is returned from the runtime.
    fn init(&mut self, gl: &glow::Context) -> Result<()>;

    /// Called once per frame; the buffer swap happens after this returns.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;

    /// Called once before the context is torn down.
    ///
    /// GPU resources created in [`init`](Self::init) are released here.
    fn on_exit(&mut self, gl: &glow::Context) {
        let _ = gl;
    }
}
