use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glow::HasContext;
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use super::{debug, GlInit};

/// Owns the GL pieces bound to one window.
///
/// This type is the low-level rendering context:
/// - creates the window plus the GL display/config/context/surface
/// - loads the `glow` function table and installs diagnostics
/// - handles resize and buffer swap
///
/// The context types inside are not `Send`, so a `GlDevice` cannot leave the
/// thread that owns the event loop: the backend's single-thread affinity is
/// a compile-time property rather than a convention.
pub struct GlDevice {
    /// Loaded GL function table.
    gl: glow::Context,

    /// Window surface the context renders to.
    surface: Surface<WindowSurface>,

    /// Current GL context.
    context: PossiblyCurrentContext,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,
}

impl GlDevice {
    /// Creates the window and a current GL context bound to it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        window_attrs: WindowAttributes,
        init: GlInit,
    ) -> Result<(Window, Self)> {
        let template = ConfigTemplateBuilder::new();
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attrs));

        // The picker must return a config; any config matching the default
        // template can present a basic color buffer.
        let (window, gl_config) = display_builder
            .build(event_loop, template, |mut configs| {
                configs.next().expect("no available GL configs")
            })
            .map_err(|e| anyhow!("failed to create window and pick a GL config: {e}"))?;

        let window = window.context("display builder did not produce a window")?;
        let gl_display = gl_config.display();

        let raw_window_handle = window
            .window_handle()
            .context("window has no native handle")?
            .as_raw();

        let context_attrs = ContextAttributesBuilder::new()
            .with_debug(init.debug)
            .build(Some(raw_window_handle));
        // Some drivers only expose GLES; retry with an ES profile before giving up.
        let fallback_attrs = ContextAttributesBuilder::new()
            .with_debug(init.debug)
            .with_context_api(ContextApi::Gles(None))
            .build(Some(raw_window_handle));

        let not_current = unsafe {
            gl_display
                .create_context(&gl_config, &context_attrs)
                .or_else(|_| gl_display.create_context(&gl_config, &fallback_attrs))
        }
        .context("failed to create GL context")?;

        let surface_attrs = window
            .build_surface_attributes(SurfaceAttributesBuilder::<WindowSurface>::new())
            .context("failed to describe window surface")?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if init.vsync {
            if let Err(e) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("failed to enable vsync: {e}");
            }
        }

        let mut gl = unsafe {
            glow::Context::from_loader_function_cstr(|name| gl_display.get_proc_address(name))
        };

        if init.debug {
            debug::install_debug_callback(&mut gl);
        }

        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        log::info!("OpenGL {version} on {renderer}");

        let size = window.inner_size();
        unsafe { gl.viewport(0, 0, size.width.max(1) as i32, size.height.max(1) as i32) };

        Ok((window, Self { gl, surface, context, size }))
    }

    /// Returns the loaded GL function table.
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and viewport after a window resize.
    ///
    /// GL surfaces cannot be resized to zero; zero-sized dimensions are
    /// recorded and reconfiguration is deferred.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.size = new_size;

        let (Some(w), Some(h)) = (NonZeroU32::new(new_size.width), NonZeroU32::new(new_size.height))
        else {
            return;
        };

        self.surface.resize(&self.context, w, h);
        unsafe { self.gl.viewport(0, 0, new_size.width as i32, new_size.height as i32) };
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}
