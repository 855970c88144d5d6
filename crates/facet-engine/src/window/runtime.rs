use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx};
use crate::device::{GlDevice, GlInit};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "facet".to_string(),
            initial_size: LogicalSize::new(640.0, 480.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs the event loop until the window closes or the app requests exit.
    ///
    /// A failure to initialize the rendering context (or the app's GPU
    /// resources) terminates the loop and is returned here, so the process
    /// exits non-zero; a normal window close returns `Ok`.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = RuntimeState {
            config,
            gl_init,
            app,
            window: None,
            startup_error: None,
        };

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.startup_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

struct WindowState {
    window: Window,
    device: GlDevice,
}

struct RuntimeState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gl_init: GlInit,
    app: A,

    window: Option<WindowState>,
    startup_error: Option<anyhow::Error>,
}

impl<A> RuntimeState<A>
where
    A: App + 'static,
{
    fn fail_startup(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.startup_error = Some(err);
        event_loop.exit();
    }

    /// Gives the app its teardown callback while the context is still alive.
    fn teardown(&mut self) {
        if let Some(state) = self.window.take() {
            self.app.on_exit(state.device.gl());
        }
    }
}

impl<A> ApplicationHandler for RuntimeState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (window, device) = match GlDevice::new(event_loop, attrs, self.gl_init.clone()) {
            Ok(pair) => pair,
            Err(err) => {
                self.fail_startup(
                    event_loop,
                    err.context("failed to initialize rendering context"),
                );
                return;
            }
        };

        if let Err(err) = self.app.init(device.gl()) {
            self.fail_startup(event_loop, err.context("app initialization failed"));
            return;
        }

        window.request_redraw();
        self.window = Some(WindowState { window, device });
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation pacing comes from vsync.
        if let Some(state) = &self.window {
            state.window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.teardown();
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(state) = self.window.as_mut() {
                    state.device.resize(new_size);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(state) = self.window.as_mut() else {
                    return;
                };

                let control = {
                    let mut ctx = FrameCtx {
                        gl: state.device.gl(),
                        size: state.device.size(),
                    };
                    self.app.on_frame(&mut ctx)
                };

                if let Err(err) = state.device.swap_buffers() {
                    log::error!("{err:#}");
                }

                if control == AppControl::Exit {
                    self.teardown();
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
