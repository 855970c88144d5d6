/// Initialization parameters for the GL layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or driver requirement exists.
#[derive(Debug, Clone)]
pub struct GlInit {
    /// Block buffer swaps on vertical sync.
    ///
    /// Vsync is the only frame pacing the runtime has; disabling it makes the
    /// redraw loop spin as fast as the driver allows.
    pub vsync: bool,

    /// Request a debug context and install the debug message callback.
    ///
    /// Defaults to on in debug builds only; debug contexts can cost
    /// measurable driver overhead.
    pub debug: bool,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            vsync: true,
            debug: cfg!(debug_assertions),
        }
    }
}
