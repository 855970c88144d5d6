//! GL diagnostics: the debug message callback and error-queue draining.
//!
//! Two mechanisms, matching the two ways the backend reports problems:
//! - the debug callback, registered once at context creation, covers every
//!   subsequent call on drivers that support it;
//! - [`checked`] wraps a single suspect call with explicit error-queue
//!   draining, opt-in per call site.

use glow::HasContext;

// ── Error codes ───────────────────────────────────────────────────────────

/// One error code drained from the GL error queue.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct GlError(pub u32);

impl GlError {
    /// Symbolic name for the code, `GL_UNKNOWN_ERROR` if unrecognized.
    pub fn name(self) -> &'static str {
        match self.0 {
            glow::INVALID_ENUM => "GL_INVALID_ENUM",
            glow::INVALID_VALUE => "GL_INVALID_VALUE",
            glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
            glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
            glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
            glow::STACK_OVERFLOW => "GL_STACK_OVERFLOW",
            glow::STACK_UNDERFLOW => "GL_STACK_UNDERFLOW",
            _ => "GL_UNKNOWN_ERROR",
        }
    }
}

impl std::fmt::Display for GlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (0x{:04x})", self.name(), self.0)
    }
}

// ── Error-queue draining ──────────────────────────────────────────────────

/// Drains and discards every pending error code.
///
/// Called before an instrumented call so stale errors from earlier calls are
/// not misattributed to it.
pub fn clear_errors(gl: &glow::Context) {
    while unsafe { gl.get_error() } != glow::NO_ERROR {}
}

/// Drains the error queue, returning every pending code in order.
pub fn drain_errors(gl: &glow::Context) -> Vec<GlError> {
    let mut errors = Vec::new();
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        errors.push(GlError(code));
    }
    errors
}

/// Runs one GL call with error-queue instrumentation.
///
/// Stale errors are drained before `f` runs; afterwards every queued error is
/// reported together with `call` and the caller's source location. In debug
/// builds a reported error additionally panics, which stops the process under
/// a debugger; in release builds reporting is log-only.
///
/// Opt-in per call site: wrap the calls worth instrumenting, not every call.
#[track_caller]
pub fn checked<R>(gl: &glow::Context, call: &str, f: impl FnOnce() -> R) -> R {
    clear_errors(gl);
    let out = f();
    let errors = drain_errors(gl);
    if !errors.is_empty() {
        let location = std::panic::Location::caller();
        for error in &errors {
            log::error!(
                "[gl] {error} in `{call}` at {}:{}",
                location.file(),
                location.line()
            );
        }
        debug_assert!(false, "gl error in `{call}`");
    }
    out
}

// ── Debug callback ────────────────────────────────────────────────────────

/// Installs the synchronous GL debug callback, when the context supports it.
///
/// The handler formats and forwards messages to the `log` sink. It must not
/// call back into the GL API: the callback can run inside any GL call, where
/// re-entry is unsafe.
pub fn install_debug_callback(gl: &mut glow::Context) {
    if !gl.supports_debug() {
        log::debug!("GL debug output not supported by this context");
        return;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|_source, _kind, id, severity, message| {
            log::log!(severity_level(severity), "[gl] debug message ({id}): {message}");
        });
    }
}

/// Maps a GL debug severity to a `log` level.
fn severity_level(severity: u32) -> log::Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => log::Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        glow::DEBUG_SEVERITY_LOW => log::Level::Info,
        glow::DEBUG_SEVERITY_NOTIFICATION => log::Level::Trace,
        _ => log::Level::Debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_error_names() {
        assert_eq!(GlError(glow::INVALID_ENUM).name(), "GL_INVALID_ENUM");
        assert_eq!(GlError(glow::INVALID_VALUE).name(), "GL_INVALID_VALUE");
        assert_eq!(GlError(glow::INVALID_OPERATION).name(), "GL_INVALID_OPERATION");
        assert_eq!(GlError(glow::OUT_OF_MEMORY).name(), "GL_OUT_OF_MEMORY");
    }

    #[test]
    fn unknown_error_name() {
        assert_eq!(GlError(0xdead).name(), "GL_UNKNOWN_ERROR");
    }

    #[test]
    fn display_includes_code() {
        assert_eq!(GlError(glow::INVALID_ENUM).to_string(), "GL_INVALID_ENUM (0x0500)");
    }

    #[test]
    fn severity_maps_to_levels() {
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_HIGH), log::Level::Error);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_MEDIUM), log::Level::Warn);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_LOW), log::Level::Info);
        assert_eq!(severity_level(glow::DEBUG_SEVERITY_NOTIFICATION), log::Level::Trace);
        assert_eq!(severity_level(0), log::Level::Debug);
    }
}
