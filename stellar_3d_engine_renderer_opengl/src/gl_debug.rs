//! Debug output - routes GL_KHR_debug driver messages into the engine log
//!
//! Only compiled with the `gl-debug` feature; the callback requires a debug
//! GL context to produce anything.

use glow::HasContext;
use stellar_3d_engine::log::{dispatch, LogSeverity};

const LOG_SOURCE: &str = "stellar3d::gl::DebugOutput";

pub(crate) fn install(gl: &glow::Context) {
    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|_source, _gltype, id, severity, message| {
            let level = match severity {
                glow::DEBUG_SEVERITY_HIGH => LogSeverity::Error,
                glow::DEBUG_SEVERITY_MEDIUM => LogSeverity::Warn,
                glow::DEBUG_SEVERITY_LOW => LogSeverity::Info,
                _ => LogSeverity::Trace,
            };
            dispatch(level, LOG_SOURCE, format!("[{}] {}", id, message));
        });
    }
}
