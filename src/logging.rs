// Tracing setup. In the browser events go to the devtools console at the
// matching level; natively they go to stderr.

use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Install the global subscriber with `level` as an env-filter directive
/// (`"info"`, `"greeting_core=debug"`, ...). A second install is a no-op.
pub fn install(level: &str) -> Result<(), EngineError> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| EngineError::InvalidConfig(format!("log_level {level:?}: {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .without_time()
        .with_target(false);

    #[cfg(target_arch = "wasm32")]
    let builder = builder.with_writer(console::ConsoleMakeWriter);

    // Already installed by an earlier Experience; keep that one.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    pub struct ConsoleMakeWriter;

    impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter::new(Level::INFO)
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter::new(*meta.level())
        }
    }

    /// Buffers one formatted event and hands it to `console.*` on drop.
    pub struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl ConsoleWriter {
        fn new(level: Level) -> Self {
            ConsoleWriter {
                level,
                buf: Vec::new(),
            }
        }
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let text = String::from_utf8_lossy(&self.buf);
            let message = JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&message),
                Level::WARN => web_sys::console::warn_1(&message),
                Level::INFO => web_sys::console::log_1(&message),
                _ => web_sys::console::debug_1(&message),
            }
        }
    }
}
