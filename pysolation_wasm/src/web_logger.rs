// Forwards the `log` facade to the browser developer console.

struct WebLogger;

static LOGGER: WebLogger = WebLogger;

impl log::Log for WebLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("[{}] {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => gloo::console::error!(message),
            log::Level::Warn => gloo::console::warn!(message),
            log::Level::Info => gloo::console::info!(message),
            log::Level::Debug | log::Level::Trace => gloo::console::debug!(message),
        }
    }

    fn flush(&self) {}
}

// Can be called more than once: only the first call installs the logger.
pub fn init(level: log::LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
