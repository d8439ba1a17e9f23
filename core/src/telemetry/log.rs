use ::log::{log, log_enabled, Level};

/// Thin wrapper over the `log` facade that pins every record to one target.
#[derive(Debug, Clone, Copy)]
pub struct LogManager {
    target: &'static str,
}

impl LogManager {
    pub fn new() -> Self {
        Self::with_target("stepcore")
    }

    pub fn with_target(target: &'static str) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn record(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Builds the message lazily; the closure runs only if trace is enabled.
    pub fn trace_with<F: FnOnce() -> String>(&self, build: F) {
        if log_enabled!(target: self.target, Level::Trace) {
            self.emit(Level::Trace, &build());
        }
    }

    fn emit(&self, level: Level, message: &str) {
        log!(target: self.target, level, "{}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
