use std::sync::Mutex;

/// Severity of a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

/// A single reported diagnostic, as captured by [`MemorySink`].
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub context: Vec<(String, String)>,
}

/// Leveled message sink the runtime reports through.
///
/// Sinks never fail; reporting is fire-and-forget. Context pairs are
/// free-form structured detail alongside the message.
pub trait DiagnosticsSink: Send + Sync {
    fn log(&self, level: Level, message: &str, context: &[(&str, &str)]);

    fn info(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Level::Info, message, context);
    }

    fn warn(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Level::Warn, message, context);
    }

    fn error(&self, message: &str, context: &[(&str, &str)]) {
        self.log(Level::Error, message, context);
    }
}

/// Default sink: forwards to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn log(&self, level: Level, message: &str, context: &[(&str, &str)]) {
        match level {
            Level::Info => tracing::info!(target: "velto", ?context, "{message}"),
            Level::Warn => tracing::warn!(target: "velto", ?context, "{message}"),
            Level::Error => tracing::error!(target: "velto", ?context, "{message}"),
        }
    }
}

/// Collecting sink for tests and tooling.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn records(&self) -> Vec<Diagnostic> {
        self.records.lock().unwrap().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.records.lock().unwrap().iter().filter(|d| d.level == level).count()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.level == level)
            .map(|d| d.message.clone())
            .collect()
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&self, level: Level, message: &str, context: &[(&str, &str)]) {
        let context = context
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.records.lock().unwrap().push(Diagnostic {
            level,
            message: message.to_string(),
            context,
        });
    }
}
