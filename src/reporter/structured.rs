use std::fmt;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use crate::report::{AssertionReport, Outcome};

use super::Reporter;

/// Emits each report as a `tracing` event.
///
/// Passing assertions log at `info`, failures at `warn`, errored deferred
/// entries at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, report: &AssertionReport) {
        let detail = report.detail.to_string();
        match report.outcome {
            Outcome::Pass => tracing::info!(
                type_name = report.type_name,
                operation = %report.operation,
                detail = %detail,
                "assertion passed"
            ),
            Outcome::Fail => tracing::warn!(
                type_name = report.type_name,
                operation = %report.operation,
                detail = %detail,
                "assertion failed"
            ),
            Outcome::Errored => tracing::error!(
                type_name = report.type_name,
                operation = %report.operation,
                detail = %detail,
                "assertion errored"
            ),
        }
    }
}

/// Writes each report as one JSON object per line.
pub struct JsonLinesReporter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesReporter {
    /// Writes to the given sink.
    pub fn new(out: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    /// Writes to standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl fmt::Debug for JsonLinesReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonLinesReporter").finish_non_exhaustive()
    }
}

impl Reporter for JsonLinesReporter {
    fn report(&self, report: &AssertionReport) {
        let line = match serde_json::to_string(report) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize assertion report");
                return;
            }
        };
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, "failed to write assertion report");
        }
    }
}
