//! Report sinks.
//!
//! The engine hands every [`AssertionReport`] to a [`Reporter`]. Reporters
//! are pure side effects: they must not panic and cannot influence the
//! verdict that was already computed.

/// Line-oriented console sinks.
pub mod console;
/// In-memory capture, mostly for tests.
pub mod memory;
/// `tracing` and JSON-lines sinks.
pub mod structured;

use std::sync::Arc;

use crate::config::SinkKind;
use crate::report::AssertionReport;

pub use console::{ConsoleReporter, ConsoleTarget};
pub use memory::MemoryReporter;
pub use structured::{JsonLinesReporter, TracingReporter};

/// Receives assertion reports.
pub trait Reporter: Send + Sync {
    /// Emits one report.
    fn report(&self, report: &AssertionReport);
}

/// Builds the reporter for a configured sink.
#[must_use]
pub fn from_sink(kind: SinkKind) -> Arc<dyn Reporter> {
    match kind {
        SinkKind::Stdout => Arc::new(ConsoleReporter::stdout()),
        SinkKind::Stderr => Arc::new(ConsoleReporter::stderr()),
        SinkKind::Tracing => Arc::new(TracingReporter),
        SinkKind::Json => Arc::new(JsonLinesReporter::stdout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Detail, Outcome};

    #[test]
    fn every_sink_kind_accepts_reports() {
        let detail = Detail::compared("1", "==", "1");
        let report = AssertionReport::new(Outcome::Pass, "i32", "assert_equal", detail);
        for kind in [SinkKind::Stdout, SinkKind::Stderr, SinkKind::Tracing, SinkKind::Json] {
            from_sink(kind).report(&report);
        }
    }
}
