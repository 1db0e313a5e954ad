use std::io::{self, Write};

use crate::report::AssertionReport;

use super::Reporter;

/// Which standard stream a [`ConsoleReporter`] writes to.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes one line per report to stdout or stderr.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleReporter {
    target: ConsoleTarget,
}

impl ConsoleReporter {
    /// Reporter writing to standard output.
    #[must_use]
    pub const fn stdout() -> Self {
        Self {
            target: ConsoleTarget::Stdout,
        }
    }

    /// Reporter writing to standard error.
    #[must_use]
    pub const fn stderr() -> Self {
        Self {
            target: ConsoleTarget::Stderr,
        }
    }

    /// The stream this reporter writes to.
    #[must_use]
    pub const fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::stdout()
    }
}

impl Reporter for ConsoleReporter {
    fn report(&self, report: &AssertionReport) {
        // A closed pipe must not turn into a failed assertion.
        let _ = match self.target {
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{report}"),
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{report}"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Detail, Outcome};

    #[test]
    fn default_targets_stdout() {
        assert_eq!(ConsoleReporter::default().target(), ConsoleTarget::Stdout);
        assert_eq!(ConsoleReporter::stderr().target(), ConsoleTarget::Stderr);
    }

    #[test]
    fn reporting_does_not_panic() {
        let detail = Detail::message("value is true");
        let report = AssertionReport::new(Outcome::Pass, "i32", "assert_true", detail);
        ConsoleReporter::stdout().report(&report);
        ConsoleReporter::stderr().report(&report);
    }
}
