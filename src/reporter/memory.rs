use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::report::{AssertionReport, Outcome};

use super::Reporter;

/// Keeps every report in memory.
///
/// Share it with an engine through an `Arc` and inspect it afterwards:
///
/// ```
/// use std::sync::Arc;
/// use unitcheck::{MemoryReporter, UnitTest};
///
/// let sink = Arc::new(MemoryReporter::new());
/// let t = UnitTest::<i32>::new().with_reporter(sink.clone()).with_display();
/// t.assert_equal(&3, &4);
/// assert_eq!(sink.lines(), vec!["[FAIL] [i32::assert_equal] 3 != 4".to_string()]);
/// ```
#[derive(Debug, Default)]
pub struct MemoryReporter {
    reports: Mutex<Vec<AssertionReport>>,
}

impl MemoryReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere while holding the lock leaves the Vec intact.
    fn guard(&self) -> MutexGuard<'_, Vec<AssertionReport>> {
        self.reports.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of all captured reports, oldest first.
    #[must_use]
    pub fn reports(&self) -> Vec<AssertionReport> {
        self.guard().clone()
    }

    /// Captured reports rendered as lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.guard().iter().map(ToString::to_string).collect()
    }

    /// Captured outcomes, oldest first.
    #[must_use]
    pub fn outcomes(&self) -> Vec<Outcome> {
        self.guard().iter().map(|r| r.outcome).collect()
    }

    /// Number of captured reports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guard().len()
    }

    /// True when nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }

    /// Forgets all captured reports.
    pub fn clear(&self) {
        self.guard().clear();
    }

    /// Removes and returns all captured reports.
    #[must_use]
    pub fn take(&self) -> Vec<AssertionReport> {
        std::mem::take(&mut *self.guard())
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, report: &AssertionReport) {
        self.guard().push(report.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Detail;

    #[test]
    fn captures_in_order() {
        let sink = MemoryReporter::new();
        assert!(sink.is_empty());

        sink.report(&AssertionReport::new(Outcome::Pass, "i32", "a", Detail::message("one")));
        sink.report(&AssertionReport::new(Outcome::Fail, "i32", "b", Detail::message("two")));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.outcomes(), vec![Outcome::Pass, Outcome::Fail]);
        assert_eq!(sink.lines()[1], "[FAIL] [i32::b] two");

        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn take_drains_the_buffer() {
        let sink = MemoryReporter::new();
        sink.report(&AssertionReport::new(Outcome::Pass, "u8", "a", Detail::message("one")));

        let taken = sink.take();
        assert_eq!(taken.len(), 1);
        assert_eq!(taken[0].operation, "a");
        assert!(sink.is_empty());
        assert!(sink.take().is_empty());
    }
}
