//! Assertion results as handed to reporters.
//!
//! A report is transient: the engine builds one per assertion, passes it to
//! the configured [`Reporter`](crate::reporter::Reporter) and drops it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one assertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The verdict was true.
    Pass,
    /// The verdict was false.
    Fail,
    /// A deferred predicate panicked or returned an error.
    Errored,
}

impl Outcome {
    /// Maps a verdict to `Pass` / `Fail`.
    #[must_use]
    pub const fn from_verdict(verdict: bool) -> Self {
        if verdict {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Marker printed at the start of a report line.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Pass => "[PASS]",
            Self::Fail => "[FAIL]",
            Self::Errored => "[ERROR]",
        }
    }
}

/// What a report says about the operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Detail {
    /// Both operands rendered, joined by the observed relation.
    Compared {
        /// Left operand.
        left: String,
        /// Relation that held, e.g. `==`, `!=`, `in`.
        symbol: String,
        /// Right operand.
        right: String,
    },
    /// Plain sentence, used when operands cannot be rendered.
    Message {
        /// The sentence.
        text: String,
    },
}

impl Detail {
    /// Builds a [`Detail::Compared`].
    #[must_use]
    pub fn compared(left: impl Into<String>, symbol: &str, right: impl Into<String>) -> Self {
        Self::Compared {
            left: left.into(),
            symbol: symbol.to_string(),
            right: right.into(),
        }
    }

    /// Builds a [`Detail::Message`].
    #[must_use]
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message { text: text.into() }
    }
}

impl fmt::Display for Detail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compared { left, symbol, right } => write!(f, "{left} {symbol} {right}"),
            Self::Message { text } => f.write_str(text),
        }
    }
}

/// The result of a single assertion.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionReport {
    pub outcome: Outcome,
    pub type_name: &'static str,
    pub operation: String,
    pub detail: Detail,
    pub timestamp: DateTime<Utc>,
}

impl AssertionReport {
    /// Creates a report stamped with the current time.
    #[must_use]
    pub fn new(
        outcome: Outcome,
        type_name: &'static str,
        operation: impl Into<String>,
        detail: Detail,
    ) -> Self {
        Self {
            outcome,
            type_name,
            operation: operation.into(),
            detail,
            timestamp: Utc::now(),
        }
    }

    /// True when the outcome is [`Outcome::Pass`].
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// Renders the human-readable report line:
/// `[PASS] [i32::assert_equal] 3 == 3`.
impl fmt::Display for AssertionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}::{}] {}",
            self.outcome.marker(),
            self.type_name,
            self.operation,
            self.detail
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_from_verdict() {
        assert_eq!(Outcome::from_verdict(true), Outcome::Pass);
        assert_eq!(Outcome::from_verdict(false), Outcome::Fail);
    }

    #[test]
    fn compared_line_format() {
        let report = AssertionReport::new(
            Outcome::Pass,
            "i32",
            "assert_equal",
            Detail::compared("3", "==", "3"),
        );
        assert_eq!(report.to_string(), "[PASS] [i32::assert_equal] 3 == 3");
        assert!(report.passed());
    }

    #[test]
    fn message_line_format() {
        let report = AssertionReport::new(
            Outcome::Errored,
            "demo::Widget",
            "checksum",
            Detail::message("predicate panicked: boom"),
        );
        assert_eq!(
            report.to_string(),
            "[ERROR] [demo::Widget::checksum] predicate panicked: boom"
        );
        assert!(!report.passed());
    }

    #[test]
    fn report_serializes_with_tagged_detail() {
        let report = AssertionReport::new(
            Outcome::Fail,
            "u8",
            "assert_in",
            Detail::compared("7", "not in", "container"),
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"], "fail");
        assert_eq!(json["detail"]["kind"], "compared");
        assert_eq!(json["detail"]["symbol"], "not in");
        assert!(json["timestamp"].is_string());
    }
}
