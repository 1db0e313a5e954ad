use std::any::{type_name, Any};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::ReplayPolicy;
use crate::error::{AssertResult, ReplayError};
use crate::report::{AssertionReport, Detail, Outcome};
use crate::reporter::MemoryReporter;

use super::UnitTest;

/// Unique identifier for a deferred assertion.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeferredId(Uuid);

impl DeferredId {
    /// Create a new random id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for DeferredId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeferredId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result type of external predicates: `bool`, or `Result<bool, E>` for
/// predicates that can fail.
pub trait IntoVerdict {
    /// `Ok(verdict)`, or `Err(message)` when the predicate itself failed.
    fn into_verdict(self) -> Result<bool, String>;
}

impl IntoVerdict for bool {
    fn into_verdict(self) -> Result<bool, String> {
        Ok(self)
    }
}

impl<E: fmt::Display> IntoVerdict for Result<bool, E> {
    fn into_verdict(self) -> Result<bool, String> {
        self.map_err(|e| e.to_string())
    }
}

/// An engine operation that can be bound to an argument tuple.
///
/// Implemented for every `Fn(&UnitTest<T>, &A, ..) -> bool` of one to three
/// arguments, which includes the engine's own assertion methods such as
/// `UnitTest::<i32>::assert_equal`.
pub trait Operation<T, Args>: Send + 'static {
    /// Runs the operation against `engine` with the bound arguments.
    fn invoke(&self, engine: &UnitTest<T>, args: &Args) -> bool;
}

/// A free-standing predicate that can be bound to an argument tuple.
///
/// Implemented for every `Fn(&A, ..) -> R` of zero to four arguments where
/// `R: IntoVerdict`.
pub trait Predicate<Args>: Send + 'static {
    /// Evaluates the predicate with the bound arguments.
    fn evaluate(&self, args: &Args) -> Result<bool, String>;
}

macro_rules! impl_operation {
    ($($ty:ident $val:ident),+) => {
        impl<T, F, $($ty),+> Operation<T, ($($ty,)+)> for F
        where
            F: Fn(&UnitTest<T>, $(&$ty),+) -> bool + Send + 'static,
        {
            fn invoke(&self, engine: &UnitTest<T>, args: &($($ty,)+)) -> bool {
                let ($($val,)+) = args;
                self(engine, $($val),+)
            }
        }
    };
}

impl_operation!(A a);
impl_operation!(A a, B b);
impl_operation!(A a, B b, C c);

impl<F, R> Predicate<()> for F
where
    F: Fn() -> R + Send + 'static,
    R: IntoVerdict,
{
    fn evaluate(&self, _args: &()) -> Result<bool, String> {
        self().into_verdict()
    }
}

macro_rules! impl_predicate {
    ($($ty:ident $val:ident),+) => {
        impl<F, R, $($ty),+> Predicate<($($ty,)+)> for F
        where
            F: Fn($(&$ty),+) -> R + Send + 'static,
            R: IntoVerdict,
        {
            fn evaluate(&self, args: &($($ty,)+)) -> Result<bool, String> {
                let ($($val,)+) = args;
                self($($val),+).into_verdict()
            }
        }
    };
}

impl_predicate!(A a);
impl_predicate!(A a, B b);
impl_predicate!(A a, B b, C c);
impl_predicate!(A a, B b, C c, D d);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    /// Engine operation; its own reports are settled into one.
    Operation,
    /// External predicate; replay reports its verdict.
    Predicate,
}

type Thunk<T> = Box<dyn Fn(&UnitTest<T>) -> Result<bool, String> + Send>;

/// A bound assertion waiting in the deferred list.
pub(crate) struct DeferredAssertion<T> {
    id: DeferredId,
    label: String,
    kind: EntryKind,
    thunk: Thunk<T>,
}

/// Counts produced by one replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReplaySummary {
    /// Entries whose verdict was true.
    pub passed: usize,
    /// Entries whose verdict was false.
    pub failed: usize,
    /// Entries that panicked or returned an error.
    pub errored: usize,
}

impl ReplaySummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail => self.failed += 1,
            Outcome::Errored => self.errored += 1,
        }
    }

    /// Number of entries that ran.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    /// True when every entry that ran passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }
}

/// Last path segment of a type name, without generic arguments:
/// `unitcheck::engine::UnitTest<i32>::assert_in<Vec<i32>>` becomes
/// `assert_in`.
fn short_name(full: &str) -> String {
    let mut depth = 0usize;
    let mut start = 0;
    let bytes = full.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            b'>' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                start = i + 2;
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    let last = &full[start..];
    let name = last.split('<').next().unwrap_or(last);
    match name {
        "{{closure}}" => "closure".to_string(),
        other => other.to_string(),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    format!("panicked: {message}")
}

impl<T: 'static> UnitTest<T> {
    fn push(&mut self, label: String, kind: EntryKind, thunk: Thunk<T>) -> DeferredId {
        let id = DeferredId::new();
        tracing::trace!(
            type_name = type_name::<T>(),
            %id,
            label = %label,
            position = self.deferred.len(),
            "registered deferred assertion"
        );
        self.deferred.push(DeferredAssertion { id, label, kind, thunk });
        id
    }

    /// Binds an engine operation to `args` and appends it to the deferred
    /// list.
    ///
    /// Arguments are moved in now; later changes to the caller's variables
    /// do not affect the entry.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use unitcheck::{MemoryReporter, UnitTest};
    ///
    /// let sink = Arc::new(MemoryReporter::new());
    /// let mut t = UnitTest::<i32>::new().with_reporter(sink.clone());
    /// t.defer(UnitTest::<i32>::assert_equal, (3, 3));
    /// t.defer(UnitTest::<i32>::assert_equal, (3, 4));
    ///
    /// let summary = t.replay().unwrap();
    /// assert_eq!((summary.passed, summary.failed), (1, 1));
    /// assert_eq!(sink.len(), 2);
    /// ```
    pub fn defer<Args, Op>(&mut self, op: Op, args: Args) -> DeferredId
    where
        Args: Send + 'static,
        Op: Operation<T, Args>,
    {
        let label = short_name(type_name::<Op>());
        self.defer_labeled(label, op, args)
    }

    /// Like [`defer`](Self::defer), with an explicit label for the entry.
    ///
    /// The label appears in reports when the entry errors during replay.
    pub fn defer_labeled<Args, Op>(
        &mut self,
        label: impl Into<String>,
        op: Op,
        args: Args,
    ) -> DeferredId
    where
        Args: Send + 'static,
        Op: Operation<T, Args>,
    {
        let thunk: Thunk<T> = Box::new(move |engine: &UnitTest<T>| Ok(op.invoke(engine, &args)));
        self.push(label.into(), EntryKind::Operation, thunk)
    }

    /// Binds an external predicate to `args` and appends it to the deferred
    /// list. Replay reports the predicate's verdict under `label`.
    pub fn defer_predicate<Args, P>(
        &mut self,
        label: impl Into<String>,
        predicate: P,
        args: Args,
    ) -> DeferredId
    where
        Args: Send + 'static,
        P: Predicate<Args>,
    {
        let thunk: Thunk<T> = Box::new(move |_: &UnitTest<T>| predicate.evaluate(&args));
        self.push(label.into(), EntryKind::Predicate, thunk)
    }

    /// Runs every deferred assertion in registration order.
    ///
    /// Each entry produces exactly one report. An operation that reports
    /// once, with the verdict it returns, has that report forwarded as is.
    /// Any other operation is reported under its label with a count of the
    /// assertions it ran. An entry that panics or returns an error is
    /// reported as [`Outcome::Errored`]; under [`ReplayPolicy::FailFast`]
    /// replay then stops with [`ReplayError::Aborted`], otherwise it moves
    /// on to the next entry.
    ///
    /// A predicate must not lock the shared instance that is replaying it.
    pub fn replay(&self) -> AssertResult<ReplaySummary> {
        tracing::debug!(
            type_name = type_name::<T>(),
            entries = self.deferred.len(),
            policy = ?self.config.policy,
            "replaying deferred assertions"
        );

        let staged = Arc::new(MemoryReporter::new());
        let stage = self.detached(staged.clone());

        let mut summary = ReplaySummary::default();
        for (index, entry) in self.deferred.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| (entry.thunk)(&stage)))
                .unwrap_or_else(|payload| Err(panic_message(payload.as_ref())));
            let nested = staged.take();

            match result {
                Ok(verdict) => {
                    match entry.kind {
                        EntryKind::Operation => self.settle(verdict, &entry.label, &nested),
                        EntryKind::Predicate => {
                            let text = if verdict {
                                "Predicate held."
                            } else {
                                "Predicate did not hold."
                            };
                            self.conclude(verdict, &entry.label, Detail::message(text));
                        }
                    }
                    summary.record(Outcome::from_verdict(verdict));
                }
                Err(message) => {
                    tracing::warn!(
                        type_name = type_name::<T>(),
                        index,
                        id = %entry.id,
                        label = %entry.label,
                        discarded = nested.len(),
                        error = %message,
                        "deferred assertion errored"
                    );
                    self.emit(Outcome::Errored, &entry.label, Detail::message(message.clone()));
                    summary.record(Outcome::Errored);

                    if self.config.policy == ReplayPolicy::FailFast {
                        return Err(ReplayError::Aborted {
                            index,
                            id: entry.id,
                            label: entry.label.clone(),
                            message,
                        }
                        .into());
                    }
                }
            }
        }

        tracing::debug!(
            type_name = type_name::<T>(),
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            "replay finished"
        );
        Ok(summary)
    }

    /// Reduces what an operation reported to the entry's single report.
    fn settle(&self, verdict: bool, label: &str, nested: &[AssertionReport]) {
        match nested {
            [only] if only.outcome == Outcome::from_verdict(verdict) => self.reporter.report(only),
            [] => {
                let text = format!("Operation returned {verdict}.");
                self.conclude(verdict, label, Detail::message(text));
            }
            many => {
                let passed = many.iter().filter(|r| r.outcome == Outcome::Pass).count();
                let text = format!("{passed} of {} nested assertions passed.", many.len());
                self.conclude(verdict, label, Detail::message(text));
            }
        }
    }
}

impl<T> UnitTest<T> {
    /// Drops every deferred assertion.
    pub fn clear(&mut self) {
        self.deferred.clear();
    }

    /// Number of deferred assertions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.deferred.len()
    }

    /// True when no assertion is deferred.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deferred.is_empty()
    }

    /// Ids and labels of the deferred assertions, in replay order.
    pub fn pending(&self) -> impl Iterator<Item = (DeferredId, &str)> + '_ {
        self.deferred.iter().map(|entry| (entry.id, entry.label.as_str()))
    }
}
