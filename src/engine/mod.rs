//! The assertion engine.
//!
//! `UnitTest<T>` offers the assertion catalogue for values of type `T`
//! ([`assertions`]) and a list of deferred assertions that can be replayed
//! later ([`deferred`]). Every assertion returns its verdict and hands one
//! [`AssertionReport`] to the engine's reporter.

/// The assertion catalogue.
pub mod assertions;
/// Deferred registration and replay.
pub mod deferred;

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use crate::config::{ReplayPolicy, UnitTestConfig};
use crate::report::{AssertionReport, Detail, Outcome};
use crate::reporter::{self, Reporter};

pub use deferred::{DeferredId, IntoVerdict, Operation, Predicate, ReplaySummary};

use deferred::DeferredAssertion;

/// Renders a value for report lines.
pub type Renderer<T> = fn(&T) -> String;

fn render_display<T: fmt::Display>(value: &T) -> String {
    value.to_string()
}

fn render_debug<T: fmt::Debug>(value: &T) -> String {
    format!("{value:?}")
}

/// Assertion engine for values of type `T`.
///
/// # Examples
///
/// ```
/// use unitcheck::UnitTest;
///
/// let t = UnitTest::<i32>::new().with_display();
/// assert!(t.assert_equal(&5, &5));
/// assert!(!t.assert_in(&10, &vec![1, 2, 3]));
/// ```
pub struct UnitTest<T> {
    config: UnitTestConfig,
    reporter: Arc<dyn Reporter>,
    renderer: Option<Renderer<T>>,
    label: Option<String>,
    deferred: Vec<DeferredAssertion<T>>,
}

impl<T> UnitTest<T> {
    /// Creates an engine with the default configuration (stdout reports,
    /// isolate-and-continue replay) and no renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(UnitTestConfig::default())
    }

    /// Creates an engine from a configuration.
    #[must_use]
    pub fn from_config(config: UnitTestConfig) -> Self {
        Self {
            config,
            reporter: reporter::from_sink(config.sink),
            renderer: None,
            label: None,
            deferred: Vec::new(),
        }
    }

    /// A copy of this engine whose reports carry `label` in place of the
    /// operation name.
    ///
    /// The copy shares the reporter, renderer and policy. Its deferred list
    /// starts empty and is separate from this engine's.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use unitcheck::{MemoryReporter, UnitTest};
    ///
    /// let sink = Arc::new(MemoryReporter::new());
    /// let t = UnitTest::<i32>::new().with_display().with_reporter(sink.clone());
    /// t.labeled("queue_depth").assert_equal(&3, &3);
    /// assert_eq!(sink.lines(), vec!["[PASS] [i32::queue_depth] 3 == 3".to_string()]);
    /// ```
    #[must_use]
    pub fn labeled(&self, label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..self.detached(Arc::clone(&self.reporter))
        }
    }

    /// Same settings as `self`, reporting to `reporter`, with no deferred
    /// entries.
    pub(crate) fn detached(&self, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            config: self.config,
            reporter,
            renderer: self.renderer,
            label: self.label.clone(),
            deferred: Vec::new(),
        }
    }

    /// Sends reports to `reporter` instead of the configured sink.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Sets the replay policy.
    #[must_use]
    pub fn with_policy(mut self, policy: ReplayPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Renders operands with `renderer`.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer<T>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Renders operands with their `Display` implementation.
    #[must_use]
    pub fn with_display(self) -> Self
    where
        T: fmt::Display,
    {
        self.with_renderer(render_display::<T>)
    }

    /// Renders operands with their `Debug` implementation.
    #[must_use]
    pub fn with_debug(self) -> Self
    where
        T: fmt::Debug,
    {
        self.with_renderer(render_debug::<T>)
    }

    /// Replaces the reporter in place. Deferred entries are kept.
    pub fn set_reporter(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporter = reporter;
    }

    /// Replaces the renderer in place. Deferred entries are kept.
    pub fn set_renderer(&mut self, renderer: Option<Renderer<T>>) {
        self.renderer = renderer;
    }

    /// Replaces the replay policy in place.
    pub fn set_policy(&mut self, policy: ReplayPolicy) {
        self.config.policy = policy;
    }

    /// The replay policy in effect.
    #[must_use]
    pub const fn policy(&self) -> ReplayPolicy {
        self.config.policy
    }

    /// The configuration this engine was built from, with later overrides.
    #[must_use]
    pub const fn config(&self) -> &UnitTestConfig {
        &self.config
    }

    /// True when operands are rendered in reports.
    #[must_use]
    pub const fn renders(&self) -> bool {
        self.renderer.is_some()
    }

    /// Label that replaces operation names in reports, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Name of `T` as printed in reports.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    pub(crate) fn render(&self, value: &T) -> Option<String> {
        self.renderer.map(|render| render(value))
    }

    /// Compared detail when `T` renders, otherwise the fallback sentence.
    pub(crate) fn pair_detail(&self, left: &T, symbol: &str, right: &T, fallback: &str) -> Detail {
        match (self.render(left), self.render(right)) {
            (Some(l), Some(r)) => Detail::compared(l, symbol, r),
            _ => Detail::message(fallback),
        }
    }

    pub(crate) fn emit(&self, outcome: Outcome, operation: &str, detail: Detail) {
        let operation = self.label.as_deref().unwrap_or(operation);
        self.reporter
            .report(&AssertionReport::new(outcome, type_name::<T>(), operation, detail));
    }

    /// Reports a verdict and hands it back.
    pub(crate) fn conclude(&self, verdict: bool, operation: &str, detail: Detail) -> bool {
        self.emit(Outcome::from_verdict(verdict), operation, detail);
        verdict
    }
}

impl<T> Default for UnitTest<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for UnitTest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnitTest")
            .field("type_name", &type_name::<T>())
            .field("config", &self.config)
            .field("renders", &self.renderer.is_some())
            .field("label", &self.label)
            .field("deferred", &self.deferred.len())
            .finish_non_exhaustive()
    }
}
