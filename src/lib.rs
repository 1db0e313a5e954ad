//! # unitcheck
//!
//! Generic unit-test assertions with an optional deferred replay list.
//!
//! `UnitTest<T>` checks values of type `T` for equality, truthiness,
//! identity, null-ness, container membership and runtime type. Which
//! assertions exist for a given `T` is decided by trait bounds, so asking
//! for an unsupported one does not compile.
//!
//! ## Core Concepts
//!
//! - **Assertion**: a check that returns its verdict and emits one report
//! - **Deferred assertion**: an assertion bound to its arguments now and run
//!   later by [`UnitTest::replay`]
//! - **Capability**: a trait such as [`BooleanConvertible`] gating assertions
//! - **Reporter**: the sink that receives every [`AssertionReport`]
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use unitcheck::{MemoryReporter, UnitTest};
//!
//! let sink = Arc::new(MemoryReporter::new());
//! let mut t = UnitTest::<i32>::new().with_display().with_reporter(sink.clone());
//!
//! // Immediate mode
//! assert!(t.assert_in(&3, &vec![1, 2, 3, 4, 5]));
//!
//! // Deferred mode
//! t.defer(UnitTest::<i32>::assert_equal, (3, 3));
//! t.defer(UnitTest::<i32>::assert_equal, (3, 4));
//! let summary = t.replay()?;
//!
//! assert_eq!(summary.failed, 1);
//! assert_eq!(sink.lines()[2], "[FAIL] [i32::assert_equal] 3 != 4");
//! # Ok::<(), unitcheck::AssertError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod report;
pub mod reporter;

// Re-export primary types at crate root for convenience
pub use capability::{
    BooleanConvertible, EqualityCapable, InequalityCapable, IterableContainer, NullSentinel,
    SharedHandle,
};
pub use config::{ReplayPolicy, SinkKind, UnitTestConfig};
pub use engine::{DeferredId, IntoVerdict, Operation, Predicate, Renderer, ReplaySummary, UnitTest};
pub use error::{AssertError, AssertResult, ConfigError, ReplayError};
pub use registry::{Scope, SharedUnitTest};
pub use report::{AssertionReport, Detail, Outcome};
pub use reporter::{ConsoleReporter, JsonLinesReporter, MemoryReporter, Reporter, TracingReporter};
