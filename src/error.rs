//! Error types for unitcheck.
//!
//! A false verdict is never an error: assertions return `bool`. These types
//! only cover configuration problems, replay aborts under the fail-fast
//! policy, and internal failures such as a poisoned lock.

use thiserror::Error;

use crate::engine::DeferredId;

/// Errors raised while loading a [`UnitTestConfig`](crate::config::UnitTestConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {message}")]
    Parse {
        message: String,
    },
}

/// Errors raised while replaying deferred assertions.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Replay aborted at entry {index} ('{label}', {id}): {message}")]
    Aborted {
        index: usize,
        id: DeferredId,
        label: String,
        message: String,
    },
}

/// Top-level error type for unitcheck.
#[derive(Debug, Error)]
pub enum AssertError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl AssertError {
    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true if this is a replay error.
    #[must_use]
    pub const fn is_replay(&self) -> bool {
        matches!(self, Self::Replay(_))
    }

    /// Returns true if this is an internal error.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }
}

/// Result type alias for unitcheck operations.
pub type AssertResult<T> = Result<T, AssertError>;
