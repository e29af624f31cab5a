//! Error taxonomy for the split tree and scroller.
//!
//! `NotFound` / `InvalidArgument` / `UnknownOption` / `OptionTypeMismatch`
//! are ordinary `Err` values callers recover from. An out-of-range value
//! that can be clamped into range is not an error at all — it succeeds and
//! comes back wrapped in [`Clamped`]. A `Fatal` condition (Canvas allocation
//! failure, a broken structural invariant) is never constructed as a
//! `WmError` — it is logged and then escalated via `panic!`, matching
//! "aborts the process after attempting to flush."

use std::fmt;

use crate::tree::NodeId;

/// Recoverable errors returned from tree and scroller command entry points.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum WmError {
    /// A pane/node argument was not found in its expected container.
    #[error("node {0:?} not found")]
    NotFound(NodeId),

    /// An argument was structurally invalid for the requested operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An option name was not recognized.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// A value did not match the declared type of an option.
    #[error("type mismatch for option {name}: expected {expected}")]
    OptionTypeMismatch {
        name: &'static str,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, WmError>;

/// Wraps a value that was clamped into range, so callers who care can detect
/// it (`was_clamped()`) without forcing every caller to match on an `Err`
/// for a successful, locally-recovered outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clamped<T> {
    value: T,
    clamped: bool,
}

impl<T> Clamped<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            clamped: false,
        }
    }

    pub fn clamped(value: T) -> Self {
        Self {
            value,
            clamped: true,
        }
    }

    pub fn was_clamped(&self) -> bool {
        self.clamped
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> std::ops::Deref for Clamped<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Display> fmt::Display for Clamped<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clamped {
            write!(f, "{} (clamped)", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}
