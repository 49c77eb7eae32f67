//! Errors.

use std::fmt;

/// Failure to assemble a [`Cpu6502`](crate::Cpu6502) from a
/// [`CpuBuilder`](crate::CpuBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// No bus was supplied.
    MissingBus,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBus => write!(f, "cannot build CPU: no bus supplied"),
        }
    }
}

impl std::error::Error for BuildError {}
