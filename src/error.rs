//! Error types for measurement passes.
//!
//! The taxonomy is narrow: the engine runs against an already-live
//! container, so the only failures are host-side mutation rejections and
//! configured limit violations. A container with no text is not an error;
//! it measures as an empty length sequence.

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Processing phase where a pass failure originated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorPhase {
    /// Splitting container text into wrapped fragments.
    Fragment,
    /// Reading fragment positions from the layout oracle.
    Geometry,
    /// Restoring the container's original structure.
    Revert,
}

impl ErrorPhase {
    /// Stable lowercase name for diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Geometry => "geometry",
            Self::Revert => "revert",
        }
    }
}

/// Failure of one measurement pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GaugeError {
    /// The text host rejected a structural mutation or its revert.
    ///
    /// Fatal to the current pass: a half-applied transformation cannot be
    /// recovered, only reverted best-effort.
    Host {
        /// Phase where the host failed.
        phase: ErrorPhase,
        /// Host-provided failure description.
        message: Box<str>,
    },
    /// Fragmentation exceeded configured limits before mutating anything
    /// past the limit.
    LimitExceeded {
        /// Which limit was hit.
        kind: &'static str,
        /// Observed value.
        actual: usize,
        /// Configured bound.
        limit: usize,
    },
}

impl GaugeError {
    pub(crate) fn host(phase: ErrorPhase, message: impl fmt::Display) -> Self {
        Self::Host {
            phase,
            message: alloc::format!("{}", message).into_boxed_str(),
        }
    }
}

impl fmt::Display for GaugeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host { phase, message } => {
                write!(f, "text host failed during {}: {}", phase.as_str(), message)
            }
            Self::LimitExceeded {
                kind,
                actual,
                limit,
            } => write!(
                f,
                "fragmentation limit exceeded: {} (actual={} limit={})",
                kind, actual, limit
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GaugeError {}
