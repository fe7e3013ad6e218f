//! Shared error classification for talent-core.
//!
//! Individual error enums live next to the modules that raise them; this
//! module only defines the severity scale the runtime uses to pick logging
//! and recovery strategies.

/// Severity level of an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Expected rejection of a player request; retry with different input.
    ///
    /// Examples: not enough points, prerequisites unmet
    Recoverable,

    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: unknown tab, unknown talent
    Validation,

    /// Required collaborator or content missing; the request cannot be
    /// served at all.
    ///
    /// Examples: graph oracle not provided to the environment
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}
