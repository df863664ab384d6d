//! Error types for the serbench harness
//!
//! This module provides a unified error handling system using `thiserror`
//! for all components of the harness. Per-codec failures are recorded in
//! benchmark results rather than propagated; only fixture construction
//! failures are fatal.

use thiserror::Error;

/// The main error type for the serbench harness
#[derive(Error, Debug)]
pub enum Error {
    /// Fixture generation errors
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// Codec invocation or registration errors
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Fixture-specific error types
///
/// Fixture construction is the only operation whose failure aborts a
/// sweep: nothing is measurable without the shared test value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// Requested recursion depth exceeds the generator's enforced maximum
    #[error("Recursion depth {requested} exceeds maximum {max}")]
    DepthExceeded {
        /// The depth the caller asked for
        requested: usize,
        /// The generator's hard cap
        max: usize,
    },
}

/// Codec-specific error types
///
/// All four kinds are caught at the per-codec boundary and downgraded to
/// a recorded result entry; none abort the runner or the sweeper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A backend's encode strategy returned an error or panicked
    #[error("Encode failed: {codec}: {reason}")]
    EncodeFailed {
        /// Registered codec name
        codec: String,
        /// Backend error text or panic payload
        reason: String,
    },

    /// A backend's decode strategy returned an error or panicked
    #[error("Decode failed: {codec}: {reason}")]
    DecodeFailed {
        /// Registered codec name
        codec: String,
        /// Backend error text or panic payload
        reason: String,
    },

    /// Decode succeeded but the round-tripped value differs from the original
    #[error("Round-trip verification mismatch: {codec}")]
    VerificationMismatch {
        /// Registered codec name
        codec: String,
    },

    /// A codec does not satisfy a capability the registry or profile requires
    #[error("Unsupported capability: {codec}: {capability}")]
    UnsupportedCapability {
        /// Registered codec name
        codec: String,
        /// The missing capability, e.g. "streaming"
        capability: String,
    },
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

/// Convenience type alias for fixture Results
pub type FixtureResult<T> = std::result::Result<T, FixtureError>;

/// Convenience type alias for codec Results
pub type CodecResult<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let codec_error = CodecError::EncodeFailed {
            codec: "json".to_string(),
            reason: "buffer too small".to_string(),
        };
        let error = Error::Codec(codec_error);
        assert!(error.to_string().contains("Codec error"));
        assert!(error.to_string().contains("Encode failed"));
        assert!(error.to_string().contains("json"));
    }

    #[test]
    fn test_fixture_error_is_fatal_class() {
        let fixture_error = FixtureError::DepthExceeded {
            requested: 100,
            max: 8,
        };
        let error = Error::Fixture(fixture_error);
        assert!(error.to_string().contains("Fixture error"));
        assert!(error.to_string().contains("100"));
    }

    #[test]
    fn test_verification_mismatch_display() {
        let err = CodecError::VerificationMismatch {
            codec: "msgpack".to_string(),
        };
        assert!(err.to_string().contains("msgpack"));
        assert!(err.to_string().contains("mismatch"));
    }
}
