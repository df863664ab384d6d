//! # Serbench
//!
//! A pluggable harness for comparing serialization codecs over a shared,
//! deterministically generated fixture. Codecs are registered behind a
//! common trait, run one at a time over the same value, and optionally
//! verified by deep equality after a decode round trip.
//!
//! ## Features
//!
//! - **Fixture Module**: Deterministic recursive test value generation
//!   with a string interning cache
//! - **Size Module**: Recursive structural size estimation for buffer
//!   pre-sizing
//! - **Codec Module**: The strategy contract, capability-checked
//!   registry, and the JSON, bincode, and MessagePack adapters
//! - **Bench Module**: Timed runs with panic isolation and round-trip
//!   verification
//! - **Sweep Module**: Immutable configuration profiles and the
//!   sequential matrix sweeper
//!
//! ## Example
//!
//! ```rust
//! use serbench::sweep::{standard_sweep, Harness};
//!
//! let mut harness = Harness::with_standard_codecs();
//! let runs = harness.sweep(&standard_sweep(), |run| {
//!     for result in &run.results {
//!         assert!(!result.is_failure());
//!     }
//! })?;
//! assert_eq!(runs.len(), 5);
//! # Ok::<(), serbench::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core error types
pub use error::{Error, Result};

// Core modules
pub mod error;
pub mod fixture;
pub mod size;
pub mod codec;
pub mod bench;
pub mod sweep;

// Re-export commonly used types
pub mod prelude {
    //! Common types and traits for convenient importing

    pub use crate::bench::{run_codec, run_registry, BenchmarkResult, Verdict};
    pub use crate::codec::{
        standard_registry, BincodeCodec, Capabilities, Codec, CodecRegistry, JsonCodec,
        MsgpackCodec,
    };
    pub use crate::error::{CodecError, Error, FixtureError, Result};
    pub use crate::fixture::{generate, generate_for, TestStruc};
    pub use crate::size::{estimate_size, ApproxSize};
    pub use crate::sweep::{standard_sweep, Harness, Mode, Profile, SweepRun, Transport};
}

/// Install the default tracing subscriber for harness reporting.
///
/// Filtering follows `RUST_LOG`; repeated calls after the first are
/// no-ops so tests can call this freely.
pub fn init_reporting() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

// Version information
/// The version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of this crate
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
