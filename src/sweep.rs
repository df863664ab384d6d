//! Configuration profiles and the matrix sweeper
//!
//! A [`Profile`] is an immutable snapshot of every knob that shapes a
//! run: transport mode, fixture depth, verification, buffer reuse. The
//! sweeper walks an explicit list of profiles strictly sequentially,
//! regenerating the fixture at each point and restoring the harness to
//! its prior profile afterwards, even when a point fails.

use crate::bench::{run_registry, BenchmarkResult};
use crate::codec::{standard_registry, CodecRegistry};
use crate::error::Result;
use crate::fixture::{generate_for, TestStruc};

/// How encoded bytes travel between codec and harness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// Encode to and decode from an in-memory byte buffer
    Buffered,
    /// Encode through a writer, decode through a reader
    Streaming,
}

/// How a codec run is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One timed encode and one timed decode
    SinglePass,
    /// Warm-up pair, then the given number of timed encodes and decodes
    Iterations(u32),
}

/// Immutable configuration for one run.
///
/// Built once and threaded through every harness entry point; nothing
/// reads mutable global state. The `with_*` builders consume and return
/// by value so sweep points can be derived from a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Human-readable label used in sweep reporting
    pub label: String,
    /// Transport mode codecs should drive
    pub transport: Transport,
    /// Minimum capacity for fresh encode buffers, in bytes
    pub buffer_hint: usize,
    /// Feed each encode's output back as the next encode's scratch buffer
    pub reuse_codec_state: bool,
    /// Route generated repeated strings through the interning cache
    pub intern_strings: bool,
    /// Deep-compare the decoded value against the original
    pub verify_round_trip: bool,
    /// Fixture nesting depth passed to the generator
    pub recursion_depth: usize,
    /// Fixture string repetition factor passed to the generator
    pub repeat_factor: usize,
    /// Measurement mode
    pub mode: Mode,
}

impl Profile {
    /// The defaults every sweep point is derived from: buffered
    /// transport, shallow fixture, no verification, single pass.
    pub fn baseline() -> Self {
        Self {
            label: "baseline".to_string(),
            transport: Transport::Buffered,
            buffer_hint: 1024,
            reuse_codec_state: false,
            intern_strings: false,
            verify_round_trip: false,
            recursion_depth: 0,
            repeat_factor: 8,
            mode: Mode::SinglePass,
        }
    }

    /// Replace the reporting label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replace the transport mode
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the encode buffer capacity hint
    pub fn with_buffer_hint(mut self, buffer_hint: usize) -> Self {
        self.buffer_hint = buffer_hint;
        self
    }

    /// Enable or disable scratch-buffer reuse across iterations
    pub fn with_reuse(mut self, reuse: bool) -> Self {
        self.reuse_codec_state = reuse;
        self
    }

    /// Enable or disable string interning during fixture generation
    pub fn with_interning(mut self, intern: bool) -> Self {
        self.intern_strings = intern;
        self
    }

    /// Enable or disable round-trip verification
    pub fn with_verification(mut self, verify: bool) -> Self {
        self.verify_round_trip = verify;
        self
    }

    /// Replace the fixture nesting depth
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.recursion_depth = depth;
        self
    }

    /// Replace the fixture string repetition factor
    pub fn with_repeat_factor(mut self, repeat_factor: usize) -> Self {
        self.repeat_factor = repeat_factor;
        self
    }

    /// Replace the measurement mode
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::baseline()
    }
}

/// The conventional sweep: the baseline plus one point per knob, each
/// flipping a single setting away from the baseline.
pub fn standard_sweep() -> Vec<Profile> {
    let base = Profile::baseline();
    vec![
        base.clone(),
        base.clone()
            .with_label("streaming-transport")
            .with_transport(Transport::Streaming),
        base.clone()
            .with_label("reuse-codec-state")
            .with_reuse(true),
        base.clone()
            .with_label("intern-strings")
            .with_interning(true),
        base.with_label("verify-round-trip").with_verification(true),
    ]
}

/// Outcome of one sweep point: the profile that was active and one
/// result per registered codec, in registration order.
#[derive(Debug)]
pub struct SweepRun {
    /// Profile the point ran under
    pub profile: Profile,
    /// Per-codec results in registration order
    pub results: Vec<BenchmarkResult>,
}

/// Owns a codec registry and the currently-applied profile, and drives
/// sweeps over explicit profile lists.
pub struct Harness {
    registry: CodecRegistry<TestStruc>,
    current: Profile,
}

impl Harness {
    /// Harness over an explicit registry, starting at the baseline profile
    pub fn new(registry: CodecRegistry<TestStruc>) -> Self {
        Self {
            registry,
            current: Profile::baseline(),
        }
    }

    /// Harness over the default backend set
    pub fn with_standard_codecs() -> Self {
        Self::new(standard_registry())
    }

    /// The profile currently applied to the harness
    pub fn current(&self) -> &Profile {
        &self.current
    }

    /// The registry this harness drives
    pub fn registry(&self) -> &CodecRegistry<TestStruc> {
        &self.registry
    }

    /// Run every profile in `profiles` in order, calling `body` with each
    /// completed point.
    ///
    /// The profile active before the sweep is restored afterwards,
    /// whether the sweep finishes or aborts. Per-codec failures are
    /// recorded on the point's results and never abort the sweep; only a
    /// fixture generation failure is fatal.
    pub fn sweep<F>(&mut self, profiles: &[Profile], mut body: F) -> Result<Vec<SweepRun>>
    where
        F: FnMut(&SweepRun),
    {
        let snapshot = self.current.clone();
        let outcome = self.sweep_inner(profiles, &mut body);
        self.current = snapshot;
        outcome
    }

    fn sweep_inner<F>(&mut self, profiles: &[Profile], body: &mut F) -> Result<Vec<SweepRun>>
    where
        F: FnMut(&SweepRun),
    {
        let mut runs = Vec::with_capacity(profiles.len());
        for profile in profiles {
            self.current = profile.clone();
            tracing::info!(point = %profile.label, "sweep point");
            let fixture = generate_for(profile)?;
            let results = run_registry(&self.registry, &fixture, profile);
            let run = SweepRun {
                profile: profile.clone(),
                results,
            };
            body(&run);
            runs.push(run);
        }
        Ok(runs)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::with_standard_codecs()
    }
}
