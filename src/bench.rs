//! Benchmark runner and round-trip verifier
//!
//! Drives one codec at a time over the shared fixture under a fixed
//! profile. Every strategy invocation runs inside a panic boundary:
//! an abnormal termination inside a backend is converted into a typed
//! failure on the result, so a single misbehaving codec never prevents
//! the remaining codecs from running.

use crate::codec::{Codec, CodecRegistry};
use crate::error::CodecError;
use crate::size::{estimate_size, ApproxSize};
use crate::sweep::{Mode, Profile, Transport};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Round-trip verification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Decoded value was deep-equal to the original
    Passed,
    /// Decoded value differed from the original
    Failed,
    /// Verification was not requested or not reachable
    Skipped,
}

/// Result of one codec run under one profile
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    /// Registered codec name
    pub name: String,
    /// Encoded output length in bytes (0 when encode failed)
    pub encoded_len: usize,
    /// Elapsed encode time; total across iterations in iteration mode
    pub encode_time: Option<Duration>,
    /// Elapsed decode time; total across iterations in iteration mode
    pub decode_time: Option<Duration>,
    /// Round-trip verification outcome
    pub verification: Verdict,
    /// Failure recorded at the per-codec boundary, if any
    pub error: Option<CodecError>,
}

impl BenchmarkResult {
    fn failed(name: &str, error: CodecError) -> Self {
        Self {
            name: name.to_string(),
            encoded_len: 0,
            encode_time: None,
            decode_time: None,
            verification: Verdict::Skipped,
            error: Some(error),
        }
    }

    /// True when the run recorded any failure, including a verification
    /// mismatch
    pub fn is_failure(&self) -> bool {
        self.error.is_some() || self.verification == Verdict::Failed
    }
}

/// Extract a printable message from a panic payload.
fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn checked_encode<T>(
    name: &str,
    codec: &dyn Codec<T>,
    value: &T,
    scratch: Vec<u8>,
    profile: &Profile,
) -> Result<Vec<u8>, CodecError> {
    match panic::catch_unwind(AssertUnwindSafe(|| codec.encode(value, scratch, profile))) {
        Ok(result) => result,
        Err(payload) => Err(CodecError::EncodeFailed {
            codec: name.to_string(),
            reason: panic_message(payload),
        }),
    }
}

fn checked_decode<T>(
    name: &str,
    codec: &dyn Codec<T>,
    bytes: &[u8],
    target: &mut T,
    profile: &Profile,
) -> Result<(), CodecError> {
    match panic::catch_unwind(AssertUnwindSafe(|| codec.decode(bytes, target, profile))) {
        Ok(result) => result,
        Err(payload) => Err(CodecError::DecodeFailed {
            codec: name.to_string(),
            reason: panic_message(payload),
        }),
    }
}

/// Starting buffer: estimator result with headroom, like the original
/// harness sized its buffers, or the profile's hint if that is larger.
fn scratch_for<T: ApproxSize>(fixture: &T, profile: &Profile) -> Vec<u8> {
    let estimated = estimate_size(fixture) * 3 / 2;
    Vec::with_capacity(estimated.max(profile.buffer_hint))
}

/// Run one codec over the fixture under `profile`.
///
/// Never panics and never propagates backend failures: every outcome is
/// recorded on the returned [`BenchmarkResult`].
pub fn run_codec<T>(
    name: &str,
    codec: &dyn Codec<T>,
    fixture: &T,
    profile: &Profile,
) -> BenchmarkResult
where
    T: ApproxSize + PartialEq + Default,
{
    if profile.transport == Transport::Streaming && !codec.capabilities().streaming {
        return BenchmarkResult::failed(
            name,
            CodecError::UnsupportedCapability {
                codec: name.to_string(),
                capability: "streaming".to_string(),
            },
        );
    }

    match profile.mode {
        Mode::SinglePass => run_single_pass(name, codec, fixture, profile),
        Mode::Iterations(n) => run_iterations(name, codec, fixture, profile, n),
    }
}

/// Single-pass "unscientific" measurement: one timed encode, one timed
/// decode, optional deep-equality verification.
fn run_single_pass<T>(
    name: &str,
    codec: &dyn Codec<T>,
    fixture: &T,
    profile: &Profile,
) -> BenchmarkResult
where
    T: ApproxSize + PartialEq + Default,
{
    let scratch = scratch_for(fixture, profile);

    let started = Instant::now();
    let encoded = match checked_encode(name, codec, fixture, scratch, profile) {
        Ok(bytes) => bytes,
        Err(error) => return BenchmarkResult::failed(name, error),
    };
    let encode_time = started.elapsed();
    let encoded_len = encoded.len();

    let mut target = T::default();
    let started = Instant::now();
    if let Err(error) = checked_decode(name, codec, &encoded, &mut target, profile) {
        return BenchmarkResult {
            name: name.to_string(),
            encoded_len,
            encode_time: Some(encode_time),
            decode_time: None,
            verification: Verdict::Skipped,
            error: Some(error),
        };
    }
    let decode_time = started.elapsed();

    let verification = if profile.verify_round_trip {
        if &target == fixture {
            Verdict::Passed
        } else {
            Verdict::Failed
        }
    } else {
        Verdict::Skipped
    };
    let error = (verification == Verdict::Failed).then(|| CodecError::VerificationMismatch {
        codec: name.to_string(),
    });

    BenchmarkResult {
        name: name.to_string(),
        encoded_len,
        encode_time: Some(encode_time),
        decode_time: Some(decode_time),
        verification,
        error,
    }
}

/// Iteration-loop measurement: one untimed warm-up encode/decode pair
/// confirms the codec is viable (and verifies, when requested), then the
/// encode and decode loops are timed as wholes.
fn run_iterations<T>(
    name: &str,
    codec: &dyn Codec<T>,
    fixture: &T,
    profile: &Profile,
    iterations: u32,
) -> BenchmarkResult
where
    T: ApproxSize + PartialEq + Default,
{
    // warm-up, untimed
    let scratch = scratch_for(fixture, profile);
    let encoded = match checked_encode(name, codec, fixture, scratch, profile) {
        Ok(bytes) => bytes,
        Err(error) => return BenchmarkResult::failed(name, error),
    };
    let encoded_len = encoded.len();
    let mut target = T::default();
    if let Err(error) = checked_decode(name, codec, &encoded, &mut target, profile) {
        let mut result = BenchmarkResult::failed(name, error);
        result.encoded_len = encoded_len;
        return result;
    }
    if profile.verify_round_trip && &target != fixture {
        let mut result = BenchmarkResult::failed(
            name,
            CodecError::VerificationMismatch {
                codec: name.to_string(),
            },
        );
        result.encoded_len = encoded_len;
        result.verification = Verdict::Failed;
        return result;
    }
    let verification = if profile.verify_round_trip {
        Verdict::Passed
    } else {
        Verdict::Skipped
    };

    let mut reusable = if profile.reuse_codec_state {
        encoded.clone()
    } else {
        Vec::new()
    };

    let started = Instant::now();
    for _ in 0..iterations {
        let scratch = if profile.reuse_codec_state {
            std::mem::take(&mut reusable)
        } else {
            scratch_for(fixture, profile)
        };
        match checked_encode(name, codec, fixture, scratch, profile) {
            Ok(bytes) => {
                if profile.reuse_codec_state {
                    reusable = bytes;
                }
            }
            Err(error) => {
                let mut result = BenchmarkResult::failed(name, error);
                result.encoded_len = encoded_len;
                return result;
            }
        }
    }
    let encode_time = started.elapsed();

    let started = Instant::now();
    for _ in 0..iterations {
        let mut target = T::default();
        if let Err(error) = checked_decode(name, codec, &encoded, &mut target, profile) {
            let mut result = BenchmarkResult::failed(name, error);
            result.encoded_len = encoded_len;
            result.encode_time = Some(encode_time);
            return result;
        }
    }
    let decode_time = started.elapsed();

    BenchmarkResult {
        name: name.to_string(),
        encoded_len,
        encode_time: Some(encode_time),
        decode_time: Some(decode_time),
        verification,
        error: None,
    }
}

/// Run every registered codec over the fixture, reporting each result as
/// it is produced. Codecs run strictly sequentially so no two timed
/// sections overlap.
pub fn run_registry<T>(
    registry: &CodecRegistry<T>,
    fixture: &T,
    profile: &Profile,
) -> Vec<BenchmarkResult>
where
    T: ApproxSize + PartialEq + Default,
{
    registry
        .iter()
        .map(|entry| {
            let result = run_codec(entry.name(), entry.codec(), fixture, profile);
            report(&result);
            result
        })
        .collect()
}

/// Emit the single reporting line for one codec run.
pub fn report(result: &BenchmarkResult) {
    match &result.error {
        Some(error) => {
            tracing::warn!(codec = %result.name, error = %error, "codec run failed");
        }
        None => {
            tracing::info!(
                codec = %result.name,
                len = result.encoded_len,
                encode = ?result.encode_time,
                decode = ?result.decode_time,
                verdict = ?result.verification,
                "codec run"
            );
        }
    }
}
