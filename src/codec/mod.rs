//! Codec strategy contract and registry
//!
//! A codec is a named pair of encode/decode strategies behind the
//! [`Codec`] trait. The registry treats every backend as opaque: it only
//! requires the two-operation contract plus a declared capability set,
//! which is checked once at registration time instead of being discovered
//! through a failed downcast at call time.

pub mod adapters;

pub use adapters::{standard_registry, BincodeCodec, JsonCodec, MsgpackCodec};

use crate::error::{CodecError, CodecResult};
use crate::sweep::Profile;

/// Capability set a codec declares at registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the codec can drive a streaming (reader/writer) transport
    pub streaming: bool,
}

impl Capabilities {
    /// Capabilities of a codec that only supports the in-memory buffer transport
    pub fn buffered_only() -> Self {
        Self { streaming: false }
    }

    /// Capabilities of a codec supporting every transport mode
    pub fn full() -> Self {
        Self { streaming: true }
    }

    /// Name of the first capability in `required` that `self` lacks
    pub fn missing_from(&self, required: &Capabilities) -> Option<&'static str> {
        if required.streaming && !self.streaming {
            return Some("streaming");
        }
        None
    }
}

/// An interchangeable encode/decode strategy over values of type `T`.
///
/// Implementations may branch on the active [`Profile`], for example to
/// choose streaming vs. in-memory transport; that is the strategy's
/// own responsibility, not the registry's. Strategies must never mutate
/// the encoded value: it is shared read-only across every codec in a
/// sweep point.
pub trait Codec<T>: Send + Sync {
    /// Encode `value`, reusing `scratch` as working storage if the
    /// backend supports it, and return the encoded bytes.
    fn encode(&self, value: &T, scratch: Vec<u8>, profile: &Profile) -> CodecResult<Vec<u8>>;

    /// Decode `bytes` into `target`.
    fn decode(&self, bytes: &[u8], target: &mut T, profile: &Profile) -> CodecResult<()>;

    /// The capability set this codec supports. Defaults to buffered-only.
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }
}

/// One registered name/strategy pair.
pub struct RegisteredCodec<T> {
    name: String,
    codec: Box<dyn Codec<T>>,
}

impl<T> RegisteredCodec<T> {
    /// The name this codec was registered under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The strategy itself
    pub fn codec(&self) -> &dyn Codec<T> {
        self.codec.as_ref()
    }
}

/// Append-only, ordered collection of named codec strategies.
///
/// Duplicate names are permitted: a later registration never replaces an
/// earlier one, all entries run. Iteration follows registration order.
pub struct CodecRegistry<T> {
    required: Capabilities,
    entries: Vec<RegisteredCodec<T>>,
}

impl<T> CodecRegistry<T> {
    /// Create an empty registry with no required capabilities
    pub fn new() -> Self {
        Self::requiring(Capabilities::default())
    }

    /// Create an empty registry whose codecs must all support `required`
    pub fn requiring(required: Capabilities) -> Self {
        Self {
            required,
            entries: Vec::new(),
        }
    }

    /// Append a named codec.
    ///
    /// Fails with [`CodecError::UnsupportedCapability`] when the codec
    /// lacks a capability this registry requires; nothing is appended in
    /// that case.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        codec: impl Codec<T> + 'static,
    ) -> CodecResult<()> {
        let name = name.into();
        if let Some(capability) = codec.capabilities().missing_from(&self.required) {
            return Err(CodecError::UnsupportedCapability {
                codec: name,
                capability: capability.to_string(),
            });
        }
        self.entries.push(RegisteredCodec {
            name,
            codec: Box::new(codec),
        });
        Ok(())
    }

    /// Registered codecs in registration order
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredCodec<T>> {
        self.entries.iter()
    }

    /// Number of registered codecs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for CodecRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Passthrough;

    impl Codec<Vec<u8>> for Passthrough {
        fn encode(
            &self,
            value: &Vec<u8>,
            mut scratch: Vec<u8>,
            _profile: &Profile,
        ) -> CodecResult<Vec<u8>> {
            scratch.clear();
            scratch.extend_from_slice(value);
            Ok(scratch)
        }

        fn decode(
            &self,
            bytes: &[u8],
            target: &mut Vec<u8>,
            _profile: &Profile,
        ) -> CodecResult<()> {
            *target = bytes.to_vec();
            Ok(())
        }
    }

    #[test]
    fn test_registration_preserves_order_and_duplicates() {
        let mut registry = CodecRegistry::new();
        registry.register("first", Passthrough).unwrap();
        registry.register("dup", Passthrough).unwrap();
        registry.register("dup", Passthrough).unwrap();
        assert_eq!(registry.len(), 3);
        let names: Vec<&str> = registry.iter().map(RegisteredCodec::name).collect();
        assert_eq!(names, ["first", "dup", "dup"]);
    }

    #[test]
    fn test_capability_mismatch_rejected_at_registration() {
        let mut registry: CodecRegistry<Vec<u8>> =
            CodecRegistry::requiring(Capabilities::full());
        let err = registry.register("buffered", Passthrough).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedCapability {
                codec: "buffered".to_string(),
                capability: "streaming".to_string(),
            }
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_passthrough_contract() {
        let profile = Profile::baseline();
        let codec = Passthrough;
        let value = vec![1u8, 2, 3];
        let encoded = codec.encode(&value, Vec::new(), &profile).unwrap();
        let mut target = Vec::new();
        codec.decode(&encoded, &mut target, &profile).unwrap();
        assert_eq!(target, value);
    }
}
