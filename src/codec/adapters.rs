//! Backend adapters for the codec contract
//!
//! Each adapter wraps one serialization crate behind the [`Codec`]
//! trait. Encoding always writes into the caller's pre-sized scratch
//! buffer, so the size estimate and buffer-reuse knobs take effect on
//! every transport. Decoding branches on the profile's transport mode:
//! the buffered path uses the crate's byte-slice API, the streaming path
//! its `std::io::Read` API. The wire formats themselves are opaque to
//! the harness.

use super::{Capabilities, Codec, CodecRegistry};
use crate::error::{CodecError, CodecResult};
use crate::sweep::{Profile, Transport};
use serde::de::DeserializeOwned;
use serde::Serialize;

fn encode_failed(codec: &str, reason: impl ToString) -> CodecError {
    CodecError::EncodeFailed {
        codec: codec.to_string(),
        reason: reason.to_string(),
    }
}

fn decode_failed(codec: &str, reason: impl ToString) -> CodecError {
    CodecError::DecodeFailed {
        codec: codec.to_string(),
        reason: reason.to_string(),
    }
}

/// JSON text format via `serde_json`
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCodec;

impl JsonCodec {
    const NAME: &'static str = "json";
}

impl<T> Codec<T> for JsonCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T, mut scratch: Vec<u8>, _profile: &Profile) -> CodecResult<Vec<u8>> {
        scratch.clear();
        serde_json::to_writer(&mut scratch, value).map_err(|e| encode_failed(Self::NAME, e))?;
        Ok(scratch)
    }

    fn decode(&self, bytes: &[u8], target: &mut T, profile: &Profile) -> CodecResult<()> {
        *target = match profile.transport {
            Transport::Buffered => {
                serde_json::from_slice(bytes).map_err(|e| decode_failed(Self::NAME, e))?
            }
            Transport::Streaming => {
                serde_json::from_reader(bytes).map_err(|e| decode_failed(Self::NAME, e))?
            }
        };
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}

/// Compact binary format via `bincode`
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeCodec;

impl BincodeCodec {
    const NAME: &'static str = "bincode";
}

impl<T> Codec<T> for BincodeCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T, mut scratch: Vec<u8>, _profile: &Profile) -> CodecResult<Vec<u8>> {
        let config = bincode::config::standard();
        scratch.clear();
        bincode::serde::encode_into_std_write(value, &mut scratch, config)
            .map_err(|e| encode_failed(Self::NAME, e))?;
        Ok(scratch)
    }

    fn decode(&self, bytes: &[u8], target: &mut T, profile: &Profile) -> CodecResult<()> {
        let config = bincode::config::standard();
        *target = match profile.transport {
            Transport::Buffered => {
                let (value, _read) = bincode::serde::decode_from_slice(bytes, config)
                    .map_err(|e| decode_failed(Self::NAME, e))?;
                value
            }
            Transport::Streaming => {
                let mut reader = bytes;
                bincode::serde::decode_from_std_read(&mut reader, config)
                    .map_err(|e| decode_failed(Self::NAME, e))?
            }
        };
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}

/// MessagePack binary format via `rmp-serde`
#[derive(Debug, Default, Clone, Copy)]
pub struct MsgpackCodec;

impl MsgpackCodec {
    const NAME: &'static str = "msgpack";
}

impl<T> Codec<T> for MsgpackCodec
where
    T: Serialize + DeserializeOwned,
{
    fn encode(&self, value: &T, mut scratch: Vec<u8>, _profile: &Profile) -> CodecResult<Vec<u8>> {
        scratch.clear();
        rmp_serde::encode::write(&mut scratch, value).map_err(|e| encode_failed(Self::NAME, e))?;
        Ok(scratch)
    }

    fn decode(&self, bytes: &[u8], target: &mut T, profile: &Profile) -> CodecResult<()> {
        *target = match profile.transport {
            Transport::Buffered => {
                rmp_serde::from_slice(bytes).map_err(|e| decode_failed(Self::NAME, e))?
            }
            Transport::Streaming => {
                rmp_serde::decode::from_read(bytes).map_err(|e| decode_failed(Self::NAME, e))?
            }
        };
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::full()
    }
}

/// Registry holding the default backend set, in the order results are
/// conventionally compared: binary formats first, then text.
pub fn standard_registry<T>() -> CodecRegistry<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    let mut registry = CodecRegistry::new();
    // registration against an empty required set cannot fail
    registry
        .register("msgpack", MsgpackCodec)
        .expect("msgpack registration");
    registry
        .register("bincode", BincodeCodec)
        .expect("bincode registration");
    registry
        .register("json", JsonCodec)
        .expect("json registration");
    registry
}
