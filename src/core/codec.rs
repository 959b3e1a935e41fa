//! VG-020: State codec — lossless bytes ⇄ `SentinelState`.
//!
//! The encoding is a JSON document with a `schema` version and the full
//! state. Decoding is strict: unknown fields, missing fields, truncated input,
//! and unknown schema versions are all rejected as corrupt state.
//! Paths inside the state go through [`super::pathenc`].

use super::error::{Result, VigilError};
use super::types::SentinelState;
use serde::{Deserialize, Serialize};

/// Current encoding version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    schema: u32,
    state: &'a SentinelState,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[allow(dead_code)]
    schema: u32,
    state: SentinelState,
}

#[derive(Deserialize)]
struct SchemaProbe {
    schema: u32,
}

/// Serialize the complete state.
pub fn encode(state: &SentinelState) -> Result<Vec<u8>> {
    serde_json::to_vec(&EnvelopeRef {
        schema: SCHEMA_VERSION,
        state,
    })
    .map_err(|e| VigilError::Encode(format!("state: {}", e)))
}

/// Parse bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<SentinelState> {
    let probe: SchemaProbe = serde_json::from_slice(bytes)
        .map_err(|e| VigilError::CorruptState(format!("unreadable state: {}", e)))?;
    if probe.schema != SCHEMA_VERSION {
        return Err(VigilError::CorruptState(format!(
            "unsupported state schema {} (expected {})",
            probe.schema, SCHEMA_VERSION
        )));
    }
    let envelope: Envelope = serde_json::from_slice(bytes)
        .map_err(|e| VigilError::CorruptState(format!("invalid state: {}", e)))?;
    Ok(envelope.state)
}
