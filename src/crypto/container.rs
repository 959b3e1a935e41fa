//! VG-031: On-disk layout of a sealed container.
//!
//! A compact JSON object: `format`, then `ciphertext`, `nonce`, `salt`, each
//! binary field base64 encoded. Nonce and salt must decode to exactly 24
//! bytes.

use super::cryptobox::{EncryptedContainer, NONCE_LEN, SALT_LEN};
use crate::core::error::{Result, VigilError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContainerFile {
    format: u32,
    ciphertext: String,
    nonce: String,
    salt: String,
}

/// Serialize a container for storage.
pub fn to_bytes(container: &EncryptedContainer) -> Result<Vec<u8>> {
    let file = ContainerFile {
        format: FORMAT_VERSION,
        ciphertext: STANDARD.encode(&container.ciphertext),
        nonce: STANDARD.encode(container.nonce),
        salt: STANDARD.encode(container.salt),
    };
    serde_json::to_vec(&file).map_err(|e| VigilError::Encode(format!("container: {}", e)))
}

/// Parse stored bytes. A structurally damaged container cannot be told apart
/// from a tampered one, so every failure is [`VigilError::Authentication`].
pub fn from_bytes(bytes: &[u8]) -> Result<EncryptedContainer> {
    let file: ContainerFile =
        serde_json::from_slice(bytes).map_err(|_| VigilError::Authentication)?;
    if file.format != FORMAT_VERSION {
        return Err(VigilError::Authentication);
    }
    Ok(EncryptedContainer {
        ciphertext: decode_field(&file.ciphertext)?,
        nonce: decode_fixed::<NONCE_LEN>(&file.nonce)?,
        salt: decode_fixed::<SALT_LEN>(&file.salt)?,
    })
}

fn decode_field(s: &str) -> Result<Vec<u8>> {
    STANDARD.decode(s).map_err(|_| VigilError::Authentication)
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N]> {
    decode_field(s)?
        .try_into()
        .map_err(|_| VigilError::Authentication)
}
