//! VG-030: Passphrase-sealed authenticated encryption.
//!
//! Keys come from scrypt (N=2^14, r=8, p=1) over the passphrase and a fresh
//! 24-byte salt; the payload is sealed with XSalsa20-Poly1305 under a fresh
//! 24-byte nonce. Salt and nonce are drawn independently from the OS CSPRNG on
//! every seal.

use crate::core::error::{Result, VigilError};
use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;
use rand::{rngs::OsRng, TryRngCore};
use zeroize::Zeroizing;

pub const NONCE_LEN: usize = 24;
pub const SALT_LEN: usize = 24;
pub const KEY_LEN: usize = 32;

const SCRYPT_LOG_N: u8 = 14;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Sealed payload: ciphertext (Poly1305 tag included) plus the public values
/// needed to open it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedContainer {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub salt: [u8; SALT_LEN],
}

/// Derive the 256-bit box key for `passphrase` and `salt`.
pub fn derive_key(passphrase: &str, salt: &[u8]) -> Result<Zeroizing<[u8; KEY_LEN]>> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|e| VigilError::Crypto(format!("invalid scrypt parameters: {}", e)))?;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    scrypt::scrypt(passphrase.as_bytes(), salt, &params, &mut key[..])
        .map_err(|e| VigilError::Crypto(format!("scrypt output length: {}", e)))?;
    Ok(key)
}

fn random_bytes<const N: usize>() -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| VigilError::Crypto(e.to_string()))?;
    Ok(buf)
}

fn cipher_for(key: &[u8; KEY_LEN]) -> XSalsa20Poly1305 {
    XSalsa20Poly1305::new(GenericArray::from_slice(key))
}

/// Encrypt `plaintext` under a key derived from `passphrase`.
pub fn seal(plaintext: &[u8], passphrase: &str) -> Result<EncryptedContainer> {
    let nonce = random_bytes::<NONCE_LEN>()?;
    let salt = random_bytes::<SALT_LEN>()?;
    let key = derive_key(passphrase, &salt)?;

    let ciphertext = cipher_for(&key)
        .encrypt(GenericArray::from_slice(&nonce), plaintext)
        .map_err(|_| VigilError::Crypto("encryption failed".to_string()))?;

    Ok(EncryptedContainer {
        ciphertext,
        nonce,
        salt,
    })
}

/// Authenticate and decrypt. Any mismatch is [`VigilError::Authentication`];
/// no plaintext is ever returned on failure.
pub fn open(container: &EncryptedContainer, passphrase: &str) -> Result<Zeroizing<Vec<u8>>> {
    let key = derive_key(passphrase, &container.salt)?;
    open_with_key(container, &key)
}

/// [`open`] with a key already derived from `container.salt`.
pub(crate) fn open_with_key(
    container: &EncryptedContainer,
    key: &[u8; KEY_LEN],
) -> Result<Zeroizing<Vec<u8>>> {
    cipher_for(key)
        .decrypt(
            GenericArray::from_slice(&container.nonce),
            container.ciphertext.as_slice(),
        )
        .map(Zeroizing::new)
        .map_err(|_| VigilError::Authentication)
}
