//! VG-021: Byte-exact path encoding for the state codec.
//!
//! File names are arbitrary OS byte strings, not necessarily UTF-8. Every
//! persisted path is therefore stored as base64 of its raw bytes so a state
//! holding any name the scanner can reach survives encode/decode unchanged.
//! Used through `#[serde(with = ...)]` on the state types.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

#[cfg(unix)]
fn path_bytes(path: &Path) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Option<&[u8]> {
    path.to_str().map(str::as_bytes)
}

#[cfg(unix)]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    use std::os::unix::ffi::OsStringExt;
    Some(PathBuf::from(std::ffi::OsString::from_vec(bytes)))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: Vec<u8>) -> Option<PathBuf> {
    String::from_utf8(bytes).ok().map(PathBuf::from)
}

/// Base64 of the path's OS bytes. `None` only where the platform cannot
/// expose a path as bytes.
pub fn encode_path(path: &Path) -> Option<String> {
    path_bytes(path).map(|b| STANDARD.encode(b))
}

pub fn decode_path(encoded: &str) -> Option<PathBuf> {
    STANDARD.decode(encoded).ok().and_then(path_from_bytes)
}

fn encode_or_err<E: serde::ser::Error>(path: &Path) -> Result<String, E> {
    encode_path(path)
        .ok_or_else(|| E::custom(format!("path {} is not representable", path.display())))
}

fn decode_or_err<E: serde::de::Error>(encoded: &str) -> Result<PathBuf, E> {
    decode_path(encoded).ok_or_else(|| E::custom(format!("invalid encoded path '{}'", encoded)))
}

pub fn serialize<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    encode_or_err::<S::Error>(path)?.serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PathBuf, D::Error> {
    decode_or_err(&String::deserialize(deserializer)?)
}

/// `Vec<PathBuf>` adapter.
pub mod list {
    use super::*;

    pub fn serialize<S: Serializer>(paths: &[PathBuf], serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = paths
            .iter()
            .map(|p| encode_or_err::<S::Error>(p))
            .collect::<Result<Vec<_>, _>>()?;
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<PathBuf>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .iter()
            .map(|e| decode_or_err(e))
            .collect()
    }
}

/// `IndexMap<PathBuf, V>` adapter; keys are encoded, order is kept.
pub mod keys {
    use super::*;

    pub fn serialize<S, V>(map: &IndexMap<PathBuf, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        let encoded = map
            .iter()
            .map(|(k, v)| Ok((encode_or_err::<S::Error>(k)?, v)))
            .collect::<Result<IndexMap<_, _>, S::Error>>()?;
        encoded.serialize(serializer)
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<IndexMap<PathBuf, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        IndexMap::<String, V>::deserialize(deserializer)?
            .into_iter()
            .map(|(k, v)| Ok((decode_or_err::<D::Error>(&k)?, v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_vg021_utf8_path() {
        let p = Path::new("/etc/hosts");
        let enc = encode_path(p).unwrap();
        assert_eq!(enc, "L2V0Yy9ob3N0cw==");
        assert_eq!(decode_path(&enc).unwrap(), p);
    }

    #[test]
    fn test_vg021_invalid_base64_rejected() {
        assert!(decode_path("not base64!").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_vg021_non_utf8_path_is_exact() {
        use std::os::unix::ffi::OsStrExt;
        let p = Path::new(std::ffi::OsStr::from_bytes(b"/data/bad\xffname"));
        let back = decode_path(&encode_path(p).unwrap()).unwrap();
        assert_eq!(back.as_os_str().as_bytes(), b"/data/bad\xffname");
    }

    proptest! {
        #[cfg(unix)]
        #[test]
        fn prop_vg021_any_bytes_survive(bytes in prop::collection::vec(any::<u8>(), 0..40)) {
            use std::os::unix::ffi::{OsStrExt, OsStringExt};
            let p = PathBuf::from(std::ffi::OsString::from_vec(bytes.clone()));
            let back = decode_path(&encode_path(&p).unwrap()).unwrap();
            prop_assert_eq!(back.as_os_str().as_bytes(), &bytes[..]);
        }
    }
}
