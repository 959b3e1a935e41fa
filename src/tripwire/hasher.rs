//! VG-010: Streaming content digests (SHA-256 or BLAKE3) for watched files.

use crate::core::error::{Result, VigilError};
use crate::core::types::DigestAlgorithm;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

const STREAM_BUF_SIZE: usize = 65536;

enum StreamHasher {
    Sha256(Sha256),
    Blake3(Box<blake3::Hasher>),
}

impl StreamHasher {
    fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha256 => StreamHasher::Sha256(Sha256::new()),
            DigestAlgorithm::Blake3 => StreamHasher::Blake3(Box::new(blake3::Hasher::new())),
        }
    }

    fn update(&mut self, data: &[u8]) {
        match self {
            StreamHasher::Sha256(h) => h.update(data),
            StreamHasher::Blake3(h) => {
                h.update(data);
            }
        }
    }

    fn finalize_hex(self) -> String {
        match self {
            StreamHasher::Sha256(h) => hex::encode(h.finalize()),
            StreamHasher::Blake3(h) => h.finalize().to_hex().to_string(),
        }
    }
}

/// Stream everything from `reader` through the hash. Returns lower-case hex.
pub fn hash_reader<R: Read>(mut reader: R, algorithm: DigestAlgorithm) -> std::io::Result<String> {
    let mut hasher = StreamHasher::new(algorithm);
    let mut buf = [0u8; STREAM_BUF_SIZE];
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize_hex())
}

/// Hash a file's contents without loading it into memory.
pub fn hash_file(path: &Path, algorithm: DigestAlgorithm) -> Result<String> {
    let file = std::fs::File::open(path).map_err(|e| VigilError::read(path, e))?;
    hash_reader(file, algorithm).map_err(|e| VigilError::read(path, e))
}

/// Hash an in-memory buffer.
pub fn hash_bytes(data: &[u8], algorithm: DigestAlgorithm) -> String {
    let mut hasher = StreamHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vg010_sha256_known_vector() {
        assert_eq!(
            hash_bytes(b"abc", DigestAlgorithm::Sha256),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_vg010_blake3_matches_reference() {
        let expected = blake3::hash(b"hello world").to_hex().to_string();
        assert_eq!(hash_bytes(b"hello world", DigestAlgorithm::Blake3), expected);
    }

    #[test]
    fn test_vg010_hash_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.txt");
        std::fs::write(&path, "hello world").unwrap();
        let h = hash_file(&path, DigestAlgorithm::Sha256).unwrap();
        assert_eq!(h.len(), 64);
        assert!(h.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(h, hash_bytes(b"hello world", DigestAlgorithm::Sha256));
    }

    #[test]
    fn test_vg010_hash_file_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("det.txt");
        std::fs::write(&path, "deterministic").unwrap();
        let h1 = hash_file(&path, DigestAlgorithm::Blake3).unwrap();
        let h2 = hash_file(&path, DigestAlgorithm::Blake3).unwrap();
        assert_eq!(h1, h2);
    }

    #[test]
    fn test_vg010_hash_file_larger_than_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let data: Vec<u8> = (0..STREAM_BUF_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &data).unwrap();
        for algo in [DigestAlgorithm::Sha256, DigestAlgorithm::Blake3] {
            assert_eq!(hash_file(&path, algo).unwrap(), hash_bytes(&data, algo));
        }
    }

    #[test]
    fn test_vg010_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(
            hash_file(&path, DigestAlgorithm::Sha256).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_vg010_hash_file_not_found() {
        let result = hash_file(Path::new("/nonexistent/file.txt"), DigestAlgorithm::Sha256);
        assert!(matches!(result, Err(VigilError::Read { .. })));
    }

    #[test]
    fn test_vg010_mid_stream_failure_returns_no_digest() {
        struct Flaky(usize);
        impl Read for Flaky {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                if self.0 == 0 {
                    return Err(std::io::Error::other("disk fell off"));
                }
                self.0 -= 1;
                buf[0] = 7;
                Ok(1)
            }
        }
        assert!(hash_reader(Flaky(3), DigestAlgorithm::Sha256).is_err());
    }

    #[test]
    fn test_vg010_algorithms_differ() {
        assert_ne!(
            hash_bytes(b"x", DigestAlgorithm::Sha256),
            hash_bytes(b"x", DigestAlgorithm::Blake3)
        );
    }
}
