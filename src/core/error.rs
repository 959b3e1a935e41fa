//! VG-003: Error taxonomy shared by the scanner, codec, crypto box, and store.

use std::path::PathBuf;

/// Every failure vigil can surface to a caller.
#[derive(Debug, thiserror::Error)]
pub enum VigilError {
    /// A watched file could not be opened or read during a scan.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A state or container could not be serialized for sealing.
    #[error("cannot encode {0}")]
    Encode(String),

    /// Decrypted bytes do not parse as a sentinel state.
    #[error("corrupt state: {0}")]
    CorruptState(String),

    /// Authenticated decryption failed. Wrong passphrase and tampering are
    /// indistinguishable here.
    #[error("authentication failed: wrong passphrase or damaged state file")]
    Authentication,

    /// Storage failure while saving or loading the state file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("passphrase error: {0}")]
    Passphrase(String),

    /// Randomness, key derivation, or cipher setup failed while sealing.
    #[error("crypto failure: {0}")]
    Crypto(String),
}

impl VigilError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VigilError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VigilError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VigilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vg003_read_error_names_path() {
        let err = VigilError::read(
            "/etc/passwd",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/etc/passwd"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_vg003_authentication_message_is_generic() {
        let msg = VigilError::Authentication.to_string();
        assert!(msg.contains("wrong passphrase or damaged"));
    }

    #[test]
    fn test_vg003_encode_is_not_corruption() {
        let msg = VigilError::Encode("state: boom".into()).to_string();
        assert_eq!(msg, "cannot encode state: boom");
        assert!(!msg.contains("corrupt"));
    }

    #[test]
    fn test_vg003_io_error_has_source() {
        use std::error::Error;
        let err = VigilError::io(
            "/state/vigil.db",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.source().is_some());
    }
}
