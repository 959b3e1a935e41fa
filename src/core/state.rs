//! VG-040: State file management — seal + save (atomic), load + open.

use super::codec;
use super::error::{Result, VigilError};
use super::types::SentinelState;
use crate::crypto::{container, cryptobox};
use std::io::Write;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Sibling path used while a save is in flight.
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "vigil.db".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Encode, seal, and write `state` to `path`. A fresh salt and nonce are used
/// on every call. The previous file is only replaced once the new one is
/// fully on disk.
pub fn save(state: &SentinelState, path: &Path, passphrase: &str) -> Result<()> {
    let plaintext = Zeroizing::new(codec::encode(state)?);
    let sealed = cryptobox::seal(&plaintext, passphrase)?;
    let bytes = container::to_bytes(&sealed)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| VigilError::io(parent, e))?;
    }

    // Atomic write: temp file + fsync + rename
    let tmp_path = temp_path(path);
    if let Err(e) = write_synced(&tmp_path, &bytes) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    std::fs::rename(&tmp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp_path);
        VigilError::io(path, e)
    })?;

    log::info!(
        "saved state to {} ({} known objects, {} scan records)",
        path.display(),
        state.known_objects().len(),
        state.history().len()
    );
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path).map_err(|e| VigilError::io(path, e))?;
    file.write_all(bytes).map_err(|e| VigilError::io(path, e))?;
    file.sync_all().map_err(|e| VigilError::io(path, e))
}

/// Read, authenticate, decrypt, and decode the state stored at `path`.
pub fn load(path: &Path, passphrase: &str) -> Result<SentinelState> {
    let bytes = std::fs::read(path).map_err(|e| VigilError::io(path, e))?;
    let sealed = container::from_bytes(&bytes)?;
    let plaintext = cryptobox::open(&sealed, passphrase)?;
    let state = codec::decode(&plaintext)?;
    log::debug!(
        "loaded state from {} ({} scan records)",
        path.display(),
        state.history().len()
    );
    Ok(state)
}
