//! Passphrase acquisition: `VIGIL_PASSPHRASE` for unattended runs, otherwise a
//! hidden prompt on the terminal.

use crate::core::error::{Result, VigilError};
use dialoguer::console::Term;
use dialoguer::Password;
use std::ffi::OsString;
use std::path::Path;
use zeroize::Zeroizing;

/// Environment variable consulted before prompting.
pub const PASSPHRASE_ENV: &str = "VIGIL_PASSPHRASE";

fn from_env_value(value: Option<OsString>) -> Result<Option<Zeroizing<String>>> {
    match value {
        None => Ok(None),
        Some(v) => {
            let s = v.into_string().map_err(|_| {
                VigilError::Passphrase(format!("{} is not valid UTF-8", PASSPHRASE_ENV))
            })?;
            if s.is_empty() {
                return Err(VigilError::Passphrase(format!("{} is empty", PASSPHRASE_ENV)));
            }
            Ok(Some(Zeroizing::new(s)))
        }
    }
}

fn prompt(text: &str) -> Result<Zeroizing<String>> {
    Password::new()
        .with_prompt(text)
        .interact_on(&Term::stderr())
        .map(Zeroizing::new)
        .map_err(|e| VigilError::Passphrase(e.to_string()))
}

fn confirm(first: Zeroizing<String>, second: Zeroizing<String>) -> Result<Zeroizing<String>> {
    if *first != *second {
        return Err(VigilError::Passphrase("passphrases do not match".to_string()));
    }
    Ok(first)
}

/// Passphrase for a new state file. Interactive entry must be typed twice.
pub fn read_new_passphrase() -> Result<Zeroizing<String>> {
    if let Some(p) = from_env_value(std::env::var_os(PASSPHRASE_ENV))? {
        return Ok(p);
    }
    let first = prompt("Encryption passphrase")?;
    let second = prompt("Again, please")?;
    confirm(first, second)
}

/// Passphrase for an existing state file.
pub fn read_passphrase(db: &Path) -> Result<Zeroizing<String>> {
    if let Some(p) = from_env_value(std::env::var_os(PASSPHRASE_ENV))? {
        return Ok(p);
    }
    prompt(&format!("Passphrase for {}", db.display()))
}
