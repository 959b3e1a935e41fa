//! Vigil — portable file integrity monitoring.
//!
//! Digests a fixed watch set of files and directories, classifies what changed
//! since the last run, and keeps the whole history in a single scrypt +
//! XSalsa20-Poly1305 sealed file that is useless without the passphrase.

pub mod cli;
pub mod core;
pub mod crypto;
pub mod tripwire;

pub use crate::core::error::{Result, VigilError};
pub use crate::core::types::{
    DigestAlgorithm, Event, EventKind, ScanRecord, SentinelState, VigilConfig,
};
