//! Tripwire — streaming content digests and integrity scans.

pub mod hasher;
pub mod scanner;
