//! Sealing of the persisted state: scrypt key derivation, XSalsa20-Poly1305,
//! and the on-disk container layout.

pub mod container;
pub mod cryptobox;
