//! Bit-exact reproductions of the legacy password hash formats found in
//! breach corpora.
//!
//! This crate is the pure computation half of the breach-checking client:
//! given a password, a per-account salt, and a wire algorithm code, it
//! reproduces the hash a breached site would have stored, so the value can
//! be compared for equality against corpus entries. It makes no claim about
//! the cryptographic strength of any reproduced scheme - reproduction for
//! comparison is the whole job.
//!
//! The [`kdf`] module holds the Argon2 codec used to anonymize legacy
//! hashes before any part of them crosses the network.

pub mod algorithm;
pub mod crypt;
pub mod digests;
pub mod engine;
pub mod kdf;
pub mod mysql;
pub mod phpass;

pub use algorithm::PasswordAlgorithm;
pub use engine::compute;
