//! Privacy-preserving breach checking against a compromised-credentials
//! database.
//!
//! Checks never put plaintext or full hash values on the wire. A
//! credentials check fetches the account's required hash specs, reproduces
//! each legacy hash locally with [`breachcheck_hashes`], anonymizes them
//! through Argon2 keyed by an account-wide salt, and submits only the
//! leading 10 hex characters of each result. The server answers with a
//! small candidate set of full hashes and the final exact comparison
//! happens locally - a k-anonymity-style exchange.
//!
//! ```no_run
//! use breachcheck_client::Client;
//!
//! let client = Client::new("api-key", "secret", "https://api.example.com/v1")?;
//! if client.check_credentials("jdoe@example.com", "hunter2")? {
//!     // force a password reset
//! }
//! # Ok::<(), breachcheck_client::Error>(())
//! ```

pub mod client;
mod credentials;
pub mod error;
pub mod types;

pub use breachcheck_hashes::PasswordAlgorithm;
pub use client::Client;
pub use error::Error;
pub use types::{
    AccountRecord, ExposureDetails, ExposuresRecord, PasswordCandidate,
    PasswordHashSpecification, PasswordStatus,
};
