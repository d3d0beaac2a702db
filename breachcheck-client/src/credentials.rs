//! Turns an account's required hash specs into anonymized credential
//! hashes and the prefixes that may cross the network.

use breachcheck_hashes::{PasswordAlgorithm, compute, kdf};
use tracing::{debug, warn};

use crate::types::PasswordHashSpecification;

/// Only the first this-many specs of an account are ever processed.
pub(crate) const MAX_HASH_SPECS: usize = 50;

/// Ceiling on BCrypt computations per check. Some long-breached accounts
/// have accumulated dozens of BCrypt specs, and computing them all would
/// make a single check pathologically slow; anything past the cap is
/// skipped. Backpressure, not correctness.
pub(crate) const MAX_BCRYPT_COMPUTATIONS: usize = 2;

/// How many leading hex characters of a hash are revealed to the server.
/// Ten characters are nowhere near enough to reconstruct the full hash,
/// which is what makes the prefix exchange k-anonymous.
pub(crate) const PREFIX_LEN: usize = 10;

/// A fully derived credential hash and the prefix submitted for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CredentialHash {
    pub full: String,
    pub prefix: String,
}

/// Computes the credential hashes for one check call.
///
/// Deterministic over its inputs: specs are processed in order, excluded
/// algorithms and everything past the BCrypt cap are skipped, and specs the
/// engine cannot compute contribute nothing. The output is never the legacy
/// hash itself - every entry has been through the Argon2 anonymization
/// step keyed by the account salt.
pub(crate) fn compute_credential_hashes(
    username: &str,
    password: &str,
    account_salt: &str,
    specs: &[PasswordHashSpecification],
    excluded: &[PasswordAlgorithm],
) -> Vec<CredentialHash> {
    let mut hashes = Vec::new();
    let mut bcrypt_computations = 0usize;

    for spec in specs.iter().take(MAX_HASH_SPECS) {
        if excluded.contains(&spec.hash_type) {
            continue;
        }

        if spec.hash_type == PasswordAlgorithm::BCrypt {
            if bcrypt_computations >= MAX_BCRYPT_COMPUTATIONS {
                debug!("BCrypt cap reached; skipping further BCrypt specs");
                continue;
            }
            bcrypt_computations += 1;
        }

        let Some(legacy_hash) = compute(password, &spec.salt, spec.hash_type) else {
            continue;
        };

        match credential_hash(username, &legacy_hash, account_salt) {
            Some(full) => {
                let prefix = full[..full.len().min(PREFIX_LEN)].to_string();
                hashes.push(CredentialHash { full, prefix });
            }
            None => {
                warn!(algorithm = ?spec.hash_type, "credential hash derivation failed; spec skipped");
            }
        }
    }

    hashes
}

/// Anonymizes one legacy hash: Argon2 over `username + "$" + legacy_hash`
/// keyed by the account salt, then the raw derived bytes hex-encoded.
fn credential_hash(username: &str, legacy_hash: &str, account_salt: &str) -> Option<String> {
    let encoded = kdf::derive(&format!("{username}${legacy_hash}"), account_salt).ok()?;
    kdf::raw_hash_hex(&encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACCOUNT_SALT: &str = "accountsaltvalue";

    fn spec(hash_type: PasswordAlgorithm, salt: &str) -> PasswordHashSpecification {
        PasswordHashSpecification { hash_type, salt: salt.to_string() }
    }

    // Cost-4 salts keep the BCrypt specs cheap enough for unit tests.
    const BCRYPT_SALTS: [&str; 3] = [
        "$2a$04$2bULeXwv2H34SXkT1giCZe",
        "$2a$04$Yjk3YjIzYWIxNDg0YWMzZO",
        "$2a$04$abcdefghijklmnopqrstuu",
    ];

    #[test]
    fn bcrypt_cap_limits_computations_but_not_other_specs() {
        let specs = vec![
            spec(PasswordAlgorithm::BCrypt, BCRYPT_SALTS[0]),
            spec(PasswordAlgorithm::BCrypt, BCRYPT_SALTS[1]),
            spec(PasswordAlgorithm::BCrypt, BCRYPT_SALTS[2]),
            spec(PasswordAlgorithm::Md5, ""),
        ];

        let hashes = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);

        // Two of the three BCrypt specs plus the MD5 spec.
        assert_eq!(hashes.len(), 3);

        let md5_hash =
            credential_hash("user", "e10adc3949ba59abbe56e057f20f883e", ACCOUNT_SALT).unwrap();
        assert!(hashes.iter().any(|h| h.full == md5_hash));
    }

    #[test]
    fn excluded_algorithms_are_skipped() {
        let specs = vec![
            spec(PasswordAlgorithm::Md5, ""),
            spec(PasswordAlgorithm::Sha1, ""),
        ];

        let hashes = compute_credential_hashes(
            "user",
            "123456",
            ACCOUNT_SALT,
            &specs,
            &[PasswordAlgorithm::Md5],
        );

        assert_eq!(hashes.len(), 1);
        let sha1_hash =
            credential_hash("user", "7c4a8d09ca3762af61e59520943dc26494f8941b", ACCOUNT_SALT)
                .unwrap();
        assert_eq!(hashes[0].full, sha1_hash);
    }

    #[test]
    fn only_the_first_fifty_specs_are_processed() {
        let specs: Vec<_> = (0..55).map(|_| spec(PasswordAlgorithm::Md5, "")).collect();
        let hashes = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);
        assert_eq!(hashes.len(), MAX_HASH_SPECS);
    }

    #[test]
    fn unsupported_and_uncomputable_specs_contribute_nothing() {
        let specs = vec![
            spec(PasswordAlgorithm::Unknown, ""),
            spec(PasswordAlgorithm::SCrypt, "somesalt"),
            // Salted algorithm with the salt missing.
            spec(PasswordAlgorithm::PhpBb3, ""),
            spec(PasswordAlgorithm::Md5, ""),
        ];

        let hashes = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);
        assert_eq!(hashes.len(), 1);
    }

    #[test]
    fn credential_hash_is_not_the_legacy_hash() {
        let specs = vec![spec(PasswordAlgorithm::Md5, "")];
        let hashes = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);

        assert_eq!(hashes.len(), 1);
        assert_ne!(hashes[0].full, "e10adc3949ba59abbe56e057f20f883e");
        assert_eq!(hashes[0].prefix, hashes[0].full[..PREFIX_LEN]);
        // Default Argon2 output is 20 bytes, so 40 hex characters.
        assert_eq!(hashes[0].full.len(), 40);
    }

    #[test]
    fn dispatcher_is_deterministic() {
        let specs = vec![spec(PasswordAlgorithm::Md5, ""), spec(PasswordAlgorithm::Sha256, "")];
        let first = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);
        let second = compute_credential_hashes("user", "123456", ACCOUNT_SALT, &specs, &[]);
        assert_eq!(first, second);
    }
}
