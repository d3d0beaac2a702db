//! BCrypt and the POSIX crypt(3) family.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use bcrypt::Version;

/// Decoder for the bcrypt base-64 variant used in `$2a$` salt strings.
const BCRYPT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::BCRYPT,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// BCrypt with the breach corpus' `$2y$` compatibility shim: a `$2y$` salt
/// is rewritten to `$2a$` before hashing and the prefix is restored on the
/// output, with the remainder untouched. The cost factor embedded in the
/// salt passes through unmodified. Malformed salts yield no hash.
pub fn bcrypt(password: &str, salt: &str) -> Option<String> {
    let y_version = salt.starts_with("$2y$");
    let checked_salt = if y_version {
        format!("$2a${}", &salt[4..])
    } else {
        salt.to_string()
    };

    let result = bcrypt_with_salt_string(password, &checked_salt)?;

    if y_version {
        Some(format!("$2y${}", &result[4..]))
    } else {
        Some(result)
    }
}

fn bcrypt_with_salt_string(password: &str, salt: &str) -> Option<String> {
    let parts: Vec<&str> = salt.split('$').collect();
    if parts.len() < 4 || !parts[0].is_empty() || parts[1] != "2a" {
        return None;
    }
    let cost: u32 = parts[2].parse().ok()?;
    // A full hash string is a valid salt: only the leading 22 characters
    // (16 raw bytes) are the salt.
    let salt_b64 = parts[3].get(..22)?;
    let raw_salt: [u8; 16] = BCRYPT_B64.decode(salt_b64).ok()?.try_into().ok()?;

    let hashed = bcrypt::hash_with_salt(password, cost, raw_salt).ok()?;
    Some(hashed.format_for_version(Version::TwoA))
}

/// Delegates to a crypt(3)-compatible routine, dispatching on the salt
/// prefix: traditional DES, `$1$` MD5-crypt, `$5$` SHA256-crypt and `$6$`
/// SHA512-crypt, including their optional `rounds=N` salt component.
pub fn unix_crypt(password: &str, salt: &str) -> Option<String> {
    pwhash::unix::crypt(password, salt).ok()
}
