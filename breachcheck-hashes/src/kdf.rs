//! Argon2 derivation driven by a self-describing salt string.
//!
//! Account salts arrive either as raw bytes or as a partial Argon2 encoding
//! (`$argon2{d|i}$v=19$m=..,t=..,p=..,l=..$<b64 salt>`) carrying the
//! derivation parameters to use. The output is always the full encoded form;
//! [`raw_hash_hex`] extracts the derived bytes for credential anonymization.

use argon2::{Algorithm, Argon2, Params, Version};
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const DEFAULT_ITERATIONS: u32 = 3;
const DEFAULT_MEMORY_KIB: u32 = 1024;
const DEFAULT_PARALLELISM: u32 = 2;
const DEFAULT_OUTPUT_LEN: usize = 20;

/// Standard-alphabet base64 without padding, decoding leniently the way the
/// Argon2 encoded form is written in the wild (salt fields may arrive with
/// or without padding).
const B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, thiserror::Error)]
#[error("argon2 derivation failed: {0}")]
pub struct DeriveError(String);

/// Derives an Argon2 hash of `input`, returning the encoded
/// `$argon2{d|i}$v=19$m=..,t=..,p=..$<b64 salt>$<b64 hash>` form.
///
/// A `salt_spec` that does not start with `$argon2` is treated as raw salt
/// bytes with the default parameters (Argon2d, t=3, m=1024, p=2, 20-byte
/// output). A `$argon2i` prefix selects Argon2i; any other `$argon2` prefix
/// stays Argon2d. When the spec splits into exactly five `$`-separated
/// components, the fourth carries comma-separated `t`/`m`/`p`/`l` overrides
/// and the fifth the base64 raw salt. A non-numeric override is ignored and
/// that one field keeps its default; a malformed parameter never aborts the
/// derivation.
pub fn derive(input: &str, salt_spec: &str) -> Result<String, DeriveError> {
    let mut algorithm = Algorithm::Argon2d;
    let mut iterations = DEFAULT_ITERATIONS;
    let mut memory = DEFAULT_MEMORY_KIB;
    let mut parallelism = DEFAULT_PARALLELISM;
    let mut output_len = DEFAULT_OUTPUT_LEN;
    let mut just_salt = salt_spec.as_bytes().to_vec();

    if salt_spec.starts_with("$argon2") {
        if salt_spec.starts_with("$argon2i") {
            algorithm = Algorithm::Argon2i;
        }

        let components: Vec<&str> = salt_spec.split('$').collect();
        if components.len() == 5 {
            just_salt = B64
                .decode(components[4])
                .map_err(|e| DeriveError(format!("undecodable salt field: {e}")))?;

            for parameter in components[3].split(',') {
                let Some((key, value)) = parameter.split_once('=') else {
                    continue;
                };
                match key {
                    "t" => {
                        if let Ok(v) = value.parse() {
                            iterations = v;
                        }
                    }
                    "m" => {
                        if let Ok(v) = value.parse() {
                            memory = v;
                        }
                    }
                    "p" => {
                        if let Ok(v) = value.parse() {
                            parallelism = v;
                        }
                    }
                    "l" => {
                        if let Ok(v) = value.parse() {
                            output_len = v;
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    let params = Params::new(memory, iterations, parallelism, Some(output_len))
        .map_err(|e| DeriveError(format!("invalid parameters: {e}")))?;
    let argon2 = Argon2::new(algorithm, Version::V0x13, params);

    let mut output = vec![0u8; output_len];
    argon2
        .hash_password_into(input.as_bytes(), &just_salt, &mut output)
        .map_err(|e| DeriveError(e.to_string()))?;

    let variant = match algorithm {
        Algorithm::Argon2i => "argon2i",
        _ => "argon2d",
    };
    Ok(format!(
        "${variant}$v=19$m={memory},t={iterations},p={parallelism}${}${}",
        B64.encode(&just_salt),
        B64.encode(&output)
    ))
}

/// Extracts the raw derived hash from an encoded Argon2 string: the base64
/// field after the final `$`, decoded and hex-encoded. This hex string -
/// never the full encoded form - is what the matching protocol transmits
/// prefixes of.
pub fn raw_hash_hex(encoded: &str) -> Option<String> {
    let tail = encoded.rsplit('$').next()?;
    let raw = B64.decode(tail).ok()?;
    Some(hex::encode(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_salt_uses_defaults() {
        assert_eq!(
            derive("123456", "saltysalt").unwrap(),
            "$argon2d$v=19$m=1024,t=3,p=2$c2FsdHlzYWx0$EklGIPtCSWb3IS+q4IQ7rwrwm2o"
        );
    }

    #[test]
    fn encoded_salt_reproduces_itself() {
        assert_eq!(
            derive("123456", "$argon2d$v=19$m=1024,t=3,p=2,l=20$c2FsdHlzYWx0").unwrap(),
            "$argon2d$v=19$m=1024,t=3,p=2$c2FsdHlzYWx0$EklGIPtCSWb3IS+q4IQ7rwrwm2o"
        );
    }

    #[test]
    fn argon2i_prefix_selects_variant() {
        assert_eq!(
            derive("password", "$argon2i$v=19$m=1024,t=2,p=2,l=20$c29tZXNhbHQ").unwrap(),
            "$argon2i$v=19$m=1024,t=2,p=2$c29tZXNhbHQ$bBKumUNszaveOgEhcaWl6r6Y91Y"
        );
    }

    #[test]
    fn explicit_parameters_are_honored() {
        assert_eq!(
            derive("password", "$argon2i$v=19$m=4096,t=2,p=4,l=32$c29tZXNhbHQ").unwrap(),
            "$argon2i$v=19$m=4096,t=2,p=4$c29tZXNhbHQ$M2X6yo+ZZ8ROwC7MB6/+1yMhGytTzDczBMgo3Is7ptY"
        );
        assert_eq!(
            derive("password", "$argon2i$v=19$m=4096,t=2,p=4,l=24$c29tZXNhbHQ").unwrap(),
            "$argon2i$v=19$m=4096,t=2,p=4$c29tZXNhbHQ$ZPidoNOWM3jRl0AD+3mGdZsq+GvHprGL"
        );
    }

    #[test]
    fn malformed_parameters_fall_back_per_field() {
        // m and t are unparseable and keep their defaults; the rest of the
        // derivation proceeds untouched.
        assert_eq!(
            derive("123456", "$argon2d$v=19$m=10d4,t=ejw,p=2$c2FsdHlzYWx0").unwrap(),
            "$argon2d$v=19$m=1024,t=3,p=2$c2FsdHlzYWx0$EklGIPtCSWb3IS+q4IQ7rwrwm2o"
        );
    }

    #[test]
    fn raw_hash_hex_takes_tail_after_last_dollar() {
        let encoded = "$argon2d$v=19$m=1024,t=3,p=2$c2FsdHlzYWx0$EklGIPtCSWb3IS+q4IQ7rwrwm2o";
        assert_eq!(
            raw_hash_hex(encoded).as_deref(),
            Some("12494620fb424966f7212faae0843baf0af09b6a")
        );
    }

    #[test]
    fn derive_is_deterministic() {
        let a = derive("password", "longersaltvalue").unwrap();
        let b = derive("password", "longersaltvalue").unwrap();
        assert_eq!(a, b);
    }
}
