//! The legacy hash computation engine.
//!
//! [`compute`] reproduces the output of each supported historical hashing
//! scheme bit-exactly so that a locally computed hash can be compared
//! against values recovered from breach corpora. Operand order within each
//! scheme is part of the contract and must never be "corrected".

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use hmac::{Hmac, Mac};
use md4::{Digest, Md4};
use sha1::Sha1;
use sha2::Sha256;

use crate::algorithm::PasswordAlgorithm;
use crate::crypt;
use crate::digests::{
    crc32_hex, md5_hex, sha1_hex, sha1_raw, sha256_hex, sha384_hex, sha512_hex, sha512_raw,
    utf16le_bytes, whirlpool_raw, xor,
};
use crate::mysql;
use crate::phpass;

/// Fixed HMAC-SHA256 key embedded in the CustomAlgorithm7 scheme. The key
/// is the ASCII text of this hex string, not its decoded bytes.
const CUSTOM7_HMAC_KEY: &[u8] =
    b"d2e1a4c569e7018cc142e9cce755a964bd9b193d2d31f02d80bb589c959afd7e";

/// Computes the legacy hash of `password` under `algorithm`.
///
/// Returns `None` when the algorithm requires a nonempty salt and none was
/// supplied, when the algorithm has no computation rule (retired or
/// server-side-only codes), or when a library-backed routine rejects a
/// malformed salt. An unsupported algorithm is a skip, never an error.
pub fn compute(password: &str, salt: &str, algorithm: PasswordAlgorithm) -> Option<String> {
    use crate::algorithm::PasswordAlgorithm as Alg;

    if algorithm.requires_salt() && salt.is_empty() {
        return None;
    }

    match algorithm {
        Alg::Plaintext => Some(password.to_string()),
        Alg::Md5 => Some(md5_hex(password.as_bytes())),
        Alg::Sha1 => Some(sha1_hex(password.as_bytes())),
        Alg::Sha256 => Some(sha256_hex(password.as_bytes())),
        Alg::Sha384 => Some(sha384_hex(password.as_bytes())),
        Alg::Sha512 => Some(sha512_hex(password.as_bytes())),
        Alg::Crc32 => Some(crc32_hex(password.as_bytes())),
        Alg::IpBoardMyBb => Some(my_bb(password, salt)),
        Alg::VBulletinPre3_8_5 | Alg::VBulletinPost3_8_5 => Some(v_bulletin(password, salt)),
        Alg::BCrypt => crypt::bcrypt(password, salt),
        Alg::PhpBb3 => phpass::phpbb3(password, salt),
        Alg::CustomAlgorithm1 => Some(custom_algorithm_1(password, salt)),
        Alg::CustomAlgorithm2 => Some(md5_hex(format!("{password}{salt}").as_bytes())),
        Alg::CustomAlgorithm4 => crypt::bcrypt(&md5_hex(password.as_bytes()), salt),
        Alg::CustomAlgorithm5 => {
            Some(sha256_hex(md5_hex(format!("{password}{salt}").as_bytes()).as_bytes()))
        }
        Alg::OsCommerceAef => Some(md5_hex(format!("{salt}{password}").as_bytes())),
        Alg::DesCrypt | Alg::Md5Crypt | Alg::Sha256Crypt | Alg::Sha512Crypt => {
            crypt::unix_crypt(password, salt)
        }
        Alg::MySqlPre4_1 => Some(mysql::pre4_1(password)),
        Alg::MySqlPost4_1 => Some(mysql::post4_1(password)),
        Alg::PeopleSoft => Some(BASE64_STANDARD.encode(sha1_raw(&utf16le_bytes(password)))),
        Alg::PunBb => Some(pun_bb(password, salt)),
        Alg::PartialMd5_20 => Some(md5_hex(password.as_bytes())[..20].to_string()),
        Alg::PartialMd5_29 => Some(md5_hex(password.as_bytes())[..29].to_string()),
        Alg::AveDataLifeDiferior => Some(md5_hex(md5_hex(password.as_bytes()).as_bytes())),
        Alg::DjangoMd5 => {
            Some(format!("md5${salt}${}", md5_hex(format!("{salt}{password}").as_bytes())))
        }
        Alg::DjangoSha1 => {
            Some(format!("sha1${salt}${}", sha1_hex(format!("{salt}{password}").as_bytes())))
        }
        Alg::PliggCms => {
            Some(format!("{salt}{}", sha1_hex(format!("{salt}{password}").as_bytes())))
        }
        Alg::RunCmsSmf1_1 => Some(sha1_hex(format!("{salt}{password}").as_bytes())),
        Alg::Ntlm => Some(hex::encode(Md4::digest(utf16le_bytes(password)))),
        Alg::Sha1Dash => Some(sha1_hex(format!("--{salt}--{password}--").as_bytes())),
        Alg::CustomAlgorithm7 => custom_algorithm_7(password, salt),
        Alg::CustomAlgorithm8 => Some(sha256_hex(format!("{salt}{password}").as_bytes())),
        Alg::CustomAlgorithm9 => Some(custom_algorithm_9(password, salt)),
        Alg::CustomAlgorithm10 => Some(sha512_hex(format!("{password}:{salt}").as_bytes())),
        Alg::AuthMeSha256 => Some(auth_me_sha256(password, salt)),
        Alg::HmacSha1SaltAsKey => hmac_sha1_salt_as_key(password, salt),
        // No computation rule: either never client-computable or retired.
        Alg::TripleDes
        | Alg::SCrypt
        | Alg::CustomAlgorithm6
        | Alg::Unknown
        | Alg::UnusablePassword
        | Alg::None => None,
    }
}

/// IPBoard/MyBB: `MD5(MD5(salt) + MD5(password))`, hashing the
/// concatenated hex strings.
fn my_bb(password: &str, salt: &str) -> String {
    let inner = format!("{}{}", md5_hex(salt.as_bytes()), md5_hex(password.as_bytes()));
    md5_hex(inner.as_bytes())
}

/// vBulletin (both eras): `MD5(MD5(password) + salt)`.
fn v_bulletin(password: &str, salt: &str) -> String {
    md5_hex(format!("{}{salt}", md5_hex(password.as_bytes())).as_bytes())
}

/// `XOR(SHA512(password+salt), Whirlpool(salt+password))`, hex-encoded.
fn custom_algorithm_1(password: &str, salt: &str) -> String {
    let sha = sha512_raw(format!("{password}{salt}").as_bytes());
    let whirl = whirlpool_raw(format!("{salt}{password}").as_bytes());
    hex::encode(xor(&sha, &whirl))
}

/// HMAC-SHA256 keyed with [`CUSTOM7_HMAC_KEY`] over `SHA1(salt) + password`.
fn custom_algorithm_7(password: &str, salt: &str) -> Option<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(CUSTOM7_HMAC_KEY).ok()?;
    mac.update(format!("{}{password}", sha1_hex(salt.as_bytes())).as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Twelve chained SHA512 applications starting from `SHA512(password+salt)`;
/// each subsequent round hashes the previous round's hex string.
fn custom_algorithm_9(password: &str, salt: &str) -> String {
    let mut result = sha512_hex(format!("{password}{salt}").as_bytes());
    for _ in 0..11 {
        result = sha512_hex(result.as_bytes());
    }
    result
}

/// PunBB: `SHA1(salt + SHA1(password))`.
fn pun_bb(password: &str, salt: &str) -> String {
    sha1_hex(format!("{salt}{}", sha1_hex(password.as_bytes())).as_bytes())
}

/// AuthMe: `$SHA$<salt>$SHA256(SHA256(password) + salt)`.
fn auth_me_sha256(password: &str, salt: &str) -> String {
    let inner = format!("{}{salt}", sha256_hex(password.as_bytes()));
    format!("$SHA${salt}${}", sha256_hex(inner.as_bytes()))
}

/// HMAC-SHA1 with the salt as the key and the password as the message.
fn hmac_sha1_salt_as_key(password: &str, salt: &str) -> Option<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(salt.as_bytes()).ok()?;
    mac.update(password.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}
