//! Digest primitives shared by the legacy hash schemes.
//!
//! Everything here hashes raw bytes and returns either the raw digest or its
//! lowercase hex encoding. The compound schemes in [`crate::engine`] are
//! compositions of these.

use md5::{Digest, Md5};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use whirlpool::Whirlpool;

pub fn md5_raw(data: &[u8]) -> [u8; 16] {
    Md5::digest(data).into()
}

pub fn md5_hex(data: &[u8]) -> String {
    hex::encode(md5_raw(data))
}

pub fn sha1_raw(data: &[u8]) -> [u8; 20] {
    Sha1::digest(data).into()
}

pub fn sha1_hex(data: &[u8]) -> String {
    hex::encode(sha1_raw(data))
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

pub fn sha384_hex(data: &[u8]) -> String {
    hex::encode(Sha384::digest(data))
}

pub fn sha512_raw(data: &[u8]) -> [u8; 64] {
    Sha512::digest(data).into()
}

pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(sha512_raw(data))
}

pub fn whirlpool_raw(data: &[u8]) -> [u8; 64] {
    Whirlpool::digest(data).into()
}

/// Lowercase hex of the unsigned IEEE CRC32 checksum, with no leading-zero
/// padding beyond the natural hex width (`972d361`, not `0972d361`).
pub fn crc32_hex(data: &[u8]) -> String {
    format!("{:x}", crc32fast::hash(data))
}

/// Encodes a string as UTF-16LE bytes, the way Windows-era schemes (NTLM,
/// PeopleSoft) consume passwords.
pub fn utf16le_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

/// Byte-wise XOR of two equal-length digests.
pub fn xor(left: &[u8], right: &[u8]) -> Vec<u8> {
    left.iter().zip(right).map(|(a, b)| a ^ b).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn md5_reference_vector() {
        assert_eq!(md5_hex(b"123456"), "e10adc3949ba59abbe56e057f20f883e");
        assert_eq!(md5_raw(b"123456"), hex!("e10adc3949ba59abbe56e057f20f883e"));
    }

    #[test]
    fn sha1_reference_vector() {
        assert_eq!(sha1_hex(b"123456"), "7c4a8d09ca3762af61e59520943dc26494f8941b");
    }

    #[test]
    fn sha2_reference_vectors() {
        assert_eq!(
            sha256_hex(b"123456"),
            "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92"
        );
        assert_eq!(
            sha384_hex(b"123456"),
            "0a989ebc4a77b56a6e2bb7b19d995d185ce44090c13e2984b7ecc6d446d4b61ea9991b76a4c2f04b1b4d244841449454"
        );
        assert_eq!(
            sha512_hex(b"test"),
            "ee26b0dd4af7e749aa1a8ee3c10ae9923f618980772e473f8819a5d4940e0db27ac185f8a0e1d5f84f88bc887fd67b143732c304cc5fa9ad8e6f57f50028a8ff"
        );
    }

    #[test]
    fn whirlpool_reference_vector() {
        assert_eq!(
            hex::encode(whirlpool_raw(b"123456")),
            "fd9d94340dbd72c11b37ebb0d2a19b4d05e00fd78e4e2ce8923b9ea3a54e900df181cfb112a8a73228d1f3551680e2ad9701a4fcfb248fa7fa77b95180628bb2"
        );
    }

    #[test]
    fn crc32_drops_leading_zero() {
        assert_eq!(crc32_hex(b"123456"), "972d361");
    }

    #[test]
    fn utf16le_is_little_endian() {
        assert_eq!(utf16le_bytes("Ab"), vec![0x41, 0x00, 0x62, 0x00]);
    }

    #[test]
    fn xor_is_bytewise() {
        assert_eq!(xor(&[0xff, 0x0f], &[0x0f, 0x0f]), vec![0xf0, 0x00]);
    }
}
