//! MySQL password hashes, old and new.

use crate::digests::{sha1_hex, sha1_raw};

/// The pre-4.1 MySQL password hash: a 31-bit rolling hash over the
/// password's UTF-16 code units, skipping spaces and tabs. Arithmetic is
/// signed 32-bit with wraparound, matching the server's C implementation;
/// both accumulators are masked to 31 bits before hex formatting, so the
/// output carries no sign and no zero padding.
pub fn pre4_1(password: &str) -> String {
    let mut nr: i32 = 1345345333;
    let mut add: i32 = 7;
    let mut nr2: i32 = 0x12345671;

    for unit in password.encode_utf16() {
        if unit == u16::from(b' ') || unit == u16::from(b'\t') {
            continue;
        }
        let tmp = i32::from(unit);
        nr ^= (nr & 63)
            .wrapping_add(add)
            .wrapping_mul(tmp)
            .wrapping_add(nr << 8);
        nr2 = nr2.wrapping_add((nr2 << 8) ^ nr);
        add = add.wrapping_add(tmp);
    }

    let result1 = nr & 0x7fff_ffff;
    let result2 = nr2 & 0x7fff_ffff;
    format!("{result1:x}{result2:x}")
}

/// The post-4.1 MySQL hash: `*` followed by the hex of a double SHA1,
/// where the inner digest is rehashed as raw bytes.
pub fn post4_1(password: &str) -> String {
    format!("*{}", sha1_hex(&sha1_raw(password.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pre4_1_reference_vector() {
        assert_eq!(pre4_1("password"), "5d2e19393cc5ef67");
    }

    #[test]
    fn pre4_1_skips_spaces_and_tabs() {
        assert_eq!(pre4_1("pass word"), pre4_1("password"));
        assert_eq!(pre4_1("pass\tword"), pre4_1("password"));
    }

    #[test]
    fn post4_1_reference_vector() {
        assert_eq!(post4_1("test"), "*94bdcebe19083ce2a1f959fd02f964c7af4cfc29");
    }
}
