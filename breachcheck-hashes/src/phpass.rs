//! phpBB3 portable hashes (`$H$`), the phpass scheme.

use crate::digests::md5_raw;

/// The phpass base-64 alphabet. The 4th salt character's index in this
/// alphabet is the log2 of the MD5 iteration count.
const ITOA64: &[u8; 64] = b"./0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Computes a phpBB3 portable hash. The salt must be at least 12 characters
/// and carry the `$H$` marker; anything else yields no hash.
pub fn phpbb3(password: &str, salt: &str) -> Option<String> {
    let salt_bytes = salt.as_bytes();
    if !salt.starts_with("$H$") || salt_bytes.len() < 12 {
        return None;
    }

    let exponent = ITOA64.iter().position(|&c| c == salt_bytes[3])?;
    let rounds = 1u64 << exponent;
    let just_salt = &salt_bytes[4..12];
    let password_bytes = password.as_bytes();

    let mut digest = {
        let mut seed = Vec::with_capacity(just_salt.len() + password_bytes.len());
        seed.extend_from_slice(just_salt);
        seed.extend_from_slice(password_bytes);
        md5_raw(&seed)
    };

    let mut block = Vec::with_capacity(digest.len() + password_bytes.len());
    for _ in 0..rounds {
        block.clear();
        block.extend_from_slice(&digest);
        block.extend_from_slice(password_bytes);
        digest = md5_raw(&block);
    }

    let mut out = String::with_capacity(salt.len() + 22);
    out.push_str(salt);
    out.push_str(&encode64(&digest));
    Some(out)
}

/// phpass re-encoding of the 16 raw digest bytes: little-endian 3-byte
/// groups emit 4 alphabet characters each, and the final partial group
/// terminates early once the 16th source byte has been consumed.
fn encode64(input: &[u8; 16]) -> String {
    let count = input.len();
    let mut out = String::with_capacity(22);
    let mut i = 0;
    loop {
        let mut value = u32::from(input[i]);
        i += 1;
        out.push(ITOA64[(value & 63) as usize] as char);
        if i < count {
            value |= u32::from(input[i]) << 8;
        }
        out.push(ITOA64[((value >> 6) & 63) as usize] as char);
        i += 1;
        if i > count {
            break;
        }
        if i < count {
            value |= u32::from(input[i]) << 16;
        }
        out.push(ITOA64[((value >> 12) & 63) as usize] as char);
        i += 1;
        if i > count {
            break;
        }
        out.push(ITOA64[((value >> 18) & 63) as usize] as char);
        if i >= count {
            break;
        }
    }
    out
}
