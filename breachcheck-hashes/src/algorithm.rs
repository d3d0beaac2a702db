use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A legacy password hash algorithm, identified on the wire by a stable
/// numeric code in the range 0-99.
///
/// The codes are a contract with the breach database server: they are never
/// renumbered and retired codes (e.g. 15) are never reused. Codes the client
/// does not recognize deserialize to [`PasswordAlgorithm::Unknown`] so that a
/// newer server can always describe an account without breaking older
/// clients - an unknown algorithm is a skip, not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PasswordAlgorithm {
    Plaintext,
    Md5,
    Sha1,
    Sha256,
    TripleDes,
    IpBoardMyBb,
    VBulletinPre3_8_5,
    VBulletinPost3_8_5,
    BCrypt,
    Crc32,
    PhpBb3,
    CustomAlgorithm1,
    SCrypt,
    CustomAlgorithm2,
    Sha512,
    Md5Crypt,
    CustomAlgorithm4,
    CustomAlgorithm5,
    OsCommerceAef,
    DesCrypt,
    MySqlPre4_1,
    MySqlPost4_1,
    PeopleSoft,
    PunBb,
    CustomAlgorithm6,
    PartialMd5_20,
    AveDataLifeDiferior,
    DjangoMd5,
    DjangoSha1,
    PartialMd5_29,
    PliggCms,
    RunCmsSmf1_1,
    Ntlm,
    Sha1Dash,
    Sha384,
    CustomAlgorithm7,
    CustomAlgorithm8,
    CustomAlgorithm9,
    Sha512Crypt,
    CustomAlgorithm10,
    Sha256Crypt,
    AuthMeSha256,
    HmacSha1SaltAsKey,
    Unknown,
    UnusablePassword,
    None,
}

impl PasswordAlgorithm {
    /// Returns the stable wire code for this algorithm.
    pub fn code(self) -> u8 {
        match self {
            Self::Plaintext => 0,
            Self::Md5 => 1,
            Self::Sha1 => 2,
            Self::Sha256 => 3,
            Self::TripleDes => 4,
            Self::IpBoardMyBb => 5,
            Self::VBulletinPre3_8_5 => 6,
            Self::VBulletinPost3_8_5 => 7,
            Self::BCrypt => 8,
            Self::Crc32 => 9,
            Self::PhpBb3 => 10,
            Self::CustomAlgorithm1 => 11,
            Self::SCrypt => 12,
            Self::CustomAlgorithm2 => 13,
            Self::Sha512 => 14,
            Self::Md5Crypt => 16,
            Self::CustomAlgorithm4 => 17,
            Self::CustomAlgorithm5 => 18,
            Self::OsCommerceAef => 19,
            Self::DesCrypt => 20,
            Self::MySqlPre4_1 => 21,
            Self::MySqlPost4_1 => 22,
            Self::PeopleSoft => 23,
            Self::PunBb => 24,
            Self::CustomAlgorithm6 => 25,
            Self::PartialMd5_20 => 26,
            Self::AveDataLifeDiferior => 27,
            Self::DjangoMd5 => 28,
            Self::DjangoSha1 => 29,
            Self::PartialMd5_29 => 30,
            Self::PliggCms => 31,
            Self::RunCmsSmf1_1 => 32,
            Self::Ntlm => 33,
            Self::Sha1Dash => 34,
            Self::Sha384 => 35,
            Self::CustomAlgorithm7 => 36,
            Self::CustomAlgorithm8 => 37,
            Self::CustomAlgorithm9 => 38,
            Self::Sha512Crypt => 39,
            Self::CustomAlgorithm10 => 40,
            Self::Sha256Crypt => 41,
            Self::AuthMeSha256 => 42,
            Self::HmacSha1SaltAsKey => 43,
            Self::Unknown => 97,
            Self::UnusablePassword => 98,
            Self::None => 99,
        }
    }

    /// Looks up the algorithm for a wire code. Codes with no assigned
    /// algorithm (gaps and anything a newer server might add) return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        let algorithm = match code {
            0 => Self::Plaintext,
            1 => Self::Md5,
            2 => Self::Sha1,
            3 => Self::Sha256,
            4 => Self::TripleDes,
            5 => Self::IpBoardMyBb,
            6 => Self::VBulletinPre3_8_5,
            7 => Self::VBulletinPost3_8_5,
            8 => Self::BCrypt,
            9 => Self::Crc32,
            10 => Self::PhpBb3,
            11 => Self::CustomAlgorithm1,
            12 => Self::SCrypt,
            13 => Self::CustomAlgorithm2,
            14 => Self::Sha512,
            16 => Self::Md5Crypt,
            17 => Self::CustomAlgorithm4,
            18 => Self::CustomAlgorithm5,
            19 => Self::OsCommerceAef,
            20 => Self::DesCrypt,
            21 => Self::MySqlPre4_1,
            22 => Self::MySqlPost4_1,
            23 => Self::PeopleSoft,
            24 => Self::PunBb,
            25 => Self::CustomAlgorithm6,
            26 => Self::PartialMd5_20,
            27 => Self::AveDataLifeDiferior,
            28 => Self::DjangoMd5,
            29 => Self::DjangoSha1,
            30 => Self::PartialMd5_29,
            31 => Self::PliggCms,
            32 => Self::RunCmsSmf1_1,
            33 => Self::Ntlm,
            34 => Self::Sha1Dash,
            35 => Self::Sha384,
            36 => Self::CustomAlgorithm7,
            37 => Self::CustomAlgorithm8,
            38 => Self::CustomAlgorithm9,
            39 => Self::Sha512Crypt,
            40 => Self::CustomAlgorithm10,
            41 => Self::Sha256Crypt,
            42 => Self::AuthMeSha256,
            43 => Self::HmacSha1SaltAsKey,
            97 => Self::Unknown,
            98 => Self::UnusablePassword,
            99 => Self::None,
            _ => return Option::None,
        };
        Option::Some(algorithm)
    }

    /// Whether this algorithm needs a nonempty per-account salt to produce
    /// output. Salted algorithms yield no hash when the server sends an
    /// empty salt for them.
    pub fn requires_salt(self) -> bool {
        matches!(
            self,
            Self::IpBoardMyBb
                | Self::VBulletinPre3_8_5
                | Self::VBulletinPost3_8_5
                | Self::BCrypt
                | Self::PhpBb3
                | Self::CustomAlgorithm1
                | Self::CustomAlgorithm2
                | Self::Md5Crypt
                | Self::CustomAlgorithm4
                | Self::CustomAlgorithm5
                | Self::OsCommerceAef
                | Self::DesCrypt
                | Self::PunBb
                | Self::DjangoMd5
                | Self::DjangoSha1
                | Self::PliggCms
                | Self::RunCmsSmf1_1
                | Self::Sha1Dash
                | Self::CustomAlgorithm7
                | Self::CustomAlgorithm8
                | Self::CustomAlgorithm9
                | Self::Sha512Crypt
                | Self::CustomAlgorithm10
                | Self::Sha256Crypt
                | Self::AuthMeSha256
                | Self::HmacSha1SaltAsKey
        )
    }
}

impl Serialize for PasswordAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for PasswordAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CodeVisitor;

        // Unassigned codes map to Unknown rather than failing the whole
        // account payload. The code arrives as a JSON number, but servers
        // have also been seen sending it as a quoted string.
        impl serde::de::Visitor<'_> for CodeVisitor {
            type Value = PasswordAlgorithm;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a numeric password algorithm code")
            }

            fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(u8::try_from(value)
                    .ok()
                    .and_then(PasswordAlgorithm::from_code)
                    .unwrap_or(PasswordAlgorithm::Unknown))
            }

            fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(u8::try_from(value)
                    .ok()
                    .and_then(PasswordAlgorithm::from_code)
                    .unwrap_or(PasswordAlgorithm::Unknown))
            }

            fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(value
                    .parse::<u8>()
                    .ok()
                    .and_then(PasswordAlgorithm::from_code)
                    .unwrap_or(PasswordAlgorithm::Unknown))
            }
        }

        deserializer.deserialize_any(CodeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..=99u8 {
            if let Some(algorithm) = PasswordAlgorithm::from_code(code) {
                assert_eq!(algorithm.code(), code);
            }
        }
    }

    #[test]
    fn retired_codes_stay_unassigned() {
        assert_eq!(PasswordAlgorithm::from_code(15), None);
        assert_eq!(PasswordAlgorithm::from_code(44), None);
        assert_eq!(PasswordAlgorithm::from_code(96), None);
    }

    #[test]
    fn unassigned_code_deserializes_to_unknown() {
        let algorithm: PasswordAlgorithm = serde_json::from_str("44").unwrap();
        assert_eq!(algorithm, PasswordAlgorithm::Unknown);
    }

    #[test]
    fn assigned_code_deserializes_to_variant() {
        let algorithm: PasswordAlgorithm = serde_json::from_str("8").unwrap();
        assert_eq!(algorithm, PasswordAlgorithm::BCrypt);
    }

    #[test]
    fn quoted_code_deserializes_to_variant() {
        let algorithm: PasswordAlgorithm = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(algorithm, PasswordAlgorithm::PhpBb3);
    }

    #[test]
    fn serializes_as_wire_code() {
        let json = serde_json::to_string(&PasswordAlgorithm::PhpBb3).unwrap();
        assert_eq!(json, "10");
    }
}
