//! Wire payloads for the breach API, plus the records handed back to
//! callers.

use breachcheck_hashes::PasswordAlgorithm;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One hash the server requires for an account's credentials check: the
/// algorithm to run and the per-site salt it was originally computed with.
/// Consumed once per check and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordHashSpecification {
    pub hash_type: PasswordAlgorithm,
    #[serde(default)]
    pub salt: String,
}

/// The accounts payload: the account-wide credential salt, the hash specs
/// to compute, and when the account last appeared in a new breach.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    #[serde(default)]
    pub salt: String,
    #[serde(default)]
    pub password_hashes_required: Vec<PasswordHashSpecification>,
    #[serde(default)]
    pub last_breach_date: Option<DateTime<Utc>>,
}

/// Candidate credential hashes returned for a batch of submitted prefixes.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CredentialCandidates {
    #[serde(default)]
    pub candidate_hashes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PasswordCandidates {
    #[serde(default)]
    pub candidates: Vec<PasswordCandidate>,
}

/// One candidate from the passwords endpoint: the full digests under all
/// three algorithms plus exposure metadata for the underlying password.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordCandidate {
    #[serde(default)]
    pub md5: String,
    #[serde(default)]
    pub sha1: String,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub revealed_in_exposure: bool,
    #[serde(default)]
    pub relative_exposure_frequency: u32,
    #[serde(default)]
    pub exposure_count: u32,
}

/// Exposure metadata for a compromised password, returned by
/// [`crate::Client::check_password_ex`].
///
/// `relative_exposure_frequency` is the percentage of indexed breaches
/// containing the password at least once; `revealed_in_exposure` is false
/// when the password is known only from cracking dictionaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordStatus {
    pub revealed_in_exposure: bool,
    pub relative_exposure_frequency: u32,
    pub exposure_count: u32,
}

/// The exposures found for a username. A username the database has never
/// seen yields the empty record, not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExposuresRecord {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub exposures: Vec<String>,
}

/// Detailed information about a single breach exposure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExposureDetails {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entries: u64,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub password_type: String,
    #[serde(default)]
    pub exposed_data: Vec<String>,
    #[serde(default)]
    pub date_added: Option<DateTime<Utc>>,
    #[serde(default, rename = "sourceURLs")]
    pub source_urls: Vec<String>,
    #[serde(default)]
    pub domains_affected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_record_deserializes_wire_shape() {
        let json = r#"{
            "salt": "accountsaltvalue",
            "passwordHashesRequired": [
                {"hashType": 8, "salt": "$2a$12$2bULeXwv2H34SXkT1giCZe"},
                {"hashType": 1, "salt": ""},
                {"hashType": 44, "salt": "future-salt"}
            ],
            "lastBreachDate": "2018-03-28T05:52:57.000Z"
        }"#;
        let record: AccountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.salt, "accountsaltvalue");
        assert_eq!(record.password_hashes_required.len(), 3);
        assert_eq!(record.password_hashes_required[0].hash_type, PasswordAlgorithm::BCrypt);
        assert_eq!(record.password_hashes_required[1].hash_type, PasswordAlgorithm::Md5);
        // A hash type this client has never heard of parses as Unknown
        // instead of poisoning the whole account payload.
        assert_eq!(record.password_hashes_required[2].hash_type, PasswordAlgorithm::Unknown);
        assert!(record.last_breach_date.is_some());
    }

    #[test]
    fn account_record_tolerates_missing_fields() {
        let record: AccountRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(record.salt, "");
        assert!(record.password_hashes_required.is_empty());
        assert_eq!(record.last_breach_date, None);
    }

    #[test]
    fn credential_candidates_deserialize() {
        let json = r#"{"candidateHashes": ["ab12", "cd34"]}"#;
        let candidates: CredentialCandidates = serde_json::from_str(json).unwrap();
        assert_eq!(candidates.candidate_hashes, vec!["ab12", "cd34"]);
    }

    #[test]
    fn password_candidates_deserialize() {
        let json = r#"{"candidates": [{
            "md5": "e10adc3949ba59abbe56e057f20f883e",
            "sha1": "7c4a8d09ca3762af61e59520943dc26494f8941b",
            "sha256": "8d969eef6ecad3c29a3a629280e686cf0c3f5d5a86aff3ca12020c923adc6c92",
            "revealedInExposure": true,
            "relativeExposureFrequency": 13,
            "exposureCount": 42
        }]}"#;
        let response: PasswordCandidates = serde_json::from_str(json).unwrap();
        let candidate = &response.candidates[0];
        assert!(candidate.revealed_in_exposure);
        assert_eq!(candidate.relative_exposure_frequency, 13);
        assert_eq!(candidate.exposure_count, 42);
    }

    #[test]
    fn exposure_details_deserialize() {
        let json = r#"{
            "id": "5820469ffdb8780510b329cc",
            "title": "last.fm",
            "entries": 81967007,
            "category": "Music",
            "passwordType": "MD5",
            "exposedData": ["Emails", "Passwords"],
            "sourceURLs": ["https://example.invalid/writeup"],
            "domainsAffected": 1219053
        }"#;
        let details: ExposureDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.title, "last.fm");
        assert_eq!(details.entries, 81_967_007);
        assert_eq!(details.source_urls.len(), 1);
        assert_eq!(details.domains_affected, 1_219_053);
    }
}
