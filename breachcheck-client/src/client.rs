//! The breach API client and the two matching protocols.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use breachcheck_hashes::{PasswordAlgorithm, digests};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::blocking;
use reqwest::header;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::credentials::{self, PREFIX_LEN};
use crate::error::Error;
use crate::types::{
    AccountRecord, CredentialCandidates, ExposureDetails, ExposuresRecord, PasswordCandidate,
    PasswordCandidates, PasswordStatus,
};

const ACCOUNTS_PATH: &str = "/accounts";
const CREDENTIALS_PATH: &str = "/credentials";
const PASSWORDS_PATH: &str = "/passwords";
const EXPOSURES_PATH: &str = "/exposures";

/// Client for the breach-compromise database API.
///
/// All configuration is fixed at construction; a `Client` holds no mutable
/// state, so independent checks may run concurrently from separate threads.
/// Each check performs at most two sequential round trips and never
/// transmits more than 10-character hash prefixes.
pub struct Client {
    http: blocking::Client,
    base_url: String,
    auth_header: String,
}

impl Client {
    /// Creates a client that blocks indefinitely on network I/O.
    ///
    /// `base_url` is the API root (no trailing slash required); requests
    /// authenticate with `Authorization: basic base64(api_key:secret)`.
    pub fn new(api_key: &str, secret: &str, base_url: &str) -> Result<Self, Error> {
        Self::with_timeout(api_key, secret, base_url, Duration::ZERO)
    }

    /// Creates a client with a request timeout covering both the connect
    /// and read phases of every round trip. A zero timeout means block
    /// indefinitely.
    pub fn with_timeout(
        api_key: &str,
        secret: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, Error> {
        if api_key.is_empty() {
            return Err(Error::Config { reason: "api key must not be empty" });
        }
        if secret.is_empty() {
            return Err(Error::Config { reason: "secret must not be empty" });
        }

        let timeout = if timeout.is_zero() { None } else { Some(timeout) };
        let http = blocking::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: format!("basic {}", BASE64_STANDARD.encode(format!("{api_key}:{secret}"))),
        })
    }

    /// Checks whether a username/password pair is known to be compromised.
    ///
    /// Equivalent to [`Client::check_credentials_ex`] with no last-check
    /// date and no excluded algorithms.
    pub fn check_credentials(&self, username: &str, password: &str) -> Result<bool, Error> {
        self.check_credentials_ex(username, password, None, &[])
    }

    /// Checks whether a username/password pair is known to be compromised,
    /// with the performance controls exposed.
    ///
    /// `last_check_date` is the timestamp of the caller's previous check
    /// for these credentials: when it is strictly after the account's last
    /// breach date, nothing new can have appeared and the check
    /// short-circuits to `false` without computing a single hash.
    /// `excluded_algorithms` drops the listed hash algorithms from the
    /// computation, letting callers trade coverage for CPU on the
    /// expensive ones.
    ///
    /// Only the SHA256 of the username and 10-character prefixes of the
    /// anonymized credential hashes are ever transmitted; exact matching
    /// happens locally against the returned candidate set.
    #[instrument(skip_all)]
    pub fn check_credentials_ex(
        &self,
        username: &str,
        password: &str,
        last_check_date: Option<DateTime<Utc>>,
        excluded_algorithms: &[PasswordAlgorithm],
    ) -> Result<bool, Error> {
        let username_hash = digests::sha256_hex(username.as_bytes());
        let Some(account) =
            self.get_json::<AccountRecord>(ACCOUNTS_PATH, &[("username", username_hash)])?
        else {
            debug!("account not found; credentials cannot be compromised");
            return Ok(false);
        };

        if checked_since_last_breach(last_check_date, account.last_breach_date) {
            debug!("no new breaches since the caller's last check");
            return Ok(false);
        }

        let hashes = credentials::compute_credential_hashes(
            username,
            password,
            &account.salt,
            &account.password_hashes_required,
            excluded_algorithms,
        );
        if hashes.is_empty() {
            debug!("no credential hashes computed; skipping the candidate query");
            return Ok(false);
        }

        let query: Vec<(&str, String)> =
            hashes.iter().map(|hash| ("partialHashes", hash.prefix.clone())).collect();
        let Some(candidates) =
            self.get_json::<CredentialCandidates>(CREDENTIALS_PATH, &query)?
        else {
            return Ok(false);
        };

        Ok(candidates
            .candidate_hashes
            .iter()
            .any(|candidate| hashes.iter().any(|hash| hash.full == *candidate)))
    }

    /// Checks whether a password appears in the breach database.
    pub fn check_password(&self, password: &str) -> Result<bool, Error> {
        Ok(self.check_password_ex(password)?.is_some())
    }

    /// Checks whether a password appears in the breach database, returning
    /// its exposure metadata when it does.
    ///
    /// Global lookup with no account salt: the password is hashed under
    /// MD5, SHA1 and SHA256 and the three 10-character prefixes go out in
    /// one request. A candidate matches when any one of its digests equals
    /// the corresponding local digest. `None` is the well-formed "not
    /// compromised" result.
    #[instrument(skip_all)]
    pub fn check_password_ex(&self, password: &str) -> Result<Option<PasswordStatus>, Error> {
        let md5 = digests::md5_hex(password.as_bytes());
        let sha1 = digests::sha1_hex(password.as_bytes());
        let sha256 = digests::sha256_hex(password.as_bytes());

        let query = [
            ("partial_md5", md5[..PREFIX_LEN].to_string()),
            ("partial_sha1", sha1[..PREFIX_LEN].to_string()),
            ("partial_sha256", sha256[..PREFIX_LEN].to_string()),
        ];
        let Some(response) = self.get_json::<PasswordCandidates>(PASSWORDS_PATH, &query)? else {
            return Ok(None);
        };

        Ok(matching_candidate(&response.candidates, &md5, &sha1, &sha256).map(|candidate| {
            PasswordStatus {
                revealed_in_exposure: candidate.revealed_in_exposure,
                relative_exposure_frequency: candidate.relative_exposure_frequency,
                exposure_count: candidate.exposure_count,
            }
        }))
    }

    /// Returns the exposures recorded for a username. A username the
    /// database has never seen yields the empty record.
    pub fn get_exposures_for_user(&self, username: &str) -> Result<ExposuresRecord, Error> {
        Ok(self
            .get_json::<ExposuresRecord>(EXPOSURES_PATH, &[("username", username.to_string())])?
            .unwrap_or_default())
    }

    /// Returns the details of a single exposure, or `None` for an unknown
    /// exposure id. Details rarely change; callers are expected to cache.
    pub fn get_exposure_details(
        &self,
        exposure_id: &str,
    ) -> Result<Option<ExposureDetails>, Error> {
        self.get_json(EXPOSURES_PATH, &[("id", exposure_id.to_string())])
    }

    /// Issues one authenticated GET. `Ok(None)` is the semantic 404; any
    /// other non-200 status is a protocol failure carrying the body.
    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, Error> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .header(header::AUTHORIZATION, &self.auth_header)
            .header(header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text()?;
        if status != StatusCode::OK {
            return Err(Error::Protocol { url, status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map(Some).map_err(|e| Error::Protocol {
            url,
            status: status.as_u16(),
            body: format!("undecodable response body: {e}"),
        })
    }
}

/// True when the caller's last check postdates the account's last breach,
/// i.e. nothing new can have appeared since.
fn checked_since_last_breach(
    last_check: Option<DateTime<Utc>>,
    last_breach: Option<DateTime<Utc>>,
) -> bool {
    matches!((last_check, last_breach), (Some(check), Some(breach)) if check > breach)
}

/// First candidate whose MD5, SHA1 or SHA256 equals the corresponding
/// local digest. Exact string equality only.
fn matching_candidate<'a>(
    candidates: &'a [PasswordCandidate],
    md5: &str,
    sha1: &str,
    sha256: &str,
) -> Option<&'a PasswordCandidate> {
    candidates
        .iter()
        .find(|candidate| candidate.md5 == md5 || candidate.sha1 == sha1 || candidate.sha256 == sha256)
}
