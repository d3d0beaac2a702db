#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid client configuration: {reason}")]
    Config { reason: &'static str },

    /// Connectivity or timeout failure; the check produced no result.
    #[error("request to the breach API failed: {source}")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    /// The server answered with a status the protocol does not define.
    /// HTTP 404 is never reported here - it is the semantic "record not
    /// found" and maps to a negative check result.
    #[error("API call to {url} failed with HTTP {status}: {body}")]
    Protocol { url: String, status: u16, body: String },
}
