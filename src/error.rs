/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum EgressError {
    /// Request could not be constructed (bad method, URL, or header value).
    /// Never reaches the network and is never retried.
    #[error("failed to build request for {url}: {reason}")]
    Build {
        /// Target URL of the request that failed to build.
        url: String,
        /// Human-readable cause (method/URL/header parse failure).
        reason: String,
    },
    /// Network or request execution error from `reqwest` (DNS, connect,
    /// TLS, timeout). Surfaced as-is once connectivity retries run out.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Response body could not be decoded into the caller's template.
    #[error("decode error: {0}")]
    Decode(String),
}
