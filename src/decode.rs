use serde::de::DeserializeOwned;

use crate::EgressError;

/// Best-effort JSON decode of a response body.
///
/// Tries the raw text first; on failure, retries with the text wrapped in
/// quotes. Some upstreams return bare primitives (`42`, `ok`) instead of
/// valid JSON, and the quoted retry lets those parse into primitive
/// templates. The error carries the first serde failure plus the body.
pub(crate) fn tolerant_from_str<T: DeserializeOwned>(text: &str) -> Result<T, EgressError> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first) => serde_json::from_str(&format!("\"{text}\"")).map_err(|_| {
            EgressError::Decode(format!("invalid response body JSON: {first}; body: {text}"))
        }),
    }
}
