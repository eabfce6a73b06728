use reqwest::{header::HeaderMap, StatusCode};

use crate::EgressError;

/// Outcome of a structured [`process`](crate::OutboundRequest::process) call.
///
/// Status and headers are always populated: from the real response when one
/// was received, or a synthetic `500 Internal Server Error` with an empty
/// header set when the call itself failed. `body` separates "the HTTP call
/// succeeded but the payload did not parse" from "the call itself failed" —
/// in the former case `status` and `headers` still describe the real
/// response.
#[derive(Debug)]
pub struct Processed<T> {
    /// HTTP status of the final attempt, or synthetic 500 on transport
    /// failure.
    pub status: StatusCode,
    /// Response headers, empty on transport failure.
    pub headers: HeaderMap,
    /// Parsed payload, or the call's error.
    pub body: Result<T, EgressError>,
}

impl<T> Processed<T> {
    pub(crate) fn failed(error: EgressError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            headers: HeaderMap::new(),
            body: Err(error),
        }
    }
}
