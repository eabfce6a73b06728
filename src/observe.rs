use std::time::Instant;

use reqwest::header::{HeaderMap, AUTHORIZATION, COOKIE, PROXY_AUTHORIZATION};
use reqwest::Response;

use crate::{EgressError, Result, Session};

const REDACTED: &str = "<redacted>";

/// Logs a header set with credential-bearing values replaced.
pub(crate) fn log_headers(session: &Session, direction: &str, headers: &HeaderMap) {
    for (name, value) in headers {
        let shown = if is_sensitive(name) {
            REDACTED
        } else {
            value.to_str().unwrap_or(REDACTED)
        };
        tracing::debug!(session = %session, "{direction} header {name}: {shown}");
    }
}

fn is_sensitive(name: &reqwest::header::HeaderName) -> bool {
    name == AUTHORIZATION || name == PROXY_AUTHORIZATION || name == COOKIE
}

/// Logs the outcome of an executed call and rehydrates the response body.
///
/// The body is read fully into memory exactly once (the network read) so it
/// can be logged, then the response is rebuilt over the captured bytes.
/// Without the rebuild, logging would consume the only copy of the body and
/// downstream consumers would find an empty stream.
pub(crate) async fn finish(
    session: &Session,
    started: Instant,
    outcome: Result<Response>,
) -> Result<Response> {
    let response = match outcome {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(session = %session, "outbound call failed: {err}");
            tracing::info!(
                session = %session,
                "outbound call finished in error after {} ms",
                started.elapsed().as_millis()
            );
            return Err(err);
        }
    };

    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();
    let bytes = response.bytes().await.map_err(EgressError::Transport)?;

    log_headers(session, "response", &headers);
    tracing::debug!(session = %session, "response body: {}", String::from_utf8_lossy(&bytes));
    tracing::info!(
        session = %session,
        "outbound call finished {} ({}) after {} ms",
        status.canonical_reason().unwrap_or("unknown"),
        status.as_u16(),
        started.elapsed().as_millis()
    );

    let mut rebuilt = http::Response::new(bytes);
    *rebuilt.status_mut() = status;
    *rebuilt.version_mut() = version;
    *rebuilt.headers_mut() = headers;
    Ok(Response::from(rebuilt))
}
