use std::collections::HashMap;
use std::time::Instant;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Body, Method, Response, Url};
use serde::de::DeserializeOwned;

use crate::{
    decode::tolerant_from_str, observe, retry, ClientPool, EgressError, Processed, Result, Session,
};

/// One logical outbound call: target, payload, transport selection, and
/// retry policy.
///
/// The value is a description, not a connection — it borrows a
/// [`ClientPool`] only while [`process`](Self::process) or
/// [`process_raw`](Self::process_raw) runs, and the retry budgets are
/// copied per execution, so one request may be processed repeatedly or
/// shared across tasks.
#[derive(Clone, Debug)]
pub struct OutboundRequest {
    session: Session,
    method: String,
    url: String,
    payload: String,
    headers: HashMap<String, String>,
    send_client_cert: bool,
    connectivity_retries: u32,
    status_retries: HashMap<u16, u32>,
}

impl OutboundRequest {
    /// Describes an outbound call with no retries enabled.
    ///
    /// `send_client_cert` selects the cert-bearing client from the pool;
    /// `headers` maps names to single values (case-insensitivity comes from
    /// the HTTP layer).
    pub fn new(
        session: Session,
        method: impl Into<String>,
        url: impl Into<String>,
        payload: impl Into<String>,
        headers: HashMap<String, String>,
        send_client_cert: bool,
    ) -> Self {
        Self {
            session,
            method: method.into(),
            url: url.into(),
            payload: payload.into(),
            headers,
            send_client_cert,
            connectivity_retries: 0,
            status_retries: HashMap::new(),
        }
    }

    /// Enables the dual retry policy.
    ///
    /// `connectivity_retries` is the number of additional attempts after a
    /// transport-level failure. `status_retries` maps an HTTP status code
    /// to the number of additional attempts allowed for that code; codes
    /// absent from the map (and entries at zero) are never retried.
    pub fn enable_retry(&mut self, connectivity_retries: u32, status_retries: HashMap<u16, u32>) {
        self.connectivity_retries = connectivity_retries;
        self.status_retries = status_retries;
    }

    /// The correlation context this request logs under.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Executes the call and returns the response/error pair untouched
    /// (beyond body rehydration), for callers that need full control over
    /// status handling or non-JSON payloads.
    pub async fn process_raw(&self, pool: &ClientPool) -> Result<Response> {
        let started = Instant::now();
        let request = self.build_wire_request(pool)?;
        let outcome = retry::execute(
            pool,
            &self.session,
            request,
            self.send_client_cert,
            self.connectivity_retries,
            &self.status_retries,
        )
        .await;
        observe::finish(&self.session, started, outcome).await
    }

    /// Executes the call and decodes the body into `T`.
    ///
    /// A call that produced no response yields a synthetic 500 with an
    /// empty header set and the transport error; a response that fails to
    /// decode keeps its real status and headers with the decode error in
    /// [`Processed::body`].
    pub async fn process<T: DeserializeOwned>(&self, pool: &ClientPool) -> Processed<T> {
        let response = match self.process_raw(pool).await {
            Ok(response) => response,
            Err(err) => return Processed::failed(err),
        };

        let status = response.status();
        let headers = response.headers().clone();
        let body = match response.text().await {
            Ok(text) => tolerant_from_str(&text),
            Err(err) => Err(EgressError::Transport(err)),
        };

        Processed {
            status,
            headers,
            body,
        }
    }

    fn build_wire_request(&self, pool: &ClientPool) -> Result<reqwest::Request> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|err| self.build_error(err.to_string()))?;
        let url = Url::parse(&self.url).map_err(|err| self.build_error(err.to_string()))?;

        // Call and payload events come before headers so the association
        // between the logical call and its wire artifacts is established
        // early.
        tracing::info!(session = %self.session, "outbound call: {} {}", self.method, self.url);
        tracing::debug!(session = %self.session, "request payload: {}", self.payload);

        let mut request = reqwest::Request::new(method, url);
        *request.body_mut() = Some(Body::from(self.payload.clone()));
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|err| self.build_error(format!("header {name}: {err}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|err| self.build_error(format!("header {name}: {err}")))?;
            request.headers_mut().insert(name, value);
        }
        observe::log_headers(&self.session, "request", request.headers());

        Ok(pool.customize_request(&self.session, request))
    }

    fn build_error(&self, reason: String) -> EgressError {
        EgressError::Build {
            url: self.url.clone(),
            reason,
        }
    }
}
