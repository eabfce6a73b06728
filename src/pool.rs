use std::fmt;
use std::time::Duration;

use reqwest::{Client, ClientBuilder, Identity};

use crate::{EgressError, PoolOptions, Result, Session};

/// Default delay slept between retry attempts when no
/// [`retry_delay`](PoolOptions::with_retry_delay) source is configured.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(3);

/// The two long-lived HTTP clients shared by all outbound calls.
///
/// Built once at process startup and passed by reference into every call.
/// One client carries the client TLS certificate for mTLS endpoints, the
/// other uses the default transport; both share the same per-attempt
/// timeout. `reqwest::Client` is safe for concurrent use, so the pool needs
/// no locking and must never be rebuilt mid-flight.
pub struct ClientPool {
    with_cert: Client,
    without_cert: Client,
    options: PoolOptions,
}

impl fmt::Debug for ClientPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientPool")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ClientPool {
    /// Builds the pool with default options.
    ///
    /// `timeout` bounds each individual attempt, retries excluded; use
    /// [`PoolOptions::with_call_timeout`] to bound a whole call.
    pub fn initialize(timeout: Duration) -> Result<Self> {
        Self::initialize_with(timeout, PoolOptions::default())
    }

    /// Builds the pool with explicit options. Call once at startup.
    pub fn initialize_with(timeout: Duration, options: PoolOptions) -> Result<Self> {
        let without_cert = build_client(timeout, None, &options)?;

        let identity = options.client_certificate.as_ref().and_then(|source| source());
        let with_cert = match identity {
            Some(identity) => build_client(timeout, Some(identity), &options)?,
            None => {
                tracing::warn!(
                    "no client certificate available; cert-bearing client falls back to the default transport"
                );
                without_cert.clone()
            }
        };

        Ok(Self {
            with_cert,
            without_cert,
            options,
        })
    }

    /// Selects the client for a request. Pure lookup, no failure mode.
    pub fn client_for(&self, send_client_cert: bool) -> &Client {
        if send_client_cert {
            &self.with_cert
        } else {
            &self.without_cert
        }
    }

    pub(crate) fn customize_request(
        &self,
        session: &Session,
        request: reqwest::Request,
    ) -> reqwest::Request {
        match &self.options.customize_request {
            Some(hook) => hook(session, request),
            None => request,
        }
    }

    /// Delay before the next retry, from the configured source or the
    /// module default. Invoked once per retry.
    pub(crate) fn retry_delay(&self) -> Duration {
        match &self.options.retry_delay {
            Some(source) => source(),
            None => DEFAULT_RETRY_DELAY,
        }
    }

    pub(crate) fn call_timeout(&self) -> Option<Duration> {
        self.options.call_timeout
    }
}

fn build_client(
    timeout: Duration,
    identity: Option<Identity>,
    options: &PoolOptions,
) -> Result<Client> {
    let mut builder = ClientBuilder::new().timeout(timeout);
    if let Some(identity) = identity {
        builder = builder.identity(identity);
    }
    if let Some(hook) = &options.customize_transport {
        builder = hook(builder);
    }
    builder.build().map_err(EgressError::Transport)
}
