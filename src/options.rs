use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{ClientBuilder, Identity, Request};

use crate::Session;

/// Supplies the client TLS identity for the cert-bearing transport.
/// Returning `None` falls back to the default transport.
pub type CertificateSource = Arc<dyn Fn() -> Option<Identity> + Send + Sync>;

/// Rewrites the transport configuration of both pooled clients before they
/// are built. Identity if unset.
pub type TransportHook = Arc<dyn Fn(ClientBuilder) -> ClientBuilder + Send + Sync>;

/// Rewrites a wire request just before transmission — the last mutation
/// point, intended for cross-cutting concerns such as tracing headers or
/// auth injection. Identity if unset.
pub type RequestHook = Arc<dyn Fn(&Session, Request) -> Request + Send + Sync>;

/// Supplies the delay slept between retry attempts. Fixed default if unset.
pub type RetryDelaySource = Arc<dyn Fn() -> Duration + Send + Sync>;

/// Configures the customization hooks and retry deadline of a
/// [`ClientPool`](crate::ClientPool).
///
/// Every field has a documented default, so `PoolOptions::default()` yields
/// a pool with no client certificate, untouched transports and requests,
/// the fixed retry delay, and no call-wide deadline.
#[derive(Clone, Default)]
pub struct PoolOptions {
    pub(crate) client_certificate: Option<CertificateSource>,
    pub(crate) customize_transport: Option<TransportHook>,
    pub(crate) customize_request: Option<RequestHook>,
    pub(crate) retry_delay: Option<RetryDelaySource>,
    pub(crate) call_timeout: Option<Duration>,
}

impl PoolOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client-certificate source for the cert-bearing transport.
    pub fn with_client_certificate<F>(mut self, source: F) -> Self
    where
        F: Fn() -> Option<Identity> + Send + Sync + 'static,
    {
        self.client_certificate = Some(Arc::new(source));
        self
    }

    /// Sets the transport customization hook.
    pub fn with_transport_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(ClientBuilder) -> ClientBuilder + Send + Sync + 'static,
    {
        self.customize_transport = Some(Arc::new(hook));
        self
    }

    /// Sets the request customization hook.
    pub fn with_request_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Session, Request) -> Request + Send + Sync + 'static,
    {
        self.customize_request = Some(Arc::new(hook));
        self
    }

    /// Sets the inter-retry delay source.
    pub fn with_retry_delay<F>(mut self, source: F) -> Self
    where
        F: Fn() -> Duration + Send + Sync + 'static,
    {
        self.retry_delay = Some(Arc::new(source));
        self
    }

    /// Bounds the total wall clock spent on one call including all retries.
    /// Once the deadline passes, no further retries are scheduled; each
    /// attempt is still bounded by the pool's per-attempt timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }
}

impl fmt::Debug for PoolOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PoolOptions")
            .field("client_certificate", &self.client_certificate.is_some())
            .field("customize_transport", &self.customize_transport.is_some())
            .field("customize_request", &self.customize_request.is_some())
            .field("retry_delay", &self.retry_delay.is_some())
            .field("call_timeout", &self.call_timeout)
            .finish()
    }
}
