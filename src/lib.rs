//! `egress-http` is a resilient async HTTP client for outbound calls to
//! external dependencies.
//!
//! The crate wraps `reqwest` with the protocol-level plumbing a backend
//! service needs around every outbound call:
//! - dual retry policies — connectivity failures and per-status-code
//!   budgets are tracked independently
//! - mTLS transport selection per request ([`ClientPool`])
//! - request/response observability with body rehydration, so logging
//!   never consumes the payload downstream consumers read
//! - pluggable hooks for transports, requests, and retry delays
//!   ([`PoolOptions`])
//!
//! Entry points: [`ClientPool::initialize`] once at startup, then
//! [`OutboundRequest::process`] / [`OutboundRequest::process_raw`] per call.

mod decode;
mod error;
mod observe;
mod options;
mod pool;
mod request;
mod retry;
mod session;
mod types;

pub use error::EgressError;
pub use options::{
    CertificateSource, PoolOptions, RequestHook, RetryDelaySource, TransportHook,
};
pub use pool::{ClientPool, DEFAULT_RETRY_DELAY};
pub use request::OutboundRequest;
pub use session::Session;
pub use types::Processed;

pub type Result<T> = std::result::Result<T, EgressError>;
