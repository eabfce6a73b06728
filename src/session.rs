use std::fmt;

use uuid::Uuid;

/// Opaque correlation context attached to every outbound request.
///
/// The session only associates log events with a logical call; no client
/// behavior depends on its contents.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    id: String,
}

impl Session {
    /// Creates a session from an existing correlation ID (e.g. one carried
    /// over from an inbound request).
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Creates a session with a freshly generated UUID v4 correlation ID.
    pub fn generate() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
        }
    }

    /// The correlation ID.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
