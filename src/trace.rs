//! Correlation tokens used to link related log entries.
//!
//! A [`Trace`] pairs the identifier of a single invocation with the
//! identifier of the session it belongs to. Both carry the instant they were
//! captured. Values are UUID v4 strings, so concurrent callers always obtain
//! distinct tokens.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationId {
    value: String,
    timestamp: DateTime<Utc>,
}

impl InvocationId {
    /// Wraps an existing identifier value and capture instant.
    pub fn new(value: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    /// Generates a fresh unique identifier stamped with the current time.
    pub fn new_instance() -> Self {
        Self::new(Uuid::new_v4().to_string(), Utc::now())
    }

    /// Returns the identifier value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the instant the identifier was captured.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Identifier of the session an invocation belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId {
    value: String,
    timestamp: DateTime<Utc>,
}

impl SessionId {
    /// Wraps an existing session value and opening instant.
    pub fn new(value: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            timestamp,
        }
    }

    /// Generates a fresh unique session identifier stamped with the current time.
    pub fn new_instance() -> Self {
        Self::new(Uuid::new_v4().to_string(), Utc::now())
    }

    /// Returns the session value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the instant the session was opened.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Opaque correlation token attached to an invocation.
///
/// # Examples
///
/// ```
/// use invocation_context::Trace;
///
/// let first = Trace::new_instance();
/// let second = Trace::new_instance();
/// assert_ne!(first.invocation_id().value(), second.invocation_id().value());
///
/// // A fresh trace opens a session named after its invocation.
/// assert_eq!(first.invocation_id().value(), first.session_id().value());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trace {
    invocation_id: InvocationId,
    session_id: SessionId,
}

impl Trace {
    /// Wraps an existing invocation and session identifier.
    pub fn new(invocation_id: InvocationId, session_id: SessionId) -> Self {
        Self {
            invocation_id,
            session_id,
        }
    }

    /// Generates a fresh trace.
    ///
    /// The session shares the value and timestamp of the new invocation id.
    pub fn new_instance() -> Self {
        let invocation_id = InvocationId::new_instance();
        let session_id = SessionId::new(invocation_id.value(), invocation_id.timestamp());
        Self::new(invocation_id, session_id)
    }

    /// Generates a fresh invocation id within an existing session.
    pub fn new_instance_in_session(session_id: SessionId) -> Self {
        Self::new(InvocationId::new_instance(), session_id)
    }

    /// Returns the invocation identifier.
    pub fn invocation_id(&self) -> &InvocationId {
        &self.invocation_id
    }

    /// Returns the session identifier.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::new_instance()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.invocation_id, self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fresh_traces_are_unique() {
        let a = Trace::new_instance();
        let b = Trace::new_instance();

        assert_ne!(a, b);
        assert_ne!(a.invocation_id().value(), b.invocation_id().value());
    }

    #[test]
    fn fresh_trace_opens_matching_session() {
        let trace = Trace::new_instance();

        assert_eq!(trace.invocation_id().value(), trace.session_id().value());
        assert_eq!(
            trace.invocation_id().timestamp(),
            trace.session_id().timestamp()
        );
    }

    #[test]
    fn trace_in_session_keeps_session() {
        let session = SessionId::new("session-1", Utc.timestamp_opt(1_700_000_000, 0).unwrap());
        let trace = Trace::new_instance_in_session(session.clone());

        assert_eq!(trace.session_id(), &session);
        assert_ne!(trace.invocation_id().value(), "session-1");
    }

    #[test]
    fn trace_value_is_a_uuid() {
        let trace = Trace::new_instance();
        assert!(Uuid::parse_str(trace.invocation_id().value()).is_ok());
    }

    #[test]
    fn trace_display_joins_ids() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let trace = Trace::new(InvocationId::new("inv-1", at), SessionId::new("sess-1", at));

        assert_eq!(trace.to_string(), "inv-1/sess-1");
    }

    #[test]
    fn trace_serde_round_trip() {
        let trace = Trace::new_instance();
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();

        assert_eq!(back, trace);
    }
}
