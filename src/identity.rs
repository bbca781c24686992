//! Identity value types carried by an invocation context.
//!
//! These are opaque to this crate: they are compared, displayed and
//! serialized, never parsed or validated.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authentication service id assigned to internally initiated actions.
pub const SERVICE_AUTH_ID: &str = "SERVICE";

/// Distinguished name of a legal identity on the network,
/// e.g. `O=Bank A,L=London,C=GB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegalName(String);

impl LegalName {
    /// Creates a legal name from its string form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LegalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the authentication service that vouches for an actor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthServiceId(String);

impl AuthServiceId {
    /// Creates an authentication service id.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The sentinel id used for actions initiated by internal services.
    pub fn service() -> Self {
        Self::new(SERVICE_AUTH_ID)
    }

    /// Returns the id value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to a ledger state whose scheduled activity triggered an invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledStateRef {
    /// Hash of the transaction that produced the state
    pub txhash: String,
    /// Output index of the state within that transaction
    pub index: u32,
    /// When the scheduled activity was due
    pub scheduled_at: DateTime<Utc>,
}

impl ScheduledStateRef {
    /// Creates a scheduled state reference.
    pub fn new(txhash: impl Into<String>, index: u32, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            txhash: txhash.into(),
            index,
            scheduled_at,
        }
    }
}

impl fmt::Display for ScheduledStateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})@{}", self.txhash, self.index, self.scheduled_at)
    }
}

/// Identifier of an actor, scoped to its authentication service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(String);

impl ActorId {
    /// Creates an actor id.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the id value.
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An agent that initiated an invocation.
///
/// The `id` is only meaningful relative to `service_id`: two services may
/// hand out the same id to different agents. Equality and hashing cover all
/// three fields.
///
/// # Examples
///
/// ```
/// use invocation_context::{Actor, ActorId, AuthServiceId, LegalName};
///
/// let owner = LegalName::new("O=Bank A,L=London,C=GB");
/// let alice = Actor::new(ActorId::new("alice"), AuthServiceId::new("rpc-users"), owner.clone());
///
/// let service = Actor::service("com.example.Reporter", owner);
/// assert_eq!(service.id().value(), "com.example.Reporter");
/// assert_eq!(service.service_id().value(), "SERVICE");
/// assert_ne!(alice, service);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    service_id: AuthServiceId,
    owning_legal_identity: LegalName,
}

impl Actor {
    /// Creates an actor vouched for by `service_id` on behalf of `owning_legal_identity`.
    pub fn new(id: ActorId, service_id: AuthServiceId, owning_legal_identity: LegalName) -> Self {
        Self {
            id,
            service_id,
            owning_legal_identity,
        }
    }

    /// Creates the self-attributed actor of an internal service.
    pub fn service(service_class_name: impl Into<String>, owning_legal_identity: LegalName) -> Self {
        Self::new(
            ActorId::new(service_class_name),
            AuthServiceId::service(),
            owning_legal_identity,
        )
    }

    /// Returns the actor id.
    pub fn id(&self) -> &ActorId {
        &self.id
    }

    /// Returns the authentication service that vouches for this actor.
    pub fn service_id(&self) -> &AuthServiceId {
        &self.service_id
    }

    /// Returns the legal identity the actor acts on behalf of.
    pub fn owning_legal_identity(&self) -> &LegalName {
        &self.owning_legal_identity
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.id, self.service_id)
    }
}
