//! How an invocation entered the node.
//!
//! [`Origin`] is a closed set: authorization and audit code match on it
//! exhaustively, so adding a variant is a compile error at every consumer
//! until that consumer handles it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::identity::{Actor, LegalName, ScheduledStateRef};
use crate::principal::{Principal, SCHEDULER_PRINCIPAL, SHELL_PRINCIPAL};

/// The way an invocation was introduced into the system.
///
/// # Examples
///
/// ```
/// use invocation_context::{LegalName, Origin};
///
/// let peer = Origin::Peer(LegalName::new("O=Bank B,L=Paris,C=FR"));
/// assert_eq!(peer.principal().name(), "O=Bank B,L=Paris,C=FR");
///
/// assert_eq!(Origin::Shell.principal().name(), "Shell User");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Origin {
    /// Started by an RPC client
    Rpc(Actor),
    /// Started by a message from another node
    Peer(LegalName),
    /// Started by an internal service
    Service {
        /// Fully qualified name of the service
        service_class_name: String,
        /// Identity the service runs as; audit only
        owning_legal_identity: LegalName,
    },
    /// Started by the scheduler firing for a ledger state
    Scheduled(ScheduledStateRef),
    /// Started from the node shell
    Shell,
}

impl Origin {
    /// Derives the principal used for authorization lookups.
    ///
    /// Depends only on this origin's payload and never fails.
    pub fn principal(&self) -> Principal {
        match self {
            Origin::Rpc(actor) => Principal::new(actor.id().value()),
            Origin::Peer(party) => Principal::new(party.to_string()),
            Origin::Service {
                service_class_name, ..
            } => Principal::new(service_class_name.as_str()),
            Origin::Scheduled(_) => Principal::new(SCHEDULER_PRINCIPAL),
            Origin::Shell => Principal::new(SHELL_PRINCIPAL),
        }
    }

    /// Returns the payload-free kind of this origin.
    pub fn kind(&self) -> OriginKind {
        match self {
            Origin::Rpc(_) => OriginKind::Rpc,
            Origin::Peer(_) => OriginKind::Peer,
            Origin::Service { .. } => OriginKind::Service,
            Origin::Scheduled(_) => OriginKind::Scheduled,
            Origin::Shell => OriginKind::Shell,
        }
    }

    /// Returns the RPC actor, if this is an RPC origin.
    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Origin::Rpc(actor) => Some(actor),
            _ => None,
        }
    }
}

/// Discriminant of [`Origin`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OriginKind {
    /// RPC client
    Rpc,
    /// Peer node
    Peer,
    /// Internal service
    Service,
    /// Scheduler
    Scheduled,
    /// Node shell
    Shell,
}

impl OriginKind {
    /// Whether a context of this kind carries a top-level actor.
    pub fn carries_actor(self) -> bool {
        matches!(self, OriginKind::Rpc)
    }

    /// Whether a context of this kind may name an impersonated actor.
    pub fn allows_impersonation(self) -> bool {
        matches!(self, OriginKind::Rpc | OriginKind::Peer)
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginKind::Rpc => write!(f, "rpc"),
            OriginKind::Peer => write!(f, "peer"),
            OriginKind::Service => write!(f, "service"),
            OriginKind::Scheduled => write!(f, "scheduled"),
            OriginKind::Shell => write!(f, "shell"),
        }
    }
}
