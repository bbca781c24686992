//! Audit record schema.

use std::fmt;

use serde::Serialize;

use crate::context::InvocationContext;
use crate::origin::{Origin, OriginKind};

/// A structured audit record built from an invocation context.
///
/// Every field is copied verbatim from the context; nothing is looked up or
/// verified.
///
/// # Example
///
/// ```
/// use invocation_context::InvocationContext;
/// use invocation_context::audit::AuditRecord;
///
/// let ctx = InvocationContext::shell().build();
/// let record = AuditRecord::from_context(&ctx);
///
/// assert_eq!(record.principal(), "Shell User");
/// assert!(record.actor().is_none());
/// record.emit();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    /// How the invocation entered the system
    origin: OriginKind,
    /// Principal derived from the origin
    principal: String,
    /// Invocation id of the context trace
    invocation_id: String,
    /// Session id of the context trace
    session_id: String,
    /// Initiating actor as `id@service`
    actor: Option<String>,
    /// Legal identity the invocation runs for, when the origin names one
    owning_identity: Option<String>,
    /// Invocation id of the external trace
    external_invocation_id: Option<String>,
    /// On-behalf-of actor as `id@service`
    impersonated_actor: Option<String>,
}

impl AuditRecord {
    /// Projects a context into an audit record.
    pub fn from_context(ctx: &InvocationContext) -> Self {
        let owning_identity = match ctx.origin() {
            Origin::Rpc(actor) => Some(actor.owning_legal_identity().to_string()),
            Origin::Service {
                owning_legal_identity,
                ..
            } => Some(owning_legal_identity.to_string()),
            Origin::Peer(_) | Origin::Scheduled(_) | Origin::Shell => None,
        };

        Self {
            origin: ctx.origin().kind(),
            principal: ctx.principal().name().to_string(),
            invocation_id: ctx.trace().invocation_id().value().to_string(),
            session_id: ctx.trace().session_id().value().to_string(),
            actor: ctx.actor().map(ToString::to_string),
            owning_identity,
            external_invocation_id: ctx
                .external_trace()
                .map(|t| t.invocation_id().value().to_string()),
            impersonated_actor: ctx.impersonated_actor().map(ToString::to_string),
        }
    }

    /// Returns the origin kind.
    pub fn origin(&self) -> OriginKind {
        self.origin
    }

    /// Returns the principal name.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Returns the invocation id.
    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    /// Returns the session id.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Returns the initiating actor, if any.
    pub fn actor(&self) -> Option<&str> {
        self.actor.as_deref()
    }

    /// Returns the owning legal identity, if the origin names one.
    pub fn owning_identity(&self) -> Option<&str> {
        self.owning_identity.as_deref()
    }

    /// Returns the external invocation id, if any.
    pub fn external_invocation_id(&self) -> Option<&str> {
        self.external_invocation_id.as_deref()
    }

    /// Returns the impersonated actor, if any.
    pub fn impersonated_actor(&self) -> Option<&str> {
        self.impersonated_actor.as_deref()
    }

    /// Emits the record through the tracing infrastructure.
    pub fn emit(&self) {
        tracing::info!(
            target: "invocation_audit",
            origin = %self.origin,
            principal = %self.principal,
            invocation_id = %self.invocation_id,
            session_id = %self.session_id,
            actor = ?self.actor,
            owning_identity = ?self.owning_identity,
            external_invocation_id = ?self.external_invocation_id,
            impersonated_actor = ?self.impersonated_actor,
            "invocation audit"
        );
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuditRecord[origin={}, principal={}, invocation_id={}, session_id={}",
            self.origin, self.principal, self.invocation_id, self.session_id
        )?;

        if let Some(actor) = &self.actor {
            write!(f, ", actor={}", actor)?;
        }
        if let Some(owner) = &self.owning_identity {
            write!(f, ", owning_identity={}", owner)?;
        }
        if let Some(external) = &self.external_invocation_id {
            write!(f, ", external_invocation_id={}", external)?;
        }
        if let Some(impersonated) = &self.impersonated_actor {
            write!(f, ", impersonated_actor={}", impersonated)?;
        }

        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::{Actor, ActorId, AuthServiceId, LegalName};
    use crate::trace::Trace;

    fn bank_a() -> LegalName {
        LegalName::new("O=Bank A,L=London,C=GB")
    }

    fn alice() -> Actor {
        Actor::new(ActorId::new("alice"), AuthServiceId::new("rpc"), bank_a())
    }

    #[test]
    fn rpc_record_carries_actor_and_owner() {
        let ctx = InvocationContext::rpc(alice()).build();
        let record = AuditRecord::from_context(&ctx);

        assert_eq!(record.origin(), OriginKind::Rpc);
        assert_eq!(record.principal(), "alice");
        assert_eq!(record.actor(), Some("alice@rpc"));
        assert_eq!(record.owning_identity(), Some("O=Bank A,L=London,C=GB"));
        assert_eq!(record.invocation_id(), ctx.trace().invocation_id().value());
        assert_eq!(record.session_id(), ctx.trace().session_id().value());
    }

    #[test]
    fn service_record_reports_owning_identity() {
        let ctx = InvocationContext::service("com.foo.Bar", bank_a()).build();
        let record = AuditRecord::from_context(&ctx);

        assert_eq!(record.principal(), "com.foo.Bar");
        assert!(record.actor().is_none());
        assert_eq!(record.owning_identity(), Some("O=Bank A,L=London,C=GB"));
    }

    #[test]
    fn impersonated_actor_is_reported_not_used() {
        let bob = Actor::new(ActorId::new("bob"), AuthServiceId::new("rpc"), bank_a());
        let ctx = InvocationContext::peer(bank_a()).impersonating(bob).build();
        let record = AuditRecord::from_context(&ctx);

        assert_eq!(record.impersonated_actor(), Some("bob@rpc"));
        assert_eq!(record.principal(), "O=Bank A,L=London,C=GB");
        assert!(record.owning_identity().is_none());
    }

    #[test]
    fn display_lists_present_fields_only() {
        let external = Trace::new_instance();
        let ctx = InvocationContext::shell()
            .external_trace(external.clone())
            .build();
        let display = AuditRecord::from_context(&ctx).to_string();

        assert!(display.starts_with("AuditRecord[origin=shell, principal=Shell User"));
        assert!(display.contains(&format!(
            "external_invocation_id={}",
            external.invocation_id().value()
        )));
        assert!(!display.contains("actor="));
        assert!(display.ends_with(']'));
    }

    #[test]
    fn record_serializes_flat() {
        let ctx = InvocationContext::shell().build();
        let value = serde_json::to_value(AuditRecord::from_context(&ctx)).unwrap();

        assert_eq!(value["origin"], "shell");
        assert_eq!(value["principal"], "Shell User");
        assert!(value["actor"].is_null());
    }

    #[test]
    fn emit_does_not_panic() {
        let ctx = InvocationContext::rpc(alice()).build();
        AuditRecord::from_context(&ctx).emit();
    }
}
