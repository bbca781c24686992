use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::Violation;
use crate::identity::{Actor, LegalName, ScheduledStateRef};
use crate::logging::ContextLog;
use crate::origin::Origin;
use crate::principal::Principal;
use crate::state::{Direct, Impersonable, Unchecked};
use crate::trace::Trace;

/// Provenance and correlation data attached to one invocation.
///
/// An `InvocationContext` is an immutable snapshot built once, at the
/// boundary where the invocation is recognized, and passed along the call
/// chain until the invocation completes.
///
/// # Construction
///
/// Use the named constructor for the origin at hand. Each returns a
/// [`ContextBuilder`] pinned to that origin's actor conventions:
///
/// ```text
/// rpc(actor)                       actor duplicated from origin, may impersonate
/// peer(party)                      no actor, may impersonate
/// service(class_name, identity)    no actor, no impersonation
/// scheduled(state_ref)             no actor, no impersonation
/// shell()                          no actor, no impersonation
/// ```
///
/// [`new_instance`](Self::new_instance) is the general form; its `build()`
/// checks the supplied actors against the origin.
///
/// # Examples
///
/// ```
/// use invocation_context::{Actor, ActorId, AuthServiceId, InvocationContext, LegalName, Trace};
///
/// let owner = LegalName::new("O=Bank A,L=London,C=GB");
/// let alice = Actor::new(ActorId::new("alice"), AuthServiceId::new("rpc-users"), owner);
/// let upstream = Trace::new_instance();
///
/// let ctx = InvocationContext::rpc(alice.clone())
///     .external_trace(upstream.clone())
///     .build();
///
/// assert_eq!(ctx.actor(), Some(&alice));
/// assert_eq!(ctx.external_trace(), Some(&upstream));
/// assert_eq!(ctx.principal().name(), "alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContextRecord")]
pub struct InvocationContext {
    origin: Origin,
    trace: Trace,
    actor: Option<Actor>,
    external_trace: Option<Trace>,
    impersonated_actor: Option<Actor>,
}

impl InvocationContext {
    /// Starts a general context for any origin.
    ///
    /// `build()` fails if the actor or impersonated actor supplied does not
    /// fit the origin. Fields left unset stay absent, including the actor of
    /// an RPC origin; use [`rpc`](Self::rpc) to have it duplicated.
    pub fn new_instance(origin: Origin) -> ContextBuilder<Unchecked> {
        ContextBuilder::new(origin)
    }

    /// Starts a context for an RPC call made by `actor`.
    pub fn rpc(actor: Actor) -> ContextBuilder<Impersonable> {
        let mut builder = ContextBuilder::new(Origin::Rpc(actor.clone()));
        builder.actor = Some(actor);
        builder
    }

    /// Starts a context for a message received from the peer `party`.
    pub fn peer(party: LegalName) -> ContextBuilder<Impersonable> {
        ContextBuilder::new(Origin::Peer(party))
    }

    /// Starts a context for a call made by an internal service.
    pub fn service(
        service_class_name: impl Into<String>,
        owning_legal_identity: LegalName,
    ) -> ContextBuilder<Direct> {
        ContextBuilder::new(Origin::Service {
            service_class_name: service_class_name.into(),
            owning_legal_identity,
        })
    }

    /// Starts a context for a scheduled activity on `scheduled_state`.
    pub fn scheduled(scheduled_state: ScheduledStateRef) -> ContextBuilder<Direct> {
        ContextBuilder::new(Origin::Scheduled(scheduled_state))
    }

    /// Starts a context for a command entered in the node shell.
    pub fn shell() -> ContextBuilder<Direct> {
        ContextBuilder::new(Origin::Shell)
    }

    /// Returns how the invocation entered the system.
    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    /// Returns the correlation trace of this invocation.
    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Returns the initiating actor, present only for RPC origins.
    pub fn actor(&self) -> Option<&Actor> {
        self.actor.as_ref()
    }

    /// Returns the trace supplied by an external caller, if any.
    pub fn external_trace(&self) -> Option<&Trace> {
        self.external_trace.as_ref()
    }

    /// Returns the actor this invocation was made on behalf of, if any.
    ///
    /// For audit only. It never contributes to [`principal`](Self::principal).
    pub fn impersonated_actor(&self) -> Option<&Actor> {
        self.impersonated_actor.as_ref()
    }

    /// Derives the principal from the origin.
    pub fn principal(&self) -> Principal {
        self.origin.principal()
    }

    /// Returns a logger that tags every message with this context's trace and principal.
    pub fn log(&self) -> ContextLog<'_> {
        ContextLog::new(self)
    }

    /// Returns a copy of this context carrying a different external trace.
    pub fn with_external_trace(&self, external_trace: Trace) -> Self {
        Self {
            external_trace: Some(external_trace),
            ..self.clone()
        }
    }
}

/// Builder for an [`InvocationContext`].
///
/// The type parameter records the construction path; see [`crate::state`].
/// A trace left unset is generated fresh when the context is built.
#[derive(Debug, Clone)]
#[must_use = "a ContextBuilder does nothing until build() is called"]
pub struct ContextBuilder<S> {
    origin: Origin,
    trace: Option<Trace>,
    actor: Option<Actor>,
    external_trace: Option<Trace>,
    impersonated_actor: Option<Actor>,
    _state: PhantomData<S>,
}

// ============================================================================
// Shared methods (available on all construction paths)
// ============================================================================

impl<S> ContextBuilder<S> {
    fn new(origin: Origin) -> Self {
        Self {
            origin,
            trace: None,
            actor: None,
            external_trace: None,
            impersonated_actor: None,
            _state: PhantomData,
        }
    }

    /// Sets the correlation trace instead of generating a fresh one.
    pub fn trace(mut self, trace: Trace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Sets the trace supplied by an external caller.
    pub fn external_trace(mut self, external_trace: Trace) -> Self {
        self.external_trace = Some(external_trace);
        self
    }

    fn assemble(self) -> InvocationContext {
        let ctx = InvocationContext {
            origin: self.origin,
            trace: self.trace.unwrap_or_else(Trace::new_instance),
            actor: self.actor,
            external_trace: self.external_trace,
            impersonated_actor: self.impersonated_actor,
        };

        tracing::debug!(
            target: "invocation_context",
            origin = %ctx.origin.kind(),
            principal = %ctx.principal(),
            invocation_id = %ctx.trace.invocation_id(),
            session_id = %ctx.trace.session_id(),
            "invocation context created"
        );

        ctx
    }
}

// ============================================================================
// ContextBuilder<Impersonable> - rpc and peer
// ============================================================================

impl ContextBuilder<Impersonable> {
    /// Records the actor this invocation is made on behalf of.
    pub fn impersonating(mut self, actor: Actor) -> Self {
        self.impersonated_actor = Some(actor);
        self
    }

    /// Builds the context.
    pub fn build(self) -> InvocationContext {
        self.assemble()
    }
}

// ============================================================================
// ContextBuilder<Direct> - service, scheduled and shell
// ============================================================================

impl ContextBuilder<Direct> {
    /// Builds the context.
    pub fn build(self) -> InvocationContext {
        self.assemble()
    }
}

// ============================================================================
// ContextBuilder<Unchecked> - general construction
// ============================================================================

impl ContextBuilder<Unchecked> {
    /// Sets the top-level actor. Only valid for RPC origins.
    pub fn actor(mut self, actor: Actor) -> Self {
        self.actor = Some(actor);
        self
    }

    /// Records the actor this invocation is made on behalf of.
    /// Only valid for RPC and peer origins.
    pub fn impersonating(mut self, actor: Actor) -> Self {
        self.impersonated_actor = Some(actor);
        self
    }

    /// Builds the context after checking actors against the origin.
    ///
    /// # Errors
    ///
    /// Returns `Err(Violation)` with kind `InvalidContext` if an actor is
    /// set on a non-RPC origin, if it differs from the RPC origin's actor,
    /// or if an impersonated actor is set on a service, scheduled or shell
    /// origin.
    pub fn build(mut self) -> Result<InvocationContext, Violation> {
        match check_actors(&self.origin, self.actor.take(), self.impersonated_actor.as_ref()) {
            Ok(actor) => {
                self.actor = actor;
                Ok(self.assemble())
            }
            Err(violation) => {
                tracing::warn!(
                    target: "invocation_context",
                    origin = %self.origin.kind(),
                    %violation,
                    "rejected invocation context"
                );
                Err(violation)
            }
        }
    }
}

/// Checks actor pairing against the origin and returns the top-level actor to store.
fn check_actors(
    origin: &Origin,
    actor: Option<Actor>,
    impersonated_actor: Option<&Actor>,
) -> Result<Option<Actor>, Violation> {
    let kind = origin.kind();

    if impersonated_actor.is_some() && !kind.allows_impersonation() {
        return Err(Violation::invalid_context(
            kind,
            "impersonated actor not allowed for this origin",
        ));
    }

    match (kind.carries_actor(), actor) {
        (_, None) => Ok(None),
        (true, Some(actor)) if origin.actor() == Some(&actor) => Ok(Some(actor)),
        (true, Some(_)) => Err(Violation::invalid_context(
            kind,
            "actor differs from the RPC origin's actor",
        )),
        (false, Some(_)) => Err(Violation::invalid_context(
            kind,
            "actor is only carried by RPC origins",
        )),
    }
}

/// Wire form of [`InvocationContext`], checked before it becomes one.
#[derive(Deserialize)]
struct ContextRecord {
    origin: Origin,
    trace: Trace,
    #[serde(default)]
    actor: Option<Actor>,
    #[serde(default)]
    external_trace: Option<Trace>,
    #[serde(default)]
    impersonated_actor: Option<Actor>,
}

impl TryFrom<ContextRecord> for InvocationContext {
    type Error = Violation;

    fn try_from(record: ContextRecord) -> Result<Self, Self::Error> {
        let actor = check_actors(
            &record.origin,
            record.actor,
            record.impersonated_actor.as_ref(),
        )?;

        Ok(Self {
            origin: record.origin,
            trace: record.trace,
            actor,
            external_trace: record.external_trace,
            impersonated_actor: record.impersonated_actor,
        })
    }
}
