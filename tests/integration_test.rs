use chrono::{TimeZone, Utc};
use invocation_context::audit::AuditRecord;
use invocation_context::{
    Actor, ActorId, AuthServiceId, Error, InvocationContext, LegalName, Origin, OriginKind,
    ScheduledStateRef, Trace, ViolationKind,
};

fn bank_a() -> LegalName {
    LegalName::new("O=Bank A,L=London,C=GB")
}

fn alice() -> Actor {
    Actor::new(ActorId::new("alice"), AuthServiceId::new("rpc-users"), bank_a())
}

fn state_ref() -> ScheduledStateRef {
    ScheduledStateRef::new("ABCDEF", 2, Utc.timestamp_opt(1_700_000_000, 0).unwrap())
}

#[test]
fn every_constructor_derives_expected_principal() {
    let cases = [
        (InvocationContext::rpc(alice()).build(), "alice"),
        (
            InvocationContext::peer(bank_a()).build(),
            "O=Bank A,L=London,C=GB",
        ),
        (
            InvocationContext::service("com.foo.Bar", bank_a()).build(),
            "com.foo.Bar",
        ),
        (InvocationContext::scheduled(state_ref()).build(), "Scheduler"),
        (InvocationContext::shell().build(), "Shell User"),
    ];

    for (ctx, expected) in cases {
        assert_eq!(ctx.principal().name(), expected);
        assert_eq!(ctx.principal(), ctx.origin().principal());
    }
}

#[test]
fn only_rpc_contexts_carry_an_actor() {
    assert!(InvocationContext::rpc(alice()).build().actor().is_some());
    assert!(InvocationContext::peer(bank_a()).build().actor().is_none());
    assert!(InvocationContext::service("com.foo.Bar", bank_a())
        .build()
        .actor()
        .is_none());
    assert!(InvocationContext::scheduled(state_ref())
        .build()
        .actor()
        .is_none());
    assert!(InvocationContext::shell().build().actor().is_none());
}

#[test]
fn service_actor_attribution() {
    let actor = Actor::service("com.foo.Bar", bank_a());
    let ctx = InvocationContext::rpc(actor.clone()).build();

    assert_eq!(ctx.principal().name(), "com.foo.Bar");
    assert_eq!(ctx.actor().map(|a| a.service_id().value()), Some("SERVICE"));
}

#[test]
fn general_constructor_leaves_unset_fields_absent() {
    let trace = Trace::new_instance();
    let ctx = InvocationContext::new_instance(Origin::Rpc(alice()))
        .trace(trace.clone())
        .build()
        .unwrap();

    assert!(ctx.actor().is_none());
    assert!(ctx.external_trace().is_none());
    assert!(ctx.impersonated_actor().is_none());
    assert_eq!(ctx.trace(), &trace);

    let json = serde_json::to_string(&ctx).unwrap();
    let back: InvocationContext = serde_json::from_str(&json).unwrap();
    assert!(back.actor().is_none());
    assert_eq!(back, ctx);
}

#[test]
fn general_constructor_rejects_inconsistent_actor() {
    let err: Error = InvocationContext::new_instance(Origin::Shell)
        .actor(alice())
        .build()
        .unwrap_err()
        .into();

    let Error::Violation(violation) = err;
    assert_eq!(
        violation.kind,
        ViolationKind::InvalidContext {
            origin: OriginKind::Shell
        }
    );
}

#[test]
fn context_round_trips_through_json() {
    let contexts = [
        InvocationContext::rpc(alice())
            .external_trace(Trace::new_instance())
            .build(),
        InvocationContext::peer(bank_a()).impersonating(alice()).build(),
        InvocationContext::service("com.foo.Bar", bank_a()).build(),
        InvocationContext::scheduled(state_ref()).build(),
        InvocationContext::shell().build(),
    ];

    for ctx in contexts {
        let json = serde_json::to_string(&ctx).unwrap();
        let back: InvocationContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ctx);
        assert_eq!(back.principal(), ctx.principal());
    }
}

#[test]
fn contexts_are_shareable_across_threads() {
    let ctx = std::sync::Arc::new(InvocationContext::rpc(alice()).build());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let ctx = std::sync::Arc::clone(&ctx);
            std::thread::spawn(move || ctx.principal().name().to_string())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "alice");
    }
}

#[test]
fn audit_and_logging_flow() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();

    let ctx = InvocationContext::rpc(alice())
        .impersonating(Actor::new(
            ActorId::new("bob"),
            AuthServiceId::new("rpc-users"),
            bank_a(),
        ))
        .build();

    ctx.log().info(format_args!("starting flow"));

    let record = AuditRecord::from_context(&ctx);
    record.emit();

    assert_eq!(record.principal(), "alice");
    assert_eq!(record.impersonated_actor(), Some("bob@rpc-users"));
}
