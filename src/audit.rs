//! Structured audit records for invocation contexts.
//!
//! This module provides:
//! - `AuditRecord`: flat, owned projection of an `InvocationContext`
//! - `AuditRecord::emit`: writes the record through `tracing`
//!
//! Records report the impersonated actor alongside the principal but never
//! derive the principal from it.

mod record;

pub use record::AuditRecord;
