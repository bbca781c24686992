//! Provenance and identity context for actions processed by a ledger node.
//!
//! Every invocation carries an [`InvocationContext`] recording:
//! - **Origin**: how the invocation entered the node (RPC, peer, service, scheduler, shell)
//! - **Actor**: who initiated it, relative to the service that authenticated them
//! - **Trace**: correlation ids linking related log entries, plus an optional external trace
//!
//! The [`Principal`] used for authorization is derived from the origin alone.
//! This crate does not authenticate, authorize, or persist anything.
//!
//! # Core Types
//!
//! - [`InvocationContext`]: immutable snapshot attached to one invocation
//! - [`Origin`]: closed set of entry points, each deriving a [`Principal`]
//! - [`Actor`]: initiating agent and the legal identity it acts for
//! - [`Trace`]: unique invocation and session ids with capture timestamps
//! - [`audit::AuditRecord`]: structured log projection of a context
//! - [`ContextLog`]: logger tagging messages with a context's correlation ids
//!
//! # Examples
//!
//! ```
//! use invocation_context::{InvocationContext, LegalName};
//!
//! let ctx = InvocationContext::service("com.example.Reporter", LegalName::new("O=Bank A,L=London,C=GB"))
//!     .build();
//!
//! assert_eq!(ctx.principal().name(), "com.example.Reporter");
//! assert!(ctx.actor().is_none());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
mod context;
mod error;
mod identity;
mod logging;
mod origin;
mod principal;
pub mod state;
mod trace;

pub use context::{ContextBuilder, InvocationContext};
pub use error::{Error, Violation, ViolationKind};
pub use identity::{Actor, ActorId, AuthServiceId, LegalName, ScheduledStateRef, SERVICE_AUTH_ID};
pub use logging::ContextLog;
pub use origin::{Origin, OriginKind};
pub use principal::{Principal, SCHEDULER_PRINCIPAL, SHELL_PRINCIPAL};
pub use trace::{InvocationId, SessionId, Trace};
