use std::fmt;

use crate::context::InvocationContext;

/// A logger bound to one invocation context.
///
/// `ContextLog` is obtained from [`InvocationContext::log`] and borrows the
/// context, so it cannot outlive it. Every message carries the invocation
/// id, session id and principal for correlation.
#[derive(Debug)]
pub struct ContextLog<'a> {
    ctx: &'a InvocationContext,
    principal: String,
}

impl<'a> ContextLog<'a> {
    pub(crate) fn new(ctx: &'a InvocationContext) -> Self {
        Self {
            ctx,
            principal: ctx.principal().name().to_string(),
        }
    }

    /// Returns the invocation id attached to every message.
    pub fn invocation_id(&self) -> &str {
        self.ctx.trace().invocation_id().value()
    }

    /// Logs an info-level message with correlation fields.
    ///
    /// Use with `format_args!` for efficient formatting:
    /// ```
    /// # use invocation_context::InvocationContext;
    /// let ctx = InvocationContext::shell().build();
    /// ctx.log().info(format_args!("running {}", "vaultQuery"));
    /// ```
    pub fn info(&self, args: fmt::Arguments<'_>) {
        tracing::info!(
            invocation_id = %self.invocation_id(),
            session_id = %self.ctx.trace().session_id(),
            principal = %self.principal,
            "{}",
            args
        );
    }

    /// Logs a warning-level message with correlation fields.
    pub fn warn(&self, args: fmt::Arguments<'_>) {
        tracing::warn!(
            invocation_id = %self.invocation_id(),
            session_id = %self.ctx.trace().session_id(),
            principal = %self.principal,
            "{}",
            args
        );
    }

    /// Logs an error-level message with correlation fields.
    pub fn error(&self, args: fmt::Arguments<'_>) {
        tracing::error!(
            invocation_id = %self.invocation_id(),
            session_id = %self.ctx.trace().session_id(),
            principal = %self.principal,
            "{}",
            args
        );
    }

    /// Logs a debug-level message with correlation fields.
    pub fn debug(&self, args: fmt::Arguments<'_>) {
        tracing::debug!(
            invocation_id = %self.invocation_id(),
            session_id = %self.ctx.trace().session_id(),
            principal = %self.principal,
            "{}",
            args
        );
    }
}
