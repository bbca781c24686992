//! Principal labels derived from invocation origins.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Principal name of invocations fired by the scheduler.
pub const SCHEDULER_PRINCIPAL: &str = "Scheduler";

/// Principal name of invocations entered through the node shell.
pub const SHELL_PRINCIPAL: &str = "Shell User";

/// A coarse identity label derived from an invocation's origin.
///
/// This is an advisory name used for permission lookups and audit, not a
/// verified credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    name: String,
}

impl Principal {
    /// Creates a principal with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the principal name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
