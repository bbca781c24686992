//! Type-state markers for context builders.
//!
//! The marker on a [`ContextBuilder`](crate::ContextBuilder) records which
//! construction path produced it, and so which optional arguments it accepts
//! and whether `build()` can fail.
//!
//! Markers cannot be constructed outside this crate; they only ever appear
//! inside `PhantomData`:
//!
//! ```compile_fail
//! use invocation_context::state::Direct;
//!
//! let forged = Direct { _private: () };
//! ```

/// Marker for builders created by [`InvocationContext::rpc`](crate::InvocationContext::rpc)
/// and [`InvocationContext::peer`](crate::InvocationContext::peer).
///
/// These builders accept an impersonated actor.
#[derive(Debug, Clone, Copy)]
pub struct Impersonable {
    _private: (),
}

/// Marker for builders created by the service, scheduled and shell constructors.
///
/// These builders reject impersonation at compile time: there is no
/// `impersonating` method to call.
#[derive(Debug, Clone, Copy)]
pub struct Direct {
    _private: (),
}

/// Marker for the general builder returned by
/// [`InvocationContext::new_instance`](crate::InvocationContext::new_instance).
///
/// The caller supplies the actor and impersonated actor freely, so `build()`
/// checks them against the origin and may fail.
#[derive(Debug, Clone, Copy)]
pub struct Unchecked {
    _private: (),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_markers_are_zero_sized() {
        assert_eq!(std::mem::size_of::<Impersonable>(), 0);
        assert_eq!(std::mem::size_of::<Direct>(), 0);
        assert_eq!(std::mem::size_of::<Unchecked>(), 0);
    }
}
