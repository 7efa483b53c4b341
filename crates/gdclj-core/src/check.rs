//! Exception checks after cross-runtime calls.
//!
//! The embedded runtime never unwinds into native code. A failed call leaves
//! an exception pending on the runtime side and hands back whatever value it
//! had, so every call is followed by an explicit check. [`guarded`] pairs one
//! call with that check and turns the outcome into a `Result`, which lets a
//! sequence of calls short-circuit with `?`.

use crate::error::BridgeError;
use crate::runtime::{ManagedRuntime, RuntimeFault};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Abort,
}

/// Which error a failed call is reported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Resolution,
    Invocation,
}

impl CallKind {
    fn error(self, step: &'static str, detail: String) -> BridgeError {
        match self {
            CallKind::Resolution => BridgeError::Resolution { step, detail },
            CallKind::Invocation => BridgeError::Invocation { step, detail },
        }
    }
}

/// Inspect the pending-exception state after a call.
///
/// On a pending exception the runtime prints its own description to stderr.
/// The exception is not cleared here; after `Abort` the caller must not issue
/// further calls on this runtime.
pub fn check_pending<R: ManagedRuntime>(rt: &mut R, step: &'static str) -> Flow {
    if rt.exception_pending() {
        rt.describe_exception();
        tracing::error!(step, "Exception pending in embedded runtime");
        Flow::Abort
    } else {
        Flow::Continue
    }
}

/// Run one cross-runtime call and check for a pending exception right after.
pub fn guarded<R, T, F>(
    rt: &mut R,
    step: &'static str,
    kind: CallKind,
    op: F,
) -> Result<T, BridgeError>
where
    R: ManagedRuntime,
    F: FnOnce(&mut R) -> Result<T, RuntimeFault>,
{
    let result = op(rt);
    match check_pending(rt, step) {
        Flow::Abort => Err(kind.error(step, "exception raised in embedded runtime".into())),
        Flow::Continue => result.map_err(|fault| {
            tracing::error!(step, fault = %fault, "Cross-runtime call failed");
            kind.error(step, fault.0)
        }),
    }
}
