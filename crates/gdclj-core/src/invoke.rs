use std::collections::BTreeMap;

use crate::check::{CallKind, guarded};
use crate::descriptor::invoke_signature;
use crate::error::BridgeError;
use crate::runtime::ManagedRuntime;

/// `IFn.invoke` method ids keyed by argument count.
///
/// `IFn` declares fixed overloads for 0 through 20 arguments plus a variadic
/// tail; only the arities registered here can be called.
#[derive(Debug, Clone)]
pub struct InvokeTable<M> {
    slots: BTreeMap<usize, M>,
}

impl<M: Copy> InvokeTable<M> {
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// Resolve `invoke` for each requested arity on `class`, checking after
    /// every lookup.
    pub fn resolve<R>(
        rt: &mut R,
        class: &R::Class,
        arities: &[usize],
    ) -> Result<Self, BridgeError>
    where
        R: ManagedRuntime<Method = M>,
    {
        let mut table = Self::new();
        for &arity in arities {
            let signature = invoke_signature(arity);
            let method = guarded(rt, "invoke", CallKind::Resolution, |rt| {
                rt.instance_method(class, "invoke", &signature)
            })?;
            tracing::debug!(arity, signature, "Resolved IFn.invoke");
            table.register(arity, method);
        }
        Ok(table)
    }

    pub fn register(&mut self, arity: usize, method: M) {
        self.slots.insert(arity, method);
    }

    pub fn get(&self, arity: usize) -> Result<M, BridgeError> {
        self.slots
            .get(&arity)
            .copied()
            .ok_or(BridgeError::UnsupportedArity(arity))
    }

    pub fn arities(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.keys().copied()
    }
}

impl<M: Copy> Default for InvokeTable<M> {
    fn default() -> Self {
        Self::new()
    }
}
