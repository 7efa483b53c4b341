use crate::check::{CallKind, guarded};
use crate::descriptor::{CLOJURE_API, CLOJURE_IFN, ClassName, read_signature, var_signature};
use crate::error::BridgeError;
use crate::invoke::InvokeTable;
use crate::runtime::ManagedRuntime;

/// Arities of `IFn.invoke` resolved at bootstrap.
pub const INVOKE_ARITIES: &[usize] = &[1];

/// Cached class references and method ids for calling into Clojure.
///
/// Valid only for the lifetime of the runtime they were resolved on.
pub struct GlueRegistry<R: ManagedRuntime> {
    api_class: R::Class,
    var_method: R::StaticMethod,
    read_method: R::StaticMethod,
    ifn_class: R::Class,
    invokers: InvokeTable<R::Method>,
}

impl<R: ManagedRuntime> GlueRegistry<R> {
    /// Resolve every handle in order. The first failed lookup aborts.
    pub fn resolve(rt: &mut R) -> Result<Self, BridgeError> {
        let api_name = ClassName::new(CLOJURE_API);
        let api_class = guarded(rt, "api_class", CallKind::Resolution, |rt| {
            rt.find_class(&api_name)
        })?;

        let var_sig = var_signature();
        let var_method = guarded(rt, "var_method", CallKind::Resolution, |rt| {
            rt.static_method(&api_class, "var", &var_sig)
        })?;

        let read_sig = read_signature();
        let read_method = guarded(rt, "read_method", CallKind::Resolution, |rt| {
            rt.static_method(&api_class, "read", &read_sig)
        })?;

        let ifn_name = ClassName::new(CLOJURE_IFN);
        let ifn_class = guarded(rt, "ifn_class", CallKind::Resolution, |rt| {
            rt.find_class(&ifn_name)
        })?;

        let invokers = InvokeTable::resolve(rt, &ifn_class, INVOKE_ARITIES)?;

        tracing::debug!("Clojure glue resolved");

        Ok(Self {
            api_class,
            var_method,
            read_method,
            ifn_class,
            invokers,
        })
    }

    pub fn ifn_class(&self) -> &R::Class {
        &self.ifn_class
    }

    pub fn invokers(&self) -> &InvokeTable<R::Method> {
        &self.invokers
    }
}

/// The runtime handle plus its resolved glue, passed explicitly to every
/// helper that calls into Clojure.
pub struct BridgeContext<R: ManagedRuntime> {
    runtime: R,
    glue: GlueRegistry<R>,
}

impl<R: ManagedRuntime> BridgeContext<R> {
    pub fn build(mut runtime: R) -> Result<Self, BridgeError> {
        let glue = GlueRegistry::resolve(&mut runtime)?;
        Ok(Self { runtime, glue })
    }

    pub fn runtime(&mut self) -> &mut R {
        &mut self.runtime
    }

    pub fn glue(&self) -> &GlueRegistry<R> {
        &self.glue
    }

    /// `Clojure.var(ns, name)`
    pub fn resolve_symbol(
        &mut self,
        step: &'static str,
        ns: &str,
        name: &str,
    ) -> Result<R::Object, BridgeError> {
        let ns_obj = guarded(&mut self.runtime, step, CallKind::Resolution, |rt| {
            rt.new_string(ns)
        })?;
        let name_obj = guarded(&mut self.runtime, step, CallKind::Resolution, |rt| {
            rt.new_string(name)
        })?;
        let glue = &self.glue;
        guarded(&mut self.runtime, step, CallKind::Resolution, |rt| {
            rt.call_static(&glue.api_class, glue.var_method, &[&ns_obj, &name_obj])
        })
    }

    /// `Clojure.read(source)`
    pub fn read_literal(
        &mut self,
        step: &'static str,
        source: &str,
    ) -> Result<R::Object, BridgeError> {
        let source_obj = guarded(&mut self.runtime, step, CallKind::Resolution, |rt| {
            rt.new_string(source)
        })?;
        let glue = &self.glue;
        guarded(&mut self.runtime, step, CallKind::Resolution, |rt| {
            rt.call_static(&glue.api_class, glue.read_method, &[&source_obj])
        })
    }

    /// Box a host token as a runtime `Long`.
    pub fn box_token(&mut self, step: &'static str, token: i64) -> Result<R::Object, BridgeError> {
        guarded(&mut self.runtime, step, CallKind::Invocation, |rt| {
            rt.box_long(token)
        })
    }

    /// `IFn.invoke(args...)` for a registered arity.
    pub fn invoke(
        &mut self,
        step: &'static str,
        target: &R::Object,
        args: &[&R::Object],
    ) -> Result<R::Object, BridgeError> {
        let method = self.glue.invokers.get(args.len())?;
        guarded(&mut self.runtime, step, CallKind::Invocation, |rt| {
            rt.call_method(target, method, args)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{Call, FailPoint, FakeObject, FakeRuntime};

    #[test]
    fn resolves_in_declared_order() {
        let rt = FakeRuntime::new();
        let journal = rt.journal_handle();

        let ctx = BridgeContext::build(rt).unwrap();
        assert_eq!(ctx.glue().invokers().arities().collect::<Vec<_>>(), vec![1]);
        assert_eq!(ctx.glue().ifn_class(), "clojure.lang.IFn");

        let calls = journal.borrow().calls.clone();
        assert_eq!(
            calls,
            vec![
                Call::FindClass("clojure.java.api.Clojure".into()),
                Call::StaticMethod("var".into(), var_signature()),
                Call::StaticMethod("read".into(), read_signature()),
                Call::FindClass("clojure.lang.IFn".into()),
                Call::InstanceMethod(
                    "invoke".into(),
                    "(Ljava/lang/Object;)Ljava/lang/Object;".into()
                ),
            ]
        );
    }

    #[test]
    fn first_failure_stops_resolution() {
        let rt = FakeRuntime::failing_at(FailPoint::StaticMethod("read"));
        let journal = rt.journal_handle();

        let err = BridgeContext::build(rt).err().unwrap();
        assert!(matches!(err, BridgeError::Resolution { step: "read_method", .. }));

        let journal = journal.borrow();
        assert!(!journal.calls.iter().any(|c| matches!(c, Call::FindClass(n) if n == "clojure.lang.IFn")));
        assert_eq!(journal.describes, 1);
    }

    #[test]
    fn exception_raised_between_calls_fails_next_step() {
        let mut ctx = BridgeContext::build(FakeRuntime::new()).unwrap();

        ctx.runtime().raise("java.lang.IllegalStateException");
        let err = ctx.read_literal("namespace_literal", "my.ns").unwrap_err();

        assert!(matches!(
            err,
            BridgeError::Resolution { step: "namespace_literal", .. }
        ));
        assert!(ctx.runtime().exception_pending());
    }

    #[test]
    fn invoke_rejects_unregistered_arity() {
        let rt = FakeRuntime::new();
        let journal = rt.journal_handle();
        let mut ctx = BridgeContext::build(rt).unwrap();

        let f = ctx.resolve_symbol("f", "clojure.core", "str").unwrap();
        let a = ctx.read_literal("a", "a").unwrap();
        let before = journal.borrow().calls.len();

        let err = ctx.invoke("call", &f, &[&a, &a]).unwrap_err();
        assert!(matches!(err, BridgeError::UnsupportedArity(2)));
        assert_eq!(journal.borrow().calls.len(), before);
    }

    #[test]
    fn resolve_symbol_yields_var() {
        let mut ctx = BridgeContext::build(FakeRuntime::new()).unwrap();
        let var = ctx.resolve_symbol("entry", "my.ns", "start").unwrap();
        assert_eq!(
            var,
            FakeObject::Var {
                ns: "my.ns".into(),
                name: "start".into()
            }
        );
    }
}
