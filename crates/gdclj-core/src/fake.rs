//! Scripted in-memory runtime, host and bootstrapper for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::bootstrap::{RuntimeBootstrapper, RuntimeOptions};
use crate::descriptor::ClassName;
use crate::error::BridgeError;
use crate::host::{Host, HostVersion, InitLevel, LifecycleHooks};
use crate::runtime::{ManagedRuntime, RuntimeFault};

const KNOWN_CLASSES: &[&str] = &[
    "clojure.java.api.Clojure",
    "clojure.lang.IFn",
    "java.lang.Object",
    "java.lang.String",
    "java.lang.Long",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    FindClass(String),
    StaticMethod(String, String),
    InstanceMethod(String, String),
    NewString(String),
    BoxLong(i64),
    CallStatic(String),
    Invoke {
        target: FakeObject,
        args: Vec<FakeObject>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeObject {
    Str(String),
    Long(i64),
    Symbol(String),
    Var { ns: String, name: String },
    Nil,
}

/// Where the fake runtime raises an exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    FindClass(&'static str),
    StaticMethod(&'static str),
    InstanceMethod(&'static str),
    /// `Clojure.var(_, name)`
    Var(&'static str),
    Read,
    Require,
    Entry,
    BoxLong,
}

#[derive(Debug, Default)]
pub struct Journal {
    pub calls: Vec<Call>,
    pub describes: usize,
    pub calls_while_pending: usize,
    pub loaded: Vec<String>,
    pub entry_args: Vec<i64>,
}

pub struct FakeRuntime {
    journal: Rc<RefCell<Journal>>,
    fail_at: Option<FailPoint>,
    pending: Option<String>,
    loadable: Vec<String>,
    methods: Vec<String>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self {
            journal: Rc::new(RefCell::new(Journal::default())),
            fail_at: None,
            pending: None,
            loadable: vec!["godot-clojure.core".into()],
            methods: Vec::new(),
        }
    }

    pub fn failing_at(point: FailPoint) -> Self {
        let mut rt = Self::new();
        rt.fail_at = Some(point);
        rt
    }

    pub fn with_loadable(mut self, ns: &str) -> Self {
        self.loadable.push(ns.into());
        self
    }

    pub fn journal(&self) -> std::cell::Ref<'_, Journal> {
        self.journal.borrow()
    }

    pub fn journal_handle(&self) -> Rc<RefCell<Journal>> {
        Rc::clone(&self.journal)
    }

    pub fn raise(&mut self, exception: &str) {
        self.pending = Some(exception.into());
    }

    fn record(&mut self, call: Call) {
        let mut journal = self.journal.borrow_mut();
        if self.pending.is_some() {
            journal.calls_while_pending += 1;
        }
        journal.calls.push(call);
    }

    fn fail(&mut self, exception: &str) -> RuntimeFault {
        self.raise(exception);
        RuntimeFault::new(exception)
    }

    fn method_id(&mut self, name: &str) -> usize {
        self.methods.push(name.into());
        self.methods.len() - 1
    }

    fn text(obj: &FakeObject) -> String {
        match obj {
            FakeObject::Str(s) | FakeObject::Symbol(s) => s.clone(),
            other => format!("{other:?}"),
        }
    }
}

impl ManagedRuntime for FakeRuntime {
    type Class = String;
    type StaticMethod = usize;
    type Method = usize;
    type Object = FakeObject;

    fn find_class(&mut self, name: &ClassName) -> Result<String, RuntimeFault> {
        self.record(Call::FindClass(name.dotted().into()));
        if matches!(self.fail_at, Some(FailPoint::FindClass(n)) if n == name.dotted()) {
            return Err(self.fail("java.lang.NoClassDefFoundError"));
        }
        if !KNOWN_CLASSES.contains(&name.dotted()) {
            return Err(self.fail("java.lang.ClassNotFoundException"));
        }
        Ok(name.dotted().into())
    }

    fn static_method(
        &mut self,
        _class: &String,
        name: &str,
        signature: &str,
    ) -> Result<usize, RuntimeFault> {
        self.record(Call::StaticMethod(name.into(), signature.into()));
        if matches!(self.fail_at, Some(FailPoint::StaticMethod(n)) if n == name) {
            return Err(self.fail("java.lang.NoSuchMethodError"));
        }
        Ok(self.method_id(name))
    }

    fn instance_method(
        &mut self,
        _class: &String,
        name: &str,
        signature: &str,
    ) -> Result<usize, RuntimeFault> {
        self.record(Call::InstanceMethod(name.into(), signature.into()));
        if matches!(self.fail_at, Some(FailPoint::InstanceMethod(n)) if n == name) {
            return Err(self.fail("java.lang.NoSuchMethodError"));
        }
        Ok(self.method_id(name))
    }

    fn new_string(&mut self, value: &str) -> Result<FakeObject, RuntimeFault> {
        self.record(Call::NewString(value.into()));
        Ok(FakeObject::Str(value.into()))
    }

    fn box_long(&mut self, value: i64) -> Result<FakeObject, RuntimeFault> {
        self.record(Call::BoxLong(value));
        if self.fail_at == Some(FailPoint::BoxLong) {
            return Err(self.fail("java.lang.OutOfMemoryError"));
        }
        Ok(FakeObject::Long(value))
    }

    fn call_static(
        &mut self,
        _class: &String,
        method: usize,
        args: &[&FakeObject],
    ) -> Result<FakeObject, RuntimeFault> {
        let name = self.methods[method].clone();
        self.record(Call::CallStatic(name.clone()));
        match name.as_str() {
            "var" => {
                let ns = Self::text(args[0]);
                let sym = Self::text(args[1]);
                if matches!(self.fail_at, Some(FailPoint::Var(n)) if n == sym) {
                    return Err(self.fail("java.lang.IllegalArgumentException"));
                }
                Ok(FakeObject::Var { ns, name: sym })
            }
            "read" => {
                if self.fail_at == Some(FailPoint::Read) {
                    return Err(self.fail("clojure.lang.LispReader$ReaderException"));
                }
                Ok(FakeObject::Symbol(Self::text(args[0])))
            }
            other => Err(RuntimeFault::new(format!("unknown static method {other}"))),
        }
    }

    fn call_method(
        &mut self,
        target: &FakeObject,
        _method: usize,
        args: &[&FakeObject],
    ) -> Result<FakeObject, RuntimeFault> {
        self.record(Call::Invoke {
            target: target.clone(),
            args: args.iter().map(|a| (*a).clone()).collect(),
        });
        let FakeObject::Var { ns, name } = target else {
            return Err(self.fail("java.lang.ClassCastException"));
        };

        if ns == "clojure.core" && name == "require" {
            if self.fail_at == Some(FailPoint::Require) {
                return Err(self.fail("java.lang.RuntimeException"));
            }
            let wanted = Self::text(args[0]);
            if !self.loadable.contains(&wanted) {
                return Err(self.fail("java.io.FileNotFoundException"));
            }
            self.journal.borrow_mut().loaded.push(wanted);
            return Ok(FakeObject::Nil);
        }

        if self.fail_at == Some(FailPoint::Entry) {
            return Err(self.fail("clojure.lang.ExceptionInfo"));
        }
        if !self.journal.borrow().loaded.contains(ns) {
            return Err(self.fail("java.lang.IllegalStateException: Attempting to call unbound fn"));
        }
        if let Some(FakeObject::Long(v)) = args.first() {
            self.journal.borrow_mut().entry_args.push(*v);
        }
        Ok(FakeObject::Nil)
    }

    fn exception_pending(&mut self) -> bool {
        self.pending.is_some()
    }

    fn describe_exception(&mut self) {
        self.journal.borrow_mut().describes += 1;
    }
}

/// Bootstrapper handing out one prepared [`FakeRuntime`].
pub struct FakeBootstrapper {
    runtime: RefCell<Option<FakeRuntime>>,
    pub creations: Cell<usize>,
    pub options_seen: RefCell<Vec<RuntimeOptions>>,
    fail_creation: bool,
}

impl FakeBootstrapper {
    pub fn new(runtime: FakeRuntime) -> Self {
        Self {
            runtime: RefCell::new(Some(runtime)),
            creations: Cell::new(0),
            options_seen: RefCell::new(Vec::new()),
            fail_creation: false,
        }
    }

    pub fn failing() -> Self {
        let mut b = Self::new(FakeRuntime::new());
        b.fail_creation = true;
        b
    }
}

impl RuntimeBootstrapper for FakeBootstrapper {
    type Runtime = FakeRuntime;

    fn create(&self, options: &RuntimeOptions) -> Result<FakeRuntime, BridgeError> {
        self.creations.set(self.creations.get() + 1);
        self.options_seen.borrow_mut().push(options.clone());
        if self.fail_creation {
            return Err(BridgeError::RuntimeCreation("JNI_CreateJavaVM returned -1".into()));
        }
        self.runtime
            .borrow_mut()
            .take()
            .ok_or(BridgeError::AlreadyBootstrapped)
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub token: i64,
    pub version: Option<HostVersion>,
    pub hooks: Option<&'static dyn LifecycleHooks>,
    pub minimum_level: Option<InitLevel>,
}

impl Host for FakeHost {
    fn capability_token(&self) -> i64 {
        self.token
    }

    fn version(&self) -> Option<HostVersion> {
        self.version.clone()
    }

    fn register_lifecycle(
        &mut self,
        minimum_level: InitLevel,
        hooks: &'static dyn LifecycleHooks,
    ) -> Result<(), BridgeError> {
        self.minimum_level = Some(minimum_level);
        self.hooks = Some(hooks);
        Ok(())
    }
}
