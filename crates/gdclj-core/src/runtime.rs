use std::fmt;

use crate::descriptor::ClassName;

/// Failure reported by a runtime operation that did not complete.
///
/// A fault does not by itself mean an exception is pending; callers learn
/// that through [`ManagedRuntime::exception_pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFault(pub String);

impl RuntimeFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for RuntimeFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw cross-runtime operations on one embedded runtime instance.
///
/// Every method is a single call across the boundary. None of them inspects
/// the exception state afterwards; that is the job of
/// [`crate::check::guarded`], which must wrap each call.
pub trait ManagedRuntime {
    type Class;
    type StaticMethod: Copy;
    type Method: Copy;
    type Object;

    fn find_class(&mut self, name: &ClassName) -> Result<Self::Class, RuntimeFault>;

    fn static_method(
        &mut self,
        class: &Self::Class,
        name: &str,
        signature: &str,
    ) -> Result<Self::StaticMethod, RuntimeFault>;

    fn instance_method(
        &mut self,
        class: &Self::Class,
        name: &str,
        signature: &str,
    ) -> Result<Self::Method, RuntimeFault>;

    fn new_string(&mut self, value: &str) -> Result<Self::Object, RuntimeFault>;

    /// Box a 64-bit integer as the runtime's numeric object type.
    fn box_long(&mut self, value: i64) -> Result<Self::Object, RuntimeFault>;

    fn call_static(
        &mut self,
        class: &Self::Class,
        method: Self::StaticMethod,
        args: &[&Self::Object],
    ) -> Result<Self::Object, RuntimeFault>;

    fn call_method(
        &mut self,
        target: &Self::Object,
        method: Self::Method,
        args: &[&Self::Object],
    ) -> Result<Self::Object, RuntimeFault>;

    fn exception_pending(&mut self) -> bool;

    /// Print the pending exception to the process error stream.
    fn describe_exception(&mut self);
}
