//! JVM type descriptors and method signature strings.
//!
//! The JVM resolves overloaded members by a textual signature such as
//! `(Ljava/lang/String;)Ljava/lang/Object;`. Parameter descriptors are
//! concatenated inside parentheses and followed directly by the return
//! descriptor, with no separators anywhere.

use std::fmt;

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";
pub const LONG: &str = "java.lang.Long";
pub const CLOJURE_API: &str = "clojure.java.api.Clojure";
pub const CLOJURE_IFN: &str = "clojure.lang.IFn";

/// A fully-qualified class name, stored in dotted form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName(String);

impl ClassName {
    pub fn new(dotted: impl Into<String>) -> Self {
        Self(dotted.into())
    }

    pub fn dotted(&self) -> &str {
        &self.0
    }

    /// Slash-separated form expected by `FindClass`.
    pub fn internal(&self) -> String {
        self.0.replace('.', "/")
    }

    /// Reference descriptor, e.g. `Ljava/lang/Object;`.
    pub fn descriptor(&self) -> String {
        format!("L{};", self.internal())
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClassName {
    fn from(dotted: &str) -> Self {
        Self::new(dotted)
    }
}

/// A type that can appear in a method signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    Class(ClassName),
    Long,
    Int,
    Void,
}

impl JavaType {
    pub fn class(dotted: &str) -> Self {
        JavaType::Class(ClassName::new(dotted))
    }

    pub fn descriptor(&self) -> String {
        match self {
            JavaType::Class(name) => name.descriptor(),
            JavaType::Long => "J".into(),
            JavaType::Int => "I".into(),
            JavaType::Void => "V".into(),
        }
    }
}

/// Build `(<params>)<ret>` from parameter and return types.
pub fn method_signature(params: &[JavaType], ret: &JavaType) -> String {
    let mut sig = String::from("(");
    for param in params {
        sig.push_str(&param.descriptor());
    }
    sig.push(')');
    sig.push_str(&ret.descriptor());
    sig
}

/// `Clojure.var(Object, Object) -> IFn`
pub fn var_signature() -> String {
    method_signature(
        &[JavaType::class(OBJECT), JavaType::class(OBJECT)],
        &JavaType::class(CLOJURE_IFN),
    )
}

/// `Clojure.read(String) -> Object`
pub fn read_signature() -> String {
    method_signature(&[JavaType::class(STRING)], &JavaType::class(OBJECT))
}

/// `IFn.invoke(Object) -> Object`
pub fn invoke1_signature() -> String {
    invoke_signature(1)
}

/// `IFn.invoke` with `arity` object parameters.
pub fn invoke_signature(arity: usize) -> String {
    let params = vec![JavaType::class(OBJECT); arity];
    method_signature(&params, &JavaType::class(OBJECT))
}

/// `Long.valueOf(long) -> Long`, used to box the capability pointer.
pub fn long_value_of_signature() -> String {
    method_signature(&[JavaType::Long], &JavaType::class(LONG))
}
