//! Embedded JVM for gdclj.
//!
//! [`JvmBootstrapper`] creates the single process-wide `JavaVM` through the
//! JNI invocation API and hands out a [`JvmRuntime`] bound to the calling
//! thread. The VM lives until the process exits; JNI does not allow a second
//! VM to be created after one has been destroyed, so none is ever destroyed.

pub mod env;
pub mod error;
pub mod vm;

pub use env::{JvmClass, JvmObject, JvmRuntime};
pub use error::JvmError;
pub use vm::JvmBootstrapper;
