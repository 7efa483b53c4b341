//! Runtime-agnostic bootstrap logic for handing a Godot extension over to
//! Clojure.
//!
//! The embedded runtime sits behind [`ManagedRuntime`]; the engine sits
//! behind [`Host`]. [`EntryDispatcher`] walks the bootstrap [`Stage`]s,
//! checking the runtime for a pending exception after every call and
//! stopping at the first failure.
//!
//! ```rust,ignore
//! use gdclj_core::{BootstrapLatch, EntryDispatcher, ProcessEnv};
//!
//! static LATCH: BootstrapLatch = BootstrapLatch::new();
//!
//! let dispatcher = EntryDispatcher::new(bootstrapper, &LATCH);
//! let report = dispatcher.run(&ProcessEnv, &mut host)?;
//! ```

pub mod bootstrap;
pub mod check;
pub mod config;
pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod glue;
pub mod host;
pub mod invoke;
pub mod runtime;
pub mod stage;

#[cfg(test)]
pub(crate) mod fake;

pub use bootstrap::{BootstrapLatch, RuntimeBootstrapper, RuntimeOptions};
pub use config::{BridgeConfig, EnvSource, ProcessEnv};
pub use dispatcher::{BootstrapReport, EntryDispatcher, PreflightReport};
pub use error::{BootstrapFailure, BridgeError};
pub use host::{Host, HostVersion, InitLevel, LifecycleHooks, NoopLifecycle};
pub use runtime::{ManagedRuntime, RuntimeFault};
pub use stage::Stage;
