use std::fmt;

use serde::Deserialize;

use crate::error::BridgeError;

/// GDExtension initialization levels, in the order the engine runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitLevel {
    Core,
    Servers,
    #[default]
    Scene,
    Editor,
}

impl InitLevel {
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(InitLevel::Core),
            1 => Some(InitLevel::Servers),
            2 => Some(InitLevel::Scene),
            3 => Some(InitLevel::Editor),
            _ => None,
        }
    }

    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for InitLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitLevel::Core => write!(f, "core"),
            InitLevel::Servers => write!(f, "servers"),
            InitLevel::Scene => write!(f, "scene"),
            InitLevel::Editor => write!(f, "editor"),
        }
    }
}

/// Engine version as reported by `get_godot_version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub display: String,
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Godot Version info:")?;
        writeln!(f, "  major: {}", self.major)?;
        writeln!(f, "  minor: {}", self.minor)?;
        writeln!(f, "  patch: {}", self.patch)?;
        write!(f, "  str: {}", self.display)
    }
}

/// Callbacks the engine runs at each initialization level.
///
/// The engine calls both slots unconditionally, so an implementation must
/// exist even when there is nothing to do.
pub trait LifecycleHooks: Sync {
    fn initialize(&self, level: InitLevel);
    fn deinitialize(&self, level: InitLevel);
}

/// Hooks that do nothing at any level.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLifecycle;

impl LifecycleHooks for NoopLifecycle {
    fn initialize(&self, _level: InitLevel) {}

    fn deinitialize(&self, _level: InitLevel) {}
}

/// What the dispatcher needs from the host engine.
pub trait Host {
    /// Opaque capability token handed to the Clojure entry point.
    fn capability_token(&self) -> i64;

    /// Engine version, if the host exposes it.
    fn version(&self) -> Option<HostVersion>;

    /// Fill the host's lifecycle slots. Both slots must end up callable.
    fn register_lifecycle(
        &mut self,
        minimum_level: InitLevel,
        hooks: &'static dyn LifecycleHooks,
    ) -> Result<(), BridgeError>;
}
