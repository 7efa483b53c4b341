use std::sync::atomic::{AtomicBool, Ordering};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::runtime::ManagedRuntime;

/// JNI version required from the embedded runtime (`JNI_VERSION_1_8`).
pub const REQUIRED_JNI_VERSION: i32 = 0x0001_0008;

/// Options for creating the embedded runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub classpath: String,
    pub extra_options: Vec<String>,
    pub version: i32,
    /// Unrecognized options are fatal unless this is set.
    pub ignore_unrecognized: bool,
}

impl RuntimeOptions {
    pub fn from_config(config: &BridgeConfig) -> Self {
        Self {
            classpath: config.classpath.clone(),
            extra_options: config.jvm.options.clone(),
            version: REQUIRED_JNI_VERSION,
            ignore_unrecognized: false,
        }
    }

    pub fn classpath_option(&self) -> String {
        format!("-Djava.class.path={}", self.classpath)
    }

    /// Option strings in the order they are handed to the runtime.
    pub fn option_strings(&self) -> Vec<String> {
        std::iter::once(self.classpath_option())
            .chain(self.extra_options.iter().cloned())
            .collect()
    }
}

/// Creates the process-wide embedded runtime.
pub trait RuntimeBootstrapper {
    type Runtime: ManagedRuntime;

    /// Create the runtime. Called at most once per process; failures are not
    /// retried.
    fn create(&self, options: &RuntimeOptions) -> Result<Self::Runtime, BridgeError>;
}

/// One-shot guard for runtime creation.
///
/// The runtime is never torn down, so a second creation attempt in the same
/// process is rejected before it reaches the runtime.
#[derive(Debug, Default)]
pub struct BootstrapLatch {
    taken: AtomicBool,
}

impl BootstrapLatch {
    pub const fn new() -> Self {
        Self {
            taken: AtomicBool::new(false),
        }
    }

    pub fn acquire(&self) -> Result<(), BridgeError> {
        self.taken
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| BridgeError::AlreadyBootstrapped)
    }

    pub fn is_taken(&self) -> bool {
        self.taken.load(Ordering::Acquire)
    }
}
