use std::sync::OnceLock;

use gdclj_core::{BridgeError, RuntimeBootstrapper, RuntimeOptions};
use jni::{InitArgsBuilder, JNIVersion, JavaVM};

use crate::env::JvmRuntime;
use crate::error::JvmError;

/// The process-wide JVM. Set once, never destroyed.
static JVM: OnceLock<JavaVM> = OnceLock::new();

/// Starts the embedded JVM through the JNI invocation API.
#[derive(Debug, Default, Clone, Copy)]
pub struct JvmBootstrapper;

impl JvmBootstrapper {
    pub fn new() -> Self {
        Self
    }

    /// Whether a JVM has already been created by this process.
    pub fn is_running() -> bool {
        JVM.get().is_some()
    }

    fn start(options: &RuntimeOptions) -> Result<&'static JavaVM, JvmError> {
        if Self::is_running() {
            return Err(JvmError::AlreadyRunning);
        }

        let option_strings = options.option_strings();
        let mut builder = InitArgsBuilder::new()
            .version(JNIVersion::from(options.version))
            .ignore_unrecognized(options.ignore_unrecognized);
        for option in &option_strings {
            builder = builder.option(option.as_str());
        }
        let args = builder
            .build()
            .map_err(|e| JvmError::InvalidOptions(e.to_string()))?;

        let vm = JavaVM::new(args).map_err(|e| JvmError::StartFailed(e.to_string()))?;
        JVM.set(vm).map_err(|_| JvmError::AlreadyRunning)?;
        let vm = JVM.get().ok_or(JvmError::AlreadyRunning)?;

        tracing::info!(options = option_strings.len(), "JVM started");
        Ok(vm)
    }
}

impl RuntimeBootstrapper for JvmBootstrapper {
    type Runtime = JvmRuntime;

    fn create(&self, options: &RuntimeOptions) -> Result<JvmRuntime, BridgeError> {
        let vm = Self::start(options)?;
        let env = vm
            .attach_current_thread_permanently()
            .map_err(|e| JvmError::AttachFailed(e.to_string()))?;
        Ok(JvmRuntime::new(env))
    }
}
