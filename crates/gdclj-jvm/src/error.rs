use gdclj_core::BridgeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JvmError {
    #[error("invalid JVM options: {0}")]
    InvalidOptions(String),

    #[error("JNI_CreateJavaVM failed: {0}")]
    StartFailed(String),

    #[error("failed to attach the current thread: {0}")]
    AttachFailed(String),

    #[error("a JVM is already running in this process")]
    AlreadyRunning,
}

impl From<JvmError> for BridgeError {
    fn from(err: JvmError) -> Self {
        match err {
            JvmError::AlreadyRunning => BridgeError::AlreadyBootstrapped,
            other => BridgeError::RuntimeCreation(other.to_string()),
        }
    }
}
