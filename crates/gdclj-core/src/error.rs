use thiserror::Error;

use crate::stage::Stage;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{variable} is not defined")]
    MissingConfiguration { variable: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("embedded runtime could not be created: {0}")]
    RuntimeCreation(String),

    #[error("resolution failed at {step}: {detail}")]
    Resolution { step: &'static str, detail: String },

    #[error("invocation failed at {step}: {detail}")]
    Invocation { step: &'static str, detail: String },

    #[error("no invoke method registered for arity {0}")]
    UnsupportedArity(usize),

    #[error("the embedded runtime was already bootstrapped in this process")]
    AlreadyBootstrapped,

    #[error("host interface error: {0}")]
    Host(String),
}

impl BridgeError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            BridgeError::MissingConfiguration { .. } => "missing_configuration",
            BridgeError::InvalidConfiguration(_) => "invalid_configuration",
            BridgeError::RuntimeCreation(_) => "runtime_creation",
            BridgeError::Resolution { .. } => "resolution_exception",
            BridgeError::Invocation { .. } => "invocation_exception",
            BridgeError::UnsupportedArity(_) => "unsupported_arity",
            BridgeError::AlreadyBootstrapped => "already_bootstrapped",
            BridgeError::Host(_) => "host",
        }
    }
}

/// A bootstrap failure together with the last stage that completed.
#[derive(Debug, Error)]
#[error("bootstrap failed after {reached}: {source}")]
pub struct BootstrapFailure {
    pub reached: Stage,
    #[source]
    pub source: BridgeError,
}

impl BootstrapFailure {
    pub fn new(reached: Stage, source: BridgeError) -> Self {
        Self { reached, source }
    }
}
