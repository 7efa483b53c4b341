use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::BridgeError;
use crate::host::InitLevel;

pub const CLASSPATH_VAR: &str = "CLASSPATH";
pub const CONFIG_PATH_VAR: &str = "GDCLJ_CONFIG";

/// Source of environment variables.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Effective bridge configuration.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    pub classpath: String,
    pub entry: EntryConfig,
    pub jvm: JvmConfig,
    pub host: HostConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default = "default_function")]
    pub function: String,
}

fn default_namespace() -> String {
    "godot-clojure.core".into()
}
fn default_function() -> String {
    "entry-point".into()
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            function: default_function(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JvmConfig {
    /// Extra options appended after the classpath option.
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostConfig {
    #[serde(default)]
    pub minimum_level: InitLevel,
}

/// Optional TOML overlay pointed to by `GDCLJ_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    entry: EntryConfig,
    #[serde(default)]
    jvm: JvmConfig,
    #[serde(default)]
    host: HostConfig,
}

impl FileConfig {
    fn from_file(path: &Path) -> Result<Self, BridgeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::InvalidConfiguration(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| {
            BridgeError::InvalidConfiguration(format!("failed to parse {}: {e}", path.display()))
        })
    }
}

impl BridgeConfig {
    /// Build the configuration. `CLASSPATH` must be set and non-empty.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, BridgeError> {
        let classpath = env
            .var(CLASSPATH_VAR)
            .filter(|cp| !cp.trim().is_empty())
            .ok_or(BridgeError::MissingConfiguration {
                variable: CLASSPATH_VAR,
            })?;

        let file = match env.var(CONFIG_PATH_VAR) {
            Some(path) => FileConfig::from_file(Path::new(&path))?,
            None => FileConfig::default(),
        };

        if file.entry.namespace.is_empty() || file.entry.function.is_empty() {
            return Err(BridgeError::InvalidConfiguration(
                "entry namespace and function must not be empty".into(),
            ));
        }

        Ok(Self {
            classpath,
            entry: file.entry,
            jvm: file.jvm,
            host: file.host,
        })
    }
}
