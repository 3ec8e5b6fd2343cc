//! Module-loading port for the runtime under audit.

use async_trait::async_trait;
use thiserror::Error;

use super::process::ProcessError;

/// Why a module could not be loaded or a module function could not be called.
///
/// `NotFound` and `Broken` are deliberately distinct: an absent module
/// means the capability was never built, while a module that exists but
/// raises on load points at a corrupt build.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The identifier (or one of its parent packages) does not exist.
    #[error("module not found: {module}")]
    NotFound { module: String },

    /// The module exists but raised while loading.
    #[error("module {module} failed to load: {kind}: {message}")]
    Broken {
        module: String,
        kind: String,
        message: String,
    },

    /// A called function raised. `kind` is the qualified exception class.
    #[error("{kind}: {message}")]
    Raised { kind: String, message: String },

    /// The runtime answered with something that is not a valid reply.
    #[error("malformed reply from runtime: {0}")]
    Protocol(String),

    /// A module, function, or attribute name is not a valid identifier.
    #[error("invalid identifier: {0:?}")]
    InvalidName(String),

    /// The runtime could not be driven at all.
    #[error(transparent)]
    Transport(#[from] ProcessError),
}

impl LoadError {
    /// `"Kind: message"` for load and call failures, the display text otherwise.
    pub fn cause(&self) -> String {
        match self {
            Self::Broken { kind, message, .. } | Self::Raised { kind, message } => {
                format!("{kind}: {message}")
            }
            other => other.to_string(),
        }
    }
}

/// Port for loading modules of the packaged runtime and calling into them.
#[async_trait]
pub trait ModuleLoaderPort: Send + Sync {
    /// Attempt to load a module by its dotted identifier.
    async fn load(&self, module: &str) -> Result<(), LoadError>;

    /// Call a zero-argument function of a module and return its result
    /// rendered as JSON.
    async fn invoke(&self, module: &str, function: &str)
    -> Result<serde_json::Value, LoadError>;
}
