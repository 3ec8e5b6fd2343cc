//! Module-presence check.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{CheckPass, ProbeCheck};
use crate::error::ProbeError;
use crate::ports::{LoadError, ModuleLoaderPort};

/// Passes only if every identifier loads.
///
/// All identifiers are attempted before failing, so a single run names
/// every missing module. Modules that exist but fail to load are
/// reported separately from missing ones.
pub struct ModulePresenceCheck {
    loader: Arc<dyn ModuleLoaderPort>,
    modules: Vec<String>,
}

impl ModulePresenceCheck {
    pub fn new<I, S>(loader: Arc<dyn ModuleLoaderPort>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            loader,
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl ProbeCheck for ModulePresenceCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        let mut missing = Vec::new();
        let mut broken = Vec::new();

        for module in &self.modules {
            match self.loader.load(module).await {
                Ok(()) => debug!(module = %module, "module loaded"),
                Err(LoadError::NotFound { .. }) => missing.push(module.clone()),
                Err(LoadError::Transport(err)) => return Err(err.into()),
                Err(other) => broken.push((module.clone(), other.cause())),
            }
        }

        if !broken.is_empty() {
            return Err(ProbeError::BrokenModules { broken, missing });
        }
        if !missing.is_empty() {
            return Err(ProbeError::ModuleMissing { modules: missing });
        }
        Ok(CheckPass::Verified)
    }
}
