//! Existence-only check for capabilities that cannot be exercised safely.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CheckPass, ProbeCheck};
use crate::error::ProbeError;
use crate::ports::ModuleLoaderPort;

/// Checks only that a capability's entry point loads.
///
/// Passing yields [`CheckPass::Degraded`] carrying `reason`, so the
/// report records that the full behavioral assertion was not run.
pub struct DegradedImportCheck {
    loader: Arc<dyn ModuleLoaderPort>,
    module: String,
    reason: String,
}

impl DegradedImportCheck {
    pub fn new(
        loader: Arc<dyn ModuleLoaderPort>,
        module: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            module: module.into(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ProbeCheck for DegradedImportCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        self.loader.load(&self.module).await?;
        Ok(CheckPass::Degraded {
            reason: format!("only `{}` import checked: {}", self.module, self.reason),
        })
    }
}
