//! Behavioral checks that call a function of a loaded module.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{CheckPass, ProbeCheck};
use crate::error::ProbeError;
use crate::ports::{LoadError, ModuleLoaderPort};

/// Calls `module.function()` and asserts the result has a given field.
pub struct InvokeFieldCheck {
    loader: Arc<dyn ModuleLoaderPort>,
    module: String,
    function: String,
    field: String,
}

impl InvokeFieldCheck {
    pub fn new(
        loader: Arc<dyn ModuleLoaderPort>,
        module: impl Into<String>,
        function: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            module: module.into(),
            function: function.into(),
            field: field.into(),
        }
    }
}

#[async_trait]
impl ProbeCheck for InvokeFieldCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        let value = self.loader.invoke(&self.module, &self.function).await?;
        let has_field = value
            .as_object()
            .is_some_and(|fields| fields.contains_key(&self.field));
        if has_field {
            Ok(CheckPass::Verified)
        } else {
            Err(ProbeError::mismatch(
                format!("{}.{}()", self.module, self.function),
                format!("object with field `{}`", self.field),
                value.to_string(),
            ))
        }
    }
}

/// Calls `module.function()`; returning normally passes.
///
/// Exceptions whose qualified class is listed in `tolerated` also pass:
/// they are the documented signal that the capability is compiled in but
/// cannot be exercised further in a headless environment. Any other
/// exception is reported verbatim.
pub struct InvokeCheck {
    loader: Arc<dyn ModuleLoaderPort>,
    module: String,
    function: String,
    tolerated: Vec<String>,
}

impl InvokeCheck {
    pub fn new(
        loader: Arc<dyn ModuleLoaderPort>,
        module: impl Into<String>,
        function: impl Into<String>,
    ) -> Self {
        Self {
            loader,
            module: module.into(),
            function: function.into(),
            tolerated: Vec::new(),
        }
    }

    /// Treat an exception class as a harmless "capability present" signal.
    #[must_use]
    pub fn tolerating(mut self, exception: impl Into<String>) -> Self {
        self.tolerated.push(exception.into());
        self
    }
}

#[async_trait]
impl ProbeCheck for InvokeCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        match self.loader.invoke(&self.module, &self.function).await {
            Ok(_) => Ok(CheckPass::Verified),
            Err(LoadError::Raised { kind, message }) if self.tolerated.contains(&kind) => {
                debug!(
                    module = %self.module,
                    function = %self.function,
                    exception = %kind,
                    "tolerated exception: {message}"
                );
                Ok(CheckPass::Verified)
            }
            Err(err) => Err(err.into()),
        }
    }
}
