//! Behavioral check through the foreign-object bridge.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{CheckPass, ProbeCheck};
use crate::error::ProbeError;
use crate::ports::{BridgeExpr, ForeignBridgePort};

/// Evaluates a bridge expression and compares its string form to a literal.
pub struct BridgeValueCheck {
    bridge: Arc<dyn ForeignBridgePort>,
    expr: BridgeExpr,
    expected: String,
}

impl BridgeValueCheck {
    pub fn new(
        bridge: Arc<dyn ForeignBridgePort>,
        expr: BridgeExpr,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            bridge,
            expr,
            expected: expected.into(),
        }
    }
}

#[async_trait]
impl ProbeCheck for BridgeValueCheck {
    async fn check(&self) -> Result<CheckPass, ProbeError> {
        let actual = self.bridge.evaluate(&self.expr).await?;
        if actual == self.expected {
            Ok(CheckPass::Verified)
        } else {
            Err(ProbeError::mismatch("bridged value", &self.expected, actual))
        }
    }
}
