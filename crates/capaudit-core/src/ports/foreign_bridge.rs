//! Foreign-object bridging port.
//!
//! A [`BridgeExpr`] describes a chain of class lookups, message sends and
//! property reads against a foreign object system (Objective-C on Apple
//! platforms). Adapters translate the tree into whatever the runtime's
//! bridge understands and return the string rendering of the result.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::module_loader::LoadError;

/// Expression evaluated through a foreign-object bridge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BridgeExpr {
    /// Resolve a class by name.
    Class { name: String },
    /// A string literal.
    Str { value: String },
    /// Send a message with positional and keyword-style arguments.
    Send {
        receiver: Box<BridgeExpr>,
        method: String,
        args: Vec<BridgeExpr>,
        kwargs: Vec<(String, BridgeExpr)>,
    },
    /// Read a property.
    Property {
        receiver: Box<BridgeExpr>,
        name: String,
    },
}

impl BridgeExpr {
    /// Resolve a named class.
    pub fn class(name: impl Into<String>) -> Self {
        Self::Class { name: name.into() }
    }

    /// A string literal argument.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str {
            value: value.into(),
        }
    }

    /// Send `method` to this receiver with positional arguments.
    #[must_use]
    pub fn send(self, method: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Send {
            receiver: Box::new(self),
            method: method.into(),
            args,
            kwargs: Vec::new(),
        }
    }

    /// Send `method` with positional and keyword arguments.
    #[must_use]
    pub fn send_kw(
        self,
        method: impl Into<String>,
        args: Vec<Self>,
        kwargs: Vec<(&str, Self)>,
    ) -> Self {
        Self::Send {
            receiver: Box::new(self),
            method: method.into(),
            args,
            kwargs: kwargs
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        }
    }

    /// Read a property of this value.
    #[must_use]
    pub fn property(self, name: impl Into<String>) -> Self {
        Self::Property {
            receiver: Box::new(self),
            name: name.into(),
        }
    }

    /// Every class, method, keyword and property name in the tree.
    pub fn names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Class { name } => out.push(name),
            Self::Str { .. } => {}
            Self::Send {
                receiver,
                method,
                args,
                kwargs,
            } => {
                receiver.collect_names(out);
                out.push(method);
                for arg in args {
                    arg.collect_names(out);
                }
                for (key, value) in kwargs {
                    out.push(key);
                    value.collect_names(out);
                }
            }
            Self::Property { receiver, name } => {
                receiver.collect_names(out);
                out.push(name);
            }
        }
    }
}

/// Port for evaluating expressions through a foreign-object bridge.
#[async_trait]
pub trait ForeignBridgePort: Send + Sync {
    /// Evaluate the expression and return the string form of its value.
    async fn evaluate(&self, expr: &BridgeExpr) -> Result<String, LoadError>;
}
