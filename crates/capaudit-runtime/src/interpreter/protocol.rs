//! Wire format between the adapter and the agent script.

use capaudit_core::{BridgeExpr, LoadError};
use serde::{Deserialize, Serialize};

/// One request, serialized into the agent's `argv[1]`.
#[derive(Debug, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Request<'a> {
    Load { module: &'a str },
    Invoke { module: &'a str, function: &'a str },
    Bridge { expr: &'a BridgeExpr },
}

/// The agent's reply, printed as the last line of stdout.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Reply {
    Ok {
        #[serde(default)]
        value: serde_json::Value,
    },
    Missing {
        module: String,
    },
    Broken {
        module: String,
        kind: String,
        message: String,
    },
    Raised {
        kind: String,
        message: String,
    },
}

impl Reply {
    /// Parse the last non-empty line of the agent's stdout.
    pub fn parse(stdout: &[u8]) -> Result<Self, LoadError> {
        let text = String::from_utf8_lossy(stdout);
        let line = text
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| LoadError::Protocol("empty reply".to_string()))?;
        serde_json::from_str(line.trim())
            .map_err(|e| LoadError::Protocol(format!("{e} in reply {line:?}")))
    }

    /// Split into the returned value or the load error it describes.
    pub fn into_result(self) -> Result<serde_json::Value, LoadError> {
        match self {
            Self::Ok { value } => Ok(value),
            Self::Missing { module } => Err(LoadError::NotFound { module }),
            Self::Broken {
                module,
                kind,
                message,
            } => Err(LoadError::Broken {
                module,
                kind,
                message,
            }),
            Self::Raised { kind, message } => Err(LoadError::Raised { kind, message }),
        }
    }
}
