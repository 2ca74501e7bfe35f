use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domains::agent::AgentPatch;
use crate::domains::grid::Cell;

pub const AGENT_UPDATE: &str = "agentUpdate";
pub const GRID_UPDATE: &str = "gridUpdate";

/// Closed set of messages the network feed may deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InboundMessage {
    #[serde(rename_all = "camelCase")]
    AgentUpdate { agent_id: u32, update: AgentPatch },
    GridUpdate { grid: Vec<Vec<Cell>> },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("Malformed message: {0}")]
    Malformed(String),

    #[error("Unknown message type: {0}")]
    UnknownType(String),
}

impl InboundMessage {
    /// Decode one text frame. The `type` tag is checked before the payload so
    /// unknown kinds are reported separately from broken payloads.
    pub fn decode(raw: &str) -> Result<Self, DecodeError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let kind = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| DecodeError::Malformed("missing string field `type`".to_string()))?;
        if kind != AGENT_UPDATE && kind != GRID_UPDATE {
            return Err(DecodeError::UnknownType(kind.to_string()));
        }
        serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            InboundMessage::AgentUpdate { .. } => AGENT_UPDATE,
            InboundMessage::GridUpdate { .. } => GRID_UPDATE,
        }
    }
}

/// What happened to a frame handed to the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MessageOutcome {
    Applied { kind: String },
    Ignored { reason: String },
    Unknown { kind: String },
    Rejected { reason: String },
}

impl MessageOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, MessageOutcome::Applied { .. })
    }
}

impl From<DecodeError> for MessageOutcome {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::UnknownType(kind) => MessageOutcome::Unknown { kind },
            DecodeError::Malformed(reason) => MessageOutcome::Rejected { reason },
        }
    }
}
