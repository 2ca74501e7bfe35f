use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Ledger unavailable at {endpoint}: {reason}")]
    Unavailable { endpoint: String, reason: String },

    #[error("Ledger rejected transaction: {reason}")]
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployReceipt {
    pub agent_id: u32,
    pub transaction_id: Uuid,
    pub contract_address: String,
    pub confirmed_at: DateTime<Utc>,
}

/// Port for the remote agent-registry contract. One call, no retries;
/// callers log the outcome.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn deploy_agent(&self, agent_id: u32) -> Result<DeployReceipt, LedgerError>;

    fn contract_address(&self) -> &str;
}
