use async_trait::async_trait;
use chrono::Utc;
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::domains::ledger::{DeployReceipt, LedgerClient, LedgerError};

/// Stand-in for the agent-registry contract. Without a wallet every call
/// fails as unreachable; `with_wallet` simulates a confirmed transaction.
pub struct MockLedgerClient {
    rpc_url: String,
    contract_address: String,
    wallet_connected: bool,
    latency: Duration,
}

impl MockLedgerClient {
    pub fn new(config: &LedgerConfig) -> Self {
        Self {
            rpc_url: config.rpc_url.clone(),
            contract_address: config.contract_address.clone(),
            wallet_connected: false,
            latency: Duration::from_millis(50),
        }
    }

    pub fn with_wallet(mut self) -> Self {
        self.wallet_connected = true;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl LedgerClient for MockLedgerClient {
    async fn deploy_agent(&self, agent_id: u32) -> Result<DeployReceipt, LedgerError> {
        sleep(self.latency).await;
        if !self.wallet_connected {
            return Err(LedgerError::Unavailable {
                endpoint: self.rpc_url.clone(),
                reason: "no wallet provider connected".to_string(),
            });
        }
        Ok(DeployReceipt {
            agent_id,
            transaction_id: Uuid::new_v4(),
            contract_address: self.contract_address.clone(),
            confirmed_at: Utc::now(),
        })
    }

    fn contract_address(&self) -> &str {
        &self.contract_address
    }
}
