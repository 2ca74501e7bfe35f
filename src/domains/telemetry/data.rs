use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

pub const BLOCK_HISTORY: usize = 5;
pub const BASE_BLOCK_HEIGHT: u64 = 14_532_879;
pub const BASE_GAS_PRICE: u64 = 30;

/// Mocked ledger head, one per simulation tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSample {
    pub time: DateTime<Utc>,
    pub block_height: u64,
    pub gas_price: u64,
}

impl BlockSample {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            time: Utc::now(),
            block_height: BASE_BLOCK_HEIGHT + rng.gen_range(0..1000),
            gas_price: BASE_GAS_PRICE + rng.gen_range(0..10),
        }
    }
}

/// Per-agent data counters and the recent block samples.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    data_points: BTreeMap<u32, u64>,
    blocks: VecDeque<BlockSample>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the counters with this tick's samples: between 1 and 10 per
    /// listed agent. Agents not listed drop out.
    pub fn collect<R, I>(&mut self, agent_ids: I, rng: &mut R)
    where
        R: Rng + ?Sized,
        I: IntoIterator<Item = u32>,
    {
        self.data_points = agent_ids.into_iter().map(|id| (id, rng.gen_range(1..=10))).collect();
    }

    pub fn record_block(&mut self, sample: BlockSample) {
        if self.blocks.len() == BLOCK_HISTORY {
            self.blocks.pop_front();
        }
        self.blocks.push_back(sample);
    }

    pub fn data_points(&self, agent_id: u32) -> u64 {
        self.data_points.get(&agent_id).copied().unwrap_or(0)
    }

    pub fn all_data_points(&self) -> &BTreeMap<u32, u64> {
        &self.data_points
    }

    /// Oldest first.
    pub fn blocks(&self) -> impl Iterator<Item = &BlockSample> {
        self.blocks.iter()
    }

    pub fn latest_block(&self) -> Option<&BlockSample> {
        self.blocks.back()
    }

    pub fn clear(&mut self) {
        self.data_points.clear();
        self.blocks.clear();
    }
}
