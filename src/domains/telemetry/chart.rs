use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::data::Telemetry;

/// One x-axis point of a line chart: a label and its named series values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRecord {
    pub label: String,
    pub values: BTreeMap<String, f64>,
}

impl ChartRecord {
    fn new(label: String, values: impl IntoIterator<Item = (&'static str, f64)>) -> Self {
        Self {
            label,
            values: values.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

/// Block height and gas price over time, oldest first.
pub fn block_chart(telemetry: &Telemetry) -> Vec<ChartRecord> {
    telemetry
        .blocks()
        .map(|block| {
            ChartRecord::new(
                block.time.format("%H:%M:%S").to_string(),
                [
                    ("block_height", block.block_height as f64),
                    ("gas_price", block.gas_price as f64),
                ],
            )
        })
        .collect()
}

/// Collected data points per agent, ordered by agent id.
pub fn data_point_chart(telemetry: &Telemetry) -> Vec<ChartRecord> {
    telemetry
        .all_data_points()
        .iter()
        .map(|(id, count)| ChartRecord::new(format!("Agent {}", id), [("data_points", *count as f64)]))
        .collect()
}
