use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::GridCoord;
use crate::common::{DomainError, DomainResult};

pub const DEFAULT_OBSTACLE_PROBABILITY: f64 = 0.2;

/// Clamp into `0.0..=1.0`. Non-finite values fall back to the default.
pub fn sanitize_probability(p: f64) -> f64 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        DEFAULT_OBSTACLE_PROBABILITY
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    pub has_obstacle: bool,
    pub has_agent: bool,
}

/// Square grid, indexed `cells[y][x]`. Obstacles are fixed at creation;
/// agent flags are derived and rebuilt through `with_agents`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn generate<R: Rng + ?Sized>(size: usize, obstacle_probability: f64, rng: &mut R) -> Self {
        let p = sanitize_probability(obstacle_probability);
        let cells = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| Cell { has_obstacle: rng.gen_bool(p), has_agent: false })
                    .collect()
            })
            .collect();
        Self { size, cells }
    }

    /// Build a grid from externally supplied rows. Rows must be non-empty and
    /// square. Incoming agent flags are discarded.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> DomainResult<Self> {
        let size = rows.len();
        if size == 0 {
            return Err(DomainError::InvalidMessage { reason: "grid has no rows".to_string() });
        }
        if let Some((row_index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != size) {
            return Err(DomainError::InvalidMessage {
                reason: format!("grid row {} has {} cells, expected {}", row_index, row.len(), size),
            });
        }
        let cells = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| Cell { has_obstacle: cell.has_obstacle, has_agent: false })
                    .collect()
            })
            .collect();
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    pub fn cell(&self, coord: GridCoord) -> Option<&Cell> {
        self.cells.get(coord.y).and_then(|row| row.get(coord.x))
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn obstacle_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.has_obstacle).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.has_agent).count()
    }

    /// Copy of this grid with agent flags recomputed from `positions`.
    /// Positions outside the grid are ignored.
    pub fn with_agents<I>(&self, positions: I) -> Self
    where
        I: IntoIterator<Item = GridCoord>,
    {
        let mut next = self.clone();
        for cell in next.cells.iter_mut().flatten() {
            cell.has_agent = false;
        }
        for coord in positions {
            if let Some(cell) = next.cells.get_mut(coord.y).and_then(|row| row.get_mut(coord.x)) {
                cell.has_agent = true;
            }
        }
        next
    }
}
