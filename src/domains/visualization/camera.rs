use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domains::geometry::Position3D;

pub const DEFAULT_FOV: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CameraView {
    Top,
    Diagonal,
    Side,
    #[default]
    Overview,
}

impl CameraView {
    pub fn position(&self) -> Position3D {
        match self {
            CameraView::Top => Position3D::new(0.0, 20.0, 0.0),
            // roughly 45 degrees above the grid plane
            CameraView::Diagonal => Position3D::new(14.14, 14.14, 14.14),
            CameraView::Side => Position3D::new(20.0, 0.0, 0.0),
            CameraView::Overview => Position3D::new(20.0, 20.0, 20.0),
        }
    }
}

impl FromStr for CameraView {
    type Err = std::convert::Infallible;

    /// Unrecognised names fall back to the overview.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "top" => CameraView::Top,
            "45deg" | "diagonal" => CameraView::Diagonal,
            "side" => CameraView::Side,
            _ => CameraView::Overview,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Position3D,
    pub fov: f64,
}

impl Camera {
    pub fn for_view(view: CameraView) -> Self {
        Self { position: view.position(), fov: DEFAULT_FOV }
    }

    pub fn topology() -> Self {
        Self { position: Position3D::new(0.0, 0.0, 15.0), fov: DEFAULT_FOV }
    }
}
