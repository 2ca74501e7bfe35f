use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::TAU;

use super::camera::Camera;
use crate::domains::agent::Agent;
use crate::domains::geometry::Position3D;
use crate::domains::grid::GridCoord;
use crate::domains::simulation::SimulationSnapshot;
use crate::domains::topology::Topology;

pub const NODE_RADIUS: f64 = 0.2;
pub const CELL_RADIUS: f64 = 0.45;
pub const AGENT_RADIUS: f64 = 0.4;
pub const BASE_STATION_RADIUS: f64 = 0.5;
pub const TRANSFER_NODE_RADIUS: f64 = 0.3;
pub const TRANSFER_RING_RADIUS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Blue,
    Gray,
    Red,
    Yellow,
    Green,
    Cyan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Primitive {
    Sphere {
        position: Position3D,
        radius: f64,
        color: Color,
        label: Option<String>,
    },
    Line {
        from: Position3D,
        to: Position3D,
        color: Color,
    },
}

impl Primitive {
    fn sphere(position: Position3D, radius: f64, color: Color) -> Self {
        Primitive::Sphere { position, radius, color, label: None }
    }

    fn labelled(position: Position3D, radius: f64, color: Color, label: impl Into<String>) -> Self {
        Primitive::Sphere { position, radius, color, label: Some(label.into()) }
    }

    fn line(from: Position3D, to: Position3D, color: Color) -> Self {
        Primitive::Line { from, to, color }
    }
}

/// Everything a 3D front end needs to draw one view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn spheres(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| matches!(p, Primitive::Sphere { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().filter(|p| matches!(p, Primitive::Line { .. }))
    }

    pub fn lines_with_color(&self, color: Color) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { color: c, .. } if *c == color))
            .count()
    }
}

/// Blue node spheres and one gray line per undirected edge.
pub fn topology_scene(topology: &Topology) -> Scene {
    let mut primitives: Vec<Primitive> = topology
        .nodes()
        .iter()
        .map(|node| Primitive::labelled(node.position, NODE_RADIUS, Color::Blue, format!("Node {}", node.id)))
        .collect();
    for (a, b) in topology.edges() {
        let nodes = topology.nodes();
        primitives.push(Primitive::line(nodes[a].position, nodes[b].position, Color::Gray));
    }
    Scene { camera: Camera::topology(), primitives }
}

fn cell_center(coord: GridCoord, size: usize, height: f64) -> Position3D {
    let half = size as f64 / 2.0;
    Position3D::new(coord.x as f64 - half, height, coord.y as f64 - half)
}

/// Grid cells, base station, agents and their radio links.
pub fn grid_scene(snapshot: &SimulationSnapshot) -> Scene {
    let size = snapshot.grid.size();
    let half = size as f64 / 2.0;
    let visited: HashSet<GridCoord> = snapshot.visited_cells.iter().copied().collect();
    let mut primitives = Vec::new();

    for (y, row) in snapshot.grid.rows().iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            let coord = GridCoord::new(x, y);
            let color = if cell.has_obstacle {
                Color::Red
            } else if visited.contains(&coord) {
                Color::Yellow
            } else {
                Color::Gray
            };
            primitives.push(Primitive::sphere(cell_center(coord, size, 0.0), CELL_RADIUS, color));
        }
    }

    let base_station = Position3D::new(-half, 0.5, -half);
    primitives.push(Primitive::labelled(base_station, BASE_STATION_RADIUS, Color::Green, "Base Station"));

    for agent in &snapshot.agents {
        let position = cell_center(agent.position, size, 0.5);
        primitives.push(Primitive::labelled(position, AGENT_RADIUS, Color::Blue, agent.id.to_string()));
        primitives.push(Primitive::line(position, base_station, Color::Green));
    }

    for (a, b) in agents_in_range(&snapshot.agents, snapshot.connection_radius) {
        primitives.push(Primitive::line(
            cell_center(a.position, size, 0.5),
            cell_center(b.position, size, 0.5),
            Color::Cyan,
        ));
    }

    Scene { camera: Camera::for_view(snapshot.camera_view), primitives }
}

/// Agent pairs within `radius` of each other on the grid, each pair once.
pub fn agents_in_range(agents: &[Agent], radius: f64) -> Vec<(&Agent, &Agent)> {
    let mut pairs = Vec::new();
    for (i, a) in agents.iter().enumerate() {
        for b in &agents[i + 1..] {
            if a.position.distance_to(&b.position) <= radius {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

/// Agents arranged on a ring with random heights; each pair is linked with
/// probability one half.
pub fn information_transfer_scene<R: Rng + ?Sized>(agents: &[Agent], camera: Camera, rng: &mut R) -> Scene {
    let count = agents.len();
    let positions: Vec<Position3D> = (0..count)
        .map(|index| {
            let theta = index as f64 / count as f64 * TAU;
            Position3D::new(
                theta.cos() * TRANSFER_RING_RADIUS,
                rng.gen_range(-1.0..1.0),
                theta.sin() * TRANSFER_RING_RADIUS,
            )
        })
        .collect();

    let mut primitives: Vec<Primitive> = agents
        .iter()
        .zip(&positions)
        .map(|(agent, &position)| Primitive::labelled(position, TRANSFER_NODE_RADIUS, Color::Blue, agent.id.to_string()))
        .collect();
    for i in 0..count {
        for j in i + 1..count {
            if rng.gen_bool(0.5) {
                primitives.push(Primitive::line(positions[i], positions[j], Color::Cyan));
            }
        }
    }
    Scene { camera, primitives }
}
