use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domains::geometry::Position3D;

/// Half-extent of the cube node positions are drawn from.
pub const POSITION_EXTENT: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub position: Position3D,
    pub neighbors: Vec<usize>,
}

impl Node {
    pub fn is_connected_to(&self, other: usize) -> bool {
        self.neighbors.contains(&other)
    }
}

/// Undirected random network. Neighbor lists are kept symmetric.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topology {
    nodes: Vec<Node>,
}

impl Topology {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a connected topology over `node_count` nodes.
    ///
    /// A spanning pass attaches every node `i > 0` to a random earlier node,
    /// then every node gets 1..=3 attempts at an extra random edge. Attempts
    /// that hit the node itself or an existing neighbor are dropped, not
    /// retried, so the extra edge count varies from run to run.
    pub fn generate<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Self {
        let mut topology = Self {
            nodes: (0..node_count)
                .map(|id| Node {
                    id,
                    position: Position3D::new(
                        rng.gen_range(-POSITION_EXTENT..POSITION_EXTENT),
                        rng.gen_range(-POSITION_EXTENT..POSITION_EXTENT),
                        rng.gen_range(-POSITION_EXTENT..POSITION_EXTENT),
                    ),
                    neighbors: Vec::new(),
                })
                .collect(),
        };

        for i in 1..node_count {
            let previous = rng.gen_range(0..i);
            topology.connect(i, previous);
        }

        for i in 0..node_count {
            let attempts = rng.gen_range(1..=3);
            for _ in 0..attempts {
                let candidate = rng.gen_range(0..node_count);
                if candidate != i && !topology.nodes[i].is_connected_to(candidate) {
                    topology.connect(i, candidate);
                }
            }
        }

        topology
    }

    fn connect(&mut self, a: usize, b: usize) {
        self.nodes[a].neighbors.push(b);
        self.nodes[b].neighbors.push(a);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Each undirected edge once, as `(lower, higher)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.iter().flat_map(|node| {
            node.neighbors
                .iter()
                .filter(move |&&other| node.id < other)
                .map(move |&other| (node.id, other))
        })
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn is_symmetric(&self) -> bool {
        self.nodes.iter().all(|node| {
            node.neighbors
                .iter()
                .all(|&other| self.nodes.get(other).is_some_and(|n| n.is_connected_to(node.id)))
        })
    }

    pub fn to_graph(&self) -> UnGraph<usize, ()> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edge_count());
        for node in &self.nodes {
            graph.add_node(node.id);
        }
        for (a, b) in self.edges() {
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }
        graph
    }

    /// True when every node is reachable from node 0. Empty and singleton
    /// topologies count as connected.
    pub fn is_connected(&self) -> bool {
        if self.nodes.len() <= 1 {
            return true;
        }
        let graph = self.to_graph();
        let mut bfs = Bfs::new(&graph, NodeIndex::new(0));
        let mut reached = 0;
        while bfs.next(&graph).is_some() {
            reached += 1;
        }
        reached == self.nodes.len()
    }
}
