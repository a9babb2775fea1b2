use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::HashMap;

use crate::graph_state::Graph;

// ------------------------------------------------------------------
// Read-only view of the graph for presentation
// ------------------------------------------------------------------

/// Vertex ids in matrix order and edges in canonical order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphView {
    pub vertices: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl GraphView {
    pub fn from_graph(graph: &Graph) -> Self {
        Self {
            vertices: graph.vertices().map(str::to_string).collect(),
            edges: graph
                .edges()
                .map(|e| {
                    let (a, b) = e.endpoints();
                    (a.to_string(), b.to_string())
                })
                .collect(),
        }
    }

    /// Node `i` of the result is vertex `i` of the matrix.
    pub fn to_petgraph(&self) -> UnGraph<String, ()> {
        let mut g = UnGraph::with_capacity(self.vertices.len(), self.edges.len());
        let nodes: HashMap<&str, NodeIndex> = self
            .vertices
            .iter()
            .map(|id| (id.as_str(), g.add_node(id.clone())))
            .collect();
        for (a, b) in &self.edges {
            if let (Some(&ia), Some(&ib)) = (nodes.get(a.as_str()), nodes.get(b.as_str())) {
                g.add_edge(ia, ib, ());
            }
        }
        g
    }

    /// Component count computed combinatorially, independent of the spectrum.
    pub fn connected_components(&self) -> usize {
        petgraph::algo::connected_components(&self.to_petgraph())
    }
}
