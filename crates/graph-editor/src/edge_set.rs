use serde::Serialize;
use spectral::AdjacencyMatrix;
use std::collections::BTreeSet;
use std::fmt;

use crate::graph_state::GraphError;
use crate::registry::VertexRegistry;

/// Undirected edge, smaller id first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Edge {
    a: String,
    b: String,
}

impl Edge {
    pub fn new(u: &str, v: &str) -> Self {
        let (a, b) = if u <= v { (u, v) } else { (v, u) };
        Self {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }

    pub fn touches(&self, v: &str) -> bool {
        self.a == v || self.b == v
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.a, self.b)
    }
}

/// Canonical edge set. Every method that changes membership writes the
/// matching matrix cells in the same call.
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    edges: BTreeSet<Edge>,
}

impl EdgeSet {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, u: &str, v: &str) -> bool {
        self.edges.contains(&Edge::new(u, v))
    }

    /// Edges in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Flip membership of `{u, v}`; returns whether the edge is now present.
    pub fn toggle(
        &mut self,
        u: &str,
        v: &str,
        registry: &VertexRegistry,
        matrix: &mut AdjacencyMatrix,
    ) -> Result<bool, GraphError> {
        let (i, j) = cells(registry, u, v)?;
        let edge = Edge::new(u, v);
        let present = !self.edges.contains(&edge);
        matrix.set(i, j, present)?;
        if present {
            self.edges.insert(edge);
        } else {
            self.edges.remove(&edge);
        }
        Ok(present)
    }

    /// Remove `{u, v}` if present; returns whether anything was removed.
    pub fn remove(
        &mut self,
        u: &str,
        v: &str,
        registry: &VertexRegistry,
        matrix: &mut AdjacencyMatrix,
    ) -> Result<bool, GraphError> {
        let (i, j) = cells(registry, u, v)?;
        let edge = Edge::new(u, v);
        if !self.edges.contains(&edge) {
            return Ok(false);
        }
        matrix.set(i, j, false)?;
        self.edges.remove(&edge);
        Ok(true)
    }

    /// Remove every edge touching `v`; returns how many were removed.
    pub fn remove_all_incident(
        &mut self,
        v: &str,
        registry: &VertexRegistry,
        matrix: &mut AdjacencyMatrix,
    ) -> Result<usize, GraphError> {
        let incident: Vec<Edge> = self
            .edges
            .iter()
            .filter(|e| e.touches(v))
            .cloned()
            .collect();
        for edge in &incident {
            let (a, b) = edge.endpoints();
            self.remove(a, b, registry, matrix)?;
        }
        Ok(incident.len())
    }
}

fn cells(
    registry: &VertexRegistry,
    u: &str,
    v: &str,
) -> Result<(usize, usize), GraphError> {
    let i = registry
        .index_of(u)
        .ok_or_else(|| GraphError::UnknownVertex(u.to_string()))?;
    let j = registry
        .index_of(v)
        .ok_or_else(|| GraphError::UnknownVertex(v.to_string()))?;
    if i == j {
        return Err(GraphError::SelfLoopRejected(u.to_string()));
    }
    Ok((i, j))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(n: usize) -> (VertexRegistry, AdjacencyMatrix) {
        let mut registry = VertexRegistry::default();
        let mut matrix = AdjacencyMatrix::new();
        for _ in 0..n {
            registry.add(None).unwrap();
            matrix.resize_insert();
        }
        (registry, matrix)
    }

    #[test]
    fn test_edge_is_canonical() {
        assert_eq!(Edge::new("V2", "V0"), Edge::new("V0", "V2"));
        assert_eq!(Edge::new("b", "a").endpoints(), ("a", "b"));
        assert_eq!(Edge::new("b", "a").to_string(), "(a, b)");
    }

    #[test]
    fn test_toggle_flips_matrix_cells() {
        let (registry, mut matrix) = setup(3);
        let mut edges = EdgeSet::default();

        assert!(edges.toggle("V2", "V0", &registry, &mut matrix).unwrap());
        assert!(edges.contains("V0", "V2"));
        assert!(matrix.get(0, 2).unwrap() && matrix.get(2, 0).unwrap());

        assert!(!edges.toggle("V0", "V2", &registry, &mut matrix).unwrap());
        assert!(edges.is_empty());
        assert!(!matrix.get(0, 2).unwrap());
    }

    #[test]
    fn test_toggle_rejects_bad_pairs() {
        let (registry, mut matrix) = setup(2);
        let mut edges = EdgeSet::default();
        assert_eq!(
            edges.toggle("V0", "V0", &registry, &mut matrix),
            Err(GraphError::SelfLoopRejected("V0".to_string()))
        );
        assert_eq!(
            edges.toggle("V0", "V9", &registry, &mut matrix),
            Err(GraphError::UnknownVertex("V9".to_string()))
        );
        assert!(edges.is_empty());
    }

    #[test]
    fn test_remove_all_incident() {
        let (registry, mut matrix) = setup(4);
        let mut edges = EdgeSet::default();
        for (u, v) in [("V0", "V1"), ("V1", "V2"), ("V1", "V3"), ("V2", "V3")] {
            edges.toggle(u, v, &registry, &mut matrix).unwrap();
        }

        assert_eq!(edges.remove_all_incident("V1", &registry, &mut matrix), Ok(3));
        assert_eq!(edges.iter().collect::<Vec<_>>(), vec![&Edge::new("V2", "V3")]);
        assert_eq!(matrix.degree(1), Ok(0));
        assert!(matrix.get(2, 3).unwrap());
    }
}
