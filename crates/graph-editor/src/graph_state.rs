// Graph state module - vertex registry, edge set and adjacency matrix kept in step

use log::debug;
use ndarray::Array2;
use spectral::{AdjacencyMatrix, MatrixError};
use std::collections::HashSet;

use crate::edge_set::{Edge, EdgeSet};
use crate::registry::VertexRegistry;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex {0} already exists")]
    DuplicateVertex(String),
    #[error("unknown vertex {0}")]
    UnknownVertex(String),
    #[error("self-loop on {0} rejected")]
    SelfLoopRejected(String),
    #[error("matrix store rejected update: {0}")]
    Matrix(#[from] MatrixError),
}

/// Undirected simple graph with a dense adjacency matrix.
///
/// Every public mutation either fails before touching anything or leaves
/// the registry, the edge set and the matrix consistent with each other.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    registry: VertexRegistry,
    matrix: AdjacencyMatrix,
    edges: EdgeSet,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty graph whose default vertex names start with `prefix`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            registry: VertexRegistry::with_prefix(prefix),
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Add a vertex named `id`, or the next default name.
    pub fn add_vertex(
        &mut self,
        id: Option<String>,
    ) -> Result<String, GraphError> {
        let id = self.registry.add(id)?;
        self.matrix.resize_insert();
        debug!("added vertex {} at index {}", id, self.matrix.dim() - 1);
        Ok(id)
    }

    /// Remove vertices and all their edges. Every id is checked before
    /// anything is removed; repeated ids are removed once.
    pub fn remove_vertices<S: AsRef<str>>(
        &mut self,
        ids: &[S],
    ) -> Result<(), GraphError> {
        let mut doomed: Vec<(usize, &str)> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let ix = self
                .registry
                .index_of(id)
                .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))?;
            doomed.push((ix, id));
        }
        // highest index first so the remaining indices stay valid
        doomed.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        doomed.dedup_by_key(|(ix, _)| *ix);

        for (ix, id) in doomed {
            let dropped = self.edges.remove_all_incident(
                id,
                &self.registry,
                &mut self.matrix,
            )?;
            self.registry.remove(id)?;
            self.matrix.resize_remove(ix)?;
            debug!("removed vertex {} and {} incident edges", id, dropped);
        }
        Ok(())
    }

    /// Flip the edge `{u, v}`; returns whether it is present afterwards.
    pub fn toggle_edge(
        &mut self,
        u: &str,
        v: &str,
    ) -> Result<bool, GraphError> {
        let present =
            self.edges.toggle(u, v, &self.registry, &mut self.matrix)?;
        debug!(
            "edge {} {}",
            Edge::new(u, v),
            if present { "added" } else { "removed" }
        );
        Ok(present)
    }

    /// Toggle every pair of the selection.
    ///
    /// This is a toggle, not an "ensure connected": pairs that were already
    /// adjacent get disconnected, so running it twice on the same selection
    /// restores the original edges.
    ///
    /// Returns the number of pairs toggled.
    pub fn build_complete<S: AsRef<str>>(
        &mut self,
        selection: &[S],
    ) -> Result<usize, GraphError> {
        let selection = self.validate_selection(selection, false)?;
        let mut toggled = 0;
        for (i, u) in selection.iter().enumerate() {
            for v in &selection[i + 1..] {
                self.edges.toggle(u, v, &self.registry, &mut self.matrix)?;
                toggled += 1;
            }
        }
        debug!("toggled complete graph over {:?}", selection);
        Ok(toggled)
    }

    /// Toggle an edge between the last element of the selection (the hub)
    /// and every other element. Empty selections are a no-op.
    ///
    /// Returns the number of pairs toggled.
    pub fn build_star<S: AsRef<str>>(
        &mut self,
        selection: &[S],
    ) -> Result<usize, GraphError> {
        let selection = self.validate_selection(selection, false)?;
        let Some((hub, spokes)) = selection.split_last() else {
            return Ok(0);
        };
        for v in spokes {
            self.edges.toggle(v, hub, &self.registry, &mut self.matrix)?;
        }
        debug!("toggled star around {} over {:?}", hub, spokes);
        Ok(spokes.len())
    }

    /// Remove every edge between two members of the selection.
    /// Returns how many edges were removed.
    pub fn clear_edges_among<S: AsRef<str>>(
        &mut self,
        selection: &[S],
    ) -> Result<usize, GraphError> {
        let selection = self.validate_selection(selection, true)?;
        let mut removed = 0;
        for (i, u) in selection.iter().enumerate() {
            for v in &selection[i + 1..] {
                if u != v
                    && self.edges.remove(
                        u,
                        v,
                        &self.registry,
                        &mut self.matrix,
                    )?
                {
                    removed += 1;
                }
            }
        }
        debug!("cleared {} edges among {:?}", removed, selection);
        Ok(removed)
    }

    /// All ids must exist; repeated ids are rejected unless `allow_repeats`,
    /// since pairing a vertex with itself would be a self-loop.
    fn validate_selection<'a, S: AsRef<str>>(
        &self,
        selection: &'a [S],
        allow_repeats: bool,
    ) -> Result<Vec<&'a str>, GraphError> {
        let mut seen = HashSet::new();
        let mut ids = Vec::with_capacity(selection.len());
        for id in selection {
            let id = id.as_ref();
            if !self.registry.contains(id) {
                return Err(GraphError::UnknownVertex(id.to_string()));
            }
            if !seen.insert(id) && !allow_repeats {
                return Err(GraphError::SelfLoopRejected(id.to_string()));
            }
            ids.push(id);
        }
        Ok(ids)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.registry.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.registry.contains(id)
    }

    pub fn contains_edge(&self, u: &str, v: &str) -> bool {
        self.edges.contains(u, v)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.registry.index_of(id)
    }

    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.registry.id_at(index)
    }

    /// Vertex ids in matrix order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> + '_ {
        self.registry.ids()
    }

    /// Edges in canonical order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    pub fn adjacency(&self) -> &AdjacencyMatrix {
        &self.matrix
    }

    /// Owned copy of the adjacency matrix for analysis.
    pub fn snapshot(&self) -> Array2<u8> {
        self.matrix.to_dense()
    }

    /// Check that the edge set and the matrix describe the same graph.
    pub fn is_consistent(&self) -> bool {
        let n = self.registry.len();
        if self.matrix.dim() != n || !self.matrix.is_well_formed() {
            return false;
        }
        let endpoints_known = self.edges.iter().all(|e| {
            let (a, b) = e.endpoints();
            self.registry.contains(a) && self.registry.contains(b)
        });
        if !endpoints_known {
            return false;
        }
        let ids: Vec<&str> = self.registry.ids().collect();
        (0..n).all(|i| {
            (i + 1..n).all(|j| {
                self.matrix.get(i, j).ok()
                    == Some(self.edges.contains(ids[i], ids[j]))
            })
        })
    }
}
