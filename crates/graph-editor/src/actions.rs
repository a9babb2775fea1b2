use std::fmt;

use crate::edge_set::Edge;
use crate::graph_state::GraphError;
use crate::settings::SettingChange;
use crate::store::Store;

/// Edits that can be dispatched against the [`Store`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Add a vertex; `None` picks the next default name
    AddVertex { name: Option<String> },
    /// Remove vertices together with their edges
    RemoveVertices { ids: Vec<String> },
    ToggleEdge { u: String, v: String },
    /// Toggle every pair of the selection
    BuildComplete { selection: Vec<String> },
    /// Toggle hub-to-spoke pairs, hub is the last id
    BuildStar { selection: Vec<String> },
    ClearEdgesAmong { selection: Vec<String> },
    /// Change one analysis or display option
    ChangeSetting(SettingChange),
    ClearErrorMessage,
}

/// What an applied action did, for the front end to report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    VertexAdded(String),
    VerticesRemoved(usize),
    EdgeToggled { edge: Edge, present: bool },
    EdgesToggled(usize),
    EdgesCleared(usize),
    SettingsChanged,
    Nothing,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::VertexAdded(id) => write!(f, "added vertex {}", id),
            Outcome::VerticesRemoved(n) => write!(f, "removed {} vertices", n),
            Outcome::EdgeToggled { edge, present: true } => {
                write!(f, "added edge {}", edge)
            }
            Outcome::EdgeToggled { edge, present: false } => {
                write!(f, "removed edge {}", edge)
            }
            Outcome::EdgesToggled(n) => write!(f, "toggled {} edges", n),
            Outcome::EdgesCleared(n) => write!(f, "cleared {} edges", n),
            Outcome::SettingsChanged => write!(f, "settings updated"),
            Outcome::Nothing => write!(f, "ok"),
        }
    }
}

/// Apply one action. The graph version only moves when the edit succeeds,
/// so a rejected action never invalidates the cached report.
pub fn update(store: &mut Store, action: Action) -> Result<Outcome, GraphError> {
    match action {
        Action::AddVertex { name } => store
            .graph
            .try_update(|g| g.add_vertex(name))
            .map(Outcome::VertexAdded),
        Action::RemoveVertices { ids } => {
            let before = store.graph.get().vertex_count();
            store.graph.try_update(|g| {
                g.remove_vertices(&ids)?;
                Ok(Outcome::VerticesRemoved(before - g.vertex_count()))
            })
        }
        Action::ToggleEdge { u, v } => {
            let present = store.graph.try_update(|g| g.toggle_edge(&u, &v))?;
            Ok(Outcome::EdgeToggled {
                edge: Edge::new(&u, &v),
                present,
            })
        }
        Action::BuildComplete { selection } => store
            .graph
            .try_update(|g| g.build_complete(&selection))
            .map(Outcome::EdgesToggled),
        Action::BuildStar { selection } => store
            .graph
            .try_update(|g| g.build_star(&selection))
            .map(Outcome::EdgesToggled),
        Action::ClearEdgesAmong { selection } => store
            .graph
            .try_update(|g| g.clear_edges_among(&selection))
            .map(Outcome::EdgesCleared),
        Action::ChangeSetting(change) => {
            let settings = store.settings.get().clone().with_change(change);
            store.settings.set(settings);
            Ok(Outcome::SettingsChanged)
        }
        Action::ClearErrorMessage => {
            store.error_message = None;
            Ok(Outcome::Nothing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_successful_actions_bump_version() {
        let mut store = Store::default();
        for _ in 0..3 {
            update(&mut store, Action::AddVertex { name: None }).unwrap();
        }
        assert_eq!(store.graph.version(), 3);

        let outcome = update(
            &mut store,
            Action::ToggleEdge {
                u: "V2".to_string(),
                v: "V0".to_string(),
            },
        )
        .unwrap();
        assert_eq!(outcome.to_string(), "added edge (V0, V2)");

        let outcome = update(
            &mut store,
            Action::RemoveVertices {
                ids: ids(&["V1", "V1"]),
            },
        )
        .unwrap();
        assert_eq!(outcome, Outcome::VerticesRemoved(1));
        assert_eq!(store.graph.version(), 5);
    }

    #[test]
    fn test_rejected_action_keeps_version() {
        let mut store = Store::default();
        update(&mut store, Action::AddVertex { name: None }).unwrap();

        let err = update(
            &mut store,
            Action::BuildComplete {
                selection: ids(&["V0", "ghost"]),
            },
        );
        assert_eq!(err, Err(GraphError::UnknownVertex("ghost".to_string())));
        assert_eq!(store.graph.version(), 1);

        store.error_message = Some("stale".to_string());
        assert_eq!(
            update(&mut store, Action::ClearErrorMessage),
            Ok(Outcome::Nothing)
        );
        assert!(store.error_message.is_none());
        assert_eq!(store.graph.version(), 1);
    }

    #[test]
    fn test_setting_change_bumps_settings_only() {
        let mut store = Store::default();
        assert_eq!(
            update(
                &mut store,
                Action::ChangeSetting(SettingChange::MaxSweeps(10))
            ),
            Ok(Outcome::SettingsChanged)
        );
        assert_eq!(store.settings.version(), 1);
        assert_eq!(store.settings.get().analysis.max_sweeps, 10);
        assert_eq!(store.graph.version(), 0);
    }
}
