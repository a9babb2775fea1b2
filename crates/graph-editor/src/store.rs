use log::warn;

use crate::analysis::{self, AnalysisError, Report};
use crate::graph_state::Graph;
use crate::graph_view::GraphView;
use crate::settings::Settings;
use crate::versioned::Versioned;

/// Everything the editor owns. Derived data lives in [`crate::cache::Cache`].
pub struct Store {
    pub graph: Versioned<Graph>,
    pub settings: Versioned<Settings>,
    pub error_message: Option<String>,
}

impl Store {
    pub fn new(settings: Settings) -> Self {
        let graph = Graph::with_prefix(settings.vertex_prefix.clone());
        Self {
            graph: Versioned::new(graph),
            settings: Versioned::new(settings),
            error_message: None,
        }
    }

    pub fn report_uncached(&self) -> Result<Report, AnalysisError> {
        let snapshot = self.graph.get().snapshot();
        let result =
            analysis::analyze(snapshot.view(), &self.settings.get().analysis);
        if let Err(e) = &result {
            warn!(
                "analysis of {} vertices failed: {}",
                snapshot.nrows(),
                e
            );
        }
        result
    }

    pub fn graph_view(&self) -> GraphView {
        GraphView::from_graph(self.graph.get())
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
