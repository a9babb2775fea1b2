use log::warn;

use crate::actions::{self, Action, Outcome};
use crate::analysis::{AnalysisError, Report};
use crate::cache::Cache;
use crate::graph_state::GraphError;
use crate::store::Store;

pub struct State {
    pub store: Store,
    pub cache: Cache,
    action_queue: Vec<Action>,
}

impl State {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            cache: Cache::new(),
            action_queue: Vec::new(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        self.action_queue.push(action);
    }

    /// Apply queued actions in order, one result per action. A rejected
    /// action is skipped; later actions still run.
    pub fn flush_actions(&mut self) -> Vec<Result<Outcome, GraphError>> {
        let actions = std::mem::take(&mut self.action_queue);
        actions
            .into_iter()
            .map(|action| self.apply(action))
            .collect()
    }

    /// Apply one action right away and refresh the report if it succeeded.
    /// A rejection is logged and kept as the current error message.
    pub fn apply(&mut self, action: Action) -> Result<Outcome, GraphError> {
        match actions::update(&mut self.store, action) {
            Ok(outcome) => {
                self.report();
                Ok(outcome)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    fn record_error(&mut self, e: &GraphError) {
        warn!("action rejected: {}", e);
        self.store.error_message = Some(e.to_string());
    }

    /// Report of the current graph, recomputed only after a change.
    pub fn report(&mut self) -> &Result<Report, AnalysisError> {
        self.cache.report.get(&self.store)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(Store::default())
    }
}
