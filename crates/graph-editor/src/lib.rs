pub mod actions;
pub mod analysis;
pub mod cache;
pub mod cli;
pub mod command;
pub mod edge_set;
pub mod graph_state;
pub mod graph_view;
pub mod registry;
pub mod settings;
pub mod state;
pub mod store;
pub mod versioned;

pub use actions::{Action, Outcome};
pub use analysis::{AnalysisError, FormattedReport, Report, analyze};
pub use command::{Command, CommandError};
pub use edge_set::Edge;
pub use graph_state::{Graph, GraphError};
pub use graph_view::GraphView;
pub use settings::{AnalysisSettings, DisplaySettings, Settings, SettingsError};
pub use state::State;
pub use store::Store;
