use crate::analysis::{AnalysisError, Report};
use crate::store::Store;
use crate::versioned::Memoized;

pub struct Cache {
    pub report:
        Memoized<Store, (u64, u64), Result<Report, AnalysisError>>,
}

impl Cache {
    pub fn new() -> Self {
        let report = Memoized::new(
            |s: &Store| (s.graph.version(), s.settings.version()),
            |s: &Store| s.report_uncached(),
        );

        Self { report }
    }
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}
