use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::registry::DEFAULT_PREFIX;

/// Largest number of decimals shown for eigenvalues.
pub const MAX_PRECISION: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for generated vertex names (`V0`, `V1`, ...).
    pub vertex_prefix: String,
    pub analysis: AnalysisSettings,
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vertex_prefix: DEFAULT_PREFIX.to_string(),
            analysis: AnalysisSettings::default(),
            display: DisplaySettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Jacobi sweeps before giving up.
    pub max_sweeps: usize,
    /// Relative off-diagonal norm at which the eigen solver stops.
    pub tolerance: f64,
    /// Laplacian eigenvalues below this count as zero (one per component).
    pub zero_threshold: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            max_sweeps: 100,
            tolerance: 1e-12,
            zero_threshold: 1e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub precision: usize,
    pub superscript_exponents: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            precision: 4,
            superscript_exponents: true,
        }
    }
}

impl Settings {
    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(text)?;
        Ok(settings.clamped())
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SettingsError> {
        let text = std::fs::read_to_string(path).map_err(|source| {
            SettingsError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&text)
    }

    /// Pull out-of-range values back into range.
    pub fn clamped(mut self) -> Self {
        self.display.precision = self.display.precision.min(MAX_PRECISION);
        if self.vertex_prefix.trim().is_empty() {
            self.vertex_prefix = DEFAULT_PREFIX.to_string();
        }
        let defaults = AnalysisSettings::default();
        if !(self.analysis.tolerance.is_finite() && self.analysis.tolerance > 0.0) {
            self.analysis.tolerance = defaults.tolerance;
        }
        if !(self.analysis.zero_threshold.is_finite()
            && self.analysis.zero_threshold > 0.0)
        {
            self.analysis.zero_threshold = defaults.zero_threshold;
        }
        self
    }

    /// Copy with one option changed, clamped back into range.
    pub fn with_change(mut self, change: SettingChange) -> Self {
        match change {
            SettingChange::Precision(p) => self.display.precision = p,
            SettingChange::Superscripts(on) => {
                self.display.superscript_exponents = on
            }
            SettingChange::MaxSweeps(n) => self.analysis.max_sweeps = n,
            SettingChange::Tolerance(t) => self.analysis.tolerance = t,
            SettingChange::ZeroThreshold(z) => {
                self.analysis.zero_threshold = z
            }
        }
        self.clamped()
    }
}

/// One option that can be changed while the editor runs.
/// The vertex prefix is fixed once the graph exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    Precision(usize),
    Superscripts(bool),
    MaxSweeps(usize),
    Tolerance(f64),
    ZeroThreshold(f64),
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("cannot read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Parse(#[from] serde_json::Error),
}
