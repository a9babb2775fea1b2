// ------------------------------------------------------------------
// Spectral analysis of an adjacency snapshot
// ------------------------------------------------------------------

use log::warn;
use ndarray::{Array2, ArrayView2};
use serde::Serialize;
use spectral::{
    Polynomial, SpectralError, char_poly, laplacian, superscript_exponents,
    symmetric_eigenvalues,
};
use std::fmt;

use crate::settings::{AnalysisSettings, DisplaySettings};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("spectral computation failed: {0}")]
    SpectralComputationFailed(#[from] SpectralError),
}

/// Numeric spectral data of one graph state. Laplacian is `D - A`.
///
/// The characteristic polynomials are computed independently of the
/// eigenvalues, so one failing does not hide the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub adjacency: Array2<u8>,
    pub degrees: Vec<usize>,
    pub adjacency_eigenvalues: Vec<f64>,
    pub adjacency_char_poly: Result<Polynomial, SpectralError>,
    pub laplacian: Array2<i64>,
    pub laplacian_eigenvalues: Vec<f64>,
    pub laplacian_char_poly: Result<Polynomial, SpectralError>,
    /// Multiplicity of the Laplacian eigenvalue 0.
    pub components: usize,
}

impl Report {
    /// Report of the graph with no vertices.
    pub fn empty() -> Self {
        Self {
            adjacency: Array2::zeros((0, 0)),
            degrees: Vec::new(),
            adjacency_eigenvalues: Vec::new(),
            adjacency_char_poly: Ok(Polynomial::one()),
            laplacian: Array2::zeros((0, 0)),
            laplacian_eigenvalues: Vec::new(),
            laplacian_char_poly: Ok(Polynomial::one()),
            components: 0,
        }
    }

    pub fn format(&self, display: &DisplaySettings) -> FormattedReport {
        let poly = |p: &Result<Polynomial, SpectralError>| match p {
            Ok(p) if display.superscript_exponents => {
                superscript_exponents(&p.to_string())
            }
            Ok(p) => p.to_string(),
            Err(e) => format!("unavailable ({})", e),
        };
        FormattedReport {
            adjacency: format_rows(&self.adjacency),
            adjacency_eigenvalues: format_values(
                &self.adjacency_eigenvalues,
                display.precision,
            ),
            adjacency_char_poly: poly(&self.adjacency_char_poly),
            laplacian: format_rows(&self.laplacian),
            laplacian_eigenvalues: format_values(
                &self.laplacian_eigenvalues,
                display.precision,
            ),
            laplacian_char_poly: poly(&self.laplacian_char_poly),
            degrees: format!("{:?}", self.degrees),
            components: self.components,
        }
    }
}

/// Compute the full report for an adjacency snapshot.
pub fn analyze(
    adjacency: ArrayView2<'_, u8>,
    settings: &AnalysisSettings,
) -> Result<Report, AnalysisError> {
    if adjacency.nrows() == 0 {
        return Ok(Report::empty());
    }

    let lap = laplacian(adjacency);
    let degrees: Vec<usize> = adjacency
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&a| usize::from(a)).sum::<usize>())
        .collect();

    let adjacency_eigenvalues = symmetric_eigenvalues(
        adjacency.mapv(f64::from).view(),
        settings.max_sweeps,
        settings.tolerance,
    )?;
    let laplacian_eigenvalues = symmetric_eigenvalues(
        lap.mapv(|x| x as f64).view(),
        settings.max_sweeps,
        settings.tolerance,
    )?;
    let adjacency_char_poly = char_poly(adjacency.mapv(i64::from).view())
        .inspect_err(|e| warn!("adjacency characteristic polynomial: {}", e));
    let laplacian_char_poly = char_poly(lap.view())
        .inspect_err(|e| warn!("laplacian characteristic polynomial: {}", e));

    let components = laplacian_eigenvalues
        .iter()
        .filter(|l| l.abs() < settings.zero_threshold)
        .count();

    Ok(Report {
        adjacency: adjacency.to_owned(),
        degrees,
        adjacency_eigenvalues,
        adjacency_char_poly,
        laplacian: lap,
        laplacian_eigenvalues,
        laplacian_char_poly,
        components,
    })
}

// ------------------------------------------------------------------
// Presentation strings
// ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedReport {
    pub adjacency: Vec<String>,
    pub adjacency_eigenvalues: String,
    pub adjacency_char_poly: String,
    pub laplacian: Vec<String>,
    pub laplacian_eigenvalues: String,
    pub laplacian_char_poly: String,
    pub degrees: String,
    pub components: usize,
}

impl fmt::Display for FormattedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "adjacency matrix:")?;
        for row in &self.adjacency {
            writeln!(f, "  {}", row)?;
        }
        writeln!(f, "adjacency eigenvalues: {}", self.adjacency_eigenvalues)?;
        writeln!(f, "adjacency characteristic polynomial: {}", self.adjacency_char_poly)?;
        writeln!(f, "laplacian matrix:")?;
        for row in &self.laplacian {
            writeln!(f, "  {}", row)?;
        }
        writeln!(f, "laplacian eigenvalues: {}", self.laplacian_eigenvalues)?;
        writeln!(f, "laplacian characteristic polynomial: {}", self.laplacian_char_poly)?;
        writeln!(f, "degrees: {}", self.degrees)?;
        write!(f, "connected components: {}", self.components)
    }
}

fn format_rows<T: fmt::Display>(matrix: &Array2<T>) -> Vec<String> {
    matrix
        .rows()
        .into_iter()
        .map(|row| {
            let cells: Vec<String> =
                row.iter().map(|x| x.to_string()).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect()
}

fn format_values(values: &[f64], precision: usize) -> String {
    let cells: Vec<String> =
        values.iter().map(|&x| format_value(x, precision)).collect();
    format!("[{}]", cells.join(", "))
}

/// Round to `precision` decimals, drop trailing zeros, never print `-0`.
pub fn format_value(x: f64, precision: usize) -> String {
    let mut text = format!("{:.*}", precision, x);
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}
