pub mod eigen;
pub mod ix_map;
pub mod matrix;
pub mod poly;

pub use eigen::{symmetric_eigenvalues, SpectralError};
pub use ix_map::IxMap;
pub use matrix::{laplacian, AdjacencyMatrix, MatrixError};
pub use poly::{char_poly, superscript_exponents, Polynomial};
