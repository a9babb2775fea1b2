use ndarray::{s, Array2, ArrayView2, Axis};

/// Dense symmetric 0/1 matrix with a zero diagonal.
///
/// Rows and columns are addressed by the same index, so the caller is
/// responsible for keeping its own index map in lock-step with
/// [`AdjacencyMatrix::resize_insert`] and [`AdjacencyMatrix::resize_remove`].
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    values: Array2<u8>,
}

impl Default for AdjacencyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjacencyMatrix {
    pub fn new() -> Self {
        Self {
            values: Array2::zeros((0, 0)),
        }
    }

    /// Number of rows (and columns).
    pub fn dim(&self) -> usize {
        self.values.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.dim() == 0
    }

    /// Append one zero row and one zero column.
    pub fn resize_insert(&mut self) {
        let n = self.dim();
        let mut grown = Array2::zeros((n + 1, n + 1));
        grown.slice_mut(s![..n, ..n]).assign(&self.values);
        self.values = grown;
    }

    /// Delete row and column `index`; later rows and columns move down by one.
    pub fn resize_remove(&mut self, index: usize) -> Result<(), MatrixError> {
        self.check_bounds(index)?;
        let keep: Vec<usize> =
            (0..self.dim()).filter(|&i| i != index).collect();
        self.values = self
            .values
            .select(Axis(0), &keep)
            .select(Axis(1), &keep);
        Ok(())
    }

    pub fn get(&self, i: usize, j: usize) -> Result<bool, MatrixError> {
        self.check_bounds(i)?;
        self.check_bounds(j)?;
        Ok(self.values[[i, j]] == 1)
    }

    /// Set both `(i, j)` and `(j, i)`.
    pub fn set(
        &mut self,
        i: usize,
        j: usize,
        value: bool,
    ) -> Result<(), MatrixError> {
        self.check_bounds(i)?;
        self.check_bounds(j)?;
        if i == j {
            return Err(MatrixError::SelfLoopRejected(i));
        }
        let cell = u8::from(value);
        self.values[[i, j]] = cell;
        self.values[[j, i]] = cell;
        Ok(())
    }

    pub fn degree(&self, i: usize) -> Result<usize, MatrixError> {
        self.check_bounds(i)?;
        Ok(self.values.row(i).iter().map(|&a| usize::from(a)).sum())
    }

    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.values.view()
    }

    /// Owned copy of the current state, detached from further edits.
    pub fn to_dense(&self) -> Array2<u8> {
        self.values.clone()
    }

    pub fn laplacian(&self) -> Array2<i64> {
        laplacian(self.view())
    }

    /// Symmetric with an all-zero diagonal and only 0/1 entries.
    pub fn is_well_formed(&self) -> bool {
        let n = self.dim();
        (0..n).all(|i| {
            self.values[[i, i]] == 0
                && (0..n).all(|j| {
                    self.values[[i, j]] <= 1
                        && self.values[[i, j]] == self.values[[j, i]]
                })
        })
    }

    fn check_bounds(&self, index: usize) -> Result<(), MatrixError> {
        if index < self.dim() {
            Ok(())
        } else {
            Err(MatrixError::OutOfBounds {
                index,
                dim: self.dim(),
            })
        }
    }
}

/// Laplacian `L = D - A` of an adjacency matrix.
pub fn laplacian(adjacency: ArrayView2<'_, u8>) -> Array2<i64> {
    let mut lap = adjacency.mapv(|a| -i64::from(a));
    for (i, row) in adjacency.rows().into_iter().enumerate() {
        let degree: i64 = row.iter().map(|&a| i64::from(a)).sum();
        lap[[i, i]] += degree;
    }
    lap
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("self-loop rejected at index {0}")]
    SelfLoopRejected(usize),
    #[error("index {index} out of bounds for dimension {dim}")]
    OutOfBounds { index: usize, dim: usize },
}
