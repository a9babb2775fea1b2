use ndarray::{Array2, ArrayView2};
use num_traits::Float;
use serde::Serialize;

/// Eigenvalues of a real symmetric matrix, ascending.
///
/// Uses cyclic Jacobi rotations: each sweep visits every off-diagonal pair
/// once and rotates it to zero. Iteration stops when the off-diagonal
/// Frobenius norm drops below `tolerance` times the matrix norm (floored at
/// one), or fails after `max_sweeps` sweeps.
///
/// Only the upper triangle is trusted to mirror the lower one; the caller
/// is expected to pass a symmetric matrix.
pub fn symmetric_eigenvalues<N: Float>(
    matrix: ArrayView2<'_, N>,
    max_sweeps: usize,
    tolerance: N,
) -> Result<Vec<N>, SpectralError> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(SpectralError::NotSquare { rows, cols });
    }
    if rows == 0 {
        return Ok(Vec::new());
    }
    if matrix.iter().any(|x| !x.is_finite()) {
        return Err(SpectralError::NonFinite);
    }

    let n = rows;
    let mut a: Array2<N> = matrix.to_owned();
    let scale = frobenius(&a).max(N::one());

    for _ in 0..max_sweeps {
        if off_diagonal_norm(&a) <= tolerance * scale {
            return Ok(sorted_diagonal(&a));
        }
        for p in 0..n {
            for q in (p + 1)..n {
                rotate(&mut a, p, q);
            }
        }
    }

    if off_diagonal_norm(&a) <= tolerance * scale {
        Ok(sorted_diagonal(&a))
    } else {
        Err(SpectralError::NoConvergence { sweeps: max_sweeps })
    }
}

/// Apply the Jacobi rotation that annihilates `a[p][q]`.
fn rotate<N: Float>(a: &mut Array2<N>, p: usize, q: usize) {
    let apq = a[[p, q]];
    if apq == N::zero() {
        return;
    }
    let two = N::one() + N::one();
    let theta = (a[[q, q]] - a[[p, p]]) / (two * apq);
    let t = if theta == N::zero() {
        N::one()
    } else {
        theta.signum() / (theta.abs() + (theta * theta + N::one()).sqrt())
    };
    let c = N::one() / (t * t + N::one()).sqrt();
    let s = t * c;

    let n = a.nrows();
    for k in 0..n {
        let akp = a[[k, p]];
        let akq = a[[k, q]];
        a[[k, p]] = c * akp - s * akq;
        a[[k, q]] = s * akp + c * akq;
    }
    for k in 0..n {
        let apk = a[[p, k]];
        let aqk = a[[q, k]];
        a[[p, k]] = c * apk - s * aqk;
        a[[q, k]] = s * apk + c * aqk;
    }
    a[[p, q]] = N::zero();
    a[[q, p]] = N::zero();
}

fn frobenius<N: Float>(a: &Array2<N>) -> N {
    a.iter().fold(N::zero(), |acc, &x| acc + x * x).sqrt()
}

fn off_diagonal_norm<N: Float>(a: &Array2<N>) -> N {
    a.indexed_iter()
        .filter(|((i, j), _)| i != j)
        .fold(N::zero(), |acc, (_, &x)| acc + x * x)
        .sqrt()
}

fn sorted_diagonal<N: Float>(a: &Array2<N>) -> Vec<N> {
    let mut values: Vec<N> = a.diag().iter().copied().collect();
    values.sort_by(|x, y| x.partial_cmp(y).unwrap_or(std::cmp::Ordering::Equal));
    values
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpectralError {
    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    #[error("matrix has non-finite entries")]
    NonFinite,
    #[error("eigenvalue iteration did not converge after {sweeps} sweeps")]
    NoConvergence { sweeps: usize },
}
