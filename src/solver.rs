//! Dense LU factorization with partial pivoting.
//!
//! The left-hand BEM operator is factored once at context construction and
//! the factors are reused for every right-hand-side evaluation.

use ndarray::{Array1, Array2};

use crate::error::CycleError;

/// Pivots below this magnitude are treated as a singular operator.
const PIVOT_THRESHOLD: f64 = 1e-30;

/// LU factors of a dense matrix.
///
/// `L` is unit lower triangular (multipliers stored below the diagonal of
/// `lu`), `U` occupies the diagonal and above. `pivots[k]` records the row
/// exchanged with row `k` at elimination step `k`; the solve replays the
/// exchanges in the same order.
#[derive(Debug, Clone)]
pub struct LuFactors {
    lu: Array2<f64>,
    pivots: Vec<usize>,
    n: usize,
}

/// Factorize `a` with partial pivoting.
///
/// Fails with [`CycleError::SingularOperator`] if a pivot falls below the
/// threshold, which for the supported geometry classes indicates a
/// degenerate mesh.
pub fn lu_factorize(a: &Array2<f64>) -> Result<LuFactors, CycleError> {
    let n = a.nrows();
    assert_eq!(n, a.ncols(), "LU factorization requires a square matrix");

    let mut lu = a.clone();
    let mut pivots: Vec<usize> = (0..n).collect();
    // pivots[k] == k until a row exchange happens at step k

    for k in 0..n {
        // Partial pivoting: largest magnitude in column k
        let mut max_val = lu[[k, k]].abs();
        let mut max_row = k;
        for i in (k + 1)..n {
            let val = lu[[i, k]].abs();
            if val > max_val {
                max_val = val;
                max_row = i;
            }
        }

        if max_val < PIVOT_THRESHOLD {
            return Err(CycleError::SingularOperator);
        }

        if max_row != k {
            for j in 0..n {
                lu.swap([k, j], [max_row, j]);
            }
            pivots[k] = max_row;
        }

        let pivot = lu[[k, k]];
        for i in (k + 1)..n {
            let mult = lu[[i, k]] / pivot;
            lu[[i, k]] = mult;
            for j in (k + 1)..n {
                let update = mult * lu[[k, j]];
                lu[[i, j]] -= update;
            }
        }
    }

    Ok(LuFactors { lu, pivots, n })
}

impl LuFactors {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Solve `A x = b` using the stored factors.
    pub fn solve(&self, b: &Array1<f64>) -> Result<Array1<f64>, CycleError> {
        assert_eq!(b.len(), self.n, "right-hand side length mismatch");
        let mut x = b.clone();

        // Replay the elimination-order row exchanges: P b
        for i in 0..self.n {
            let pivot = self.pivots[i];
            if pivot != i {
                x.swap(i, pivot);
            }
        }

        // Forward substitution: L y = P b
        for i in 0..self.n {
            for j in 0..i {
                let l_ij = self.lu[[i, j]];
                x[i] -= l_ij * x[j];
            }
        }

        // Backward substitution: U x = y
        for i in (0..self.n).rev() {
            for j in (i + 1)..self.n {
                let u_ij = self.lu[[i, j]];
                x[i] -= u_ij * x[j];
            }
            let u_ii = self.lu[[i, i]];
            if u_ii.abs() < PIVOT_THRESHOLD {
                return Err(CycleError::SingularOperator);
            }
            x[i] /= u_ii;
        }

        Ok(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn test_solve_small_system() {
        let a = array![[4.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 2.0]];
        let factors = lu_factorize(&a).unwrap();

        let b = array![1.0, 2.0, 3.0];
        let x = factors.solve(&b).unwrap();
        let ax = a.dot(&x);
        for i in 0..3 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_factors_reused_across_solves() {
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let factors = lu_factorize(&a).unwrap();
        for b in [array![1.0, 0.0], array![0.0, 1.0], array![5.0, -2.0]] {
            let x = factors.solve(&b).unwrap();
            let ax = a.dot(&x);
            assert_relative_eq!(ax[0], b[0], epsilon = 1e-12);
            assert_relative_eq!(ax[1], b[1], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_pivoting_handles_zero_diagonal() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let factors = lu_factorize(&a).unwrap();
        let x = factors.solve(&array![2.0, 3.0]).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-14);
        assert_relative_eq!(x[1], 2.0, epsilon = 1e-14);
    }

    #[test]
    fn test_cyclic_pivot_permutation() {
        // Pivoting turns this into a 3-cycle of rows, which a single pass of
        // self-inverse swaps would cancel; the solve must replay the
        // exchanges in elimination order.
        let a = array![[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]];
        let factors = lu_factorize(&a).unwrap();
        let x = factors.solve(&array![1.0, 2.0, 3.0]).unwrap();
        assert_relative_eq!(x[0], 3.0, epsilon = 1e-14);
        assert_relative_eq!(x[1], 1.0, epsilon = 1e-14);
        assert_relative_eq!(x[2], 2.0, epsilon = 1e-14);

        let a = array![[0.1, 2.0, 1.0], [3.0, 0.2, 1.0], [1.0, 4.0, 0.3]];
        let factors = lu_factorize(&a).unwrap();
        let b = array![1.0, -2.0, 0.5];
        let x = factors.solve(&b).unwrap();
        let ax = a.dot(&x);
        for i in 0..3 {
            assert_relative_eq!(ax[i], b[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular_matrix_rejected() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        assert!(matches!(
            lu_factorize(&a),
            Err(CycleError::SingularOperator)
        ));
    }

    #[test]
    fn test_zero_rhs_solves_to_zero_exactly() {
        let a = array![[4.0, 1.0], [1.0, 3.0]];
        let factors = lu_factorize(&a).unwrap();
        let x = factors.solve(&array![0.0, 0.0]).unwrap();
        assert_eq!(x[0], 0.0);
        assert_eq!(x[1], 0.0);
    }
}
