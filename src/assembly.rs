//! Collocation assembly of the dense BEM operators.
//!
//! The left-hand operator `A` collocates the fundamental solution; the
//! coupling operator `B` collocates its normal derivative and carries the
//! one-half jump term on the diagonal. Every entry is integrated as two
//! panels split at the element midpoint parameter, which places the diagonal
//! log singularity (collocation at the midpoint) at a panel endpoint and
//! isolates the near-singular behavior for neighboring entries. Rows are
//! independent and assembled in parallel.

use ndarray::Array2;
use rayon::prelude::*;

use crate::error::CycleError;
use crate::green::Greens;
use crate::integration::{quad, QuadratureConfig};
use crate::mesh::BoundaryElement;

/// Assemble the left-hand operator `A`.
///
/// Entry `(i, j)` is the integral of the fundamental solution between the
/// collocation point of element `i` and points swept across element `j`,
/// weighted by element `j`'s integration factor.
pub fn assemble_lhs(
    greens: &Greens,
    mesh: &[BoundaryElement],
) -> Result<Array2<f64>, CycleError> {
    let n = mesh.len();
    let config = QuadratureConfig::default();
    let g = greens.g;

    let rows: Result<Vec<Vec<f64>>, CycleError> = (0..n)
        .into_par_iter()
        .map(|i| {
            let xc = mesh[i].collocation_point();
            let mut row = vec![0.0; n];
            for (j, element) in mesh.iter().enumerate() {
                let kernel = |t: f64| g(xc, element.xi(t)) * element.factor(t);
                row[j] =
                    quad(&kernel, -1.0, 0.0, &config)? + quad(&kernel, 0.0, 1.0, &config)?;
            }
            Ok(row)
        })
        .collect();

    Ok(into_matrix(rows?, n))
}

/// Assemble the coupling operator `B = I/2 + dG/dn collocation`.
///
/// The diagonal one-half identity is the jump relation of the double-layer
/// potential across the boundary; the derivative kernel itself vanishes on
/// the diagonal of straight elements (displacement orthogonal to the normal)
/// but the free-surface image term does not.
pub fn assemble_coupling(
    greens: &Greens,
    mesh: &[BoundaryElement],
) -> Result<Array2<f64>, CycleError> {
    let n = mesh.len();
    let config = QuadratureConfig::default();
    let dg_dn = greens.dg_dn;

    let rows: Result<Vec<Vec<f64>>, CycleError> = (0..n)
        .into_par_iter()
        .map(|i| {
            let xc = mesh[i].collocation_point();
            let mut row = vec![0.0; n];
            for (j, element) in mesh.iter().enumerate() {
                let normal = element.normal();
                let kernel = |t: f64| dg_dn(xc, element.xi(t), normal) * element.factor(t);
                row[j] =
                    quad(&kernel, -1.0, 0.0, &config)? + quad(&kernel, 0.0, 1.0, &config)?;
                if i == j {
                    row[j] += 0.5;
                }
            }
            Ok(row)
        })
        .collect();

    Ok(into_matrix(rows?, n))
}

fn into_matrix(rows: Vec<Vec<f64>>, n: usize) -> Array2<f64> {
    let mut matrix = Array2::zeros((n, n));
    for (i, row) in rows.into_iter().enumerate() {
        for (j, value) in row.into_iter().enumerate() {
            matrix[[i, j]] = value;
        }
    }
    matrix
}
