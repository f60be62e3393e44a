//! Globally adaptive quadrature.
//!
//! Repeatedly bisects the panel with the largest error estimate until the
//! summed estimate meets the tolerance. Integrable endpoint singularities
//! (the logarithmic BEM kernel at a collocation point) converge because the
//! Kronrod nodes never touch panel endpoints and refinement concentrates at
//! the singular end.

use crate::error::CycleError;
use crate::integration::gauss::gauss_kronrod;

/// Tolerances and budget for one adaptive integral.
#[derive(Debug, Clone, Copy)]
pub struct QuadratureConfig {
    /// Absolute tolerance on the summed error estimate
    pub abs_tol: f64,
    /// Relative tolerance (scaled by the running integral value)
    pub rel_tol: f64,
    /// Maximum number of panels before giving up
    pub max_panels: usize,
}

impl Default for QuadratureConfig {
    fn default() -> Self {
        // The coupling operator is reused unscaled at every right-hand-side
        // evaluation, so the quadrature tolerance must sit well below the
        // discretization error budget.
        Self {
            abs_tol: 1e-12,
            rel_tol: 1e-12,
            max_panels: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Panel {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

/// Integrate `f` over `[a, b]` to the configured tolerance.
///
/// Fails with [`CycleError::NumericalInstability`] if the panel budget is
/// exhausted first; a partial result is never returned.
pub fn quad<F: Fn(f64) -> f64>(
    f: &F,
    a: f64,
    b: f64,
    config: &QuadratureConfig,
) -> Result<f64, CycleError> {
    let (value, error) = gauss_kronrod(f, a, b);
    let mut panels = vec![Panel { a, b, value, error }];

    loop {
        let total_value: f64 = panels.iter().map(|p| p.value).sum();
        let total_error: f64 = panels.iter().map(|p| p.error).sum();
        let tolerance = config.abs_tol.max(config.rel_tol * total_value.abs());
        if total_error <= tolerance {
            return Ok(total_value);
        }
        if panels.len() >= config.max_panels {
            return Err(CycleError::instability(format!(
                "adaptive quadrature on [{a}, {b}] exceeded {} panels \
                 (remaining error estimate {total_error:e})",
                config.max_panels
            )));
        }

        // Bisect the worst panel
        let worst = panels
            .iter()
            .enumerate()
            .max_by(|(_, p), (_, q)| p.error.total_cmp(&q.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let Panel { a: pa, b: pb, .. } = panels.swap_remove(worst);
        let mid = 0.5 * (pa + pb);

        // A panel narrower than the local floating-point spacing cannot be
        // refined further; its estimate is already at the machine limit.
        if mid <= pa || mid >= pb {
            let (value, _) = gauss_kronrod(f, pa, pb);
            panels.push(Panel {
                a: pa,
                b: pb,
                value,
                error: 0.0,
            });
            continue;
        }

        for (qa, qb) in [(pa, mid), (mid, pb)] {
            let (value, error) = gauss_kronrod(f, qa, qb);
            panels.push(Panel {
                a: qa,
                b: qb,
                value,
                error,
            });
        }
    }
}
