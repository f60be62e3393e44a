//! Gauss-Kronrod quadrature rule.
//!
//! 15-point Kronrod extension of 7-point Gauss-Legendre on `[-1, 1]`. The
//! embedded Gauss result provides the per-panel error estimate used by the
//! adaptive driver. All nodes are strictly interior, so integrands with
//! integrable endpoint singularities are never evaluated at the singular
//! point.

// Allow excessive precision for high-precision quadrature constants
#![allow(clippy::excessive_precision)]

/// Kronrod abscissas on `[0, 1]`; the rule is symmetric about zero.
/// Odd-indexed entries are the embedded 7-point Gauss nodes.
static GK15_X: [f64; 8] = [
    0.991455371120813,
    0.949107912342759,
    0.864864423359769,
    0.741531185599394,
    0.586087235467691,
    0.405845151377397,
    0.207784955007898,
    0.000000000000000,
];

/// Kronrod weights matching [`GK15_X`].
static GK15_WK: [f64; 8] = [
    0.022935322010529,
    0.063092092629979,
    0.104790010322250,
    0.140653259715525,
    0.169004726639267,
    0.190350578064785,
    0.204432940075298,
    0.209482141084728,
];

/// Weights of the embedded 7-point Gauss rule (nodes `GK15_X[1], [3], [5], [7]`).
static GK15_WG: [f64; 4] = [
    0.129484966168870,
    0.279705391489277,
    0.381830050505119,
    0.417959183673469,
];

/// Evaluate the 15-point Kronrod rule on `[a, b]`.
///
/// Returns `(integral, error_estimate)` where the estimate is the absolute
/// difference between the Kronrod and the embedded Gauss result.
pub fn gauss_kronrod<F: Fn(f64) -> f64>(f: &F, a: f64, b: f64) -> (f64, f64) {
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(centre);
    let mut result_kronrod = GK15_WK[7] * fc;
    let mut result_gauss = GK15_WG[3] * fc;

    // Gauss nodes (odd Kronrod indices) contribute to both rules
    for j in 0..3 {
        let idx = 2 * j + 1;
        let fsum = f(centre - half * GK15_X[idx]) + f(centre + half * GK15_X[idx]);
        result_kronrod += GK15_WK[idx] * fsum;
        result_gauss += GK15_WG[j] * fsum;
    }

    // Kronrod-only nodes (even indices)
    for j in 0..4 {
        let idx = 2 * j;
        let fsum = f(centre - half * GK15_X[idx]) + f(centre + half * GK15_X[idx]);
        result_kronrod += GK15_WK[idx] * fsum;
    }

    let integral = result_kronrod * half;
    let error = ((result_kronrod - result_gauss) * half).abs();
    (integral, error)
}
