//! Bracketed scalar root finding (Brent's method).
//!
//! Combines bisection, secant, and inverse quadratic interpolation; given a
//! bracket with a sign change, convergence to a root is guaranteed. Used for
//! the per-element slip-rate solves, where the friction balance is strictly
//! monotone and has exactly one real root.

/// Failure modes of a bracketed root search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RootError {
    /// The function has the same sign at both bracket ends.
    NoSignChange {
        /// Lower bracket bound
        lo: f64,
        /// Upper bracket bound
        hi: f64,
    },
    /// The iteration budget was exhausted before convergence.
    MaxIterations {
        /// The budget that was exceeded
        max_iter: usize,
    },
}

/// Find a root of `f` in `[lo, hi]` to absolute tolerance `tol_abs` plus a
/// machine-precision relative term.
pub fn brent<F: Fn(f64) -> f64>(
    f: F,
    lo: f64,
    hi: f64,
    tol_abs: f64,
    max_iter: usize,
) -> Result<f64, RootError> {
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if fa.signum() == fb.signum() {
        return Err(RootError::NoSignChange { lo, hi });
    }

    let mut c = b;
    let mut fc = fb;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..max_iter {
        if fb.signum() == fc.signum() {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * tol_abs;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Attempt inverse quadratic interpolation (secant when a == c)
            let s = fb / fa;
            let (mut p, mut q);
            if a == c {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                let r0 = fa / fc;
                let r1 = fb / fc;
                p = s * (2.0 * xm * r0 * (r0 - r1) - (b - a) * (r1 - 1.0));
                q = (r0 - 1.0) * (r1 - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();

            let min1 = 3.0 * xm * q - (tol1 * q).abs();
            let min2 = (e * q).abs();
            if 2.0 * p < min1.min(min2) {
                // Interpolation accepted
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
    }

    Err(RootError::MaxIterations { max_iter })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_root() {
        // x^3 - 2x - 5 = 0, classic Brent test case
        let root = brent(|x| x * x * x - 2.0 * x - 5.0, 2.0, 3.0, 1e-15, 100).unwrap();
        assert_relative_eq!(root, 2.0945514815423265, epsilon = 1e-12);
    }

    #[test]
    fn test_transcendental_root() {
        // cos(x) = x
        let root = brent(|x| x.cos() - x, 0.0, 1.0, 1e-15, 100).unwrap();
        assert_relative_eq!(root, 0.7390851332151607, epsilon = 1e-12);
    }

    #[test]
    fn test_root_at_bracket_end() {
        let root = brent(|x| x, 0.0, 1.0, 1e-15, 100).unwrap();
        assert_eq!(root, 0.0);
    }

    #[test]
    fn test_no_sign_change_rejected() {
        let result = brent(|x| x * x + 1.0, -1.0, 1.0, 1e-15, 100);
        assert!(matches!(result, Err(RootError::NoSignChange { .. })));
    }

    #[test]
    fn test_steep_monotone_function() {
        // Mimics the friction balance: steep arcsinh plus linear damping
        let f = |v: f64| -20.0 + 5.0 * (v * 1e10).asinh() + 4.6 * v;
        let root = brent(f, -1e10, 1e10, 1e-30, 200).unwrap();
        assert!(f(root).abs() < 1e-8);
    }
}
