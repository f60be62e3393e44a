//! Boundary-element geometry tests.
//!
//! Parameterization, basis weights, and closed-form log-kernel integrals for
//! the finite and semi-infinite element variants.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use seas_bem::integration::{quad, QuadratureConfig};
use seas_bem::mesh::{norm, BoundaryElement, LineElement, RayElement};

fn finite_element() -> BoundaryElement {
    BoundaryElement::Line(LineElement::new([1.0, 1.0], [3.0, 3.0], [-1.0, 1.0], false).unwrap())
}

fn ray_element() -> BoundaryElement {
    BoundaryElement::Ray(RayElement::new([1.0, 1.0], [-1.0, 1.0]).unwrap())
}

#[test]
fn test_finite_parameterization() {
    let line = finite_element();
    assert_abs_diff_eq!(line.xi(-1.0)[0], 1.0);
    assert_abs_diff_eq!(line.xi(-1.0)[1], 1.0);
    assert_abs_diff_eq!(line.xi(0.0)[0], 2.0);
    assert_abs_diff_eq!(line.xi(0.0)[1], 2.0);
    assert_abs_diff_eq!(line.xi(1.0)[0], 3.0);
    assert_abs_diff_eq!(line.xi(1.0)[1], 3.0);
}

#[test]
fn test_finite_basis_is_constant_one() {
    let line = finite_element();
    for theta in [-1.0, 0.0, 1.0] {
        assert_abs_diff_eq!(line.basis(theta), 1.0);
    }
}

#[test]
fn test_finite_collocation_at_midpoint() {
    let line = finite_element();
    let xc = line.collocation_point();
    assert_abs_diff_eq!(xc[0], 2.0);
    assert_abs_diff_eq!(xc[1], 2.0);
}

#[test]
fn test_finite_log_integral_closed_form() {
    // int_{-1}^{1} ln|xi(theta)| factor(theta) dtheta for the segment from
    // (1,1) to (3,3) equals (3 (ln 3 - 1) + 1 + 2 ln|a|) |a| with |a| = sqrt(2).
    let line = finite_element();
    let a_norm = 2.0_f64.sqrt();
    let analytic = (3.0 * (3.0_f64.ln() - 1.0) + 1.0 + 2.0 * a_norm.ln()) * a_norm;

    let config = QuadratureConfig::default();
    let kernel = |t: f64| norm(line.xi(t)).ln() * line.factor(t);
    let numeric = quad(&kernel, -1.0, 1.0, &config).unwrap();
    assert_relative_eq!(numeric, analytic, epsilon = 1e-9);
}

#[test]
fn test_ray_parameterization() {
    let ray = ray_element();
    assert_abs_diff_eq!(ray.xi(-1.0)[0], 1.0);
    assert_abs_diff_eq!(ray.xi(-1.0)[1], 1.0);
    // theta = 0 maps to 3a
    assert_relative_eq!(ray.xi(0.0)[0], 3.0, epsilon = 1e-12);
    assert_relative_eq!(ray.xi(0.0)[1], 3.0, epsilon = 1e-12);
    // theta = 0.99 maps far along the ray
    assert_relative_eq!(ray.xi(0.99)[0], 399.0, epsilon = 1e-9);
    assert_relative_eq!(ray.xi(0.99)[1], 399.0, epsilon = 1e-9);
}

#[test]
fn test_ray_basis_decays_to_zero() {
    let ray = ray_element();
    assert_relative_eq!(ray.basis(-1.0), 1.0, epsilon = 1e-12);
    assert_relative_eq!(ray.basis(0.0), 1.0 / 9.0, epsilon = 1e-12);
    assert_relative_eq!(ray.basis(0.99), 1.0 / (399.0 * 399.0), epsilon = 1e-9);
    assert_abs_diff_eq!(ray.basis(1.0), 0.0);
}

#[test]
fn test_ray_basis_strictly_decreasing() {
    let ray = ray_element();
    let mut last = ray.basis(-1.0);
    let steps = 200;
    for k in 1..=steps {
        let theta = -1.0 + 2.0 * k as f64 / steps as f64;
        let next = ray.basis(theta);
        assert!(
            next < last,
            "basis not strictly decreasing at theta = {theta}"
        );
        last = next;
    }
}

#[test]
fn test_ray_log_integral_closed_form() {
    // int over the ray of ln|x| (|a|/|x|)^2 ds = (1 + ln|a|) |a|
    let ray = ray_element();
    let a_norm = 2.0_f64.sqrt();
    let analytic = (1.0 + a_norm.ln()) * a_norm;

    let config = QuadratureConfig::default();
    let kernel = |t: f64| norm(ray.xi(t)).ln() * ray.factor(t);
    let numeric =
        quad(&kernel, -1.0, 0.0, &config).unwrap() + quad(&kernel, 0.0, 1.0, &config).unwrap();
    assert_relative_eq!(numeric, analytic, epsilon = 1e-9);
}
