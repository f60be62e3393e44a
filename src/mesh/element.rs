//! Boundary elements for the half-space discretization.
//!
//! The boundary is tessellated into straight finite segments plus one or more
//! semi-infinite rays. Each element maps the canonical parameter
//! `theta in [-1, 1]` to a physical point and carries the basis weight and
//! integration factor needed by the collocation quadratures.

use crate::error::CycleError;

/// A point (or vector) in the plane.
pub type Point = [f64; 2];

/// Dot product of two plane vectors.
pub fn dot(a: Point, b: Point) -> f64 {
    a[0] * b[0] + a[1] * b[1]
}

/// Difference `a - b` of two plane points.
pub fn sub(a: Point, b: Point) -> Point {
    [a[0] - b[0], a[1] - b[1]]
}

/// Euclidean norm of a plane vector.
pub fn norm(a: Point) -> f64 {
    dot(a, a).sqrt()
}

fn unit(v: Point, what: &str) -> Result<Point, CycleError> {
    let len = norm(v);
    if len <= 0.0 || !len.is_finite() {
        return Err(CycleError::geometry(format!("zero-magnitude {what}")));
    }
    Ok([v[0] / len, v[1] / len])
}

/// A finite straight segment of the boundary.
#[derive(Debug, Clone)]
pub struct LineElement {
    a: Point,
    h: Point,
    h_norm: f64,
    n: Point,
    is_fault: bool,
}

impl LineElement {
    /// Create a segment from `a` to `b` with the given outward normal.
    ///
    /// Fails if the segment has zero length or the normal has zero magnitude.
    pub fn new(a: Point, b: Point, normal: Point, is_fault: bool) -> Result<Self, CycleError> {
        let h = sub(b, a);
        let h_norm = norm(h);
        if h_norm <= 0.0 || !h_norm.is_finite() {
            return Err(CycleError::geometry(format!(
                "zero-length segment at ({}, {})",
                a[0], a[1]
            )));
        }
        Ok(Self {
            a,
            h,
            h_norm,
            n: unit(normal, "segment normal")?,
            is_fault,
        })
    }

    /// Affine map from `[-1, 1]` onto the segment.
    pub fn xi(&self, theta: f64) -> Point {
        [
            self.a[0] + self.h[0] * (theta + 1.0) / 2.0,
            self.a[1] + self.h[1] * (theta + 1.0) / 2.0,
        ]
    }

    /// Constant basis weight.
    pub fn basis(&self, _theta: f64) -> f64 {
        1.0
    }

    /// Integration factor `basis * |xi'|`, the constant half-length.
    pub fn factor(&self, _theta: f64) -> f64 {
        self.h_norm / 2.0
    }

    /// Collocation point: the segment midpoint.
    pub fn collocation_point(&self) -> Point {
        self.xi(0.0)
    }
}

/// A semi-infinite ray starting at `a` and extending in the direction of `a`.
///
/// The rational parameterization sends `theta = -1` to the origin `a` and
/// `theta -> 1` to infinity. The basis weight `(|a|/|xi|)^2` vanishes in that
/// limit, which keeps integrals of algebraically decaying kernels over this
/// element convergent. Ray elements are never part of the fault.
#[derive(Debug, Clone)]
pub struct RayElement {
    a: Point,
    a_norm: f64,
    n: Point,
}

impl RayElement {
    /// Create a ray with origin and direction `a` and the given outward normal.
    pub fn new(a: Point, normal: Point) -> Result<Self, CycleError> {
        let a_norm = norm(a);
        if a_norm <= 0.0 || !a_norm.is_finite() {
            return Err(CycleError::geometry("zero-magnitude ray origin"));
        }
        Ok(Self {
            a,
            a_norm,
            n: unit(normal, "ray normal")?,
        })
    }

    /// Rational map from `[-1, 1)` onto the ray; `theta = 1` maps to infinity.
    pub fn xi(&self, theta: f64) -> Point {
        let s = (theta + 3.0) / (1.0 - theta);
        [self.a[0] * s, self.a[1] * s]
    }

    /// Decaying basis weight `(|a| / |xi(theta)|)^2`.
    pub fn basis(&self, theta: f64) -> f64 {
        let r = (1.0 - theta) / (theta + 3.0);
        r * r
    }

    /// Integration factor `basis * |xi'|`.
    ///
    /// The Jacobian `4|a|/(1-theta)^2` diverges as `theta -> 1`; the product
    /// with the basis weight simplifies to `4|a|/(theta+3)^2`, finite on all
    /// of `[-1, 1]`.
    pub fn factor(&self, theta: f64) -> f64 {
        let s = theta + 3.0;
        4.0 * self.a_norm / (s * s)
    }

    /// Collocation point: the finite origin `xi(-1) = a`.
    pub fn collocation_point(&self) -> Point {
        self.a
    }
}

/// A boundary element: finite segment or semi-infinite ray.
///
/// The operation set is fixed and small, so a closed enum is used rather than
/// a trait object; assembly loops dispatch statically.
#[derive(Debug, Clone)]
pub enum BoundaryElement {
    /// Finite straight segment
    Line(LineElement),
    /// Semi-infinite ray
    Ray(RayElement),
}

impl BoundaryElement {
    /// Map the canonical parameter to a physical point.
    pub fn xi(&self, theta: f64) -> Point {
        match self {
            BoundaryElement::Line(e) => e.xi(theta),
            BoundaryElement::Ray(e) => e.xi(theta),
        }
    }

    /// Basis weight at `theta`.
    pub fn basis(&self, theta: f64) -> f64 {
        match self {
            BoundaryElement::Line(e) => e.basis(theta),
            BoundaryElement::Ray(e) => e.basis(theta),
        }
    }

    /// Integration factor `basis * |xi'|` at `theta`.
    pub fn factor(&self, theta: f64) -> f64 {
        match self {
            BoundaryElement::Line(e) => e.factor(theta),
            BoundaryElement::Ray(e) => e.factor(theta),
        }
    }

    /// Point at which the integral equation is collocated.
    pub fn collocation_point(&self) -> Point {
        match self {
            BoundaryElement::Line(e) => e.collocation_point(),
            BoundaryElement::Ray(e) => e.collocation_point(),
        }
    }

    /// Outward unit normal.
    pub fn normal(&self) -> Point {
        match self {
            BoundaryElement::Line(e) => e.n,
            BoundaryElement::Ray(e) => e.n,
        }
    }

    /// Whether this element belongs to the fault.
    pub fn is_fault(&self) -> bool {
        match self {
            BoundaryElement::Line(e) => e.is_fault,
            BoundaryElement::Ray(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_rejects_zero_length() {
        let result = LineElement::new([1.0, 2.0], [1.0, 2.0], [0.0, 1.0], false);
        assert!(matches!(result, Err(CycleError::Geometry { .. })));
    }

    #[test]
    fn test_line_rejects_zero_normal() {
        let result = LineElement::new([0.0, 0.0], [1.0, 0.0], [0.0, 0.0], false);
        assert!(matches!(result, Err(CycleError::Geometry { .. })));
    }

    #[test]
    fn test_line_normal_is_normalized() {
        let e = LineElement::new([0.0, 0.0], [1.0, 0.0], [0.0, 5.0], false).unwrap();
        assert_relative_eq!(norm(e.n), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_ray_rejects_zero_origin() {
        let result = RayElement::new([0.0, 0.0], [1.0, 0.0]);
        assert!(matches!(result, Err(CycleError::Geometry { .. })));
    }

    #[test]
    fn test_ray_factor_finite_at_limit() {
        let e = RayElement::new([1.0, 1.0], [-1.0, 1.0]).unwrap();
        let a_norm = 2.0_f64.sqrt();
        // basis * Jacobian stays finite as theta -> 1
        assert_relative_eq!(e.factor(1.0), a_norm / 4.0, epsilon = 1e-14);
        assert_relative_eq!(e.factor(-1.0), a_norm, epsilon = 1e-14);
    }

    #[test]
    fn test_ray_never_fault() {
        let e = BoundaryElement::Ray(RayElement::new([0.0, 1.0], [-1.0, 0.0]).unwrap());
        assert!(!e.is_fault());
    }
}
