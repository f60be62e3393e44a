//! Fundamental solutions of the planar Laplace operator.
//!
//! The whole-space kernel is the logarithmic potential; the free-surface
//! variants superpose the kernel with its evaluation at the observation point
//! mirrored across the `x1 = 0` plane (method of images), which enforces a
//! zero-traction free surface there.

use std::f64::consts::PI;

use crate::mesh::element::{dot, norm, sub, Point};

/// Fundamental solution signature `G(x, xi)`.
pub type Kernel = fn(Point, Point) -> f64;

/// Directional-derivative signature `dG/dn(x, xi, n)`.
pub type KernelDeriv = fn(Point, Point, Point) -> f64;

/// A kernel pair: fundamental solution and its directional derivative.
#[derive(Debug, Clone, Copy)]
pub struct Greens {
    /// Fundamental solution
    pub g: Kernel,
    /// Directional derivative along a given normal
    pub dg_dn: KernelDeriv,
}

/// Kernel pair for the homogeneous whole space.
pub const WHOLE_SPACE: Greens = Greens {
    g: full_space,
    dg_dn: full_space_dn,
};

/// Kernel pair for the half space with a free surface at `x1 = 0`.
pub const FREE_SURFACE: Greens = Greens {
    g: half_space,
    dg_dn: half_space_dn,
};

/// Logarithmic potential `-ln|x - xi| / 2 pi`, singular at `x = xi`.
pub fn full_space(x: Point, xi: Point) -> f64 {
    -norm(sub(x, xi)).ln() / (2.0 * PI)
}

/// Directional derivative of [`full_space`] along the normal `n`.
///
/// Returns exactly zero when the displacement is numerically orthogonal to
/// the normal; the machine-epsilon guard avoids 0/0 on the BEM diagonal,
/// where the collocation point lies on the element itself.
pub fn full_space_dn(x: Point, xi: Point, n: Point) -> f64 {
    let d = sub(x, xi);
    let dn = dot(d, n);
    if dn.abs() < f64::EPSILON {
        0.0
    } else {
        dn / (dot(d, d) * 2.0 * PI)
    }
}

/// Free-surface fundamental solution by the method of images.
pub fn half_space(x: Point, xi: Point) -> f64 {
    full_space(x, xi) + full_space([x[0], -x[1]], xi)
}

/// Directional derivative of [`half_space`].
pub fn half_space_dn(x: Point, xi: Point, n: Point) -> f64 {
    full_space_dn(x, xi, n) + full_space_dn([x[0], -x[1]], xi, n)
}
