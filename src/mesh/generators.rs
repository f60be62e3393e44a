//! Mesh construction helpers for straight-line boundaries.

use crate::error::CycleError;
use crate::mesh::element::{dot, norm, sub, BoundaryElement, LineElement, Point};

/// Tessellate the segment from `a` to `b` into near-equal finite elements.
///
/// The element count is `ceil(|b - a| / resolution)`; every sub-segment
/// inherits the shared outward normal and fault flag.
pub fn tessellate_line(
    a: Point,
    b: Point,
    resolution: f64,
    normal: Point,
    is_fault: bool,
) -> Result<Vec<BoundaryElement>, CycleError> {
    if resolution <= 0.0 || !resolution.is_finite() {
        return Err(CycleError::geometry(format!(
            "non-positive tessellation resolution {resolution}"
        )));
    }
    let h = sub(b, a);
    let count = (norm(h) / resolution).ceil() as usize;
    let mut elements = Vec::with_capacity(count);
    for k in 0..count {
        let t0 = k as f64 / count as f64;
        let t1 = (k + 1) as f64 / count as f64;
        let p0 = [a[0] + t0 * h[0], a[1] + t0 * h[1]];
        let p1 = [a[0] + t1 * h[0], a[1] + t1 * h[1]];
        elements.push(BoundaryElement::Line(LineElement::new(
            p0, p1, normal, is_fault,
        )?));
    }
    Ok(elements)
}

/// Outward unit normal of the segment `a` -> `b` in a star-shaped domain.
///
/// The segment direction is rotated by 90 degrees and the sign is chosen so
/// that `dot(star_centre - a, normal) < 0`, i.e. the normal points away from
/// the interior reference point.
pub fn line_normal(a: Point, b: Point, star_centre: Point) -> Result<Point, CycleError> {
    let h = sub(b, a);
    let len = norm(h);
    if len <= 0.0 || !len.is_finite() {
        return Err(CycleError::geometry("zero-length segment in line_normal"));
    }
    let mut n = [-h[1] / len, h[0] / len];
    let c = sub(star_centre, a);
    if dot(c, n) >= 0.0 {
        n = [-n[0], -n[1]];
    }
    Ok(n)
}

/// Number of fault-flagged elements in the mesh.
pub fn num_fault_elements(mesh: &[BoundaryElement]) -> usize {
    mesh.iter().filter(|e| e.is_fault()).count()
}
