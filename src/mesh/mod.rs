//! Boundary discretization: elements and straight-line mesh generators.
//!
//! A mesh is an ordered `&[BoundaryElement]`; the element order defines the
//! boundary-index space used by assembly and the fault index maps.

pub mod element;
pub mod generators;

pub use element::{dot, norm, sub, BoundaryElement, LineElement, Point, RayElement};
pub use generators::{line_normal, num_fault_elements, tessellate_line};
