//! Numerical quadrature for the boundary-integral assembly.

pub mod adaptive;
pub mod gauss;

pub use adaptive::{quad, QuadratureConfig};
pub use gauss::gauss_kronrod;
