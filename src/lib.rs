//! # seas-bem: quasi-dynamic earthquake cycle simulation
//!
//! Computes the quasi-dynamic evolution of slip on a fault embedded in an
//! elastic half-space by coupling a boundary element discretization of the
//! elastostatic boundary integral equation with rate-and-state friction.
//!
//! The boundary is tessellated into straight finite segments plus
//! semi-infinite rays (reparameterized so kernel integrals stay convergent);
//! the dense collocation operators are assembled once and the left-hand
//! operator is LU-factored once. The resulting [`Context`] exposes the
//! traction solve and the per-element friction physics, and the [`ode`]
//! module packages them as an initial vector plus right-hand-side function
//! for an external ODE/DAE integrator.
//!
//! ```no_run
//! use seas_bem::{
//!     ode, tessellate_line, BoundaryElement, ConstantParams, Context, LineElement,
//!     RayElement, VariableParams, FREE_SURFACE,
//! };
//!
//! # fn main() -> Result<(), seas_bem::CycleError> {
//! let normal = [-1.0, 0.0];
//! let mut mesh = vec![BoundaryElement::Line(LineElement::new(
//!     [0.0, 0.0],
//!     [0.0, 0.1],
//!     normal,
//!     false,
//! )?)];
//! mesh.extend(tessellate_line([0.0, 0.1], [0.0, 1.0], 0.1, normal, true)?);
//! mesh.push(BoundaryElement::Ray(RayElement::new([0.0, 1.0], normal)?));
//!
//! let cp = ConstantParams::new(2.670, 3.464, 1e-9, 1e-6, 0.015, 0.014, 0.6, 50.0, 1e-9);
//! let vp = VariableParams::new(&mesh, |_| 0.010, |_| -20.0);
//! let ctx = Context::new(&mesh, &FREE_SURFACE, vp, cp)?;
//!
//! let y = ode::y0(&ctx);
//! let dy = ode::rhs(0.0, &y, &ctx, None)?;
//! assert_eq!(dy.len(), y.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod assembly;
pub mod context;
pub mod error;
pub mod fault;
pub mod green;
pub mod integration;
pub mod mesh;
pub mod monitor;
pub mod ode;
pub mod params;
pub mod rootfind;
pub mod solver;

pub use context::Context;
pub use error::CycleError;
pub use green::{Greens, FREE_SURFACE, WHOLE_SPACE};
pub use mesh::{
    line_normal, num_fault_elements, tessellate_line, BoundaryElement, LineElement, Point,
    RayElement,
};
pub use monitor::PeakRateMonitor;
pub use ode::{rhs, y0, StepObserver, StepSnapshot};
pub use params::{ConstantParams, VariableParams};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
