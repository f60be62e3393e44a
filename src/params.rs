//! Material and friction parameters.

use ndarray::Array1;

use crate::mesh::{BoundaryElement, Point};

/// Constant material and friction parameters shared by all fault elements.
#[derive(Debug, Clone, Copy)]
pub struct ConstantParams {
    /// Shear modulus `rho * v_s^2` [MPa]
    pub mu: f64,
    /// Radiation damping coefficient `rho * v_s / 2` [MPa s/m]
    pub eta: f64,
    /// Plate rate [m/s]
    pub plate_rate: f64,
    /// Reference slip rate `V0` [m/s]
    pub v_ref: f64,
    /// Rate-and-state evolution-effect parameter `b`
    pub b: f64,
    /// Critical slip distance `D_c` [m]
    pub d_c: f64,
    /// Reference friction coefficient `f0`
    pub f0: f64,
    /// Ambient effective normal stress [MPa]
    pub normal_stress: f64,
    /// Initial slip rate [m/s]
    pub v_init: f64,
}

impl ConstantParams {
    /// Build the parameter record from the nine physical scalars.
    ///
    /// `rho` is the density [g/m^3] and `v_s` the shear wave velocity [km/s];
    /// the shear modulus and radiation damping coefficient are derived here.
    pub fn new(
        rho: f64,
        v_s: f64,
        plate_rate: f64,
        v_ref: f64,
        b: f64,
        d_c: f64,
        f0: f64,
        normal_stress: f64,
        v_init: f64,
    ) -> Self {
        Self {
            mu: rho * v_s * v_s,
            eta: rho * v_s / 2.0,
            plate_rate,
            v_ref,
            b,
            d_c,
            f0,
            normal_stress,
            v_init,
        }
    }
}

/// Per-fault-element parameters sampled from scalar fields.
///
/// The direct-effect parameter `a` and the background traction are evaluated
/// once at every fault collocation point; read-only afterwards.
#[derive(Debug, Clone)]
pub struct VariableParams {
    /// Fault collocation points, in fault-index order
    pub x: Vec<Point>,
    /// Direct-effect parameter per fault element
    pub a: Array1<f64>,
    /// Background (pre-stress) traction per fault element [MPa]
    pub tau_pre: Array1<f64>,
}

impl VariableParams {
    /// Sample both fields at the fault collocation points, one mesh pass.
    pub fn new(
        mesh: &[BoundaryElement],
        a_field: impl Fn(Point) -> f64,
        tau_field: impl Fn(Point) -> f64,
    ) -> Self {
        let x: Vec<Point> = mesh
            .iter()
            .filter(|e| e.is_fault())
            .map(|e| e.collocation_point())
            .collect();
        let a = Array1::from_iter(x.iter().map(|&p| a_field(p)));
        let tau_pre = Array1::from_iter(x.iter().map(|&p| tau_field(p)));
        Self { x, a, tau_pre }
    }

    /// Number of fault elements covered.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether no fault elements were found.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
