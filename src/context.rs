//! Simulation context: factored operators, parameters, and fault physics.

use ndarray::{Array1, Array2};

use crate::assembly::{assemble_coupling, assemble_lhs};
use crate::error::CycleError;
use crate::fault::{FaultMap, InverseFaultMap};
use crate::green::Greens;
use crate::mesh::BoundaryElement;
use crate::params::{ConstantParams, VariableParams};
use crate::rootfind::{brent, RootError};
use crate::solver::{lu_factorize, LuFactors};

/// Half-width of the slip-rate search bracket [m/s].
///
/// The physically expected slip rate spans roughly from well below the plate
/// rate (~1e-12 m/s in interseismic creep) to coseismic rates of a few m/s.
/// The bracket extends many decades beyond both extremes; the regularized
/// friction law grows only logarithmically in V, so the bracket ends stay far
/// from floating-point overflow.
const SLIP_RATE_BRACKET: f64 = 1e10;

/// Absolute tolerance floor for the slip-rate root; the effective tolerance
/// is dominated by the machine-precision relative term near the root.
const SLIP_RATE_TOL: f64 = 1e-30;

/// Iteration budget for one slip-rate solve.
const SLIP_RATE_MAX_ITER: usize = 200;

/// Everything needed to evaluate the right-hand side of the cycle ODE.
///
/// Assembly and factorization happen exactly once, in [`Context::new`]; the
/// context is immutable afterwards and safe to share across threads.
#[derive(Debug, Clone)]
pub struct Context {
    lhs: LuFactors,
    coupling: Array2<f64>,
    map: FaultMap,
    imap: InverseFaultMap,
    vp: VariableParams,
    cp: ConstantParams,
}

impl Context {
    /// Assemble and factorize the BEM operators and build the index maps.
    ///
    /// Fails with [`CycleError::SingularOperator`] for degenerate geometry
    /// and with [`CycleError::NumericalInstability`] if an assembly
    /// quadrature does not converge.
    pub fn new(
        mesh: &[BoundaryElement],
        greens: &Greens,
        vp: VariableParams,
        cp: ConstantParams,
    ) -> Result<Self, CycleError> {
        log::info!(
            "assembling BEM operators for {} boundary elements ({} on fault)",
            mesh.len(),
            vp.len()
        );
        let a = assemble_lhs(greens, mesh)?;
        let coupling = assemble_coupling(greens, mesh)?;
        let lhs = lu_factorize(&a)?;
        log::debug!("left-hand operator factorized, N = {}", lhs.dim());
        Ok(Self {
            lhs,
            coupling,
            map: FaultMap::new(mesh),
            imap: InverseFaultMap::new(mesh),
            vp,
            cp,
        })
    }

    /// Number of fault elements `Nf`.
    pub fn num_fault_elements(&self) -> usize {
        self.map.len()
    }

    /// Constant parameter record.
    pub fn constants(&self) -> &ConstantParams {
        &self.cp
    }

    /// Per-fault-element parameter record.
    pub fn variables(&self) -> &VariableParams {
        &self.vp
    }

    /// Fault traction at time `time` for the on-fault slip vector `slip`.
    ///
    /// The slip is a displacement jump across the fault, so each boundary
    /// face carries half of it, measured relative to the accumulated plate
    /// motion (backslip): fault entries of the boundary vector are
    /// `(slip - plate_rate * time) / 2`, non-fault entries are zero. The
    /// coupling operator is applied, the factored left-hand operator is
    /// solved against that forcing, and the fault-indexed entries are scaled
    /// by the shear modulus and offset by the background traction. Linear in
    /// slip; at `time = 0` and zero slip the result equals the background
    /// traction exactly.
    pub fn traction(&self, time: f64, slip: &Array1<f64>) -> Result<Array1<f64>, CycleError> {
        let n = self.imap.len();
        let nf = self.map.len();
        assert_eq!(slip.len(), nf, "slip vector length mismatch");

        let backslip = self.cp.plate_rate * time;
        let mut displacement = Array1::zeros(n);
        for i in 0..n {
            if let Some(f) = self.imap.fault_index(i) {
                displacement[i] = (slip[f] - backslip) / 2.0;
            }
        }

        let forcing = self.coupling.dot(&displacement);
        let potential = self.lhs.solve(&forcing)?;

        let mut tau = Array1::zeros(nf);
        for f in 0..nf {
            tau[f] = self.vp.tau_pre[f] + self.cp.mu * potential[self.map.boundary_index(f)];
        }
        Ok(tau)
    }

    /// Closed-form initial state for fault element `f`.
    ///
    /// Inverts the friction law at the configured initial slip rate and the
    /// negated background traction; no search required.
    pub fn psi0(&self, f: usize) -> f64 {
        let tau = -self.vp.tau_pre[f];
        let a = self.vp.a[f];
        let s = ((tau - self.cp.eta * self.cp.v_init) / (a * self.cp.normal_stress)).sinh();
        a * (2.0 * self.cp.v_ref / self.cp.v_init * s).ln()
    }

    /// Regularized rate-and-state shear strength.
    ///
    /// Strictly increasing in `v` for `v >= 0` and in `psi` for fixed
    /// `v > 0`.
    pub fn friction_law(&self, f: usize, v: f64, psi: f64) -> f64 {
        let a = self.vp.a[f];
        let arg = v / (2.0 * self.cp.v_ref) * (psi / a).exp();
        self.cp.normal_stress * a * arg.asinh()
    }

    /// Slip rate of fault element `f`: the unique root `V` of
    /// `tau + friction_law(V, psi) + eta * V = 0`.
    ///
    /// The balance is strictly increasing in `V` (friction and radiation
    /// damping both increase), so the bracketed search has exactly one root.
    pub fn slip_rate(&self, f: usize, tau: f64, psi: f64) -> Result<f64, CycleError> {
        let balance = |v: f64| tau + self.friction_law(f, v, psi) + self.cp.eta * v;
        brent(
            balance,
            -SLIP_RATE_BRACKET,
            SLIP_RATE_BRACKET,
            SLIP_RATE_TOL,
            SLIP_RATE_MAX_ITER,
        )
        .map_err(|err| match err {
            RootError::NoSignChange { lo, hi } => CycleError::RootBracket { lo, hi, tau, psi },
            RootError::MaxIterations { max_iter } => CycleError::instability(format!(
                "slip-rate solve for element {f} exceeded {max_iter} iterations \
                 (tau = {tau}, psi = {psi})"
            )),
        })
    }

    /// Aging-law state derivative `b V0/L (exp((f0 - psi)/b) - V/V0)`.
    pub fn state_law(&self, _f: usize, v: f64, psi: f64) -> f64 {
        let cp = &self.cp;
        cp.b * cp.v_ref / cp.d_c * (((cp.f0 - psi) / cp.b).exp() - v / cp.v_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::green::WHOLE_SPACE;
    use crate::mesh::tessellate_line;
    use approx::assert_relative_eq;

    fn small_context() -> Context {
        let mesh = tessellate_line([0.0, 0.1], [0.0, 0.5], 0.1, [-1.0, 0.0], true).unwrap();
        let cp = ConstantParams::new(2.670, 3.464, 1e-9, 1e-6, 0.015, 0.014, 0.6, 50.0, 1e-9);
        let vp = VariableParams::new(&mesh, |_| 0.010, |_| -20.0);
        Context::new(&mesh, &WHOLE_SPACE, vp, cp).unwrap()
    }

    #[test]
    fn test_psi0_inverts_friction_law() {
        let ctx = small_context();
        // At the background traction the initial state reproduces v_init
        for f in 0..ctx.num_fault_elements() {
            let psi = ctx.psi0(f);
            let residual = ctx.variables().tau_pre[f]
                + ctx.friction_law(f, ctx.constants().v_init, psi)
                + ctx.constants().eta * ctx.constants().v_init;
            assert_relative_eq!(residual, 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_friction_increasing_in_state() {
        let ctx = small_context();
        let v = 1e-9;
        let mut last = ctx.friction_law(0, v, 0.0);
        for k in 1..=10 {
            let next = ctx.friction_law(0, v, 0.1 * k as f64);
            assert!(next > last);
            last = next;
        }
    }

    #[test]
    fn test_state_law_zero_at_steady_state() {
        let ctx = small_context();
        let cp = *ctx.constants();
        // psi = f0 + b ln(V0/V) is the aging-law steady state
        let v = 3e-8;
        let psi = cp.f0 + cp.b * (cp.v_ref / v).ln();
        assert_relative_eq!(ctx.state_law(0, v, psi), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_slip_rate_unbracketable_traction_is_error() {
        let ctx = small_context();
        // Traction far beyond what radiation damping can balance at the
        // bracket ends: no sign change, surfaced with the offending inputs
        let result = ctx.slip_rate(0, -1e12, 0.5);
        match result {
            Err(CycleError::RootBracket { lo, hi, tau, psi }) => {
                assert_eq!(lo, -SLIP_RATE_BRACKET);
                assert_eq!(hi, SLIP_RATE_BRACKET);
                assert_eq!(tau, -1e12);
                assert_eq!(psi, 0.5);
            }
            other => panic!("expected RootBracket, got {other:?}"),
        }
    }

    #[test]
    fn test_slip_rate_negative_traction_pushes_backwards() {
        let ctx = small_context();
        // Positive traction drives negative slip rate and vice versa
        let v = ctx.slip_rate(0, 5.0, 0.5).unwrap();
        assert!(v < 0.0);
        let v = ctx.slip_rate(0, -5.0, 0.5).unwrap();
        assert!(v > 0.0);
    }
}
