//! Right-hand side and initial condition for the external time integrator.
//!
//! The state vector interleaves slip and friction state per fault element,
//! `[slip_0, psi_0, slip_1, psi_1, ...]`; the pair at position `2 f` always
//! belongs to fault element `f`. The integrator owns the state vector and
//! passes snapshots by reference; each evaluation either completes fully or
//! fails with an error, never returning a partial derivative.

use ndarray::Array1;
use rayon::prelude::*;

use crate::context::Context;
use crate::error::CycleError;

/// Immutable per-step snapshot handed to observers.
#[derive(Debug, Clone, Copy)]
pub struct StepSnapshot<'a> {
    /// Simulation time [s]
    pub time: f64,
    /// On-fault slip [m]
    pub slip: &'a Array1<f64>,
    /// On-fault slip rate [m/s]
    pub slip_rate: &'a Array1<f64>,
    /// Friction state variable
    pub state: &'a Array1<f64>,
    /// Fault traction [MPa]
    pub traction: &'a Array1<f64>,
}

/// Observer invoked once per right-hand-side evaluation, purely for side
/// effects; it cannot alter the returned derivative vector.
pub trait StepObserver {
    /// Called with the decoded snapshot after the derivative is computed.
    fn on_step(&mut self, snapshot: &StepSnapshot<'_>);
}

/// Initial state vector: zero slip, closed-form initial state everywhere.
pub fn y0(ctx: &Context) -> Array1<f64> {
    let nf = ctx.num_fault_elements();
    let mut y = Array1::zeros(2 * nf);
    for f in 0..nf {
        y[2 * f + 1] = ctx.psi0(f);
    }
    y
}

/// Evaluate the right-hand side of the cycle ODE at time `t` and state `y`.
///
/// Performs one traction solve (reusing the factored operator) followed by
/// `Nf` independent slip-rate root solves. Any per-element failure aborts
/// the whole evaluation.
pub fn rhs(
    t: f64,
    y: &Array1<f64>,
    ctx: &Context,
    observer: Option<&mut dyn StepObserver>,
) -> Result<Array1<f64>, CycleError> {
    let nf = ctx.num_fault_elements();
    assert_eq!(y.len(), 2 * nf, "state vector length mismatch");

    let slip = Array1::from_iter((0..nf).map(|f| y[2 * f]));
    let state = Array1::from_iter((0..nf).map(|f| y[2 * f + 1]));
    let tau = ctx.traction(t, &slip)?;

    // Independent per-element solves against the shared immutable context
    let solved: Result<Vec<(f64, f64)>, CycleError> = (0..nf)
        .into_par_iter()
        .map(|f| {
            let v = ctx.slip_rate(f, tau[f], state[f])?;
            Ok((v, ctx.state_law(f, v, state[f])))
        })
        .collect();
    let solved = solved?;

    let slip_rate = Array1::from_iter(solved.iter().map(|&(v, _)| v));
    let mut dy = Array1::zeros(2 * nf);
    for (f, &(v, dpsi)) in solved.iter().enumerate() {
        dy[2 * f] = v;
        dy[2 * f + 1] = dpsi;
    }

    if let Some(observer) = observer {
        observer.on_step(&StepSnapshot {
            time: t,
            slip: &slip,
            slip_rate: &slip_rate,
            state: &state,
            traction: &tau,
        });
    }

    Ok(dy)
}
