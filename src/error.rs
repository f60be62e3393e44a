//! Error types for the earthquake cycle solver.
//!
//! Structured error handling with `thiserror`. Setup errors (geometry,
//! operator assembly) abort problem construction; per-step errors abort the
//! current right-hand-side evaluation and are surfaced to the caller instead
//! of substituting a default value.

use thiserror::Error;

/// Errors that can occur during setup or a right-hand-side evaluation.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The assembled left-hand operator is not invertible. Raised at context
    /// construction for degenerate geometries.
    #[error("left-hand BEM operator is singular or nearly singular")]
    SingularOperator,

    /// A degenerate boundary element was supplied to a constructor.
    #[error("degenerate element geometry: {reason}")]
    Geometry {
        /// What was degenerate about the input
        reason: String,
    },

    /// No sign change of the friction balance was found within the slip-rate
    /// search bracket.
    #[error(
        "no sign change in slip-rate bracket [{lo:e}, {hi:e}] for tau = {tau}, psi = {psi}"
    )]
    RootBracket {
        /// Lower bracket bound [m/s]
        lo: f64,
        /// Upper bracket bound [m/s]
        hi: f64,
        /// Traction at which the solve was attempted [MPa]
        tau: f64,
        /// State variable at which the solve was attempted
        psi: f64,
    },

    /// Quadrature or root iteration exhausted its budget without converging.
    #[error("numerical iteration did not converge: {context}")]
    NumericalInstability {
        /// Which iteration failed and with what budget
        context: String,
    },
}

impl CycleError {
    /// Shorthand for a [`CycleError::Geometry`] error.
    pub fn geometry(reason: impl Into<String>) -> Self {
        CycleError::Geometry {
            reason: reason.into(),
        }
    }

    /// Shorthand for a [`CycleError::NumericalInstability`] error.
    pub fn instability(context: impl Into<String>) -> Self {
        CycleError::NumericalInstability {
            context: context.into(),
        }
    }
}
