use thiserror::Error;

/// Failure signals raised by the checked kernels.
///
/// The plain kernels (`mat_mult`, `newton`, `rk4`) never return these; they are
/// only produced by the hardened entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericsError {
    #[error("{what} has length {actual}, expected at least {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("failed to allocate scratch space for {len} values")]
    Allocation { len: usize },

    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),

    #[error("Newton solver failed to converge in {steps} steps (|f(x)| = {residual})")]
    NotConverged { steps: usize, residual: f64 },

    #[error("derivative vanished or produced a non-finite step at x = {at}")]
    ZeroDerivative { at: f64 },

    #[error("function value is not finite at x = {at}")]
    NonFiniteResidual { at: f64 },
}

pub type Result<T> = std::result::Result<T, NumericsError>;
