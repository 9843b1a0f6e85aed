pub mod autodiff;
pub mod error;
pub mod matrix;
pub mod newton;
pub mod solvers;
pub mod timestamp;
/// The `numkit_core` crate provides a handful of textbook numerical kernels.
/// Every kernel is generic over `Scalar`, so it runs on both `f32` and `f64`.
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `DynamicalSystem` (ODE right-hand sides), `Steppable` (Solvers).
/// - **Matrix**: dense row-major matrix product, unchecked and checked.
/// - **Newton**: scalar root finding, unbounded or capped by `NewtonSettings`.
/// - **Solvers**: fixed-step classic RK4 for scalar and vector ODEs.
/// - **Autodiff**: Dual number implementation used for derivative-free Newton iteration.
pub mod traits;

pub use error::{NumericsError, Result};
pub use matrix::{mat_mult, mat_mult_to_vec, try_mat_mult};
pub use newton::{newton, newton_autodiff, solve_newton, NewtonResult, NewtonSettings};
pub use solvers::{rk4, rk4vec, Rk4Workspace};
pub use timestamp::{timestamp, timestamp_string};
