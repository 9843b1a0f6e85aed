use num_traits::{Float, FromPrimitive};
use std::cell::RefCell;
use std::fmt::Debug;

/// A trait for types that can be used as scalars by the numeric kernels.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Converts an `f64` literal into `T`.
pub(crate) fn lit<T: Scalar>(value: f64) -> T {
    T::from_f64(value).unwrap_or_else(T::nan)
}

/// Represents the right-hand side of a vector ODE, du/dt = f(t, u).
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field.
    /// t: current time
    /// x: current state
    /// out: buffer to write dx/dt into
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// Wraps a closure `f(t, u, out)` as a [`DynamicalSystem`] of fixed dimension.
pub struct FnSystem<F> {
    dim: usize,
    f: RefCell<F>,
}

impl<F> FnSystem<F> {
    pub fn new(dim: usize, f: F) -> Self {
        Self {
            dim,
            f: RefCell::new(f),
        }
    }
}

impl<T, F> DynamicalSystem<T> for FnSystem<F>
where
    T: Scalar,
    F: FnMut(T, &[T], &mut [T]),
{
    fn dimension(&self) -> usize {
        self.dim
    }

    fn apply(&self, t: T, x: &[T], out: &mut [T]) {
        (self.f.borrow_mut())(t, x, out)
    }
}

/// A trait for solvers that can step a system forward.
pub trait Steppable<T: Scalar> {
    /// Performs one step of size dt.
    /// t: current time (updated after step)
    /// state: current state (updated after step)
    /// dt: step size
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}
