use crate::error::{NumericsError, Result};
use crate::traits::{lit, DynamicalSystem, Scalar, Steppable};
use log::trace;

/// Takes one classic Runge-Kutta 4th order step for the scalar ODE du/dt = f(t, u).
///
/// Returns the estimate of `u(t0 + dt)`.
pub fn rk4<T, F>(t0: T, u0: T, dt: T, mut f: F) -> T
where
    T: Scalar,
    F: FnMut(T, T) -> T,
{
    let two = lit::<T>(2.0);
    let six = lit::<T>(6.0);

    let f0 = f(t0, u0);

    let t1 = t0 + dt / two;
    let u1 = u0 + dt * f0 / two;
    let f1 = f(t1, u1);

    let t2 = t0 + dt / two;
    let u2 = u0 + dt * f1 / two;
    let f2 = f(t2, u2);

    let t3 = t0 + dt;
    let u3 = u0 + dt * f2;
    let f3 = f(t3, u3);

    u0 + dt * (f0 + two * f1 + two * f2 + f3) / six
}

/// Scratch space for vector RK4 steps: four derivative samples and three
/// intermediate stage states, each of the system dimension.
///
/// Reusing one workspace across steps makes stepping allocation-free.
pub struct Rk4Workspace<T: Scalar> {
    k0: Vec<T>,
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    u1: Vec<T>,
    u2: Vec<T>,
    u3: Vec<T>,
}

impl<T: Scalar> Rk4Workspace<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::zero();
        Self {
            k0: vec![z; dim],
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            u1: vec![z; dim],
            u2: vec![z; dim],
            u3: vec![z; dim],
        }
    }

    /// Like [`Rk4Workspace::new`], but reports allocation failure instead of
    /// aborting.
    pub fn try_new(dim: usize) -> Result<Self> {
        let buffer = || -> Result<Vec<T>> {
            let mut v = Vec::new();
            v.try_reserve_exact(dim)
                .map_err(|_| NumericsError::Allocation { len: dim })?;
            v.resize(dim, T::zero());
            Ok(v)
        };
        Ok(Self {
            k0: buffer()?,
            k1: buffer()?,
            k2: buffer()?,
            k3: buffer()?,
            u1: buffer()?,
            u2: buffer()?,
            u3: buffer()?,
        })
    }

    pub fn dimension(&self) -> usize {
        self.k0.len()
    }

    /// One RK4 step of du/dt = f(t, u) from `(t0, u0)`, written to `out`.
    ///
    /// `f(t, u, uout)` must fill `uout` with the derivative at `(t, u)`. `u0` is
    /// only read; `out` is fully overwritten.
    ///
    /// # Panics
    ///
    /// Panics if `u0` or `out` does not match the workspace dimension.
    pub fn step_into<F>(&mut self, t0: T, u0: &[T], dt: T, f: F, out: &mut [T])
    where
        F: FnMut(T, &[T], &mut [T]),
    {
        assert_eq!(out.len(), self.dimension(), "output buffer has wrong dimension");
        self.sample(t0, u0, dt, f);
        for i in 0..out.len() {
            out[i] = u0[i] + self.increment(i, dt);
        }
    }

    /// Fills the four derivative samples for a step from `(t0, u0)`.
    fn sample<F>(&mut self, t0: T, u0: &[T], dt: T, mut f: F)
    where
        F: FnMut(T, &[T], &mut [T]),
    {
        let m = self.dimension();
        assert_eq!(u0.len(), m, "initial state has wrong dimension");
        let two = lit::<T>(2.0);

        f(t0, u0, &mut self.k0);

        let t1 = t0 + dt / two;
        for i in 0..m {
            self.u1[i] = u0[i] + dt * self.k0[i] / two;
        }
        f(t1, &self.u1, &mut self.k1);

        let t2 = t0 + dt / two;
        for i in 0..m {
            self.u2[i] = u0[i] + dt * self.k1[i] / two;
        }
        f(t2, &self.u2, &mut self.k2);

        let t3 = t0 + dt;
        for i in 0..m {
            self.u3[i] = u0[i] + dt * self.k2[i];
        }
        f(t3, &self.u3, &mut self.k3);
    }

    // dt * (k0 + 2 k1 + 2 k2 + k3) / 6 for component i
    fn increment(&self, i: usize, dt: T) -> T {
        let two = lit::<T>(2.0);
        let six = lit::<T>(6.0);
        dt * (self.k0[i] + two * self.k1[i] + two * self.k2[i] + self.k3[i]) / six
    }
}

impl<T: Scalar> Steppable<T> for Rk4Workspace<T> {
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T) {
        let t0 = *t;
        self.sample(t0, state, dt, |tt, u, out| system.apply(tt, u, out));
        for i in 0..state.len() {
            state[i] = state[i] + self.increment(i, dt);
        }
        *t = t0 + dt;
    }
}

/// Takes one RK4 step for the vector ODE du/dt = f(t, u) of dimension
/// `u0.len()`, writing the estimate of `u(t0 + dt)` into `out`.
///
/// Scratch space is allocated for the duration of the call and released before
/// returning. Allocation failure is reported as [`NumericsError::Allocation`].
pub fn rk4vec<T, F>(t0: T, u0: &[T], dt: T, f: F, out: &mut [T]) -> Result<()>
where
    T: Scalar,
    F: FnMut(T, &[T], &mut [T]),
{
    if out.len() != u0.len() {
        return Err(NumericsError::DimensionMismatch {
            what: "out",
            expected: u0.len(),
            actual: out.len(),
        });
    }
    let mut workspace = Rk4Workspace::try_new(u0.len())?;
    trace!("rk4vec: allocated scratch for dimension {}", u0.len());
    workspace.step_into(t0, u0, dt, f, out);
    Ok(())
}
