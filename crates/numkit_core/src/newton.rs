//! Scalar root finding by Newton's method.

use crate::autodiff::{derivative, Dual};
use crate::error::{NumericsError, Result};
use crate::traits::Scalar;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

/// Bounds for [`solve_newton`] and [`newton_autodiff`].
///
/// `tolerance` is an absolute bound on `|f(x)|`. It is raised to the machine
/// epsilon of the scalar type when smaller, so the `f64` default of `1e-10`
/// acts as roughly `1.2e-7` for `f32`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonSettings {
    pub max_steps: usize,
    pub damping: f64,
    pub tolerance: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            damping: 1.0,
            tolerance: 1e-10,
        }
    }
}

impl NewtonSettings {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(NumericsError::InvalidSettings(
                "max_steps must be greater than zero",
            ));
        }
        if !(self.damping > 0.0) {
            return Err(NumericsError::InvalidSettings("damping must be positive"));
        }
        if !(self.tolerance > 0.0) {
            return Err(NumericsError::InvalidSettings("tolerance must be positive"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonResult<T> {
    pub root: T,
    pub residual: T,
    pub iterations: usize,
}

/// Refines `guess` with `guess -= f(guess) / fprime(guess)` until
/// `|f(guess)| <= tolerance`, then returns it.
///
/// There is no iteration cap and no guard on `fprime` vanishing. A sequence
/// that never converges loops forever, and a NaN residual ends the loop
/// immediately because `NaN > tolerance` is false. Use [`solve_newton`] for a
/// bounded, checked iteration.
pub fn newton<T, F, D>(f: F, fprime: D, mut guess: T, tolerance: T) -> T
where
    T: Scalar,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    while f(guess).abs() > tolerance {
        guess = guess - f(guess) / fprime(guess);
        trace!("newton: x = {:?}", guess);
    }
    guess
}

/// Bounded Newton iteration.
///
/// Stops with `NotConverged` after `settings.max_steps` updates, and refuses
/// to take a step when the derivative is zero or the update is not finite.
pub fn solve_newton<T, F, D>(
    f: F,
    fprime: D,
    guess: T,
    settings: NewtonSettings,
) -> Result<NewtonResult<T>>
where
    T: Scalar,
    F: Fn(T) -> T,
    D: Fn(T) -> T,
{
    iterate(|x| (f(x), fprime(x)), guess, settings)
}

/// Bounded Newton iteration on `f64`, with the derivative taken by forward-mode
/// automatic differentiation of `f`.
pub fn newton_autodiff<F>(
    f: F,
    guess: f64,
    settings: NewtonSettings,
) -> Result<NewtonResult<f64>>
where
    F: Fn(Dual) -> Dual,
{
    iterate(|x| derivative(&f, x), guess, settings)
}

fn iterate<T, E>(eval: E, guess: T, settings: NewtonSettings) -> Result<NewtonResult<T>>
where
    T: Scalar,
    E: Fn(T) -> (T, T),
{
    settings.validate()?;

    let tolerance = T::from_f64(settings.tolerance)
        .unwrap_or_else(T::epsilon)
        .max(T::epsilon());
    let damping = T::from_f64(settings.damping).unwrap_or_else(T::one);
    let as_f64 = |v: T| v.to_f64().unwrap_or(f64::NAN);

    let mut x = guess;
    let mut iterations = 0usize;

    loop {
        let (value, slope) = eval(x);
        if !value.is_finite() {
            return Err(NumericsError::NonFiniteResidual { at: as_f64(x) });
        }
        if value.abs() <= tolerance {
            debug!(
                "Newton converged to {:?} in {} steps (|f(x)| = {:?})",
                x, iterations, value
            );
            return Ok(NewtonResult {
                root: x,
                residual: value.abs(),
                iterations,
            });
        }
        if iterations >= settings.max_steps {
            warn!(
                "Newton solver failed to converge in {} steps (|f(x)| = {:?})",
                settings.max_steps, value
            );
            return Err(NumericsError::NotConverged {
                steps: settings.max_steps,
                residual: as_f64(value.abs()),
            });
        }

        let delta = value / slope;
        if slope.is_zero() || !delta.is_finite() {
            return Err(NumericsError::ZeroDerivative { at: as_f64(x) });
        }

        x = x - damping * delta;
        iterations += 1;
        trace!("newton step {}: x = {:?}, f(x) = {:?}", iterations, x, value);
    }
}
