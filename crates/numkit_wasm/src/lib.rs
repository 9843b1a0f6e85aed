//! JavaScript bindings for the numkit kernels.

use anyhow::Context;
use js_sys::Function;
use numkit_core::newton::{solve_newton, NewtonSettings};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

mod callback;
mod system;

use callback::{call_scalar1, call_scalar2, call_vector, to_js, ErrorSlot};
pub use system::WasmStepper;

/// Row-major product of an `i x j` and a `j x k` matrix.
#[wasm_bindgen]
pub fn mat_mult(
    a: &[f64],
    b: &[f64],
    i: usize,
    j: usize,
    k: usize,
) -> Result<Vec<f64>, JsValue> {
    console_error_panic_hook::set_once();

    numkit_core::matrix::mat_mult_to_vec(a, b, i, j, k)
        .map_err(|e| JsValue::from_str(&format!("Matrix multiply failed: {}", e)))
}

/// Bounded Newton iteration with JS callbacks for `f` and `f'`.
///
/// `settings` may be `undefined`, in which case the defaults apply.
#[wasm_bindgen]
pub fn newton(
    f: Function,
    fprime: Function,
    guess: f64,
    settings: JsValue,
) -> Result<JsValue, JsValue> {
    console_error_panic_hook::set_once();

    let settings: NewtonSettings = if settings.is_undefined() || settings.is_null() {
        NewtonSettings::default()
    } else {
        from_value(settings)
            .map_err(|e| JsValue::from_str(&format!("Invalid Newton settings: {}", e)))?
    };

    let errors = ErrorSlot::default();
    let eval = |func: &Function, name: &str, x: f64| {
        call_scalar1(func, name, x).unwrap_or_else(|err| {
            errors.record(err);
            f64::NAN
        })
    };
    let result = solve_newton(
        |x| eval(&f, "f", x),
        |x| eval(&fprime, "fprime", x),
        guess,
        settings,
    );
    errors
        .into_result()
        .context("Newton solve failed")
        .map_err(to_js)?;

    let result = result.map_err(|e| JsValue::from_str(&format!("Newton solve failed: {}", e)))?;
    to_value(&result).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// One RK4 step for the scalar ODE `du/dt = f(t, u)`.
#[wasm_bindgen]
pub fn rk4(t0: f64, u0: f64, dt: f64, f: Function) -> Result<f64, JsValue> {
    console_error_panic_hook::set_once();

    let errors = ErrorSlot::default();
    let u = numkit_core::solvers::rk4(t0, u0, dt, |t, u| {
        call_scalar2(&f, t, u).unwrap_or_else(|err| {
            errors.record(err);
            f64::NAN
        })
    });
    errors.into_result().map_err(to_js)?;
    Ok(u)
}

/// One RK4 step for the vector ODE `du/dt = f(t, u)`; `f` returns an array
/// the length of `u0`.
#[wasm_bindgen]
pub fn rk4vec(t0: f64, u0: &[f64], dt: f64, f: Function) -> Result<Vec<f64>, JsValue> {
    console_error_panic_hook::set_once();

    let errors = ErrorSlot::default();
    let mut out = vec![0.0; u0.len()];
    numkit_core::solvers::rk4vec(
        t0,
        u0,
        dt,
        |t, u, du| {
            if let Err(err) = call_vector(&f, t, u, du) {
                errors.record(err);
                du.fill(f64::NAN);
            }
        },
        &mut out,
    )
    .map_err(|e| JsValue::from_str(&format!("RK4 step failed: {}", e)))?;
    errors.into_result().map_err(to_js)?;
    Ok(out)
}

/// Current local date and time, e.g. `31 May 2001 09:45:54 AM`.
#[wasm_bindgen]
pub fn timestamp() -> String {
    numkit_core::timestamp::timestamp_string()
}
