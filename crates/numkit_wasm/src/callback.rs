//! Adapters that let JavaScript functions stand in for Rust callbacks.
//!
//! The numeric kernels take infallible closures, so a failing JS call is
//! recorded here, NaN is handed back to the kernel, and the first recorded
//! error is surfaced once the kernel returns.

use anyhow::{anyhow, bail, Context, Result};
use js_sys::{Float64Array, Function};
use numkit_core::traits::DynamicalSystem;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

#[derive(Default)]
pub(crate) struct ErrorSlot(RefCell<Option<anyhow::Error>>);

impl ErrorSlot {
    pub(crate) fn record(&self, err: anyhow::Error) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            *slot = Some(err);
        }
    }

    pub(crate) fn into_result(self) -> Result<()> {
        match self.0.into_inner() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub(crate) fn take(&self) -> Result<()> {
        match self.0.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub(crate) fn js_error(err: JsValue) -> anyhow::Error {
    anyhow!(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

pub(crate) fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

/// Calls `f(x)` and expects a number back.
pub(crate) fn call_scalar1(f: &Function, name: &str, x: f64) -> Result<f64> {
    let value = f
        .call1(&JsValue::NULL, &JsValue::from_f64(x))
        .map_err(js_error)
        .with_context(|| format!("{} threw at x = {}", name, x))?;
    value
        .as_f64()
        .ok_or_else(|| anyhow!("{} did not return a number at x = {}", name, x))
}

/// Calls `f(t, u)` and expects a number back.
pub(crate) fn call_scalar2(f: &Function, t: f64, u: f64) -> Result<f64> {
    let value = f
        .call2(&JsValue::NULL, &JsValue::from_f64(t), &JsValue::from_f64(u))
        .map_err(js_error)
        .with_context(|| format!("derivative threw at t = {}", t))?;
    value
        .as_f64()
        .ok_or_else(|| anyhow!("derivative did not return a number at t = {}", t))
}

/// Calls `f(t, u)` with `u` as a `Float64Array` and copies the returned array
/// (plain or typed) into `out`.
pub(crate) fn call_vector(f: &Function, t: f64, u: &[f64], out: &mut [f64]) -> Result<()> {
    let arg = Float64Array::from(u);
    let value = f
        .call2(&JsValue::NULL, &JsValue::from_f64(t), &arg)
        .map_err(js_error)
        .with_context(|| format!("derivative threw at t = {}", t))?;
    if !value.is_object() {
        bail!("derivative did not return an array at t = {}", t);
    }
    let result = Float64Array::new(&value);
    if result.length() as usize != out.len() {
        bail!(
            "derivative returned {} components at t = {}, expected {}",
            result.length(),
            t,
            out.len()
        );
    }
    result.copy_to(out);
    Ok(())
}

/// A JS function `f(t, u) -> number[]` viewed as a vector field.
pub(crate) struct JsSystem {
    pub(crate) f: Function,
    pub(crate) dim: usize,
    pub(crate) errors: ErrorSlot,
}

impl JsSystem {
    pub(crate) fn new(f: Function, dim: usize) -> Self {
        Self {
            f,
            dim,
            errors: ErrorSlot::default(),
        }
    }
}

impl DynamicalSystem<f64> for JsSystem {
    fn dimension(&self) -> usize {
        self.dim
    }

    fn apply(&self, t: f64, x: &[f64], out: &mut [f64]) {
        if let Err(err) = call_vector(&self.f, t, x, out) {
            self.errors.record(err);
            out.fill(f64::NAN);
        }
    }
}
