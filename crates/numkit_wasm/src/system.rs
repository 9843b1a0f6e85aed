//! Stateful RK4 integration of a JS-defined vector field.

use crate::callback::{to_js, JsSystem};
use js_sys::Function;
use numkit_core::solvers::Rk4Workspace;
use numkit_core::traits::Steppable;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmStepper {
    system: JsSystem,
    state: Vec<f64>,
    t: f64,
    solver: Rk4Workspace<f64>,
}

#[wasm_bindgen]
impl WasmStepper {
    /// `f(t, u)` must return the derivative as an array the length of
    /// `initial_state`.
    #[wasm_bindgen(constructor)]
    pub fn new(f: Function, initial_state: Vec<f64>, t0: f64) -> Result<WasmStepper, JsValue> {
        console_error_panic_hook::set_once();

        let dim = initial_state.len();
        if dim == 0 {
            return Err(JsValue::from_str("System has zero dimension."));
        }
        let solver = Rk4Workspace::try_new(dim)
            .map_err(|e| JsValue::from_str(&format!("Failed to create solver: {}", e)))?;

        Ok(WasmStepper {
            system: JsSystem::new(f, dim),
            state: initial_state,
            t: t0,
            solver,
        })
    }

    pub fn set_state(&mut self, state: &[f64]) -> Result<(), JsValue> {
        if state.len() != self.state.len() {
            return Err(JsValue::from_str(&format!(
                "State dimension mismatch. Expected {}, got {}.",
                self.state.len(),
                state.len()
            )));
        }
        self.state.copy_from_slice(state);
        Ok(())
    }

    pub fn get_state(&self) -> Vec<f64> {
        self.state.clone()
    }

    pub fn set_t(&mut self, t: f64) {
        self.t = t;
    }

    pub fn get_t(&self) -> f64 {
        self.t
    }

    /// One RK4 step. On a callback failure the state and time are left as they
    /// were before the step.
    pub fn step(&mut self, dt: f64) -> Result<(), JsValue> {
        let saved = self.state.clone();
        let t0 = self.t;
        self.solver.step(&self.system, &mut self.t, &mut self.state, dt);
        if let Err(err) = self.system.errors.take() {
            self.state = saved;
            self.t = t0;
            return Err(to_js(err));
        }
        Ok(())
    }

    /// `steps` consecutive RK4 steps; returns the final state.
    pub fn run(&mut self, dt: f64, steps: u32) -> Result<Vec<f64>, JsValue> {
        for _ in 0..steps {
            self.step(dt)?;
        }
        Ok(self.get_state())
    }
}
