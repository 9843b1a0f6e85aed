//! Browser-side checks; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Reflect, JSON};
use numkit_wasm::{mat_mult, newton, rk4, rk4vec, timestamp, WasmStepper};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn multiplies_matrices() {
    let c = mat_mult(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 7.0, 8.0], 2, 2, 2).unwrap();
    assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
}

#[wasm_bindgen_test]
fn rejects_short_matrix() {
    assert!(mat_mult(&[1.0, 2.0, 3.0], &[5.0, 6.0, 7.0, 8.0], 2, 2, 2).is_err());
}

#[wasm_bindgen_test]
fn scalar_step_uses_js_derivative() {
    let f = Function::new_with_args("t, u", "return u;");
    let u = rk4(0.0, 1.0, 0.1, f).unwrap();
    assert!((u - 0.1f64.exp()).abs() < 1e-7);
}

#[wasm_bindgen_test]
fn scalar_step_reports_throwing_callback() {
    let f = Function::new_with_args("t, u", "throw new Error('boom');");
    assert!(rk4(0.0, 1.0, 0.1, f).is_err());
}

#[wasm_bindgen_test]
fn vector_step_accepts_plain_arrays() {
    let f = Function::new_with_args("t, u", "return [u[1], -u[0]];");
    let out = rk4vec(0.0, &[1.0, 0.0], 0.01, f).unwrap();
    assert!((out[0] * out[0] + out[1] * out[1] - 1.0).abs() < 1e-10);
}

#[wasm_bindgen_test]
fn vector_step_rejects_wrong_length() {
    let f = Function::new_with_args("t, u", "return [1.0];");
    assert!(rk4vec(0.0, &[1.0, 0.0], 0.01, f).is_err());
}

#[wasm_bindgen_test]
fn stepper_keeps_state_on_failure() {
    let f = Function::new_with_args("t, u", "if (t > 0.085) { throw 'late'; } return [u[1], -u[0]];");
    let mut stepper = WasmStepper::new(f, vec![1.0, 0.0], 0.0).unwrap();
    stepper.run(0.01, 5).unwrap();
    let before = stepper.get_state();
    let t_before = stepper.get_t();
    assert!(stepper.run(0.01, 10).is_err());
    assert!(stepper.get_t() > t_before);
    assert!(stepper.get_state() != before);
    assert!(stepper.get_state().iter().all(|v| v.is_finite()));
}

#[wasm_bindgen_test]
fn timestamp_is_formatted() {
    let stamp = timestamp();
    assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
}

fn field(obj: &JsValue, name: &str) -> f64 {
    Reflect::get(obj, &JsValue::from_str(name))
        .unwrap()
        .as_f64()
        .unwrap()
}

fn square_minus_two() -> (Function, Function) {
    (
        Function::new_with_args("x", "return x * x - 2;"),
        Function::new_with_args("x", "return 2 * x;"),
    )
}

#[wasm_bindgen_test]
fn newton_finds_sqrt_two_with_default_settings() {
    for settings in [JsValue::UNDEFINED, JsValue::NULL] {
        let (f, fprime) = square_minus_two();
        let result = newton(f, fprime, 1.0, settings).unwrap();
        assert!((field(&result, "root") - std::f64::consts::SQRT_2).abs() < 1e-10);
        assert!(field(&result, "residual") <= 1e-10);
        assert!(field(&result, "iterations") >= 1.0);
    }
}

#[wasm_bindgen_test]
fn newton_honours_explicit_settings() {
    let (f, fprime) = square_minus_two();
    let settings = JSON::parse(r#"{"max_steps": 2, "damping": 1, "tolerance": 1e-10}"#).unwrap();
    let err = newton(f, fprime, 1.0, settings).unwrap_err();
    assert!(err.as_string().unwrap().contains("failed to converge in 2 steps"));
}

#[wasm_bindgen_test]
fn newton_reports_throwing_callback() {
    let f = Function::new_with_args("x", "throw new Error('boom');");
    let fprime = Function::new_with_args("x", "return 1;");
    let err = newton(f, fprime, 1.0, JsValue::UNDEFINED).unwrap_err();
    let message = err.as_string().unwrap();
    assert!(message.contains("f threw at x = 1"), "{}", message);
}

#[wasm_bindgen_test]
fn newton_rejects_bad_settings() {
    let (f, fprime) = square_minus_two();
    let invalid = JSON::parse(r#"{"max_steps": 0, "damping": 1, "tolerance": 1e-10}"#).unwrap();
    let err = newton(f, fprime, 1.0, invalid).unwrap_err();
    assert!(err.as_string().unwrap().contains("max_steps must be greater than zero"));

    let (f, fprime) = square_minus_two();
    let malformed = JsValue::from_str("fast please");
    let err = newton(f, fprime, 1.0, malformed).unwrap_err();
    assert!(err.as_string().unwrap().contains("Invalid Newton settings"));
}
