//! Scientific function library
//!
//! Pure functions behind the scientific keypad. Trigonometry honours the
//! angle mode; in degree mode sin/cos/tan first consult a table of exact
//! values for the multiples of 30° and 45°, so `sin(180°)` is exactly 0
//! instead of `1.2e-16`.

use crate::number::{parse_number, pow, to_fixed, to_js_string};
use crate::operator::{AngleMode, Function};
use std::f64::consts::PI;

/// Decimal places kept when a function result is shown
const RESULT_DECIMALS: usize = 8;

/// (degrees, sin, cos, tan) for every multiple of 30° and 45° in [0°, 360°]
const EXACT_VALUES: [(f64, f64, f64, f64); 17] = [
    (0.0, 0.0, 1.0, 0.0),
    (30.0, 0.5, 0.866025404, 0.577350269),
    (45.0, 0.707106781, 0.707106781, 1.0),
    (60.0, 0.866025404, 0.5, 1.732050808),
    (90.0, 1.0, 0.0, f64::INFINITY),
    (120.0, 0.866025404, -0.5, -1.732050808),
    (135.0, 0.707106781, -0.707106781, -1.0),
    (150.0, 0.5, -0.866025404, -0.577350269),
    (180.0, 0.0, -1.0, 0.0),
    (210.0, -0.5, -0.866025404, 0.577350269),
    (225.0, -0.707106781, -0.707106781, 1.0),
    (240.0, -0.866025404, -0.5, 1.732050808),
    (270.0, -1.0, 0.0, f64::INFINITY),
    (300.0, -0.866025404, 0.5, -1.732050808),
    (315.0, -0.707106781, 0.707106781, -1.0),
    (330.0, -0.5, 0.866025404, -0.577350269),
    (360.0, 0.0, 1.0, 0.0),
];

/// Source of uniform samples in [0, 1) for the `random` key
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Platform randomness: `Math.random` in the browser, `rand` natively
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    #[cfg(target_arch = "wasm32")]
    fn next_f64(&mut self) -> f64 {
        js_sys::Math::random()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn next_f64(&mut self) -> f64 {
        rand::random::<f64>()
    }
}

/// Apply `func` to `value`, drawing randomness from the platform source.
pub fn apply(func: Function, value: f64, mode: AngleMode) -> f64 {
    apply_with(func, value, mode, &mut SystemRandom)
}

/// Apply `func` to `value` with an explicit random source.
pub fn apply_with<R: RandomSource>(
    func: Function,
    value: f64,
    mode: AngleMode,
    rng: &mut R,
) -> f64 {
    if mode == AngleMode::Degrees {
        if let Some(exact) = exact_trig(func, value) {
            return exact;
        }
    }

    // Argument of sin/cos/tan in radians
    let angle = match mode {
        AngleMode::Degrees => to_radians(value),
        AngleMode::Radians => value,
    };
    let result = match func {
        Function::Sin => angle.sin(),
        Function::Cos => angle.cos(),
        Function::Tan => angle.tan(),
        Function::Asin => value.asin(),
        Function::Acos => value.acos(),
        Function::Atan => value.atan(),
        Function::Sqrt => value.sqrt(),
        Function::Cbrt => value.cbrt(),
        Function::Square => pow(value, 2.0),
        Function::Cube => pow(value, 3.0),
        Function::Log => value.log10(),
        Function::Ln => value.ln(),
        Function::Factorial => factorial(value),
        Function::Sinh => value.sinh(),
        Function::Cosh => value.cosh(),
        Function::Tanh => value.tanh(),
        Function::Asinh => value.asinh(),
        Function::Acosh => value.acosh(),
        Function::Atanh => value.atanh(),
        Function::Abs => value.abs(),
        Function::Random => rng.next_f64(),
    };

    // asin/acos/atan report their angle in the current mode
    if func.is_inverse_trig() && mode == AngleMode::Degrees {
        to_degrees(result)
    } else {
        result
    }
}

/// Look up sin/cos/tan of an angle in degrees in the exact-value table.
pub fn exact_trig(func: Function, degrees: f64) -> Option<f64> {
    if !func.is_trig() {
        return None;
    }
    let angle = ((degrees % 360.0) + 360.0) % 360.0;
    let &(_, sin, cos, tan) = EXACT_VALUES.iter().find(|row| row.0 == angle)?;
    match func {
        Function::Sin => Some(sin),
        Function::Cos => Some(cos),
        Function::Tan => Some(tan),
        _ => None,
    }
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * (PI / 180.0)
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * (180.0 / PI)
}

/// Product `1 * 2 * ... * k` over every integer `k <= n`.
///
/// NaN for negative (or NaN) `n`, 1 for `n = 0`. A fractional `n` is not
/// rejected: `factorial(3.5)` multiplies 1..=3 and returns 6. Stops once
/// the product overflows to infinity.
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    let mut result = 1.0;
    let mut i = 1.0;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            break;
        }
        i += 1.0;
    }
    result
}

/// nPr = n! / (n - r)!
pub fn permutations(n: f64, r: f64) -> f64 {
    factorial(n) / factorial(n - r)
}

/// nCr = n! / (r! (n - r)!)
pub fn combinations(n: f64, r: f64) -> f64 {
    factorial(n) / (factorial(r) * factorial(n - r))
}

/// Display text for a function result: non-finite values as-is, finite
/// values rounded to 8 decimals with trailing zeros dropped.
pub fn format_result(value: f64) -> String {
    if !value.is_finite() {
        return to_js_string(value);
    }
    to_js_string(parse_number(&to_fixed(value, RESULT_DECIMALS)))
}
