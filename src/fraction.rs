//! Decimal ↔ fraction conversion
//!
//! Decimals are turned into fractions with the continued-fraction
//! expansion: each step takes the integer part of the remainder and folds
//! it into the next convergent `h/k`. Convergents are always in lowest
//! terms, so the first one within tolerance is the simplest fraction that
//! represents the input.

use crate::number::{parse_number, to_js_string};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::mem;
use wasm_bindgen::prelude::*;

/// Relative tolerance: stop once `|x - h/k| <= |x| * TOLERANCE`
const TOLERANCE: f64 = 1.0e-6;

/// Upper bound on continued-fraction terms. Doubles carry at most ~53 bits,
/// so real inputs converge well before this.
const MAX_TERMS: usize = 64;

/// Reduced fraction with a positive denominator
#[wasm_bindgen]
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    inner: BigRational,
}

impl Fraction {
    /// Approximate `value` by its first continued-fraction convergent within
    /// tolerance. Returns `None` for NaN and infinities.
    pub fn from_decimal(value: f64) -> Option<Fraction> {
        if !value.is_finite() {
            return None;
        }

        let tolerance = value.abs() * TOLERANCE;

        // (h1, k1) is the latest convergent, (h2, k2) the one before it
        let (mut h1, mut h2) = (BigInt::one(), BigInt::zero());
        let (mut k1, mut k2) = (BigInt::zero(), BigInt::one());
        let mut b = value;

        for _ in 0..MAX_TERMS {
            let a = b.floor();
            let a_int = BigInt::from_f64(a)?;

            let h = &a_int * &h1 + &h2;
            h2 = mem::replace(&mut h1, h);
            let k = &a_int * &k1 + &k2;
            k2 = mem::replace(&mut k1, k);

            let approx = ratio_f64(&h1, &k1);
            if (value - approx).abs() <= tolerance {
                break;
            }

            let remainder = b - a;
            if remainder == 0.0 {
                break;
            }
            b = 1.0 / remainder;
            if !b.is_finite() {
                break;
            }
        }

        Some(Fraction {
            inner: BigRational::new(h1, k1),
        })
    }

    /// Split "n/d" text into numerator and denominator.
    ///
    /// Both parts must be whole numbers as far as `parse_number` is
    /// concerned; `None` when the separator or either part is missing or
    /// not numeric. Anything after a second `/` is ignored.
    pub fn parse(text: &str) -> Option<(f64, f64)> {
        let mut parts = text.split('/');
        let numerator = parse_number(parts.next()?);
        let denominator = parse_number(parts.next()?);
        if numerator.is_nan() || denominator.is_nan() {
            return None;
        }
        Some((numerator, denominator))
    }

    /// Get the underlying BigRational
    pub fn as_big_rational(&self) -> &BigRational {
        &self.inner
    }

    pub fn numerator(&self) -> &BigInt {
        self.inner.numer()
    }

    pub fn denominator(&self) -> &BigInt {
        self.inner.denom()
    }
}

#[wasm_bindgen]
impl Fraction {
    /// Create a Fraction from a decimal (undefined for NaN / infinities)
    #[wasm_bindgen(js_name = fromDecimal)]
    pub fn from_decimal_js(value: f64) -> Option<Fraction> {
        Fraction::from_decimal(value)
    }

    /// Convert to f64
    #[wasm_bindgen(js_name = toF64)]
    pub fn to_f64(&self) -> f64 {
        ratio_f64(self.inner.numer(), self.inner.denom())
    }

    /// Numerator as a string (may exceed JS safe integers)
    #[wasm_bindgen(getter, js_name = numerator)]
    pub fn numerator_str(&self) -> String {
        self.inner.numer().to_string()
    }

    /// Denominator as a string (may exceed JS safe integers)
    #[wasm_bindgen(getter, js_name = denominator)]
    pub fn denominator_str(&self) -> String {
        self.inner.denom().to_string()
    }

    /// "n/d", always with the denominator, even when it is 1
    #[wasm_bindgen(js_name = toString)]
    pub fn to_string_repr(&self) -> String {
        format!("{}/{}", self.inner.numer(), self.inner.denom())
    }

    #[wasm_bindgen(js_name = isNegative)]
    pub fn is_negative(&self) -> bool {
        self.inner.is_negative()
    }
}

fn ratio_f64(numer: &BigInt, denom: &BigInt) -> f64 {
    let n = numer.to_f64().unwrap_or(f64::NAN);
    let d = denom.to_f64().unwrap_or(f64::NAN);
    n / d
}

impl fmt::Debug for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fraction({})", self.to_string_repr())
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_repr())
    }
}

/// Decimal to "numerator/denominator" text.
///
/// NaN and infinities have no fraction and come back as their display text.
#[wasm_bindgen(js_name = decimalToFraction)]
pub fn decimal_to_fraction(value: f64) -> String {
    match Fraction::from_decimal(value) {
        Some(fraction) => fraction.to_string_repr(),
        None => to_js_string(value),
    }
}

/// "numerator/denominator" text to a decimal.
///
/// Both parts must be numbers; a missing separator or a non-numeric part
/// gives NaN. Anything after a second `/` is ignored.
#[wasm_bindgen(js_name = fractionToDecimal)]
pub fn fraction_to_decimal(text: &str) -> f64 {
    match Fraction::parse(text) {
        Some((numerator, denominator)) => numerator / denominator,
        None => f64::NAN,
    }
}
