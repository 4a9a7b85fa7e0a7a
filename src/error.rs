//! Boundary errors
//!
//! Numeric problems (division by zero, out-of-domain inverse trig, bad
//! fraction text) never surface here: they evaluate to NaN or Infinity.
//! `CalcError` only covers input that cannot be mapped onto the engine's
//! closed vocabularies, plus exchange quotes that cannot be used.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum CalcError {
    #[error("Unknown operator: '{0}'")]
    UnknownOperator(String),

    #[error("Unknown function: '{0}'")]
    UnknownFunction(String),

    #[error("Unknown constant: '{0}'")]
    UnknownConstant(String),

    #[error("Digit out of range: {0}")]
    InvalidDigit(u8),

    #[error("'{0}' is only available on the scientific calculator")]
    ScientificOnly(String),

    #[error("Unknown unit category: '{0}'")]
    UnknownCategory(String),

    #[error("Unit '{unit}' does not belong to category {category}")]
    UnknownUnit { category: String, unit: String },

    #[error("Unknown currency code: '{0}'")]
    UnknownCurrency(String),

    #[error("Exchange quote for {base} has no rate for {code}")]
    RateUnavailable { base: String, code: String },

    #[error("Exchange quote is based on {actual}, expected {expected}")]
    QuoteMismatch { expected: String, actual: String },

    #[error("Malformed exchange quote: {0}")]
    MalformedQuote(#[from] serde_json::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl From<CalcError> for JsValue {
    fn from(err: CalcError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}
