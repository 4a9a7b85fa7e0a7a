//! CalcPro Core - Rust/WASM numeric engine for CalcPro
//!
//! This crate provides:
//! - The accumulator state machine behind the basic and scientific calculators
//! - Scientific functions with degree/radian modes and exact trig values
//! - Continued-fraction decimal ↔ fraction conversion
//! - Pivot-unit conversion, including speed ↔ pace
//! - Currency conversion state fed by externally fetched exchange quotes

use wasm_bindgen::prelude::*;

pub mod error;
pub mod number;
pub mod operator;
pub mod fraction;
pub mod scientific;
pub mod calculator;
pub mod units;
pub mod converter;
pub mod currency;

// Re-export main types for convenience
pub use calculator::{Calculator, CalculatorState, PendingOperation};
pub use converter::{ConverterState, UnitConverter};
pub use currency::{CurrencyConverter, CurrencyState, ExchangeQuote, ExchangeRateConfig, RateSource};
pub use error::CalcError;
pub use fraction::{decimal_to_fraction, fraction_to_decimal, Fraction};
pub use operator::{AngleMode, Constant, Function, Operator};
pub use units::{Category, Unit, UnitKind};

/// Initialize the WASM module
/// Call this once when loading the module to set up panic hooks and logging
#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages
    console_error_panic_hook::set_once();

    // Route `log` records to the browser console
    #[cfg(target_arch = "wasm32")]
    wasm_logger::init(wasm_logger::Config::default());
}

/// Get the version of the calcpro-core library
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
