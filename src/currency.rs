//! Currency conversion state
//!
//! The crate does no network I/O. Rates arrive as an `ExchangeQuote`,
//! either handed in as the JSON body of a rate lookup (`applyQuote`) or
//! pulled through a `RateSource` owned by the embedder. A failed or
//! unusable quote leaves the previous rate in place.

use crate::error::CalcError;
use crate::number::{parse_float, to_fixed};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

/// Decimals shown for converted amounts and for the rate summary
const AMOUNT_DECIMALS: usize = 2;
const RATE_DECIMALS: usize = 4;

/// Shown instead of a result while no rate is known
const PENDING_RESULT: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
}

pub static CURRENCIES: [Currency; 12] = [
    Currency { code: "USD", name: "US Dollar", symbol: "$" },
    Currency { code: "EUR", name: "Euro", symbol: "€" },
    Currency { code: "GBP", name: "British Pound", symbol: "£" },
    Currency { code: "JPY", name: "Japanese Yen", symbol: "¥" },
    Currency { code: "AUD", name: "Australian Dollar", symbol: "A$" },
    Currency { code: "CAD", name: "Canadian Dollar", symbol: "C$" },
    Currency { code: "CHF", name: "Swiss Franc", symbol: "Fr" },
    Currency { code: "CNY", name: "Chinese Yuan", symbol: "¥" },
    Currency { code: "INR", name: "Indian Rupee", symbol: "₹" },
    Currency { code: "NZD", name: "New Zealand Dollar", symbol: "NZ$" },
    Currency { code: "SGD", name: "Singapore Dollar", symbol: "S$" },
    Currency { code: "HKD", name: "Hong Kong Dollar", symbol: "HK$" },
];

pub fn find_currency(code: &str) -> Result<&'static Currency, CalcError> {
    CURRENCIES
        .iter()
        .find(|c| c.code == code)
        .ok_or_else(|| CalcError::UnknownCurrency(code.to_string()))
}

fn default_endpoint() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_from() -> String {
    "USD".to_string()
}

fn default_to() -> String {
    "EUR".to_string()
}

fn default_amount() -> String {
    "1".to_string()
}

/// Rate lookup endpoint and initial converter values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRateConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_from")]
    pub default_from: String,
    #[serde(default = "default_to")]
    pub default_to: String,
    #[serde(default = "default_amount")]
    pub default_amount: String,
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        ExchangeRateConfig {
            endpoint: default_endpoint(),
            default_from: default_from(),
            default_to: default_to(),
            default_amount: default_amount(),
        }
    }
}

impl ExchangeRateConfig {
    /// Lookup URL for all rates based on `base`
    pub fn quote_url(&self, base: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), base)
    }
}

/// Rates relative to one base currency.
///
/// Accepts both `base` and the lookup service's `base_code` field; any
/// other fields of the response body are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    #[serde(default, alias = "base_code")]
    pub base: String,
    pub rates: HashMap<String, f64>,
}

impl ExchangeQuote {
    pub fn from_json(json: &str) -> Result<ExchangeQuote, CalcError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rate for `code`. A missing, zero, negative or non-finite entry is a
    /// failed lookup.
    pub fn rate_for(&self, code: &str) -> Result<f64, CalcError> {
        match self.rates.get(code) {
            Some(&rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            _ => Err(CalcError::RateUnavailable {
                base: self.base.clone(),
                code: code.to_string(),
            }),
        }
    }
}

/// Anything that can look up the rates for a base currency
pub trait RateSource {
    fn fetch(&mut self, base: &str) -> Result<ExchangeQuote, CalcError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyState {
    amount: String,
    from: &'static Currency,
    to: &'static Currency,
    rate: Option<f64>,
    /// Epoch milliseconds of the last accepted quote
    last_updated: Option<f64>,
    /// Set when the pair changed since the last accepted quote
    needs_refresh: bool,
}

impl Default for CurrencyState {
    fn default() -> Self {
        CurrencyState {
            amount: default_amount(),
            from: &CURRENCIES[0],
            to: &CURRENCIES[1],
            rate: None,
            last_updated: None,
            needs_refresh: true,
        }
    }
}

impl CurrencyState {
    pub fn from_config(config: &ExchangeRateConfig) -> Result<Self, CalcError> {
        Ok(CurrencyState {
            amount: config.default_amount.clone(),
            from: find_currency(&config.default_from)?,
            to: find_currency(&config.default_to)?,
            ..CurrencyState::default()
        })
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn from(&self) -> &'static Currency {
        self.from
    }

    pub fn to(&self) -> &'static Currency {
        self.to
    }

    pub fn rate(&self) -> Option<f64> {
        self.rate
    }

    pub fn last_updated(&self) -> Option<f64> {
        self.last_updated
    }

    pub fn needs_refresh(&self) -> bool {
        self.needs_refresh
    }

    pub fn set_amount(&mut self, text: &str) {
        self.amount = text.to_string();
    }

    pub fn set_from(&mut self, code: &str) -> Result<(), CalcError> {
        self.from = find_currency(code)?;
        self.needs_refresh = true;
        Ok(())
    }

    pub fn set_to(&mut self, code: &str) -> Result<(), CalcError> {
        self.to = find_currency(code)?;
        self.needs_refresh = true;
        Ok(())
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from, &mut self.to);
        self.needs_refresh = true;
    }

    /// Take the rate for the current pair from `quote`.
    ///
    /// On failure the previous rate and timestamp are kept.
    pub fn apply_quote(&mut self, quote: &ExchangeQuote, now_ms: f64) -> Result<f64, CalcError> {
        let result = self.rate_from(quote);
        match &result {
            Ok(rate) => {
                debug!("rate {} -> {} = {}", self.from.code, self.to.code, rate);
                self.rate = Some(*rate);
                self.last_updated = Some(now_ms);
                self.needs_refresh = false;
            }
            Err(e) => warn!("exchange quote rejected: {}", e),
        }
        result
    }

    fn rate_from(&self, quote: &ExchangeQuote) -> Result<f64, CalcError> {
        if !quote.base.is_empty() && quote.base != self.from.code {
            return Err(CalcError::QuoteMismatch {
                expected: self.from.code.to_string(),
                actual: quote.base.clone(),
            });
        }
        quote.rate_for(self.to.code)
    }

    /// Look up the current pair through `source`
    pub fn refresh<S: RateSource>(&mut self, source: &mut S, now_ms: f64) -> Result<f64, CalcError> {
        let quote = source.fetch(self.from.code).map_err(|e| {
            warn!("rate lookup for {} failed: {}", self.from.code, e);
            e
        })?;
        self.apply_quote(&quote, now_ms)
    }

    /// `amount * rate`, once a rate is known
    pub fn converted(&self) -> Option<f64> {
        self.rate.map(|rate| parse_float(&self.amount) * rate)
    }

    /// Converted amount to 2 decimals without a symbol
    pub fn copy_text(&self) -> Option<String> {
        self.converted().map(|value| to_fixed(value, AMOUNT_DECIMALS))
    }

    /// Converted amount prefixed with the target symbol, or "..."
    pub fn formatted_result(&self) -> String {
        match self.copy_text() {
            Some(text) => format!("{}{}", self.to.symbol, text),
            None => PENDING_RESULT.to_string(),
        }
    }

    /// "1 USD = 0.9200 EUR"
    pub fn rate_summary(&self) -> Option<String> {
        self.rate.map(|rate| {
            format!(
                "1 {} = {} {}",
                self.from.code,
                to_fixed(rate, RATE_DECIMALS),
                self.to.code
            )
        })
    }
}

/// Currency converter exposed to JS
#[wasm_bindgen]
pub struct CurrencyConverter {
    config: ExchangeRateConfig,
    state: CurrencyState,
}

#[wasm_bindgen]
impl CurrencyConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> CurrencyConverter {
        CurrencyConverter {
            config: ExchangeRateConfig::default(),
            state: CurrencyState::default(),
        }
    }

    /// Create from a partial `ExchangeRateConfig` object
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<CurrencyConverter, JsValue> {
        let config: ExchangeRateConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| CalcError::InvalidState(e.to_string()))?;
        let state = CurrencyState::from_config(&config)?;
        Ok(CurrencyConverter { config, state })
    }

    #[wasm_bindgen(getter)]
    pub fn amount(&self) -> String {
        self.state.amount().to_string()
    }

    #[wasm_bindgen(setter)]
    pub fn set_amount(&mut self, text: String) {
        self.state.set_amount(&text);
    }

    #[wasm_bindgen(getter, js_name = fromCurrency)]
    pub fn from_currency(&self) -> String {
        self.state.from().code.to_string()
    }

    #[wasm_bindgen(getter, js_name = toCurrency)]
    pub fn to_currency(&self) -> String {
        self.state.to().code.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn rate(&self) -> Option<f64> {
        self.state.rate()
    }

    #[wasm_bindgen(getter, js_name = lastUpdated)]
    pub fn last_updated(&self) -> Option<f64> {
        self.state.last_updated()
    }

    #[wasm_bindgen(getter, js_name = needsRefresh)]
    pub fn needs_refresh(&self) -> bool {
        self.state.needs_refresh()
    }

    /// URL to fetch the rates for the current base currency from
    #[wasm_bindgen(getter, js_name = quoteUrl)]
    pub fn quote_url(&self) -> String {
        self.config.quote_url(self.state.from().code)
    }

    #[wasm_bindgen(js_name = setFromCurrency)]
    pub fn set_from_currency(&mut self, code: &str) -> Result<(), JsValue> {
        Ok(self.state.set_from(code)?)
    }

    #[wasm_bindgen(js_name = setToCurrency)]
    pub fn set_to_currency(&mut self, code: &str) -> Result<(), JsValue> {
        Ok(self.state.set_to(code)?)
    }

    pub fn swap(&mut self) {
        self.state.swap();
    }

    /// Apply the JSON body of a rate lookup; returns the accepted rate
    #[wasm_bindgen(js_name = applyQuote)]
    pub fn apply_quote_js(&mut self, json: &str, now_ms: f64) -> Result<f64, JsValue> {
        let quote = ExchangeQuote::from_json(json)?;
        Ok(self.state.apply_quote(&quote, now_ms)?)
    }

    #[wasm_bindgen(js_name = formattedResult)]
    pub fn formatted_result(&self) -> String {
        self.state.formatted_result()
    }

    #[wasm_bindgen(js_name = rateSummary)]
    pub fn rate_summary(&self) -> Option<String> {
        self.state.rate_summary()
    }

    #[wasm_bindgen(js_name = copyText)]
    pub fn copy_text(&self) -> Option<String> {
        self.state.copy_text()
    }
}

impl CurrencyConverter {
    pub fn state(&self) -> &CurrencyState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CurrencyState {
        &mut self.state
    }
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new()
    }
}

/// Supported currencies with names and symbols
#[wasm_bindgen(js_name = currencies)]
pub fn currencies_js() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&CURRENCIES[..]).map_err(|e| JsValue::from_str(&e.to_string()))
}
