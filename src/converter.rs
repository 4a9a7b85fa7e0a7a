//! Two-field unit converter binding
//!
//! Holds a category, a from/to unit pair and the text of both fields.
//! Editing one field re-derives the other; switching category or either
//! unit clears both fields. The keypad always types into the "from" field.

use crate::error::CalcError;
use crate::number::{parse_float, to_fixed};
use crate::units::{self, Category, Unit};
use log::debug;
use wasm_bindgen::prelude::*;

/// Decimals shown for pace results and for everything else
const PACE_DECIMALS: usize = 2;
const RESULT_DECIMALS: usize = 4;

/// Which side of the converter a value was typed into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    From,
    To,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConverterState {
    category: Category,
    from_unit: Unit,
    to_unit: Unit,
    from_value: String,
    to_value: String,
}

impl Default for ConverterState {
    fn default() -> Self {
        ConverterState::new(Category::Length)
    }
}

/// Text for a converted value shown in a field of unit `unit`
pub fn format_converted(value: f64, unit: Unit) -> String {
    if unit.is_pace() {
        to_fixed(value, PACE_DECIMALS)
    } else if value == 0.0 || value.is_nan() {
        String::new()
    } else {
        to_fixed(value, RESULT_DECIMALS)
    }
}

impl ConverterState {
    pub fn new(category: Category) -> Self {
        let (from_unit, to_unit) = category.default_pair();
        ConverterState {
            category,
            from_unit,
            to_unit,
            from_value: String::new(),
            to_value: String::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn from_unit(&self) -> Unit {
        self.from_unit
    }

    pub fn to_unit(&self) -> Unit {
        self.to_unit
    }

    pub fn from_value(&self) -> &str {
        &self.from_value
    }

    pub fn to_value(&self) -> &str {
        &self.to_value
    }

    /// Switch category, resetting both units to its defaults
    pub fn set_category(&mut self, category: Category) {
        debug!("converter category {}", category);
        *self = ConverterState::new(category);
    }

    pub fn set_from_unit(&mut self, name: &str) -> Result<(), CalcError> {
        self.from_unit = self.category.unit(name)?;
        self.clear_fields();
        debug!("converter from unit {}", name);
        Ok(())
    }

    pub fn set_to_unit(&mut self, name: &str) -> Result<(), CalcError> {
        self.to_unit = self.category.unit(name)?;
        self.clear_fields();
        debug!("converter to unit {}", name);
        Ok(())
    }

    /// Store `text` in `field` and recompute the opposite field
    pub fn edit(&mut self, field: Field, text: &str) -> Result<(), CalcError> {
        let mut value = parse_float(text);
        if value.is_nan() {
            value = 0.0;
        }
        let (source, target) = match field {
            Field::From => (self.from_unit, self.to_unit),
            Field::To => (self.to_unit, self.from_unit),
        };
        let result = units::convert(value, source, target)?;
        let formatted = format_converted(result, target);
        match field {
            Field::From => {
                self.from_value = text.to_string();
                self.to_value = formatted;
            }
            Field::To => {
                self.to_value = text.to_string();
                self.from_value = formatted;
            }
        }
        Ok(())
    }

    pub fn edit_from(&mut self, text: &str) -> Result<(), CalcError> {
        self.edit(Field::From, text)
    }

    pub fn edit_to(&mut self, text: &str) -> Result<(), CalcError> {
        self.edit(Field::To, text)
    }

    pub fn press_digit(&mut self, digit: u8) -> Result<(), CalcError> {
        if digit > 9 {
            return Err(CalcError::InvalidDigit(digit));
        }
        let text = format!("{}{}", self.from_value, digit);
        self.edit_from(&text)
    }

    pub fn press_decimal_point(&mut self) -> Result<(), CalcError> {
        let text = format!("{}.", self.from_value);
        self.edit_from(&text)
    }

    pub fn press_clear(&mut self) {
        self.clear_fields();
        debug!("converter cleared");
    }

    /// Drop the last character of the "from" field and recompute
    pub fn press_backspace(&mut self) -> Result<(), CalcError> {
        let mut text = self.from_value.clone();
        text.pop();
        self.edit_from(&text)
    }

    fn clear_fields(&mut self) {
        self.from_value.clear();
        self.to_value.clear();
    }
}

/// Unit converter exposed to JS
#[wasm_bindgen]
pub struct UnitConverter {
    state: ConverterState,
}

#[wasm_bindgen]
impl UnitConverter {
    #[wasm_bindgen(constructor)]
    pub fn new() -> UnitConverter {
        UnitConverter {
            state: ConverterState::default(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn category(&self) -> String {
        self.state.category().name().to_string()
    }

    #[wasm_bindgen(getter, js_name = fromUnit)]
    pub fn from_unit(&self) -> String {
        self.state.from_unit().name().to_string()
    }

    #[wasm_bindgen(getter, js_name = toUnit)]
    pub fn to_unit(&self) -> String {
        self.state.to_unit().name().to_string()
    }

    #[wasm_bindgen(getter, js_name = fromValue)]
    pub fn from_value(&self) -> String {
        self.state.from_value().to_string()
    }

    #[wasm_bindgen(getter, js_name = toValue)]
    pub fn to_value(&self) -> String {
        self.state.to_value().to_string()
    }

    /// Unit names of the current category
    #[wasm_bindgen(getter)]
    pub fn units(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state.category().unit_names())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = setCategory)]
    pub fn set_category(&mut self, name: &str) -> Result<(), JsValue> {
        let category =
            Category::from_name(name).ok_or_else(|| CalcError::UnknownCategory(name.to_string()))?;
        self.state.set_category(category);
        Ok(())
    }

    #[wasm_bindgen(js_name = setFromUnit)]
    pub fn set_from_unit(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.state.set_from_unit(name)?)
    }

    #[wasm_bindgen(js_name = setToUnit)]
    pub fn set_to_unit(&mut self, name: &str) -> Result<(), JsValue> {
        Ok(self.state.set_to_unit(name)?)
    }

    #[wasm_bindgen(js_name = editFrom)]
    pub fn edit_from(&mut self, text: &str) -> Result<(), JsValue> {
        Ok(self.state.edit_from(text)?)
    }

    #[wasm_bindgen(js_name = editTo)]
    pub fn edit_to(&mut self, text: &str) -> Result<(), JsValue> {
        Ok(self.state.edit_to(text)?)
    }

    #[wasm_bindgen(js_name = pressDigit)]
    pub fn press_digit(&mut self, digit: u8) -> Result<(), JsValue> {
        Ok(self.state.press_digit(digit)?)
    }

    #[wasm_bindgen(js_name = pressDecimalPoint)]
    pub fn press_decimal_point(&mut self) -> Result<(), JsValue> {
        Ok(self.state.press_decimal_point()?)
    }

    #[wasm_bindgen(js_name = pressClear)]
    pub fn press_clear(&mut self) {
        self.state.press_clear();
    }

    #[wasm_bindgen(js_name = pressBackspace)]
    pub fn press_backspace(&mut self) -> Result<(), JsValue> {
        Ok(self.state.press_backspace()?)
    }
}

impl UnitConverter {
    pub fn state(&self) -> &ConverterState {
        &self.state
    }
}

impl Default for UnitConverter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{LengthUnit, SpeedUnit, TemperatureUnit};

    #[test]
    fn test_defaults() {
        let state = ConverterState::default();
        assert_eq!(state.category(), Category::Length);
        assert_eq!(state.from_unit(), Unit::Length(LengthUnit::Meters));
        assert_eq!(state.to_unit(), Unit::Length(LengthUnit::Kilometers));
        assert_eq!(state.from_value(), "");
        assert_eq!(state.to_value(), "");
    }

    #[test]
    fn test_edit_from() {
        let mut state = ConverterState::default();
        state.edit_from("1500").unwrap();
        assert_eq!(state.from_value(), "1500");
        assert_eq!(state.to_value(), "1.5000");
    }

    #[test]
    fn test_edit_to_converts_backwards() {
        let mut state = ConverterState::default();
        state.edit_to("2").unwrap();
        assert_eq!(state.to_value(), "2");
        assert_eq!(state.from_value(), "2000.0000");
    }

    #[test]
    fn test_zero_result_is_empty() {
        let mut state = ConverterState::default();
        state.edit_from("abc").unwrap();
        assert_eq!(state.from_value(), "abc");
        assert_eq!(state.to_value(), "");
        state.edit_from("0").unwrap();
        assert_eq!(state.to_value(), "");
    }

    #[test]
    fn test_temperature_of_empty_field() {
        let mut state = ConverterState::new(Category::Temperature);
        assert_eq!(state.from_unit(), Unit::Temperature(TemperatureUnit::Celsius));
        state.edit_from("").unwrap();
        assert_eq!(state.to_value(), "32.0000");
        state.edit_from("100").unwrap();
        assert_eq!(state.to_value(), "212.0000");
    }

    #[test]
    fn test_pace_target_uses_two_decimals() {
        let mut state = ConverterState::new(Category::Speed);
        state.set_to_unit("Minutes per Kilometer").unwrap();
        state.set_from_unit("Kilometers per Hour").unwrap();
        state.edit_from("12").unwrap();
        assert_eq!(state.to_value(), "5.00");
        state.edit_from("0").unwrap();
        assert_eq!(state.to_value(), "Infinity");
    }

    #[test]
    fn test_pace_source_field() {
        let mut state = ConverterState::new(Category::Speed);
        state.set_from_unit("Minutes per Kilometer").unwrap();
        state.set_to_unit("Meters per Second").unwrap();
        state.edit_to("1").unwrap();
        assert_eq!(state.from_value(), "16.67");
    }

    #[test]
    fn test_unit_change_clears_fields() {
        let mut state = ConverterState::default();
        state.edit_from("5").unwrap();
        state.set_to_unit("Feet").unwrap();
        assert_eq!(state.from_value(), "");
        assert_eq!(state.to_value(), "");
        assert_eq!(state.to_unit(), Unit::Length(LengthUnit::Feet));
        assert!(state.set_from_unit("Knots").is_err());
        assert_eq!(state.from_unit(), Unit::Length(LengthUnit::Meters));
    }

    #[test]
    fn test_category_change_resets() {
        let mut state = ConverterState::default();
        state.set_to_unit("Miles").unwrap();
        state.edit_from("3").unwrap();
        state.set_category(Category::Speed);
        assert_eq!(state.from_unit(), Unit::Speed(SpeedUnit::MilesPerHour));
        assert_eq!(state.to_unit(), Unit::Speed(SpeedUnit::KilometersPerHour));
        assert_eq!(state.from_value(), "");
        assert_eq!(state.to_value(), "");
    }

    #[test]
    fn test_keypad() {
        let mut state = ConverterState::default();
        state.press_digit(2).unwrap();
        state.press_decimal_point().unwrap();
        state.press_digit(5).unwrap();
        assert_eq!(state.from_value(), "2.5");
        assert_eq!(state.to_value(), "0.0025");

        state.press_backspace().unwrap();
        assert_eq!(state.from_value(), "2.");
        assert_eq!(state.to_value(), "0.0020");

        assert!(state.press_digit(10).is_err());

        state.press_clear();
        assert_eq!(state.from_value(), "");
        assert_eq!(state.to_value(), "");
    }

    #[test]
    fn test_unit_changes_are_logged() {
        crate::test_log::install();
        let mut state = ConverterState::new(Category::Area);
        state.set_from_unit("Acres").unwrap();
        state.set_to_unit("Hectares").unwrap();
        state.press_clear();
        assert!(crate::test_log::logged("converter from unit Acres"));
        assert!(crate::test_log::logged("converter to unit Hectares"));
        assert!(crate::test_log::logged("converter cleared"));
    }

    #[test]
    fn test_backspace_on_empty_field() {
        let mut state = ConverterState::default();
        state.press_backspace().unwrap();
        assert_eq!(state.from_value(), "");
        assert_eq!(state.to_value(), "");
    }

    #[test]
    fn test_format_converted() {
        let pace = Unit::Speed(SpeedUnit::MinutesPerMile);
        let meters = Unit::Length(LengthUnit::Meters);
        assert_eq!(format_converted(0.0, pace), "0.00");
        assert_eq!(format_converted(f64::NAN, meters), "");
        assert_eq!(format_converted(-1.5, meters), "-1.5000");
    }

    #[test]
    fn test_wrapper() {
        let mut converter = UnitConverter::new();
        converter.set_category("Weight").unwrap();
        assert_eq!(converter.from_unit(), "Kilograms");
        assert_eq!(converter.to_unit(), "Grams");
        converter.edit_from("1").unwrap();
        assert_eq!(converter.to_value(), "1000.0000");
        assert_eq!(converter.state().category(), Category::Weight);
    }
}
