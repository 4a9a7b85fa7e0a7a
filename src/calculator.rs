//! Accumulator state machine shared by the basic and scientific calculators
//!
//! The display is kept as text and re-read whenever an operator is chosen.
//! One pending binary operation may be held at a time; choosing a second
//! operator before `=` replaces it (no chaining, no precedence).
//!
//! States:
//! - awaiting first digit: display "0", `awaiting_new_entry`
//! - entering a number: `!awaiting_new_entry`
//! - operator pending: `pending` set, `awaiting_new_entry` until the next digit

use crate::error::CalcError;
use crate::fraction::{decimal_to_fraction, fraction_to_decimal};
use crate::number::{parse_float, pow, to_js_string};
use crate::operator::{AngleMode, Constant, Function, Operator};
use crate::scientific::{self, combinations, format_result, permutations};
use log::debug;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Display value of a cleared calculator
const ZERO: &str = "0";

/// Left operand and operator waiting for the right operand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingOperation {
    #[serde(with = "crate::number::display_text")]
    pub operand: f64,
    pub operator: Operator,
}

/// Complete calculator state.
///
/// Holding operand and operator together makes "operator set iff operand
/// set" structural. `angle_mode` is `None` on the basic calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    pub display: String,
    pub pending: Option<PendingOperation>,
    pub awaiting_new_entry: bool,
    pub angle_mode: Option<AngleMode>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState::basic()
    }
}

/// Apply a binary operator. Never fails: domain errors come back as NaN or
/// infinity.
pub fn apply_operator(operator: Operator, lhs: f64, rhs: f64) -> f64 {
    match operator {
        Operator::Add => lhs + rhs,
        Operator::Subtract => lhs - rhs,
        Operator::Multiply => lhs * rhs,
        Operator::Divide => lhs / rhs,
        Operator::Power => pow(lhs, rhs),
        Operator::Permutation => permutations(lhs, rhs),
        Operator::Combination => combinations(lhs, rhs),
    }
}

impl CalculatorState {
    /// Fresh basic (four-function) calculator
    pub fn basic() -> Self {
        CalculatorState {
            display: ZERO.to_string(),
            pending: None,
            awaiting_new_entry: true,
            angle_mode: None,
        }
    }

    /// Fresh scientific calculator in degree mode
    pub fn scientific() -> Self {
        CalculatorState {
            angle_mode: Some(AngleMode::default()),
            ..CalculatorState::basic()
        }
    }

    pub fn is_scientific(&self) -> bool {
        self.angle_mode.is_some()
    }

    /// Current display parsed as a number
    pub fn value(&self) -> f64 {
        parse_float(&self.display)
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    /// Type one digit (0-9)
    pub fn input_digit(&mut self, digit: u8) -> Result<(), CalcError> {
        if digit > 9 {
            return Err(CalcError::InvalidDigit(digit));
        }
        let text = char::from(b'0' + digit).to_string();
        self.enter(&text);
        Ok(())
    }

    /// Type a decimal point.
    ///
    /// Goes through the same path as a digit and is not checked against an
    /// existing point: "1.2.3" stays on the display and reads back as 1.2.
    pub fn input_decimal_point(&mut self) {
        self.enter(".");
    }

    /// Type the full decimal expansion of a constant
    pub fn input_constant(&mut self, constant: Constant) {
        self.enter(&to_js_string(constant.value()));
    }

    fn enter(&mut self, text: &str) {
        if self.awaiting_new_entry {
            self.display = text.to_string();
            self.awaiting_new_entry = false;
        } else if self.display == ZERO {
            self.display = text.to_string();
        } else {
            self.display.push_str(text);
        }
        debug!("entry '{}' -> display '{}'", text, self.display);
    }

    /// Hold the current display as the left operand of `operator`.
    ///
    /// A previously pending operation is replaced, not evaluated.
    pub fn choose_operator(&mut self, operator: Operator) -> Result<(), CalcError> {
        if !operator.is_basic() && !self.is_scientific() {
            return Err(CalcError::ScientificOnly(operator.symbol().to_string()));
        }
        self.pending = Some(PendingOperation {
            operand: self.value(),
            operator,
        });
        self.awaiting_new_entry = true;
        debug!("operator {} pending with operand {}", operator.symbol(), self.display);
        Ok(())
    }

    /// Apply the pending operation to the display. No-op without one.
    pub fn evaluate(&mut self) {
        let Some(PendingOperation { operand, operator }) = self.pending.take() else {
            return;
        };
        let current = self.value();
        let result = apply_operator(operator, operand, current);
        self.display = to_js_string(result);
        self.awaiting_new_entry = true;
        debug!(
            "evaluate {} {} {} = {}",
            to_js_string(operand),
            operator.symbol(),
            to_js_string(current),
            self.display
        );
    }

    /// Back to a fresh calculator, keeping the angle mode
    pub fn clear(&mut self) {
        self.display = ZERO.to_string();
        self.pending = None;
        self.awaiting_new_entry = true;
        debug!("clear");
    }

    /// Drop the last display character; an emptied display becomes "0"
    pub fn backspace(&mut self) {
        if self.display == ZERO || self.display.chars().count() <= 1 {
            self.display = ZERO.to_string();
        } else {
            self.display.pop();
        }
        debug!("backspace -> display '{}'", self.display);
    }

    /// Run a scientific function on the display
    pub fn apply_function(&mut self, func: Function) -> Result<(), CalcError> {
        let mode = self
            .angle_mode
            .ok_or_else(|| CalcError::ScientificOnly(func.name().to_string()))?;
        let input = self.value();
        let result = scientific::apply(func, input, mode);
        self.display = format_result(result);
        self.awaiting_new_entry = true;
        debug!(
            "{}({}) [{}] = {}",
            func.name(),
            to_js_string(input),
            mode.label(),
            self.display
        );
        Ok(())
    }

    /// Switch between degrees and radians
    pub fn toggle_angle_mode(&mut self) -> Result<AngleMode, CalcError> {
        let mode = self
            .angle_mode
            .ok_or_else(|| CalcError::ScientificOnly("angle mode".to_string()))?
            .toggled();
        self.angle_mode = Some(mode);
        debug!("angle mode {}", mode.label());
        Ok(mode)
    }

    /// Flip the display between decimal and "n/d" fraction form.
    ///
    /// A display containing `/` is read as a fraction and shown as a
    /// decimal; anything else is shown as a fraction. Entry continues on
    /// the converted text.
    pub fn toggle_fraction(&mut self) -> Result<(), CalcError> {
        if !self.is_scientific() {
            return Err(CalcError::ScientificOnly("fraction".to_string()));
        }
        self.display = if self.display.contains('/') {
            to_js_string(fraction_to_decimal(&self.display))
        } else {
            decimal_to_fraction(self.value())
        };
        debug!("fraction toggle -> {}", self.display);
        Ok(())
    }
}

/// Calculator exposed to the front end
#[wasm_bindgen]
pub struct Calculator {
    state: CalculatorState,
}

#[wasm_bindgen]
impl Calculator {
    /// Create a basic calculator, or a scientific one in degree mode
    #[wasm_bindgen(constructor)]
    pub fn new(scientific: bool) -> Calculator {
        let state = if scientific {
            CalculatorState::scientific()
        } else {
            CalculatorState::basic()
        };
        Calculator { state }
    }

    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.state.display.clone()
    }

    /// "DEG" / "RAD", undefined on the basic calculator
    #[wasm_bindgen(getter, js_name = angleMode)]
    pub fn angle_mode(&self) -> Option<String> {
        self.state.angle_mode.map(|m| m.label().to_string())
    }

    /// Symbol of the pending operator, for highlighting its key
    #[wasm_bindgen(getter, js_name = pendingOperator)]
    pub fn pending_operator_symbol(&self) -> Option<String> {
        self.state.pending_operator().map(|op| op.symbol().to_string())
    }

    #[wasm_bindgen(js_name = inputDigit)]
    pub fn input_digit_js(&mut self, digit: u8) -> Result<(), JsValue> {
        Ok(self.state.input_digit(digit)?)
    }

    #[wasm_bindgen(js_name = inputDecimalPoint)]
    pub fn input_decimal_point_js(&mut self) {
        self.state.input_decimal_point();
    }

    /// Type "pi"/"π" or "e"
    #[wasm_bindgen(js_name = inputConstant)]
    pub fn input_constant_js(&mut self, name: &str) -> Result<(), JsValue> {
        let constant =
            Constant::from_name(name).ok_or_else(|| CalcError::UnknownConstant(name.to_string()))?;
        self.state.input_constant(constant);
        Ok(())
    }

    #[wasm_bindgen(js_name = chooseOperator)]
    pub fn choose_operator_js(&mut self, symbol: &str) -> Result<(), JsValue> {
        let operator = Operator::from_symbol(symbol)
            .ok_or_else(|| CalcError::UnknownOperator(symbol.to_string()))?;
        Ok(self.state.choose_operator(operator)?)
    }

    pub fn evaluate(&mut self) {
        self.state.evaluate();
    }

    pub fn clear(&mut self) {
        self.state.clear();
    }

    pub fn backspace(&mut self) {
        self.state.backspace();
    }

    #[wasm_bindgen(js_name = applyFunction)]
    pub fn apply_function_js(&mut self, name: &str) -> Result<(), JsValue> {
        let func =
            Function::from_name(name).ok_or_else(|| CalcError::UnknownFunction(name.to_string()))?;
        Ok(self.state.apply_function(func)?)
    }

    /// Returns the new mode label
    #[wasm_bindgen(js_name = toggleAngleMode)]
    pub fn toggle_angle_mode_js(&mut self) -> Result<String, JsValue> {
        Ok(self.state.toggle_angle_mode()?.label().to_string())
    }

    #[wasm_bindgen(js_name = toggleFraction)]
    pub fn toggle_fraction_js(&mut self) -> Result<(), JsValue> {
        Ok(self.state.toggle_fraction()?)
    }

    /// Snapshot of the full state
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.state).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the state with a snapshot from `getState`
    #[wasm_bindgen(js_name = setState)]
    pub fn set_state(&mut self, state: JsValue) -> Result<(), JsValue> {
        let state: CalculatorState = serde_wasm_bindgen::from_value(state)
            .map_err(|e| CalcError::InvalidState(e.to_string()))?;
        self.state = state;
        Ok(())
    }
}

impl Calculator {
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CalculatorState {
        &mut self.state
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(false)
    }
}
