//! Operator, function and mode tags
//!
//! Closed vocabularies for everything the UI can dispatch. Symbols and
//! names match the labels the front end sends.

use serde::{Deserialize, Serialize};

/// Binary operators held as the pending operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Permutation,
    Combination,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
        Operator::Power,
        Operator::Permutation,
        Operator::Combination,
    ];

    /// Parse an operator symbol, including the ASCII keyboard aliases `*` and `/`
    pub fn from_symbol(symbol: &str) -> Option<Operator> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Subtract),
            "×" | "*" => Some(Operator::Multiply),
            "÷" | "/" => Some(Operator::Divide),
            "^" => Some(Operator::Power),
            "nPr" => Some(Operator::Permutation),
            "nCr" => Some(Operator::Combination),
            _ => None,
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Power => "^",
            Operator::Permutation => "nPr",
            Operator::Combination => "nCr",
        }
    }

    /// Whether the basic calculator offers this operator
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Subtract | Operator::Multiply | Operator::Divide
        )
    }
}

/// Unary functions of the scientific calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
    Cbrt,
    Square,
    Cube,
    Log,
    Ln,
    Factorial,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Abs,
    Random,
}

impl Function {
    pub const ALL: [Function; 21] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sqrt,
        Function::Cbrt,
        Function::Square,
        Function::Cube,
        Function::Log,
        Function::Ln,
        Function::Factorial,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Asinh,
        Function::Acosh,
        Function::Atanh,
        Function::Abs,
        Function::Random,
    ];

    /// Get the function name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Square => "square",
            Function::Cube => "cube",
            Function::Log => "log",
            Function::Ln => "ln",
            Function::Factorial => "factorial",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Asinh => "asinh",
            Function::Acosh => "acosh",
            Function::Atanh => "atanh",
            Function::Abs => "abs",
            Function::Random => "random",
        }
    }

    /// Parse a function name
    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// sin, cos and tan take their argument in the current angle mode
    pub fn is_trig(&self) -> bool {
        matches!(self, Function::Sin | Function::Cos | Function::Tan)
    }

    /// asin, acos and atan report their result in the current angle mode
    pub fn is_inverse_trig(&self) -> bool {
        matches!(self, Function::Asin | Function::Acos | Function::Atan)
    }
}

/// Angle unit used by the trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AngleMode {
    #[default]
    #[serde(rename = "DEG")]
    Degrees,
    #[serde(rename = "RAD")]
    Radians,
}

impl AngleMode {
    pub fn label(&self) -> &'static str {
        match self {
            AngleMode::Degrees => "DEG",
            AngleMode::Radians => "RAD",
        }
    }

    pub fn toggled(&self) -> AngleMode {
        match self {
            AngleMode::Degrees => AngleMode::Radians,
            AngleMode::Radians => AngleMode::Degrees,
        }
    }
}

/// Constants the scientific keypad can type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn from_name(name: &str) -> Option<Constant> {
        match name {
            "pi" | "π" => Some(Constant::Pi),
            "e" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_symbol() {
        assert_eq!(Operator::from_symbol("+"), Some(Operator::Add));
        assert_eq!(Operator::from_symbol("×"), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("*"), Some(Operator::Multiply));
        assert_eq!(Operator::from_symbol("/"), Some(Operator::Divide));
        assert_eq!(Operator::from_symbol("nCr"), Some(Operator::Combination));
        assert_eq!(Operator::from_symbol("%"), None);
    }

    #[test]
    fn test_operator_symbols_parse_back() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
    }

    #[test]
    fn test_basic_operators() {
        assert!(Operator::Divide.is_basic());
        assert!(!Operator::Power.is_basic());
        assert!(!Operator::Permutation.is_basic());
    }

    #[test]
    fn test_function_from_name() {
        assert_eq!(Function::from_name("sin"), Some(Function::Sin));
        assert_eq!(Function::from_name("atanh"), Some(Function::Atanh));
        assert_eq!(Function::from_name("sec"), None);
        for f in Function::ALL {
            assert_eq!(Function::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn test_trig_groups() {
        assert!(Function::Tan.is_trig());
        assert!(!Function::Tan.is_inverse_trig());
        assert!(Function::Acos.is_inverse_trig());
        assert!(!Function::Sinh.is_trig());
        assert!(!Function::Asinh.is_inverse_trig());
    }

    #[test]
    fn test_angle_mode() {
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
        assert_eq!(AngleMode::Degrees.toggled(), AngleMode::Radians);
        assert_eq!(AngleMode::Radians.label(), "RAD");
    }

    #[test]
    fn test_constant() {
        assert_eq!(Constant::from_name("π"), Some(Constant::Pi));
        assert_eq!(Constant::E.value(), std::f64::consts::E);
        assert_eq!(Constant::from_name("tau"), None);
    }
}
