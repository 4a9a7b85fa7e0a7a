//! Numeric text handling shared by every engine
//!
//! The calculators keep their display as text and re-read it on every
//! operator, so parsing and printing have to agree with what the web front
//! end shows: `parseFloat` prefix parsing, `Number#toString` printing and
//! `toFixed` padding.

/// Values at or above this magnitude print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;

/// Values below this magnitude (and non-zero) print in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Parse the longest numeric prefix of `text`.
///
/// Leading whitespace is skipped. Accepts an optional sign, `Infinity`,
/// digits with an optional fractional part and an optional exponent.
/// Anything after the prefix is ignored, so `"1.2.3"` reads as `1.2`.
/// Returns NaN when no prefix parses.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut pos = 0;

    let negative = match bytes.first() {
        Some(b'-') => {
            pos += 1;
            true
        }
        Some(b'+') => {
            pos += 1;
            false
        }
        _ => false,
    };

    if s[pos..].starts_with("Infinity") {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = pos - int_start;

    let mut frac_digits = 0;
    let mut mantissa_end = pos;
    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut cursor = frac_start;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        frac_digits = cursor - frac_start;
        if int_digits > 0 || frac_digits > 0 {
            mantissa_end = cursor;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    let mut end = mantissa_end;
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut cursor = end + 1;
        if cursor < bytes.len() && (bytes[cursor] == b'+' || bytes[cursor] == b'-') {
            cursor += 1;
        }
        let exp_start = cursor;
        while cursor < bytes.len() && bytes[cursor].is_ascii_digit() {
            cursor += 1;
        }
        if cursor > exp_start {
            end = cursor;
        }
    }

    // Normalise "5." and ".5" so the std parser sees a plain literal
    let mut literal = String::with_capacity(end + 2);
    if int_digits == 0 {
        literal.push('0');
    }
    literal.push_str(&s[int_start..mantissa_end]);
    if literal.ends_with('.') {
        literal.pop();
    }
    literal.push_str(&s[mantissa_end..end]);

    match literal.parse::<f64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => f64::NAN,
    }
}

/// Parse the whole of `text` (surrounding whitespace allowed) as a number.
///
/// Unlike [`parse_float`] any trailing junk, or an empty string, gives NaN.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim();
    if s.is_empty() {
        return f64::NAN;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // Rust accepts "inf"/"nan" spellings that the display never produces
    let body = s.trim_start_matches(['+', '-']);
    if !body.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Print a number the way the display shows it.
pub fn to_js_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (EXPONENT_BELOW..EXPONENT_ABOVE).contains(&magnitude) {
        return format!("{}", value);
    }

    // `{:e}` gives "1e21" / "1.5e-7"; positive exponents carry an explicit '+'
    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => formatted,
    }
}

/// Fixed-point text with exactly `digits` decimals.
///
/// Non-finite values and magnitudes of 1e21 or more fall back to
/// [`to_js_string`].
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= EXPONENT_ABOVE {
        return to_js_string(value);
    }
    // -0 prints without its sign
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", digits, value)
}

/// Round to `decimals` places, halves going toward positive infinity.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

/// `base` raised to `exponent`.
///
/// Same as `powf` except that `(±1)^(±∞)` is NaN rather than 1.
pub fn pow(base: f64, exponent: f64) -> f64 {
    if base.abs() == 1.0 && exponent.is_infinite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

/// Serde helpers that store an `f64` as its display text, so NaN and the
/// infinities survive formats without a spelling for them (JSON).
pub mod display_text {
    use super::{parse_number, to_js_string};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_js_string(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = String::deserialize(deserializer)?;
        let value = parse_number(&text);
        if value.is_nan() && text.trim() != "NaN" {
            return Err(de::Error::custom(format!("'{}' is not a number", text)));
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("  -3.5"), -3.5);
        assert_eq!(parse_float("1.2.3"), 1.2);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("2.5e-1x"), 0.25);
        assert_eq!(parse_float("1/2"), 1.0);
    }

    #[test]
    fn test_parse_float_special() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("NaN").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("inf").is_nan());
    }

    #[test]
    fn test_parse_number_strict() {
        assert_eq!(parse_number(" 3 "), 3.0);
        assert_eq!(parse_number("-0.25"), -0.25);
        assert_eq!(parse_number("Infinity"), f64::INFINITY);
        assert!(parse_number("").is_nan());
        assert!(parse_number("1.2.3").is_nan());
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("inf").is_nan());
        assert!(parse_number("nan").is_nan());
    }

    #[test]
    fn test_to_js_string() {
        assert_eq!(to_js_string(3.0), "3");
        assert_eq!(to_js_string(-0.0), "0");
        assert_eq!(to_js_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(to_js_string(1e21), "1e+21");
        assert_eq!(to_js_string(1.5e-7), "1.5e-7");
        assert_eq!(to_js_string(0.000001), "0.000001");
        assert_eq!(to_js_string(f64::INFINITY), "Infinity");
        assert_eq!(to_js_string(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(to_js_string(f64::NAN), "NaN");
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(1000.0, 4), "1000.0000");
        assert_eq!(to_fixed(5.0, 2), "5.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(to_fixed(f64::NAN, 4), "NaN");
        assert_eq!(to_fixed(2e21, 2), "2e+21");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(4.996, 2), 5.0);
        assert_eq!(round_half_up(-2.5, 0), -2.0);
        assert_eq!(round_half_up(2.5, 0), 3.0);
    }

    #[test]
    fn test_pow() {
        assert_eq!(pow(2.0, 10.0), 1024.0);
        assert!(pow(1.0, f64::INFINITY).is_nan());
        assert!(pow(-1.0, f64::NEG_INFINITY).is_nan());
        assert_eq!(pow(0.0, 0.0), 1.0);
    }

    #[derive(Debug, serde::Serialize, serde::Deserialize)]
    struct Wrapped {
        #[serde(with = "display_text")]
        value: f64,
    }

    #[test]
    fn test_display_text_keeps_non_finite() {
        let json = serde_json::to_string(&Wrapped { value: f64::NEG_INFINITY }).unwrap();
        assert_eq!(json, r#"{"value":"-Infinity"}"#);
        let back: Wrapped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, f64::NEG_INFINITY);

        let back: Wrapped = serde_json::from_str(r#"{"value":"NaN"}"#).unwrap();
        assert!(back.value.is_nan());
        let back: Wrapped = serde_json::from_str(r#"{"value":"1e+21"}"#).unwrap();
        assert_eq!(back.value, 1e21);
        let back: Wrapped = serde_json::from_str(r#"{"value":"0.1"}"#).unwrap();
        assert_eq!(back.value, 0.1);

        assert!(serde_json::from_str::<Wrapped>(r#"{"value":"abc"}"#).is_err());
    }
}
