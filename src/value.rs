//! Dynamic data values held by a [`Store`](crate::reactive::Store).
//!
//! Values stringify the way a browser would when they are written into an
//! element's text or value slot, so `Number(1000.0)` renders as `1000` and a
//! missing key renders as `undefined`.

use std::fmt;

/// A single value in a store's open key/value map.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value. This is what a lookup of an unknown key yields.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// A boolean.
    Bool(bool),
    /// A double-precision number.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Value {
    /// Returns `true` for [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Borrow the text payload, if this is a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric conversion with `Number(x)` semantics.
    ///
    /// Text is trimmed before parsing; empty text is `0`, anything that is not
    /// a plain decimal literal is `NaN`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::Text(s) => parse_number(s),
        }
    }
}

fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if let Some(radix) = radix_prefix(trimmed) {
        return parse_radix(&trimmed[2..], radix);
    }
    match trimmed {
        "" => 0.0,
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust's float parser also accepts `inf` and `nan`; those are not numbers here.
        s if s
            .chars()
            .any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') =>
        {
            f64::NAN
        }
        s => s.parse().unwrap_or(f64::NAN),
    }
}

/// `0x`, `0o` and `0b` literals. Unsigned only, like `Number("-0x1")`.
fn radix_prefix(text: &str) -> Option<u32> {
    match text.get(..2)? {
        "0x" | "0X" => Some(16),
        "0o" | "0O" => Some(8),
        "0b" | "0B" => Some(2),
        _ => None,
    }
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    let mut n = 0.0;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => n = n * f64::from(radix) + f64::from(d),
            None => return f64::NAN,
        }
    }
    n
}

/// `Number.prototype.toString()`.
///
/// Decimal notation for exponents in `-7 < e < 21`, exponent notation
/// (`1e+21`, `1.5e-7`) outside that range.
fn format_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        return f.write_str("NaN");
    }
    if n.is_infinite() {
        return f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if n == 0.0 {
        // Covers -0 as well.
        return f.write_str("0");
    }
    if n < 0.0 {
        f.write_str("-")?;
    }

    // Shortest round-trip digits, e.g. "1.2345e3".
    let sci = format!("{:e}", n.abs());
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    let point = exponent + 1;

    if k <= point && point <= 21 {
        write!(f, "{digits}{}", "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{int}.{frac}")
    } else if -6 < point && point <= 0 {
        write!(f, "0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let (first, rest) = digits.split_at(1);
        let sign = if point > 0 { '+' } else { '-' };
        if rest.is_empty() {
            write!(f, "{first}e{sign}{}", (point - 1).abs())
        } else {
            write!(f, "{first}.{rest}e{sign}{}", (point - 1).abs())
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => format_number(*n, f),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_have_no_fraction() {
        assert_eq!(Value::from(1000).to_string(), "1000");
        assert_eq!(Value::from(-3.0).to_string(), "-3");
        assert_eq!(Value::from(1e20).to_string(), "100000000000000000000");
    }

    #[test]
    fn negative_zero_prints_as_zero() {
        assert_eq!(Value::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn fractional_numbers() {
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(0.1 + 0.2).to_string(), "0.30000000000000004");
    }

    #[test]
    fn exponent_form_outside_decimal_range() {
        assert_eq!(Value::from(1e21).to_string(), "1e+21");
        assert_eq!(Value::from(1.5e22).to_string(), "1.5e+22");
        assert_eq!(Value::from(1e-7).to_string(), "1e-7");
        assert_eq!(Value::from(-1.25e-9).to_string(), "-1.25e-9");
        assert_eq!(Value::from(0.000001).to_string(), "0.000001");
        assert_eq!(Value::from(123.456).to_string(), "123.456");
        assert_eq!(Value::from(-0.5).to_string(), "-0.5");
    }

    #[test]
    fn special_numbers() {
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn non_numeric_variants() {
        assert_eq!(Value::Undefined.to_string(), "undefined");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("hi").to_string(), "hi");
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }

    #[test]
    fn to_number_from_text() {
        assert_eq!(Value::from(" 42 ").to_number(), 42.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("1e3").to_number(), 1000.0);
        assert_eq!(Value::from("-Infinity").to_number(), f64::NEG_INFINITY);
        assert!(Value::from("abc").to_number().is_nan());
        assert!(Value::from("inf").to_number().is_nan());
    }

    #[test]
    fn to_number_radix_prefixes() {
        assert_eq!(Value::from("0x1F").to_number(), 31.0);
        assert_eq!(Value::from(" 0o17 ").to_number(), 15.0);
        assert_eq!(Value::from("0B101").to_number(), 5.0);
        assert!(Value::from("0x").to_number().is_nan());
        assert!(Value::from("0b102").to_number().is_nan());
        assert!(Value::from("-0x1").to_number().is_nan());
    }

    #[test]
    fn as_text_only_for_text() {
        assert_eq!(Value::from("hi").as_text(), Some("hi"));
        assert_eq!(Value::from(1).as_text(), None);
        assert_eq!(Value::Undefined.as_text(), None);
    }

    #[test]
    fn to_number_other_variants() {
        assert!(Value::Undefined.to_number().is_nan());
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Bool(true).to_number(), 1.0);
        assert_eq!(Value::from(7).to_number(), 7.0);
    }

    #[test]
    fn default_is_undefined() {
        assert!(Value::default().is_undefined());
    }
}
