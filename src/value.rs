use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use rust_decimal::{Decimal, prelude::ToPrimitive};

/// Full-string numeric syntax accepted by coercion (after trimming whitespace).
static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(\d+(\.\d+)?|\.\d+)([eE][+-]?\d+)?$").expect("number pattern is valid")
});

/// Why text or a value could not be used as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// Not a number at all
    NotNumeric,
    /// Well-formed number that does not fit the [`Decimal`] range or scale
    OutOfRange,
}

impl fmt::Display for NumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberError::NotNumeric => write!(f, "not a number"),
            NumberError::OutOfRange => write!(f, "number out of range"),
        }
    }
}

impl std::error::Error for NumberError {}

/// A value produced by evaluation.
///
/// # Numbers
///
/// Numbers are held as [`Decimal`] so that `add(0.1, 0.2)` is exactly `0.3`.
///
/// # Examples
///
/// ```
/// use colexpr::Value;
/// use rust_decimal::Decimal;
///
/// let n = Value::Number(Decimal::from(5));
/// let s = Value::String("5".to_string());
///
/// assert_eq!(n.to_number(), s.to_number());
/// assert!(Value::Boolean(true).is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(Decimal),
    String(String),
    Boolean(bool),
}

impl Value {
    /// Check if the value is truthy (for conditions)
    ///
    /// Non-zero numbers, non-empty strings and `true` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::String(s) => !s.is_empty(),
            Value::Boolean(b) => *b,
        }
    }

    /// Numeric coercion.
    ///
    /// Numbers coerce to themselves, strings coerce when their trimmed content
    /// is a complete number. Booleans never coerce.
    pub fn to_number(&self) -> Result<Decimal, NumberError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::String(s) => parse_number(s),
            Value::Boolean(_) => Err(NumberError::NotNumeric),
        }
    }

    /// Whether the value is a number or numeric text, regardless of range
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Number(_) => true,
            Value::String(s) => is_numeric_text(s),
            Value::Boolean(_) => false,
        }
    }

    /// Convert to a JSON value.
    ///
    /// Integral numbers become JSON integers, everything else a float.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Number(n) => {
                if n.is_integer()
                    && let Some(i) = n.to_i64()
                {
                    serde_json::Value::Number(i.into())
                } else {
                    n.to_f64()
                        .and_then(serde_json::Number::from_f64)
                        .map(serde_json::Value::Number)
                        .unwrap_or_else(|| serde_json::Value::String(n.normalize().to_string()))
                }
            }
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
        }
    }
}

impl From<Decimal> for Value {
    fn from(n: Decimal) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Decimal::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n.normalize()),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Whether the whole text (ignoring surrounding whitespace) is a number.
///
/// Says nothing about whether it fits a [`Decimal`].
pub fn is_numeric_text(text: &str) -> bool {
    NUMBER_PATTERN.is_match(text.trim())
}

/// Parse text as a number.
///
/// Leading and trailing whitespace is ignored; an empty string is not a number.
/// Well-formed text outside the [`Decimal`] range or scale (e.g. `1e30`,
/// `1e-40`) is [`NumberError::OutOfRange`].
pub fn parse_number(text: &str) -> Result<Decimal, NumberError> {
    let trimmed = text.trim();
    if !NUMBER_PATTERN.is_match(trimmed) {
        return Err(NumberError::NotNumeric);
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let parsed = if unsigned.contains(['e', 'E']) {
        Decimal::from_scientific(unsigned)
    } else {
        Decimal::from_str(unsigned)
    };
    parsed.map_err(|_| NumberError::OutOfRange)
}

#[test]
fn test_parse_number_accepts_full_numbers_only() {
    assert_eq!(parse_number("5"), Ok(Decimal::from(5)));
    assert_eq!(parse_number(" -2.5 "), Ok(Decimal::from_str("-2.5").unwrap()));
    assert_eq!(parse_number("+7"), Ok(Decimal::from(7)));
    assert_eq!(parse_number("1e3"), Ok(Decimal::from(1000)));
    assert_eq!(parse_number("abc"), Err(NumberError::NotNumeric));
    assert_eq!(parse_number("5abc"), Err(NumberError::NotNumeric));
    assert_eq!(parse_number(""), Err(NumberError::NotNumeric));
    assert_eq!(parse_number("   "), Err(NumberError::NotNumeric));
}

#[test]
fn test_parse_number_out_of_range() {
    assert_eq!(parse_number("1e30"), Err(NumberError::OutOfRange));
    assert_eq!(parse_number("-1e30"), Err(NumberError::OutOfRange));
    assert_eq!(parse_number("1e-40"), Err(NumberError::OutOfRange));
    assert_eq!(
        parse_number("100000000000000000000000000000"),
        Err(NumberError::OutOfRange)
    );
    assert!(parse_number(&Decimal::MAX.to_string()).is_ok());

    // Still numeric text, just not representable
    assert!(is_numeric_text("1e30"));
    assert!(is_numeric_text(" 1e-40 "));
    assert!(!is_numeric_text("1e"));
    assert!(Value::from("1e30").is_numeric());
    assert!(!Value::from(true).is_numeric());
}

#[test]
fn test_truthiness() {
    assert!(Value::from(3).is_truthy());
    assert!(!Value::from(0).is_truthy());
    assert!(Value::from("x").is_truthy());
    assert!(!Value::from("").is_truthy());
    assert!(!Value::from(false).is_truthy());
}

#[test]
fn test_display_normalizes_numbers() {
    let n = Value::Number(Decimal::from_str("2.50").unwrap());
    assert_eq!(n.to_string(), "2.5");
    assert_eq!(Value::from(true).to_string(), "true");
}
