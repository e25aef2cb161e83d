use std::fmt;

use ordered_float::OrderedFloat;

/// The data kind of a symbol or an expression, fixed at declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    /// Integer or floating point numbers (`number`).
    Numeric,
    /// Strings of characters (`string`).
    Textual,
}

impl DataKind {
    /// The value a freshly declared symbol of this kind holds.
    #[must_use]
    pub const fn default_value(self) -> Value {
        match self {
            Self::Numeric => Value::Numeric(Number::Integer(0)),
            Self::Textual => Value::Textual(String::new()),
        }
    }
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "number"),
            Self::Textual => write!(f, "string"),
        }
    }
}

/// A numeric value backed by either a 64-bit integer or a 64-bit float.
///
/// Arithmetic between an integer and a float always promotes to float.
/// Division always yields a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    /// A 64-bit signed integer.
    Integer(i64),
    /// A 64-bit float.
    Float(OrderedFloat<f64>),
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Self::Float(OrderedFloat(v))
    }
}

impl Number {
    /// Returns the value as an `f64`, whatever the representation.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub const fn as_float(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Float(OrderedFloat(x)) => x,
        }
    }

    /// Adds two numbers. Returns `None` on integer overflow.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::value::Number;
    ///
    /// assert_eq!(Number::from(3).checked_add(Number::from(2)), Some(Number::from(5)));
    /// assert_eq!(Number::from(3).checked_add(Number::from(2.0)), Some(Number::from(5.0)));
    /// assert_eq!(Number::from(i64::MAX).checked_add(Number::from(1)), None);
    /// ```
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_add(b).map(Self::Integer),
            _ => Some(Self::from(self.as_float() + rhs.as_float())),
        }
    }

    /// Subtracts `rhs`. Returns `None` on integer overflow.
    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_sub(b).map(Self::Integer),
            _ => Some(Self::from(self.as_float() - rhs.as_float())),
        }
    }

    /// Multiplies two numbers. Returns `None` on integer overflow.
    #[must_use]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        match (self, rhs) {
            (Self::Integer(a), Self::Integer(b)) => a.checked_mul(b).map(Self::Integer),
            _ => Some(Self::from(self.as_float() * rhs.as_float())),
        }
    }

    /// Divides by `rhs`, always producing a float.
    ///
    /// # Example
    /// ```
    /// use kab::interpreter::value::Number;
    ///
    /// assert_eq!(Number::from(7).quotient(Number::from(2)), Number::from(3.5));
    /// assert_eq!(Number::from(8).quotient(Number::from(4)), Number::from(2.0));
    /// ```
    #[must_use]
    pub fn quotient(self, rhs: Self) -> Self {
        Self::from(self.as_float() / rhs.as_float())
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// Represents a runtime value in the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A number, integer or float.
    Numeric(Number),
    /// An owned, growable string.
    Textual(String),
}

impl Value {
    /// The data kind of this value.
    #[must_use]
    pub const fn kind(&self) -> DataKind {
        match self {
            Self::Numeric(_) => DataKind::Numeric,
            Self::Textual(_) => DataKind::Textual,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Textual(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Textual(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Textual(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_arithmetic_stays_integer() {
        assert_eq!(Number::from(3).checked_add(Number::from(2)), Some(Number::Integer(5)));
        assert_eq!(Number::from(3).checked_sub(Number::from(5)), Some(Number::Integer(-2)));
        assert_eq!(Number::from(4).checked_mul(Number::from(6)), Some(Number::Integer(24)));
    }

    #[test]
    fn mixed_arithmetic_promotes_to_float() {
        let sum = Number::from(3).checked_add(Number::from(2.0)).unwrap();
        assert_eq!(sum, Number::from(5.0));
        assert_eq!(sum.to_string(), "5");

        let product = Number::from(1.5).checked_mul(Number::from(2)).unwrap();
        assert_eq!(product, Number::from(3.0));
    }

    #[test]
    fn division_is_always_float() {
        assert_eq!(Number::from(7).quotient(Number::from(2)), Number::from(3.5));
        assert_eq!(Number::from(7).quotient(Number::from(2)).to_string(), "3.5");
        assert!(matches!(Number::from(6).quotient(Number::from(3)), Number::Float(_)));
    }

    #[test]
    fn integer_overflow_is_reported() {
        assert_eq!(Number::from(i64::MIN).checked_sub(Number::from(1)), None);
        assert_eq!(Number::from(i64::MAX).checked_mul(Number::from(2)), None);
    }

    #[test]
    fn defaults_follow_kind() {
        assert_eq!(DataKind::Numeric.default_value(), Value::from(Number::from(0)));
        assert_eq!(DataKind::Textual.default_value(), Value::from(""));
        assert_eq!(DataKind::Textual.to_string(), "string");
    }
}
