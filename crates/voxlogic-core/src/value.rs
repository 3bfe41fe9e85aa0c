//! Signal values carried by nets and block faces.

use std::fmt;

/// A signal on a net or block face.
///
/// Signals are loosely typed: numbers flow from pads and sensors, booleans
/// from gates, and [`Value::Null`] marks "no value" (an unconnected input or
/// a closed gate). Logic treats every value by its [truthiness](Value::truthy).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// A boolean signal.
    Bool(bool),
    /// A numeric signal.
    Number(f64),
}

impl Value {
    /// Boolean interpretation: `Null` and `false` are false, numbers are true
    /// unless zero or NaN.
    pub fn truthy(self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => b,
            Self::Number(n) => n != 0.0 && !n.is_nan(),
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }

    /// Combine two signals feeding the same sink.
    ///
    /// Returns `self` when it is truthy and `other` otherwise, so a fold over
    /// several drivers yields the first truthy value, or the last value when
    /// none is truthy. Every multi-input net and gated input combines with
    /// this rule.
    pub fn or(self, other: Value) -> Value {
        if self.truthy() {
            self
        } else {
            other
        }
    }

    /// Numeric interpretation: booleans become 0/1, `Null` has none.
    pub fn as_number(self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Self::Number(n) => Some(n),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
