//! The narrow variable type used inside script conditions.

use std::cmp::Ordering;

use crate::error::{FormatError, Result};
use crate::text::Text;
use crate::value::Value;

/// A script variable. Mixed numeric comparison happens in the common
/// type; a string compared against a number is unordered.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptVar<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Text<'a>),
}

impl<'a> ScriptVar<'a> {
    /// Coerce an argument value into a script variable. Handles and
    /// absent values do not convert.
    pub fn from_value(v: &Value<'a>) -> Result<Self> {
        match v {
            Value::Bool(b) => Ok(ScriptVar::Bool(*b)),
            Value::Char(c) => {
                Ok(ScriptVar::Str(Text::owned(c.to_string())))
            }
            Value::I32(i) => Ok(ScriptVar::Int(i64::from(*i))),
            Value::U32(u) => Ok(ScriptVar::Int(i64::from(*u))),
            Value::I64(i) => Ok(ScriptVar::Int(*i)),
            Value::U64(u) => i64::try_from(*u)
                .map(ScriptVar::Int)
                .map_err(|_| invalid("u64 value out of range")),
            Value::F32(f) => Ok(ScriptVar::Float(f64::from(*f))),
            Value::F64(f) => Ok(ScriptVar::Float(*f)),
            Value::Str(t) => Ok(ScriptVar::Str(t.clone())),
            Value::None => Err(invalid("absent value")),
            Value::Ptr(_) => Err(invalid("pointer value")),
            Value::Handle(_) => Err(invalid("handle value")),
        }
    }

    pub fn holds_int(&self) -> bool {
        matches!(self, ScriptVar::Int(_))
    }

    pub fn holds_string(&self) -> bool {
        matches!(self, ScriptVar::Str(_))
    }

    /// Truthiness: non-zero numeric or non-empty string.
    pub fn as_bool(&self) -> bool {
        match self {
            ScriptVar::Bool(b) => *b,
            ScriptVar::Int(i) => *i != 0,
            ScriptVar::Float(f) => *f != 0.0,
            ScriptVar::Str(t) => !t.is_empty(),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            ScriptVar::Bool(b) => Ok(i64::from(*b)),
            ScriptVar::Int(i) => Ok(*i),
            ScriptVar::Float(f) => Ok(*f as i64),
            ScriptVar::Str(_) => Err(invalid("string to number")),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match self {
            ScriptVar::Bool(b) => Ok(f64::from(u8::from(*b))),
            ScriptVar::Int(i) => Ok(*i as f64),
            ScriptVar::Float(f) => Ok(*f),
            ScriptVar::Str(_) => Err(invalid("string to number")),
        }
    }

    pub fn as_str(&self) -> Result<&Text<'a>> {
        match self {
            ScriptVar::Str(t) => Ok(t),
            _ => Err(invalid("number to string")),
        }
    }

    /// Total order over matching kinds, `None` for string vs number.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        use ScriptVar::*;
        match (self, other) {
            (Str(a), Str(b)) => Some(a.cmp(b)),
            (Str(_), _) | (_, Str(_)) => None,
            (a, b) => {
                // numeric kinds compare in the common type
                if matches!(a, Float(_)) || matches!(b, Float(_)) {
                    let (x, y) = (a.numeric_f64(), b.numeric_f64());
                    x.partial_cmp(&y)
                } else {
                    Some(a.numeric_i64().cmp(&b.numeric_i64()))
                }
            }
        }
    }

    /// Equality with the default epsilon for float comparison.
    pub fn equal(&self, other: &Self) -> bool {
        self.equal_with(other, f64::EPSILON)
    }

    pub fn equal_with(&self, other: &Self, epsilon: f64) -> bool {
        use ScriptVar::*;
        match (self, other) {
            (Str(a), Str(b)) => a == b,
            (Str(_), _) | (_, Str(_)) => false,
            (a, b) => {
                if matches!(a, Float(_)) || matches!(b, Float(_)) {
                    (a.numeric_f64() - b.numeric_f64()).abs() < epsilon
                } else {
                    a.numeric_i64() == b.numeric_i64()
                }
            }
        }
    }

    fn numeric_i64(&self) -> i64 {
        match self {
            ScriptVar::Bool(b) => i64::from(*b),
            ScriptVar::Int(i) => *i,
            ScriptVar::Float(f) => *f as i64,
            ScriptVar::Str(_) => 0,
        }
    }

    fn numeric_f64(&self) -> f64 {
        match self {
            ScriptVar::Bool(b) => f64::from(u8::from(*b)),
            ScriptVar::Int(i) => *i as f64,
            ScriptVar::Float(f) => *f,
            ScriptVar::Str(_) => f64::NAN,
        }
    }
}

fn invalid(what: &str) -> FormatError {
    FormatError::InvalidConversion(what.to_owned())
}

impl From<bool> for ScriptVar<'_> {
    fn from(b: bool) -> Self {
        ScriptVar::Bool(b)
    }
}

impl From<i64> for ScriptVar<'_> {
    fn from(i: i64) -> Self {
        ScriptVar::Int(i)
    }
}

impl From<f64> for ScriptVar<'_> {
    fn from(f: f64) -> Self {
        ScriptVar::Float(f)
    }
}

impl<'a> From<Text<'a>> for ScriptVar<'a> {
    fn from(t: Text<'a>) -> Self {
        ScriptVar::Str(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn coercions() {
        assert_eq!(
            ScriptVar::from_value(&Value::from('x')).unwrap(),
            ScriptVar::Str(Text::owned("x".to_owned()))
        );
        assert_eq!(
            ScriptVar::from_value(&Value::from(7u32)).unwrap(),
            ScriptVar::Int(7)
        );
        assert!(ScriptVar::from_value(&Value::None).is_err());
    }

    #[rstest]
    #[case(ScriptVar::Int(0), false)]
    #[case(ScriptVar::Int(-3), true)]
    #[case(ScriptVar::Float(0.0), false)]
    #[case(ScriptVar::Str(Text::borrowed("")), false)]
    #[case(ScriptVar::Str(Text::borrowed("x")), true)]
    fn truthiness(#[case] var: ScriptVar<'_>, #[case] expected: bool) {
        assert_eq!(var.as_bool(), expected);
    }

    #[test]
    fn mixed_numeric_compare() {
        let two = ScriptVar::Int(2);
        let two_and_half = ScriptVar::Float(2.5);
        assert_eq!(two.compare(&two_and_half), Some(Ordering::Less));
        assert_eq!(two_and_half.compare(&two), Some(Ordering::Greater));
        assert_eq!(
            ScriptVar::Bool(true).compare(&ScriptVar::Int(1)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn string_vs_number_is_unordered() {
        let s = ScriptVar::Str(Text::borrowed("2"));
        let n = ScriptVar::Int(2);
        assert_eq!(s.compare(&n), None);
        assert!(!s.equal(&n));
        assert!(!n.equal(&s));
    }

    #[test]
    fn float_equality_uses_epsilon() {
        let a = ScriptVar::Float(0.1 + 0.2);
        let b = ScriptVar::Float(0.3);
        assert!(a.equal_with(&b, 1e-9));
        assert!(!a.equal_with(&b, f64::EPSILON / 10.0));
        assert!(ScriptVar::Int(3).equal(&ScriptVar::Float(3.0)));
    }

    #[test]
    fn string_conversions_error() {
        let s = ScriptVar::Str(Text::borrowed("42"));
        assert!(s.as_int().is_err());
        assert!(s.as_float().is_err());
        assert!(ScriptVar::Int(1).as_str().is_err());
    }
}
