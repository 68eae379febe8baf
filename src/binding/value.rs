//! Dynamic values exchanged with the host caller.

use crate::coincidence::CoincidencePairs;
use thiserror::Error;

/// A dynamically typed value as handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    None,
    Int(i64),
    Float(f64),
    IntArray(Vec<i64>),
    FloatArray(Vec<f64>),
    Tuple(Vec<Value>),
}

impl Value {
    /// Host-facing name of the value's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::IntArray(_) => "int array",
            Value::FloatArray(_) => "float array",
            Value::Tuple(_) => "tuple",
        }
    }
}

/// Conversion failures at the dynamic/static boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{0} is not integral")]
    NotIntegral(f64),
}

fn integral(f: f64) -> Result<i64, ValueError> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(ValueError::NotIntegral(f))
    }
}

/// Explicit conversion out of a [`Value`].
pub trait FromValue: Sized {
    /// What the conversion accepts, for error messages.
    const EXPECTED: &'static str;

    fn from_value(value: Value) -> Result<Self, ValueError>;

    fn mismatch(value: &Value) -> ValueError {
        ValueError::Mismatch {
            expected: Self::EXPECTED,
            found: value.type_name(),
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: &'static str = "int";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Float(f) => integral(f),
            other => Err(Self::mismatch(&other)),
        }
    }
}

impl FromValue for f64 {
    const EXPECTED: &'static str = "float";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(Self::mismatch(&other)),
        }
    }
}

impl FromValue for Vec<i64> {
    const EXPECTED: &'static str = "int array";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::IntArray(v) => Ok(v),
            Value::FloatArray(v) => v.into_iter().map(integral).collect(),
            other => Err(Self::mismatch(&other)),
        }
    }
}

impl FromValue for Vec<f64> {
    const EXPECTED: &'static str = "float array";

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::FloatArray(v) => Ok(v),
            Value::IntArray(v) => Ok(v.into_iter().map(|i| i as f64).collect()),
            other => Err(Self::mismatch(&other)),
        }
    }
}

/// Conversion into a [`Value`] for returning to the host.
pub trait IntoValue {
    fn into_value(self) -> Value;
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }
}

impl IntoValue for Vec<i64> {
    fn into_value(self) -> Value {
        Value::IntArray(self)
    }
}

impl IntoValue for Vec<f64> {
    fn into_value(self) -> Value {
        Value::FloatArray(self)
    }
}

impl<A: IntoValue, B: IntoValue> IntoValue for (A, B) {
    fn into_value(self) -> Value {
        Value::Tuple(vec![self.0.into_value(), self.1.into_value()])
    }
}

/// Pairs go back as a `(start, stop)` tuple of int arrays.
impl IntoValue for CoincidencePairs {
    fn into_value(self) -> Value {
        (self.start, self.stop).into_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_array_conversions() {
        assert_eq!(Vec::<i64>::from_value(Value::IntArray(vec![1, 2])), Ok(vec![1, 2]));
        assert_eq!(
            Vec::<i64>::from_value(Value::FloatArray(vec![1.0, 2.0])),
            Ok(vec![1, 2])
        );
        assert_eq!(
            Vec::<i64>::from_value(Value::FloatArray(vec![1.0, 2.5])),
            Err(ValueError::NotIntegral(2.5))
        );
    }

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(i64::from_value(Value::Int(7)), Ok(7));
        assert_eq!(i64::from_value(Value::Float(7.0)), Ok(7));
        assert_eq!(f64::from_value(Value::Int(3)), Ok(3.0));
        assert!(i64::from_value(Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn test_mismatch_names_both_types() {
        let err = i64::from_value(Value::IntArray(vec![])).unwrap_err();
        assert_eq!(err.to_string(), "expected int, found int array");
    }

    #[test]
    fn test_pairs_into_tuple() {
        let mut pairs = CoincidencePairs::default();
        pairs.push(1, 2);
        assert_eq!(
            pairs.into_value(),
            Value::Tuple(vec![Value::IntArray(vec![1]), Value::IntArray(vec![2])])
        );
    }
}
