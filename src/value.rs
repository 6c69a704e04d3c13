//! Dynamically typed list elements.

use std::{cmp::Ordering, fmt::Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// A dynamically typed value.
///
/// Values of the same kind compare naturally, integers and floats
/// compare exactly by their numeric value. All other combinations are
/// incomparable, so inserting them into a sorted list fails with
/// [`TypeMismatch`](crate::Error::TypeMismatch).
///
/// Equality follows the order, so `Int(2) == Float(2.0)`.
///
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// A boolean, `false < true`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number. `NaN` is incomparable.
    Float(f64),
    /// A string, compared lexicographically.
    Text(String),
}

impl Value {
    /// The name of the values kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(lhs), Self::Bool(rhs)) => lhs.partial_cmp(rhs),
            (Self::Int(lhs), Self::Int(rhs)) => lhs.partial_cmp(rhs),
            (Self::Float(lhs), Self::Float(rhs)) => lhs.partial_cmp(rhs),
            (Self::Int(lhs), Self::Float(rhs)) => cmp_int_float(*lhs, *rhs),
            (Self::Float(lhs), Self::Int(rhs)) => cmp_int_float(*rhs, *lhs).map(Ordering::reverse),
            (Self::Text(lhs), Self::Text(rhs)) => lhs.partial_cmp(rhs),
            _ => None,
        }
    }
}

/// 2^63, the smallest float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Compares an integer with a float without rounding either of them.
#[allow(clippy::cast_possible_truncation)]
fn cmp_int_float(int: i64, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float >= I64_END {
        return Some(Ordering::Less);
    }
    if float < -I64_END {
        return Some(Ordering::Greater);
    }

    // In range, so the integral part converts exactly.
    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal => (float - whole).partial_cmp(&0.0).map(Ordering::reverse),
        ord => Some(ord),
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        list::CowList,
        ord::{is_sorted, Probe},
    };

    #[test]
    fn same_kind_ordering() {
        assert!(Value::from("a") < Value::from("b"));
        assert!(Value::from(false) < Value::from(true));
        assert!(Value::from(-3_i64) < Value::from(2_i64));
    }

    #[test]
    fn numeric_ordering() {
        assert!(Value::from(1_i64) < Value::from(1.5_f64));
        assert!(Value::from(2.0_f64) > Value::from(1_i64));
        assert_eq!(
            Value::from(2_i64).partial_cmp(&Value::from(2.0_f64)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn equality_follows_order() {
        assert_eq!(Value::from(2_i64), Value::from(2.0_f64));
        assert_eq!(Value::from(-0.0_f64), Value::from(0_i64));
        assert_ne!(Value::from(2_i64), Value::from(2.5_f64));
        assert_ne!(Value::from(f64::NAN), Value::from(f64::NAN));
        assert_ne!(Value::from("2"), Value::from(2_i64));
    }

    #[test]
    fn large_integers_compare_exactly() {
        let pow = 1_i64 << 53;
        #[allow(clippy::cast_precision_loss)]
        let float = Value::from(pow as f64);

        assert!(Value::from(pow + 1) > float);
        assert!(float < Value::from(pow + 1));
        assert_eq!(Value::from(pow), float);
        assert!(Value::from(i64::MAX) < Value::from(I64_END));
        assert!(Value::from(i64::MIN) == Value::from(-I64_END));
        assert!(Value::from(i64::MIN) > Value::from(f64::NEG_INFINITY));
        assert!(Value::from(-3_i64) < Value::from(-2.5_f64));
        assert!(Value::from(-2_i64) > Value::from(-2.5_f64));
    }

    #[test]
    fn insertion_points_agree_near_float_precision() {
        let pow = 1_i64 << 53;
        #[allow(clippy::cast_precision_loss)]
        let (low, high) = (pow as f64, (pow + 2) as f64);

        let unsorted = vec![Value::from(pow + 1), Value::from(low)];
        assert!(!is_sorted(&unsorted));

        let seq = vec![Value::from(low), Value::from(pow + 1), Value::from(high)];
        assert!(is_sorted(&seq));
        for probe in [Probe::Forward, Probe::Backward, Probe::Bisect] {
            assert_eq!(
                probe.locate(&seq, &Value::from(pow), PartialOrd::partial_cmp),
                Ok(1),
                "{probe:?}"
            );
            assert_eq!(
                probe.locate(&seq, &Value::from(pow + 1), PartialOrd::partial_cmp),
                Ok(2),
                "{probe:?}"
            );
        }
    }

    #[test]
    fn list_membership_follows_order() {
        let list = CowList::from(vec![Value::from(1_i64), Value::from(2_i64)]);

        assert!(list.contains(&Value::from(2.0_f64)));
        assert_eq!(list.index_of(&Value::from(1.0_f64)), Some(0));
        assert!(!list.add_if_absent(Value::from(2.0_f64)));
        assert_eq!(list.version(), 0);

        assert!(list.remove_item(&Value::from(1.0_f64)));
        assert_eq!(list.to_vec(), [Value::from(2_i64)]);
    }

    #[test]
    fn incomparable() {
        assert_eq!(Value::from("1").partial_cmp(&Value::from(1_i64)), None);
        assert_eq!(Value::from(true).partial_cmp(&Value::from(1_i64)), None);
        assert_eq!(Value::from(f64::NAN).partial_cmp(&Value::from(1.0_f64)), None);
    }

    #[test]
    fn fmt() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::from(true).kind(), "bool");
    }
}
