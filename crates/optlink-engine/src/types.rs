//! Scalar types shared with the modeling engine.
//!
//! The engine's data model knows exactly three scalar kinds. Both are
//! closed enums, matched exhaustively everywhere: adding a kind is a
//! compile-time-checked enumeration of every match site.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The scalar type of a set element or tuple field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// 32-bit signed integer.
    Int,
    /// 64-bit floating point (the engine's "numeric" type).
    Num,
    /// String.
    Str,
}

impl ElementType {
    /// Returns true if this type is numeric.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, ElementType::Int | ElementType::Num)
    }

    /// Returns the type name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::Int => "int",
            ElementType::Num => "num",
            ElementType::Str => "string",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A strictly typed scalar crossing the engine boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// Integer value.
    Int(i32),
    /// Numeric value.
    Num(f64),
    /// String value.
    Str(String),
}

impl ScalarValue {
    /// Creates a string value.
    pub fn str(v: impl Into<String>) -> Self {
        ScalarValue::Str(v.into())
    }

    /// Returns the element type of this value.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            ScalarValue::Int(_) => ElementType::Int,
            ScalarValue::Num(_) => ElementType::Num,
            ScalarValue::Str(_) => ElementType::Str,
        }
    }

    /// Returns the integer value, if this is an integer.
    #[must_use]
    pub const fn as_int(&self) -> Option<i32> {
        match self {
            ScalarValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the numeric value, if this is a numeric.
    #[must_use]
    pub const fn as_num(&self) -> Option<f64> {
        match self {
            ScalarValue::Num(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string value, if this is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Int(i) => write!(f, "{}", i),
            ScalarValue::Num(n) => write!(f, "{}", n),
            ScalarValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i32> for ScalarValue {
    fn from(v: i32) -> Self {
        ScalarValue::Int(v)
    }
}

impl From<f64> for ScalarValue {
    fn from(v: f64) -> Self {
        ScalarValue::Num(v)
    }
}

impl From<&str> for ScalarValue {
    fn from(v: &str) -> Self {
        ScalarValue::Str(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_type_names() {
        assert_eq!(ElementType::Int.to_string(), "int");
        assert_eq!(ElementType::Num.to_string(), "num");
        assert_eq!(ElementType::Str.to_string(), "string");
        assert!(ElementType::Int.is_numeric());
        assert!(!ElementType::Str.is_numeric());
    }

    #[test]
    fn test_scalar_accessors() {
        assert_eq!(ScalarValue::Int(7).as_int(), Some(7));
        assert_eq!(ScalarValue::Num(1.5).as_num(), Some(1.5));
        assert_eq!(ScalarValue::str("x").as_str(), Some("x"));
        assert_eq!(ScalarValue::Int(7).as_num(), None);
    }

    #[test]
    fn test_scalar_element_type() {
        assert_eq!(ScalarValue::Int(1).element_type(), ElementType::Int);
        assert_eq!(ScalarValue::Num(1.0).element_type(), ElementType::Num);
        assert_eq!(ScalarValue::str("a").element_type(), ElementType::Str);
    }
}
