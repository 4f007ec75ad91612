//! Type mapping between element types and the relational model.
//!
//! This module is the single conversion boundary of the bridge:
//! [`sql_type`] renders an element type as a column type literal,
//! [`from_native`] strictly converts a driver-native cell into a typed
//! scalar, and [`to_native`] is its infallible inverse used when binding
//! INSERT parameters. Nothing else in the crate converts values.

use optlink_common::error::{LinkError, LinkResult};
use optlink_engine::types::{ElementType, ScalarValue};

use crate::value::SqlValue;

/// Returns the column type literal for an element type.
///
/// Strings become `VARCHAR(width)`; the width comes from the pass
/// configuration.
#[must_use]
pub fn sql_type(ty: ElementType, string_width: u32) -> String {
    match ty {
        ElementType::Int => "INT".to_string(),
        ElementType::Num => "FLOAT".to_string(),
        ElementType::Str => format!("VARCHAR({})", string_width),
    }
}

/// Converts a driver-native value into a scalar of the requested type.
///
/// The conversion is strict: it succeeds only when the native value can
/// be losslessly interpreted as the requested type. Numeric text is
/// parsed; fractional or out-of-range values never silently truncate;
/// NULL converts to nothing.
pub fn from_native(ty: ElementType, value: &SqlValue) -> LinkResult<ScalarValue> {
    match ty {
        ElementType::Int => int_from_native(value).map(ScalarValue::Int),
        ElementType::Num => num_from_native(value).map(ScalarValue::Num),
        ElementType::Str => str_from_native(value).map(ScalarValue::Str),
    }
}

/// Converts a typed scalar into its driver-native representation.
#[must_use]
pub fn to_native(value: &ScalarValue) -> SqlValue {
    match value {
        ScalarValue::Int(i) => SqlValue::Int(i64::from(*i)),
        ScalarValue::Num(n) => SqlValue::Float(*n),
        ScalarValue::Str(s) => SqlValue::Text(s.clone()),
    }
}

fn int_from_native(value: &SqlValue) -> LinkResult<i32> {
    match value {
        SqlValue::Int(i) => {
            i32::try_from(*i).map_err(|_| LinkError::type_conversion("int", value))
        }
        SqlValue::Float(f) => {
            if f.fract() == 0.0 && *f >= f64::from(i32::MIN) && *f <= f64::from(i32::MAX) {
                Ok(*f as i32)
            } else {
                Err(LinkError::type_conversion("int", value))
            }
        }
        SqlValue::Text(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| LinkError::type_conversion("int", value)),
        SqlValue::Null => Err(LinkError::type_conversion("int", value)),
    }
}

fn num_from_native(value: &SqlValue) -> LinkResult<f64> {
    match value {
        SqlValue::Int(i) => Ok(*i as f64),
        SqlValue::Float(f) => Ok(*f),
        SqlValue::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| LinkError::type_conversion("num", value)),
        SqlValue::Null => Err(LinkError::type_conversion("num", value)),
    }
}

fn str_from_native(value: &SqlValue) -> LinkResult<String> {
    match value {
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Int(i) => Ok(i.to_string()),
        SqlValue::Float(f) => Ok(f.to_string()),
        SqlValue::Null => Err(LinkError::type_conversion("string", value)),
    }
}
