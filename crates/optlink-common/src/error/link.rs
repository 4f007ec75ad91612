//! Link error types.
//!
//! Every failure mode of a read or write pass is a variant of [`LinkError`].
//! There is no retry or partial-completion recovery anywhere in optlink:
//! an element or table either completes fully or the pass fails with one
//! of these errors.

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors.
///
/// These codes are stable across versions and range-partitioned by
/// category, so hosts can derive a distinct process exit status per
/// category without matching on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // General errors (0x0000 - 0x00FF)
    /// Internal error (bug or protocol violation).
    Internal = 0x0001,
    /// Invalid configuration.
    InvalidConfig = 0x0002,

    // Engine/model errors (0x0100 - 0x01FF)
    /// No declared data element with the requested name.
    UnknownElement = 0x0100,
    /// Element shape is not a scalar set or a tuple set.
    UnsupportedElementShape = 0x0101,
    /// Tuple field type is not integer/float/string.
    UnsupportedFieldType = 0x0102,

    // Data conversion errors (0x0200 - 0x02FF)
    /// Native value cannot be losslessly converted.
    TypeConversion = 0x0200,
    /// Required column missing from a query result.
    MissingColumn = 0x0201,

    // Database errors (0x0300 - 0x03FF)
    /// Driver name not registered.
    UnknownDriver = 0x0300,
    /// Connection, DDL, or DML failure.
    Database = 0x0301,
}

impl ErrorCode {
    /// Returns the numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns the error category name.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match (*self as u16) >> 8 {
            0x00 => "General",
            0x01 => "Engine",
            0x02 => "Data",
            0x03 => "Database",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The main error type for optlink.
///
/// Covers every failure mode of a read or write pass. Each variant
/// includes the context needed to report the failure at the host
/// boundary.
#[derive(Debug, Error)]
pub enum LinkError {
    /// Internal error - this indicates a bug or a violated protocol.
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },

    /// The modeling engine has no declared data element with this name.
    #[error("unknown data element '{element}'")]
    UnknownElement {
        /// The missing element name.
        element: String,
    },

    /// The element is neither a scalar set nor a tuple set.
    #[error("element '{element}' has unsupported shape: {shape}")]
    UnsupportedElementShape {
        /// The offending element name.
        element: String,
        /// Description of the declared shape.
        shape: String,
    },

    /// A tuple field's declared type is not integer/float/string.
    #[error("field '{field}' of element '{element}' has unsupported type {declared}")]
    UnsupportedFieldType {
        /// The owning element name.
        element: String,
        /// The offending field name.
        field: String,
        /// The declared field type.
        declared: String,
    },

    /// A native value could not be losslessly converted.
    #[error("cannot convert {value} to {expected}")]
    TypeConversion {
        /// The requested target type.
        expected: String,
        /// Display form of the offending value.
        value: String,
    },

    /// A column required by the element schema is absent from the query result.
    #[error("column '{column}' required by element '{element}' is missing from the query result")]
    MissingColumn {
        /// The owning element name.
        element: String,
        /// The missing column name.
        column: String,
    },

    /// No connector registered under this driver name.
    #[error("unknown database driver '{driver}'")]
    UnknownDriver {
        /// The unregistered driver name.
        driver: String,
    },

    /// Connection, DDL, or DML failure reported by the driver.
    #[error("database error: {message}")]
    Database {
        /// Driver-reported message.
        message: String,
    },
}

impl LinkError {
    /// Returns the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Internal { .. } => ErrorCode::Internal,
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::UnknownElement { .. } => ErrorCode::UnknownElement,
            Self::UnsupportedElementShape { .. } => ErrorCode::UnsupportedElementShape,
            Self::UnsupportedFieldType { .. } => ErrorCode::UnsupportedFieldType,
            Self::TypeConversion { .. } => ErrorCode::TypeConversion,
            Self::MissingColumn { .. } => ErrorCode::MissingColumn,
            Self::UnknownDriver { .. } => ErrorCode::UnknownDriver,
            Self::Database { .. } => ErrorCode::Database,
        }
    }

    /// Returns true if this error originated at the engine/model boundary.
    #[must_use]
    pub const fn is_engine_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownElement { .. }
                | Self::UnsupportedElementShape { .. }
                | Self::UnsupportedFieldType { .. }
        )
    }

    /// Returns true if this error originated at the database boundary.
    #[must_use]
    pub const fn is_database_error(&self) -> bool {
        matches!(self, Self::UnknownDriver { .. } | Self::Database { .. })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Creates a database error.
    #[must_use]
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Creates a type conversion error.
    #[must_use]
    pub fn type_conversion(expected: impl Into<String>, value: impl fmt::Display) -> Self {
        Self::TypeConversion {
            expected: expected.into(),
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = LinkError::UnknownElement {
            element: "Products".to_string(),
        };
        assert_eq!(err.code(), ErrorCode::UnknownElement);
        assert_eq!(err.code().category(), "Engine");

        let err = LinkError::database("boom");
        assert_eq!(err.code().category(), "Database");
    }

    #[test]
    fn test_error_display() {
        let err = LinkError::MissingColumn {
            element: "Products".to_string(),
            column: "price".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "column 'price' required by element 'Products' is missing from the query result"
        );
    }

    #[test]
    fn test_category_predicates() {
        assert!(LinkError::UnknownElement {
            element: "x".to_string()
        }
        .is_engine_error());
        assert!(LinkError::database("x").is_database_error());
        assert!(!LinkError::internal("x").is_engine_error());
        assert!(!LinkError::internal("x").is_database_error());
    }

    #[test]
    fn test_type_conversion_helper() {
        let err = LinkError::type_conversion("INT", "abc");
        assert_eq!(err.to_string(), "cannot convert abc to INT");
        assert_eq!(err.code(), ErrorCode::TypeConversion);
    }
}
