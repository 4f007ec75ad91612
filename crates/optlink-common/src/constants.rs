//! Shared constants for optlink.

/// Default column width for string-typed fields in generated DDL.
///
/// Strings land in `VARCHAR(width)` columns. 30 is the inherited default;
/// override it per pass via `LinkConfig::string_width` when model strings
/// are longer.
pub const DEFAULT_STRING_WIDTH: u32 = 30;

/// Placeholder used for INSERT parameters in generated DML.
pub const PARAM_PLACEHOLDER: &str = "?";
