use thiserror::Error;

/// Error type for the conversion of a CSV row into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required value is empty while the rest of the row is not.
    #[error("missing value for '{0}'")]
    MissingField(&'static str),

    /// Identifiers must be base 10 unsigned integers.
    #[error("invalid integer for '{field}': '{value}'")]
    InvalidInteger {
        /// The column name.
        field: &'static str,

        /// The raw value found in the row.
        value: String,
    },
}

/// Parse a base 10 identifier.
pub(crate) fn parse_id(field: &'static str, value: &str) -> Result<u64, FieldError> {
    value.parse().map_err(|_| FieldError::InvalidInteger {
        field,
        value: value.to_string(),
    })
}

/// Unwrap a required value.
pub(crate) fn require(field: &'static str, value: Option<String>) -> Result<String, FieldError> {
    value.ok_or(FieldError::MissingField(field))
}
