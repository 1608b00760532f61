use thiserror::Error;

/// Result type for smartinvo-types operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Client-side input errors, raised before any request is issued
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A mandatory field was absent or blank
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown category '{0}' (expected one of: vegetable, fruit, dairy, meat, frozen, grains, nuts, other)")]
    UnknownCategory(String),

    #[error("invalid arrival date '{0}': expected YYYY-MM-DD")]
    InvalidArrivalDate(String),
}

impl ValidationError {
    /// Name of the offending field, for form highlighting
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::UnknownCategory(_) => "category",
            ValidationError::InvalidArrivalDate(_) => "arrival_date",
        }
    }
}
