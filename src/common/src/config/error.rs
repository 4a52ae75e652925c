use std::fmt;

/// Raised synchronously when the active target is missing a required value.
/// No request is attempted when this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    MissingField(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField(field) => write!(f, "{} is missing or empty", field),
        }
    }
}

impl std::error::Error for ConfigError {}

impl ConfigError {
    /// Name of the offending configuration field
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::MissingField(field) => field,
        }
    }
}
