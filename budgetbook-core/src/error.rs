//! Error types for budgetbook-core

use thiserror::Error;

/// Main error type for the budgetbook-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed input (empty category, unparseable date)
    #[error("validation error: {0}")]
    Validation(String),

    /// Amount is non-numeric, negative, or does not fit DECIMAL(10,2)
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A budget for this category already exists
    #[error("a budget for category {0:?} already exists")]
    DuplicateCategory(String),

    /// Operation referenced an id with no row behind it
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Storage error (connection failure, unclassified constraint violation)
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors caused by bad user input.
    ///
    /// `InvalidAmount` is tracked separately from `Validation` but both come
    /// from the same kind of mistake and are reported the same way.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::InvalidAmount(_))
    }

    /// Message suitable for showing to the person at the keyboard.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => format!("Please fill in all fields correctly: {msg}"),
            Error::InvalidAmount(msg) => format!("Amount must be a non-negative number: {msg}"),
            Error::DuplicateCategory(category) => format!(
                "Category {category:?} already exists. Use update to modify it."
            ),
            Error::NotFound { entity, id } => format!("No {entity} with id {id}"),
            Error::Storage(e) => format!("Database error: {e}"),
            Error::Io(e) => format!("IO error: {e}"),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}

/// Result type alias for budgetbook-core
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_kinds() {
        assert!(Error::Validation("category is required".into()).is_validation());
        assert!(Error::InvalidAmount("abc".into()).is_validation());
        assert!(!Error::DuplicateCategory("Food".into()).is_validation());
        assert!(!Error::NotFound {
            entity: "budget",
            id: 1
        }
        .is_validation());
    }

    #[test]
    fn test_user_messages() {
        let err = Error::DuplicateCategory("Food".to_string());
        assert!(err.user_message().contains("already exists"));

        let err = Error::NotFound {
            entity: "expense",
            id: 42,
        };
        assert_eq!(err.user_message(), "No expense with id 42");
        assert_eq!(err.to_string(), "expense 42 not found");
    }
}
