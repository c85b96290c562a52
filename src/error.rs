use thiserror::Error;

/// Input rejected before any storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the category and amount fields.")]
    MissingFields,
    #[error("Please enter a valid positive number for the amount.")]
    InvalidAmount,
    #[error("Please enter a valid year and month (1-12).")]
    InvalidPeriod,
}

impl ValidationError {
    /// Title used when the error is shown in a dialog.
    pub fn title(&self) -> &'static str {
        match self {
            ValidationError::MissingFields => "Missing Information",
            ValidationError::InvalidAmount => "Invalid Amount",
            ValidationError::InvalidPeriod => "Invalid Input",
        }
    }
}

#[derive(Debug, Error)]
pub enum FinanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction [{id}] was not found")]
    NotFound { id: i64 },
    #[error("Unknown transaction type [{0}]")]
    UnknownKind(String),
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl FinanceError {
    pub fn not_found(id: i64) -> Self {
        Self::NotFound { id }
    }

    /// Validation and missing-row errors are reported to the user and the
    /// application carries on; everything else is fatal.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FinanceError::Validation(_) | FinanceError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, FinanceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(FinanceError::from(ValidationError::InvalidAmount).is_recoverable());
        assert!(FinanceError::not_found(7).is_recoverable());
        assert!(!FinanceError::UnknownKind("transfer".to_string()).is_recoverable());
        assert!(!FinanceError::Storage(rusqlite::Error::InvalidQuery).is_recoverable());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FinanceError::not_found(42).to_string(),
            "Transaction [42] was not found"
        );
        assert_eq!(
            FinanceError::from(ValidationError::MissingFields).to_string(),
            "Please fill in the category and amount fields."
        );
        assert_eq!(ValidationError::InvalidPeriod.title(), "Invalid Input");
    }
}
