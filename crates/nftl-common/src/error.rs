//! Error types for the NFTL registry
//!
//! Provides a unified error type and the loan-lifecycle error variants

use thiserror::Error;

use crate::types::loan::LoanId;

/// Result type alias using NftlError
pub type Result<T> = std::result::Result<T, NftlError>;

/// Unified error type for NFTL operations
#[derive(Debug, Error)]
pub enum NftlError {
    // Loan lifecycle errors
    #[error("Loan error: {0}")]
    Loan(#[from] LoanError),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    // Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Loan lifecycle errors
///
/// Raised synchronously; a failed operation leaves the registry untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoanError {
    #[error("Invalid loan amount: must be positive and repayable")]
    InvalidAmount,

    #[error("No loan found with id {0}")]
    NotFound(LoanId),

    #[error("Not authorized: {caller} is not the borrower ({borrower})")]
    Unauthorized { caller: String, borrower: String },

    #[error("Loan {0} has already been repaid")]
    AlreadyRepaid(LoanId),
}

impl From<serde_json::Error> for NftlError {
    fn from(err: serde_json::Error) -> Self {
        NftlError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for NftlError {
    fn from(err: anyhow::Error) -> Self {
        NftlError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NftlError::Loan(LoanError::NotFound(999));
        assert!(err.to_string().contains("No loan found"));
        assert!(err.to_string().contains("999"));
    }

    #[test]
    fn test_unauthorized_display() {
        let err = LoanError::Unauthorized {
            caller: "ST2CY5".to_string(),
            borrower: "ST1PQH".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Not authorized"));
        assert!(msg.contains("ST2CY5"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<u64>("not-a-number").unwrap_err();
        let err: NftlError = parse.into();
        assert!(matches!(err, NftlError::Serialization(_)));
    }
}
