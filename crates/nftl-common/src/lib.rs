//! # NFTL Common
//!
//! Shared types and errors for the NFTL lending registry.
//!
//! ## Core Types
//!
//! - [`Loan`]: one lending agreement against a notional NFT
//! - [`LoanStatus`]: `ACTIVE` → `REPAID` lifecycle
//! - [`NftlError`]/[`LoanError`]: error hierarchy

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{LoanError, NftlError, Result};
pub use types::loan::{Loan, LoanId, LoanStatus};

/// NFTL version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Interest charged at repayment, in percent of principal
pub const INTEREST_RATE_PERCENT: u32 = 10;
