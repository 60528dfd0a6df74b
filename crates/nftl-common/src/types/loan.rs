//! Loan - one lending agreement against a notional NFT
//!
//! A loan is opened `ACTIVE` and moves to `REPAID` exactly once.
//! Key characteristics:
//! - Principal must be positive and never changes after opening
//! - Interest is a flat percentage of principal, charged at repayment
//! - Start block and duration are recorded but never enforced

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanError;
use crate::INTEREST_RATE_PERCENT;

/// Sequential loan identifier, starting at 1
pub type LoanId = u64;

/// Loan lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    /// Opened and awaiting repayment
    Active,
    /// Repaid by the borrower (terminal)
    Repaid,
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoanStatus::Active => write!(f, "ACTIVE"),
            LoanStatus::Repaid => write!(f, "REPAID"),
        }
    }
}

/// NFT-collateralized loan record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    /// Account that opened the loan; the only party allowed to repay it
    pub borrower: String,

    /// Token pledged as notional collateral (ownership is not checked)
    pub nft_id: u64,

    /// Principal
    pub loan_amount: Decimal,

    /// Interest in percent of principal
    pub interest_rate: Decimal,

    /// Block height at creation
    pub start_block: u64,

    /// Agreed term in blocks
    pub duration: u64,

    /// Lifecycle state
    pub status: LoanStatus,
}

impl Loan {
    /// Open a new `ACTIVE` loan at the fixed protocol interest rate
    ///
    /// Rejects principals that are not positive or whose repayment total
    /// does not fit in a `Decimal`.
    pub fn open(
        borrower: impl Into<String>,
        nft_id: u64,
        loan_amount: Decimal,
        start_block: u64,
        duration: u64,
    ) -> Result<Self, LoanError> {
        if loan_amount <= Decimal::ZERO {
            return Err(LoanError::InvalidAmount);
        }

        let interest_rate = Decimal::from(INTEREST_RATE_PERCENT);
        if checked_total(loan_amount, interest_rate).is_none() {
            return Err(LoanError::InvalidAmount);
        }

        Ok(Self {
            borrower: borrower.into(),
            nft_id,
            loan_amount,
            interest_rate,
            start_block,
            duration,
            status: LoanStatus::Active,
        })
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }

    /// Whether `caller` is the recorded borrower
    #[inline]
    pub fn is_borrower(&self, caller: &str) -> bool {
        self.borrower == caller
    }

    /// Interest owed: `loan_amount * interest_rate / 100`
    ///
    /// Exact for every loan built by [`Loan::open`]; saturates for records
    /// assembled by hand.
    pub fn interest_amount(&self) -> Decimal {
        self.loan_amount.saturating_mul(self.interest_rate) / Decimal::ONE_HUNDRED
    }

    /// Principal plus interest
    pub fn total_repayment(&self) -> Decimal {
        self.loan_amount.saturating_add(self.interest_amount())
    }

    /// Height at which the agreed term ends. Informational only.
    pub fn maturity_block(&self) -> u64 {
        self.start_block.saturating_add(self.duration)
    }

    /// Move to `REPAID`. Returns `false` if the loan was already repaid.
    pub fn mark_repaid(&mut self) -> bool {
        let was_active = self.is_active();
        self.status = LoanStatus::Repaid;
        was_active
    }
}

fn checked_total(loan_amount: Decimal, interest_rate: Decimal) -> Option<Decimal> {
    let interest = loan_amount
        .checked_mul(interest_rate)?
        .checked_div(Decimal::ONE_HUNDRED)?;
    loan_amount.checked_add(interest)
}

impl std::fmt::Display for Loan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Loan(nft={}, amount={}, rate={}%, status={})",
            self.nft_id, self.loan_amount, self.interest_rate, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_loan() {
        let loan = Loan::open("ST1PQH", 101, dec!(1000), 42, 30).unwrap();
        assert_eq!(loan.nft_id, 101);
        assert_eq!(loan.loan_amount, dec!(1000));
        assert_eq!(loan.interest_rate, dec!(10));
        assert_eq!(loan.start_block, 42);
        assert_eq!(loan.duration, 30);
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        assert_eq!(
            Loan::open("ST1PQH", 101, Decimal::ZERO, 0, 30),
            Err(LoanError::InvalidAmount)
        );
        assert_eq!(
            Loan::open("ST1PQH", 101, dec!(-5), 0, 30),
            Err(LoanError::InvalidAmount)
        );
    }

    #[test]
    fn test_rejects_unrepayable_amount() {
        assert_eq!(
            Loan::open("ST1PQH", 101, Decimal::MAX, 0, 30),
            Err(LoanError::InvalidAmount)
        );

        let large = dec!(1000000000000000000000000);
        let loan = Loan::open("ST1PQH", 101, large, 0, 30).unwrap();
        assert_eq!(loan.total_repayment(), dec!(1100000000000000000000000));
    }

    #[test]
    fn test_hand_built_record_saturates() {
        let mut loan = Loan::open("ST1PQH", 101, dec!(1), 0, 30).unwrap();
        loan.loan_amount = Decimal::MAX;
        assert_eq!(loan.total_repayment(), Decimal::MAX);
    }

    #[test]
    fn test_repayment_amounts() {
        let loan = Loan::open("ST1PQH", 102, dec!(1000), 0, 30).unwrap();
        assert_eq!(loan.interest_amount(), dec!(100));
        assert_eq!(loan.total_repayment(), dec!(1100));

        let fractional = Loan::open("ST1PQH", 103, dec!(1234.5), 0, 30).unwrap();
        assert_eq!(fractional.total_repayment(), dec!(1357.95));
    }

    #[test]
    fn test_mark_repaid_once() {
        let mut loan = Loan::open("ST1PQH", 104, dec!(2000), 0, 60).unwrap();
        assert!(loan.mark_repaid());
        assert_eq!(loan.status, LoanStatus::Repaid);
        assert!(!loan.mark_repaid());
        assert_eq!(loan.status, LoanStatus::Repaid);
    }

    #[test]
    fn test_maturity_saturates() {
        let loan = Loan::open("ST1PQH", 105, dec!(1), u64::MAX - 1, 30).unwrap();
        assert_eq!(loan.maturity_block(), u64::MAX);
    }

    #[test]
    fn test_json_shape() {
        let loan = Loan::open("ST1PQH", 106, dec!(1000), 7, 30).unwrap();
        let json = serde_json::to_value(&loan).unwrap();
        assert_eq!(json["status"], "ACTIVE");
        assert_eq!(json["nftId"], 106);
        assert_eq!(json["startBlock"], 7);
        assert!(json.get("loanAmount").is_some());
        assert!(json.get("interestRate").is_some());

        let back: Loan = serde_json::from_value(json).unwrap();
        assert_eq!(back, loan);
    }
}
