//! Loan registry - create, repay and look up NFT-backed loans
//!
//! Owns every loan of one session together with the identifier nonce.
//! Failed operations leave both untouched.

use std::collections::BTreeMap;

use nftl_common::{Loan, LoanError, LoanId, LoanStatus};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::config::LedgerConfig;
use crate::height::{BlockHeightSource, WallClockHeight};

/// In-memory loan registry
#[derive(Debug)]
pub struct LoanRegistry<H = WallClockHeight> {
    /// Loans by identifier
    loans: BTreeMap<LoanId, Loan>,

    /// Last issued identifier (0 before the first loan)
    loan_nonce: LoanId,

    /// Reject a second repayment instead of re-running it
    strict_repayment: bool,

    height: H,
}

impl LoanRegistry<WallClockHeight> {
    /// Create an empty registry stamping loans with wall-clock height
    pub fn new() -> Self {
        Self::with_height_source(WallClockHeight)
    }
}

impl Default for LoanRegistry<WallClockHeight> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: BlockHeightSource> LoanRegistry<H> {
    /// Create an empty registry using the given height source
    pub fn with_height_source(height: H) -> Self {
        Self {
            loans: BTreeMap::new(),
            loan_nonce: 0,
            strict_repayment: false,
            height,
        }
    }

    /// Create an empty registry honouring `config`
    pub fn with_config(config: &LedgerConfig, height: H) -> Self {
        let mut registry = Self::with_height_source(height);
        registry.strict_repayment = config.strict_repayment;
        registry
    }

    /// Open a loan for `user` against `nft_id`
    ///
    /// Fails with [`LoanError::InvalidAmount`] unless `amount > 0`. The
    /// identifier is only consumed on success.
    #[instrument(skip(self))]
    pub fn create_loan(
        &mut self,
        user: &str,
        nft_id: u64,
        amount: Decimal,
        duration: u64,
    ) -> Result<LoanId, LoanError> {
        let start_block = self.height.block_height();
        let loan = match Loan::open(user, nft_id, amount, start_block, duration) {
            Ok(loan) => loan,
            Err(err) => {
                debug!(error = %err, "Loan rejected");
                return Err(err);
            }
        };

        let loan_id = self.loan_nonce + 1;
        info!(loan_id, start_block = loan.start_block, "Loan created");

        self.loans.insert(loan_id, loan);
        self.loan_nonce = loan_id;
        Ok(loan_id)
    }

    /// Repay `loan_id` on behalf of `user`, returning principal plus interest
    ///
    /// Only the borrower may repay. Repaying a loan that is already `REPAID`
    /// succeeds again with the same total unless strict repayment is on.
    #[instrument(skip(self))]
    pub fn repay_loan(&mut self, user: &str, loan_id: LoanId) -> Result<Decimal, LoanError> {
        let strict = self.strict_repayment;
        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(LoanError::NotFound(loan_id))?;

        if !loan.is_borrower(user) {
            warn!(borrower = %loan.borrower, "Repayment by non-borrower rejected");
            return Err(LoanError::Unauthorized {
                caller: user.to_string(),
                borrower: loan.borrower.clone(),
            });
        }

        if loan.status == LoanStatus::Repaid {
            if strict {
                return Err(LoanError::AlreadyRepaid(loan_id));
            }
            warn!("Loan already repaid, repeating repayment");
        }

        let total = loan.total_repayment();
        loan.mark_repaid();
        info!(%total, "Loan repaid");
        Ok(total)
    }

    /// Look up a loan; `None` if the identifier was never issued
    pub fn get_loan(&self, loan_id: LoanId) -> Option<&Loan> {
        self.loans.get(&loan_id)
    }

    /// Drop every loan and restart identifiers at 1
    pub fn reset(&mut self) {
        debug!(cleared = self.loans.len(), "Registry reset");
        self.loans.clear();
        self.loan_nonce = 0;
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Last issued identifier, 0 when none
    pub fn last_loan_id(&self) -> LoanId {
        self.loan_nonce
    }

    /// Loans opened by `user`, in identifier order
    pub fn loans_by_borrower<'a>(
        &'a self,
        user: &'a str,
    ) -> impl Iterator<Item = (LoanId, &'a Loan)> + 'a {
        self.loans
            .iter()
            .filter(move |(_, loan)| loan.is_borrower(user))
            .map(|(id, loan)| (*id, loan))
    }

    /// Loans still awaiting repayment, in identifier order
    pub fn active_loans(&self) -> impl Iterator<Item = (LoanId, &Loan)> + '_ {
        self.loans
            .iter()
            .filter(|(_, loan)| loan.is_active())
            .map(|(id, loan)| (*id, loan))
    }

    pub fn height_source(&self) -> &H {
        &self.height
    }

    pub fn height_source_mut(&mut self) -> &mut H {
        &mut self.height
    }
}
