//! Pure credit balance logic.

use bursar_shared::types::Money;

use super::error::CreditError;
use super::types::{CreditTxSnapshot, CreditTxType};

/// Stateless credit ledger service.
///
/// Used by both the cache writer and correctness checks, so the fold
/// is the single definition of "balance".
pub struct CreditService;

impl CreditService {
    /// Folds a subject's credit rows into the current balance.
    ///
    /// `Σ received − Σ applied − Σ refunded`, from the append-only rows.
    #[must_use]
    pub fn balance(rows: &[CreditTxSnapshot]) -> Money {
        rows.iter().map(CreditTxSnapshot::signed_effect).sum()
    }

    /// Validates a credit grant.
    ///
    /// # Errors
    ///
    /// Rejects zero and negative amounts.
    pub fn validate_grant(amount: Money) -> Result<(), CreditError> {
        if amount.is_positive() {
            Ok(())
        } else {
            Err(CreditError::NonPositiveAmount)
        }
    }

    /// Checks that a balance can be allocated.
    ///
    /// # Errors
    ///
    /// Returns [`CreditError::NoBalance`] when the balance is zero or
    /// negative.
    pub fn allocatable_balance(rows: &[CreditTxSnapshot]) -> Result<Money, CreditError> {
        let balance = Self::balance(rows);
        if balance.is_positive() {
            Ok(balance)
        } else {
            Err(CreditError::NoBalance)
        }
    }

    /// Validates a reversal of an existing credit row.
    ///
    /// # Errors
    ///
    /// Only `Received` rows are reversible, each at most once, and only
    /// while the subject's derived balance still covers the amount (funds
    /// already applied to invoices cannot be refunded from here).
    pub fn validate_reversal(
        original: &CreditTxSnapshot,
        available: Money,
        already_reversed: bool,
    ) -> Result<(), CreditError> {
        match original.tx_type {
            CreditTxType::Received => {}
            other => return Err(CreditError::NotReversible(other)),
        }
        if already_reversed {
            return Err(CreditError::AlreadyReversed(original.id));
        }
        if available < original.amount {
            return Err(CreditError::InsufficientBalance {
                available,
                requested: original.amount,
            });
        }
        Ok(())
    }
}
