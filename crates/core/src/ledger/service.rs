//! Ledger service for entry validation and resolution.
//!
//! Pure business logic: account facts are injected as a lookup closure so
//! the service can be exercised without any storage.

use bursar_shared::types::AccountId;

use super::error::LedgerError;
use super::types::{AccountType, EntrySide, EntryTotals, LineInput, PostEntryInput, ResolvedLine};
use super::validation::validate_lines;

/// Information about an account needed for posting validation.
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// The account ID.
    pub id: AccountId,
    /// The stable account code.
    pub code: String,
    /// The account classification.
    pub account_type: AccountType,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Ledger service for entry validation and resolution.
pub struct LedgerService;

impl LedgerService {
    /// Validate and resolve a journal entry before persisting.
    ///
    /// Steps:
    /// 1. Rejects empty line sets
    /// 2. Validates each line's amount (positive, non-zero)
    /// 3. Resolves account codes (must exist and be active)
    /// 4. Validates the entry balance (debits == credits)
    ///
    /// # Errors
    ///
    /// Returns `LedgerError` if validation fails; nothing is persisted by
    /// this function either way.
    pub fn validate_and_resolve<A>(
        input: &PostEntryInput,
        account_lookup: A,
    ) -> Result<(Vec<ResolvedLine>, EntryTotals), LedgerError>
    where
        A: Fn(&str) -> Result<AccountInfo, LedgerError>,
    {
        if input.lines.is_empty() {
            return Err(LedgerError::NoLines);
        }

        let mut resolved = Vec::with_capacity(input.lines.len());
        for (idx, line) in input.lines.iter().enumerate() {
            let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
            resolved.push(Self::resolve_line(line, line_no, &account_lookup)?);
        }

        let totals = validate_lines(&resolved)?;
        Ok((resolved, totals))
    }

    /// Resolve a single line against the chart of accounts.
    fn resolve_line<A>(
        line: &LineInput,
        line_no: u32,
        account_lookup: &A,
    ) -> Result<ResolvedLine, LedgerError>
    where
        A: Fn(&str) -> Result<AccountInfo, LedgerError>,
    {
        if !line.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount { line_no });
        }

        let account = account_lookup(&line.account_code)?;
        if !account.is_active {
            return Err(LedgerError::AccountInactive(account.code));
        }

        let (debit, credit) = match line.side {
            EntrySide::Debit => (line.amount, bursar_shared::types::Money::ZERO),
            EntrySide::Credit => (bursar_shared::types::Money::ZERO, line.amount),
        };

        Ok(ResolvedLine {
            account_id: account.id,
            debit,
            credit,
            line_no,
            description: line.description.clone(),
        })
    }
}
