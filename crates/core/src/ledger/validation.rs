//! Business rule validation for journal entries.

use bursar_shared::types::Money;

use super::error::LedgerError;
use super::types::{EntryTotals, ResolvedLine};

/// Validates that a set of resolved lines forms a legal, balanced entry.
///
/// Rules:
/// - at least one line
/// - every line has exactly one positive side (never both, never neither)
/// - total debits equal total credits
///
/// # Errors
///
/// Returns an error describing the first violated rule.
pub fn validate_lines(lines: &[ResolvedLine]) -> Result<EntryTotals, LedgerError> {
    if lines.is_empty() {
        return Err(LedgerError::NoLines);
    }

    let mut total_debit = Money::ZERO;
    let mut total_credit = Money::ZERO;

    for line in lines {
        if line.debit.is_positive() && line.credit.is_positive() {
            return Err(LedgerError::BothSidesSet {
                line_no: line.line_no,
            });
        }
        if line.debit.is_zero() && line.credit.is_zero() {
            return Err(LedgerError::NoSideSet {
                line_no: line.line_no,
            });
        }
        if line.debit.is_negative() || line.credit.is_negative() {
            return Err(LedgerError::NonPositiveAmount {
                line_no: line.line_no,
            });
        }

        total_debit += line.debit;
        total_credit += line.credit;
    }

    if total_debit != total_credit {
        return Err(LedgerError::Unbalanced {
            debit: total_debit,
            credit: total_credit,
        });
    }

    Ok(EntryTotals::new(total_debit, total_credit))
}
