//! Journal domain types for entry creation and validation.

use bursar_shared::types::{AccountId, Money, SubjectId, TermId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Entry side: either Debit or Credit.
///
/// In double-entry bookkeeping:
/// - Debits increase asset/expense accounts, decrease liability/equity/revenue accounts
/// - Credits decrease asset/expense accounts, increase liability/equity/revenue accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySide {
    /// Debit entry.
    Debit,
    /// Credit entry.
    Credit,
}

impl EntrySide {
    /// Returns the opposite side.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }
}

/// Chart-of-accounts classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, bank, receivables).
    Asset,
    /// Obligations owed (unearned fees, student credit balances).
    Liability,
    /// Ownership interest / fund balance.
    Equity,
    /// Income earned (fees billed).
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// The side on which this account type normally carries its balance.
    #[must_use]
    pub const fn normal_side(self) -> EntrySide {
        match self {
            Self::Asset | Self::Expense => EntrySide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => EntrySide::Credit,
        }
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }

    /// Parses an account type from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asset" => Some(Self::Asset),
            "liability" => Some(Self::Liability),
            "equity" => Some(Self::Equity),
            "revenue" => Some(Self::Revenue),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Signed balance of this account given its debit and credit totals.
    ///
    /// Debit-normal accounts: debit − credit.
    /// Credit-normal accounts: credit − debit.
    #[must_use]
    pub fn balance(self, debit_total: Money, credit_total: Money) -> Money {
        match self.normal_side() {
            EntrySide::Debit => debit_total - credit_total,
            EntrySide::Credit => credit_total - debit_total,
        }
    }
}

/// Journal entry category.
///
/// Categorizes entries for reporting and approval-rule matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Fee payment received from a student.
    FeePayment,
    /// Fees billed via invoice.
    Invoice,
    /// Scholarship applied against fees.
    Scholarship,
    /// Credit balance applied to an invoice.
    CreditApplied,
    /// Reversal created by voiding another entry.
    VoidReversal,
    /// Manual adjustment entry.
    Adjustment,
    /// Opening balance entry.
    OpeningBalance,
    /// Refund paid out.
    Refund,
}

impl EntryKind {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FeePayment => "fee_payment",
            Self::Invoice => "invoice",
            Self::Scholarship => "scholarship",
            Self::CreditApplied => "credit_applied",
            Self::VoidReversal => "void_reversal",
            Self::Adjustment => "adjustment",
            Self::OpeningBalance => "opening_balance",
            Self::Refund => "refund",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input for a single line in a journal entry.
///
/// A line carries a side and a positive amount; the account is referenced
/// by its stable code and resolved during validation.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// The account code to post to.
    pub account_code: String,
    /// Whether this is a debit or credit line.
    pub side: EntrySide,
    /// The amount (must be positive).
    pub amount: Money,
    /// Optional free-text description for this line.
    pub description: Option<String>,
}

/// Input for posting a new journal entry.
#[derive(Debug, Clone)]
pub struct PostEntryInput {
    /// The entry date.
    pub entry_date: NaiveDate,
    /// The entry category.
    pub kind: EntryKind,
    /// A description of the entry.
    pub description: String,
    /// Optional linked student.
    pub subject_id: Option<SubjectId>,
    /// Optional linked academic term.
    pub term_id: Option<TermId>,
    /// The lines (must be non-empty and balanced).
    pub lines: Vec<LineInput>,
    /// The user posting the entry.
    pub created_by: UserId,
}

/// A resolved journal line ready for persistence.
///
/// After account resolution, each line carries explicit debit and credit
/// amounts; exactly one of the two is positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLine {
    /// The account this line posts to.
    pub account_id: AccountId,
    /// The debit amount (zero if the line is a credit).
    pub debit: Money,
    /// The credit amount (zero if the line is a debit).
    pub credit: Money,
    /// Line number for stable ordering (1-based).
    pub line_no: u32,
    /// Optional free-text description.
    pub description: Option<String>,
}

impl ResolvedLine {
    /// Returns a copy with debit and credit swapped, for reversal entries.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            account_id: self.account_id,
            debit: self.credit,
            credit: self.debit,
            line_no: self.line_no,
            description: self.description.clone(),
        }
    }
}

/// Entry totals for validation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryTotals {
    /// Total debit amount.
    pub debit: Money,
    /// Total credit amount.
    pub credit: Money,
    /// Whether the entry is balanced (debits == credits).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates entry totals from debit and credit sums.
    #[must_use]
    pub fn new(debit: Money, credit: Money) -> Self {
        Self {
            debit,
            credit,
            is_balanced: debit == credit,
        }
    }
}
