//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `SubjectId` where an
//! `InvoiceId` is expected. IDs are UUID v7, so their natural ordering is
//! creation order — the allocation engines rely on this for tie-breaking.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(UserId, "Unique identifier for an acting user (staff).");
typed_id!(SubjectId, "Unique identifier for an account holder (student).");
typed_id!(TermId, "Unique identifier for an academic term.");
typed_id!(AccountId, "Unique identifier for a chart-of-accounts entry.");
typed_id!(EntryId, "Unique identifier for a journal entry.");
typed_id!(LineId, "Unique identifier for a journal entry line.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(PaymentId, "Unique identifier for a ledger payment transaction.");
typed_id!(ReceiptId, "Unique identifier for a receipt.");
typed_id!(CreditTxId, "Unique identifier for a credit ledger transaction.");
typed_id!(AllocationId, "Unique identifier for a payment allocation row.");
typed_id!(RuleId, "Unique identifier for an approval rule.");
typed_id!(FeeCategoryId, "Unique identifier for a fee category.");
