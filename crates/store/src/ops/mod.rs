//! The public operations, one module per engine.
//!
//! Each module adds an `impl LedgerStore` block with the operations it
//! owns, plus the input and outcome types the API boundary serializes.

pub mod accounts;
pub mod credit;
pub mod invoices;
pub mod payments;
pub mod posting;
pub mod reports;

pub use credit::{AddCreditOutcome, CreditApplicationOutcome, ReverseCreditOutcome};
pub use invoices::{CancelInvoiceOutcome, CreateInvoiceInput, InvoiceItemInput, InvoiceOutcome};
pub use payments::{AllocationLine, PaymentOutcome, ReceiptInfo, RecordPaymentInput, VoidPaymentOutcome};
pub use posting::{PostedEntry, ReviewOutcome, VoidOutcome};
