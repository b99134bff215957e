//! Replay detection logic.

use chrono::{DateTime, Duration, Utc};

use super::types::{InvoiceFingerprint, ItemFingerprint, PaymentFingerprint};

/// Stateless duplicate detector.
///
/// Storage hands it candidate rows; it decides whether the new request
/// is a replay. Exact-key lookup happens at the storage layer against
/// the unique-constrained key column; this service covers key
/// normalization and the fuzzy fingerprint path.
pub struct IdempotencyService;

impl IdempotencyService {
    /// Truncates an idempotency key to `max_len` characters.
    ///
    /// Keys are free text, so the cut respects character boundaries.
    /// Empty and whitespace-only keys are treated as absent.
    #[must_use]
    pub fn normalize_key(key: &str, max_len: usize) -> Option<String> {
        let trimmed = key.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(trimmed.chars().take(max_len).collect())
    }

    /// Normalizes invoice items for order-independent comparison.
    ///
    /// Descriptions are trimmed; items sort by category id, then amount,
    /// then description.
    #[must_use]
    pub fn normalize_items(mut items: Vec<ItemFingerprint>) -> Vec<ItemFingerprint> {
        for item in &mut items {
            item.description = item.description.trim().to_string();
        }
        items.sort();
        items
    }

    /// Finds a prior payment the request duplicates, if any.
    ///
    /// Matches subject, amount, date, method, reference, and creator
    /// against rows created within `window` before `now`. A zero window
    /// disables fuzzy matching entirely.
    #[must_use]
    pub fn find_payment_replay<'a>(
        request: &PaymentFingerprint,
        candidates: impl IntoIterator<Item = &'a PaymentFingerprint>,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Option<&'a PaymentFingerprint> {
        if window <= Duration::zero() {
            return None;
        }
        candidates.into_iter().find(|prior| {
            prior.subject_id == request.subject_id
                && prior.amount == request.amount
                && prior.payment_date == request.payment_date
                && prior.method == request.method
                && prior.reference == request.reference
                && prior.created_by == request.created_by
                && Self::within_window(prior.created_at, window, now)
        })
    }

    /// Finds a prior invoice the request duplicates, if any.
    ///
    /// In addition to the payment-style fields, the normalized item sets
    /// must match exactly. Both sides are normalized before comparison.
    #[must_use]
    pub fn find_invoice_replay<'a>(
        request: &InvoiceFingerprint,
        candidates: impl IntoIterator<Item = &'a InvoiceFingerprint>,
        window: Duration,
        now: DateTime<Utc>,
    ) -> Option<&'a InvoiceFingerprint> {
        if window <= Duration::zero() {
            return None;
        }
        let request_items = Self::normalize_items(request.items.clone());
        candidates.into_iter().find(|prior| {
            prior.subject_id == request.subject_id
                && prior.total == request.total
                && prior.invoice_date == request.invoice_date
                && prior.created_by == request.created_by
                && Self::within_window(prior.created_at, window, now)
                && Self::normalize_items(prior.items.clone()) == request_items
        })
    }

    fn within_window(created_at: DateTime<Utc>, window: Duration, now: DateTime<Utc>) -> bool {
        created_at <= now && now - created_at <= window
    }
}
